//! Van Wagner Crown Fire Initiation (1977) as used by the FBP system
//!
//! Implements crown fire initiation for the FBP fuel types:
//! - Critical surface intensity for crowning from foliar moisture and crown base height
//! - Critical surface spread rate (RSO) at which crowning starts
//! - Crown fraction burned from the excess of spread rate over RSO
//!
//! # Scientific References
//! - Van Wagner, C.E. (1977). "Conditions for the start and spread of crown fire"
//!   Canadian Journal of Forest Research, 7(1), 23-34
//! - Forestry Canada Fire Danger Group (1992), ST-X-3, equations 56-58

use crate::core_types::fuel::FuelType;

/// Critical surface fire intensity for crown fire initiation (kW/m)
///
/// FBP form of Van Wagner (1977):
/// CSI = 0.001 × CBH^1.5 × (460 + 25.9 × FMC)^1.5
///
/// # Arguments
/// * `fmc` - Foliar moisture content (%)
/// * `cbh` - Crown base height (m)
pub fn critical_surface_intensity(fmc: f64, cbh: f64) -> f64 {
    0.001 * cbh.powf(1.5) * (460.0 + 25.9 * fmc).powf(1.5)
}

/// Critical surface fire spread rate for crowning (m/min)
///
/// RSO = CSI / (300 × SFC)
pub fn critical_spread_rate(fmc: f64, sfc: f64, cbh: f64) -> f64 {
    critical_surface_intensity(fmc, cbh) / (300.0 * sfc)
}

/// Crown fraction burned (0-1)
///
/// CFB = 1 - exp(-0.23 × (ROS - RSO)) when ROS exceeds RSO, otherwise 0.
///
/// Only meaningful for fuel types that can crown; the advisory substitutes 0
/// for the others rather than calling this.
///
/// # Arguments
/// * `fuel_type` - FBP fuel type
/// * `fmc` - Foliar moisture content (%)
/// * `sfc` - Surface fuel consumption (kg/m²)
/// * `ros` - Rate of spread (m/min)
/// * `cbh` - Crown base height (m)
pub fn crown_fraction_burned(fuel_type: FuelType, fmc: f64, sfc: f64, ros: f64, cbh: f64) -> f64 {
    let rso = critical_spread_rate(fmc, sfc, cbh);
    let cfb = if ros > rso {
        1.0 - (-0.23 * (ros - rso)).exp()
    } else {
        0.0
    };
    tracing::debug!(%fuel_type, rso, cfb, "crown fraction burned");
    cfb
}
