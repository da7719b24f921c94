//! Head fire intensity (FBP equation 69)
//!
//! Byram's intensity `I = H × w × r` with the FBP low heat of combustion
//! (18 000 kJ/kg) folded into the constant 300 when `w` is in kg/m² and `r`
//! in m/min.

use crate::core_types::fuel::FuelType;

use super::fuel_consumption::total_fuel_consumption;

/// Upper bounds (kW/m, exclusive) of intensity groups 1-4; anything above is 5
const INTENSITY_GROUP_BOUNDS: [f64; 4] = [500.0, 1000.0, 2000.0, 4000.0];

/// Fire intensity (kW/m) from fuel consumption (kg/m²) and spread rate (m/min)
pub fn fire_intensity(fuel_consumption: f64, ros: f64) -> f64 {
    300.0 * fuel_consumption * ros
}

/// Head fire intensity (kW/m)
///
/// Combines surface and crown consumption. Crown consumption is scaled by the
/// conifer share for M1/M2 and the dead balsam fir share for M3/M4.
///
/// Returns `None` when crown fraction burned is unknown. A fuel type without a
/// crown fuel load burns surface fuel only.
///
/// # Arguments
/// * `fuel_type` - FBP fuel type
/// * `percentage_conifer` - Conifer share, M1/M2 (0-100)
/// * `percentage_dead_balsam_fir` - Dead fir share, M3/M4 (0-100)
/// * `ros` - Rate of spread (m/min)
/// * `cfb` - Crown fraction burned (0-1)
/// * `cfl` - Crown fuel load (kg/m²)
/// * `sfc` - Surface fuel consumption (kg/m²)
pub fn head_fire_intensity(
    fuel_type: FuelType,
    percentage_conifer: f64,
    percentage_dead_balsam_fir: f64,
    ros: f64,
    cfb: Option<f64>,
    cfl: Option<f64>,
    sfc: f64,
) -> Option<f64> {
    let cfb = cfb?;
    let tfc = total_fuel_consumption(
        fuel_type,
        cfl.unwrap_or(0.0),
        cfb,
        sfc,
        percentage_conifer,
        percentage_dead_balsam_fir,
    );
    let hfi = fire_intensity(tfc, ros);
    tracing::debug!(%fuel_type, tfc, hfi, "head fire intensity");
    Some(hfi)
}

/// Intensity class (1-5) used on fire behaviour advisories
pub fn intensity_group(hfi: f64) -> u8 {
    let mut group = 1;
    for bound in INTENSITY_GROUP_BOUNDS {
        if hfi < bound {
            return group;
        }
        group += 1;
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_c2_reference_intensity() {
        // Horsefly C2, 2021-07-05
        let hfi = head_fire_intensity(
            FuelType::C2,
            100.0,
            0.0,
            10.328429,
            Some(0.88496),
            Some(0.8),
            3.711345,
        )
        .unwrap();
        assert_abs_diff_eq!(hfi, 13692.785, epsilon = 2.0);
    }

    #[test]
    fn test_unknown_cfb_gives_unknown_hfi() {
        assert_eq!(
            head_fire_intensity(FuelType::C2, 100.0, 0.0, 10.0, None, Some(0.8), 3.0),
            None
        );
    }

    #[test]
    fn test_surface_only_fuel() {
        let hfi = head_fire_intensity(FuelType::D1, 0.0, 0.0, 2.0, Some(0.0), None, 1.2).unwrap();
        assert_abs_diff_eq!(hfi, 300.0 * 1.2 * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intensity_group_boundaries() {
        assert_eq!(intensity_group(0.0), 1);
        assert_eq!(intensity_group(499.9), 1);
        assert_eq!(intensity_group(500.0), 2);
        assert_eq!(intensity_group(1999.0), 3);
        assert_eq!(intensity_group(3999.0), 4);
        assert_eq!(intensity_group(4000.0), 5);
        assert_eq!(intensity_group(13692.0), 5);
    }
}
