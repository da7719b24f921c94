//! Critical FFMC search
//!
//! Finds the FFMC at which head fire intensity reaches a target, holding every
//! other input of the advisory fixed. ISI and surface fuel consumption are
//! recomputed from each trial FFMC; crown fraction burned is not.

use crate::cffdrs::fuel_consumption::{
    surface_fuel_consumption_with_grass_load, total_fuel_consumption,
};
use crate::cffdrs::intensity::fire_intensity;
use crate::cffdrs::spread::{initial_spread_index, rate_of_spread};
use crate::config::AdvisoryConfig;
use crate::core_types::fuel::FuelType;

/// Lowest FFMC searched
pub const MIN_FFMC: f64 = 0.0;
/// Highest FFMC searched
pub const MAX_FFMC: f64 = 101.0;

/// Bracket width at which the bisection stops regardless of HFI error
const MIN_BRACKET_WIDTH: f64 = 1e-6;

/// Inputs held fixed while searching over FFMC
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireScenario {
    pub fuel_type: FuelType,
    pub percentage_conifer: f64,
    pub percentage_dead_balsam_fir: f64,
    pub bui: f64,
    /// 10 m open wind speed (km/h)
    pub wind_speed: f64,
    pub grass_cure: f64,
    pub crown_base_height: Option<f64>,
    /// Daily FFMC, valid at solar noon
    pub solar_noon_ffmc: f64,
    /// Foliar moisture content (%)
    pub fmc: f64,
    /// Crown fraction burned
    pub cfb: f64,
    /// Crown fuel load (kg/m²)
    pub cfl: Option<f64>,
}

impl FireScenario {
    /// Head fire intensity (kW/m) this scenario would have at `ffmc`
    pub fn hfi_at(&self, ffmc: f64, grass_fuel_load: f64) -> f64 {
        let isi = initial_spread_index(ffmc, self.wind_speed);
        let sfc = surface_fuel_consumption_with_grass_load(
            self.fuel_type,
            self.bui,
            ffmc,
            self.percentage_conifer,
            grass_fuel_load,
        );
        let ros = rate_of_spread(
            self.fuel_type,
            isi,
            self.bui,
            self.fmc,
            sfc,
            self.percentage_conifer,
            self.grass_cure,
            self.percentage_dead_balsam_fir,
            self.crown_base_height,
        );
        let tfc = total_fuel_consumption(
            self.fuel_type,
            self.cfl.unwrap_or(0.0),
            self.cfb,
            sfc,
            self.percentage_conifer,
            self.percentage_dead_balsam_fir,
        );
        fire_intensity(tfc, ros)
    }
}

/// FFMC at which head fire intensity reaches `target_hfi`
///
/// Returns `(critical_ffmc, resulting_hfi)`:
/// - `(101, hfi(101))` when even the driest fuel stays below the target
/// - `(0, hfi(0))` when even the wettest fuel meets it
/// - otherwise a bisection result within the configured relative tolerance
///
/// The search brackets from the solar-noon FFMC, which is usually close to
/// the answer.
pub fn get_ffmc_for_target_hfi(
    scenario: &FireScenario,
    target_hfi: f64,
    config: &AdvisoryConfig,
) -> (f64, f64) {
    let hfi = |ffmc: f64| scenario.hfi_at(ffmc, config.grass_fuel_load);

    let hfi_max = hfi(MAX_FFMC);
    if hfi_max < target_hfi {
        tracing::debug!(target_hfi, hfi_max, "target HFI unreachable");
        return (MAX_FFMC, hfi_max);
    }
    let hfi_min = hfi(MIN_FFMC);
    if hfi_min >= target_hfi {
        tracing::debug!(target_hfi, hfi_min, "target HFI met at any FFMC");
        return (MIN_FFMC, hfi_min);
    }

    let seed = scenario.solar_noon_ffmc.clamp(MIN_FFMC, MAX_FFMC);
    let (mut lo, mut hi) = if hfi(seed) >= target_hfi {
        (MIN_FFMC, seed)
    } else {
        (seed, MAX_FFMC)
    };

    let mut ffmc = 0.5 * (lo + hi);
    let mut result = hfi(ffmc);
    for iteration in 0..config.solver_max_iterations {
        ffmc = 0.5 * (lo + hi);
        result = hfi(ffmc);
        let error = ((result - target_hfi) / target_hfi).abs();
        tracing::debug!(iteration, ffmc, hfi = result, error, "critical FFMC search");

        if error <= config.solver_tolerance || hi - lo < MIN_BRACKET_WIDTH {
            break;
        }
        if result < target_hfi {
            lo = ffmc;
        } else {
            hi = ffmc;
        }
    }

    (ffmc, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn horsefly_c2() -> FireScenario {
        FireScenario {
            fuel_type: FuelType::C2,
            percentage_conifer: 100.0,
            percentage_dead_balsam_fir: 0.0,
            bui: 117.899,
            wind_speed: 9.186646,
            grass_cure: 0.0,
            crown_base_height: Some(3.0),
            solar_noon_ffmc: 90.638,
            fmc: 113.62,
            cfb: 0.88496,
            cfl: Some(0.8),
        }
    }

    #[test]
    fn test_c2_critical_ffmc() {
        let config = AdvisoryConfig::default();
        let (ffmc, hfi) = get_ffmc_for_target_hfi(&horsefly_c2(), 4000.0, &config);
        assert_abs_diff_eq!(ffmc, 84.421, epsilon = 0.01);
        assert_abs_diff_eq!(hfi, 4000.0, epsilon = 4000.0 * 1e-4);

        let (ffmc, _) = get_ffmc_for_target_hfi(&horsefly_c2(), 10000.0, &config);
        assert_abs_diff_eq!(ffmc, 89.029, epsilon = 0.01);
    }

    #[test]
    fn test_unreachable_target() {
        let config = AdvisoryConfig::default();
        let (ffmc, hfi) = get_ffmc_for_target_hfi(&horsefly_c2(), 1.0e9, &config);
        assert_eq!(ffmc, MAX_FFMC);
        assert!(hfi < 1.0e9);
    }

    #[test]
    fn test_target_met_everywhere() {
        let config = AdvisoryConfig::default();
        let scenario = horsefly_c2();
        let floor = scenario.hfi_at(MIN_FFMC, config.grass_fuel_load);
        let (ffmc, hfi) = get_ffmc_for_target_hfi(&scenario, floor * 0.5, &config);
        assert_eq!(ffmc, MIN_FFMC);
        assert_eq!(hfi, floor);
    }

    #[test]
    fn test_hfi_increases_with_ffmc() {
        let scenario = horsefly_c2();
        let mut previous = 0.0;
        for ffmc in (0..=101).map(f64::from) {
            let hfi = scenario.hfi_at(ffmc, 0.35);
            assert!(hfi >= previous, "HFI decreased at FFMC {}", ffmc);
            previous = hfi;
        }
    }
}
