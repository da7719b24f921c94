//! Rate of spread, build-up effect and fire shape (FBP equations 26-81)
//!
//! Implements the fuel-type-specific initial spread rate curves, the mixedwood
//! and grass modifications, the C6 plantation crowning sub-model and the
//! length-to-breadth ratio of the elliptical fire shape.
//!
//! # Scientific References
//! - Forestry Canada Fire Danger Group (1992), ST-X-3
//! - Van Wagner, C.E. (1987). "Development and structure of the Canadian Forest
//!   Fire Weather Index System". Forestry Technical Report 35 (ISI)
//! - Wotton, B.M. et al. (2009), GLC-X-10

use crate::core_types::fuel::{FuelType, SpreadCoefficients};

use super::crown_fire::crown_fraction_burned;
use super::MIN_RATE_OF_SPREAD;

/// Initial spread index from FFMC and wind speed
///
/// ISI = 0.208 × f(W) × f(F), with
/// f(F) = 91.9 × e^(-0.1386 m) × (1 + m^5.31 / 4.93×10⁷) and
/// f(W) = e^(0.05039 × ws), where m is the FFMC moisture content.
///
/// # Arguments
/// * `ffmc` - Fine fuel moisture code (0-101)
/// * `wind_speed` - 10 m open wind speed (km/h)
pub fn initial_spread_index(ffmc: f64, wind_speed: f64) -> f64 {
    let fm = 147.2 * (101.0 - ffmc) / (59.5 + ffmc);
    let ff = 91.9 * (-0.1386 * fm).exp() * (1.0 + fm.powf(5.31) / 4.93e7);
    let fw = (0.05039 * wind_speed).exp();
    0.208 * fw * ff
}

/// Build-up effect on spread rate
///
/// BE = exp(50 × ln(q) × (1/BUI - 1/BUI₀)); 1 when BUI is not positive.
pub fn buildup_effect(fuel_type: FuelType, bui: f64) -> f64 {
    let record = fuel_type.record();
    if bui > 0.0 && record.bui_0 > 0.0 {
        (50.0 * record.q.ln() * (1.0 / bui - 1.0 / record.bui_0)).exp()
    } else {
        1.0
    }
}

fn spread_curve(coefficients: SpreadCoefficients, isi: f64) -> f64 {
    let SpreadCoefficients { a, b, c } = coefficients;
    a * (1.0 - (-b * isi).exp()).powf(c)
}

fn own_curve(fuel_type: FuelType, isi: f64) -> f64 {
    fuel_type
        .record()
        .spread
        .map_or(0.0, |coefficients| spread_curve(coefficients, isi))
}

/// Grass curing factor for O1A/O1B (Wotton et al. 2009)
pub fn grass_curing_factor(grass_cure: f64) -> f64 {
    if grass_cure < 58.8 {
        0.005 * ((0.061 * grass_cure).exp() - 1.0)
    } else {
        0.176 + 0.02 * (grass_cure - 58.8)
    }
}

/// Initial (zero build-up) rate of spread (m/min)
///
/// # Arguments
/// * `pc` - Percentage conifer, M1/M2 only (0-100)
/// * `cc` - Grass curing percentage, O1A/O1B only (0-100)
/// * `pdf` - Percentage dead balsam fir, M3/M4 only (0-100)
pub fn initial_rate_of_spread(fuel_type: FuelType, isi: f64, pc: f64, cc: f64, pdf: f64) -> f64 {
    let d1 = || own_curve(FuelType::D1, isi);
    match fuel_type {
        FuelType::M1 => pc / 100.0 * own_curve(FuelType::C2, isi) + (100.0 - pc) / 100.0 * d1(),
        FuelType::M2 => {
            pc / 100.0 * own_curve(FuelType::C2, isi) + 0.2 * (100.0 - pc) / 100.0 * d1()
        }
        FuelType::M3 => pdf / 100.0 * own_curve(FuelType::M3, isi) + (1.0 - pdf / 100.0) * d1(),
        FuelType::M4 => {
            pdf / 100.0 * own_curve(FuelType::M4, isi) + 0.2 * (1.0 - pdf / 100.0) * d1()
        }
        FuelType::O1A | FuelType::O1B => own_curve(fuel_type, isi) * grass_curing_factor(cc),
        _ => own_curve(fuel_type, isi),
    }
}

/// C6 conifer plantation rate of spread with crowning (m/min)
///
/// Surface spread (`RSS`) is augmented by the crown spread rate `RSC` in
/// proportion to crown fraction burned whenever `RSC > RSS`.
pub fn c6_rate_of_spread(isi: f64, bui: f64, fmc: f64, sfc: f64, cbh: f64) -> f64 {
    let fme = 1000.0 * (1.5 - 0.00275 * fmc).powi(4) / (460.0 + 25.9 * fmc);
    let rsc = 60.0 * (1.0 - (-0.0497 * isi).exp()) * fme / 0.778;
    let rsi = 30.0 * (1.0 - (-0.08 * isi).exp()).powi(3);
    let rss = rsi * buildup_effect(FuelType::C6, bui);

    if rsc > rss {
        let cfb = crown_fraction_burned(FuelType::C6, fmc, sfc, rss, cbh);
        rss + cfb * (rsc - rss)
    } else {
        rss
    }
}

/// Head fire rate of spread (m/min)
///
/// # Arguments
/// * `fuel_type` - FBP fuel type
/// * `isi` - Initial spread index
/// * `bui` - Build-up index
/// * `fmc` - Foliar moisture content (%), used by C6
/// * `sfc` - Surface fuel consumption (kg/m²), used by C6
/// * `pc` - Percentage conifer (M1/M2)
/// * `cc` - Grass curing (O1A/O1B)
/// * `pdf` - Percentage dead balsam fir (M3/M4)
/// * `cbh` - Crown base height (m), used by C6; the registry default applies
///   when it is missing
pub fn rate_of_spread(
    fuel_type: FuelType,
    isi: f64,
    bui: f64,
    fmc: f64,
    sfc: f64,
    pc: f64,
    cc: f64,
    pdf: f64,
    cbh: Option<f64>,
) -> f64 {
    let ros = if fuel_type == FuelType::C6 {
        let cbh = cbh.unwrap_or_else(|| {
            let default = fuel_type.record().default_crown_base_height.unwrap_or(0.0);
            tracing::warn!(default, "C6 spread without crown base height, using registry default");
            default
        });
        c6_rate_of_spread(isi, bui, fmc, sfc, cbh)
    } else {
        buildup_effect(fuel_type, bui) * initial_rate_of_spread(fuel_type, isi, pc, cc, pdf)
    };

    if ros <= 0.0 {
        MIN_RATE_OF_SPREAD
    } else {
        ros
    }
}

/// Length-to-breadth ratio of the elliptical fire
///
/// Grass: 1.0 below 1 km/h, else 1.1 × ws^0.464.
/// Other fuels: 1 + 8.729 × (1 - e^(-0.03 ws))^2.155.
pub fn length_to_breadth_ratio(fuel_type: FuelType, wind_speed: f64) -> f64 {
    if fuel_type.is_grass() {
        if wind_speed < 1.0 {
            1.0
        } else {
            1.1 * wind_speed.powf(0.464)
        }
    } else {
        1.0 + 8.729 * (1.0 - (-0.03 * wind_speed).exp()).powf(2.155)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_isi_reference_values() {
        // Horsefly 2021-07-05: FFMC 90.638 with ~9.19 km/h wind gives ISI 7.462
        assert_abs_diff_eq!(initial_spread_index(90.638, 9.1866), 7.462, epsilon = 1e-3);
        // No wind: ISI is the fine fuel function alone
        let isi = initial_spread_index(85.0, 0.0);
        assert!(isi > 2.0 && isi < 3.0, "ISI was {}", isi);
    }

    #[test]
    fn test_isi_monotonic_in_ffmc_and_wind() {
        let mut previous = 0.0;
        for ffmc in (0..=101).map(f64::from) {
            let isi = initial_spread_index(ffmc, 10.0);
            assert!(isi >= previous, "ISI decreased at FFMC {}", ffmc);
            previous = isi;
        }
        assert!(initial_spread_index(90.0, 20.0) > initial_spread_index(90.0, 10.0));
    }

    #[test]
    fn test_buildup_effect() {
        // BUI equal to BUI₀ gives no effect
        assert_abs_diff_eq!(buildup_effect(FuelType::C2, 64.0), 1.0, epsilon = 1e-12);
        assert!(buildup_effect(FuelType::C2, 117.899) > 1.0);
        assert!(buildup_effect(FuelType::C2, 20.0) < 1.0);
        assert_eq!(buildup_effect(FuelType::C2, 0.0), 1.0);
        // Grass has q = 1 so BUI never matters
        assert_abs_diff_eq!(buildup_effect(FuelType::O1A, 150.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_c2_rate_of_spread() {
        let ros = rate_of_spread(
            FuelType::C2,
            7.462,
            117.899,
            113.62,
            3.7113,
            100.0,
            0.0,
            0.0,
            Some(3.0),
        );
        assert_abs_diff_eq!(ros, 10.328, epsilon = 1e-3);
    }

    #[test]
    fn test_m3_blends_with_d1() {
        let m3_all_dead = initial_rate_of_spread(FuelType::M3, 7.5, 0.0, 0.0, 100.0);
        let m3_none_dead = initial_rate_of_spread(FuelType::M3, 7.5, 0.0, 0.0, 0.0);
        let d1 = initial_rate_of_spread(FuelType::D1, 7.5, 0.0, 0.0, 0.0);
        assert_abs_diff_eq!(m3_none_dead, d1, epsilon = 1e-12);
        assert!(m3_all_dead > m3_none_dead);

        let m4_none_dead = initial_rate_of_spread(FuelType::M4, 7.5, 0.0, 0.0, 0.0);
        assert_abs_diff_eq!(m4_none_dead, 0.2 * d1, epsilon = 1e-12);
    }

    #[test]
    fn test_m1_m2_conifer_share() {
        let c2 = initial_rate_of_spread(FuelType::C2, 10.0, 100.0, 0.0, 0.0);
        let m1 = initial_rate_of_spread(FuelType::M1, 10.0, 100.0, 0.0, 0.0);
        let m2 = initial_rate_of_spread(FuelType::M2, 10.0, 100.0, 0.0, 0.0);
        assert_abs_diff_eq!(m1, c2, epsilon = 1e-12);
        assert_abs_diff_eq!(m2, c2, epsilon = 1e-12);
        // Green mixedwood deciduous component spreads at a fifth of leafless
        let m1_dec = initial_rate_of_spread(FuelType::M1, 10.0, 0.0, 0.0, 0.0);
        let m2_dec = initial_rate_of_spread(FuelType::M2, 10.0, 0.0, 0.0, 0.0);
        assert_abs_diff_eq!(m2_dec, 0.2 * m1_dec, epsilon = 1e-12);
    }

    #[test]
    fn test_grass_curing_factor() {
        assert_abs_diff_eq!(grass_curing_factor(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(grass_curing_factor(100.0), 0.176 + 0.02 * 41.2, epsilon = 1e-12);
        // Continuous-ish around the 58.8% break
        let below = grass_curing_factor(58.79);
        let above = grass_curing_factor(58.8);
        assert!((below - above).abs() < 0.01);
    }

    #[test]
    fn test_uncured_grass_floors_to_minimum() {
        let ros = rate_of_spread(
            FuelType::O1B,
            10.0,
            50.0,
            100.0,
            0.35,
            0.0,
            0.0,
            0.0,
            None,
        );
        assert_eq!(ros, MIN_RATE_OF_SPREAD);
    }

    #[test]
    fn test_c6_crowning_increases_spread() {
        let sfc = 2.0;
        let surface_only = buildup_effect(FuelType::C6, 80.0)
            * 30.0
            * (1.0 - (-0.08_f64 * 15.0).exp()).powi(3);
        let ros = c6_rate_of_spread(15.0, 80.0, 95.0, sfc, 2.0);
        assert!(ros >= surface_only);
        // Missing CBH falls back to the 7 m registry default
        let defaulted = rate_of_spread(FuelType::C6, 15.0, 80.0, 95.0, sfc, 100.0, 0.0, 0.0, None);
        let explicit =
            rate_of_spread(FuelType::C6, 15.0, 80.0, 95.0, sfc, 100.0, 0.0, 0.0, Some(7.0));
        assert_eq!(defaulted, explicit);
    }

    #[test]
    fn test_length_to_breadth_ratio() {
        assert_abs_diff_eq!(
            length_to_breadth_ratio(FuelType::C2, 0.0),
            1.0,
            epsilon = 1e-12
        );
        assert_eq!(length_to_breadth_ratio(FuelType::O1A, 0.5), 1.0);
        assert_abs_diff_eq!(
            length_to_breadth_ratio(FuelType::O1A, 10.0),
            1.1 * 10.0_f64.powf(0.464),
            epsilon = 1e-12
        );
        assert!(length_to_breadth_ratio(FuelType::C2, 30.0) > length_to_breadth_ratio(FuelType::C2, 10.0));
    }
}
