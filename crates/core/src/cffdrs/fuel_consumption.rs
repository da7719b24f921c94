//! Surface, crown and total fuel consumption (FBP equations 9-25)

use crate::core_types::fuel::FuelType;

use super::{DEFAULT_GRASS_FUEL_LOAD, MIN_SURFACE_FUEL_CONSUMPTION};

/// Boreal spruce SFC curve, shared by C2, M3, M4 and the conifer half of M1/M2
fn boreal_spruce_sfc(bui: f64) -> f64 {
    5.0 * (1.0 - (-0.0115 * bui).exp())
}

/// Leafless aspen SFC curve, shared by D1 and the deciduous half of M1/M2
fn leafless_aspen_sfc(bui: f64) -> f64 {
    1.5 * (1.0 - (-0.0183 * bui).exp())
}

/// Surface fuel consumption (kg/m²) with the default grass fuel load
pub fn surface_fuel_consumption(
    fuel_type: FuelType,
    bui: f64,
    ffmc: f64,
    percentage_conifer: f64,
) -> f64 {
    surface_fuel_consumption_with_grass_load(
        fuel_type,
        bui,
        ffmc,
        percentage_conifer,
        DEFAULT_GRASS_FUEL_LOAD,
    )
}

/// Surface fuel consumption (kg/m²)
///
/// # Arguments
/// * `fuel_type` - FBP fuel type
/// * `bui` - Build-up index
/// * `ffmc` - Fine fuel moisture code (used by C1 and C7 only)
/// * `percentage_conifer` - Conifer share of M1/M2 stands (0-100)
/// * `grass_fuel_load` - Grass fuel load for O1A/O1B (kg/m²)
///
/// Results at or below zero are floored to a tiny positive value so that
/// downstream divisions stay finite.
pub fn surface_fuel_consumption_with_grass_load(
    fuel_type: FuelType,
    bui: f64,
    ffmc: f64,
    percentage_conifer: f64,
    grass_fuel_load: f64,
) -> f64 {
    let sfc = match fuel_type {
        FuelType::C1 => {
            if ffmc > 84.0 {
                0.75 + 0.75 * (1.0 - (-0.23 * (ffmc - 84.0)).exp()).sqrt()
            } else {
                0.75 - 0.75 * (1.0 - (-0.23 * (84.0 - ffmc)).exp()).sqrt()
            }
        }
        FuelType::C2 | FuelType::M3 | FuelType::M4 => boreal_spruce_sfc(bui),
        FuelType::C3 | FuelType::C4 => 5.0 * (1.0 - (-0.0164 * bui).exp()).powf(2.24),
        FuelType::C5 | FuelType::C6 => 5.0 * (1.0 - (-0.0149 * bui).exp()).powf(2.48),
        FuelType::C7 => {
            let forest_floor = if ffmc > 70.0 {
                2.0 * (1.0 - (-0.104 * (ffmc - 70.0)).exp())
            } else {
                0.0
            };
            forest_floor + 1.5 * (1.0 - (-0.0201 * bui).exp())
        }
        FuelType::D1 => leafless_aspen_sfc(bui),
        FuelType::M1 | FuelType::M2 => {
            let pc = percentage_conifer / 100.0;
            pc * boreal_spruce_sfc(bui) + (1.0 - pc) * leafless_aspen_sfc(bui)
        }
        FuelType::O1A | FuelType::O1B => grass_fuel_load,
        FuelType::S1 => 4.0 * (1.0 - (-0.025 * bui).exp()) + 4.0 * (1.0 - (-0.034 * bui).exp()),
        FuelType::S2 => 10.0 * (1.0 - (-0.013 * bui).exp()) + 6.0 * (1.0 - (-0.06 * bui).exp()),
        FuelType::S3 => {
            12.0 * (1.0 - (-0.0166 * bui).exp()) + 20.0 * (1.0 - (-0.021 * bui).exp())
        }
    };

    if sfc <= 0.0 {
        MIN_SURFACE_FUEL_CONSUMPTION
    } else {
        sfc
    }
}

/// Crown fuel consumption (kg/m²)
///
/// `CFC = CFL × CFB`, scaled by the conifer share for M1/M2 and by the dead
/// balsam fir share for M3/M4.
pub fn crown_fuel_consumption(
    fuel_type: FuelType,
    crown_fuel_load: f64,
    cfb: f64,
    percentage_conifer: f64,
    percentage_dead_balsam_fir: f64,
) -> f64 {
    let cfc = crown_fuel_load * cfb;
    match fuel_type {
        FuelType::M1 | FuelType::M2 => percentage_conifer / 100.0 * cfc,
        FuelType::M3 | FuelType::M4 => percentage_dead_balsam_fir / 100.0 * cfc,
        _ => cfc,
    }
}

/// Total fuel consumption (kg/m²): surface plus crown
pub fn total_fuel_consumption(
    fuel_type: FuelType,
    crown_fuel_load: f64,
    cfb: f64,
    sfc: f64,
    percentage_conifer: f64,
    percentage_dead_balsam_fir: f64,
) -> f64 {
    sfc + crown_fuel_consumption(
        fuel_type,
        crown_fuel_load,
        cfb,
        percentage_conifer,
        percentage_dead_balsam_fir,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_c2_sfc() {
        let sfc = surface_fuel_consumption(FuelType::C2, 117.899, 90.638, 100.0);
        assert_abs_diff_eq!(sfc, 3.711344, epsilon = 1e-6);
        // M3 shares the boreal spruce curve
        assert_eq!(
            sfc,
            surface_fuel_consumption(FuelType::M3, 117.899, 90.638, 0.0)
        );
    }

    #[test]
    fn test_c1_depends_on_ffmc_around_84() {
        let at_84 = surface_fuel_consumption(FuelType::C1, 50.0, 84.0, 100.0);
        assert_abs_diff_eq!(at_84, 0.75, epsilon = 1e-12);
        assert!(surface_fuel_consumption(FuelType::C1, 50.0, 90.0, 100.0) > at_84);
        assert!(surface_fuel_consumption(FuelType::C1, 50.0, 75.0, 100.0) < at_84);
    }

    #[test]
    fn test_m1_blends_c2_and_d1() {
        let bui = 60.0;
        let c2 = surface_fuel_consumption(FuelType::C2, bui, 90.0, 100.0);
        let d1 = surface_fuel_consumption(FuelType::D1, bui, 90.0, 0.0);
        let m1_all_conifer = surface_fuel_consumption(FuelType::M1, bui, 90.0, 100.0);
        let m1_half = surface_fuel_consumption(FuelType::M1, bui, 90.0, 50.0);
        assert_abs_diff_eq!(m1_all_conifer, c2, epsilon = 1e-12);
        assert_abs_diff_eq!(m1_half, 0.5 * c2 + 0.5 * d1, epsilon = 1e-12);
    }

    #[test]
    fn test_grass_uses_fuel_load() {
        assert_eq!(
            surface_fuel_consumption(FuelType::O1B, 100.0, 90.0, 0.0),
            DEFAULT_GRASS_FUEL_LOAD
        );
        assert_eq!(
            surface_fuel_consumption_with_grass_load(FuelType::O1A, 100.0, 90.0, 0.0, 0.6),
            0.6
        );
    }

    #[test]
    fn test_zero_bui_floors_to_minimum() {
        let sfc = surface_fuel_consumption(FuelType::C2, 0.0, 90.0, 100.0);
        assert_eq!(sfc, MIN_SURFACE_FUEL_CONSUMPTION);
    }

    #[test]
    fn test_crown_fuel_consumption_mixedwood_scaling() {
        assert_abs_diff_eq!(
            crown_fuel_consumption(FuelType::M3, 0.8, 0.842, 0.0, 30.0),
            0.3 * 0.8 * 0.842,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            crown_fuel_consumption(FuelType::M1, 0.8, 0.5, 75.0, 0.0),
            0.75 * 0.8 * 0.5,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            crown_fuel_consumption(FuelType::C2, 0.8, 0.5, 0.0, 0.0),
            0.4,
            epsilon = 1e-12
        );
    }
}
