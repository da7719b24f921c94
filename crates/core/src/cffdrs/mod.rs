//! Canadian Forest Fire Behaviour Prediction (FBP) formula library
//!
//! Pure, fuel-type dependent functions from ST-X-3 and its updates. Each
//! submodule covers one stage of the advisory pipeline:
//!
//! - `foliar_moisture`: seasonal foliar moisture content
//! - `fuel_consumption`: surface, crown and total fuel consumption
//! - `spread`: ISI, build-up effect, rate of spread, fire shape
//! - `crown_fire`: Van Wagner crown fire initiation
//! - `intensity`: Byram fire intensity and intensity classes
//! - `fire_behaviour`: fire type, flame length and elliptical fire size

pub mod crown_fire;
pub mod fire_behaviour;
pub mod foliar_moisture;
pub mod fuel_consumption;
pub mod intensity;
pub mod spread;

pub use crown_fire::{critical_spread_rate, critical_surface_intensity, crown_fraction_burned};
pub use fire_behaviour::{
    get_30_minutes_fire_size, get_60_minutes_fire_size, get_approx_flame_length, get_fire_type,
};
pub use foliar_moisture::foliar_moisture_content;
pub use fuel_consumption::{
    crown_fuel_consumption, surface_fuel_consumption, surface_fuel_consumption_with_grass_load,
    total_fuel_consumption,
};
pub use intensity::{fire_intensity, head_fire_intensity, intensity_group};
pub use spread::{
    buildup_effect, initial_rate_of_spread, initial_spread_index, length_to_breadth_ratio,
    rate_of_spread,
};

/// Grass fuel load for O1A/O1B (kg/m²)
pub const DEFAULT_GRASS_FUEL_LOAD: f64 = 0.35;

/// Floor applied to non-positive surface fuel consumption (kg/m²)
pub const MIN_SURFACE_FUEL_CONSUMPTION: f64 = 1e-6;

/// Floor applied to non-positive rate of spread (m/min)
pub const MIN_RATE_OF_SPREAD: f64 = 1e-6;
