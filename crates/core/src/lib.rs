//! CFFDRS Fire Behaviour Advisory Engine
//!
//! Computes Canadian Forest Fire Danger Rating System fire behaviour for
//! weather stations: rate of spread, crown fraction burned, head fire
//! intensity, fire type, flame length, fire size projections and the critical
//! hours during which intensity meets the 4000 and 10000 kW/m thresholds.
//!
//! ## Layout
//!
//! - [`cffdrs`]: FBP formula library, pure functions per fuel type
//! - [`critical_hours`]: critical FFMC solver and diurnal FFMC walk
//! - [`engine`]: per-station orchestrator and parallel batch evaluation
//! - [`registry`]: fuel type code lookup
//!
//! The library logs through `tracing` and never installs a subscriber.

// Core types and utilities
pub mod config;
pub mod core_types;
pub mod error;
pub mod registry;

// Calculation modules
pub mod cffdrs;
pub mod critical_hours;
pub mod engine;

// Re-export core types
pub use core_types::{
    CriticalHours, FireBehaviourAdvisory, FireType, FuelType, FuelTypeRecord, StationStatus,
    WeatherStationInput,
};

pub use config::AdvisoryConfig;
pub use critical_hours::{get_critical_hours, get_ffmc_for_target_hfi, DiurnalFfmcTable, FireScenario};
pub use engine::{calculate_fire_behaviour_advisories, calculate_fire_behaviour_advisory, CffdrsEngine};
pub use error::{FbaError, FbaResult};
pub use registry::FuelTypeRegistry;
