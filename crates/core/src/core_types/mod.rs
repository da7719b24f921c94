//! Core data types: fuel types, station inputs and advisory outputs

pub mod advisory;
pub mod fuel;
pub mod station;

pub use advisory::{CriticalHours, FireBehaviourAdvisory, FireType};
pub use fuel::{FuelType, FuelTypeRecord, SpreadCoefficients, FUEL_TYPE_RECORDS};
pub use station::{StationStatus, WeatherStationInput};
