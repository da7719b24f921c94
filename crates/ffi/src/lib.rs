//! C ABI for the CFFDRS fire behaviour advisory engine
//!
//! Every fallible function returns a [`CffdrsErrorCode`] and records a
//! message retrievable with [`cffdrs_get_last_error`] on the calling thread.

pub mod advisory;
pub mod engine;
pub mod error;
mod helpers;

pub use advisory::{
    cffdrs_calculate_advisories, cffdrs_calculate_advisory, CffdrsAdvisory, CffdrsFireType,
    CffdrsStationInput,
};
pub use engine::{cffdrs_engine_destroy, cffdrs_engine_new, CffdrsEngineHandle};
pub use error::{cffdrs_get_last_error, cffdrs_get_last_error_code, CffdrsErrorCode};
