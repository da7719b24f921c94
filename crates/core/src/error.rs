//! Error types for the fire behaviour calculation engine
//!
//! Only genuine failures are errors. Results that cannot be computed because an
//! input is legitimately missing (no crown base height, no crown fraction burned)
//! are reported as `None` on the advisory instead.

use thiserror::Error;

/// Errors surfaced by the CFFDRS engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FbaError {
    /// Fuel type code is not in the fuel type registry
    #[error("unknown fuel type code '{0}'")]
    UnknownFuelType(String),

    /// Crown fraction burned is not a valid probability, so no fire type applies
    #[error("cannot calculate fire type: invalid crown fraction burned {0}")]
    CannotCalculateFireType(f64),

    /// The diurnal FFMC lookup table could not be parsed
    #[error("diurnal FFMC table line {line}: {reason}")]
    DiurnalTable {
        /// 1-based line number in the table source
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// Configuration value outside its allowed domain
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate
pub type FbaResult<T> = Result<T, FbaError>;
