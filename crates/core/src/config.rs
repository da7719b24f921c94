//! Advisory engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FbaError, FbaResult};

/// Tunable parameters of the advisory engine.
///
/// Units:
/// - HFI thresholds: kW/m
/// - grass fuel load: kg/m²
/// - solver tolerance: relative HFI error (dimensionless)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Lower critical-hours threshold (reported as `critical_hours_hfi_4000`)
    pub low_hfi_threshold: f64,
    /// Upper critical-hours threshold (reported as `critical_hours_hfi_10000`)
    pub high_hfi_threshold: f64,

    /// Grass fuel load used for O1A/O1B surface fuel consumption
    pub grass_fuel_load: f64,

    // Critical FFMC search
    pub solver_tolerance: f64,
    pub solver_max_iterations: u32,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            low_hfi_threshold: 4000.0,
            high_hfi_threshold: 10000.0,
            grass_fuel_load: crate::cffdrs::DEFAULT_GRASS_FUEL_LOAD,
            solver_tolerance: 1e-5,
            solver_max_iterations: 100,
        }
    }
}

impl AdvisoryConfig {
    /// Check every value is finite and in range.
    ///
    /// # Errors
    /// Returns [`FbaError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> FbaResult<()> {
        let positive = [
            ("low_hfi_threshold", self.low_hfi_threshold),
            ("high_hfi_threshold", self.high_hfi_threshold),
            ("grass_fuel_load", self.grass_fuel_load),
            ("solver_tolerance", self.solver_tolerance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(FbaError::InvalidConfig(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        if self.solver_max_iterations == 0 {
            return Err(FbaError::InvalidConfig(
                "solver_max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
