//! Fuel type registry
//!
//! Maps fuel type codes to their static [`FuelTypeRecord`]. The code index is
//! built once per process from the compiled constant table and only read
//! afterwards; `FuelType::from_str` and serde parsing go through it too.

use std::sync::LazyLock;

use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::core_types::fuel::{FuelType, FuelTypeRecord, FUEL_TYPE_RECORDS};
use crate::error::{FbaError, FbaResult};

static BY_CODE: LazyLock<FxHashMap<&'static str, &'static FuelTypeRecord>> =
    LazyLock::new(|| {
        let mut by_code =
            FxHashMap::with_capacity_and_hasher(FUEL_TYPE_RECORDS.len(), FxBuildHasher);
        for record in &FUEL_TYPE_RECORDS {
            by_code.insert(record.code.code(), record);
        }
        by_code
    });

/// Read-only lookup from fuel code to record
#[derive(Debug, Clone)]
pub struct FuelTypeRegistry {
    by_code: &'static FxHashMap<&'static str, &'static FuelTypeRecord>,
}

impl FuelTypeRegistry {
    /// Registry over every FBP fuel type
    pub fn new() -> Self {
        Self { by_code: &BY_CODE }
    }

    /// Look up a fuel type by its code ("C2", "O1A", ...)
    ///
    /// Codes are trimmed and matched case-insensitively.
    ///
    /// # Errors
    /// Returns [`FbaError::UnknownFuelType`] when the code is not registered.
    pub fn lookup(&self, code: &str) -> FbaResult<&'static FuelTypeRecord> {
        self.by_code
            .get(code.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| FbaError::UnknownFuelType(code.to_string()))
    }

    /// Record for an already-parsed fuel type
    pub fn get(&self, fuel_type: FuelType) -> &'static FuelTypeRecord {
        fuel_type.record()
    }

    /// Crown fuel load (kg/m²) of a fuel type, `None` if it cannot crown
    pub fn crown_fuel_load(&self, fuel_type: FuelType) -> Option<f64> {
        self.get(fuel_type).crown_fuel_load
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// All records in registry order
    pub fn records(&self) -> impl Iterator<Item = &'static FuelTypeRecord> {
        FUEL_TYPE_RECORDS.iter()
    }
}

impl Default for FuelTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
