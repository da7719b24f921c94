use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;

use cffdrs_core::{AdvisoryConfig, CffdrsEngine};

use crate::error::{CffdrsErrorCode, DefaultCffdrsError};
use crate::helpers::{track_error, track_result};

/// Opaque CFFDRS engine handle.
///
/// Immutable after creation, so one handle may be used from any number of
/// threads at once.
pub struct CffdrsEngineHandle {
    pub(crate) engine: CffdrsEngine,
}

impl CffdrsEngineHandle {
    /// Build an engine from an optional JSON configuration.
    ///
    /// Missing fields take their defaults.
    pub(crate) fn from_json(config_json: Option<&str>) -> Result<Box<Self>, DefaultCffdrsError> {
        let config = match config_json {
            Some(json) => serde_json::from_str::<AdvisoryConfig>(json).map_err(|err| {
                DefaultCffdrsError::invalid_parameter("config_json", &err.to_string())
            })?,
            None => AdvisoryConfig::default(),
        };
        let engine = CffdrsEngine::new(config)?;
        Ok(Box::new(Self { engine }))
    }
}

/// Create an engine.
///
/// - `config_json`: null-terminated JSON `AdvisoryConfig`, or null for defaults
/// - `out_engine`: receives the engine on success, null on failure
///
/// Returns
/// - `CffdrsErrorCode::Ok` (0) on success
/// - `CffdrsErrorCode::NullPointer` if `out_engine` is null
/// - `CffdrsErrorCode::InvalidParameter` if `config_json` is not valid UTF-8 JSON
/// - `CffdrsErrorCode::InvalidConfig` if a configuration value is out of range
///
/// # Safety
///
/// - `config_json` must be null or point to a null-terminated string.
/// - `out_engine` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned engine and MUST call `cffdrs_engine_destroy`
///   exactly once.
///
/// Example (C)
/// ```c
/// CffdrsEngineHandle* engine = NULL;
/// if (cffdrs_engine_new("{\"high_hfi_threshold\": 12000}", &engine) != Ok) {
///     fprintf(stderr, "%s\n", cffdrs_get_last_error());
///     return;
/// }
/// // ... use engine ...
/// cffdrs_engine_destroy(engine);
/// ```
#[no_mangle]
pub unsafe extern "C" fn cffdrs_engine_new(
    config_json: *const c_char,
    out_engine: *mut *mut CffdrsEngineHandle,
) -> CffdrsErrorCode {
    if out_engine.is_null() {
        return track_error(&DefaultCffdrsError::null_pointer("out_engine"));
    }

    let config_json = if config_json.is_null() {
        Ok(None)
    } else {
        // SAFETY: non-null and null-terminated per the contract above
        unsafe { CStr::from_ptr(config_json) }
            .to_str()
            .map(Some)
            .map_err(|_| DefaultCffdrsError::invalid_parameter("config_json", "not valid UTF-8"))
    };

    match track_result(config_json.and_then(CffdrsEngineHandle::from_json)) {
        Ok(handle) => {
            unsafe {
                *out_engine = Box::into_raw(handle);
            }
            CffdrsErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_engine = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroy an engine created by `cffdrs_engine_new`. Null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `cffdrs_engine_new` and not freed already.
/// - The caller must not use the pointer again afterwards.
#[no_mangle]
pub unsafe extern "C" fn cffdrs_engine_destroy(engine: *mut CffdrsEngineHandle) {
    if engine.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `cffdrs_engine_new` and not yet freed
    unsafe {
        drop(Box::from_raw(engine));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_engine_lifecycle() {
        let config = CString::new(r#"{ "high_hfi_threshold": 12000.0 }"#).unwrap();
        let mut engine: *mut CffdrsEngineHandle = ptr::null_mut();
        let code = unsafe { cffdrs_engine_new(config.as_ptr(), &mut engine) };
        assert_eq!(code, CffdrsErrorCode::Ok);
        assert!(!engine.is_null());
        assert_eq!(
            unsafe { &*engine }.engine.config().high_hfi_threshold,
            12000.0
        );
        unsafe { cffdrs_engine_destroy(engine) };
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = CString::new(r#"{ "grass_fuel_load": -1.0 }"#).unwrap();
        let mut engine: *mut CffdrsEngineHandle = ptr::null_mut();
        let code = unsafe { cffdrs_engine_new(config.as_ptr(), &mut engine) };
        assert_eq!(code, CffdrsErrorCode::InvalidConfig);
        assert!(engine.is_null());
        assert_eq!(crate::error::cffdrs_get_last_error_code(), CffdrsErrorCode::InvalidConfig);
    }

    #[test]
    fn test_null_out_pointer() {
        let code = unsafe { cffdrs_engine_new(ptr::null(), ptr::null_mut()) };
        assert_eq!(code, CffdrsErrorCode::NullPointer);
    }
}
