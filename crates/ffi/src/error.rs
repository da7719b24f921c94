use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use cffdrs_core::FbaError;

/// Common interface for errors crossing the FFI boundary.
///
/// - `code()` - the error code returned to the caller
/// - `msg()` - the message kept for `cffdrs_get_last_error`
pub(crate) trait CffdrsError {
    fn code(&self) -> CffdrsErrorCode;

    fn msg(&self) -> &str;
}

/// Default `CffdrsError`: an error code plus a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultCffdrsError {
    code: CffdrsErrorCode,
    msg: String,
}

impl DefaultCffdrsError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_advisory"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: CffdrsErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for an input field that cannot be interpreted.
    ///
    /// # Arguments
    /// * `param_name` - The offending field (e.g., `"fuel_type"`, `"month"`)
    /// * `message` - What was wrong with it
    pub fn invalid_parameter(param_name: &str, message: &str) -> Self {
        Self {
            code: CffdrsErrorCode::InvalidParameter,
            msg: format!("Parameter {param_name}: {message}"),
        }
    }
}

impl From<&FbaError> for DefaultCffdrsError {
    fn from(error: &FbaError) -> Self {
        let code = match error {
            FbaError::UnknownFuelType(_) => CffdrsErrorCode::UnknownFuelType,
            FbaError::CannotCalculateFireType(_) => CffdrsErrorCode::CannotCalculateFireType,
            FbaError::DiurnalTable { .. } => CffdrsErrorCode::DiurnalTable,
            FbaError::InvalidConfig(_) => CffdrsErrorCode::InvalidConfig,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl From<FbaError> for DefaultCffdrsError {
    fn from(error: FbaError) -> Self {
        Self::from(&error)
    }
}

impl CffdrsError for DefaultCffdrsError {
    fn code(&self) -> CffdrsErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by CFFDRS functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CffdrsErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Null pointer passed where non-null required.
    NullPointer = 1,

    /// Input field could not be interpreted (bad date, non-UTF-8 string, ...).
    InvalidParameter = 2,

    /// Fuel type code is not an FBP fuel type.
    UnknownFuelType = 3,

    /// Crown fraction burned was not a valid probability.
    CannotCalculateFireType = 4,

    /// The diurnal FFMC table could not be loaded.
    DiurnalTable = 5,

    /// Engine configuration out of range.
    InvalidConfig = 6,
}

impl From<DefaultCffdrsError> for CffdrsErrorCode {
    fn from(error: DefaultCffdrsError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The CString is owned here so pointers handed out stay valid until the next call.
    static LAST_ERROR: RefCell<(Option<CString>, CffdrsErrorCode)> = const { RefCell::new((None, CffdrsErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, CffdrsErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, CffdrsErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// The pointer is valid until the next FFI call on this thread.
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// CffdrsAdvisory advisory;
/// if (cffdrs_calculate_advisory(&station, &advisory) != Ok) {
///     const char* error = cffdrs_get_last_error();
///     if (error) {
///         printf("Advisory failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn cffdrs_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code (`Ok` if the last call succeeded).
#[no_mangle]
pub extern "C" fn cffdrs_get_last_error_code() -> CffdrsErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = DefaultCffdrsError::from(FbaError::UnknownFuelType("Z9".to_string()));
        assert_eq!(err.code(), CffdrsErrorCode::UnknownFuelType);
        assert_eq!(err.msg(), "unknown fuel type code 'Z9'");

        let err = DefaultCffdrsError::from(FbaError::CannotCalculateFireType(-1.0));
        assert_eq!(err.code(), CffdrsErrorCode::CannotCalculateFireType);
    }

    #[test]
    fn test_null_pointer_message() {
        let err = DefaultCffdrsError::null_pointer("station");
        assert_eq!(err.code(), CffdrsErrorCode::NullPointer);
        assert_eq!(err.msg(), "Parameter 'station' cannot be null");
    }
}
