use std::ffi::CStr;
use std::os::raw::c_char;
use std::slice;

use cffdrs_core::{
    CffdrsEngine, CriticalHours, FireBehaviourAdvisory, FireType, FuelType, StationStatus,
    WeatherStationInput,
};
use chrono::NaiveDate;

use crate::engine::CffdrsEngineHandle;
use crate::error::{CffdrsError, CffdrsErrorCode, DefaultCffdrsError};
use crate::helpers::{clear_last_error, track_error, track_result};

#[repr(C)]
/// One weather station day.
/// Keep this layout stable for C/C++/C# consumers.
pub struct CffdrsStationInput {
    /// Station elevation (m).
    pub elevation: i32,
    /// Null-terminated FBP fuel type code ("C2", "O1A", ...).
    pub fuel_type: *const c_char,
    /// Date of interest.
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub percentage_conifer: f64,
    pub percentage_dead_balsam_fir: f64,
    pub grass_cure: f64,
    /// Crown base height (m). NaN when unknown.
    pub crown_base_height: f64,
    pub lat: f64,
    pub long: f64,
    pub bui: f64,
    pub ffmc: f64,
    pub isi: f64,
    /// 10 m open wind speed (km/h).
    pub wind_speed: f64,
    pub temperature: f64,
    pub relative_humidity: f64,
    pub precipitation: f64,
    /// Forecast rather than observed values.
    pub is_forecast: bool,
}

impl CffdrsStationInput {
    /// Convert to the core station record.
    ///
    /// # Safety
    /// `fuel_type` must be null or point to a null-terminated string.
    unsafe fn to_station(&self) -> Result<WeatherStationInput, DefaultCffdrsError> {
        if self.fuel_type.is_null() {
            return Err(DefaultCffdrsError::null_pointer("fuel_type"));
        }
        // SAFETY: non-null and null-terminated per the caller's contract
        let code = unsafe { CStr::from_ptr(self.fuel_type) }
            .to_str()
            .map_err(|_| DefaultCffdrsError::invalid_parameter("fuel_type", "not valid UTF-8"))?;
        let fuel_type: FuelType = code.parse()?;

        let time_of_interest = NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .ok_or_else(|| {
                DefaultCffdrsError::invalid_parameter(
                    "date",
                    &format!("{}-{}-{} is not a calendar date", self.year, self.month, self.day),
                )
            })?;

        Ok(WeatherStationInput {
            elevation: self.elevation,
            fuel_type,
            time_of_interest,
            percentage_conifer: self.percentage_conifer,
            percentage_dead_balsam_fir: self.percentage_dead_balsam_fir,
            grass_cure: self.grass_cure,
            crown_base_height: (!self.crown_base_height.is_nan()).then_some(self.crown_base_height),
            lat: self.lat,
            long: self.long,
            bui: self.bui,
            ffmc: self.ffmc,
            isi: self.isi,
            wind_speed: self.wind_speed,
            temperature: self.temperature,
            relative_humidity: self.relative_humidity,
            precipitation: self.precipitation,
            status: if self.is_forecast {
                StationStatus::Forecast
            } else {
                StationStatus::Actual
            },
        })
    }
}

/// Fire type, with `Unknown` standing in for a missing value.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CffdrsFireType {
    Unknown = 0,
    Surface = 1,
    IntermittentCrown = 2,
    ContinuousCrown = 3,
}

impl From<Option<FireType>> for CffdrsFireType {
    fn from(fire_type: Option<FireType>) -> Self {
        match fire_type {
            None => CffdrsFireType::Unknown,
            Some(FireType::Surface) => CffdrsFireType::Surface,
            Some(FireType::IntermittentCrown) => CffdrsFireType::IntermittentCrown,
            Some(FireType::ContinuousCrown) => CffdrsFireType::ContinuousCrown,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
/// FFI-friendly fire behaviour advisory.
///
/// Unknown values are NaN (`Unknown` for the fire type, 0 for the intensity
/// group). A critical hours window that never opens has NaN start and end.
pub struct CffdrsAdvisory {
    /// Head fire intensity (kW/m).
    pub hfi: f64,
    /// Rate of spread (m/min).
    pub ros: f64,
    pub fire_type: CffdrsFireType,
    /// Crown fraction burned (0-1).
    pub cfb: f64,
    /// Approximate flame length (m).
    pub flame_length: f64,
    /// Fire size after 60 minutes (ha).
    pub sixty_minute_fire_size: f64,
    /// Fire size after 30 minutes (ha).
    pub thirty_minute_fire_size: f64,
    /// Critical hours at the low threshold, 24-hour clock.
    pub critical_hours_hfi_4000_start: f64,
    pub critical_hours_hfi_4000_end: f64,
    /// Critical hours at the high threshold, 24-hour clock.
    pub critical_hours_hfi_10000_start: f64,
    pub critical_hours_hfi_10000_end: f64,
    /// Intensity class 1-5, 0 when unknown.
    pub intensity_group: u8,
}

fn window(hours: Option<CriticalHours>) -> (f64, f64) {
    hours.map_or((f64::NAN, f64::NAN), |hours| (hours.start, hours.end))
}

impl From<&FireBehaviourAdvisory> for CffdrsAdvisory {
    fn from(advisory: &FireBehaviourAdvisory) -> Self {
        let (low_start, low_end) = window(advisory.critical_hours_hfi_4000);
        let (high_start, high_end) = window(advisory.critical_hours_hfi_10000);
        Self {
            hfi: advisory.hfi.unwrap_or(f64::NAN),
            ros: advisory.ros,
            fire_type: advisory.fire_type.into(),
            cfb: advisory.cfb.unwrap_or(f64::NAN),
            flame_length: advisory.flame_length.unwrap_or(f64::NAN),
            sixty_minute_fire_size: advisory.sixty_minute_fire_size,
            thirty_minute_fire_size: advisory.thirty_minute_fire_size,
            critical_hours_hfi_4000_start: low_start,
            critical_hours_hfi_4000_end: low_end,
            critical_hours_hfi_10000_start: high_start,
            critical_hours_hfi_10000_end: high_end,
            intensity_group: advisory.intensity_group.unwrap_or(0),
        }
    }
}

/// Resolve a possibly-null engine handle to an engine, falling back to the
/// shared default engine.
///
/// # Safety
/// `engine` must be null or a live pointer from `cffdrs_engine_new`.
unsafe fn engine_or_shared<'a>(
    engine: *const CffdrsEngineHandle,
) -> Result<&'a CffdrsEngine, DefaultCffdrsError> {
    if engine.is_null() {
        Ok(CffdrsEngine::shared()?)
    } else {
        // SAFETY: live handle per the caller's contract
        Ok(unsafe { &(*engine).engine })
    }
}

/// Calculate the fire behaviour advisory for one station.
///
/// - `engine`: engine from `cffdrs_engine_new`, or null for the default engine
/// - `station`: station input
/// - `out_advisory`: receives the advisory on success
///
/// Returns
/// - `CffdrsErrorCode::Ok` (0) on success
/// - `CffdrsErrorCode::NullPointer` if `station`, its `fuel_type` or `out_advisory` is null
/// - `CffdrsErrorCode::UnknownFuelType` if the fuel code is not an FBP fuel type
/// - `CffdrsErrorCode::InvalidParameter` if the date is not a calendar date
/// - `CffdrsErrorCode::CannotCalculateFireType` if crown fraction burned is invalid
///
/// # Safety
///
/// - `engine` must be null or a live pointer from `cffdrs_engine_new`.
/// - `station` must point to a valid `CffdrsStationInput` whose `fuel_type`
///   is a null-terminated string.
/// - `out_advisory` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn cffdrs_calculate_advisory(
    engine: *const CffdrsEngineHandle,
    station: *const CffdrsStationInput,
    out_advisory: *mut CffdrsAdvisory,
) -> CffdrsErrorCode {
    if station.is_null() {
        return track_error(&DefaultCffdrsError::null_pointer("station"));
    }
    if out_advisory.is_null() {
        return track_error(&DefaultCffdrsError::null_pointer("out_advisory"));
    }

    let result = unsafe { engine_or_shared(engine) }.and_then(|engine| {
        // SAFETY: non-null and valid per the contract above
        let station = unsafe { (*station).to_station() }?;
        Ok(engine.calculate_fire_behaviour_advisory(&station)?)
    });

    match track_result(result) {
        Ok(advisory) => {
            unsafe {
                *out_advisory = CffdrsAdvisory::from(&advisory);
            }
            CffdrsErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Calculate advisories for `len` stations in parallel.
///
/// `out_advisories[i]` and (when non-null) `out_codes[i]` hold the result for
/// `stations[i]`. Advisories of failed stations are left untouched.
///
/// Returns `CffdrsErrorCode::Ok` when every station succeeded, otherwise the
/// code of the first failure; `cffdrs_get_last_error` describes that failure.
///
/// # Safety
///
/// - `engine` must be null or a live pointer from `cffdrs_engine_new`.
/// - `stations` and `out_advisories` must each point to `len` valid elements.
/// - `out_codes` must be null or point to `len` writable elements.
#[no_mangle]
pub unsafe extern "C" fn cffdrs_calculate_advisories(
    engine: *const CffdrsEngineHandle,
    stations: *const CffdrsStationInput,
    len: usize,
    out_advisories: *mut CffdrsAdvisory,
    out_codes: *mut CffdrsErrorCode,
) -> CffdrsErrorCode {
    if len == 0 {
        clear_last_error();
        return CffdrsErrorCode::Ok;
    }
    if stations.is_null() {
        return track_error(&DefaultCffdrsError::null_pointer("stations"));
    }
    if out_advisories.is_null() {
        return track_error(&DefaultCffdrsError::null_pointer("out_advisories"));
    }

    let engine = match unsafe { engine_or_shared(engine) } {
        Ok(engine) => engine,
        Err(error) => return track_error(&error),
    };

    // SAFETY: both point to `len` elements per the contract above
    let inputs = unsafe { slice::from_raw_parts(stations, len) };
    let outputs = unsafe { slice::from_raw_parts_mut(out_advisories, len) };
    let mut codes = (!out_codes.is_null())
        .then(|| unsafe { slice::from_raw_parts_mut(out_codes, len) });

    // Convert first so a bad record fails on its own without stopping the batch
    let converted: Vec<Result<WeatherStationInput, DefaultCffdrsError>> = inputs
        .iter()
        .map(|input| unsafe { input.to_station() })
        .collect();
    let valid: Vec<WeatherStationInput> = converted
        .iter()
        .filter_map(|station| station.as_ref().ok().cloned())
        .collect();
    let mut results = engine.calculate_fire_behaviour_advisories(&valid).into_iter();

    let mut first_error: Option<DefaultCffdrsError> = None;
    for (index, station) in converted.into_iter().enumerate() {
        let outcome = station.and_then(|_| match results.next() {
            Some(result) => result.map_err(DefaultCffdrsError::from),
            None => Err(DefaultCffdrsError::invalid_parameter(
                "stations",
                "batch result missing",
            )),
        });
        let code = match outcome {
            Ok(advisory) => {
                outputs[index] = CffdrsAdvisory::from(&advisory);
                CffdrsErrorCode::Ok
            }
            Err(error) => {
                let code = error.code();
                if first_error.is_none() {
                    first_error = Some(error);
                }
                code
            }
        };
        if let Some(codes) = codes.as_mut() {
            codes[index] = code;
        }
    }

    match first_error {
        Some(error) => {
            tracing::warn!(len, "advisory batch finished with failures");
            track_error(&error)
        }
        None => {
            clear_last_error();
            CffdrsErrorCode::Ok
        }
    }
}
