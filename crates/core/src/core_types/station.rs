//! Weather station input record

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::fuel::FuelType;

/// Whether the daily values are observed or forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StationStatus {
    Actual,
    Forecast,
}

/// One populated weather-station record for a single day.
///
/// Validation of numeric ranges is the caller's responsibility; the engine
/// only relies on `crown_base_height` being present for fuel types that can
/// crown (see [`FuelType::has_no_crown_fraction`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherStationInput {
    /// Station elevation (m)
    pub elevation: i32,
    pub fuel_type: FuelType,
    pub time_of_interest: NaiveDate,
    pub percentage_conifer: f64,
    pub percentage_dead_balsam_fir: f64,
    pub grass_cure: f64,
    /// Crown base height (m)
    pub crown_base_height: Option<f64>,
    pub lat: f64,
    /// Longitude; sign is ignored by the foliar moisture equation
    pub long: f64,
    pub bui: f64,
    pub ffmc: f64,
    pub isi: f64,
    /// 10 m open wind speed (km/h)
    pub wind_speed: f64,
    pub temperature: f64,
    pub relative_humidity: f64,
    pub precipitation: f64,
    pub status: StationStatus,
}

impl WeatherStationInput {
    /// Day of year of the time of interest (1-366)
    pub fn julian_date(&self) -> u32 {
        self.time_of_interest.ordinal()
    }
}

impl fmt::Display for WeatherStationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat {}, long {}, elevation {}, fuel_type {}, time_of_interest {}, \
             percentage_conifer {}, percentage_dead_balsam_fir {}, grass_cure {}, \
             crown_base_height {:?}, bui {}, ffmc {}, isi {}, wind_speed {}, \
             temperature {}, relative_humidity {}, precipitation {}, status {:?}",
            self.lat,
            self.long,
            self.elevation,
            self.fuel_type,
            self.time_of_interest,
            self.percentage_conifer,
            self.percentage_dead_balsam_fir,
            self.grass_cure,
            self.crown_base_height,
            self.bui,
            self.ffmc,
            self.isi,
            self.wind_speed,
            self.temperature,
            self.relative_humidity,
            self.precipitation,
            self.status,
        )
    }
}
