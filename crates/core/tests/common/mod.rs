//! Shared fixtures for the integration tests

#![allow(dead_code)]

use cffdrs_core::{FuelType, StationStatus, WeatherStationInput};
use chrono::NaiveDate;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// HORSEFLY (station 230) on 5 July 2021, boreal spruce with a 3 m crown base
pub fn horsefly_c2() -> WeatherStationInput {
    WeatherStationInput {
        elevation: 701,
        fuel_type: FuelType::C2,
        time_of_interest: NaiveDate::from_ymd_opt(2021, 7, 5).unwrap(),
        percentage_conifer: 100.0,
        percentage_dead_balsam_fir: 0.0,
        grass_cure: 0.0,
        crown_base_height: Some(3.0),
        lat: 52.33,
        long: -121.42,
        bui: 117.899,
        ffmc: 90.638,
        isi: 7.462,
        wind_speed: 9.186646,
        temperature: 27.0,
        relative_humidity: 31.0,
        precipitation: 0.0,
        status: StationStatus::Actual,
    }
}

/// Same day, dead balsam fir mixedwood with 30% dead fir and a 6 m crown base
pub fn horsefly_m3() -> WeatherStationInput {
    WeatherStationInput {
        fuel_type: FuelType::M3,
        percentage_conifer: 0.0,
        percentage_dead_balsam_fir: 30.0,
        crown_base_height: Some(6.0),
        ffmc: 90.683,
        isi: 7.51,
        wind_speed: 9.18638,
        ..horsefly_c2()
    }
}
