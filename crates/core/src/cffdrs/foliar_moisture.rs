//! Foliar moisture content (FBP equations 1-8)
//!
//! Seasonal curve of conifer needle moisture, keyed on the day of year
//! relative to the date of minimum FMC. The minimum date depends on latitude,
//! longitude and elevation.

/// Calculate foliar moisture content (%)
///
/// # Arguments
/// * `lat` - Latitude (degrees)
/// * `long` - Longitude (degrees); only the magnitude is used
/// * `elevation` - Elevation (m); negative means "unknown" and selects the
///   sea-level form of the equations
/// * `julian_date` - Day of year (1-366)
///
/// # References
/// Forestry Canada Fire Danger Group (1992), equations 1-8
pub fn foliar_moisture_content(lat: f64, long: f64, elevation: i32, julian_date: u32) -> f64 {
    let long = long.abs();
    let elevation = f64::from(elevation);

    let (latn, d0) = if elevation < 0.0 {
        let latn = 46.0 + 23.4 * (-0.036 * (150.0 - long)).exp();
        (latn, 151.0 * (lat / latn))
    } else {
        let latn = 43.0 + 33.7 * (-0.0351 * (150.0 - long)).exp();
        (latn, 142.1 * (lat / latn) + 0.0172 * elevation)
    };
    let d0 = d0.round();
    let nd = (f64::from(julian_date) - d0).abs();

    let fmc = if nd < 30.0 {
        85.0 + 0.0189 * nd * nd
    } else if nd < 50.0 {
        32.9 + 3.17 * nd - 0.0288 * nd * nd
    } else {
        120.0
    };

    tracing::debug!(latn, d0, nd, fmc, "foliar moisture content");
    fmc
}
