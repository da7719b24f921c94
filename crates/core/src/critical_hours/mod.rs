//! Critical hours: the part of the burning day during which head fire
//! intensity meets a threshold
//!
//! The critical FFMC for the threshold is solved first, then the diurnal FFMC
//! row for the day's solar-noon FFMC is walked forward from 13:00 until the
//! adjusted FFMC drops below it. Morning hours before 13:00 are never
//! searched, so a window already open at 13:00 is reported as starting then.

pub mod diurnal;
pub mod solver;

pub use diurnal::DiurnalFfmcTable;
pub use solver::{get_ffmc_for_target_hfi, FireScenario};

use crate::config::AdvisoryConfig;
use crate::core_types::advisory::CriticalHours;

use diurnal::{FIRST_HOUR, LAST_HOUR};
use solver::{MAX_FFMC, MIN_FFMC};

/// Critical FFMC at or above which the target is treated as unreachable
const UNREACHABLE_FFMC: f64 = 100.9;
/// First hour past the end of the table (08:00 next morning)
const END_OF_SEARCH: u32 = LAST_HOUR + 1;

/// Window of hours during which HFI is at or above `target_hfi`
///
/// Returns `None` when the target is never reached during the day. Hours are
/// reported on a 24-hour clock; the end is smaller than the start when the
/// window runs past midnight.
pub fn get_critical_hours(
    target_hfi: f64,
    scenario: &FireScenario,
    diurnal: &DiurnalFfmcTable,
    config: &AdvisoryConfig,
) -> Option<CriticalHours> {
    let (critical_ffmc, resulting_hfi) = get_ffmc_for_target_hfi(scenario, target_hfi, config);

    if critical_ffmc >= UNREACHABLE_FFMC && resulting_hfi < target_hfi {
        tracing::info!(
            target_hfi,
            critical_ffmc,
            resulting_hfi,
            "target HFI not reached at any FFMC, no critical hours"
        );
        return None;
    }
    if critical_ffmc == MIN_FFMC && resulting_hfi >= target_hfi {
        tracing::info!(
            target_hfi,
            resulting_hfi,
            "target HFI exceeded at any FFMC, whole afternoon and night critical"
        );
        return Some(CriticalHours::new(
            f64::from(FIRST_HOUR),
            f64::from(LAST_HOUR % 24),
        ));
    }
    debug_assert!(critical_ffmc <= MAX_FFMC);

    let row = diurnal.row(scenario.solar_noon_ffmc);
    let meets = |hour: u32| row[(hour - FIRST_HOUR) as usize] >= critical_ffmc;

    let Some(start) = (FIRST_HOUR..END_OF_SEARCH).find(|&hour| meets(hour)) else {
        tracing::info!(
            target_hfi,
            critical_ffmc,
            solar_noon_ffmc = scenario.solar_noon_ffmc,
            "diurnal FFMC never reaches critical FFMC"
        );
        return None;
    };

    let end = (start..END_OF_SEARCH)
        .take_while(|&hour| meets(hour))
        .last()
        .unwrap_or(start);

    let hours = CriticalHours::new(f64::from(start % 24), f64::from(end % 24));
    tracing::info!(target_hfi, critical_ffmc, %hours, "critical hours");
    Some(hours)
}
