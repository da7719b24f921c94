//! Fire behaviour advisory orchestrator
//!
//! Composes the FBP formulas into one advisory per weather station. Lookup
//! tables and configuration live in an immutable [`CffdrsEngine`] built once
//! and shared by reference, so stations can be evaluated from any thread.

use std::sync::LazyLock;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::cffdrs::{
    crown_fraction_burned, foliar_moisture_content, get_30_minutes_fire_size,
    get_60_minutes_fire_size, get_approx_flame_length, get_fire_type, head_fire_intensity,
    intensity_group, length_to_breadth_ratio, rate_of_spread,
    surface_fuel_consumption_with_grass_load,
};
use crate::config::AdvisoryConfig;
use crate::core_types::advisory::{CriticalHours, FireBehaviourAdvisory};
use crate::core_types::station::WeatherStationInput;
use crate::critical_hours::{get_critical_hours, DiurnalFfmcTable, FireScenario};
use crate::error::FbaResult;
use crate::registry::FuelTypeRegistry;

static SHARED: LazyLock<FbaResult<CffdrsEngine>> =
    LazyLock::new(|| CffdrsEngine::new(AdvisoryConfig::default()));

/// Immutable calculation context: fuel registry, diurnal table and settings
#[derive(Debug, Clone)]
pub struct CffdrsEngine {
    registry: FuelTypeRegistry,
    diurnal: DiurnalFfmcTable,
    config: AdvisoryConfig,
}

impl CffdrsEngine {
    /// Engine over the packaged diurnal FFMC table
    ///
    /// # Errors
    /// Returns `FbaError::InvalidConfig` for an out-of-range configuration
    /// and `FbaError::DiurnalTable` if the packaged table is corrupt.
    pub fn new(config: AdvisoryConfig) -> FbaResult<Self> {
        Self::with_diurnal_table(config, DiurnalFfmcTable::packaged()?.clone())
    }

    /// Engine over a caller-supplied diurnal FFMC table
    ///
    /// # Errors
    /// Returns `FbaError::InvalidConfig` for an out-of-range configuration.
    pub fn with_diurnal_table(config: AdvisoryConfig, diurnal: DiurnalFfmcTable) -> FbaResult<Self> {
        config.validate()?;
        info!(
            low_hfi_threshold = config.low_hfi_threshold,
            high_hfi_threshold = config.high_hfi_threshold,
            "CFFDRS engine ready"
        );
        Ok(Self {
            registry: FuelTypeRegistry::new(),
            diurnal,
            config,
        })
    }

    /// Process-wide engine with the default configuration
    ///
    /// # Errors
    /// Returns the error that prevented the default engine from being built.
    pub fn shared() -> FbaResult<&'static Self> {
        SHARED.as_ref().map_err(Clone::clone)
    }

    pub fn config(&self) -> &AdvisoryConfig {
        &self.config
    }

    pub fn registry(&self) -> &FuelTypeRegistry {
        &self.registry
    }

    pub fn diurnal(&self) -> &DiurnalFfmcTable {
        &self.diurnal
    }

    /// Fire behaviour advisory for one station
    ///
    /// Values that depend on crown fraction burned are `None` when a fuel type
    /// that can crown has no crown base height.
    ///
    /// # Errors
    /// Returns `FbaError::CannotCalculateFireType` if crown fraction burned
    /// comes out NaN or negative.
    pub fn calculate_fire_behaviour_advisory(
        &self,
        station: &WeatherStationInput,
    ) -> FbaResult<FireBehaviourAdvisory> {
        let fuel_type = station.fuel_type;
        let pc = station.percentage_conifer;
        let pdf = station.percentage_dead_balsam_fir;
        debug!(%station, "calculating fire behaviour advisory");

        // 1. Foliar moisture
        let fmc = foliar_moisture_content(
            station.lat,
            station.long,
            station.elevation,
            station.julian_date(),
        );

        // 2. Surface fuel consumption
        let sfc = surface_fuel_consumption_with_grass_load(
            fuel_type,
            station.bui,
            station.ffmc,
            pc,
            self.config.grass_fuel_load,
        );

        // 3. Fire shape
        let lb_ratio = length_to_breadth_ratio(fuel_type, station.wind_speed);

        // 4. Rate of spread
        let ros = rate_of_spread(
            fuel_type,
            station.isi,
            station.bui,
            fmc,
            sfc,
            pc,
            station.grass_cure,
            pdf,
            station.crown_base_height,
        );

        // 5. Crown fraction burned
        let cfb = if fuel_type.has_no_crown_fraction() {
            Some(0.0)
        } else {
            station
                .crown_base_height
                .map(|cbh| crown_fraction_burned(fuel_type, fmc, sfc, ros, cbh))
        };

        // 6. Intensity and what follows from it
        let cfl = self.registry.crown_fuel_load(fuel_type);
        let hfi = head_fire_intensity(fuel_type, pc, pdf, ros, cfb, cfl, sfc);
        let fire_type = cfb.map(|cfb| get_fire_type(fuel_type, cfb)).transpose()?;
        let flame_length = hfi.map(get_approx_flame_length);
        let group = hfi.map(intensity_group);

        // 7. Fire size
        let thirty_minute_fire_size = get_30_minutes_fire_size(lb_ratio, ros);
        let sixty_minute_fire_size = get_60_minutes_fire_size(lb_ratio, ros);

        debug!(
            %fuel_type, fmc, sfc, lb_ratio, ros, ?cfb, ?cfl, ?hfi,
            "fire behaviour computed"
        );

        // 8. Critical hours
        let (critical_hours_hfi_4000, critical_hours_hfi_10000) = match (cfb, hfi) {
            (Some(cfb), Some(_)) => {
                let scenario = FireScenario {
                    fuel_type,
                    percentage_conifer: pc,
                    percentage_dead_balsam_fir: pdf,
                    bui: station.bui,
                    wind_speed: station.wind_speed,
                    grass_cure: station.grass_cure,
                    crown_base_height: station.crown_base_height,
                    solar_noon_ffmc: station.ffmc,
                    fmc,
                    cfb,
                    cfl,
                };
                (
                    self.critical_hours(self.config.low_hfi_threshold, &scenario),
                    self.critical_hours(self.config.high_hfi_threshold, &scenario),
                )
            }
            _ => (None, None),
        };

        Ok(FireBehaviourAdvisory {
            hfi,
            ros,
            fire_type,
            cfb,
            flame_length,
            sixty_minute_fire_size,
            thirty_minute_fire_size,
            critical_hours_hfi_4000,
            critical_hours_hfi_10000,
            intensity_group: group,
        })
    }

    /// Critical hours for one HFI threshold using this engine's table
    pub fn critical_hours(&self, target_hfi: f64, scenario: &FireScenario) -> Option<CriticalHours> {
        get_critical_hours(target_hfi, scenario, &self.diurnal, &self.config)
    }

    /// Advisories for a batch of independent stations, evaluated in parallel
    ///
    /// Results are in input order, one per station.
    pub fn calculate_fire_behaviour_advisories(
        &self,
        stations: &[WeatherStationInput],
    ) -> Vec<FbaResult<FireBehaviourAdvisory>> {
        stations
            .par_iter()
            .map(|station| self.calculate_fire_behaviour_advisory(station))
            .collect()
    }
}

/// Fire behaviour advisory for one station using the shared default engine
///
/// # Errors
/// See [`CffdrsEngine::calculate_fire_behaviour_advisory`].
pub fn calculate_fire_behaviour_advisory(
    station: &WeatherStationInput,
) -> FbaResult<FireBehaviourAdvisory> {
    CffdrsEngine::shared()?.calculate_fire_behaviour_advisory(station)
}

/// Batch advisories using the shared default engine
pub fn calculate_fire_behaviour_advisories(
    stations: &[WeatherStationInput],
) -> Vec<FbaResult<FireBehaviourAdvisory>> {
    match CffdrsEngine::shared() {
        Ok(engine) => engine.calculate_fire_behaviour_advisories(stations),
        Err(err) => stations.iter().map(|_| Err(err.clone())).collect(),
    }
}
