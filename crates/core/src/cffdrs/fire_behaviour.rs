//! Fire type, flame length and elliptical fire size

use std::f64::consts::PI;

use crate::core_types::advisory::FireType;
use crate::core_types::fuel::FuelType;
use crate::error::{FbaError, FbaResult};

/// Crown fraction burned below which a fire is a surface fire
const SURFACE_FIRE_CFB: f64 = 0.1;
/// Crown fraction burned at or above which a fire is a continuous crown fire
const CONTINUOUS_CROWN_CFB: f64 = 0.9;

/// Classify a fire from its crown fraction burned
///
/// Leafless aspen (D1) has no crown layer and is always a surface fire.
///
/// # Errors
/// Returns [`FbaError::CannotCalculateFireType`] when `cfb` is NaN or negative.
pub fn get_fire_type(fuel_type: FuelType, cfb: f64) -> FbaResult<FireType> {
    if cfb.is_nan() || cfb < 0.0 {
        tracing::error!(%fuel_type, cfb, "crown fraction burned outside the valid domain");
        return Err(FbaError::CannotCalculateFireType(cfb));
    }
    let fire_type = if fuel_type == FuelType::D1 || cfb < SURFACE_FIRE_CFB {
        FireType::Surface
    } else if cfb < CONTINUOUS_CROWN_CFB {
        FireType::IntermittentCrown
    } else {
        FireType::ContinuousCrown
    };
    Ok(fire_type)
}

/// Approximate flame length (m) from head fire intensity (kW/m)
///
/// L = sqrt(HFI / 300), a simplification of Byram (1959).
pub fn get_approx_flame_length(hfi: f64) -> f64 {
    (hfi / 300.0).sqrt()
}

/// Area (ha) of an ellipse grown for `minutes` at head fire spread `ros`
fn elliptical_fire_size(minutes: f64, lb_ratio: f64, ros: f64) -> f64 {
    PI * (minutes * ros).powi(2) / (40000.0 * lb_ratio)
}

/// Fire size (ha) 30 minutes after ignition
pub fn get_30_minutes_fire_size(lb_ratio: f64, ros: f64) -> f64 {
    elliptical_fire_size(30.0, lb_ratio, ros)
}

/// Fire size (ha) 60 minutes after ignition
pub fn get_60_minutes_fire_size(lb_ratio: f64, ros: f64) -> f64 {
    elliptical_fire_size(60.0, lb_ratio, ros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fire_type_steps() {
        assert_eq!(get_fire_type(FuelType::C2, 0.05), Ok(FireType::Surface));
        assert_eq!(get_fire_type(FuelType::C2, 0.1), Ok(FireType::IntermittentCrown));
        assert_eq!(get_fire_type(FuelType::C2, 0.5), Ok(FireType::IntermittentCrown));
        assert_eq!(get_fire_type(FuelType::C2, 0.9), Ok(FireType::ContinuousCrown));
        assert_eq!(get_fire_type(FuelType::C2, 0.95), Ok(FireType::ContinuousCrown));
    }

    #[test]
    fn test_d1_is_always_surface() {
        assert_eq!(get_fire_type(FuelType::D1, 0.95), Ok(FireType::Surface));
    }

    #[test]
    fn test_invalid_cfb() {
        assert_eq!(
            get_fire_type(FuelType::C2, -0.2),
            Err(FbaError::CannotCalculateFireType(-0.2))
        );
        assert!(matches!(
            get_fire_type(FuelType::C3, f64::NAN),
            Err(FbaError::CannotCalculateFireType(v)) if v.is_nan()
        ));
    }

    #[test]
    fn test_flame_length() {
        assert_relative_eq!(get_approx_flame_length(300.0), 1.0);
        assert_relative_eq!(get_approx_flame_length(13692.785), 6.756, epsilon = 1e-3);
        assert!(get_approx_flame_length(4000.0) < get_approx_flame_length(10000.0));
    }

    #[test]
    fn test_fire_size_scales_with_time_squared() {
        let thirty = get_30_minutes_fire_size(1.5, 10.0);
        let sixty = get_60_minutes_fire_size(1.5, 10.0);
        assert_relative_eq!(sixty, 4.0 * thirty, max_relative = 1e-12);
        assert_relative_eq!(thirty, PI * 300.0_f64.powi(2) / 60000.0, max_relative = 1e-12);
        // Longer, narrower fires cover less area
        assert!(get_30_minutes_fire_size(3.0, 10.0) < thirty);
    }
}
