//! FBP fuel types and their static coefficients
//!
//! The sixteen Fire Behaviour Prediction (FBP) fuel types plus the two grass
//! curing variants, with the constants used by the rate-of-spread, build-up
//! effect and crown fire equations.
//!
//! # Scientific References
//! - Forestry Canada Fire Danger Group (1992). "Development and structure of the
//!   Canadian Forest Fire Behavior Prediction System". Information Report ST-X-3
//! - Wotton, B.M., Alexander, M.E., Taylor, S.W. (2009). "Updates and revisions to
//!   the 1992 Canadian Forest Fire Behavior Prediction System". GLC-X-10

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FbaError;
use crate::registry::FuelTypeRegistry;

/// FBP fuel type code
///
/// Deserializes through the fuel type registry, so codes are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum FuelType {
    /// Spruce-lichen woodland
    C1,
    /// Boreal spruce
    C2,
    /// Mature jack or lodgepole pine
    C3,
    /// Immature jack or lodgepole pine
    C4,
    /// Red and white pine
    C5,
    /// Conifer plantation
    C6,
    /// Ponderosa pine - Douglas-fir
    C7,
    /// Leafless aspen
    D1,
    /// Boreal mixedwood - leafless
    M1,
    /// Boreal mixedwood - green
    M2,
    /// Dead balsam fir mixedwood - leafless
    M3,
    /// Dead balsam fir mixedwood - green
    M4,
    /// Jack or lodgepole pine slash
    S1,
    /// White spruce - balsam slash
    S2,
    /// Coastal cedar - hemlock - Douglas-fir slash
    S3,
    /// Matted grass
    O1A,
    /// Standing grass
    O1B,
}

/// Rate-of-spread coefficients `RSI = a × (1 - e^(-b × ISI))^c`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpreadCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Static registry entry for one fuel type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuelTypeRecord {
    pub code: FuelType,
    /// Crown fuel load (kg/m²); `None` for fuel types that cannot crown
    pub crown_fuel_load: Option<f64>,
    /// Default crown base height (m)
    pub default_crown_base_height: Option<f64>,
    /// Default percentage conifer for mixedwood types
    pub default_percentage_conifer: f64,
    /// Default percentage dead balsam fir for M3/M4
    pub default_percentage_dead_balsam_fir: f64,
    /// `None` for M1/M2, which blend the C2 and D1 curves
    pub spread: Option<SpreadCoefficients>,
    /// Average build-up index for the fuel type (BUI₀)
    pub bui_0: f64,
    /// Proportion of maximum ROS at BUI₀ (q)
    pub q: f64,
}

const fn spread(a: f64, b: f64, c: f64) -> Option<SpreadCoefficients> {
    Some(SpreadCoefficients { a, b, c })
}

/// FBP constants, indexed by `FuelType as usize`
pub const FUEL_TYPE_RECORDS: [FuelTypeRecord; 17] = [
    FuelTypeRecord {
        code: FuelType::C1,
        crown_fuel_load: Some(0.75),
        default_crown_base_height: Some(2.0),
        default_percentage_conifer: 100.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(90.0, 0.0649, 4.5),
        bui_0: 72.0,
        q: 0.9,
    },
    FuelTypeRecord {
        code: FuelType::C2,
        crown_fuel_load: Some(0.8),
        default_crown_base_height: Some(3.0),
        default_percentage_conifer: 100.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(110.0, 0.0282, 1.5),
        bui_0: 64.0,
        q: 0.7,
    },
    FuelTypeRecord {
        code: FuelType::C3,
        crown_fuel_load: Some(1.15),
        default_crown_base_height: Some(8.0),
        default_percentage_conifer: 100.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(110.0, 0.0444, 3.0),
        bui_0: 62.0,
        q: 0.75,
    },
    FuelTypeRecord {
        code: FuelType::C4,
        crown_fuel_load: Some(1.2),
        default_crown_base_height: Some(4.0),
        default_percentage_conifer: 100.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(110.0, 0.0293, 1.5),
        bui_0: 66.0,
        q: 0.8,
    },
    FuelTypeRecord {
        code: FuelType::C5,
        crown_fuel_load: Some(1.2),
        default_crown_base_height: Some(18.0),
        default_percentage_conifer: 100.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(30.0, 0.0697, 4.0),
        bui_0: 56.0,
        q: 0.8,
    },
    FuelTypeRecord {
        code: FuelType::C6,
        crown_fuel_load: Some(1.8),
        default_crown_base_height: Some(7.0),
        default_percentage_conifer: 100.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(30.0, 0.08, 3.0),
        bui_0: 62.0,
        q: 0.8,
    },
    FuelTypeRecord {
        code: FuelType::C7,
        crown_fuel_load: Some(0.5),
        default_crown_base_height: Some(10.0),
        default_percentage_conifer: 100.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(45.0, 0.0305, 2.0),
        bui_0: 106.0,
        q: 0.85,
    },
    FuelTypeRecord {
        code: FuelType::D1,
        crown_fuel_load: None,
        default_crown_base_height: None,
        default_percentage_conifer: 0.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(30.0, 0.0232, 1.6),
        bui_0: 32.0,
        q: 0.9,
    },
    FuelTypeRecord {
        code: FuelType::M1,
        crown_fuel_load: Some(0.8),
        default_crown_base_height: Some(6.0),
        default_percentage_conifer: 50.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: None,
        bui_0: 50.0,
        q: 0.8,
    },
    FuelTypeRecord {
        code: FuelType::M2,
        crown_fuel_load: Some(0.8),
        default_crown_base_height: Some(6.0),
        default_percentage_conifer: 50.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: None,
        bui_0: 50.0,
        q: 0.8,
    },
    FuelTypeRecord {
        code: FuelType::M3,
        crown_fuel_load: Some(0.8),
        default_crown_base_height: Some(6.0),
        default_percentage_conifer: 0.0,
        default_percentage_dead_balsam_fir: 30.0,
        spread: spread(120.0, 0.0572, 1.4),
        bui_0: 50.0,
        q: 0.8,
    },
    FuelTypeRecord {
        code: FuelType::M4,
        crown_fuel_load: Some(0.8),
        default_crown_base_height: Some(6.0),
        default_percentage_conifer: 0.0,
        default_percentage_dead_balsam_fir: 30.0,
        spread: spread(100.0, 0.0404, 1.48),
        bui_0: 50.0,
        q: 0.8,
    },
    FuelTypeRecord {
        code: FuelType::S1,
        crown_fuel_load: None,
        default_crown_base_height: None,
        default_percentage_conifer: 0.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(75.0, 0.0297, 1.3),
        bui_0: 38.0,
        q: 0.75,
    },
    FuelTypeRecord {
        code: FuelType::S2,
        crown_fuel_load: None,
        default_crown_base_height: None,
        default_percentage_conifer: 0.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(40.0, 0.0438, 1.7),
        bui_0: 63.0,
        q: 0.75,
    },
    FuelTypeRecord {
        code: FuelType::S3,
        crown_fuel_load: None,
        default_crown_base_height: None,
        default_percentage_conifer: 0.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(55.0, 0.0829, 3.2),
        bui_0: 31.0,
        q: 0.75,
    },
    FuelTypeRecord {
        code: FuelType::O1A,
        crown_fuel_load: None,
        default_crown_base_height: None,
        default_percentage_conifer: 0.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(190.0, 0.031, 1.4),
        bui_0: 1.0,
        q: 1.0,
    },
    FuelTypeRecord {
        code: FuelType::O1B,
        crown_fuel_load: None,
        default_crown_base_height: None,
        default_percentage_conifer: 0.0,
        default_percentage_dead_balsam_fir: 0.0,
        spread: spread(250.0, 0.035, 1.7),
        bui_0: 1.0,
        q: 1.0,
    },
];

impl FuelType {
    /// Every fuel type, in registry order
    pub const ALL: [FuelType; 17] = [
        FuelType::C1,
        FuelType::C2,
        FuelType::C3,
        FuelType::C4,
        FuelType::C5,
        FuelType::C6,
        FuelType::C7,
        FuelType::D1,
        FuelType::M1,
        FuelType::M2,
        FuelType::M3,
        FuelType::M4,
        FuelType::S1,
        FuelType::S2,
        FuelType::S3,
        FuelType::O1A,
        FuelType::O1B,
    ];

    /// Static constants for this fuel type
    #[inline]
    pub fn record(self) -> &'static FuelTypeRecord {
        &FUEL_TYPE_RECORDS[self as usize]
    }

    /// Fuel code as written in the FBP system ("C2", "O1A", ...)
    pub fn code(self) -> &'static str {
        match self {
            FuelType::C1 => "C1",
            FuelType::C2 => "C2",
            FuelType::C3 => "C3",
            FuelType::C4 => "C4",
            FuelType::C5 => "C5",
            FuelType::C6 => "C6",
            FuelType::C7 => "C7",
            FuelType::D1 => "D1",
            FuelType::M1 => "M1",
            FuelType::M2 => "M2",
            FuelType::M3 => "M3",
            FuelType::M4 => "M4",
            FuelType::S1 => "S1",
            FuelType::S2 => "S2",
            FuelType::S3 => "S3",
            FuelType::O1A => "O1A",
            FuelType::O1B => "O1B",
        }
    }

    /// Fuel types without a crown fraction burned.
    ///
    /// Deciduous, slash and grass fuels never carry a crown fire, so the
    /// advisory uses a CFB of zero for them.
    pub fn has_no_crown_fraction(self) -> bool {
        matches!(
            self,
            FuelType::D1
                | FuelType::O1A
                | FuelType::O1B
                | FuelType::S1
                | FuelType::S2
                | FuelType::S3
        )
    }

    /// Grass fuel types (O1A, O1B)
    pub fn is_grass(self) -> bool {
        matches!(self, FuelType::O1A | FuelType::O1B)
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FuelType {
    type Err = FbaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelTypeRegistry::new().lookup(s).map(|record| record.code)
    }
}

impl TryFrom<String> for FuelType {
    type Error = FbaError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_are_indexed_by_discriminant() {
        for fuel_type in FuelType::ALL {
            assert_eq!(fuel_type.record().code, fuel_type);
        }
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("C2".parse::<FuelType>().unwrap(), FuelType::C2);
        assert_eq!("o1b".parse::<FuelType>().unwrap(), FuelType::O1B);
        assert_eq!(" M3 ".parse::<FuelType>().unwrap(), FuelType::M3);
        assert_eq!(
            "M1_75".parse::<FuelType>(),
            Err(FbaError::UnknownFuelType("M1_75".to_string()))
        );
    }

    #[test]
    fn test_deserialize_through_registry() {
        let fuel_type: FuelType = serde_json::from_str(r#"" m3""#).unwrap();
        assert_eq!(fuel_type, FuelType::M3);
        assert_eq!(serde_json::to_string(&FuelType::O1A).unwrap(), r#""O1A""#);

        let err = serde_json::from_str::<FuelType>(r#""C8""#).unwrap_err();
        assert!(err.to_string().contains("unknown fuel type code 'C8'"), "{}", err);
    }

    #[test]
    fn test_no_crown_fraction_set() {
        let no_crown: Vec<FuelType> = FuelType::ALL
            .into_iter()
            .filter(|f| f.has_no_crown_fraction())
            .collect();
        assert_eq!(
            no_crown,
            vec![
                FuelType::D1,
                FuelType::S1,
                FuelType::S2,
                FuelType::S3,
                FuelType::O1A,
                FuelType::O1B
            ]
        );
        // Fuel types that cannot crown carry no crown fuel load
        for fuel_type in no_crown {
            assert!(fuel_type.record().crown_fuel_load.is_none());
        }
    }

    #[test]
    fn test_mixedwood_blends_have_no_own_curve() {
        assert!(FuelType::M1.record().spread.is_none());
        assert!(FuelType::M2.record().spread.is_none());
        assert!(FuelType::M3.record().spread.is_some());
    }
}
