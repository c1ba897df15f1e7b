//! Crop observation models

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Raised when a stored or submitted value is not part of a closed option set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a known {field}")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

impl UnknownOption {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Crops offered in the entry form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CropName {
    Wheat,
    Rice,
    Corn,
    Soybean,
    Barley,
    Sugarcane,
    Cotton,
    Potato,
    Tomato,
    Lettuce,
}

impl CropName {
    pub const ALL: [CropName; 10] = [
        CropName::Wheat,
        CropName::Rice,
        CropName::Corn,
        CropName::Soybean,
        CropName::Barley,
        CropName::Sugarcane,
        CropName::Cotton,
        CropName::Potato,
        CropName::Tomato,
        CropName::Lettuce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropName::Wheat => "Wheat",
            CropName::Rice => "Rice",
            CropName::Corn => "Corn",
            CropName::Soybean => "Soybean",
            CropName::Barley => "Barley",
            CropName::Sugarcane => "Sugarcane",
            CropName::Cotton => "Cotton",
            CropName::Potato => "Potato",
            CropName::Tomato => "Tomato",
            CropName::Lettuce => "Lettuce",
        }
    }
}

impl std::fmt::Display for CropName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropName {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|crop| crop.as_str() == s)
            .ok_or_else(|| UnknownOption::new("crop name", s))
    }
}

/// Growth stage of a crop at the time of observation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GrowthStage {
    Seedling,
    Vegetative,
    Flowering,
    Fruiting,
    Maturity,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Seedling,
        GrowthStage::Vegetative,
        GrowthStage::Flowering,
        GrowthStage::Fruiting,
        GrowthStage::Maturity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Seedling => "Seedling",
            GrowthStage::Vegetative => "Vegetative",
            GrowthStage::Flowering => "Flowering",
            GrowthStage::Fruiting => "Fruiting",
            GrowthStage::Maturity => "Maturity",
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrowthStage {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| UnknownOption::new("growth stage", s))
    }
}

/// Pest control measure applied to the crop
///
/// Serialized with the human-readable label, which is also the value
/// written to the `pest_control_measures` column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PestControlMeasure {
    #[serde(rename = "Use of organic pesticides")]
    OrganicPesticides,
    #[serde(rename = "Crop rotation")]
    CropRotation,
    #[serde(rename = "Neem oil application")]
    NeemOil,
    #[serde(rename = "Biological pest control")]
    BiologicalControl,
    #[serde(rename = "Chemical pesticides")]
    ChemicalPesticides,
    #[serde(rename = "Regular field monitoring")]
    FieldMonitoring,
}

impl PestControlMeasure {
    pub const ALL: [PestControlMeasure; 6] = [
        PestControlMeasure::OrganicPesticides,
        PestControlMeasure::CropRotation,
        PestControlMeasure::NeemOil,
        PestControlMeasure::BiologicalControl,
        PestControlMeasure::ChemicalPesticides,
        PestControlMeasure::FieldMonitoring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PestControlMeasure::OrganicPesticides => "Use of organic pesticides",
            PestControlMeasure::CropRotation => "Crop rotation",
            PestControlMeasure::NeemOil => "Neem oil application",
            PestControlMeasure::BiologicalControl => "Biological pest control",
            PestControlMeasure::ChemicalPesticides => "Chemical pesticides",
            PestControlMeasure::FieldMonitoring => "Regular field monitoring",
        }
    }
}

impl std::fmt::Display for PestControlMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PestControlMeasure {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|measure| measure.as_str() == s)
            .ok_or_else(|| UnknownOption::new("pest control measure", s))
    }
}

/// A persisted crop observation
///
/// The option columns are kept as text: the table does not constrain them,
/// so rows written outside this system may hold values outside the closed
/// sets and must still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropRecord {
    pub id: i64,
    pub crop_name: String,
    pub planting_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub growth_stage: String,
    pub pest_control_measures: String,
    /// Predicted yield in kilograms
    pub yield_prediction: i32,
}

impl CropRecord {
    /// Parsed crop name, if the stored value is in the closed set
    pub fn crop(&self) -> Result<CropName, UnknownOption> {
        self.crop_name.parse()
    }

    pub fn stage(&self) -> Result<GrowthStage, UnknownOption> {
        self.growth_stage.parse()
    }

    pub fn pest_control(&self) -> Result<PestControlMeasure, UnknownOption> {
        self.pest_control_measures.parse()
    }

    /// Days between planting and harvest (negative when harvest precedes planting)
    pub fn growing_days(&self) -> i64 {
        (self.harvest_date - self.planting_date).num_days()
    }
}

/// Fields supplied for a new crop observation
///
/// Harvest date is deliberately not checked against planting date so that
/// free-form historical entries are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct NewCropRecord {
    pub crop_name: CropName,
    pub planting_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub growth_stage: GrowthStage,
    pub pest_control_measures: PestControlMeasure,
    /// Predicted yield in kilograms
    #[validate(range(min = 0, message = "Yield prediction cannot be negative"))]
    pub yield_prediction: i32,
}

impl NewCropRecord {
    /// Whether a persisted record carries exactly these fields
    pub fn matches(&self, record: &CropRecord) -> bool {
        record.crop_name == self.crop_name.as_str()
            && record.planting_date == self.planting_date
            && record.harvest_date == self.harvest_date
            && record.growth_stage == self.growth_stage.as_str()
            && record.pest_control_measures == self.pest_control_measures.as_str()
            && record.yield_prediction == self.yield_prediction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewCropRecord {
        NewCropRecord {
            crop_name: CropName::Rice,
            planting_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            harvest_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            growth_stage: GrowthStage::Flowering,
            pest_control_measures: PestControlMeasure::NeemOil,
            yield_prediction: 1200,
        }
    }

    #[test]
    fn test_option_labels_round_trip_through_from_str() {
        for crop in CropName::ALL {
            assert_eq!(crop.as_str().parse::<CropName>(), Ok(crop));
        }
        for stage in GrowthStage::ALL {
            assert_eq!(stage.as_str().parse::<GrowthStage>(), Ok(stage));
        }
        for measure in PestControlMeasure::ALL {
            assert_eq!(measure.as_str().parse::<PestControlMeasure>(), Ok(measure));
        }
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let err = "Quinoa".parse::<CropName>().unwrap_err();
        assert_eq!(err.field, "crop name");
        assert_eq!(err.to_string(), "'Quinoa' is not a known crop name");
        assert!("seedling".parse::<GrowthStage>().is_err());
    }

    #[test]
    fn test_pest_control_serializes_as_label() {
        let json = serde_json::to_string(&PestControlMeasure::OrganicPesticides).unwrap();
        assert_eq!(json, "\"Use of organic pesticides\"");

        let parsed: PestControlMeasure = serde_json::from_str("\"Crop rotation\"").unwrap();
        assert_eq!(parsed, PestControlMeasure::CropRotation);
    }

    #[test]
    fn test_new_record_deserializes_from_form_payload() {
        let payload = r#"{
            "crop_name": "Wheat",
            "planting_date": "2024-01-10",
            "harvest_date": "2024-05-02",
            "growth_stage": "Maturity",
            "pest_control_measures": "Regular field monitoring",
            "yield_prediction": 3400
        }"#;
        let input: NewCropRecord = serde_json::from_str(payload).unwrap();
        assert_eq!(input.crop_name, CropName::Wheat);
        assert_eq!(input.pest_control_measures, PestControlMeasure::FieldMonitoring);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_negative_yield_fails_validation() {
        let mut input = sample();
        input.yield_prediction = -1;
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("yield_prediction"));
    }

    #[test]
    fn test_harvest_before_planting_is_accepted() {
        let mut input = sample();
        input.harvest_date = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_matches_and_growing_days() {
        let input = sample();
        let record = CropRecord {
            id: 7,
            crop_name: "Rice".to_string(),
            planting_date: input.planting_date,
            harvest_date: input.harvest_date,
            growth_stage: "Flowering".to_string(),
            pest_control_measures: "Neem oil application".to_string(),
            yield_prediction: 1200,
        };
        assert!(input.matches(&record));
        assert_eq!(record.growing_days(), 136);
        assert_eq!(record.crop(), Ok(CropName::Rice));

        let other = CropRecord {
            yield_prediction: 1201,
            ..record
        };
        assert!(!input.matches(&other));
    }
}
