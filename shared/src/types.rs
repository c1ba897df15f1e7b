//! Common types used across the portal

use serde::{Deserialize, Serialize};

use crate::models::{CropName, GrowthStage, PestControlMeasure};

/// Default number of rows generated and committed per bulk-insert batch
pub const DEFAULT_BATCH_SIZE: u32 = 10_000;

/// Bulk-insert sizes offered by the entry form
pub const BULK_INSERT_PRESETS: [u64; 3] = [1_000, 10_000, 100_000];

/// Number of rows the table view shows
pub const DEFAULT_DISPLAY_LIMIT: u32 = 10;

/// Column headers of the table view, in display order
pub const DISPLAY_COLUMNS: [&str; 6] = [
    "Crop Name",
    "Planting Date",
    "Harvest Date",
    "Growth Stage",
    "Pest Control",
    "Yield Prediction",
];

/// Cumulative progress reported after each committed bulk-insert batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkProgress {
    /// 1-based number of the batch just committed
    pub batch: u64,
    /// Rows committed so far
    pub inserted: u64,
    /// Rows requested for the whole run
    pub total: u64,
}

impl BulkProgress {
    pub fn is_complete(&self) -> bool {
        self.inserted >= self.total
    }
}

/// Outcome of a completed bulk insert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkInsertSummary {
    pub total_inserted: u64,
    pub batches: u64,
}

/// Notification that persisted crop data changed and views should re-render
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataChange {
    /// Monotonically increasing data version after this change
    pub version: u64,
    pub rows_inserted: u64,
}

/// Closed option lists backing the entry form's selection widgets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormOptions {
    pub crop_names: Vec<String>,
    pub growth_stages: Vec<String>,
    pub pest_control_measures: Vec<String>,
    pub bulk_presets: Vec<u64>,
}

impl FormOptions {
    /// Options with the given bulk presets
    pub fn with_presets(bulk_presets: Vec<u64>) -> Self {
        Self {
            crop_names: CropName::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            growth_stages: GrowthStage::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            pest_control_measures: PestControlMeasure::ALL
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
            bulk_presets,
        }
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self::with_presets(BULK_INSERT_PRESETS.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_options() {
        let options = FormOptions::default();
        assert_eq!(options.crop_names.len(), 10);
        assert_eq!(options.growth_stages.first().map(String::as_str), Some("Seedling"));
        assert!(options
            .pest_control_measures
            .contains(&"Biological pest control".to_string()));
        assert_eq!(options.bulk_presets, vec![1_000, 10_000, 100_000]);
    }

    #[test]
    fn test_progress_completion() {
        let progress = BulkProgress {
            batch: 1,
            inserted: 10_000,
            total: 10_001,
        };
        assert!(!progress.is_complete());
        assert!(BulkProgress { inserted: 10_001, ..progress }.is_complete());
    }
}
