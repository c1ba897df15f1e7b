//! Synthetic crop observations for volume testing

use chrono::{Days, Months, NaiveDate};
use crop_shared::{CropName, GrowthStage, NewCropRecord, PestControlMeasure};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Harvest follows planting by this many days, inclusive
pub const HARVEST_OFFSET_DAYS: (u64, u64) = (60, 180);

/// Predicted yield range in kilograms, inclusive
pub const YIELD_RANGE_KG: (i32, i32) = (500, 5000);

/// Planting dates are drawn from the last this many months
pub const PLANTING_WINDOW_MONTHS: u32 = 24;

/// Draws plausible crop observations relative to a fixed "today"
pub struct SyntheticCropGenerator<R> {
    rng: R,
    earliest_planting: NaiveDate,
    planting_span_days: u64,
}

impl SyntheticCropGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn from_entropy(today: NaiveDate) -> Self {
        Self::with_rng(StdRng::from_entropy(), today)
    }

    /// Reproducible generator
    pub fn seeded(seed: u64, today: NaiveDate) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), today)
    }
}

impl<R: Rng> SyntheticCropGenerator<R> {
    pub fn with_rng(rng: R, today: NaiveDate) -> Self {
        let earliest_planting = today
            .checked_sub_months(Months::new(PLANTING_WINDOW_MONTHS))
            .unwrap_or(NaiveDate::MIN);
        let planting_span_days = (today - earliest_planting).num_days().max(0) as u64;

        Self {
            rng,
            earliest_planting,
            planting_span_days,
        }
    }

    /// Earliest planting date this generator can produce
    pub fn earliest_planting(&self) -> NaiveDate {
        self.earliest_planting
    }

    pub fn next_record(&mut self) -> NewCropRecord {
        let planting_date = self.earliest_planting
            + Days::new(self.rng.gen_range(0..=self.planting_span_days));
        let harvest_date = planting_date
            + Days::new(self.rng.gen_range(HARVEST_OFFSET_DAYS.0..=HARVEST_OFFSET_DAYS.1));

        NewCropRecord {
            crop_name: CropName::ALL[self.rng.gen_range(0..CropName::ALL.len())],
            planting_date,
            harvest_date,
            growth_stage: GrowthStage::ALL[self.rng.gen_range(0..GrowthStage::ALL.len())],
            pest_control_measures: PestControlMeasure::ALL
                [self.rng.gen_range(0..PestControlMeasure::ALL.len())],
            yield_prediction: self.rng.gen_range(YIELD_RANGE_KG.0..=YIELD_RANGE_KG.1),
        }
    }

    /// Generate `size` records in memory
    pub fn batch(&mut self, size: usize) -> Vec<NewCropRecord> {
        (0..size).map(|_| self.next_record()).collect()
    }
}
