//! Crop record service for recording and browsing crop observations

use chrono::{Local, NaiveDate};
use crop_shared::{
    validate_bulk_total, validate_new_record, BulkInsertSummary, BulkProgress, CropRecord,
    NewCropRecord, DEFAULT_BATCH_SIZE, MAX_BATCH_ROWS,
};
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};

use super::batch::BatchPlan;
use super::changes::ChangeNotifier;
use super::synthetic::SyntheticCropGenerator;
use crate::db::ConnectionProvisioner;
use crate::error::{AppError, AppResult};

const INSERT_CROPS_PREFIX: &str = "INSERT INTO crops (crop_name, planting_date, harvest_date, \
     growth_stage, pest_control_measures, yield_prediction) ";

/// Default upper bound on a single bulk insert request
pub const DEFAULT_MAX_BULK_RECORDS: u64 = 1_000_000;

/// Crop record service
#[derive(Clone)]
pub struct CropRecordService {
    db: ConnectionProvisioner,
    notifier: ChangeNotifier,
    batch_size: u32,
    max_bulk_records: u64,
}

/// Database row for a crop record
#[derive(Debug, Clone, sqlx::FromRow)]
struct CropRecordRow {
    pub id: i64,
    pub crop_name: String,
    pub planting_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub growth_stage: String,
    pub pest_control_measures: String,
    pub yield_prediction: i32,
}

impl From<CropRecordRow> for CropRecord {
    fn from(row: CropRecordRow) -> Self {
        Self {
            id: row.id,
            crop_name: row.crop_name,
            planting_date: row.planting_date,
            harvest_date: row.harvest_date,
            growth_stage: row.growth_stage,
            pest_control_measures: row.pest_control_measures,
            yield_prediction: row.yield_prediction,
        }
    }
}

impl CropRecordService {
    /// Create a new CropRecordService instance
    pub fn new(db: ConnectionProvisioner, notifier: ChangeNotifier) -> Self {
        Self {
            db,
            notifier,
            batch_size: DEFAULT_BATCH_SIZE,
            max_bulk_records: DEFAULT_MAX_BULK_RECORDS,
        }
    }

    /// Override the number of rows committed per bulk batch.
    ///
    /// Clamped to `1..=MAX_BATCH_ROWS` so a batch always fits in one statement.
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        let clamped = batch_size.clamp(1, MAX_BATCH_ROWS);
        if clamped != batch_size {
            tracing::warn!(
                requested = batch_size,
                batch_size = clamped,
                "Batch size out of range, clamped"
            );
        }
        self.batch_size = clamped;
        self
    }

    /// Override the largest accepted bulk insert
    pub fn with_max_bulk_records(mut self, max_bulk_records: u64) -> Self {
        self.max_bulk_records = max_bulk_records;
        self
    }

    /// Record a single crop observation
    pub async fn insert_one(&self, input: NewCropRecord) -> AppResult<CropRecord> {
        validate_new_record(&input)
            .map_err(|(field, message)| AppError::validation(field, message))?;

        let mut conn = self.db.connect().await?;

        let row = sqlx::query_as::<_, CropRecordRow>(
            r#"
            INSERT INTO crops (crop_name, planting_date, harvest_date, growth_stage,
                               pest_control_measures, yield_prediction)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, crop_name, planting_date, harvest_date, growth_stage,
                      pest_control_measures, yield_prediction
            "#,
        )
        .bind(input.crop_name.as_str())
        .bind(input.planting_date)
        .bind(input.harvest_date)
        .bind(input.growth_stage.as_str())
        .bind(input.pest_control_measures.as_str())
        .bind(input.yield_prediction)
        .fetch_one(&mut *conn)
        .await?;

        tracing::info!(id = row.id, crop = %row.crop_name, "Crop record inserted");
        self.notifier.notify(1);

        Ok(CropRecord::from(row))
    }

    /// Insert `total_records` synthetic observations, dated relative to today
    pub async fn insert_bulk<F>(
        &self,
        total_records: u64,
        on_progress: F,
    ) -> AppResult<BulkInsertSummary>
    where
        F: FnMut(BulkProgress),
    {
        let generator = SyntheticCropGenerator::from_entropy(Local::now().date_naive());
        self.insert_bulk_with(total_records, generator, on_progress).await
    }

    /// Insert `total_records` rows drawn from `generator`.
    ///
    /// Each batch is generated, inserted with one statement and committed
    /// before the next one is generated. After every commit the data version
    /// moves and the cumulative progress is published, so pollers see the run
    /// advance. A failing batch stops the run; batches committed before it
    /// stay in the store.
    pub async fn insert_bulk_with<R, F>(
        &self,
        total_records: u64,
        mut generator: SyntheticCropGenerator<R>,
        mut on_progress: F,
    ) -> AppResult<BulkInsertSummary>
    where
        R: rand::Rng,
        F: FnMut(BulkProgress),
    {
        validate_bulk_total(total_records, self.max_bulk_records)
            .map_err(|msg| AppError::validation("total_records", msg))?;

        let plan = BatchPlan::new(total_records, u64::from(self.batch_size));
        tracing::info!(
            total_records,
            batches = plan.batch_count(),
            "Starting bulk insert"
        );

        // One connection for the whole run
        let mut conn = self.db.connect().await?;
        let mut inserted = 0u64;
        let mut batches = 0u64;
        self.notifier.publish_progress(BulkProgress {
            batch: 0,
            inserted,
            total: total_records,
        });

        for batch in plan {
            let rows = generator.batch(batch.size as usize);

            if let Err(source) = insert_batch(&mut conn, &rows).await {
                tracing::error!(
                    error = %source,
                    inserted,
                    batch = batch.index + 1,
                    "Bulk insert batch failed"
                );
                return Err(AppError::BulkInsertAborted { inserted, source });
            }

            inserted += batch.size;
            batches += 1;
            tracing::info!(inserted, total_records, "{} records inserted...", inserted);

            let progress = BulkProgress {
                batch: batches,
                inserted,
                total: total_records,
            };
            self.notifier.notify(batch.size);
            self.notifier.publish_progress(progress);
            on_progress(progress);
        }

        tracing::info!(inserted, "{} records inserted successfully", inserted);

        Ok(BulkInsertSummary {
            total_inserted: inserted,
            batches,
        })
    }

    /// Get all crop records in insertion order
    pub async fn fetch_all(&self) -> AppResult<Vec<CropRecord>> {
        let mut conn = self.db.connect().await?;

        let rows = sqlx::query_as::<_, CropRecordRow>(
            r#"
            SELECT id, crop_name, planting_date, harvest_date, growth_stage,
                   pest_control_measures, yield_prediction
            FROM crops
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(CropRecord::from).collect())
    }

    /// Get the first `limit` crop records in insertion order
    pub async fn fetch_first(&self, limit: u32) -> AppResult<Vec<CropRecord>> {
        let mut conn = self.db.connect().await?;

        let rows = sqlx::query_as::<_, CropRecordRow>(
            r#"
            SELECT id, crop_name, planting_date, harvest_date, growth_stage,
                   pest_control_measures, yield_prediction
            FROM crops
            ORDER BY id ASC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(CropRecord::from).collect())
    }
}

/// Insert one batch with a single multi-row statement and commit it
async fn insert_batch(
    conn: &mut PgConnection,
    rows: &[NewCropRecord],
) -> Result<(), sqlx::Error> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut tx = conn.begin().await?;

    let mut builder = QueryBuilder::<Postgres>::new(INSERT_CROPS_PREFIX);
    builder.push_values(rows, |mut b, row| {
        b.push_bind(row.crop_name.as_str())
            .push_bind(row.planting_date)
            .push_bind(row.harvest_date)
            .push_bind(row.growth_stage.as_str())
            .push_bind(row.pest_control_measures.as_str())
            .push_bind(row.yield_prediction);
    });
    builder.build().execute(&mut *tx).await?;

    tx.commit().await
}
