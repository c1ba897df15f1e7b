//! Connection provisioning for the crop store
//!
//! Each operation borrows one pooled connection for its whole duration and
//! gives it back when the handle is dropped, whichever way the operation
//! exits.

use sqlx::{
    pool::PoolConnection,
    postgres::{PgPool, PgPoolOptions},
    Postgres,
};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

const CREATE_CROPS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS crops (
        id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        crop_name TEXT NOT NULL,
        planting_date DATE NOT NULL,
        harvest_date DATE NOT NULL,
        growth_stage TEXT NOT NULL,
        pest_control_measures TEXT NOT NULL,
        yield_prediction INTEGER NOT NULL
    )
"#;

/// Hands out exclusively-owned connections to the crop store
#[derive(Clone)]
pub struct ConnectionProvisioner {
    pool: PgPool,
}

impl ConnectionProvisioner {
    /// Build a provisioner from explicit configuration.
    ///
    /// No connection is opened here, so an unreachable store does not stop
    /// the server from starting; the first operation reports it instead.
    pub fn new(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy_with(config.connect_options());

        Self { pool }
    }

    /// Acquire a connection for one operation
    pub async fn connect(&self) -> AppResult<PoolConnection<Postgres>> {
        self.pool.acquire().await.map_err(|e| {
            tracing::error!(error = %e, "Error connecting to database");
            AppError::Connectivity(e)
        })
    }

    /// Create the crops table if it does not exist yet
    pub async fn ensure_schema(&self) -> AppResult<()> {
        let mut conn = self.connect().await?;
        sqlx::query(CREATE_CROPS_TABLE).execute(&mut *conn).await?;
        tracing::info!("Crops table is ready");
        Ok(())
    }

    /// Whether the store currently answers a trivial query
    pub async fn ping(&self) -> bool {
        match self.connect().await {
            Ok(mut conn) => sqlx::query("SELECT 1").execute(&mut *conn).await.is_ok(),
            Err(_) => false,
        }
    }
}
