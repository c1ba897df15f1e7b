//! Validation utilities for the Crop Management Portal

use crate::models::NewCropRecord;
use validator::Validate;

/// Bind parameters written per crop row in a multi-row insert
pub const BINDS_PER_ROW: usize = 6;

/// PostgreSQL caps a single statement at 65,535 bind parameters
pub const MAX_BIND_PARAMETERS: usize = 65_535;

/// Largest batch that still fits in one insert statement
pub const MAX_BATCH_ROWS: u32 = (MAX_BIND_PARAMETERS / BINDS_PER_ROW) as u32;

// ============================================================================
// Record Validations
// ============================================================================

/// Validate a manual entry, returning the first offending field and message
pub fn validate_new_record(record: &NewCropRecord) -> Result<(), (String, String)> {
    let Err(errors) = record.validate() else {
        return Ok(());
    };

    let first = errors
        .field_errors()
        .into_iter()
        .next()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            (field.to_string(), message)
        })
        .unwrap_or_else(|| ("record".to_string(), errors.to_string()));

    Err(first)
}

// ============================================================================
// Bulk Insert Validations
// ============================================================================

/// Validate requested bulk-insert size
pub fn validate_bulk_total(total_records: u64, max_records: u64) -> Result<(), &'static str> {
    if total_records == 0 {
        return Err("Number of records must be greater than 0");
    }
    if total_records > max_records {
        return Err("Number of records exceeds the bulk insert limit");
    }
    Ok(())
}

/// Validate batch size fits in a single insert statement
pub fn validate_batch_size(batch_size: u32) -> Result<(), &'static str> {
    if batch_size == 0 {
        return Err("Batch size must be greater than 0");
    }
    if batch_size > MAX_BATCH_ROWS {
        return Err("Batch size exceeds the statement bind-parameter limit");
    }
    Ok(())
}
