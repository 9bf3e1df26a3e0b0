//! TWAP request validation.

use std::time::Duration;

use crate::domain::execution_tactics::value_objects::{TwapFields, TwapRequest};
use crate::domain::shared::ValidationError;
use crate::domain::shared::validation::{
    validate_price, validate_quantity, validate_side, validate_symbol,
};

/// Largest accepted chunk count. The plan and the report each hold one entry
/// per chunk.
pub const MAX_CHUNK_COUNT: u32 = 10_000;

/// Validate raw TWAP parameters.
///
/// Checks run in a fixed order and stop at the first failure: symbol, side,
/// total quantity, limit price, chunk count, interval. A dry run is held to
/// the same rules as a live run.
///
/// # Errors
///
/// Returns the `ValidationError` of the first failing check.
pub fn validate_twap(fields: &TwapFields) -> Result<TwapRequest, ValidationError> {
    let symbol = validate_symbol(&fields.symbol)?;
    let side = validate_side(&fields.side)?;
    let total_quantity = validate_quantity(fields.total_quantity)?;
    let limit_price = validate_price(fields.limit_price)?;

    if fields.chunk_count <= 0 {
        return Err(ValidationError::NonPositiveChunkCount {
            chunk_count: fields.chunk_count,
        });
    }
    let chunk_count = u32::try_from(fields.chunk_count)
        .ok()
        .filter(|&n| n <= MAX_CHUNK_COUNT)
        .ok_or(ValidationError::ChunkCountTooLarge {
            chunk_count: fields.chunk_count,
            max: MAX_CHUNK_COUNT,
        })?;

    let interval_secs =
        u64::try_from(fields.interval_seconds).map_err(|_| ValidationError::NegativeInterval {
            interval_seconds: fields.interval_seconds,
        })?;

    Ok(TwapRequest::new(
        symbol,
        side,
        total_quantity,
        limit_price,
        chunk_count,
        Duration::from_secs(interval_secs),
        fields.dry_run,
    ))
}
