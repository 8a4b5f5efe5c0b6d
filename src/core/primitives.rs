use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts epoch milliseconds back to a timestamp, rounding to the nearest
/// millisecond. Out-of-range values saturate to chrono's representable bounds.
#[must_use]
pub fn unix_millis_to_datetime(millis: f64) -> DateTime<Utc> {
    if millis.is_nan() {
        return DateTime::<Utc>::UNIX_EPOCH;
    }
    let rounded = millis.round();
    let clamped = if rounded >= i64::MAX as f64 {
        i64::MAX
    } else if rounded <= i64::MIN as f64 {
        i64::MIN
    } else {
        rounded as i64
    };
    DateTime::<Utc>::from_timestamp_millis(clamped).unwrap_or(if clamped > 0 {
        DateTime::<Utc>::MAX_UTC
    } else {
        DateTime::<Utc>::MIN_UTC
    })
}
