use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Result, SegtraceError};

/// Wire representation of a model timestamp: milliseconds since the Unix
/// epoch. Segments stamp wall-clock time so timestamps from different hosts
/// share an epoch; clock skew between hosts is not corrected here.
pub fn epoch_ms(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

pub fn from_epoch_ms(ms: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| SegtraceError::Parse(format!("epoch millis out of range: {ms}")))
}
