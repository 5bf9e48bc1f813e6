use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SegtraceError};

/// One finished unit of work within a segment. Span ids are sequential
/// within their segment; `parent_span_id` is `None` for the segment's root
/// span. Records are built by the span controller and handed to the segment
/// only after `end_ts` has been stamped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpanRecord {
    pub span_id: u32,
    pub parent_span_id: Option<u32>,
    pub operation: String,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    pub tags_json: String,
}

impl SpanRecord {
    pub fn duration_ms(&self) -> i64 {
        (self.end_ts - self.start_ts).num_milliseconds().max(0)
    }

    pub fn tags(&self) -> Result<BTreeMap<String, String>> {
        serde_json::from_str(&self.tags_json).map_err(|e| {
            SegtraceError::Parse(format!("bad tags on span {}: {e}", self.span_id))
        })
    }
}
