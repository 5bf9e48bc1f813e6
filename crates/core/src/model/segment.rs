use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::refs::SegmentRef;
use super::span::SpanRecord;
use crate::ids::SegmentId;

/// One segment of a distributed trace: everything recorded within a single
/// logical execution context before export. A full trace is stitched from
/// many segments via their parent refs.
///
/// A segment is owned by exactly one unit of work for its mutating lifetime;
/// `link`, `archive` and `finish` carry no internal synchronization and must
/// not be called concurrently. `id` reads an immutable field and is the one
/// accessor safe to use from another thread while the segment is in flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceSegment {
    id: SegmentId,
    start_ts: DateTime<Utc>,
    end_ts: Option<DateTime<Utc>>,
    primary_ref: Option<SegmentRef>,
    refs: Vec<SegmentRef>,
    spans: Vec<SpanRecord>,
}

impl TraceSegment {
    /// Open a segment under a pre-generated id, stamping the start time from
    /// the wall clock.
    pub fn new(id: SegmentId) -> Self {
        Self {
            id,
            start_ts: Utc::now(),
            end_ts: None,
            primary_ref: None,
            refs: Vec::new(),
            spans: Vec::new(),
        }
    }

    /// Record a causal parent. The first ref becomes the primary parent; any
    /// later refs (batch fan-in) are appended in call order. Refs are never
    /// removed or replaced, so the common single-parent case fills only the
    /// primary slot and the overflow vector stays empty.
    pub fn link(&mut self, parent: SegmentRef) {
        if self.primary_ref.is_none() {
            self.primary_ref = Some(parent);
        } else {
            self.refs.push(parent);
        }
    }

    /// Append a finished span. Intended for the span controller: the caller
    /// asserts the span has already ended and archives it exactly once, in
    /// completion order. Nothing here rejects duplicates or a segment that
    /// has already finished.
    pub fn archive(&mut self, span: SpanRecord) {
        self.spans.push(span);
    }

    /// Stamp the end time, sealing the segment for hand-off to an exporter.
    /// A repeated call overwrites the stamp with a later one; callers finish
    /// a segment exactly once.
    pub fn finish(&mut self) {
        self.end_ts = Some(Utc::now());
    }

    pub fn id(&self) -> &SegmentId {
        &self.id
    }

    pub fn start_ts(&self) -> DateTime<Utc> {
        self.start_ts
    }

    /// `None` until `finish` has been called.
    pub fn end_ts(&self) -> Option<DateTime<Utc>> {
        self.end_ts
    }

    pub fn primary_ref(&self) -> Option<&SegmentRef> {
        self.primary_ref.as_ref()
    }

    /// Parent refs beyond the primary, in the order they were linked.
    pub fn refs(&self) -> &[SegmentRef] {
        &self.refs
    }

    /// Finished spans in completion order, which is not necessarily start
    /// order.
    pub fn spans(&self) -> &[SpanRecord] {
        &self.spans
    }
}
