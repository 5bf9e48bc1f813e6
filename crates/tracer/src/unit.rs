use chrono::{DateTime, Utc};
use segtrace_core::config::Config;
use segtrace_core::ids::SegmentId;
use segtrace_core::model::refs::SegmentRef;
use segtrace_core::model::segment::TraceSegment;
use segtrace_core::model::span::SpanRecord;
use segtrace_core::{Result, SegtraceError};

#[derive(Debug)]
struct ActiveSpan {
    span_id: u32,
    parent_span_id: Option<u32>,
    operation: String,
    start_ts: DateTime<Utc>,
    tags: Vec<(String, String)>,
}

/// Single-owner recorder for one segment. Tracks the stack of active spans
/// and archives each into the segment as it finishes, so the segment's span
/// sequence is completion-ordered. Upholds the caller contracts the segment
/// itself does not check: spans are archived once, after they end, and the
/// segment is finished exactly once.
#[derive(Debug)]
pub struct UnitOfWork {
    config: Config,
    segment: TraceSegment,
    active: Vec<ActiveSpan>,
    next_span_id: u32,
}

impl UnitOfWork {
    pub(crate) fn open(config: Config) -> Self {
        let id = SegmentId::generate();
        tracing::debug!(segment = %id, service = %config.service, "segment opened");
        Self {
            config,
            segment: TraceSegment::new(id),
            active: Vec::new(),
            next_span_id: 0,
        }
    }

    /// Record an upstream cause of this unit of work. Call once per distinct
    /// cause, in the order causes become known; the first becomes the
    /// segment's primary parent.
    pub fn link_parent(&mut self, parent: SegmentRef) {
        self.segment.link(parent);
    }

    /// Start a span for `operation`. Its parent is the span that was active
    /// when it started; the root span has none. Returns the intra-segment
    /// span id.
    pub fn start_span(&mut self, operation: impl Into<String>) -> u32 {
        let span_id = self.next_span_id;
        self.next_span_id += 1;
        let parent_span_id = self.active.last().map(|s| s.span_id);
        self.active.push(ActiveSpan {
            span_id,
            parent_span_id,
            operation: operation.into(),
            start_ts: Utc::now(),
            tags: Vec::new(),
        });
        span_id
    }

    /// Attach a tag to the innermost active span.
    pub fn tag(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let span = self
            .active
            .last_mut()
            .ok_or_else(|| SegtraceError::Tracer("no active span to tag".to_string()))?;
        span.tags.push((key.into(), value.into()));
        Ok(())
    }

    /// Finish the innermost active span: stamp its end time and archive it
    /// into the segment.
    pub fn finish_span(&mut self) -> Result<()> {
        let span = self
            .active
            .pop()
            .ok_or_else(|| SegtraceError::Tracer("no active span to finish".to_string()))?;
        self.segment.archive(seal(span, Utc::now()));
        Ok(())
    }

    /// Descriptor of this segment for propagation to a downstream callee,
    /// which links it as a parent of its own segment.
    pub fn downstream_ref(&self) -> SegmentRef {
        SegmentRef {
            segment_id: self.segment.id().clone(),
            service: self.config.service.clone(),
            peer: self.config.peer.clone(),
        }
    }

    pub fn segment_id(&self) -> &SegmentId {
        self.segment.id()
    }

    pub fn active_spans(&self) -> usize {
        self.active.len()
    }

    /// Seal the segment and hand it back for export. Spans still open are
    /// finished innermost-first with the current time. Consuming `self`
    /// transfers ownership of the now read-only segment to the caller.
    pub fn end(mut self) -> TraceSegment {
        let end_ts = Utc::now();
        while let Some(span) = self.active.pop() {
            self.segment.archive(seal(span, end_ts));
        }
        self.segment.finish();
        tracing::debug!(
            segment = %self.segment.id(),
            spans = self.segment.spans().len(),
            "segment finished"
        );
        self.segment
    }
}

fn seal(span: ActiveSpan, end_ts: DateTime<Utc>) -> SpanRecord {
    let tags: serde_json::Map<String, serde_json::Value> = span
        .tags
        .into_iter()
        .map(|(k, v)| (k, serde_json::Value::String(v)))
        .collect();
    let tags_json = serde_json::to_string(&tags).unwrap_or_else(|_| "{}".to_string());

    SpanRecord {
        span_id: span.span_id,
        parent_span_id: span.parent_span_id,
        operation: span.operation,
        start_ts: span.start_ts,
        end_ts,
        tags_json,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> UnitOfWork {
        UnitOfWork::open(Config {
            service: "orders".to_string(),
            peer: Some("10.0.0.7:9090".to_string()),
        })
    }

    #[test]
    fn spans_archive_in_completion_order() {
        let mut uow = unit();
        let outer = uow.start_span("GET /v1/orders");
        let inner = uow.start_span("cache.get redis");
        uow.finish_span().unwrap();
        uow.finish_span().unwrap();
        let segment = uow.end();

        let spans = segment.spans();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].span_id, inner);
        assert_eq!(spans[1].span_id, outer);
        assert_eq!(spans[0].parent_span_id, Some(outer));
        assert_eq!(spans[1].parent_span_id, None);
    }

    #[test]
    fn finish_span_without_active_is_an_error() {
        let mut uow = unit();
        assert!(matches!(
            uow.finish_span(),
            Err(SegtraceError::Tracer(_))
        ));
    }

    #[test]
    fn tags_land_on_the_innermost_span() {
        let mut uow = unit();
        uow.start_span("cache.get redis");
        uow.tag("peer", "redis:6379").unwrap();
        uow.finish_span().unwrap();
        let segment = uow.end();

        let tags = segment.spans()[0].tags().unwrap();
        assert_eq!(tags.get("peer").map(String::as_str), Some("redis:6379"));
    }

    #[test]
    fn tag_without_active_span_is_an_error() {
        let mut uow = unit();
        assert!(uow.tag("k", "v").is_err());
    }

    #[test]
    fn end_closes_remaining_spans_innermost_first() {
        let mut uow = unit();
        let outer = uow.start_span("consume batch");
        let inner = uow.start_span("flush");
        let segment = uow.end();

        let spans = segment.spans();
        assert_eq!(spans[0].span_id, inner);
        assert_eq!(spans[1].span_id, outer);
        assert!(segment.end_ts().is_some());
        for span in spans {
            assert!(span.end_ts <= segment.end_ts().unwrap());
        }
    }

    #[test]
    fn downstream_ref_carries_process_identity() {
        let uow = unit();
        let r = uow.downstream_ref();
        assert_eq!(&r.segment_id, uow.segment_id());
        assert_eq!(r.service, "orders");
        assert_eq!(r.peer.as_deref(), Some("10.0.0.7:9090"));
    }
}
