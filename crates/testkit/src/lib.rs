use chrono::{Duration, TimeZone, Utc};
use segtrace_core::ids::SegmentId;
use segtrace_core::model::refs::SegmentRef;
use segtrace_core::model::segment::TraceSegment;
use segtrace_core::model::span::SpanRecord;

pub fn sample_ref(segment_id: &str, service: &str) -> SegmentRef {
    SegmentRef {
        segment_id: SegmentId::parse(segment_id).unwrap(),
        service: service.to_string(),
        peer: Some("10.0.0.7:9090".to_string()),
    }
}

pub fn sample_spans() -> Vec<SpanRecord> {
    let base = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    vec![
        SpanRecord {
            span_id: 1,
            parent_span_id: Some(0),
            operation: "cache.get redis".to_string(),
            start_ts: base + Duration::milliseconds(900),
            end_ts: base + Duration::milliseconds(1600),
            tags_json: "{\"peer\":\"redis:6379\"}".to_string(),
        },
        SpanRecord {
            span_id: 0,
            parent_span_id: None,
            operation: "GET /v1/orders".to_string(),
            start_ts: base,
            end_ts: base + Duration::milliseconds(1800),
            tags_json: "{}".to_string(),
        },
    ]
}

/// An open segment with one linked parent and the sample spans archived in
/// completion order. Not yet finished, so tests control the end stamp.
pub fn sample_segment(id: &str) -> TraceSegment {
    let mut segment = TraceSegment::new(SegmentId::parse(id).unwrap());
    segment.link(sample_ref("parent-seg", "gateway"));
    for span in sample_spans() {
        segment.archive(span);
    }
    segment
}
