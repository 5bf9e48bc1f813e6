use segtrace_core::config::Config;
use segtrace_tracer::Tracer;
use testkit::{sample_ref, sample_segment, sample_spans};

#[test]
fn batch_fan_in_records_every_upstream_cause() {
    let tracer = Tracer::new(Config {
        service: "batcher".to_string(),
        peer: None,
    });

    let mut uow = tracer.begin();
    uow.link_parent(sample_ref("up-1", "api"));
    uow.link_parent(sample_ref("up-2", "api"));
    uow.link_parent(sample_ref("up-3", "worker"));
    uow.start_span("consume batch");
    uow.finish_span().unwrap();
    let segment = uow.end();

    assert_eq!(segment.primary_ref(), Some(&sample_ref("up-1", "api")));
    assert_eq!(
        segment.refs(),
        [sample_ref("up-2", "api"), sample_ref("up-3", "worker")]
    );
    assert_eq!(segment.spans().len(), 1);
    assert!(segment.end_ts().unwrap() >= segment.start_ts());
}

#[test]
fn downstream_ref_links_child_to_parent_segment() {
    let tracer = Tracer::new(Config {
        service: "api".to_string(),
        peer: Some("10.0.0.7:9090".to_string()),
    });

    let parent_uow = tracer.begin();
    let propagated = parent_uow.downstream_ref();

    let mut child_uow = tracer.begin();
    child_uow.link_parent(propagated.clone());
    let child = child_uow.end();

    assert_eq!(child.primary_ref(), Some(&propagated));
    assert_eq!(&propagated.segment_id, parent_uow.segment_id());
}

#[test]
fn sample_segment_matches_export_expectations() {
    let mut segment = sample_segment("seg-export");
    segment.finish();

    assert_eq!(segment.id().as_str(), "seg-export");
    assert_eq!(segment.spans(), sample_spans());
    assert_eq!(
        segment.primary_ref().map(|r| r.service.as_str()),
        Some("gateway")
    );
    assert!(segment.refs().is_empty());
    assert!(segment.end_ts().is_some());
}
