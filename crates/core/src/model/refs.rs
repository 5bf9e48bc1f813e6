use serde::{Deserialize, Serialize};

use crate::ids::SegmentId;

/// Locator for a parent segment: its id plus where it was recorded. Built by
/// the propagation layer when an incoming call is deserialized, or by a
/// batch fan-in source once per upstream cause. The child segment only holds
/// the descriptor, never the parent itself, and does not check that the
/// referenced segment exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SegmentRef {
    pub segment_id: SegmentId,
    pub service: String,
    pub peer: Option<String>,
}
