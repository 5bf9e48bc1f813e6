use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegtraceError};

/// Globally unique identifier of one trace segment. Opaque to the model:
/// segments never inspect it, exporters and propagation carry it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentId(String);

impl SegmentId {
    /// Mint a fresh id for a segment started in this process.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Accept an id received from elsewhere (a propagated header, storage).
    /// The only requirement is non-emptiness.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SegtraceError::Parse(format!(
                "empty segment id: {input:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_unique_ids() {
        let a = SegmentId::generate();
        let b = SegmentId::generate();
        assert_eq!(a.as_str().len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn parses_opaque_ids() {
        let id = SegmentId::parse("seg-1").unwrap();
        assert_eq!(id.as_str(), "seg-1");
        assert_eq!(id.to_string(), "seg-1");
    }

    #[test]
    fn rejects_empty_ids() {
        assert!(SegmentId::parse("").is_err());
        assert!(SegmentId::parse("   ").is_err());
    }
}
