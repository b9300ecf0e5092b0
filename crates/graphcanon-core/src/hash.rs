//! Folds an event stream into a content digest.
//!
//! Only attribute names and scalar values contribute bytes; structural events
//! are skipped. Two graphs that stream the same attributes and values in the
//! same order therefore share a digest, independent of key insertion order.

use crate::error::StreamError;
use crate::event::{EventSink, StreamEvent};
use sha2::{Digest as Sha2Digest, Sha256};

/// Event sink accumulating a streaming hash.
///
/// The accumulator is never finalized in place: [`HashCollector::digest`]
/// hashes a snapshot, so the collector may keep receiving events afterwards.
#[derive(Debug, Clone, Default)]
pub struct HashCollector<D = Sha256> {
    hasher: D,
}

impl HashCollector<Sha256> {
    /// Creates a SHA-256 collector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: Sha2Digest + Clone> HashCollector<D> {
    /// Creates a collector around an existing accumulator.
    pub fn with_hasher(hasher: D) -> Self {
        Self { hasher }
    }

    /// Raw digest bytes of everything accumulated so far.
    pub fn digest_bytes(&self) -> Vec<u8> {
        self.hasher.clone().finalize().to_vec()
    }

    /// Base-58 (Bitcoin alphabet) rendering of [`HashCollector::digest_bytes`].
    pub fn digest(&self) -> String {
        bs58::encode(self.digest_bytes()).into_string()
    }
}

impl<D: Sha2Digest + Clone> EventSink for HashCollector<D> {
    fn append(&mut self, event: &StreamEvent) -> Result<(), StreamError> {
        match event {
            StreamEvent::Attribute { name, .. } => self.hasher.update(name.as_bytes()),
            StreamEvent::Value { value, .. } => {
                self.hasher.update(value.as_value().to_string().as_bytes())
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streamer::stream;
    use crate::value::GraphValue;
    use chrono::{TimeZone, Utc};

    fn digest_of(graph: &GraphValue) -> String {
        let mut collector = HashCollector::new();
        stream(graph, &mut collector).unwrap();
        collector.digest()
    }

    #[test]
    fn empty_collector_digest() {
        let collector = HashCollector::new();
        assert_eq!(
            hex::encode(collector.digest_bytes()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            collector.digest(),
            "GKot5hBsd81kMupNCXHaqbhv3huEbxAFMLnpcX2hniwn"
        );
    }

    #[test]
    fn feeds_names_and_natural_text() {
        let ts = Utc.timestamp_millis_opt(444).unwrap();
        let graph = GraphValue::object([
            ("x", GraphValue::object([("r", GraphValue::from(1)), ("z", GraphValue::from("u"))])),
            ("y", GraphValue::Object(Default::default())),
            ("z", GraphValue::array(Vec::<GraphValue>::new())),
            ("date", GraphValue::Timestamp(ts)),
        ]);

        let mut expected = Sha256::new();
        for part in ["date", "1970-01-01T00:00:00.444Z", "x", "r", "1", "z", "u", "y", "z"] {
            expected.update(part.as_bytes());
        }
        let expected = bs58::encode(expected.finalize()).into_string();

        assert_eq!(digest_of(&graph), expected);
    }

    #[test]
    fn structural_events_do_not_contribute() {
        let nested = GraphValue::object([("a", GraphValue::array([GraphValue::array([1])]))]);
        let flat = GraphValue::object([("a", 1)]);
        assert_eq!(digest_of(&nested), digest_of(&flat));
    }

    #[test]
    fn digest_is_a_snapshot() {
        let mut collector = HashCollector::new();
        stream(&GraphValue::from("first"), &mut collector).unwrap();
        let early = collector.digest();
        assert_eq!(early, collector.digest());
        stream(&GraphValue::from("second"), &mut collector).unwrap();
        assert_ne!(early, collector.digest());
    }

    #[test]
    fn works_with_other_sha2_digests() {
        let mut collector = HashCollector::with_hasher(sha2::Sha512::new());
        stream(&GraphValue::from("x"), &mut collector).unwrap();
        assert_eq!(collector.digest_bytes().len(), 64);
    }
}
