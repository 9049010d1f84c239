//! Serde adapter for `Duration` fields in config/monitoring structs, stored
//! as whole seconds rather than serde's default nanosecond-precision struct.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// `#[serde(with = "duration_serde")]` — round-trips a [`Duration`] as a
/// plain `u64` of seconds. Sub-second precision is not preserved; every
/// caller in this crate (snapshot intervals, pool timeouts) only ever needs
/// whole-second granularity.
pub mod duration_serde {
    use super::*;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct SnapshotConfig {
        #[serde(with = "duration_serde")]
        interval: Duration,
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_duration_serde_roundtrip() {
        let original = SnapshotConfig { interval: Duration::from_secs(60) };
        let json = serde_json::to_string(&original).expect("serialization should succeed");
        assert!(json.contains("60"));
        let restored: SnapshotConfig =
            serde_json::from_str(&json).expect("deserialization should succeed");
        assert_eq!(original, restored);
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_duration_serde_zero() {
        let original = SnapshotConfig { interval: Duration::from_secs(0) };
        let json = serde_json::to_string(&original).expect("serialization should succeed");
        let restored: SnapshotConfig =
            serde_json::from_str(&json).expect("deserialization should succeed");
        assert_eq!(original.interval, restored.interval);
    }
}
