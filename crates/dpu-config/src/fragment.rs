//! Adapts single configuration values for storage in a registry.
//!
//! Absence passes straight through in both directions, and codec failures
//! are logged and turned into absence. Nothing here returns an error.

use crate::codec::{ConfigCodec, ConfigType};
use tracing::warn;

/// Null-safe wrapper around a [`ConfigCodec`] for one fragment value.
pub struct ConfigFragment;

impl ConfigFragment {
    /// Serialize an optional value. `None` in gives `None` out.
    pub fn serialize<T: ConfigType>(codec: &ConfigCodec, value: Option<&T>) -> Option<String> {
        let value = value?;
        match codec.serialize(value) {
            Ok(blob) => Some(blob),
            Err(e) => {
                warn!("Failed to serialize fragment {}: {}", codec.active_tag::<T>(), e);
                None
            }
        }
    }

    /// Deserialize an optional blob. `None` in gives `None` out.
    pub fn deserialize<T: ConfigType>(codec: &ConfigCodec, blob: Option<&str>) -> Option<T> {
        let blob = blob?;
        match codec.deserialize(blob) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(
                    "Failed to deserialize fragment as {}: {}",
                    codec.active_tag::<T>(),
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct AddonConfig {
        enabled: bool,
    }

    impl ConfigType for AddonConfig {}

    #[derive(Debug, Serialize, Deserialize)]
    struct Unencodable {
        keys: HashMap<Vec<u8>, u8>,
    }

    impl ConfigType for Unencodable {}

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Envelope<T> {
        inner: T,
    }

    impl<T> ConfigType for Envelope<T> where T: Serialize + serde::de::DeserializeOwned + 'static {}

    #[test]
    fn test_absent_serializes_to_absent() {
        let codec = ConfigCodec::new();
        assert_eq!(ConfigFragment::serialize::<AddonConfig>(&codec, None), None);
    }

    #[test]
    fn test_absent_deserializes_to_absent() {
        let codec = ConfigCodec::new();
        assert_eq!(ConfigFragment::deserialize::<AddonConfig>(&codec, None), None);
    }

    #[test]
    fn test_present_roundtrip() {
        let codec = ConfigCodec::new();
        let value = AddonConfig { enabled: true };
        let blob = ConfigFragment::serialize(&codec, Some(&value));
        assert!(blob.is_some());
        let restored: Option<AddonConfig> = ConfigFragment::deserialize(&codec, blob.as_deref());
        assert_eq!(restored, Some(value));
    }

    #[test]
    fn test_serialize_failure_becomes_absent() {
        let codec = ConfigCodec::new();
        let mut keys = HashMap::new();
        keys.insert(vec![1, 2], 3);
        assert_eq!(ConfigFragment::serialize(&codec, Some(&Unencodable { keys })), None);
    }

    #[test]
    fn test_deserialize_failure_becomes_absent() {
        let codec = ConfigCodec::new();
        let restored = ConfigFragment::deserialize::<AddonConfig>(&codec, Some("{ broken"));
        assert_eq!(restored, None);
    }

    #[test]
    fn test_generic_type_roundtrip() {
        let codec = ConfigCodec::new();
        let value = Envelope {
            inner: AddonConfig { enabled: false },
        };
        let blob = ConfigFragment::serialize(&codec, Some(&value)).unwrap();
        assert!(blob.contains(".Envelope\""));
        assert_eq!(
            Envelope::<AddonConfig>::type_tag(),
            Envelope::<u32>::type_tag()
        );

        let restored: Option<Envelope<AddonConfig>> =
            ConfigFragment::deserialize(&codec, Some(&blob));
        assert_eq!(restored, Some(value));
    }
}
