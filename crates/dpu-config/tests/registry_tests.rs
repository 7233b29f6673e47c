//! Integration tests for the public configuration API.
//!
//! These cover the full path a plugin takes: build fragments, bundle them,
//! persist the blob, and read it back, possibly under a renamed type.

use dpu_config::{
    can_contain_tag, ConfigCodec, ConfigError, ConfigType, Configurable, DpuConfiguration,
    FragmentRegistry, MasterConfigObject, TypeDescriptor, Validate,
};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

mod v1 {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    pub struct FilesConfig {
        pub directory: String,
        pub skip_on_error: bool,
    }

    impl ConfigType for FilesConfig {}
}

mod v2 {
    use super::*;

    /// Same fields as `v1::FilesConfig`, moved and renamed.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    pub struct FileSourceConfig {
        pub directory: String,
        pub skip_on_error: bool,
    }

    impl ConfigType for FileSourceConfig {}

    impl Validate for FileSourceConfig {
        fn validate(&self) -> dpu_config::Result<()> {
            if self.directory.is_empty() {
                return Err(ConfigError::validation("directory", "must not be empty"));
            }
            Ok(())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GraphAddon {
    graph_uri: String,
}

impl ConfigType for GraphAddon {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::nested("rdf::addon", &["GraphAddon"], "Config")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CounterAddon {
    limit: u64,
}

impl ConfigType for CounterAddon {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::nested("rdf::addon", &["CounterAddon"], "Config")
    }
}

fn files_v1() -> v1::FilesConfig {
    v1::FilesConfig {
        directory: "/data/input".to_string(),
        skip_on_error: true,
    }
}

#[test]
fn test_alias_bridges_renamed_type() {
    let mut producer = ConfigCodec::new();
    producer.add_alias::<v1::FilesConfig>("cnf").unwrap();
    let mut consumer = ConfigCodec::new();
    consumer.add_alias::<v2::FileSourceConfig>("cnf").unwrap();

    let blob = producer.serialize(&files_v1()).unwrap();
    let restored: v2::FileSourceConfig = consumer.deserialize(&blob).unwrap();

    assert_eq!(restored.directory, "/data/input");
    assert!(restored.skip_on_error);
}

#[test]
fn test_renamed_type_without_alias_is_rejected() {
    let blob = ConfigCodec::new().serialize(&files_v1()).unwrap();
    let err = ConfigCodec::new()
        .deserialize::<v2::FileSourceConfig>(&blob)
        .unwrap_err();
    assert!(err.is_serialization_failure());
}

#[test]
fn test_registry_alias_roundtrip_across_versions() {
    let mut old = FragmentRegistry::new();
    old.codec_mut().add_alias::<v1::FilesConfig>("cnf").unwrap();
    old.set(MasterConfigObject::DPU_CONFIG_NAME, &files_v1());
    let blob = old.serialize_all().unwrap();

    let codec = ConfigCodec::builder()
        .alias::<v2::FileSourceConfig>("cnf")
        .build()
        .unwrap();
    let mut plugin = DpuConfiguration::<v2::FileSourceConfig>::with_codec(codec);
    plugin.configure(Some(&blob)).unwrap();

    assert_eq!(plugin.config().directory, "/data/input");
}

#[test]
fn test_pick_candidate_type_with_containment() {
    let mut registry = FragmentRegistry::new();
    registry.set("addon", &CounterAddon { limit: 42 });
    let blob = registry.serialize_all().unwrap();

    let restored = FragmentRegistry::deserialize_all(&blob).unwrap();
    let raw = restored.raw("addon").unwrap();
    let codec = restored.codec();

    assert!(!codec.can_contain::<GraphAddon>(raw));
    assert!(codec.can_contain::<CounterAddon>(raw));
    assert!(can_contain_tag(raw, "rdf.addon.CounterAddon_-Config"));
    assert_eq!(
        codec.deserialize::<CounterAddon>(raw).unwrap(),
        CounterAddon { limit: 42 }
    );
}

#[test]
fn test_master_blob_contains_fragment_tags() {
    let mut registry = FragmentRegistry::new();
    registry.set("graph", &GraphAddon {
        graph_uri: "http://example.org/graph".to_string(),
    });
    let blob = registry.serialize_all().unwrap();

    assert!(registry.codec().can_contain::<MasterConfigObject>(&blob));
    assert!(registry.codec().can_contain::<GraphAddon>(&blob));
}

#[test]
fn test_persisted_configuration_reloads() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("dpu-config.json");

    let mut source = DpuConfiguration::<v2::FileSourceConfig>::new();
    source
        .set_config(v2::FileSourceConfig {
            directory: "/srv/files".to_string(),
            skip_on_error: false,
        })
        .unwrap();
    source.set_addon("graph", &GraphAddon {
        graph_uri: "http://example.org/out".to_string(),
    });
    std::fs::write(&path, source.serialized_configuration().unwrap()).unwrap();

    let stored = std::fs::read_to_string(&path).unwrap();
    let mut target = DpuConfiguration::<v2::FileSourceConfig>::new();
    target.configure(Some(&stored)).unwrap();

    assert_eq!(target.config().directory, "/srv/files");
    assert_eq!(
        target.addon::<GraphAddon>("graph").map(|g| g.graph_uri),
        Some("http://example.org/out".to_string())
    );
    assert_eq!(target.addon::<CounterAddon>("counter"), None);
}

#[test]
fn test_default_configuration_fails_validation_when_applied() {
    // An empty directory is the default but not a valid explicit setting.
    let plugin = DpuConfiguration::<v2::FileSourceConfig>::new();
    let blob = plugin.default_configuration().unwrap();

    let mut other = DpuConfiguration::<v2::FileSourceConfig>::new();
    let err = other.configure(Some(&blob)).unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn test_truncated_master_is_container_error() {
    let mut registry = FragmentRegistry::new();
    registry.set("primary", &files_v1());
    let blob = registry.serialize_all().unwrap();

    for cut in [1, blob.len() / 3, blob.len() - 1] {
        let err = FragmentRegistry::deserialize_all(&blob[..cut]).unwrap_err();
        assert!(matches!(err, ConfigError::Container { .. }), "cut at {cut}");
    }
}
