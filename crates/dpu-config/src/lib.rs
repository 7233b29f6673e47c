//! DPU Config - typed configuration serialization for DPU plugins.
//!
//! This crate turns plugin configuration objects into opaque text blobs and
//! back, and bundles several independently typed configuration fragments
//! into one master container. It does no I/O; persisting the blobs is up to
//! the caller.
//!
//! # Example
//!
//! ```rust
//! use dpu_config::{ConfigType, FragmentRegistry, MasterConfigObject};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct LoaderConfig {
//!     graph: String,
//! }
//!
//! impl ConfigType for LoaderConfig {}
//!
//! let mut registry = FragmentRegistry::new();
//! registry.set(
//!     MasterConfigObject::DPU_CONFIG_NAME,
//!     &LoaderConfig { graph: "http://example.org/g".into() },
//! );
//!
//! let blob = registry.serialize_all()?;
//! let restored = FragmentRegistry::deserialize_all(&blob)?;
//! let config: Option<LoaderConfig> = restored.get(MasterConfigObject::DPU_CONFIG_NAME);
//! assert_eq!(config.unwrap().graph, "http://example.org/g");
//! # Ok::<(), dpu_config::ConfigError>(())
//! ```

pub mod codec;
pub mod config;
pub mod containment;
pub mod error;
pub mod fragment;
pub mod plugin;
pub mod registry;
pub mod tag;

// Re-export commonly used types
pub use codec::{ConfigCodec, ConfigCodecBuilder, ConfigType};
pub use containment::can_contain_tag;
pub use error::{ConfigError, Result};
pub use fragment::ConfigFragment;
pub use plugin::{Configurable, DpuConfiguration, Validate};
pub use registry::{FragmentRegistry, MasterConfigObject};
pub use tag::{type_tag, TypeDescriptor};
