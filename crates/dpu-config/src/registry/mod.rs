//! Named registry of configuration fragments.
//!
//! A [`FragmentRegistry`] bundles any number of independently typed
//! fragments into one master configuration, serialized as a single blob.
//!
//! Failure handling is split by level:
//! - A container that cannot be parsed fails the whole load.
//! - A fragment that cannot be decoded only makes that fragment absent.

mod master;

pub use master::MasterConfigObject;

use crate::codec::{ConfigCodec, ConfigType};
use crate::error::{ConfigError, Result};
use crate::fragment::ConfigFragment;
use tracing::debug;

/// A named collection of configuration fragments.
#[derive(Debug, Clone, Default)]
pub struct FragmentRegistry {
    codec: ConfigCodec,
    master: MasterConfigObject,
}

impl FragmentRegistry {
    /// Create an empty registry using a default codec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that serializes fragments with `codec`.
    pub fn with_codec(codec: ConfigCodec) -> Self {
        Self {
            codec,
            master: MasterConfigObject::default(),
        }
    }

    /// Codec used for fragments and for the container itself.
    pub fn codec(&self) -> &ConfigCodec {
        &self.codec
    }

    /// Mutable codec access, e.g. to register aliases.
    pub fn codec_mut(&mut self) -> &mut ConfigCodec {
        &mut self.codec
    }

    /// Insert or replace the fragment stored under `name`.
    pub fn set<T: ConfigType>(&mut self, name: impl Into<String>, value: &T) {
        self.set_optional(name, Some(value));
    }

    /// Insert or replace the fragment under `name`, failing instead of
    /// storing it as absent. On error the registry is left unchanged.
    pub fn try_set<T: ConfigType>(&mut self, name: impl Into<String>, value: &T) -> Result<()> {
        let name = name.into();
        let blob = self.codec.serialize(value)?;
        debug!("Setting fragment '{}' (present)", name);
        self.master.configurations.insert(name, Some(blob));
        Ok(())
    }

    /// Insert or replace the fragment under `name`, possibly as absent.
    ///
    /// A value that fails to serialize is stored as absent.
    pub fn set_optional<T: ConfigType>(&mut self, name: impl Into<String>, value: Option<&T>) {
        let name = name.into();
        let blob = ConfigFragment::serialize(&self.codec, value);
        debug!(
            "Setting fragment '{}' ({})",
            name,
            if blob.is_some() { "present" } else { "absent" }
        );
        self.master.configurations.insert(name, blob);
    }

    /// Read the fragment under `name` as `T`.
    ///
    /// Returns `None` when the name is unknown, the fragment is stored as
    /// absent, or its blob does not decode as `T`.
    pub fn get<T: ConfigType>(&self, name: &str) -> Option<T> {
        ConfigFragment::deserialize(&self.codec, self.raw(name))
    }

    /// Raw blob stored under `name`, for picking a type with
    /// [`ConfigCodec::can_contain`] before decoding.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.master
            .configurations
            .get(name)
            .and_then(|blob| blob.as_deref())
    }

    /// Remove the fragment under `name`. Returns whether one was stored.
    pub fn remove(&mut self, name: &str) -> bool {
        self.master.configurations.remove(name).is_some()
    }

    /// Whether an entry (present or absent) exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.master.configurations.contains_key(name)
    }

    /// Symbolic names of all entries, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.master.configurations.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.master.configurations.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.master.configurations.is_empty()
    }

    /// Serialize the whole registry into one blob.
    pub fn serialize_all(&self) -> Result<String> {
        self.codec.serialize(&self.master)
    }

    /// Rebuild a registry from a blob produced by [`FragmentRegistry::serialize_all`].
    pub fn deserialize_all(blob: &str) -> Result<Self> {
        Self::deserialize_all_with(ConfigCodec::new(), blob)
    }

    /// Rebuild a registry using `codec`, which is kept for fragment access.
    pub fn deserialize_all_with(codec: ConfigCodec, blob: &str) -> Result<Self> {
        let master: MasterConfigObject =
            codec.deserialize(blob).map_err(|e| ConfigError::Container {
                message: format!("Failed to load master configuration: {}", e),
                source: Some(Box::new(e)),
            })?;

        debug!(
            "Loaded master configuration with {} fragments",
            master.configurations.len()
        );

        Ok(Self { codec, master })
    }
}
