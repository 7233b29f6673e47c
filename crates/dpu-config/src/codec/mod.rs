//! Typed configuration codec.
//!
//! A [`ConfigCodec`] turns one configuration value into a JSON blob of the
//! form `{"<tag>": <value>}` and back. The tag is the type's canonical tag
//! unless an alias has been registered for the type on that codec instance.
//!
//! Aliases are per instance. A producer and a consumer can each bind the same
//! alias string to their own type, which is how a configuration type can be
//! renamed or moved between plugin versions and still be read back.

mod builder;

pub use builder::ConfigCodecBuilder;

use crate::error::{ConfigError, Result};
use crate::tag::TypeDescriptor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::any::TypeId;
use std::collections::HashMap;
use tracing::debug;

/// A type that can be stored as a configuration blob.
///
/// The default descriptor comes from the compiler's type name. Override
/// [`ConfigType::descriptor`] to pin the tag to a stable path or to declare
/// the type as nested in another type.
pub trait ConfigType: Serialize + DeserializeOwned + 'static {
    /// Identity used to derive this type's tag.
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::of_type::<Self>()
    }

    /// Canonical tag of this type (ignores any codec alias).
    fn type_tag() -> String {
        Self::descriptor().tag()
    }
}

/// Converts configuration values to and from serialized blobs.
///
/// A codec is owned by one configuration session. Registering aliases needs
/// `&mut self`; share a codec across threads only behind your own lock.
#[derive(Debug, Clone, Default)]
pub struct ConfigCodec {
    /// Alias overrides keyed by Rust type.
    aliases: HashMap<TypeId, String>,
    /// Pretty-print JSON output.
    pretty: bool,
}

impl ConfigCodec {
    /// Create a codec with no aliases and compact output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for a codec.
    pub fn builder() -> ConfigCodecBuilder {
        ConfigCodecBuilder::new()
    }

    /// Register `alias` as the tag for `T` on this codec.
    ///
    /// Replaces any alias previously registered for `T`.
    pub fn add_alias<T: ConfigType>(&mut self, alias: impl Into<String>) -> Result<()> {
        let alias = alias.into();
        self.insert_alias(TypeId::of::<T>(), alias)?;
        debug!("Registered alias for {}", T::type_tag());
        Ok(())
    }

    pub(crate) fn insert_alias(&mut self, type_id: TypeId, alias: String) -> Result<()> {
        // The alias must appear verbatim in the blob, so nothing JSON escapes.
        if alias.trim().is_empty()
            || alias.chars().any(|c| c == '"' || c == '\\' || c.is_control())
        {
            return Err(ConfigError::InvalidAlias { alias });
        }
        self.aliases.insert(type_id, alias);
        Ok(())
    }

    pub(crate) fn set_pretty(&mut self, pretty: bool) {
        self.pretty = pretty;
    }

    /// Alias registered for `T`, if any.
    pub fn alias_for<T: ConfigType>(&self) -> Option<&str> {
        self.aliases.get(&TypeId::of::<T>()).map(String::as_str)
    }

    /// Tag this codec writes for `T`: the alias if registered, else the canonical tag.
    pub fn active_tag<T: ConfigType>(&self) -> String {
        match self.alias_for::<T>() {
            Some(alias) => alias.to_string(),
            None => T::type_tag(),
        }
    }

    /// Whether this codec pretty-prints its output.
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Whether a blob tagged with `tag` may be read as `T`.
    fn accepts<T: ConfigType>(&self, tag: &str) -> bool {
        self.alias_for::<T>() == Some(tag) || T::type_tag() == tag
    }

    /// Serialize `value` into a tagged blob.
    ///
    /// Fails when the encoded value does not read back as `T`, which is how
    /// lossy encodings such as non-finite floats (written as `null`) surface.
    pub fn serialize<T: ConfigType>(&self, value: &T) -> Result<String> {
        let tag = self.active_tag::<T>();

        let body = serde_json::to_value(value).map_err(|e| ConfigError::Serialization {
            message: format!("Failed to serialize {}: {}", tag, e),
            source: Some(e),
        })?;

        if let Err(e) = <T as serde::Deserialize>::deserialize(&body) {
            return Err(ConfigError::Serialization {
                message: format!("Serialized {} does not read back: {}", tag, e),
                source: Some(e),
            });
        }

        let mut tagged = Map::with_capacity(1);
        tagged.insert(tag, body);
        let tagged = Value::Object(tagged);

        let blob = if self.pretty {
            serde_json::to_string_pretty(&tagged)?
        } else {
            serde_json::to_string(&tagged)?
        };

        Ok(blob)
    }

    /// Deserialize a tagged blob as `T`.
    ///
    /// Fails with [`ConfigError::TagMismatch`] when the blob carries a tag that
    /// is neither `T`'s alias on this codec nor `T`'s canonical tag.
    pub fn deserialize<T: ConfigType>(&self, blob: &str) -> Result<T> {
        let value: Value = serde_json::from_str(blob).map_err(|e| ConfigError::Serialization {
            message: format!("Failed to parse configuration blob: {}", e),
            source: Some(e),
        })?;

        let Value::Object(tagged) = value else {
            return Err(ConfigError::Serialization {
                message: "Configuration blob is not a tagged object".to_string(),
                source: None,
            });
        };

        if tagged.len() != 1 {
            return Err(ConfigError::Serialization {
                message: format!(
                    "Configuration blob must carry exactly one type tag, found {}",
                    tagged.len()
                ),
                source: None,
            });
        }

        let Some((found, body)) = tagged.into_iter().next() else {
            return Err(ConfigError::Serialization {
                message: "Configuration blob is empty".to_string(),
                source: None,
            });
        };

        if !self.accepts::<T>(&found) {
            return Err(ConfigError::TagMismatch {
                expected: self.active_tag::<T>(),
                found,
            });
        }

        serde_json::from_value(body).map_err(|e| ConfigError::Serialization {
            message: format!("Failed to deserialize {}: {}", found, e),
            source: Some(e),
        })
    }
}
