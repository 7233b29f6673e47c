//! Builder for configuring a [`ConfigCodec`].

use super::{ConfigCodec, ConfigType};
use crate::config::CodecConfig;
use crate::error::Result;
use std::any::TypeId;

/// Builder for configuring a [`ConfigCodec`].
///
/// # Example
///
/// ```rust
/// use dpu_config::{ConfigCodec, ConfigType};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct ExtractorConfig {
///     query: String,
/// }
///
/// impl ConfigType for ExtractorConfig {}
///
/// let codec = ConfigCodec::builder()
///     .pretty(true)
///     .alias::<ExtractorConfig>("extractor")
///     .build()
///     .unwrap();
///
/// assert_eq!(codec.active_tag::<ExtractorConfig>(), "extractor");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigCodecBuilder {
    pretty: bool,
    aliases: Vec<(TypeId, String)>,
}

impl Default for ConfigCodecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigCodecBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self {
            pretty: CodecConfig::DEFAULT_PRETTY,
            aliases: Vec::new(),
        }
    }

    /// Pretty-print serialized blobs.
    ///
    /// Default: `false`
    pub fn pretty(mut self, enable: bool) -> Self {
        self.pretty = enable;
        self
    }

    /// Register an alias for `T`. Validated when the codec is built.
    pub fn alias<T: ConfigType>(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push((TypeId::of::<T>(), alias.into()));
        self
    }

    /// Build the codec.
    ///
    /// Fails if any registered alias is empty.
    pub fn build(self) -> Result<ConfigCodec> {
        let mut codec = ConfigCodec::new();
        codec.set_pretty(self.pretty);
        for (type_id, alias) in self.aliases {
            codec.insert_alias(type_id, alias)?;
        }
        Ok(codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct LoaderConfig {
        target: String,
    }

    impl ConfigType for LoaderConfig {}

    #[test]
    fn test_defaults() {
        let codec = ConfigCodecBuilder::new().build().unwrap();
        assert!(!codec.is_pretty());
        assert_eq!(codec.alias_for::<LoaderConfig>(), None);
    }

    #[test]
    fn test_alias_applied() {
        let codec = ConfigCodec::builder()
            .alias::<LoaderConfig>("loader")
            .build()
            .unwrap();
        assert_eq!(codec.alias_for::<LoaderConfig>(), Some("loader"));
    }

    #[test]
    fn test_empty_alias_fails_build() {
        let result = ConfigCodec::builder().alias::<LoaderConfig>("").build();
        assert!(matches!(result, Err(ConfigError::InvalidAlias { .. })));
    }
}
