//! Plugin-side configuration contract.
//!
//! A plugin receives its configuration as one serialized master container
//! and hands out a default one. [`DpuConfiguration`] implements that
//! contract on top of a [`FragmentRegistry`], keeping the primary
//! configuration object under [`MasterConfigObject::DPU_CONFIG_NAME`] and any
//! addon fragments alongside it.

use crate::codec::{ConfigCodec, ConfigType};
use crate::error::{ConfigError, Result};
use crate::registry::{FragmentRegistry, MasterConfigObject};
use tracing::{debug, info};

/// Configuration entry points exposed by a plugin to its host.
pub trait Configurable {
    /// Apply a serialized configuration.
    ///
    /// `None` leaves the current configuration untouched.
    fn configure(&mut self, serialized: Option<&str>) -> Result<()>;

    /// Serialized form of the plugin's default configuration.
    fn default_configuration(&self) -> Result<String>;
}

/// Semantic checks run after a configuration has been decoded.
pub trait Validate {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Holds a plugin's current primary configuration plus addon fragments.
#[derive(Debug, Clone)]
pub struct DpuConfiguration<C> {
    config: C,
    registry: FragmentRegistry,
}

impl<C> DpuConfiguration<C>
where
    C: ConfigType + Default + Validate,
{
    /// Start from `C::default()` with a default codec.
    pub fn new() -> Self {
        Self::with_codec(ConfigCodec::new())
    }

    /// Start from `C::default()`, using `codec` for every (de)serialization.
    pub fn with_codec(codec: ConfigCodec) -> Self {
        let config = C::default();
        let mut registry = FragmentRegistry::with_codec(codec);
        registry.set(MasterConfigObject::DPU_CONFIG_NAME, &config);
        Self { config, registry }
    }

    /// Current primary configuration.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Replace the primary configuration after validating it.
    ///
    /// Nothing changes unless the new configuration both validates and
    /// serializes.
    pub fn set_config(&mut self, config: C) -> Result<()> {
        config.validate().map_err(into_configuration_error)?;
        self.registry
            .try_set(MasterConfigObject::DPU_CONFIG_NAME, &config)
            .map_err(into_configuration_error)?;
        self.config = config;
        Ok(())
    }

    /// Read an addon fragment. `None` means "not configured"; apply a default.
    pub fn addon<A: ConfigType>(&self, name: &str) -> Option<A> {
        self.registry.get(name)
    }

    /// Store an addon fragment next to the primary configuration.
    ///
    /// # Panics
    ///
    /// Panics if `name` is the reserved primary name; use [`Self::set_config`].
    pub fn set_addon<A: ConfigType>(&mut self, name: &str, addon: &A) {
        assert_ne!(
            name,
            MasterConfigObject::DPU_CONFIG_NAME,
            "the primary fragment name is reserved"
        );
        self.registry.set(name, addon);
    }

    /// Underlying registry.
    pub fn registry(&self) -> &FragmentRegistry {
        &self.registry
    }

    /// Serialized form of the current state.
    pub fn serialized_configuration(&self) -> Result<String> {
        self.registry.serialize_all()
    }
}

impl<C> Default for DpuConfiguration<C>
where
    C: ConfigType + Default + Validate,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Configurable for DpuConfiguration<C>
where
    C: ConfigType + Default + Validate,
{
    fn configure(&mut self, serialized: Option<&str>) -> Result<()> {
        let Some(serialized) = serialized else {
            debug!("No configuration given, keeping current state");
            return Ok(());
        };

        let registry =
            FragmentRegistry::deserialize_all_with(self.registry.codec().clone(), serialized)
                .map_err(into_configuration_error)?;

        let config: C = registry
            .get(MasterConfigObject::DPU_CONFIG_NAME)
            .ok_or_else(|| {
                ConfigError::configuration(format!(
                    "Missing or unreadable primary configuration '{}'",
                    MasterConfigObject::DPU_CONFIG_NAME
                ))
            })?;

        config.validate().map_err(into_configuration_error)?;

        info!("Applied configuration with {} fragments", registry.len());
        self.config = config;
        self.registry = registry;
        Ok(())
    }

    fn default_configuration(&self) -> Result<String> {
        let mut registry = FragmentRegistry::with_codec(self.registry.codec().clone());
        registry.set(MasterConfigObject::DPU_CONFIG_NAME, &C::default());
        registry.serialize_all()
    }
}

fn into_configuration_error(err: ConfigError) -> ConfigError {
    if err.is_configuration_error() {
        err
    } else {
        ConfigError::configuration(err.to_string())
    }
}
