//! Centralized constants for the configuration core.
//!
//! Tag derivation markers, registry names and codec defaults live here so the
//! textual format is defined in one place.

/// Markers used when deriving type tags.
pub struct TagConfig;

impl TagConfig {
    /// Separator between path segments of a canonical name.
    pub const PATH_SEPARATOR: char = '.';
    /// Separator used by Rust module paths, rewritten to `PATH_SEPARATOR`.
    pub const MODULE_SEPARATOR: &'static str = "::";
    /// Literal underscore and its escaped form.
    pub const UNDERSCORE: char = '_';
    pub const ESCAPED_UNDERSCORE: &'static str = "__";
    /// Replaces the separator between an enclosing type and a nested type.
    pub const NESTED_SEPARATOR: &'static str = "_-";
}

/// Fragment registry constants.
pub struct RegistryConfig;

impl RegistryConfig {
    /// Symbolic name reserved for a plugin's primary configuration object.
    pub const PRIMARY_FRAGMENT_NAME: &'static str = "dpu_config";
    /// Module path and name that make up the master container's tag.
    pub const MASTER_MODULE: &'static str = "dpu_config::registry";
    pub const MASTER_TYPE_NAME: &'static str = "MasterConfigObject";
}

/// Codec defaults.
pub struct CodecConfig;

impl CodecConfig {
    /// Whether codecs pretty-print unless told otherwise.
    pub const DEFAULT_PRETTY: bool = false;
}
