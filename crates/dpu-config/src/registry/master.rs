//! Serialized shape of a master configuration.

use crate::codec::ConfigType;
use crate::config::RegistryConfig;
use crate::tag::TypeDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All fragments of one plugin configuration, keyed by symbolic name.
///
/// Each value is the fragment's own serialized blob, or `None` when the
/// fragment was stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterConfigObject {
    #[serde(default)]
    pub(crate) configurations: BTreeMap<String, Option<String>>,
}

impl MasterConfigObject {
    /// Name under which a plugin keeps its primary configuration object.
    pub const DPU_CONFIG_NAME: &'static str = RegistryConfig::PRIMARY_FRAGMENT_NAME;
}

impl ConfigType for MasterConfigObject {
    // Pinned so containers stay readable if this module moves.
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new(RegistryConfig::MASTER_MODULE, RegistryConfig::MASTER_TYPE_NAME)
    }
}
