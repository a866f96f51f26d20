use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::registry::Registry;

/// Board-level alias declarations, loaded from a JSON file at host init.
///
/// Destinations do not need to be registered yet when the file is
/// applied; aliases resolve once the drivers register their pins.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct RegistryConfig {
    #[serde(default)]
    pub aliases: FxHashMap<String, String>,
}

impl RegistryConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(&path)
            .map_err(|e| RegistryError::Config(format!("Failed to read config: {e}")))?;
        serde_json::from_str(&contents)
            .map_err(|e| RegistryError::Config(format!("Invalid config json: {e}")))
    }

    pub fn apply(&self, registry: &Registry) -> Result<(), RegistryError> {
        for (alias, dest) in &self.aliases {
            registry.register_alias(alias, dest)?;
        }
        Ok(())
    }
}
