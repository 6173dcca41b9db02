//! Externalization settings loaded from JSON

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::configuration::Configuration;
use crate::error::{Error, Result};
use crate::lookup::{DeclarationTable, ResolverChain};

/// Settings for the default externalization preset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Application namespaces events must reside in
    pub namespaces: Vec<String>,

    /// Routes declared per fully qualified type name; empty declares without a route
    pub declarations: BTreeMap<String, String>,
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Standard resolvers, then the declarations listed here
    pub fn resolver_chain(&self) -> ResolverChain {
        ResolverChain::standard().with(DeclarationTable::new(self.declarations.clone()))
    }

    /// Default preset over the configured namespaces and declarations
    pub fn to_configuration(&self) -> Result<Configuration> {
        Configuration::defaults_with(&self.namespaces, self.resolver_chain())
    }
}
