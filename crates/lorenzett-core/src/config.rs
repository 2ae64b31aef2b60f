//! Job configuration.
//!
//! A job file names the native library and lists the components to configure,
//! in the order the pipeline should see them:
//!
//! ```toml
//! [library]
//! name = "lorenzett"
//! search_paths = ["/opt/lorenzett/lib"]
//!
//! [[component]]
//! class = "CaloNtupleMaker"
//! name = "CaloNtupleMaker"
//!
//! [component.properties]
//! EventKey = "Events"
//! DeltaR = 0.1
//! OutputLevel = "INFO"
//! ```

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::property::PropertyValue;
use crate::{config_err, Result};

/// Default native library name, resolved to the platform file name on load.
pub const DEFAULT_LIBRARY: &str = "lorenzett";

/// Environment variable names.
pub mod env_vars {
    /// Replaces the configured library name or path.
    pub const LIBRARY: &str = "LORENZETT_LIBRARY";
    /// Extra search directories, searched before the configured ones.
    pub const LIBRARY_PATH: &str = "LORENZETT_LIBRARY_PATH";
    /// `true` switches log output to JSON.
    pub const LOG_JSON: &str = "LORENZETT_LOG_JSON";
}

fn default_library_name() -> String {
    DEFAULT_LIBRARY.to_string()
}

/// Where to find the native library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Bare library name (`lorenzett`) or path to the library file.
    #[serde(default = "default_library_name")]
    pub name: String,

    /// Directories searched for the library, in order.
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: default_library_name(),
            search_paths: Vec::new(),
        }
    }
}

impl LibraryConfig {
    /// Apply [`env_vars::LIBRARY`] and [`env_vars::LIBRARY_PATH`].
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(env_vars::LIBRARY).ok(),
            std::env::var_os(env_vars::LIBRARY_PATH),
        )
    }

    fn with_overrides(mut self, library: Option<String>, search_path: Option<OsString>) -> Self {
        if let Some(library) = library.filter(|l| !l.trim().is_empty()) {
            self.name = library;
        }
        if let Some(search_path) = search_path {
            let mut paths: Vec<PathBuf> = std::env::split_paths(&search_path)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            paths.append(&mut self.search_paths);
            self.search_paths = paths;
        }
        self
    }
}

/// One component entry of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Native class name, e.g. `CaloNtupleMaker`.
    pub class: String,

    /// Instance name given to the native object.
    pub name: String,

    /// Initial properties, applied in file order.
    #[serde(default)]
    pub properties: toml::Table,
}

impl ComponentConfig {
    pub fn new(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            properties: toml::Table::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Properties converted to [`PropertyValue`], in file order.
    pub fn property_values(&self) -> Result<Vec<(String, PropertyValue)>> {
        self.properties
            .iter()
            .map(|(key, value)| {
                PropertyValue::try_from(value.clone())
                    .map(|v| (key.clone(), v))
                    .map_err(|e| config_err!("{}/{}: {}: {}", self.class, self.name, key, e))
            })
            .collect()
    }
}

/// Full job configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default, rename = "component")]
    pub components: Vec<ComponentConfig>,
}

impl JobConfig {
    /// Parse and validate a TOML job description.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: JobConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a job file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| config_err!("{}: {}", path.display(), e))?;
        tracing::debug!(
            path = %path.display(),
            components = config.components.len(),
            "Loaded job configuration"
        );
        Ok(config)
    }

    /// Component names must be non-empty and unique within a job.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for component in &self.components {
            if component.class.trim().is_empty() {
                return Err(config_err!("component {:?} has no class", component.name));
            }
            if component.name.trim().is_empty() {
                return Err(config_err!("{} component has an empty name", component.class));
            }
            if !seen.insert(component.name.as_str()) {
                return Err(config_err!("duplicate component name: {}", component.name));
            }
        }
        Ok(())
    }
}
