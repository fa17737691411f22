//! User configuration, stored as TOML in the platform config directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub roles: RolesConfig,
    pub output: OutputConfig,
}

/// Role labels rendered into each example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolesConfig {
    /// Label for the counterpart side. Downstream consumers match on
    /// "person", so change this only if they change too.
    pub context: String,
    /// Label for the local author's side
    pub response: String,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            context: "person".to_string(),
            response: "me".to_string(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Filename template used when no --output is given.
    /// Tags: {stem}, {conversation}, {date}, {time}
    pub filename_template: String,
    /// Pretty-print the examples JSON
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename_template: "{stem}-examples.json".to_string(),
            pretty: true,
        }
    }
}

impl Config {
    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join("turnpair").join("config.toml"))
    }

    /// Load the configuration, falling back to defaults if no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration to its default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Result of a config migration.
pub struct MigrationResult {
    /// The migrated file content (existing fields and comments untouched)
    pub content: String,
    /// Fields that were added, as "section.key"
    pub added_fields: Vec<String>,
    /// Sections that did not exist before
    pub sections_added: Vec<String>,
}

impl MigrationResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add missing fields to an existing config file's content.
///
/// Parses the existing TOML (preserving formatting and comments via
/// toml_edit), then inserts any section or key present in the default config
/// but absent from the file. Existing values are never modified.
pub fn migrate_config(existing: &str) -> Result<MigrationResult> {
    let mut doc = existing
        .parse::<toml_edit::DocumentMut>()
        .context("Failed to parse existing config")?;

    let defaults = toml::to_string_pretty(&Config::default())
        .context("Failed to serialize default config")?;
    let default_doc = defaults
        .parse::<toml_edit::DocumentMut>()
        .context("Failed to parse default config")?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, item) in default_doc.iter() {
        let Some(table) = item.as_table() else {
            continue;
        };

        if doc.get(section).is_none() {
            doc.insert(section, toml_edit::table());
            sections_added.push(section.to_string());
        }

        let target = doc[section]
            .as_table_mut()
            .with_context(|| format!("Config section [{}] is not a table", section))?;

        for (key, value) in table.iter() {
            if target.get(key).is_none() {
                target.insert(key, value.clone());
                added_fields.push(format!("{}.{}", section, key));
            }
        }
    }

    Ok(MigrationResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
