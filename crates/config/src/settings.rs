// Preview settings
// Loaded from ~/.config/cellpreview/settings.json (read-only: the host owns persistence)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cellpreview_core::{FieldInfo, Schema, TableInfo};

use crate::error::ConfigError;

/// Shown while enforced settings are incomplete.
pub const INVALID_SETTINGS_MESSAGE: &str = "Pick a table and url field";

/// Label of the enforcement switch.
pub const ENFORCE_LABEL: &str = "Use a specific field for previews";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Only preview the configured table/field, whatever cell is selected
    #[serde(rename = "preview.enforced")]
    pub enforced: bool,

    #[serde(rename = "preview.tableId", skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,

    #[serde(rename = "preview.urlFieldId", skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
}

/// Settings checked against the current schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsValidation {
    pub is_valid: bool,
    pub message: Option<&'static str>,
    /// Preview table, when enforced and it still exists
    pub table: Option<TableInfo>,
    /// Preview field, when enforced and it still exists in `table`
    pub field: Option<FieldInfo>,
}

impl SettingsValidation {
    pub fn valid() -> Self {
        Self { is_valid: true, message: None, table: None, field: None }
    }
}

impl PreviewSettings {
    pub fn enforced(table_id: impl Into<String>, field_id: impl Into<String>) -> Self {
        Self {
            enforced: true,
            table_id: Some(table_id.into()),
            field_id: Some(field_id.into()),
        }
    }

    /// Resolve the configured ids against `schema`.
    ///
    /// Without enforcement the settings are always valid. With enforcement the
    /// table and field must both exist and the field must be able to hold a URL.
    pub fn validate(&self, schema: &dyn Schema) -> SettingsValidation {
        if !self.enforced {
            return SettingsValidation::valid();
        }

        let table = self.table_id.as_deref().and_then(|id| schema.table(id));
        let field = match (&table, self.field_id.as_deref()) {
            (Some(table), Some(field_id)) => schema
                .field(&table.id, field_id)
                .filter(|f| f.kind.is_url_capable()),
            _ => None,
        };

        let is_valid = table.is_some() && field.is_some();
        if !is_valid {
            log::debug!(
                "preview settings incomplete (table={:?}, field={:?})",
                self.table_id,
                self.field_id
            );
        }

        SettingsValidation {
            is_valid,
            message: (!is_valid).then_some(INVALID_SETTINGS_MESSAGE),
            table,
            field,
        }
    }

    /// Explanation shown under the enforcement switch.
    pub fn description(&self) -> &'static str {
        if self.enforced {
            "The panel will show previews for the selected record in grid view if the table has a supported URL in the specified field."
        } else {
            "The panel will show previews if the selected cell in grid view has a supported URL."
        }
    }

    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cellpreview");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::from_path(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a `.json` or `.toml` file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            }),
            Some("toml") => Self::from_toml(&contents).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parse JSON settings. Lines starting with `//` are comments.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
