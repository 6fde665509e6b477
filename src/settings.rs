//! User settings
//!
//! Typed view of the settings the server reads, with the same keys the
//! client uses (`kite.completions.disabledFileExtensions`,
//! `workbench.colorTheme`). Settings come from several layers, lowest to
//! highest precedence:
//!
//! 1. `--disable-extension` on the command line
//! 2. User-global `<config_dir>/kite/settings.toml`
//! 3. Project `.kite.toml`
//! 4. The client, via `workspace/configuration`
//!
//! A layer only overrides the keys it actually sets. Missing or malformed
//! layers contribute nothing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::gate::ConfigSource;

/// File name of the project settings file
pub const PROJECT_SETTINGS_FILE: &str = ".kite.toml";

/// Client configuration sections requested on `workspace/configuration`
pub const KITE_SECTION: &str = "kite";
pub const WORKBENCH_SECTION: &str = "workbench";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub completions: CompletionsSettings,
    #[serde(default)]
    pub workbench: WorkbenchSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionsSettings {
    #[serde(
        default,
        rename = "disabledFileExtensions",
        alias = "disabled_file_extensions",
        deserialize_with = "string_entries"
    )]
    pub disabled_file_extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkbenchSettings {
    #[serde(default, rename = "colorTheme", alias = "color_theme")]
    pub color_theme: Option<String>,
}

impl Settings {
    /// Settings carrying only a disabled-extension list
    pub fn with_disabled<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            completions: CompletionsSettings {
                disabled_file_extensions: Some(extensions.into_iter().map(Into::into).collect()),
            },
            ..Default::default()
        }
    }

    /// Overlay `other` on top of `self`; keys `other` leaves unset are kept
    pub fn merge(mut self, other: Settings) -> Settings {
        if other.completions.disabled_file_extensions.is_some() {
            self.completions.disabled_file_extensions = other.completions.disabled_file_extensions;
        }
        if other.workbench.color_theme.is_some() {
            self.workbench.color_theme = other.workbench.color_theme;
        }
        self
    }

    /// Parse a TOML settings file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Load a TOML settings file if it exists, logging and skipping it
    /// otherwise.
    pub fn load_optional(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::from_toml_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                Some(settings)
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {:#}", e);
                None
            }
        }
    }

    /// Build settings from the values returned for the `kite` and
    /// `workbench` configuration sections, in that order.
    ///
    /// A section that is missing, `null`, or of the wrong shape is skipped.
    pub fn from_client_sections(values: &[Value]) -> Self {
        let mut settings = Settings::default();

        if let Some(kite) = values.first().filter(|v| !v.is_null()) {
            match serde_json::from_value::<Settings>(kite.clone()) {
                Ok(parsed) => settings.completions = parsed.completions,
                Err(e) => log::warn!("Ignoring malformed '{}' settings: {}", KITE_SECTION, e),
            }
        }

        if let Some(workbench) = values.get(1).filter(|v| !v.is_null()) {
            match serde_json::from_value::<WorkbenchSettings>(workbench.clone()) {
                Ok(parsed) => settings.workbench = parsed,
                Err(e) => log::warn!(
                    "Ignoring malformed '{}' settings: {}",
                    WORKBENCH_SECTION,
                    e
                ),
            }
        }

        settings
    }

    /// Settings pushed with `workspace/didChangeConfiguration`, if the
    /// client sent them inline (`{"kite": {...}, "workbench": {...}}`).
    pub fn from_pushed(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if !object.contains_key(KITE_SECTION) && !object.contains_key(WORKBENCH_SECTION) {
            return None;
        }
        let kite = object.get(KITE_SECTION).cloned().unwrap_or(Value::Null);
        let workbench = object.get(WORKBENCH_SECTION).cloned().unwrap_or(Value::Null);
        Some(Self::from_client_sections(&[kite, workbench]))
    }

    pub fn color_theme(&self) -> Option<&str> {
        self.workbench.color_theme.as_deref()
    }
}

impl ConfigSource for Settings {
    fn disabled_extensions(&self) -> Option<Vec<String>> {
        self.completions.disabled_file_extensions.clone()
    }
}

/// Keeps the string entries of a list exactly as written, skipping the rest
fn string_entries<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|entries| {
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s),
                other => {
                    log::warn!("Ignoring non-string disabled extension: {}", other);
                    None
                }
            })
            .collect()
    }))
}

/// User-global settings path, if the platform has a config directory
pub fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kite").join("settings.toml"))
}

/// Merge the file-backed layers on top of `cli`
pub fn load_layered(cli: Settings, user: Option<&Path>, project: Option<&Path>) -> Settings {
    let mut settings = cli;
    for path in [user, project].into_iter().flatten() {
        if let Some(layer) = Settings::load_optional(path) {
            settings = settings.merge(layer);
        }
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_disabled_entries_kept_verbatim() {
        let settings = Settings::with_disabled(["py", " .js", ".go"]);
        assert_eq!(
            settings.disabled_extensions(),
            Some(vec!["py".to_string(), " .js".to_string(), ".go".to_string()])
        );
    }

    #[test]
    fn test_non_string_entries_skipped() {
        let settings = Settings::from_client_sections(&[json!({
            "completions": { "disabledFileExtensions": [".c", 7, null, "rb"] }
        })]);
        assert_eq!(
            settings.disabled_extensions(),
            Some(vec![".c".to_string(), "rb".to_string()])
        );
    }

    #[test]
    fn test_merge_overrides_only_set_keys() {
        let base = Settings {
            completions: CompletionsSettings {
                disabled_file_extensions: Some(vec![".go".into()]),
            },
            workbench: WorkbenchSettings {
                color_theme: Some("Default Dark+".into()),
            },
        };
        let merged = base.merge(Settings::with_disabled([".py"]));

        assert_eq!(merged.disabled_extensions(), Some(vec![".py".to_string()]));
        assert_eq!(merged.color_theme(), Some("Default Dark+"));
    }

    #[test]
    fn test_from_client_sections() {
        let settings = Settings::from_client_sections(&[
            json!({ "completions": { "disabledFileExtensions": ["py", ".js"] } }),
            json!({ "colorTheme": "Default High Contrast" }),
        ]);
        assert_eq!(
            settings.disabled_extensions(),
            Some(vec!["py".to_string(), ".js".to_string()])
        );
        assert_eq!(settings.color_theme(), Some("Default High Contrast"));
    }

    #[test]
    fn test_from_client_sections_fails_open() {
        let settings = Settings::from_client_sections(&[
            json!({ "completions": { "disabledFileExtensions": 42 } }),
            Value::Null,
        ]);
        assert_eq!(settings, Settings::default());
        assert!(settings.disabled_extensions().is_none());

        assert_eq!(Settings::from_client_sections(&[]), Settings::default());
    }

    #[test]
    fn test_from_pushed() {
        assert!(Settings::from_pushed(&Value::Null).is_none());
        assert!(Settings::from_pushed(&json!({ "other": {} })).is_none());

        let pushed = Settings::from_pushed(&json!({
            "kite": { "completions": { "disabledFileExtensions": [".c"] } }
        }))
        .expect("kite section present");
        assert_eq!(pushed.disabled_extensions(), Some(vec![".c".to_string()]));
    }

    #[test]
    fn test_toml_accepts_snake_case() {
        let settings: Settings = toml::from_str(
            r#"
[completions]
disabled_file_extensions = [".vue", ".less"]

[workbench]
colorTheme = "Solarized Light"
"#,
        )
        .expect("parse settings");
        assert_eq!(
            settings.disabled_extensions(),
            Some(vec![".vue".to_string(), ".less".to_string()])
        );
        assert_eq!(settings.color_theme(), Some("Solarized Light"));
    }
}
