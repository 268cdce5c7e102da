//! Config - Site Behavior Configuration
//!
//! Every field has a default matching the production site, so an empty or
//! partial TOML file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::constants::*;
use crate::error::Result;
use crate::i18n::Locale;
use crate::helpers::get_or_create_config_dir;

const CONFIG_FILE_NAME: &str = "site-behaviors.toml";

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Locale toggle configuration
    pub locale: LocaleConfig,
    /// Mobile navigation configuration
    pub navigation: NavigationConfig,
    /// Navbar scroll style configuration
    pub header: HeaderConfig,
    /// Anchor scroll configuration
    pub anchor: AnchorConfig,
    /// Entrance animation configuration
    pub entrance: EntranceConfig,
    /// Counter animation configuration
    pub counter: CounterConfig,
}

/// Locale toggle configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Key of the persisted preference
    pub storage_key: String,
    /// Id of the toggle button
    pub button_id: String,
    /// Id of the label naming the target locale
    pub label_id: String,
    /// Attribute holding a node's primary locale text
    pub primary_attribute: String,
    /// Attribute holding a node's secondary locale text
    pub secondary_attribute: String,
}

impl LocaleConfig {
    /// Attribute carrying `locale`'s text on a bilingual node
    pub fn text_attribute(&self, locale: Locale) -> &str {
        if locale == Locale::PRIMARY {
            &self.primary_attribute
        } else {
            &self.secondary_attribute
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            storage_key: LOCALE_STORAGE_KEY.to_string(),
            button_id: LOCALE_BUTTON_ID.to_string(),
            label_id: LOCALE_LABEL_ID.to_string(),
            primary_attribute: LOCALE_PRIMARY_ATTRIBUTE.to_string(),
            secondary_attribute: LOCALE_SECONDARY_ATTRIBUTE.to_string(),
        }
    }
}

/// Mobile navigation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub hamburger_class: String,
    pub menu_class: String,
    pub link_class: String,
    /// Flag set on the hamburger and the menu while open
    pub active_class: String,
    /// Flag set on `<body>` while open
    pub body_lock_class: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            hamburger_class: "hamburger".to_string(),
            menu_class: "nav-menu".to_string(),
            link_class: "nav-link".to_string(),
            active_class: "active".to_string(),
            body_lock_class: "menu-open".to_string(),
        }
    }
}

/// Navbar scroll style configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub navbar_class: String,
    pub scrolled_class: String,
    /// Offset in pixels; strictly above it the navbar is scrolled
    pub threshold_px: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            navbar_class: "navbar".to_string(),
            scrolled_class: "scrolled".to_string(),
            threshold_px: SCROLL_THRESHOLD_PX,
        }
    }
}

/// Anchor scroll configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Fixed header height subtracted from destinations
    pub header_offset_px: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            header_offset_px: HEADER_OFFSET_PX,
        }
    }
}

/// Entrance animation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    /// Content block classes to watch
    pub classes: Vec<String>,
    pub animate_class: String,
    pub threshold: f64,
    pub bottom_margin_px: f64,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            classes: ["benefit-card", "step", "featured-item", "stat-item"]
                .into_iter()
                .map(String::from)
                .collect(),
            animate_class: "animate-in".to_string(),
            threshold: ENTRANCE_THRESHOLD,
            bottom_margin_px: ENTRANCE_BOTTOM_MARGIN_PX,
        }
    }
}

/// Counter animation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub counter_class: String,
    pub duration_ms: u64,
    pub tick_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            counter_class: "stat-number".to_string(),
            duration_ms: COUNTER_DURATION_MS,
            tick_ms: COUNTER_TICK_MS,
        }
    }
}

impl SiteConfig {
    /// Parse a TOML document, filling missing fields with defaults
    pub fn from_toml(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(value)?)
    }

    /// Load from an explicit file path
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(path)?;
        Self::from_toml(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
            e
        })
    }

    /// Load from the platform config directory, falling back to defaults
    /// when the file does not exist yet
    pub fn try_load() -> Result<Self> {
        let path = default_config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Write to an explicit file path
    pub fn save(&self, path: &Path) -> Result<()> {
        let value = toml::to_string_pretty(self)?;
        std::fs::write(path, value)?;
        Ok(())
    }
}

/// Path of the config file in the platform config directory
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = SiteConfig::from_toml("  \n").expect("parse");
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.header.threshold_px, 50.0);
        assert_eq!(config.anchor.header_offset_px, 80.0);
        assert_eq!(config.counter.tick_ms, 16);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = SiteConfig::from_toml(
            r#"
            [header]
            threshold_px = 120.0

            [locale]
            storage_key = "site-lang"
            "#,
        )
        .expect("parse");

        assert_eq!(config.header.threshold_px, 120.0);
        assert_eq!(config.header.navbar_class, "navbar");
        assert_eq!(config.locale.storage_key, "site-lang");
        assert_eq!(config.locale.button_id, "langBtn");
        assert_eq!(config.entrance.classes.len(), 4);
    }

    #[test]
    fn locale_attributes_can_be_renamed() {
        let config = SiteConfig::from_toml(
            r#"
            [locale]
            secondary_attribute = "data-fr"
            "#,
        )
        .expect("parse");

        assert_eq!(config.locale.text_attribute(Locale::ZhCN), "data-zh");
        assert_eq!(config.locale.text_attribute(Locale::EnUS), "data-fr");
        assert_eq!(config.locale.storage_key, "language");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("site.toml");

        let mut config = SiteConfig::default();
        config.counter.duration_ms = 1000;
        config.save(&path).expect("save");

        let loaded = SiteConfig::load(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(SiteConfig::from_toml("[header\nthreshold_px = ").is_err());
    }
}
