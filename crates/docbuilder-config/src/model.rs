//! Declarative site configuration types.
//!
//! Keys follow the engine's camelCase naming on both the TOML input and the
//! rendered output, so a layer reads the same as the config it produces:
//!
//! ```toml
//! lang = "en-US"
//! title = "Doc Builder Example"
//! description = "Sample site assembled with doc-builder"
//! ignoreDeadLinks = true
//!
//! [themeConfig]
//! nav = [{ text = "Home", link = "/" }]
//! sidebar = [
//!   { text = "Home", link = "/" },
//!   { placeholder = "sidebar-items" },
//! ]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One configuration layer, or the fully resolved result of merging two.
///
/// Every scalar is optional so a layer can leave it to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteConfig {
    /// Locale, e.g. `en-US`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Site title (required after composition)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Site description (required after composition)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Base path the site is served under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_urls: Option<bool>,

    /// Tolerate links to pages that do not exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_dead_links: Option<bool>,

    /// Show the last-updated timestamp on pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<bool>,

    #[serde(default)]
    pub theme_config: ThemeConfig,

    /// Per-plugin option maps, keyed by plugin name
    #[serde(default, skip_serializing_if = "PluginOptions::is_empty")]
    pub plugins: PluginOptions,
}

impl SiteConfig {
    /// Parse a configuration layer from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration layer from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a layer if the file exists, otherwise an empty layer.
    pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            tracing::debug!("Loading override layer {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Theme block: top navigation, sidebar and search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav: Option<Vec<NavEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<Vec<SidebarItem>>,

    /// Search provider descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,

    /// How an override's sidebar combines with the base sidebar.
    /// Schema-only, never rendered.
    #[serde(default, skip_serializing)]
    pub sidebar_merge: Option<SequenceMerge>,
}

/// Merge policy for sequence fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceMerge {
    /// The override's sequence replaces the base's wholesale
    #[default]
    Replace,
    /// The override's entries are appended after the base's
    Append,
}

/// A top navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavEntry {
    pub text: String,
    pub link: String,
}

impl NavEntry {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }
}

/// A sidebar position: a real entry or the generated-items sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    Placeholder(SidebarPlaceholder),
    Entry(SidebarEntry),
}

impl SidebarItem {
    /// The sentinel that generated sidebar entries are spliced into.
    pub fn marker() -> Self {
        Self::Placeholder(SidebarPlaceholder {
            placeholder: Marker::SidebarItems,
        })
    }

    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self::Entry(SidebarEntry::link(text, link))
    }

    pub fn group(text: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        Self::Entry(SidebarEntry::group(text, items))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// The sentinel as written in a layer: `{ placeholder = "sidebar-items" }`
/// and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarPlaceholder {
    pub placeholder: Marker,
}

/// Kinds of sidebar sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Marker {
    SidebarItems,
}

/// A navigation node in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarEntry {
    /// Display text
    pub text: String,

    /// Target page, absent for pure group headings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Whether a group starts collapsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,

    /// Nested entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SidebarItem>,
}

impl SidebarEntry {
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            collapsed: None,
            items: Vec::new(),
        }
    }

    /// A collapsed group heading.
    pub fn group(text: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        Self {
            text: text.into(),
            link: None,
            collapsed: Some(true),
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    pub provider: SearchProvider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    Local,
    Algolia,
}

/// Opaque plugin options: plugin name to that plugin's own option map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginOptions(pub BTreeMap<String, serde_json::Value>);

impl PluginOptions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, plugin: &str) -> Option<&serde_json::Value> {
        self.0.get(plugin)
    }

    pub fn contains(&self, plugin: &str) -> bool {
        self.0.contains_key(plugin)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE: &str = r#"
lang = "en-US"
title = "Doc Builder Example"
description = "Sample site assembled with doc-builder"
ignoreDeadLinks = true

[themeConfig]
nav = [{ text = "Home", link = "/" }]
sidebar = [
  { text = "🏠 Home", link = "/" },
  { placeholder = "sidebar-items" },
]
"#;

    #[test]
    fn parses_base_layer() {
        let config = SiteConfig::from_toml_str(BASE).unwrap();

        assert_eq!(config.lang.as_deref(), Some("en-US"));
        assert_eq!(config.ignore_dead_links, Some(true));
        assert_eq!(config.clean_urls, None);
        assert_eq!(
            config.theme_config.nav,
            Some(vec![NavEntry::new("Home", "/")])
        );
        assert_eq!(
            config.theme_config.sidebar,
            Some(vec![
                SidebarItem::link("🏠 Home", "/"),
                SidebarItem::marker()
            ])
        );
    }

    #[test]
    fn parses_override_with_plugins() {
        let source = r#"
title = "Doc-Builder example doc 1"
base = "/"
cleanUrls = true
lastUpdated = true

[themeConfig]
sidebar = []
sidebarMerge = "append"
search = { provider = "local" }

[plugins.mermaid]
theme = "default"
securityLevel = "loose"
flowchart = { useMaxWidth = true, htmlLabels = true }
"#;

        let config = SiteConfig::from_toml_str(source).unwrap();

        assert_eq!(config.theme_config.sidebar, Some(vec![]));
        assert_eq!(config.theme_config.sidebar_merge, Some(SequenceMerge::Append));
        assert_eq!(
            config.theme_config.search,
            Some(SearchConfig {
                provider: SearchProvider::Local
            })
        );
        let mermaid = config.plugins.get("mermaid").unwrap();
        assert_eq!(mermaid["securityLevel"], "loose");
        assert_eq!(mermaid["flowchart"]["htmlLabels"], true);
    }

    #[test]
    fn parses_nested_sidebar_groups() {
        let source = r#"
[[themeConfig.sidebar]]
text = "Guides"
collapsed = true
items = [
  { text = "Intro", link = "/guides/intro" },
  { placeholder = "sidebar-items" },
]
"#;

        let config = SiteConfig::from_toml_str(source).unwrap();
        let sidebar = config.theme_config.sidebar.unwrap();

        let SidebarItem::Entry(group) = &sidebar[0] else {
            panic!("expected a group entry");
        };
        assert_eq!(group.link, None);
        assert_eq!(group.items.len(), 2);
        assert!(group.items[1].is_placeholder());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(SiteConfig::from_toml_str("titel = \"typo\"").is_err());
        assert!(SiteConfig::from_toml_str(
            "[themeConfig]\nsidebar = [{ placeholder = \"nav-items\" }]"
        )
        .is_err());
    }

    #[test]
    fn placeholder_takes_no_other_keys() {
        let err = SiteConfig::from_toml_str(
            "[themeConfig]\nsidebar = [{ placeholder = \"sidebar-items\", text = \"x\", link = \"/y\" }]",
        );
        assert!(err.is_err());

        let config = SiteConfig::from_toml_str(
            "[themeConfig]\nsidebar = [{ placeholder = \"sidebar-items\" }]",
        )
        .unwrap();
        assert_eq!(
            config.theme_config.sidebar,
            Some(vec![SidebarItem::marker()])
        );
    }

    #[test]
    fn sentinel_and_merge_flag_are_not_rendered_as_entries() {
        let config = SiteConfig::from_toml_str(BASE).unwrap();
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["ignoreDeadLinks"], true);
        assert!(json.get("cleanUrls").is_none());
        assert!(json["themeConfig"].get("sidebarMerge").is_none());
        assert_eq!(
            json["themeConfig"]["sidebar"][1]["placeholder"],
            "sidebar-items"
        );
    }

    #[test]
    fn load_reports_path_on_failure() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("base.config.toml");

        let err = SiteConfig::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io(ref p, _) if p == &missing));

        let broken = temp.path().join("broken.toml");
        fs::write(&broken, "title = ").unwrap();
        let err = SiteConfig::load(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_optional_defaults_when_absent() {
        let temp = tempfile::tempdir().unwrap();
        let config = SiteConfig::load_optional(&temp.path().join("site.config.toml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }
}
