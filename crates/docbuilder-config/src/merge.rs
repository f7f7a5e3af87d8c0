//! Layer merging.
//!
//! Scalars from the override win when present. `nav` and `search` are
//! replaced wholesale. `sidebar` follows the layer's [`SequenceMerge`]
//! policy. Plugin option maps are deep-merged.

use serde_json::Value;

use crate::model::{PluginOptions, SequenceMerge, SiteConfig, ThemeConfig};

impl SiteConfig {
    /// Merge `over` onto `self`, returning a new config. Neither input changes.
    pub fn merged_with(&self, over: &SiteConfig) -> SiteConfig {
        SiteConfig {
            lang: pick(&self.lang, &over.lang),
            title: pick(&self.title, &over.title),
            description: pick(&self.description, &over.description),
            base: pick(&self.base, &over.base),
            clean_urls: over.clean_urls.or(self.clean_urls),
            ignore_dead_links: over.ignore_dead_links.or(self.ignore_dead_links),
            last_updated: over.last_updated.or(self.last_updated),
            theme_config: self.theme_config.merged_with(&over.theme_config),
            plugins: self.plugins.merged_with(&over.plugins),
        }
    }
}

impl ThemeConfig {
    /// Sidebar policy declared by `over`, falling back to `self`, then `replace`.
    pub fn sidebar_policy(&self, over: &ThemeConfig) -> SequenceMerge {
        over.sidebar_merge
            .or(self.sidebar_merge)
            .unwrap_or_default()
    }

    pub fn merged_with(&self, over: &ThemeConfig) -> ThemeConfig {
        let policy = self.sidebar_policy(over);

        let sidebar = match (policy, &self.sidebar, &over.sidebar) {
            (_, base, None) => base.clone(),
            (SequenceMerge::Replace, _, Some(over)) => Some(over.clone()),
            (SequenceMerge::Append, None, Some(over)) => Some(over.clone()),
            (SequenceMerge::Append, Some(base), Some(over)) => {
                Some(base.iter().chain(over.iter()).cloned().collect())
            }
        };

        ThemeConfig {
            nav: pick(&self.nav, &over.nav),
            sidebar,
            search: pick(&self.search, &over.search),
            sidebar_merge: Some(policy),
        }
    }
}

impl PluginOptions {
    pub fn merged_with(&self, over: &PluginOptions) -> PluginOptions {
        let mut merged = self.0.clone();
        for (name, options) in &over.0 {
            match merged.get_mut(name) {
                Some(existing) => merge_json(existing, options),
                None => {
                    merged.insert(name.clone(), options.clone());
                }
            }
        }
        PluginOptions(merged)
    }
}

/// Deep-merge `over` into `base`: objects merge key by key, anything else
/// is replaced.
pub fn merge_json(base: &mut Value, over: &Value) {
    match (base, over) {
        (Value::Object(base), Value::Object(over)) => {
            for (key, value) in over {
                match base.get_mut(key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, over) => *base = over.clone(),
    }
}

fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
    over.as_ref().or(base.as_ref()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NavEntry, SearchConfig, SearchProvider, SidebarItem};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn layer(source: &str) -> SiteConfig {
        SiteConfig::from_toml_str(source).unwrap()
    }

    #[test]
    fn override_scalars_win_when_present() {
        let base = layer(
            r#"
lang = "en-US"
title = "Base"
description = "Base description"
ignoreDeadLinks = false
"#,
        );
        let over = layer(
            r#"
lang = "en-EN"
title = "Site"
ignoreDeadLinks = true
cleanUrls = true
"#,
        );

        let merged = base.merged_with(&over);

        assert_eq!(merged.lang.as_deref(), Some("en-EN"));
        assert_eq!(merged.title.as_deref(), Some("Site"));
        assert_eq!(merged.description.as_deref(), Some("Base description"));
        assert_eq!(merged.ignore_dead_links, Some(true));
        assert_eq!(merged.clean_urls, Some(true));
        assert_eq!(merged.last_updated, None);
    }

    #[test]
    fn merge_with_empty_layer_keeps_base() {
        let base = layer(
            r#"
title = "Base"
description = "Kept"
[themeConfig]
nav = [{ text = "Home", link = "/" }]
"#,
        );

        let merged = base.merged_with(&SiteConfig::default());

        assert_eq!(merged.title, base.title);
        assert_eq!(merged.description, base.description);
        assert_eq!(merged.theme_config.nav, base.theme_config.nav);
    }

    #[test]
    fn nav_is_replaced_not_concatenated() {
        let base = layer("[themeConfig]\nnav = [{ text = \"Home\", link = \"/\" }]");
        let over = layer(
            "[themeConfig]\nnav = [{ text = \"Home page\", link = \"/\" }, { text = \"API\", link = \"/api\" }]",
        );

        let merged = base.merged_with(&over);

        assert_eq!(
            merged.theme_config.nav,
            Some(vec![
                NavEntry::new("Home page", "/"),
                NavEntry::new("API", "/api")
            ])
        );
    }

    #[test]
    fn sidebar_replace_policy_is_default() {
        let base = layer(
            "[themeConfig]\nsidebar = [{ text = \"Home\", link = \"/\" }, { placeholder = \"sidebar-items\" }]",
        );
        let over = layer("[themeConfig]\nsidebar = []");

        let merged = base.merged_with(&over);

        assert_eq!(merged.theme_config.sidebar, Some(vec![]));
        assert_eq!(
            merged.theme_config.sidebar_merge,
            Some(SequenceMerge::Replace)
        );
    }

    #[test]
    fn sidebar_append_policy_concatenates() {
        let base = layer(
            "[themeConfig]\nsidebar = [{ text = \"Home\", link = \"/\" }, { placeholder = \"sidebar-items\" }]",
        );
        let over = layer(
            "[themeConfig]\nsidebarMerge = \"append\"\nsidebar = [{ text = \"About\", link = \"/about\" }]",
        );

        let merged = base.merged_with(&over);

        assert_eq!(
            merged.theme_config.sidebar,
            Some(vec![
                SidebarItem::link("Home", "/"),
                SidebarItem::marker(),
                SidebarItem::link("About", "/about"),
            ])
        );
    }

    #[test]
    fn base_can_declare_append_policy() {
        let base = layer(
            "[themeConfig]\nsidebarMerge = \"append\"\nsidebar = [{ text = \"Home\", link = \"/\" }]",
        );
        let over = layer("[themeConfig]\nsidebar = [{ text = \"About\", link = \"/about\" }]");

        let merged = base.merged_with(&over);

        assert_eq!(merged.theme_config.sidebar.map(|s| s.len()), Some(2));
    }

    #[test]
    fn search_is_taken_from_override() {
        let base = layer("[themeConfig]\nsearch = { provider = \"algolia\" }");
        let over = layer("[themeConfig]\nsearch = { provider = \"local\" }");

        let merged = base.merged_with(&over);

        assert_eq!(
            merged.theme_config.search,
            Some(SearchConfig {
                provider: SearchProvider::Local
            })
        );
    }

    #[test]
    fn plugin_options_are_deep_merged() {
        let base = layer(
            r#"
[plugins.mermaid]
theme = "default"
flowchart = { useMaxWidth = true, htmlLabels = false }
"#,
        );
        let over = layer(
            r#"
[plugins.mermaid]
securityLevel = "loose"
flowchart = { htmlLabels = true }

[plugins.katex]
enabled = true
"#,
        );

        let merged = base.merged_with(&over);

        assert_eq!(
            merged.plugins.get("mermaid"),
            Some(&json!({
                "theme": "default",
                "securityLevel": "loose",
                "flowchart": { "useMaxWidth": true, "htmlLabels": true }
            }))
        );
        assert!(merged.plugins.contains("katex"));
    }

    #[test]
    fn merge_json_replaces_non_objects() {
        let mut base = json!({ "list": [1, 2], "flag": false });
        merge_json(&mut base, &json!({ "list": [3], "flag": { "nested": true } }));
        assert_eq!(base, json!({ "list": [3], "flag": { "nested": true } }));
    }
}
