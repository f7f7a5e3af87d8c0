//! Post-composition checks.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::model::{SidebarItem, SiteConfig};

/// Check a resolved config: required fields, link shape, sidebar uniqueness.
pub fn validate(config: &SiteConfig) -> Result<(), ConfigError> {
    require("title", &config.title)?;
    require("description", &config.description)?;

    if let Some(nav) = &config.theme_config.nav {
        for (i, entry) in nav.iter().enumerate() {
            check_link(&format!("themeConfig.nav[{i}].link"), &entry.link)?;
        }
    }

    if let Some(sidebar) = &config.theme_config.sidebar {
        check_level("themeConfig.sidebar", sidebar)?;
    }

    Ok(())
}

/// A link is root-relative when it starts with a single `/`.
pub fn is_root_relative(link: &str) -> bool {
    link.starts_with('/') && !link.starts_with("//")
}

fn require(field: &'static str, value: &Option<String>) -> Result<(), ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ConfigError::MissingRequiredField(field)),
    }
}

fn check_link(field: &str, link: &str) -> Result<(), ConfigError> {
    if is_root_relative(link) {
        Ok(())
    } else {
        Err(ConfigError::MalformedLink {
            field: field.to_string(),
            link: link.to_string(),
        })
    }
}

fn check_level(path: &str, items: &[SidebarItem]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for (i, item) in items.iter().enumerate() {
        let field = format!("{path}[{i}]");
        let entry = match item {
            SidebarItem::Entry(entry) => entry,
            SidebarItem::Placeholder(_) => {
                return Err(ConfigError::UnresolvedPlaceholder(field));
            }
        };

        if let Some(link) = &entry.link {
            let link_field = format!("{field}.link");
            check_link(&link_field, link)?;
            if !seen.insert(link.as_str()) {
                return Err(ConfigError::DuplicateSidebarLink {
                    field: link_field,
                    link: link.clone(),
                });
            }
        }

        check_level(&format!("{field}.items"), &entry.items)?;
    }

    Ok(())
}
