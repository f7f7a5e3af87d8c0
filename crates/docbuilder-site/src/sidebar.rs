//! Sidebar sections generated from menu records.
//!
//! Records are grouped by the first segment of their category into
//! sections, and by the second segment into subsections. Deeper segments
//! stay in their subsection.

use std::collections::BTreeMap;

use docbuilder_config::SidebarItem;
use docbuilder_markdown::{format_title, normalize_category_path};

use crate::collect::MenuRecord;

/// Title of the section holding root-level documents.
pub const GENERAL_SECTION: &str = "General";

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub key: String,
    pub title: String,
    pub items: Vec<MenuRecord>,
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subsection {
    pub key: String,
    pub title: String,
    pub items: Vec<MenuRecord>,
}

/// Group records into sections, sorted by key. Within each group `index`
/// pages come first, then titles in case-insensitive order.
pub fn build_sections(records: &[MenuRecord]) -> Vec<Section> {
    let mut sections: BTreeMap<String, (Vec<MenuRecord>, BTreeMap<String, Vec<MenuRecord>>)> =
        BTreeMap::new();

    for record in records {
        let category = normalize_category_path(&record.category_path);
        let mut parts = category.split('/').filter(|p| !p.is_empty());
        let root = parts.next().unwrap_or("").to_string();
        let (items, subs) = sections.entry(root.clone()).or_default();

        match parts.next() {
            Some(sub) => subs
                .entry(format!("{root}/{sub}"))
                .or_default()
                .push(record.clone()),
            None => items.push(record.clone()),
        }
    }

    sections
        .into_iter()
        .map(|(key, (mut items, subs))| {
            sort_records(&mut items);
            let subsections = subs
                .into_iter()
                .map(|(key, mut items)| {
                    sort_records(&mut items);
                    let title = format_title(key.rsplit('/').next().unwrap_or(&key));
                    Subsection { key, title, items }
                })
                .collect();
            let title = if key.is_empty() {
                GENERAL_SECTION.to_string()
            } else {
                format_title(&key)
            };
            Section {
                key,
                title,
                items,
                subsections,
            }
        })
        .collect()
}

/// Turn sections into collapsed sidebar groups.
pub fn sections_to_sidebar(sections: &[Section]) -> Vec<SidebarItem> {
    sections
        .iter()
        .map(|section| {
            let mut items: Vec<SidebarItem> = section.items.iter().map(record_item).collect();
            items.extend(section.subsections.iter().map(|sub| {
                SidebarItem::group(sub.title.clone(), sub.items.iter().map(record_item).collect())
            }));
            SidebarItem::group(section.title.clone(), items)
        })
        .collect()
}

fn record_item(record: &MenuRecord) -> SidebarItem {
    SidebarItem::link(record.title.clone(), record.link())
}

fn sort_records(items: &mut [MenuRecord]) {
    items.sort_by(|a, b| {
        (a.slug != "index")
            .cmp(&(b.slug != "index"))
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_hierarchies() {
        let records = vec![
            MenuRecord::new("", "build-readme", "System Overview"),
            MenuRecord::new("guides", "index", "Guides Home"),
            MenuRecord::new("guides/advanced", "index", "Advanced Home"),
            MenuRecord::new("guides/advanced", "deep-dive", "Deep Dive"),
        ];

        let sections = build_sections(&records);

        assert_eq!(sections.len(), 2);

        let general = &sections[0];
        assert_eq!(general.title, "General");
        assert_eq!(general.items.len(), 1);
        assert_eq!(general.items[0].slug, "build-readme");

        let guides = &sections[1];
        assert_eq!(guides.title, "Guides");
        assert_eq!(guides.items.len(), 1);
        assert_eq!(guides.items[0].slug, "index");
        assert_eq!(guides.subsections.len(), 1);

        let sub = &guides.subsections[0];
        assert_eq!(sub.key, "guides/advanced");
        assert_eq!(sub.title, "Advanced");
        assert_eq!(sub.items.len(), 2);
        assert_eq!(sub.items[0].slug, "index");
    }

    #[test]
    fn sorts_index_first_then_title() {
        let records = vec![
            MenuRecord::new("guides", "zeta", "zeta"),
            MenuRecord::new("guides", "alpha", "Alpha"),
            MenuRecord::new("guides", "index", "Welcome"),
            MenuRecord::new("guides", "beta", "beta"),
        ];

        let sections = build_sections(&records);
        let slugs: Vec<_> = sections[0].items.iter().map(|r| r.slug.as_str()).collect();

        assert_eq!(slugs, vec!["index", "alpha", "beta", "zeta"]);
    }

    #[test]
    fn renders_sidebar_groups() {
        let records = vec![
            MenuRecord::new("platform", "tour", "Platform Tour"),
            MenuRecord::new("platform/mobile", "index", "Mobile"),
        ];

        let sidebar = sections_to_sidebar(&build_sections(&records));

        assert_eq!(
            sidebar,
            vec![SidebarItem::group(
                "Platform",
                vec![
                    SidebarItem::link("Platform Tour", "/platform/tour"),
                    SidebarItem::group(
                        "Mobile",
                        vec![SidebarItem::link("Mobile", "/platform/mobile/index")]
                    ),
                ]
            )]
        );
    }

    #[test]
    fn no_records_no_sidebar() {
        assert!(sections_to_sidebar(&build_sections(&[])).is_empty());
    }
}
