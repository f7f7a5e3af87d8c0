//! Sidebar placeholder substitution.

use crate::model::{SidebarItem, SidebarPlaceholder};

/// Result of splicing generated entries into a sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    pub sidebar: Vec<SidebarItem>,
    /// Whether a placeholder was found and replaced
    pub marker_found: bool,
}

/// Replace the first placeholder (depth-first) with `generated`.
///
/// Later placeholders are dropped. A sidebar without a placeholder comes back
/// unchanged, so substituting twice is the same as substituting once.
pub fn substitute(sidebar: &[SidebarItem], generated: &[SidebarItem]) -> Substituted {
    let mut marker_found = false;
    let sidebar = splice(sidebar, generated, &mut marker_found);
    Substituted {
        sidebar,
        marker_found,
    }
}

fn splice(items: &[SidebarItem], generated: &[SidebarItem], found: &mut bool) -> Vec<SidebarItem> {
    let mut out = Vec::with_capacity(items.len() + generated.len());

    for item in items {
        match item {
            SidebarItem::Placeholder(SidebarPlaceholder { placeholder }) => {
                if *found {
                    tracing::warn!("Dropping extra sidebar placeholder {:?}", placeholder);
                } else {
                    out.extend(generated.iter().cloned());
                    *found = true;
                }
            }
            SidebarItem::Entry(entry) => {
                let mut entry = entry.clone();
                if !entry.items.is_empty() {
                    entry.items = splice(&entry.items, generated, found);
                }
                out.push(SidebarItem::Entry(entry));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn replaces_marker_with_generated_items() {
        let sidebar = vec![SidebarItem::link("Home", "/"), SidebarItem::marker()];
        let generated = vec![SidebarItem::link("Page", "/page")];

        let result = substitute(&sidebar, &generated);

        assert!(result.marker_found);
        assert_eq!(
            result.sidebar,
            vec![
                SidebarItem::link("Home", "/"),
                SidebarItem::link("Page", "/page")
            ]
        );
    }

    #[test]
    fn keeps_position_of_marker() {
        let sidebar = vec![
            SidebarItem::link("Home", "/"),
            SidebarItem::marker(),
            SidebarItem::link("About", "/about"),
        ];
        let generated = vec![
            SidebarItem::link("One", "/one"),
            SidebarItem::link("Two", "/two"),
        ];

        let result = substitute(&sidebar, &generated);

        let links: Vec<_> = result
            .sidebar
            .iter()
            .map(|item| match item {
                SidebarItem::Entry(e) => e.link.clone().unwrap_or_default(),
                SidebarItem::Placeholder(_) => "marker".to_string(),
            })
            .collect();
        assert_eq!(links, vec!["/", "/one", "/two", "/about"]);
    }

    #[test]
    fn substitution_is_idempotent() {
        let sidebar = vec![SidebarItem::link("Home", "/"), SidebarItem::marker()];
        let generated = vec![SidebarItem::link("Page", "/page")];

        let once = substitute(&sidebar, &generated);
        let twice = substitute(&once.sidebar, &generated);

        assert!(!twice.marker_found);
        assert_eq!(twice.sidebar, once.sidebar);
    }

    #[test]
    fn finds_marker_inside_groups() {
        let sidebar = vec![SidebarItem::group(
            "Docs",
            vec![SidebarItem::link("Intro", "/intro"), SidebarItem::marker()],
        )];
        let generated = vec![SidebarItem::link("Page", "/page")];

        let result = substitute(&sidebar, &generated);

        assert!(result.marker_found);
        assert_eq!(
            result.sidebar,
            vec![SidebarItem::group(
                "Docs",
                vec![
                    SidebarItem::link("Intro", "/intro"),
                    SidebarItem::link("Page", "/page")
                ],
            )]
        );
    }

    #[test]
    fn only_first_marker_receives_items() {
        let sidebar = vec![SidebarItem::marker(), SidebarItem::marker()];
        let generated = vec![SidebarItem::link("Page", "/page")];

        let result = substitute(&sidebar, &generated);

        assert_eq!(result.sidebar, generated);
    }

    #[test]
    fn empty_generation_removes_marker() {
        let sidebar = vec![SidebarItem::link("Home", "/"), SidebarItem::marker()];

        let result = substitute(&sidebar, &[]);

        assert!(result.marker_found);
        assert_eq!(result.sidebar, vec![SidebarItem::link("Home", "/")]);
    }
}
