//! Base + override composition.

use crate::error::ConfigError;
use crate::model::{SequenceMerge, SidebarItem, SiteConfig};
use crate::placeholder::substitute;
use crate::validate::validate;

/// Merge `over` onto `base`, splice `generated` into the sidebar placeholder
/// and validate the result.
///
/// A missing placeholder is an error when there are generated entries to
/// place, unless the override replaced the sidebar wholesale: under the
/// `replace` policy an override that declares its own sidebar owns it, and
/// the generated entries are dropped.
pub fn compose(
    base: &SiteConfig,
    over: &SiteConfig,
    generated: &[SidebarItem],
) -> Result<SiteConfig, ConfigError> {
    let mut merged = base.merged_with(over);

    let policy = base.theme_config.sidebar_policy(&over.theme_config);
    let override_owns_sidebar =
        policy == SequenceMerge::Replace && over.theme_config.sidebar.is_some();

    if let Some(sidebar) = merged.theme_config.sidebar.take() {
        let result = substitute(&sidebar, generated);
        if !result.marker_found && !generated.is_empty() {
            if !override_owns_sidebar {
                return Err(ConfigError::MissingPlaceholder {
                    count: generated.len(),
                });
            }
            tracing::debug!(
                "Override replaced the sidebar, dropping {} generated entries",
                generated.len()
            );
        }
        merged.theme_config.sidebar = Some(result.sidebar);
    } else if !generated.is_empty() {
        return Err(ConfigError::MissingPlaceholder {
            count: generated.len(),
        });
    }

    validate(&merged)?;
    Ok(merged)
}
