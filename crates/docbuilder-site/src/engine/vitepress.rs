//! VitePress engine.

use serde_json::Value;

use docbuilder_config::SiteConfig;

use crate::engine::{EngineError, SiteEngine};
use crate::templates::{ConfigContext, Import, TemplateEngine};

/// Plugins that wrap the exported config, with their wrapper and module.
const WRAPPING_PLUGINS: &[(&str, &str, &str)] =
    &[("mermaid", "withMermaid", "vitepress-plugin-mermaid")];

/// Renders `.vitepress/config.js` and runs `npm run docs:build`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VitePressEngine;

impl VitePressEngine {
    /// Config object as the engine reads it: plugin options become top-level
    /// keys named after the plugin.
    fn config_object(config: &SiteConfig) -> Result<Value, EngineError> {
        let mut value = serde_json::to_value(config)?;

        if let Value::Object(map) = &mut value {
            map.remove("plugins");
            for (name, options) in config.plugins.iter() {
                if map.contains_key(name) {
                    tracing::warn!(
                        "Plugin '{}' clashes with a site config key, options ignored",
                        name
                    );
                    continue;
                }
                map.insert(name.clone(), options.clone());
            }
        }

        Ok(value)
    }
}

impl SiteEngine for VitePressEngine {
    fn name(&self) -> &'static str {
        "vitepress"
    }

    fn config_dir(&self) -> &'static str {
        ".vitepress"
    }

    fn base_config_file(&self) -> &'static str {
        "base.config.toml"
    }

    fn override_config_file(&self) -> &'static str {
        "site.config.toml"
    }

    fn output_config_file(&self) -> &'static str {
        "config.js"
    }

    fn dist_dir(&self) -> &'static str {
        "dist"
    }

    fn build_script(&self) -> &'static str {
        "docs:build"
    }

    fn render_config(&self, config: &SiteConfig) -> Result<String, EngineError> {
        let body = serde_json::to_string_pretty(&Self::config_object(config)?)?;

        let wrapper = WRAPPING_PLUGINS
            .iter()
            .find(|(plugin, _, _)| config.plugins.contains(plugin));

        let (imports, wrapper) = match wrapper {
            Some((_, function, module)) => (vec![Import::new(*function, *module)], *function),
            None => (vec![Import::new("defineConfig", "vitepress")], "defineConfig"),
        };

        let js = TemplateEngine::new().render_config(&ConfigContext {
            imports,
            wrapper: wrapper.to_string(),
            body,
        })?;

        Ok(js)
    }
}
