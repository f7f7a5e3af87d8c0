//! Template engine for rendering engine config modules.

use minijinja::{context, AutoEscape, Environment};

/// An ES module import line.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Import {
    /// Imported binding
    pub name: String,
    /// Module specifier
    pub module: String,
}

impl Import {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
        }
    }
}

/// Context for rendering a config module.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConfigContext {
    /// Imports at the top of the module
    pub imports: Vec<Import>,
    /// Function wrapping the exported object (e.g. `defineConfig`)
    pub wrapper: String,
    /// The config object, already serialized
    pub body: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Output is JavaScript, the body is pre-serialized JSON
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_template_owned("config.js".to_string(), CONFIG_TEMPLATE.to_string())
            .expect("Failed to add config template");

        Self { env }
    }

    /// Render a config module.
    pub fn render_config(&self, context: &ConfigContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("config.js")?;

        tmpl.render(context! {
            imports => &context.imports,
            wrapper => &context.wrapper,
            body => &context.body,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const CONFIG_TEMPLATE: &str = r#"// Generated by doc-builder. Edit base.config.toml or site.config.toml instead.
{% for item in imports %}import { {{ item.name }} } from '{{ item.module }}'
{% endfor %}
export default {{ wrapper }}({{ body }})
"#;
