//! Workflow description.

const WORKFLOW: &str = r#"doc-builder helper

This CLI automates converting markdown files that follow a shared prefix into a
ready-to-ship VitePress site. The workflow is:
  1. Scan the provided search path for markdown files starting with the prefix
     (default DOC_), skipping vendor and VCS directories.
  2. Copy matching files into a clean temporary workspace under the docs
     directory, deriving slugs, titles, and categories from front matter.
  3. Merge any existing markdown that already lives in the documentation folder
     so that hand-written content is preserved.
  4. Compose the site config: .vitepress/base.config.toml, overlaid with the
     optional .vitepress/site.config.toml, with the generated sidebar spliced in
     where the base declares { placeholder = "sidebar-items" }.
  5. Install Node.js dependencies inside the temp directory when needed and run
     'npm run docs:build' using the selected engine (currently only VitePress).
  6. Copy the generated .vitepress/dist output back to the main docs workspace.

Typical usage:
  doc-builder --search ../ --doc-dir . --prefix DOC_ --engine vitepress

Flags may also be set in a docbuilder.toml [build] table; flags win.

The process stops with a descriptive error if expected files like
.vitepress/base.config.toml or package.json cannot be found, or if the
composed config is invalid.
"#;

/// Print the workflow description.
pub fn run() {
    println!("{WORKFLOW}");
}
