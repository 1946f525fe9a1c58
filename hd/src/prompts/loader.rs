//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to
//! embedded defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;

/// Where a template would be loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    /// `<dir>/<name>.pmt` in the override directory
    Override(PathBuf),
    /// Compiled into the binary
    Embedded,
    /// Not available anywhere
    Missing,
}

impl fmt::Display for PromptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override(path) => write!(f, "{}", path.display()),
            Self::Embedded => write!(f, "embedded"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.housedesign/prompts/`)
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that prefers templates found in `override_dir`
    ///
    /// A directory that does not exist is ignored.
    pub fn new(override_dir: impl AsRef<Path>) -> Self {
        let override_dir = override_dir.as_ref();
        let exists = override_dir.is_dir();
        debug!(?override_dir, %exists, "PromptLoader::new: called");

        Self {
            hbs: Self::engine(),
            override_dir: exists.then(|| override_dir.to_path_buf()),
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            override_dir: None,
        }
    }

    // Prompts are plain text, HTML escaping would mangle quotes in user messages
    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Resolve where `name` would be loaded from without reading it
    pub fn source_of(&self, name: &str) -> PromptSource {
        if let Some(dir) = &self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.is_file() {
                return PromptSource::Override(path);
            }
        }
        if embedded::get_embedded(name).is_some() {
            PromptSource::Embedded
        } else {
            PromptSource::Missing
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `<override_dir>/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        match self.source_of(name) {
            PromptSource::Override(path) => {
                debug!(?path, "PromptLoader::load_template: found in user override");
                std::fs::read_to_string(&path).map_err(|e| eyre!("Failed to read user prompt {}: {}", path.display(), e))
            }
            PromptSource::Embedded => {
                debug!(%name, "PromptLoader::load_template: found in embedded");
                embedded::get_embedded(name)
                    .map(str::to_string)
                    .ok_or_else(|| eyre!("Prompt template not found: {}", name))
            }
            PromptSource::Missing => {
                debug!(%name, "PromptLoader::load_template: not found anywhere");
                Err(eyre!("Prompt template not found: {}", name))
            }
        }
    }

    /// Render a template with the given context
    pub fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }
}
