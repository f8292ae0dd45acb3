//! Template registry for translating markup into typesetting source.
//!
//! A template pairs a parser configuration with a renderer and its
//! header/footer. Templates are registered by name and selected at
//! translation time.
//!
//! # Example
//!
//! ```no_run
//! use marktex::convert::{TemplateRegistry, TranslateOptions};
//!
//! fn main() -> marktex::Result<()> {
//!     let registry = TemplateRegistry::with_defaults();
//!     let result = registry.translate("## Hello\n\nWorld\n", &TranslateOptions::default())?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod presentation;

pub use presentation::PresentationTemplate;

use crate::error::{Error, Result};
use crate::model::Document;
use crate::parser::ParseOptions;
use crate::render::{RenderOptions, TranslationStats};
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the template used when none is requested.
pub const DEFAULT_TEMPLATE: &str = "presentation";

/// Options for one translation.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Template name
    pub template: String,

    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,
}

impl TranslateOptions {
    /// Create new translation options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a template by name.
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template = name.into();
        self
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.render.collect_stats = collect;
        self
    }
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            parse: ParseOptions::default(),
            render: RenderOptions::default(),
        }
    }
}

/// Result of a translation.
#[derive(Debug, Clone)]
pub struct TranslateResult {
    /// Complete typesetting source
    pub content: String,

    /// Name of the template that produced it
    pub template: String,

    /// Translation statistics (if collected)
    pub stats: Option<TranslationStats>,
}

impl TranslateResult {
    /// Create a new translation result.
    pub fn new(content: String, template: impl Into<String>) -> Self {
        Self {
            content,
            template: template.into(),
            stats: None,
        }
    }

    /// Set translation statistics.
    pub fn with_stats(mut self, stats: TranslationStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Trait for output templates.
///
/// Implement this trait to add another rule set and header/footer pair.
pub trait Template: Send + Sync {
    /// Name the template is registered under.
    fn name(&self) -> &str;

    /// Short human-readable description.
    fn description(&self) -> &str;

    /// Parse markup into a document.
    fn parse(&self, src: &str, options: &ParseOptions) -> Result<Document>;

    /// Render a parsed document to complete typesetting source.
    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<TranslateResult>;

    /// Parse and render in one step.
    fn translate(&self, src: &str, options: &TranslateOptions) -> Result<TranslateResult> {
        let doc = self.parse(src, &options.parse)?;
        self.render(&doc, &options.render)
    }
}

/// Registry of templates keyed by name.
pub struct TemplateRegistry {
    templates: HashMap<String, Arc<dyn Template>>,
}

impl TemplateRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Create a registry with the built-in templates.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PresentationTemplate::new()));
        registry
    }

    /// Register a template under its name.
    pub fn register(&mut self, template: Arc<dyn Template>) {
        self.templates
            .insert(template.name().to_lowercase(), template);
    }

    /// Get a template by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Template>> {
        self.templates.get(&name.to_lowercase()).cloned()
    }

    /// Look up a template, failing for unknown names.
    pub fn require(&self, name: &str) -> Result<Arc<dyn Template>> {
        self.get(name)
            .ok_or_else(|| Error::UnknownTemplate(name.to_string()))
    }

    /// Names of all registered templates, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Translate markup with the template named in the options.
    pub fn translate(&self, src: &str, options: &TranslateOptions) -> Result<TranslateResult> {
        self.require(&options.template)?.translate(src, options)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
