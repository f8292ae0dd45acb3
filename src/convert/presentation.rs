//! The slide presentation template.

use crate::error::Result;
use crate::model::Document;
use crate::parser::{parse_document, ParseOptions};
use crate::render::{to_beamer, to_beamer_with_stats, RenderOptions};

use super::{Template, TranslateResult};

/// Presentation template.
///
/// Translates markup into a slide deck for the beamer document class.
#[derive(Debug, Clone, Default)]
pub struct PresentationTemplate {
    _private: (),
}

impl PresentationTemplate {
    /// Create a new presentation template.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Template for PresentationTemplate {
    fn name(&self) -> &str {
        "presentation"
    }

    fn description(&self) -> &str {
        "Slide deck (beamer)"
    }

    fn parse(&self, src: &str, options: &ParseOptions) -> Result<Document> {
        parse_document(src, options)
    }

    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<TranslateResult> {
        log::debug!(
            "Rendering {} section(s) and {} slide(s)",
            doc.section_count(),
            doc.slide_count()
        );
        if options.collect_stats {
            let result = to_beamer_with_stats(doc, options)?;
            Ok(TranslateResult::new(result.content, self.name()).with_stats(result.stats))
        } else {
            let content = to_beamer(doc, options)?;
            Ok(TranslateResult::new(content, self.name()))
        }
    }
}
