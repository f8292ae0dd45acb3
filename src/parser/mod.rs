//! Slide markup parsing module.
//!
//! Parsing runs in two phases. Literal spans are first shielded into a
//! registry so that no later rule can rewrite them, then the remaining text
//! is segmented into sections and frames and parsed into blocks.

mod block;
mod include;
mod inline;
mod list;
mod normalize;
mod options;
mod segment;
mod shield;

pub use block::{parse_body, BodyContext};
pub use include::{is_image, language_for, FALLBACK_LANGUAGE, IMAGE_EXTENSIONS};
pub use inline::parse_inlines;
pub use normalize::normalize;
pub use options::ParseOptions;
pub use segment::{Segmenter, TitleState};
pub use shield::{extract, restore, Segment, ShieldedLine, LITERAL_INDENT};

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::Document;

/// Parser for slide markup sources.
pub struct SlideParser {
    source: String,
    options: ParseOptions,
}

impl SlideParser {
    /// Open a markup file, resolving inclusions next to it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a markup file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        log::debug!("Read {} bytes from {}", source.len(), path.display());
        Ok(Self {
            source,
            options: options.for_source_file(path),
        })
    }

    /// Create a parser over in-memory markup.
    pub fn from_source(source: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            source: source.into(),
            options,
        }
    }

    /// Parse options in effect.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse the source into a document.
    pub fn parse(&self) -> Result<Document> {
        parse_document(&self.source, &self.options)
    }
}

/// Parse markup text into a document.
pub fn parse_document(source: &str, options: &ParseOptions) -> Result<Document> {
    let text = normalize(source, options);
    let (lines, literals) = extract(&text);
    log::debug!(
        "Shielded {} literal(s) across {} line(s)",
        literals.len(),
        lines.len()
    );

    let ctx = BodyContext {
        registry: &literals,
        options,
    };
    let parts = Segmenter::new(&ctx).segment(&lines)?;

    Ok(Document { parts, literals })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Inline, Part};

    #[test]
    fn test_parse_document() {
        let doc = parse_document(
            "## Hello\n\n- one\n- two\n",
            &ParseOptions::new().offline(),
        )
        .unwrap();
        assert_eq!(doc.parts.len(), 1);
        let Part::Frame(frame) = &doc.parts[0] else {
            panic!("Expected frame");
        };
        assert_eq!(frame.title, Some(vec![Inline::text("Hello")]));
        assert!(matches!(frame.blocks[0], Block::List(_)));
    }

    #[test]
    fn test_literal_survives_parsing() {
        let doc = parse_document("## T\nuse `**x**` here\n", &ParseOptions::new().offline())
            .unwrap();
        assert_eq!(doc.literals.len(), 1);
        assert_eq!(doc.literals.iter().next().unwrap().text, "**x**");
    }

    #[test]
    fn test_parser_from_source() {
        let parser = SlideParser::from_source("text", ParseOptions::new().offline());
        assert!(!parser.options().resolve_inclusions);
        assert_eq!(parser.parse().unwrap().parts.len(), 1);
    }
}
