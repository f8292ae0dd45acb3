//! Document-level types.

use super::{Block, ImageRef, Inline, LiteralRegistry};
use serde::{Deserialize, Serialize};

/// A parsed marktex document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Sections and slides in source order
    pub parts: Vec<Part>,

    /// Literals shielded from every markup rule
    pub literals: LiteralRegistry,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the document has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate over ordinary frames.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.parts.iter().filter_map(|p| match p {
            Part::Frame(f) => Some(f),
            _ => None,
        })
    }

    /// Number of rendered pages: frames, plain-title and picture slides.
    pub fn slide_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| !matches!(p, Part::Section { .. }))
            .count()
    }

    /// Number of section markers.
    pub fn section_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, Part::Section { .. }))
            .count()
    }

    /// Whether any source inclusion or literal block needs highlighting.
    pub fn needs_highlighting(&self) -> bool {
        self.literals.has_blocks()
            || self
                .frames()
                .flat_map(|f| &f.blocks)
                .any(Block::needs_highlighting)
    }
}

/// A top-level piece of the presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    /// `# Title`
    Section {
        /// Section title
        title: Vec<Inline>,
    },

    /// A frame with body content
    Frame(Frame),

    /// `## Title` with no body
    PlainTitle {
        /// Slide title
        title: Vec<Inline>,
    },

    /// `![#Title](image.png)`, a full-page picture slide
    PictureSlide {
        /// Slide title
        title: Vec<Inline>,
        /// The picture
        image: ImageRef,
    },
}

/// A frame wrapper around body blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Frame title, `None` for leading untitled content
    pub title: Option<Vec<Inline>>,

    /// Body blocks
    pub blocks: Vec<Block>,
}

impl Frame {
    /// Create a frame.
    pub fn new(title: Option<Vec<Inline>>, blocks: Vec<Block>) -> Self {
        Self { title, blocks }
    }

    /// Whether the frame holds verbatim material.
    pub fn is_fragile(&self) -> bool {
        self.blocks.iter().any(Block::needs_fragile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LiteralKind;

    #[test]
    fn test_document_counts() {
        let mut doc = Document::new();
        assert!(doc.is_empty());

        doc.parts.push(Part::Section {
            title: vec![Inline::text("Intro")],
        });
        doc.parts.push(Part::Frame(Frame::new(
            Some(vec![Inline::text("Intro")]),
            vec![Block::Pause],
        )));
        doc.parts.push(Part::PlainTitle {
            title: vec![Inline::text("Pictures")],
        });

        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.slide_count(), 2);
        assert_eq!(doc.frames().count(), 1);
        assert!(!doc.needs_highlighting());
    }

    #[test]
    fn test_literal_block_needs_highlighting() {
        let mut doc = Document::new();
        let id = doc.literals.push(LiteralKind::Block, "  x\n");
        let frame = Frame::new(None, vec![Block::Literal { id }]);
        assert!(frame.is_fragile());
        doc.parts.push(Part::Frame(frame));
        assert!(doc.needs_highlighting());
    }
}
