//! Frame body blocks.

use super::{Inline, LiteralId, Math, Table};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A content block inside a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// One source line of running text
    Paragraph {
        /// Parsed inline content
        content: Vec<Inline>,
    },

    /// Two or more consecutive list items
    List(List),

    /// A pipe table
    Table(Table),

    /// `!(image.png)`
    Image(ImageRef),

    /// `![caption](image.png)`
    Figure {
        /// Embedded image
        image: ImageRef,
        /// Caption text
        caption: Vec<Inline>,
    },

    /// `!(source.rs)`
    Code(SourceInclusion),

    /// A paragraph made only of a multi-line math span
    Math(Math),

    /// Reference to a shielded literal block
    Literal {
        /// Registry entry
        id: LiteralId,
    },

    /// `...`
    Pause,
}

impl Block {
    /// Create a paragraph block.
    pub fn paragraph(content: Vec<Inline>) -> Self {
        Block::Paragraph { content }
    }

    /// Whether the block must be typeset in a fragile frame.
    pub fn needs_fragile(&self) -> bool {
        matches!(self, Block::Code(_) | Block::Literal { .. })
    }

    /// Whether the block needs the source highlighting package.
    pub fn needs_highlighting(&self) -> bool {
        self.needs_fragile()
    }
}

/// A list container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Items and pause markers in source order
    pub entries: Vec<ListEntry>,
}

impl List {
    /// Number of items, pause markers excluded.
    pub fn item_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, ListEntry::Item(_)))
            .count()
    }
}

/// One entry of a list container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ListEntry {
    /// `- text`
    Item(Vec<Inline>),
    /// Pause marker between items
    Pause,
}

/// An image reference resolved against the document location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Path as written in the document
    pub reference: String,
    /// Path handed to the typesetter
    pub path: PathBuf,
}

/// A source file embedded with syntax highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInclusion {
    /// Path as written in the document
    pub reference: String,
    /// Path handed to the typesetter
    pub path: PathBuf,
    /// Highlighting lexer name
    pub language: String,
    /// File contents, when inclusions are resolved at translation time
    pub contents: Option<String>,
}
