//! Inline content types.

use super::LiteralId;
use serde::{Deserialize, Serialize};

/// Inline content within a paragraph, list item, cell, caption or title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    /// Prose, escaped once at render time
    Text(String),

    /// `**text**`
    Bold(Vec<Inline>),

    /// `*text*`
    Italic(Vec<Inline>),

    /// `[text](url)`
    Link {
        /// Visible text
        text: Vec<Inline>,
        /// Target URL
        url: String,
    },

    /// `{text}(note)`
    Annotation {
        /// Annotated fragment
        text: Vec<Inline>,
        /// Note shown under the brace
        note: Vec<Inline>,
    },

    /// Reference to a shielded inline literal
    Literal(LiteralId),

    /// `$$...$$`
    Math(Math),
}

impl Inline {
    /// Create a text inline.
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }

    /// Collect the visible prose of a run of inlines, ignoring markup.
    pub fn plain_text(content: &[Inline]) -> String {
        let mut out = String::new();
        for item in content {
            match item {
                Inline::Text(t) => out.push_str(t),
                Inline::Bold(inner) | Inline::Italic(inner) => {
                    out.push_str(&Inline::plain_text(inner))
                }
                Inline::Link { text, .. } => out.push_str(&Inline::plain_text(text)),
                Inline::Annotation { text, .. } => out.push_str(&Inline::plain_text(text)),
                Inline::Literal(_) => {}
                Inline::Math(m) => out.push_str(&m.source),
            }
        }
        out
    }
}

/// A math span as written between double-dollar markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Math {
    /// Enclosed source, untouched
    pub source: String,
}

impl Math {
    /// Create a math span.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Whether the span crosses a line break and renders as aligned rows.
    pub fn is_multiline(&self) -> bool {
        self.source.contains('\n')
    }

    /// Non-empty rows of a multi-line span.
    pub fn rows(&self) -> Vec<&str> {
        self.source
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}
