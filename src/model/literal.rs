//! Shielded literal spans.

use serde::{Deserialize, Serialize};

/// Index of a literal in a [`LiteralRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiteralId(pub usize);

/// Which literal form a span was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    /// Run of lines indented by at least two spaces
    Block,
    /// Single-backtick span, backticks stripped
    Inline,
}

/// A literal captured from the source, reproduced without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldedLiteral {
    /// Position in the registry
    pub id: LiteralId,
    /// Literal form
    pub kind: LiteralKind,
    /// Original text, byte for byte
    pub text: String,
}

/// Ordered registry of shielded literals for one translation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralRegistry {
    entries: Vec<ShieldedLiteral>,
}

impl LiteralRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a literal and return its identity.
    pub fn push(&mut self, kind: LiteralKind, text: impl Into<String>) -> LiteralId {
        let id = LiteralId(self.entries.len());
        self.entries.push(ShieldedLiteral {
            id,
            kind,
            text: text.into(),
        });
        id
    }

    /// Look up a captured literal.
    pub fn get(&self, id: LiteralId) -> Option<&ShieldedLiteral> {
        self.entries.get(id.0)
    }

    /// Number of captured literals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over literals in capture order.
    pub fn iter(&self) -> impl Iterator<Item = &ShieldedLiteral> {
        self.entries.iter()
    }

    /// Whether any literal block was captured.
    pub fn has_blocks(&self) -> bool {
        self.entries.iter().any(|l| l.kind == LiteralKind::Block)
    }
}
