//! Document model types for marktex content representation.
//!
//! This module defines the intermediate representation (IR) that bridges
//! markup parsing and LaTeX rendering. Literal spans never appear as text in
//! the model: they are referenced by [`LiteralId`] and live in the
//! document's [`LiteralRegistry`] until the renderer restores them.

mod block;
mod document;
mod inline;
mod literal;
mod table;

pub use block::{Block, ImageRef, List, ListEntry, SourceInclusion};
pub use document::{Document, Frame, Part};
pub use inline::{Inline, Math};
pub use literal::{LiteralId, LiteralKind, LiteralRegistry, ShieldedLiteral};
pub use table::{ColumnAlign, Table, TableCell, TableRow};
