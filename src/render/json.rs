//! JSON dump of the parsed document model.
//!
//! The dump carries the model as-is plus a few derived counts, so tools can
//! inspect how markup was segmented without re-running the parser.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Document;

/// Layout of the JSON dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Indented, one field per line
    #[default]
    Pretty,
    /// Single line
    Compact,
}

#[derive(Serialize)]
struct DocumentDump<'a> {
    sections: usize,
    slides: usize,
    highlighting: bool,
    #[serde(flatten)]
    document: &'a Document,
}

impl<'a> DocumentDump<'a> {
    fn new(document: &'a Document) -> Self {
        Self {
            sections: document.section_count(),
            slides: document.slide_count(),
            highlighting: document.needs_highlighting(),
            document,
        }
    }
}

/// Dump a document as JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let dump = DocumentDump::new(doc);
    match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&dump),
        JsonFormat::Compact => serde_json::to_string(&dump),
    }
    .map_err(|e| Error::Render(format!("Cannot dump document as JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Frame, Inline, LiteralKind, Part};

    fn deck() -> Document {
        let mut doc = Document::new();
        doc.parts.push(Part::Section {
            title: vec![Inline::text("Intro")],
        });
        let id = doc.literals.push(LiteralKind::Block, "  let x = 1;\n");
        doc.parts.push(Part::Frame(Frame::new(
            Some(vec![Inline::text("Intro")]),
            vec![
                Block::paragraph(vec![Inline::text("Hello")]),
                Block::Literal { id },
            ],
        )));
        doc
    }

    #[test]
    fn test_dump_carries_counts_and_model() {
        let json = to_json(&deck(), JsonFormat::Pretty).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["sections"], 1);
        assert_eq!(value["slides"], 1);
        assert_eq!(value["highlighting"], true);
        assert_eq!(value["parts"][0]["type"], "section");
        assert!(json.contains("let x = 1;"));
    }

    #[test]
    fn test_compact_is_single_line() {
        let json = to_json(&deck(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with("{\"sections\":1"));
    }
}
