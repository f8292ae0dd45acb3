//! Presentation source rendering.
//!
//! Prose is escaped here and nowhere else: every `Inline::Text` leaf goes
//! through exactly one escaping function, and markup emitted by the renderer
//! itself is never escaped. Shielded literals are restored from the
//! registry at the leaves.

use crate::error::{Error, Result};
use crate::model::{
    Block, Document, Frame, ImageRef, Inline, LiteralId, LiteralRegistry, List, ListEntry, Math,
    Part, SourceInclusion, Table, TableRow,
};

use super::escape::{
    escape_cell, escape_literal, escape_literal_block, escape_prose, escape_url, latex_path,
};
use super::math::rewrite;
use super::preamble::wrap;
use super::{RenderOptions, RenderResult, TranslationStats};

/// Lexer used for indented literal blocks.
const LITERAL_BLOCK_LEXER: &str = "text";

/// Convert a document to complete presentation source.
pub fn to_beamer(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = BeamerRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to presentation source with statistics.
pub fn to_beamer_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = BeamerRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Where inline text is being written; cells also escape `&`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextContext {
    Prose,
    Cell,
}

/// Presentation renderer.
pub struct BeamerRenderer {
    options: RenderOptions,
    stats: TranslationStats,
}

impl BeamerRenderer {
    /// Create a new renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: TranslationStats::new(),
        }
    }

    /// Render a document to complete presentation source.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document with translation statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;
        Ok(RenderResult::new(content, self.stats))
    }

    /// Render only the body, without preamble and terminator.
    pub fn render_body(&mut self, doc: &Document) -> Result<String> {
        let mut pieces = Vec::with_capacity(doc.parts.len());
        for part in &doc.parts {
            pieces.push(self.render_part(part, &doc.literals)?);
        }
        Ok(pieces.join("\n\n"))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        let body = self.render_body(doc)?;
        Ok(wrap(&body, &self.options, doc.needs_highlighting()))
    }

    fn count(&mut self, f: impl FnOnce(&mut TranslationStats)) {
        if self.options.collect_stats {
            f(&mut self.stats);
        }
    }

    fn render_part(&mut self, part: &Part, literals: &LiteralRegistry) -> Result<String> {
        match part {
            Part::Section { title } => {
                self.count(|s| s.section_count += 1);
                Ok(format!("\\section{{{}}}", self.inlines(title, literals, TextContext::Prose)?))
            }
            Part::Frame(frame) => {
                self.count(|s| s.frame_count += 1);
                self.render_frame(frame, literals)
            }
            Part::PlainTitle { title } => {
                self.count(|s| s.plain_title_count += 1);
                Ok(format!(
                    "\\begin{{frame}}[plain,c]\n\\begin{{center}}\\Large {}\\end{{center}}\n\\end{{frame}}",
                    self.inlines(title, literals, TextContext::Prose)?
                ))
            }
            Part::PictureSlide { title, image } => {
                self.count(|s| s.picture_slide_count += 1);
                Ok(format!(
                    "\\begin{{frame}}{{{}}}\n\\begin{{center}}\n\\includegraphics[width=\\textwidth,height=0.8\\textheight,keepaspectratio]{{{}}}\n\\end{{center}}\n\\end{{frame}}",
                    self.inlines(title, literals, TextContext::Prose)?,
                    latex_path(&image.path)
                ))
            }
        }
    }

    fn render_frame(&mut self, frame: &Frame, literals: &LiteralRegistry) -> Result<String> {
        let title = match &frame.title {
            Some(title) => self.inlines(title, literals, TextContext::Prose)?,
            None => String::new(),
        };
        let fragile = if frame.is_fragile() { "[fragile]" } else { "" };

        let mut blocks = Vec::with_capacity(frame.blocks.len());
        for block in &frame.blocks {
            blocks.push(self.render_block(block, literals)?);
        }

        Ok(format!(
            "\\begin{{frame}}{}{{{}}}\n{}\n\\end{{frame}}",
            fragile,
            title,
            blocks.join("\n\n")
        ))
    }

    fn render_block(&mut self, block: &Block, literals: &LiteralRegistry) -> Result<String> {
        match block {
            Block::Paragraph { content } => {
                self.count(|s| s.paragraph_count += 1);
                self.inlines(content, literals, TextContext::Prose)
            }
            Block::List(list) => self.render_list(list, literals),
            Block::Table(table) => {
                self.count(|s| s.table_count += 1);
                self.render_table(table, literals)
            }
            Block::Image(image) => {
                self.count(|s| s.image_count += 1);
                Ok(format!(
                    "\\begin{{center}}\n{}\n\\end{{center}}",
                    self.include_graphics(image)
                ))
            }
            Block::Figure { image, caption } => {
                self.count(|s| s.figure_count += 1);
                Ok(format!(
                    "\\begin{{figure}}\n\\centering\n{}\n\\caption{{{}}}\n\\end{{figure}}",
                    self.include_graphics(image),
                    self.inlines(caption, literals, TextContext::Prose)?
                ))
            }
            Block::Code(inclusion) => {
                self.count(|s| s.inclusion_count += 1);
                Ok(render_inclusion(inclusion))
            }
            Block::Math(math) => {
                self.count(|s| s.math_count += 1);
                Ok(render_math(math))
            }
            Block::Literal { id } => {
                self.count(|s| s.literal_block_count += 1);
                let text = literal_text(literals, *id)?;
                Ok(format!(
                    "\\begin{{minted}}[autogobble]{{{}}}\n{}\n\\end{{minted}}",
                    LITERAL_BLOCK_LEXER,
                    escape_literal_block(text.trim_end_matches('\n'))
                ))
            }
            Block::Pause => {
                self.count(|s| s.pause_count += 1);
                Ok("\\pause".to_string())
            }
        }
    }

    fn render_list(&mut self, list: &List, literals: &LiteralRegistry) -> Result<String> {
        self.count(|s| s.list_count += 1);
        let mut out = String::from("\\begin{itemize}\n");
        for entry in &list.entries {
            match entry {
                ListEntry::Item(content) => {
                    self.count(|s| s.list_item_count += 1);
                    out.push_str("\\item ");
                    out.push_str(&self.inlines(content, literals, TextContext::Prose)?);
                }
                ListEntry::Pause => {
                    self.count(|s| s.pause_count += 1);
                    out.push_str("\\pause");
                }
            }
            out.push('\n');
        }
        out.push_str("\\end{itemize}");
        Ok(out)
    }

    fn render_table(&mut self, table: &Table, literals: &LiteralRegistry) -> Result<String> {
        let mut out = format!(
            "\\begin{{center}}\n\\begin{{tabular}}{{{}}}\n\\toprule\n",
            table.column_spec()
        );
        out.push_str(&self.render_row(&table.header, literals)?);
        out.push_str("\\midrule\n");
        for row in &table.body {
            out.push_str(&self.render_row(row, literals)?);
        }
        out.push_str("\\bottomrule\n\\end{tabular}\n\\end{center}");
        Ok(out)
    }

    fn render_row(&mut self, row: &TableRow, literals: &LiteralRegistry) -> Result<String> {
        let mut cells = Vec::with_capacity(row.cells.len());
        for cell in &row.cells {
            cells.push(self.inlines(&cell.content, literals, TextContext::Cell)?);
        }
        Ok(format!("{} \\\\\n", cells.join(" & ")))
    }

    fn include_graphics(&self, image: &ImageRef) -> String {
        format!(
            "\\includegraphics[width={}\\textwidth,height=0.7\\textheight,keepaspectratio]{{{}}}",
            self.options.image_width,
            latex_path(&image.path)
        )
    }

    fn inlines(
        &mut self,
        content: &[Inline],
        literals: &LiteralRegistry,
        context: TextContext,
    ) -> Result<String> {
        let mut out = String::new();
        for inline in content {
            self.render_inline(&mut out, inline, literals, context)?;
        }
        Ok(out)
    }

    fn render_inline(
        &mut self,
        out: &mut String,
        inline: &Inline,
        literals: &LiteralRegistry,
        context: TextContext,
    ) -> Result<()> {
        match inline {
            Inline::Text(text) => match context {
                TextContext::Prose => out.push_str(&escape_prose(text)),
                TextContext::Cell => out.push_str(&escape_cell(text)),
            },
            Inline::Bold(content) => {
                out.push_str("\\textbf{");
                out.push_str(&self.inlines(content, literals, context)?);
                out.push('}');
            }
            Inline::Italic(content) => {
                out.push_str("\\textit{");
                out.push_str(&self.inlines(content, literals, context)?);
                out.push('}');
            }
            Inline::Link { text, url } => {
                let text = self.inlines(text, literals, context)?;
                out.push_str(&format!("\\href{{{}}}{{\\underline{{{}}}}}", escape_url(url), text));
            }
            Inline::Annotation { text, note } => {
                let text = self.inlines(text, literals, context)?;
                let note = self.inlines(note, literals, context)?;
                out.push_str(&format!(
                    "$\\underbrace{{\\text{{{}}}}}_{{\\text{{{}}}}}$",
                    text, note
                ));
            }
            Inline::Literal(id) => {
                self.count(|s| s.inline_literal_count += 1);
                out.push_str("\\texttt{");
                out.push_str(&escape_literal(literal_text(literals, *id)?));
                out.push('}');
            }
            Inline::Math(math) => {
                self.count(|s| s.math_count += 1);
                out.push_str(&render_math(math));
            }
        }
        Ok(())
    }
}

fn literal_text(literals: &LiteralRegistry, id: LiteralId) -> Result<&str> {
    literals
        .get(id)
        .map(|l| l.text.as_str())
        .ok_or_else(|| Error::Render(format!("Unknown literal #{}", id.0)))
}

fn render_math(math: &Math) -> String {
    if math.is_multiline() {
        let rows: Vec<String> = math.rows().into_iter().map(rewrite).collect();
        format!("\\begin{{align*}}\n{}\n\\end{{align*}}", rows.join(" \\\\\n"))
    } else {
        format!("${}$", rewrite(math.source.trim()))
    }
}

fn render_inclusion(inclusion: &SourceInclusion) -> String {
    match &inclusion.contents {
        Some(contents) => format!(
            "\\begin{{minted}}{{{}}}\n{}\n\\end{{minted}}",
            inclusion.language,
            escape_literal_block(contents.trim_end_matches('\n'))
        ),
        None => format!(
            "\\inputminted{{{}}}{{{}}}",
            inclusion.language,
            latex_path(&inclusion.path)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnAlign, LiteralKind, TableCell};
    use std::path::PathBuf;

    fn doc_with(blocks: Vec<Block>) -> Document {
        let mut doc = Document::new();
        doc.parts.push(Part::Frame(Frame::new(
            Some(vec![Inline::text("T")]),
            blocks,
        )));
        doc
    }

    fn body(doc: &Document) -> String {
        BeamerRenderer::new(RenderOptions::default())
            .render_body(doc)
            .unwrap()
    }

    #[test]
    fn test_frame_and_paragraph() {
        let doc = doc_with(vec![Block::paragraph(vec![
            Inline::text("Costs 5% of "),
            Inline::Bold(vec![Inline::text("#1")]),
        ])]);
        assert_eq!(
            body(&doc),
            "\\begin{frame}{T}\nCosts 5\\% of \\textbf{\\#1}\n\\end{frame}"
        );
    }

    #[test]
    fn test_plain_title_and_section() {
        let mut doc = Document::new();
        doc.parts.push(Part::Section {
            title: vec![Inline::text("Intro")],
        });
        doc.parts.push(Part::PlainTitle {
            title: vec![Inline::text("Alone")],
        });
        let out = body(&doc);
        assert!(out.starts_with("\\section{Intro}\n\n\\begin{frame}[plain,c]"));
        assert!(out.contains("\\Large Alone"));
    }

    #[test]
    fn test_literals_are_restored() {
        let mut doc = Document::new();
        let inline = doc.literals.push(LiteralKind::Inline, "a_b #");
        let block = doc.literals.push(LiteralKind::Block, "  x = 1 # %\n");
        doc.parts.push(Part::Frame(Frame::new(
            None,
            vec![
                Block::paragraph(vec![Inline::Literal(inline)]),
                Block::Literal { id: block },
            ],
        )));
        let out = body(&doc);
        assert!(out.starts_with("\\begin{frame}[fragile]{}"));
        assert!(out.contains("\\texttt{a\\_b \\#}"));
        assert!(out.contains("\\begin{minted}[autogobble]{text}\n  x = 1 # %\n\\end{minted}"));
    }

    #[test]
    fn test_unknown_literal_is_render_error() {
        let doc = doc_with(vec![Block::Literal { id: LiteralId(7) }]);
        let err = BeamerRenderer::new(RenderOptions::default())
            .render_body(&doc)
            .unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn test_table() {
        let table = Table {
            header: TableRow::from_strings(["A", "B&C"]),
            alignments: vec![ColumnAlign::Center, ColumnAlign::Right],
            body: vec![TableRow::new(vec![TableCell::text("1"), TableCell::text("50%")])],
            line: 1,
        };
        let out = body(&doc_with(vec![Block::Table(table)]));
        assert!(out.contains("\\begin{tabular}{cr}"));
        assert!(out.contains("A & B\\&C \\\\\n\\midrule\n1 & 50\\% \\\\\n\\bottomrule"));
    }

    #[test]
    fn test_list_with_pause() {
        let list = List {
            entries: vec![
                ListEntry::Item(vec![Inline::text("a")]),
                ListEntry::Pause,
                ListEntry::Item(vec![Inline::text("b")]),
            ],
        };
        let out = body(&doc_with(vec![Block::List(list)]));
        assert!(out.contains("\\begin{itemize}\n\\item a\n\\pause\n\\item b\n\\end{itemize}"));
    }

    #[test]
    fn test_math() {
        assert_eq!(render_math(&Math::new("a/b")), "$a \\over b$");
        assert_eq!(
            render_math(&Math::new("\nx = (a)\ny = b\n")),
            "\\begin{align*}\nx = \\left(a\\right) \\\\\ny = b\n\\end{align*}"
        );
    }

    #[test]
    fn test_link_and_annotation() {
        let doc = doc_with(vec![Block::paragraph(vec![
            Inline::Link {
                text: vec![Inline::text("docs")],
                url: "http://x.org/#top".into(),
            },
            Inline::Annotation {
                text: vec![Inline::text("x")],
                note: vec![Inline::text("y")],
            },
        ])]);
        let out = body(&doc);
        assert!(out.contains("\\href{http://x.org/\\#top}{\\underline{docs}}"));
        assert!(out.contains("$\\underbrace{\\text{x}}_{\\text{y}}$"));
    }

    #[test]
    fn test_images_and_inclusions() {
        let image = ImageRef {
            reference: "a.png".into(),
            path: PathBuf::from("/tmp/a.png"),
        };
        let out = body(&doc_with(vec![
            Block::Image(image.clone()),
            Block::Figure {
                image,
                caption: vec![Inline::text("Fig #1")],
            },
            Block::Code(SourceInclusion {
                reference: "m.rs".into(),
                path: PathBuf::from("/tmp/m.rs"),
                language: "rust".into(),
                contents: None,
            }),
        ]));
        assert!(out.contains("keepaspectratio]{/tmp/a.png}"));
        assert!(out.contains("\\caption{Fig \\#1}"));
        assert!(out.contains("\\inputminted{rust}{/tmp/m.rs}"));
    }

    #[test]
    fn test_stats() {
        let doc = doc_with(vec![Block::Pause, Block::paragraph(vec![Inline::text("x")])]);
        let result = to_beamer_with_stats(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(result.stats.frame_count, 1);
        assert_eq!(result.stats.pause_count, 1);
        assert_eq!(result.stats.paragraph_count, 1);
        assert!(result.content.ends_with("\\end{document}\n"));
    }
}
