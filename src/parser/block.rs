//! Block-level converters for frame bodies.
//!
//! Each converter claims whole lines: pause markers, pipe tables, picture and
//! source references, multi-line math, list items. Whatever no converter
//! claims is a paragraph. List items are grouped afterwards by
//! [`group_lists`](super::list::group_lists).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Block, ColumnAlign, Inline, LiteralRegistry, Table, TableCell, TableRow};

use super::include::{is_image, resolve_image, resolve_source};
use super::inline::parse_inlines;
use super::list::{group_lists, Scanned, ITEM_MARKER};
use super::shield::{skip_prefix, split_segments, trim_segments, Segment, ShieldedLine};
use super::ParseOptions;

static RE_PAUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.{3,}$").unwrap());

static RE_FIGURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!\[(?P<caption>[^\]]*)\]\((?P<path>[^)]+)\)$").unwrap());

static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^!\((?P<path>[^)]+)\)$").unwrap());

const MATH_DELIMITER: &str = "$$";

/// Shared state for converting one document's frame bodies.
pub struct BodyContext<'a> {
    /// Literals captured by the shield
    pub registry: &'a LiteralRegistry,
    /// Parse configuration
    pub options: &'a ParseOptions,
}

impl BodyContext<'_> {
    /// Parse inline content of a run of segments.
    pub fn inlines(&self, segments: &[Segment]) -> Vec<Inline> {
        parse_inlines(&trim_segments(segments), self.registry)
    }
}

/// Check if a line is a pause marker.
pub fn is_pause(line: &ShieldedLine) -> bool {
    line.plain_text()
        .is_some_and(|t| RE_PAUSE.is_match(t.trim()))
}

/// A `![caption](path)` line, returning caption and path.
pub fn figure_parts(line: &ShieldedLine) -> Option<(String, String)> {
    let text = line.plain_text()?.trim();
    let caps = RE_FIGURE.captures(text)?;
    Some((caps["caption"].trim().to_string(), caps["path"].trim().to_string()))
}

fn image_path(line: &ShieldedLine) -> Option<String> {
    let text = line.plain_text()?.trim();
    let caps = RE_IMAGE.captures(text)?;
    Some(caps["path"].trim().to_string())
}

fn is_table_row(line: &ShieldedLine) -> bool {
    let Some(segments) = line.segments() else {
        return false;
    };
    let starts = matches!(segments.first(), Some(Segment::Text(t)) if t.trim_start().starts_with('|'));
    let ends = matches!(segments.last(), Some(Segment::Text(t)) if t.trim_end().ends_with('|'));
    let long_enough = match segments {
        [Segment::Text(t)] => t.trim().len() >= 2,
        _ => true,
    };
    starts && ends && long_enough
}

fn math_delimiters(line: &ShieldedLine) -> usize {
    line.segments()
        .unwrap_or_default()
        .iter()
        .map(|s| match s {
            Segment::Text(t) => t.matches(MATH_DELIMITER).count(),
            Segment::Literal(_) => 0,
        })
        .sum()
}

/// Convert the lines of one frame body into blocks.
pub fn parse_body(lines: &[&ShieldedLine], ctx: &BodyContext) -> Result<Vec<Block>> {
    let mut scanned = Vec::new();
    let mut prev_blank = true;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.is_blank() {
            scanned.push(Scanned::Blank);
            prev_blank = true;
            i += 1;
            continue;
        }
        i += scan_line(lines, i, prev_blank, ctx, &mut scanned)?;
        prev_blank = false;
    }

    Ok(group_lists(scanned))
}

/// Scan the non-blank line at `i`, returning how many lines were consumed.
fn scan_line(
    lines: &[&ShieldedLine],
    i: usize,
    prev_blank: bool,
    ctx: &BodyContext,
    scanned: &mut Vec<Scanned>,
) -> Result<usize> {
    let line = lines[i];
    let segments = match line {
        ShieldedLine::LiteralBlock { id, .. } => {
            scanned.push(Scanned::Block(Block::Literal { id: *id }));
            return Ok(1);
        }
        ShieldedLine::Text { segments, .. } => segments,
    };

    if is_pause(line) {
        scanned.push(Scanned::Block(Block::Pause));
        return Ok(1);
    }

    if prev_blank && is_table_row(line) {
        let end = (i..lines.len())
            .find(|&j| !is_table_row(lines[j]))
            .unwrap_or(lines.len());
        let table = parse_table(&lines[i..end], ctx)?;
        scanned.push(Scanned::Block(Block::Table(table)));
        return Ok(end - i);
    }

    if let Some((caption, path)) = figure_parts(line) {
        let image = resolve_image(&path, ctx.options)?;
        let block = if caption.is_empty() {
            Block::Image(image)
        } else {
            Block::Figure {
                image,
                caption: ctx.inlines(&[Segment::Text(caption)]),
            }
        };
        scanned.push(Scanned::Block(block));
        return Ok(1);
    }

    if let Some(path) = image_path(line) {
        let block = if is_image(&path) {
            Block::Image(resolve_image(&path, ctx.options)?)
        } else {
            Block::Code(resolve_source(&path, ctx.options)?)
        };
        scanned.push(Scanned::Block(block));
        return Ok(1);
    }

    if math_delimiters(line) % 2 == 1 {
        if let Some(consumed) = scan_math(lines, i, ctx, scanned) {
            return Ok(consumed);
        }
    }

    if line.leading_text().starts_with(ITEM_MARKER) {
        scanned.push(Scanned::Item {
            content: ctx.inlines(&skip_prefix(segments, ITEM_MARKER.len())),
            line: ctx.inlines(segments),
        });
        return Ok(1);
    }

    scanned.push(Scanned::Block(Block::paragraph(ctx.inlines(segments))));
    Ok(1)
}

/// Gather a math span opened on line `i` and closed on a later line.
fn scan_math(
    lines: &[&ShieldedLine],
    i: usize,
    ctx: &BodyContext,
    scanned: &mut Vec<Scanned>,
) -> Option<usize> {
    let mut joined: Vec<Segment> = lines[i].segments()?.to_vec();
    for (offset, line) in lines[i + 1..].iter().enumerate() {
        let segments = line.segments()?;
        joined.push(Segment::Text("\n".to_string()));
        joined.extend(segments.iter().cloned());
        if math_delimiters(line) % 2 == 1 {
            let content = ctx.inlines(&joined);
            let block = match content.as_slice() {
                [Inline::Math(math)] if math.is_multiline() => Block::Math(math.clone()),
                _ => Block::paragraph(content),
            };
            scanned.push(Scanned::Block(block));
            return Some(offset + 2);
        }
    }
    None
}

fn row_cells(line: &ShieldedLine) -> Vec<Vec<Segment>> {
    let trimmed = trim_segments(line.segments().unwrap_or_default());
    let mut cells = split_segments(&trimmed, '|');
    if !cells.is_empty() {
        cells.remove(0);
    }
    cells.pop();
    cells
}

/// Build a table from its header, alignment and body rows.
fn parse_table(rows: &[&ShieldedLine], ctx: &BodyContext) -> Result<Table> {
    let header_line = rows[0];
    let header = row_cells(header_line);
    let columns = header.len();

    let Some(align_line) = rows.get(1) else {
        return Err(Error::malformed_table(
            header_line.number(),
            "missing alignment row",
        ));
    };
    let align_cells = row_cells(align_line);
    let alignments = align_cells
        .iter()
        .map(|cell| match trim_segments(cell).as_slice() {
            [Segment::Text(t)] => ColumnAlign::parse(t),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::malformed_table(align_line.number(), "missing alignment row"))?;
    if alignments.len() != columns {
        return Err(Error::malformed_table(
            align_line.number(),
            format!(
                "alignment row has {} cells, expected {}",
                alignments.len(),
                columns
            ),
        ));
    }

    let to_row = |cells: Vec<Vec<Segment>>| {
        TableRow::new(
            cells
                .iter()
                .map(|c| TableCell {
                    content: ctx.inlines(c),
                })
                .collect(),
        )
    };

    let mut body = Vec::new();
    for line in &rows[2..] {
        let cells = row_cells(line);
        if cells.len() != columns {
            return Err(Error::malformed_table(
                line.number(),
                format!("row has {} cells, expected {}", cells.len(), columns),
            ));
        }
        body.push(to_row(cells));
    }

    log::debug!(
        "Table at line {}: {} columns, {} body rows",
        header_line.number(),
        columns,
        body.len()
    );

    Ok(Table {
        header: to_row(header),
        alignments,
        body,
        line: header_line.number(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListEntry, Math};
    use crate::parser::shield::extract;

    fn body(src: &str) -> Result<Vec<Block>> {
        let (lines, registry) = extract(src);
        let refs: Vec<&ShieldedLine> = lines.iter().collect();
        let options = ParseOptions::new().offline();
        let ctx = BodyContext {
            registry: &registry,
            options: &options,
        };
        parse_body(&refs, &ctx)
    }

    #[test]
    fn test_table() {
        let blocks = body("|A|B|C|\n|:-:|--:|:--|\n|1|2|3|\n").unwrap();
        let [Block::Table(table)] = blocks.as_slice() else {
            panic!("Expected one table, got {:?}", blocks);
        };
        assert_eq!(
            table.alignments,
            vec![ColumnAlign::Center, ColumnAlign::Right, ColumnAlign::Left]
        );
        assert_eq!(table.header.cells[0].plain_text(), "A");
        assert_eq!(table.body.len(), 1);
        assert_eq!(table.body[0].cells[2].plain_text(), "3");
    }

    #[test]
    fn test_table_cell_count_mismatch() {
        let err = body("| a | b |\n|---|---|\n| 1 |\n").unwrap_err();
        match err {
            Error::MalformedTable { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("expected 2"));
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_table_missing_alignment_row() {
        let err = body("| a | b |\n| 1 | 2 |\n").unwrap_err();
        assert!(matches!(err, Error::MalformedTable { line: 2, .. }));

        let err = body("| a | b |\n").unwrap_err();
        assert!(matches!(err, Error::MalformedTable { line: 1, .. }));
    }

    #[test]
    fn test_table_needs_preceding_blank_line() {
        let blocks = body("text\n|a|\n").unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| matches!(b, Block::Paragraph { .. })));
    }

    #[test]
    fn test_image_figure_and_source() {
        let blocks = body("!(cat.png)\n![A cat](cat.jpg)\n!(main.rs)\n![](dog.png)\n").unwrap();
        assert!(matches!(blocks[0], Block::Image(_)));
        match &blocks[1] {
            Block::Figure { caption, image } => {
                assert_eq!(Inline::plain_text(caption), "A cat");
                assert_eq!(image.reference, "cat.jpg");
            }
            other => panic!("Expected figure, got {:?}", other),
        }
        match &blocks[2] {
            Block::Code(source) => assert_eq!(source.language, "rust"),
            other => panic!("Expected source inclusion, got {:?}", other),
        }
        assert!(matches!(blocks[3], Block::Image(_)));
    }

    #[test]
    fn test_multiline_math_block() {
        let blocks = body("$$\na = b\nc = d\n$$\n").unwrap();
        assert_eq!(blocks, vec![Block::Math(Math::new("\na = b\nc = d\n"))]);
    }

    #[test]
    fn test_unclosed_math_is_text() {
        let blocks = body("costs $$ more\nnext line\n").unwrap();
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_list_with_pause() {
        let blocks = body("- one\n...\n- two\n").unwrap();
        let [Block::List(list)] = blocks.as_slice() else {
            panic!("Expected one list, got {:?}", blocks);
        };
        assert_eq!(
            list.entries,
            vec![
                ListEntry::Item(vec![Inline::text("one")]),
                ListEntry::Pause,
                ListEntry::Item(vec![Inline::text("two")]),
            ]
        );
    }

    #[test]
    fn test_literal_block_in_body() {
        let blocks = body("look:\n  - not a list\n  - really\n").unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[1], Block::Literal { .. }));
    }

    #[test]
    fn test_each_line_is_a_paragraph() {
        let blocks = body("one\ntwo\n").unwrap();
        assert_eq!(
            blocks,
            vec![
                Block::paragraph(vec![Inline::text("one")]),
                Block::paragraph(vec![Inline::text("two")]),
            ]
        );
    }
}
