//! Literal shielding.
//!
//! Literal spans are pulled out of the text before any other rule looks at
//! it. Indented runs become [`ShieldedLine::LiteralBlock`] lines and
//! backtick spans become [`Segment::Literal`] pieces of a text line. Both
//! point into a [`LiteralRegistry`]; the renderer restores them last.
//!
//! Because a literal is a variant rather than a marker string inside the
//! text, no user content can ever be mistaken for one.

use crate::model::{LiteralId, LiteralKind, LiteralRegistry};

/// Minimum indentation that turns a line into literal block content.
pub const LITERAL_INDENT: &str = "  ";

/// A piece of a text line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Ordinary markup text
    Text(String),
    /// A shielded inline literal
    Literal(LiteralId),
}

/// One logical line of shielded input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShieldedLine {
    /// A whole indented run, collapsed into one line
    LiteralBlock {
        /// 1-based line number of the first line of the run
        number: usize,
        /// Registry entry holding the run
        id: LiteralId,
    },
    /// A line of markup, possibly containing inline literals
    Text {
        /// 1-based source line number
        number: usize,
        /// Line content
        segments: Vec<Segment>,
    },
}

impl ShieldedLine {
    /// 1-based source line number.
    pub fn number(&self) -> usize {
        match self {
            ShieldedLine::LiteralBlock { number, .. } | ShieldedLine::Text { number, .. } => {
                *number
            }
        }
    }

    /// Segments of a text line.
    pub fn segments(&self) -> Option<&[Segment]> {
        match self {
            ShieldedLine::Text { segments, .. } => Some(segments),
            ShieldedLine::LiteralBlock { .. } => None,
        }
    }

    /// The line's text if it contains no inline literal.
    pub fn plain_text(&self) -> Option<&str> {
        match self.segments()? {
            [] => Some(""),
            [Segment::Text(t)] => Some(t),
            _ => None,
        }
    }

    /// Text of the first segment, empty if the line starts with a literal.
    pub fn leading_text(&self) -> &str {
        match self.segments() {
            Some([Segment::Text(t), ..]) => t,
            _ => "",
        }
    }

    /// Check if the line is an empty or whitespace-only text line.
    pub fn is_blank(&self) -> bool {
        self.plain_text().is_some_and(|t| t.trim().is_empty())
    }
}

/// Split normalized text into shielded lines, capturing every literal span.
pub fn extract(text: &str) -> (Vec<ShieldedLine>, LiteralRegistry) {
    let mut registry = LiteralRegistry::new();
    let mut lines = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    let mut run_start = 0;

    let source: Vec<&str> = text.lines().collect();

    for (index, &line) in source.iter().enumerate() {
        let number = index + 1;
        let continues_run = !run.is_empty()
            && line.trim().is_empty()
            && resumes_literal(&source[index + 1..]);
        if is_literal_line(line) || continues_run {
            if run.is_empty() {
                run_start = number;
            }
            run.push(line);
            continue;
        }
        flush_run(&mut run, run_start, &mut registry, &mut lines);
        lines.push(ShieldedLine::Text {
            number,
            segments: extract_inline(line, &mut registry),
        });
    }
    flush_run(&mut run, run_start, &mut registry, &mut lines);

    (lines, registry)
}

fn is_literal_line(line: &str) -> bool {
    line.starts_with(LITERAL_INDENT) && !line.trim().is_empty()
}

/// Whether the next non-blank line is indented, so blank lines in between
/// belong to the current literal run.
fn resumes_literal(rest: &[&str]) -> bool {
    rest.iter()
        .find(|l| !l.trim().is_empty())
        .is_some_and(|l| is_literal_line(l))
}

fn flush_run(
    run: &mut Vec<&str>,
    number: usize,
    registry: &mut LiteralRegistry,
    lines: &mut Vec<ShieldedLine>,
) {
    if run.is_empty() {
        return;
    }
    let mut content = run.join("\n");
    content.push('\n');
    let id = registry.push(LiteralKind::Block, content);
    lines.push(ShieldedLine::LiteralBlock { number, id });
    run.clear();
}

/// Capture single-backtick spans of one line.
fn extract_inline(line: &str, registry: &mut LiteralRegistry) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut rest = line;

    while let Some(open) = find_unescaped_backtick(rest, 0) {
        let Some(close) = find_unescaped_backtick(rest, open + 1) else {
            break;
        };
        if close == open + 1 {
            // empty span stays text
            text.push_str(&rest[..close + 1]);
            rest = &rest[close + 1..];
            continue;
        }
        text.push_str(&rest[..open]);
        if !text.is_empty() {
            segments.push(Segment::Text(std::mem::take(&mut text)));
        }
        let id = registry.push(LiteralKind::Inline, &rest[open + 1..close]);
        segments.push(Segment::Literal(id));
        rest = &rest[close + 1..];
    }

    text.push_str(rest);
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

fn find_unescaped_backtick(s: &str, from: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    (from..bytes.len()).find(|&i| bytes[i] == b'`' && (i == 0 || bytes[i - 1] != b'\\'))
}

/// Reassemble the original markup of a run of segments.
pub fn segments_to_source(segments: &[Segment], registry: &LiteralRegistry) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(t) => out.push_str(t),
            Segment::Literal(id) => {
                out.push('`');
                if let Some(literal) = registry.get(*id) {
                    out.push_str(&literal.text);
                }
                out.push('`');
            }
        }
    }
    out
}

/// Reassemble the original markup of shielded lines.
pub fn restore(lines: &[ShieldedLine], registry: &LiteralRegistry) -> String {
    let mut out = String::new();
    for line in lines {
        match line {
            ShieldedLine::LiteralBlock { id, .. } => {
                if let Some(literal) = registry.get(*id) {
                    out.push_str(&literal.text);
                }
            }
            ShieldedLine::Text { segments, .. } => {
                out.push_str(&segments_to_source(segments, registry));
                out.push('\n');
            }
        }
    }
    out
}

/// Trim leading whitespace of the first segment and trailing whitespace of
/// the last one, dropping segments that become empty.
pub fn trim_segments(segments: &[Segment]) -> Vec<Segment> {
    let mut out: Vec<Segment> = segments.to_vec();
    if let Some(Segment::Text(t)) = out.first_mut() {
        *t = t.trim_start().to_string();
    }
    if let Some(Segment::Text(t)) = out.last_mut() {
        *t = t.trim_end().to_string();
    }
    out.retain(|s| !matches!(s, Segment::Text(t) if t.is_empty()));
    out
}

/// Drop the first `bytes` bytes of the leading text segment.
pub fn skip_prefix(segments: &[Segment], bytes: usize) -> Vec<Segment> {
    let mut out = segments.to_vec();
    if let Some(Segment::Text(t)) = out.first_mut() {
        *t = t[bytes.min(t.len())..].to_string();
    }
    out.retain(|s| !matches!(s, Segment::Text(t) if t.is_empty()));
    out
}

/// Split segments on a delimiter character found in text segments.
pub fn split_segments(segments: &[Segment], delimiter: char) -> Vec<Vec<Segment>> {
    let mut parts = vec![Vec::new()];
    for segment in segments {
        match segment {
            Segment::Text(t) => {
                let mut pieces = t.split(delimiter);
                if let Some(first) = pieces.next() {
                    push_text(parts.last_mut(), first);
                }
                for piece in pieces {
                    parts.push(Vec::new());
                    push_text(parts.last_mut(), piece);
                }
            }
            Segment::Literal(id) => {
                if let Some(part) = parts.last_mut() {
                    part.push(Segment::Literal(*id));
                }
            }
        }
    }
    parts
}

fn push_text(part: Option<&mut Vec<Segment>>, text: &str) {
    if let Some(part) = part {
        if !text.is_empty() {
            part.push(Segment::Text(text.to_string()));
        }
    }
}
