//! Inline span parsing.
//!
//! Works on a flat sequence of atoms: characters of markup text plus opaque
//! literal references, so no rule can look inside a shielded literal.
//! Precedence at each position is literal, math, annotation, link, bold,
//! italic; anything left over is prose.

use crate::model::{Inline, LiteralId, LiteralRegistry, Math};

use super::shield::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Atom {
    Char(char),
    Literal(LiteralId),
}

/// Parse shielded segments into inline content.
pub fn parse_inlines(segments: &[Segment], registry: &LiteralRegistry) -> Vec<Inline> {
    let atoms = atomize(segments);
    InlineParser {
        atoms: &atoms,
        registry,
    }
    .parse(0, atoms.len())
}

fn atomize(segments: &[Segment]) -> Vec<Atom> {
    let mut atoms = Vec::new();
    for segment in segments {
        match segment {
            Segment::Text(t) => atoms.extend(t.chars().map(Atom::Char)),
            Segment::Literal(id) => atoms.push(Atom::Literal(*id)),
        }
    }
    atoms
}

fn is_word(atom: Atom) -> bool {
    matches!(atom, Atom::Char(c) if c.is_alphanumeric() || c == '_')
}

fn is_space(atom: Atom) -> bool {
    matches!(atom, Atom::Char(c) if c.is_whitespace())
}

struct InlineParser<'a> {
    atoms: &'a [Atom],
    registry: &'a LiteralRegistry,
}

impl InlineParser<'_> {
    fn parse(&self, start: usize, end: usize) -> Vec<Inline> {
        let mut out = Vec::new();
        let mut text = String::new();
        let mut p = start;

        while p < end {
            if let Some((inline, next)) = self.parse_span(p, end) {
                if !text.is_empty() {
                    out.push(Inline::Text(std::mem::take(&mut text)));
                }
                out.push(inline);
                p = next;
                continue;
            }
            if let Atom::Char(c) = self.atoms[p] {
                text.push(c);
            }
            p += 1;
        }

        if !text.is_empty() {
            out.push(Inline::Text(text));
        }
        out
    }

    fn parse_span(&self, p: usize, end: usize) -> Option<(Inline, usize)> {
        match self.atoms[p] {
            Atom::Literal(id) => Some((Inline::Literal(id), p + 1)),
            Atom::Char('$') if self.is_char(p + 1, end, '$') => self.math(p, end),
            Atom::Char('{') => self.annotation(p, end),
            Atom::Char('[') => self.link(p, end),
            Atom::Char('*') if self.is_char(p + 1, end, '*') => self.bold(p, end),
            Atom::Char('*') => self.italic(p, end),
            Atom::Char(_) => None,
        }
    }

    fn is_char(&self, i: usize, end: usize, c: char) -> bool {
        i < end && self.atoms[i] == Atom::Char(c)
    }

    fn find_char(&self, from: usize, end: usize, c: char) -> Option<usize> {
        (from..end).find(|&i| self.atoms[i] == Atom::Char(c))
    }

    fn boundary_before(&self, p: usize) -> bool {
        p == 0 || !is_word(self.atoms[p - 1])
    }

    fn boundary_after(&self, i: usize) -> bool {
        i >= self.atoms.len() || !is_word(self.atoms[i])
    }

    /// Source text of a range, literals restored with their backticks.
    fn source(&self, start: usize, end: usize) -> String {
        let mut out = String::new();
        for atom in &self.atoms[start..end] {
            match atom {
                Atom::Char(c) => out.push(*c),
                Atom::Literal(id) => {
                    out.push('`');
                    if let Some(literal) = self.registry.get(*id) {
                        out.push_str(&literal.text);
                    }
                    out.push('`');
                }
            }
        }
        out
    }

    fn math(&self, p: usize, end: usize) -> Option<(Inline, usize)> {
        let close = (p + 2..end.saturating_sub(1))
            .find(|&i| self.atoms[i] == Atom::Char('$') && self.atoms[i + 1] == Atom::Char('$'))?;
        if close == p + 2 {
            return None;
        }
        let source = self.source(p + 2, close);
        Some((Inline::Math(Math::new(source)), close + 2))
    }

    /// `{text}(note)`
    fn annotation(&self, p: usize, end: usize) -> Option<(Inline, usize)> {
        if !self.boundary_before(p) {
            return None;
        }
        let close = self.find_char(p + 1, end, '}')?;
        if self.find_char(p + 1, close, '{').is_some() || !self.is_char(close + 1, end, '(') {
            return None;
        }
        let note_end = self.find_char(close + 2, end, ')')?;
        if close == p + 1 || note_end == close + 2 || !self.boundary_after(note_end + 1) {
            return None;
        }
        Some((
            Inline::Annotation {
                text: self.parse(p + 1, close),
                note: self.parse(close + 2, note_end),
            },
            note_end + 1,
        ))
    }

    /// `[text](url)`, never directly after `!`.
    fn link(&self, p: usize, end: usize) -> Option<(Inline, usize)> {
        if !self.boundary_before(p) || (p > 0 && self.atoms[p - 1] == Atom::Char('!')) {
            return None;
        }
        let close = self.find_char(p + 1, end, ']')?;
        if !self.is_char(close + 1, end, '(') {
            return None;
        }
        let url_end = self.find_char(close + 2, end, ')')?;
        let url = self.source(close + 2, url_end).trim().to_string();
        if close == p + 1 || url.is_empty() || !self.boundary_after(url_end + 1) {
            return None;
        }
        Some((
            Inline::Link {
                text: self.parse(p + 1, close),
                url,
            },
            url_end + 1,
        ))
    }

    /// `**text**`; a longer closing star run closes on its last two stars.
    fn bold(&self, p: usize, end: usize) -> Option<(Inline, usize)> {
        let start = p + 2;
        if start >= end || is_space(self.atoms[start]) {
            return None;
        }
        let mut close = (start + 1..end.saturating_sub(1)).find(|&i| {
            self.atoms[i] == Atom::Char('*')
                && self.atoms[i + 1] == Atom::Char('*')
                && !is_space(self.atoms[i - 1])
        })?;
        while self.is_char(close + 2, end, '*') {
            close += 1;
        }
        Some((Inline::Bold(self.parse(start, close)), close + 2))
    }

    /// `*text*`; a doubled star inside is skipped as a bold delimiter.
    fn italic(&self, p: usize, end: usize) -> Option<(Inline, usize)> {
        let start = p + 1;
        if start >= end || is_space(self.atoms[start]) {
            return None;
        }
        let mut i = start + 1;
        while i < end {
            if self.atoms[i] == Atom::Char('*') {
                if self.is_char(i + 1, end, '*') {
                    i += 2;
                    continue;
                }
                if !is_space(self.atoms[i - 1]) {
                    return Some((Inline::Italic(self.parse(start, i)), i + 1));
                }
            }
            i += 1;
        }
        None
    }
}
