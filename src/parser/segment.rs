//! Structural segmentation into sections and slides.
//!
//! Lines are classified one at a time; boundaries never look past the next
//! boundary, so a title-only slide cannot swallow the following heading.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::model::{Frame, ImageRef, Inline, Part};

use super::block::{figure_parts, parse_body, BodyContext};
use super::include::resolve_image;
use super::shield::{skip_prefix, trim_segments, Segment, ShieldedLine};

static RE_FRAME_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-+$").unwrap());

/// Prefix of a figure caption that turns it into a picture slide.
const PICTURE_SLIDE_MARKER: char = '#';

/// The last title seen during one translation run.
///
/// Continuation frames opened by a frame break reuse it. A fresh instance is
/// created for every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleState {
    last: Option<Vec<Inline>>,
}

impl TitleState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new heading title.
    pub fn set(&mut self, title: Vec<Inline>) {
        self.last = Some(title);
    }

    /// Title for a frame that has no heading of its own.
    pub fn current(&self) -> Option<Vec<Inline>> {
        self.last.clone()
    }
}

/// Classification of one shielded line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineClass {
    /// `# Title`
    Section(Vec<Segment>),
    /// `## Title`
    Slide(Vec<Segment>),
    /// `![#Title](image)`
    Picture { title: String, path: String },
    /// `---`
    FrameBreak,
    /// Anything else
    Body,
}

fn classify(line: &ShieldedLine) -> LineClass {
    if let ShieldedLine::LiteralBlock { .. } = line {
        return LineClass::Body;
    }
    if line
        .plain_text()
        .is_some_and(|t| RE_FRAME_BREAK.is_match(t.trim()))
    {
        return LineClass::FrameBreak;
    }
    if let Some((caption, path)) = figure_parts(line) {
        if let Some(title) = caption.strip_prefix(PICTURE_SLIDE_MARKER) {
            return LineClass::Picture {
                title: title.trim().to_string(),
                path,
            };
        }
    }
    heading(line).unwrap_or(LineClass::Body)
}

/// Parse a `#` or `##` heading, stripping a closing marker run.
///
/// Deeper markers (`###` and on) open slides as well.
fn heading(line: &ShieldedLine) -> Option<LineClass> {
    let segments = line.segments()?;
    let lead = line.leading_text();
    let level = lead.chars().take_while(|&c| c == '#').count();
    if level == 0 {
        return None;
    }

    let mut title = trim_segments(&skip_prefix(segments, level));
    if let Some(Segment::Text(last)) = title.last_mut() {
        let without = last.trim_end_matches('#');
        if without.len() < last.len() && without.ends_with(char::is_whitespace) {
            *last = without.trim_end().to_string();
        }
    }
    let title = trim_segments(&title);
    if title.is_empty() {
        return None;
    }

    Some(if level == 1 {
        LineClass::Section(title)
    } else {
        LineClass::Slide(title)
    })
}

/// What opened a run of body lines.
enum Opener {
    Start,
    Section(Vec<Inline>),
    Slide(Vec<Inline>),
    Picture(Vec<Inline>, ImageRef),
}

/// Splits a shielded document into parts.
pub struct Segmenter<'a> {
    ctx: &'a BodyContext<'a>,
    titles: TitleState,
    promote_sections: bool,
    parts: Vec<Part>,
}

impl<'a> Segmenter<'a> {
    /// Create a segmenter with a fresh title state.
    pub fn new(ctx: &'a BodyContext<'a>) -> Self {
        Self {
            ctx,
            titles: TitleState::new(),
            promote_sections: false,
            parts: Vec::new(),
        }
    }

    /// Segment all lines into sections, frames and title slides.
    pub fn segment(mut self, lines: &[ShieldedLine]) -> Result<Vec<Part>> {
        let classes: Vec<LineClass> = lines.iter().map(classify).collect();

        self.promote_sections = !classes.iter().any(|c| matches!(c, LineClass::Slide(_)))
            && classes.iter().any(|c| matches!(c, LineClass::Section(_)));
        if self.promote_sections {
            log::debug!("No slide headings found, promoting sections to slides");
        }

        let mut opener = Opener::Start;
        let mut body: Vec<&ShieldedLine> = Vec::new();
        let mut breaks: Vec<usize> = Vec::new();

        for (line, class) in lines.iter().zip(classes) {
            let next = match class {
                LineClass::Body => {
                    body.push(line);
                    continue;
                }
                LineClass::FrameBreak => {
                    breaks.push(body.len());
                    continue;
                }
                LineClass::Section(title) => Opener::Section(self.ctx.inlines(&title)),
                LineClass::Slide(title) => Opener::Slide(self.ctx.inlines(&title)),
                LineClass::Picture { title, path } => Opener::Picture(
                    self.ctx.inlines(&[Segment::Text(title)]),
                    resolve_image(&path, self.ctx.options)?,
                ),
            };
            let previous = std::mem::replace(&mut opener, next);
            self.emit(previous, &body, &breaks)?;
            body.clear();
            breaks.clear();
        }
        self.emit(opener, &body, &breaks)?;

        Ok(self.parts)
    }

    /// Emit the parts for one opener and the body lines that follow it.
    fn emit(&mut self, opener: Opener, body: &[&ShieldedLine], breaks: &[usize]) -> Result<()> {
        let pieces = split_at_breaks(body, breaks);
        let mut rest = pieces.as_slice();

        match opener {
            Opener::Start => {}
            Opener::Section(title) => {
                self.parts.push(Part::Section {
                    title: title.clone(),
                });
                self.titles.set(title.clone());
                if self.promote_sections {
                    rest = self.open_slide(title, rest)?;
                }
            }
            Opener::Slide(title) => {
                self.titles.set(title.clone());
                rest = self.open_slide(title, rest)?;
            }
            Opener::Picture(title, image) => {
                self.titles.set(title.clone());
                self.parts.push(Part::PictureSlide { title, image });
            }
        }

        for piece in rest {
            if piece.iter().all(|l| l.is_blank()) {
                continue;
            }
            let blocks = parse_body(piece, self.ctx)?;
            self.parts
                .push(Part::Frame(Frame::new(self.titles.current(), blocks)));
        }
        Ok(())
    }

    /// Emit a slide's first frame, or a plain-title slide when it is empty.
    fn open_slide<'p>(
        &mut self,
        title: Vec<Inline>,
        pieces: &'p [Vec<&'p ShieldedLine>],
    ) -> Result<&'p [Vec<&'p ShieldedLine>]> {
        let Some((first, rest)) = pieces.split_first() else {
            self.parts.push(Part::PlainTitle { title });
            return Ok(pieces);
        };
        if first.iter().all(|l| l.is_blank()) {
            self.parts.push(Part::PlainTitle { title });
        } else {
            let blocks = parse_body(first, self.ctx)?;
            self.parts.push(Part::Frame(Frame::new(Some(title), blocks)));
        }
        Ok(rest)
    }
}

fn split_at_breaks<'l>(body: &[&'l ShieldedLine], breaks: &[usize]) -> Vec<Vec<&'l ShieldedLine>> {
    let mut pieces = Vec::with_capacity(breaks.len() + 1);
    let mut start = 0;
    for &at in breaks {
        pieces.push(body[start..at].to_vec());
        start = at;
    }
    pieces.push(body[start..].to_vec());
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, LiteralRegistry};
    use crate::parser::shield::extract;
    use crate::parser::ParseOptions;

    fn segment(src: &str) -> Vec<Part> {
        let (lines, registry) = extract(src);
        let options = ParseOptions::new().offline();
        let ctx = BodyContext {
            registry: &registry,
            options: &options,
        };
        Segmenter::new(&ctx).segment(&lines).unwrap()
    }

    fn title(s: &str) -> Vec<Inline> {
        vec![Inline::text(s)]
    }

    fn classify_str(s: &str) -> LineClass {
        let (lines, _) = extract(s);
        classify(&lines[0])
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            classify_str("# Intro #"),
            LineClass::Section(vec![Segment::Text("Intro".into())])
        );
        assert_eq!(
            classify_str("## Slide ##"),
            LineClass::Slide(vec![Segment::Text("Slide".into())])
        );
        assert_eq!(
            classify_str("# C#"),
            LineClass::Section(vec![Segment::Text("C#".into())])
        );
        assert_eq!(
            classify_str("### Sub"),
            LineClass::Slide(vec![Segment::Text("Sub".into())])
        );
        assert_eq!(classify_str("-----"), LineClass::FrameBreak);
        assert_eq!(classify_str("- item"), LineClass::Body);
        assert_eq!(classify_str("##"), LineClass::Body);
        assert_eq!(
            classify_str("![#Sunset](sun.png)"),
            LineClass::Picture {
                title: "Sunset".into(),
                path: "sun.png".into()
            }
        );
    }

    #[test]
    fn test_sections_promoted_without_slides() {
        let parts = segment("# One\ntext\n# Two\nmore\n");
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], Part::Section { title: title("One") });
        let Part::Frame(frame) = &parts[1] else {
            panic!("Expected frame");
        };
        assert_eq!(frame.title, Some(title("One")));
        assert!(matches!(parts[3], Part::Frame(_)));
    }

    #[test]
    fn test_sections_not_promoted_with_slides() {
        let parts = segment("# Part\n## Slide\nbody\n");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], Part::Section { title: title("Part") });
        assert!(matches!(&parts[1], Part::Frame(f) if f.title == Some(title("Slide"))));
    }

    #[test]
    fn test_empty_slide_is_plain_title() {
        let parts = segment("## Alone\n\n\n## Next\nbody\n");
        assert_eq!(parts[0], Part::PlainTitle { title: title("Alone") });
        assert!(matches!(&parts[1], Part::Frame(f) if f.title == Some(title("Next"))));
    }

    #[test]
    fn test_frame_break_reuses_title() {
        let parts = segment("## Topic\nfirst\n---\nsecond\n");
        assert_eq!(parts.len(), 2);
        for part in &parts {
            assert!(matches!(part, Part::Frame(f) if f.title == Some(title("Topic"))));
        }
    }

    #[test]
    fn test_leading_content_is_untitled() {
        let parts = segment("Welcome\n## First\nbody\n");
        assert!(matches!(&parts[0], Part::Frame(f) if f.title.is_none()));
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_picture_slide() {
        let parts = segment("## Before\ntext\n![#Sky](sky.png)\n## After\nx\n");
        assert_eq!(parts.len(), 3);
        match &parts[1] {
            Part::PictureSlide { title: t, image } => {
                assert_eq!(t, &title("Sky"));
                assert_eq!(image.reference, "sky.png");
            }
            other => panic!("Expected picture slide, got {:?}", other),
        }
    }

    #[test]
    fn test_dash_run_in_literal_block_is_not_a_break() {
        let parts = segment("## Code\n  ---\n  x\n");
        assert_eq!(parts.len(), 1);
        let Part::Frame(frame) = &parts[0] else {
            panic!("Expected frame");
        };
        assert!(matches!(frame.blocks[0], Block::Literal { .. }));
    }

    #[test]
    fn test_title_state_is_per_run() {
        let registry = LiteralRegistry::new();
        let options = ParseOptions::new().offline();
        let ctx = BodyContext {
            registry: &registry,
            options: &options,
        };
        let (first, _) = extract("## Old\nbody\n");
        Segmenter::new(&ctx).segment(&first).unwrap();

        let (second, _) = extract("---\nleftover\n");
        let parts = Segmenter::new(&ctx).segment(&second).unwrap();
        assert!(matches!(&parts[0], Part::Frame(f) if f.title.is_none()));
    }
}
