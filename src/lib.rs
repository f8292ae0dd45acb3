//! # marktex
//!
//! Translates a small, line-oriented slide markup into presentation source
//! for the beamer document class, and typesets it to PDF with XeLaTeX.
//!
//! ## Quick Start
//!
//! ```no_run
//! use marktex::translate;
//!
//! fn main() -> marktex::Result<()> {
//!     let tex = translate("# Intro\n\nHello *world*.\n")?;
//!     println!("{}", tex);
//!     Ok(())
//! }
//! ```
//!
//! ## Markup
//!
//! - `# Section` and `## Slide` headings, `---` frame breaks, `...` pauses
//! - `- item` lists, pipe tables with an alignment row
//! - `!(image.png)`, `![caption](image.png)`, `![#Title](image.png)` picture
//!   slides and `!(source.rs)` source inclusions
//! - `$$math$$`, `**bold**`, `*italic*`, `[text](url)`, `{text}(note)`
//! - `` `literal` `` spans and two-space indented literal blocks

pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod typeset;

// Re-export commonly used types
pub use convert::{
    PresentationTemplate, Template, TemplateRegistry, TranslateOptions, TranslateResult,
    DEFAULT_TEMPLATE,
};
pub use error::{Error, Result};
pub use model::{
    Block, ColumnAlign, Document, Frame, Inline, LiteralRegistry, List, ListEntry, Math, Part,
    Table, TableCell, TableRow,
};
pub use parser::{ParseOptions, SlideParser};
pub use render::{JsonFormat, RenderOptions, TranslationStats};
pub use typeset::{open_in_viewer, DocumentRenderer, XelatexRenderer};

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Output path of [`compile_src`].
pub const DEFAULT_OUTPUT: &str = "marktex.pdf";

/// Translate markup text into complete presentation source.
///
/// Inclusions are resolved against the current directory.
///
/// # Example
///
/// ```no_run
/// let tex = marktex::translate("## Slide\n\n- one\n- two\n").unwrap();
/// assert!(tex.contains("\\begin{itemize}"));
/// ```
pub fn translate(src: &str) -> Result<String> {
    Ok(translate_with_options(src, &TranslateOptions::default())?.content)
}

/// Translate markup text with custom options.
pub fn translate_with_options(src: &str, options: &TranslateOptions) -> Result<TranslateResult> {
    TemplateRegistry::with_defaults().translate(src, options)
}

/// Translate a markup file, resolving inclusions next to it.
///
/// # Example
///
/// ```no_run
/// let tex = marktex::translate_file("talk.md").unwrap();
/// std::fs::write("talk.tex", tex).unwrap();
/// ```
pub fn translate_file<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(translate_file_with_options(path, &TranslateOptions::default())?.content)
}

/// Translate a markup file with custom options.
pub fn translate_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &TranslateOptions,
) -> Result<TranslateResult> {
    let path = path.as_ref();
    let src = fs::read_to_string(path)?;
    let mut options = options.clone();
    options.parse = options.parse.for_source_file(path);
    translate_with_options(&src, &options)
}

/// Translate many files in parallel.
///
/// Every file gets its own result, so one failing document does not stop
/// the others.
pub fn translate_files<P: AsRef<Path> + Sync>(
    paths: &[P],
    options: &TranslateOptions,
) -> Vec<(PathBuf, Result<TranslateResult>)> {
    paths
        .par_iter()
        .map(|p| {
            let path = p.as_ref().to_path_buf();
            let result = translate_file_with_options(&path, options);
            if let Err(e) = &result {
                log::warn!("Failed to translate {}: {}", path.display(), e);
            }
            (path, result)
        })
        .collect()
}

/// Parse markup text into a document without rendering it.
pub fn parse(src: &str) -> Result<Document> {
    parser::parse_document(src, &ParseOptions::default())
}

/// Parse a markup file into a document.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    SlideParser::open(path)?.parse()
}

/// Parse a markup file and dump the document model as JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Path of the PDF compiled from a markup file: same name, `.pdf` extension.
pub fn pdf_path_for(path: &Path) -> PathBuf {
    path.with_extension("pdf")
}

/// Translate markup text and typeset it to `./marktex.pdf`.
pub fn compile_src(src: &str) -> Result<PathBuf> {
    compile_src_with(
        src,
        &TranslateOptions::default(),
        &XelatexRenderer::new(),
        Path::new(DEFAULT_OUTPUT),
    )
}

/// Translate markup text and typeset it with a specific renderer.
pub fn compile_src_with(
    src: &str,
    options: &TranslateOptions,
    renderer: &dyn DocumentRenderer,
    target: &Path,
) -> Result<PathBuf> {
    let result = translate_with_options(src, options)?;
    renderer.render(&result.content, target)
}

/// Translate a markup file and typeset it next to the source.
///
/// # Example
///
/// ```no_run
/// let pdf = marktex::compile_file("talk.md").unwrap();
/// assert!(pdf.ends_with("talk.pdf"));
/// ```
pub fn compile_file<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    compile_file_with(path, &TranslateOptions::default(), &XelatexRenderer::new())
}

/// Translate a markup file and typeset it with a specific renderer.
pub fn compile_file_with<P: AsRef<Path>>(
    path: P,
    options: &TranslateOptions,
    renderer: &dyn DocumentRenderer,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let result = translate_file_with_options(path, options)?;
    renderer.render(&result.content, &pdf_path_for(path))
}

/// Builder for translating documents.
///
/// # Example
///
/// ```no_run
/// use marktex::Marktex;
///
/// let tex = Marktex::new()
///     .with_theme("Madrid")
///     .offline()
///     .translate("## Slide\n\n![plot](plot.png)\n")?
///     .content;
/// # Ok::<(), marktex::Error>(())
/// ```
pub struct Marktex {
    options: TranslateOptions,
}

impl Marktex {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            options: TranslateOptions::default(),
        }
    }

    /// Select a template by name.
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.with_template(name);
        self
    }

    /// Resolve inclusions against a directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.parse = self.options.parse.with_base_dir(dir);
        self
    }

    /// Keep inclusion references as written, without touching the filesystem.
    pub fn offline(mut self) -> Self {
        self.options.parse = self.options.parse.offline();
        self
    }

    /// Set the presentation theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.options.render = self.options.render.with_theme(theme);
        self
    }

    /// Set the base font size.
    pub fn with_font_size(mut self, size: u8) -> Self {
        self.options.render = self.options.render.with_font_size(size);
        self
    }

    /// Collect translation statistics.
    pub fn with_stats(mut self) -> Self {
        self.options = self.options.with_stats(true);
        self
    }

    /// Options in effect.
    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Translate markup text.
    pub fn translate(&self, src: &str) -> Result<TranslateResult> {
        translate_with_options(src, &self.options)
    }

    /// Translate a markup file.
    pub fn translate_file<P: AsRef<Path>>(&self, path: P) -> Result<TranslateResult> {
        translate_file_with_options(path, &self.options)
    }

    /// Translate and typeset a markup file next to the source.
    pub fn compile_file<P: AsRef<Path>>(
        &self,
        path: P,
        renderer: &dyn DocumentRenderer,
    ) -> Result<PathBuf> {
        compile_file_with(path, &self.options, renderer)
    }
}

impl Default for Marktex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marktex_builder() {
        let builder = Marktex::new()
            .offline()
            .with_theme("Madrid")
            .with_font_size(12)
            .with_stats();

        assert!(!builder.options().parse.resolve_inclusions);
        assert_eq!(builder.options().render.theme, "Madrid");
        assert_eq!(builder.options().render.font_size, 12);
        assert!(builder.options().render.collect_stats);
    }

    #[test]
    fn test_marktex_builder_default() {
        let builder = Marktex::default();
        assert_eq!(builder.options().template, DEFAULT_TEMPLATE);
        assert!(builder.options().parse.resolve_inclusions);
    }

    #[test]
    fn test_translate_simple() {
        let tex = translate("## Hi\n\ntext\n").unwrap();
        assert!(tex.starts_with("\\documentclass"));
        assert!(tex.contains("\\begin{frame}{Hi}"));
    }

    #[test]
    fn test_translate_unknown_template() {
        let result = Marktex::new().with_template("article").translate("x");
        assert!(matches!(result, Err(Error::UnknownTemplate(_))));
    }

    #[test]
    fn test_pdf_path_for() {
        assert_eq!(pdf_path_for(Path::new("talk.md")), PathBuf::from("talk.pdf"));
        assert_eq!(
            pdf_path_for(Path::new("dir/notes")),
            PathBuf::from("dir/notes.pdf")
        );
    }

    #[test]
    fn test_translate_file_missing() {
        let result = translate_file("/definitely/not/here.md");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
