//! Resolution of image and source file references.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{ImageRef, SourceInclusion};

use super::ParseOptions;

/// Extensions embedded as pictures rather than as source listings.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "pdf", "eps", "svg", "tif", "tiff",
];

/// Lexer used when an extension has no known highlighting language.
pub const FALLBACK_LANGUAGE: &str = "text";

/// Extension to highlighting lexer.
const LANGUAGES: &[(&str, &str)] = &[
    ("bash", "bash"),
    ("c", "c"),
    ("cc", "cpp"),
    ("clj", "clojure"),
    ("cpp", "cpp"),
    ("cs", "csharp"),
    ("css", "css"),
    ("cxx", "cpp"),
    ("erl", "erlang"),
    ("ex", "elixir"),
    ("go", "go"),
    ("h", "c"),
    ("hpp", "cpp"),
    ("hs", "haskell"),
    ("html", "html"),
    ("java", "java"),
    ("jl", "julia"),
    ("js", "javascript"),
    ("json", "json"),
    ("kt", "kotlin"),
    ("lua", "lua"),
    ("m", "matlab"),
    ("md", "markdown"),
    ("ml", "ocaml"),
    ("php", "php"),
    ("pl", "perl"),
    ("py", "python"),
    ("r", "r"),
    ("rb", "ruby"),
    ("rs", "rust"),
    ("scala", "scala"),
    ("sh", "bash"),
    ("sql", "sql"),
    ("swift", "swift"),
    ("tex", "latex"),
    ("toml", "toml"),
    ("ts", "typescript"),
    ("xml", "xml"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
];

fn extension(reference: &str) -> Option<String> {
    Path::new(reference)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

/// Check if a reference names a picture.
pub fn is_image(reference: &str) -> bool {
    extension(reference).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Highlighting lexer for a reference, falling back to plain text.
pub fn language_for(reference: &str) -> &'static str {
    let Some(ext) = extension(reference) else {
        log::debug!("No extension on `{}`, highlighting as plain text", reference);
        return FALLBACK_LANGUAGE;
    };
    match LANGUAGES.binary_search_by(|(e, _)| e.cmp(&ext.as_str())) {
        Ok(i) => LANGUAGES[i].1,
        Err(_) => {
            log::debug!("Unrecognized language `{}`, highlighting as plain text", ext);
            FALLBACK_LANGUAGE
        }
    }
}

/// Resolve a reference to the path handed to the typesetter.
///
/// With resolution enabled the path is made absolute against the base
/// directory and must exist.
fn resolve(reference: &str, options: &ParseOptions) -> Result<PathBuf> {
    let given = PathBuf::from(reference);
    if !options.resolve_inclusions {
        return Ok(given);
    }
    let path = if given.is_absolute() {
        given
    } else {
        let base = match &options.base_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => std::env::current_dir()?.join(dir),
            None => std::env::current_dir()?,
        };
        base.join(given)
    };
    if !path.exists() {
        return Err(Error::UnresolvedInclusion {
            reference: reference.to_string(),
            path,
        });
    }
    log::debug!("Resolved `{}` to {}", reference, path.display());
    Ok(path)
}

/// Resolve a picture reference.
pub fn resolve_image(reference: &str, options: &ParseOptions) -> Result<ImageRef> {
    Ok(ImageRef {
        reference: reference.to_string(),
        path: resolve(reference, options)?,
    })
}

/// Resolve a source reference, reading the file when resolution is enabled.
pub fn resolve_source(reference: &str, options: &ParseOptions) -> Result<SourceInclusion> {
    let path = resolve(reference, options)?;
    let contents = if options.resolve_inclusions {
        Some(fs::read_to_string(&path)?)
    } else {
        None
    };
    Ok(SourceInclusion {
        reference: reference.to_string(),
        path,
        language: language_for(reference).to_string(),
        contents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_table_is_sorted() {
        assert!(LANGUAGES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_language_for() {
        assert_eq!(language_for("main.rs"), "rust");
        assert_eq!(language_for("script.PY"), "python");
        assert_eq!(language_for("notes.xyz"), FALLBACK_LANGUAGE);
        assert_eq!(language_for("Makefile"), FALLBACK_LANGUAGE);
    }

    #[test]
    fn test_is_image() {
        assert!(is_image("plot.png"));
        assert!(is_image("figs/Photo.JPG"));
        assert!(!is_image("main.rs"));
        assert!(!is_image("README"));
    }

    #[test]
    fn test_offline_keeps_reference() {
        let options = ParseOptions::new().offline();
        let image = resolve_image("missing/cat.png", &options).unwrap();
        assert_eq!(image.path, PathBuf::from("missing/cat.png"));

        let source = resolve_source("missing/main.rs", &options).unwrap();
        assert_eq!(source.language, "rust");
        assert!(source.contents.is_none());
    }

    #[test]
    fn test_missing_file_is_unresolved() {
        let options = ParseOptions::new().with_base_dir("/definitely/not/here");
        let err = resolve_image("cat.png", &options).unwrap_err();
        assert!(matches!(err, Error::UnresolvedInclusion { .. }));
    }
}
