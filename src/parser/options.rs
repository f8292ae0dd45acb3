//! Parsing options and configuration.

use std::path::{Path, PathBuf};

/// Options for parsing marktex documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Directory that relative image and source paths are resolved against.
    /// `None` means the current working directory.
    pub base_dir: Option<PathBuf>,

    /// Whether referenced files are checked for existence, made absolute and
    /// (for source inclusions) read into memory
    pub resolve_inclusions: bool,

    /// Normalize input text to Unicode NFC
    pub normalize_unicode: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory relative references are resolved against.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Enable or disable inclusion resolution.
    pub fn with_resolve_inclusions(mut self, resolve: bool) -> Self {
        self.resolve_inclusions = resolve;
        self
    }

    /// Leave references exactly as written and never touch the filesystem.
    pub fn offline(mut self) -> Self {
        self.resolve_inclusions = false;
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Base directory for a source file: its parent directory.
    pub fn for_source_file(mut self, path: &Path) -> Self {
        if self.base_dir.is_none() {
            self.base_dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf);
        }
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            base_dir: None,
            resolve_inclusions: true,
            normalize_unicode: true,
        }
    }
}
