//! Input normalization applied before any markup rule runs.

use unicode_normalization::UnicodeNormalization;

use super::ParseOptions;

/// Normalize line endings, drop a byte order mark and optionally apply
/// Unicode NFC so that composed and decomposed input behave the same.
pub fn normalize(text: &str, options: &ParseOptions) -> String {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    if options.normalize_unicode {
        text.nfc().collect()
    } else {
        text
    }
}
