//! Rendering module for converting documents to presentation source and JSON.

mod beamer;
pub mod escape;
mod json;
pub mod math;
mod options;
mod preamble;
mod result;

pub use beamer::{to_beamer, to_beamer_with_stats, BeamerRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, FONT_SIZES};
pub use preamble::{preamble, wrap, DOCUMENT_END};
pub use result::{RenderResult, TranslationStats};
