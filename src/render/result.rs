//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered presentation source
    pub content: String,

    /// Translation statistics
    pub stats: TranslationStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: TranslationStats) -> Self {
        Self { content, stats }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            stats: TranslationStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while rendering a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationStats {
    /// Sections emitted
    pub section_count: u32,

    /// Frames with a body
    pub frame_count: u32,

    /// Title-only slides
    pub plain_title_count: u32,

    /// Full-bleed picture slides
    pub picture_slide_count: u32,

    /// Paragraphs emitted
    pub paragraph_count: u32,

    /// List containers emitted
    pub list_count: u32,

    /// List items emitted
    pub list_item_count: u32,

    /// Tables emitted
    pub table_count: u32,

    /// Uncaptioned images
    pub image_count: u32,

    /// Captioned figures
    pub figure_count: u32,

    /// Source file inclusions
    pub inclusion_count: u32,

    /// Indented literal blocks
    pub literal_block_count: u32,

    /// Inline literal spans
    pub inline_literal_count: u32,

    /// Math spans and blocks
    pub math_count: u32,

    /// Pause markers
    pub pause_count: u32,
}

impl TranslationStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slides in the output, excluding sections.
    pub fn slide_count(&self) -> u32 {
        self.frame_count + self.plain_title_count + self.picture_slide_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &TranslationStats) {
        self.section_count += other.section_count;
        self.frame_count += other.frame_count;
        self.plain_title_count += other.plain_title_count;
        self.picture_slide_count += other.picture_slide_count;
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.image_count += other.image_count;
        self.figure_count += other.figure_count;
        self.inclusion_count += other.inclusion_count;
        self.literal_block_count += other.literal_block_count;
        self.inline_literal_count += other.inline_literal_count;
        self.math_count += other.math_count;
        self.pause_count += other.pause_count;
    }
}
