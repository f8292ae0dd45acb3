//! Rendering options and configuration.

/// Font sizes accepted by the presentation document class.
pub const FONT_SIZES: &[u8] = &[8, 9, 10, 11, 12, 14, 17, 20];

/// Options for rendering presentation source.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Presentation theme (empty for the class default)
    pub theme: String,

    /// Base font size in points
    pub font_size: u8,

    /// Extra document class options
    pub class_options: String,

    /// Highlighting style for source listings
    pub minted_style: String,

    /// Color of hyperlinks
    pub link_color: String,

    /// Width of inline images as a fraction of the text width
    pub image_width: f32,

    /// Collect translation statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the presentation theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Set the base font size, snapping to the nearest supported size.
    pub fn with_font_size(mut self, size: u8) -> Self {
        self.font_size = FONT_SIZES
            .iter()
            .copied()
            .min_by_key(|s| (*s as i16 - size as i16).abs())
            .unwrap_or(10);
        self
    }

    /// Set extra document class options.
    pub fn with_class_options(mut self, options: impl Into<String>) -> Self {
        self.class_options = options.into();
        self
    }

    /// Set the highlighting style.
    pub fn with_minted_style(mut self, style: impl Into<String>) -> Self {
        self.minted_style = style.into();
        self
    }

    /// Set the hyperlink color.
    pub fn with_link_color(mut self, color: impl Into<String>) -> Self {
        self.link_color = color.into();
        self
    }

    /// Set the inline image width fraction.
    pub fn with_image_width(mut self, width: f32) -> Self {
        self.image_width = width.clamp(0.1, 1.0);
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Document class option list, e.g. `10pt, compress`.
    pub fn class_option_list(&self) -> String {
        let mut list = format!("{}pt", self.font_size);
        if !self.class_options.trim().is_empty() {
            list.push_str(", ");
            list.push_str(self.class_options.trim());
        }
        list
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: "m".to_string(),
            font_size: 10,
            class_options: "compress".to_string(),
            minted_style: "trac".to_string(),
            link_color: "blue".to_string(),
            image_width: 0.8,
            collect_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_theme("Madrid")
            .with_font_size(13)
            .with_image_width(2.0);

        assert_eq!(options.theme, "Madrid");
        assert_eq!(options.font_size, 12);
        assert_eq!(options.image_width, 1.0);
    }

    #[test]
    fn test_class_option_list() {
        assert_eq!(RenderOptions::default().class_option_list(), "10pt, compress");
        let bare = RenderOptions::new().with_class_options("");
        assert_eq!(bare.class_option_list(), "10pt");
    }
}
