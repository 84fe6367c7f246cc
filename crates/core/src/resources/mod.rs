use serde::{Deserialize, Serialize};

const SANS_FONT: &str = "Arial";
const SERIF_FONT: &str = "Georgia";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    Plain,
    Bold,
    Italic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub style: FontStyle,
}

impl Font {
    fn scaled(family: &str, size: f32, style: FontStyle, scale: f32) -> Self {
        Self {
            family: family.to_string(),
            size: size * scale,
            style,
        }
    }
}

/// RGBA colour, alpha in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Scale dependent bundle of fonts and colours shared by every draw call of
/// a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderingResources {
    scale: f32,

    pub copyright_font: Font,
    pub title_font: Font,
    pub sub_title_font: Font,
    pub words_font: Font,
    pub effect_font: Font,
    pub fretboard_number_font: Font,
    pub tablature_font: Font,
    pub grace_font: Font,
    pub bar_number_font: Font,
    pub marker_font: Font,

    pub staff_line_color: Color,
    pub bar_separator_color: Color,
    pub bar_number_color: Color,
    pub main_glyph_color: Color,
    pub secondary_glyph_color: Color,
    pub score_info_color: Color,
}

impl RenderingResources {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            copyright_font: Font::scaled(SANS_FONT, 12.0, FontStyle::Bold, scale),
            title_font: Font::scaled(SERIF_FONT, 32.0, FontStyle::Plain, scale),
            sub_title_font: Font::scaled(SERIF_FONT, 20.0, FontStyle::Plain, scale),
            words_font: Font::scaled(SERIF_FONT, 15.0, FontStyle::Plain, scale),
            effect_font: Font::scaled(SERIF_FONT, 12.0, FontStyle::Italic, scale),
            fretboard_number_font: Font::scaled(SANS_FONT, 11.0, FontStyle::Plain, scale),
            tablature_font: Font::scaled(SANS_FONT, 13.0, FontStyle::Plain, scale),
            grace_font: Font::scaled(SANS_FONT, 11.0, FontStyle::Plain, scale),
            bar_number_font: Font::scaled(SANS_FONT, 11.0, FontStyle::Plain, scale),
            marker_font: Font::scaled(SERIF_FONT, 14.0, FontStyle::Bold, scale),

            staff_line_color: Color::rgb(165, 165, 165),
            bar_separator_color: Color::rgb(34, 34, 17),
            bar_number_color: Color::rgb(200, 0, 0),
            main_glyph_color: Color::BLACK,
            secondary_glyph_color: Color::rgba(0, 0, 0, 100),
            score_info_color: Color::BLACK,
        }
    }

    /// Rebuilds every font for a new scale.
    pub fn init(&mut self, scale: f32) {
        *self = Self::new(scale);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for RenderingResources {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fonts_follow_scale() {
        let mut resources = RenderingResources::new(1.0);
        assert_eq!(resources.title_font.size, 32.0);

        resources.init(1.5);
        assert_eq!(resources.scale(), 1.5);
        assert_eq!(resources.title_font.size, 48.0);
        assert_eq!(resources.marker_font.style, FontStyle::Bold);
        assert_eq!(resources.staff_line_color, Color::rgb(165, 165, 165));
    }
}
