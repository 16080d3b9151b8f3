// Glyph metrics
// The flow engine never measures text itself; it asks a GlyphMetrics provider

use crate::character::is_ideographic;
use crate::config::FontSpec;

/// Advance width and height of a single glyph
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphSize {
    pub width: f32,
    pub height: f32,
}

impl GlyphSize {
    pub fn new(width: f32, height: f32) -> Self {
        GlyphSize { width, height }
    }
}

/// Measurement backend - abstracts over the host's font machinery.
///
/// Implementations must be pure: the same glyph and font always yield the
/// same size, otherwise re-layout would not be reproducible.
pub trait GlyphMetrics {
    fn measure(&self, glyph: char, font: &FontSpec) -> GlyphSize;

    /// Height of one text row for `font`
    fn line_height(&self, font: &FontSpec) -> f32 {
        self.measure('x', font).height
    }
}

/// Fixed-advance metrics: every Western glyph has one advance, every
/// ideograph another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformMetrics {
    pub latin_advance: f32,
    pub ideograph_advance: f32,
    pub height: f32,
}

impl UniformMetrics {
    pub fn new(latin_advance: f32, ideograph_advance: f32, height: f32) -> Self {
        UniformMetrics {
            latin_advance,
            ideograph_advance,
            height,
        }
    }

    /// Approximate proportions of a typical CJK-capable UI font
    pub fn for_font(font: &FontSpec) -> Self {
        let size = f32::from(font.size);
        UniformMetrics {
            latin_advance: size * 0.6,
            ideograph_advance: size,
            height: size * 1.2,
        }
    }
}

impl GlyphMetrics for UniformMetrics {
    fn measure(&self, glyph: char, _font: &FontSpec) -> GlyphSize {
        let width = if is_ideographic(glyph) {
            self.ideograph_advance
        } else {
            self.latin_advance
        };
        GlyphSize::new(width, self.height)
    }

    fn line_height(&self, _font: &FontSpec) -> f32 {
        self.height
    }
}

/// Metrics that scale with the requested font size instead of being fixed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaledMetrics;

impl GlyphMetrics for ScaledMetrics {
    fn measure(&self, glyph: char, font: &FontSpec) -> GlyphSize {
        UniformMetrics::for_font(font).measure(glyph, font)
    }

    fn line_height(&self, font: &FontSpec) -> f32 {
        UniformMetrics::for_font(font).height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_metrics() {
        let metrics = UniformMetrics::new(10.0, 20.0, 24.0);
        let font = FontSpec::default();
        assert_eq!(metrics.measure('a', &font), GlyphSize::new(10.0, 24.0));
        assert_eq!(metrics.measure('中', &font), GlyphSize::new(20.0, 24.0));
        assert_eq!(metrics.line_height(&font), 24.0);
    }

    #[test]
    fn test_scaled_metrics_follow_font_size() {
        let small = FontSpec::new(0, 10);
        let large = FontSpec::new(0, 20);
        assert_eq!(ScaledMetrics.measure('a', &small).width, 6.0);
        assert_eq!(ScaledMetrics.measure('a', &large).width, 12.0);
        assert_eq!(ScaledMetrics.measure('字', &large).width, 20.0);
        assert_eq!(ScaledMetrics.line_height(&large), 24.0);
    }
}
