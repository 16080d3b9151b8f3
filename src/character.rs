// Character model
// A single addressable text unit: either a measured glyph or a line-end slot

use crate::config::{FontSpec, LayoutConfig};
use crate::metrics::{GlyphMetrics, GlyphSize};

/// First and last code point treated as ideographic for spacing rules
const IDEOGRAPH_FIRST: char = '\u{4E00}';
const IDEOGRAPH_LAST: char = '\u{9FBB}';

/// True for code points in the CJK Unified Ideographs range used by the
/// justification rules
pub fn is_ideographic(c: char) -> bool {
    (IDEOGRAPH_FIRST..=IDEOGRAPH_LAST).contains(&c)
}

/// What occupies a character slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    Printable { ch: char, width: f32, height: f32 },
    /// The cursor slot after the last printable character of a line
    LineEnd,
}

/// A glyph plus the position assigned to it by the last layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    pub glyph: Glyph,
    pub x: f32,
    pub y: f32,
}

impl Character {
    pub fn printable(ch: char, width: f32, height: f32) -> Self {
        Character {
            glyph: Glyph::Printable { ch, width, height },
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn line_end(x: f32) -> Self {
        Character {
            glyph: Glyph::LineEnd,
            x,
            y: 0.0,
        }
    }

    /// Measure a single input character.
    ///
    /// Spaces take the width of one Latin letter and tabs `tab_width` letters,
    /// so whitespace never collapses to the font's (often tiny) space advance.
    pub fn measure(
        ch: char,
        font: &FontSpec,
        metrics: &dyn GlyphMetrics,
        config: &LayoutConfig,
    ) -> Self {
        let GlyphSize { width, height } = match ch {
            ' ' => metrics.measure('x', font),
            '\t' => {
                let letter = metrics.measure('x', font);
                GlyphSize::new(letter.width * f32::from(config.tab_width), letter.height)
            }
            _ => metrics.measure(ch, font),
        };
        Self::printable(ch, width, height)
    }

    pub fn ch(&self) -> Option<char> {
        match self.glyph {
            Glyph::Printable { ch, .. } => Some(ch),
            Glyph::LineEnd => None,
        }
    }

    pub fn is_printable(&self) -> bool {
        matches!(self.glyph, Glyph::Printable { .. })
    }

    pub fn is_line_end(&self) -> bool {
        !self.is_printable()
    }

    pub fn is_ideographic(&self) -> bool {
        self.ch().is_some_and(is_ideographic)
    }

    pub fn width(&self) -> f32 {
        match self.glyph {
            Glyph::Printable { width, .. } => width,
            Glyph::LineEnd => 0.0,
        }
    }

    pub fn height(&self) -> f32 {
        match self.glyph {
            Glyph::Printable { height, .. } => height,
            Glyph::LineEnd => 0.0,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width()
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height()
    }
}

/// Convert one paragraph's worth of text into measured characters
pub fn convert_text(
    text: &str,
    font: &FontSpec,
    metrics: &dyn GlyphMetrics,
    config: &LayoutConfig,
) -> Vec<Character> {
    text.chars()
        .map(|ch| Character::measure(ch, font, metrics, config))
        .collect()
}
