// Line fill and justification
// A Line is one visually wrapped row of a paragraph, always closed by a line-end slot

use crate::character::Character;
use crate::config::LayoutConfig;

/// Gaps inserted between neighbouring characters of one line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Between two ideographs - the only gap stretched by justification
    pub hanzi: f32,
    /// Between an ideograph and any other character
    pub hanzi_western: f32,
    /// Between two non-ideographic characters
    pub western: f32,
}

impl Spacing {
    fn base(config: &LayoutConfig) -> Self {
        Spacing {
            hanzi: config.best_spacing,
            hanzi_western: config.hanzi_western_spacing,
            western: config.western_spacing,
        }
    }

    /// Gap placed before `right` when it follows `left`
    pub fn between(&self, left: &Character, right: &Character) -> f32 {
        match (left.is_ideographic(), right.is_ideographic()) {
            (true, true) => self.hanzi,
            (false, false) => self.western,
            _ => self.hanzi_western,
        }
    }
}

/// Pick the ideograph spacing for a line that starts at `chars[0]`.
///
/// Leftover width is spread over the ideograph pairs seen so far. Once the
/// average would drop below the mode's minimum we stop: whatever follows
/// belongs on the next line instead of being squeezed in.
pub fn compute_spacing(chars: &[Character], loose: bool, config: &LayoutConfig) -> Spacing {
    let mut spacing = Spacing::base(config);
    let Some(first) = chars.first() else {
        return spacing;
    };

    let minimum = config.min_spacing(loose);
    let mut remaining = config.line_length - first.width();
    let mut pairs = 0usize;

    for pair in chars.windows(2) {
        let (left, right) = (&pair[0], &pair[1]);
        remaining -= right.width();
        match (left.is_ideographic(), right.is_ideographic()) {
            (true, true) => pairs += 1,
            (false, false) => remaining -= spacing.western,
            _ => remaining -= spacing.hanzi_western,
        }

        if pairs == 0 {
            continue;
        }

        let average = remaining / pairs as f32;
        if average > config.max_spacing {
            spacing.hanzi = config.best_spacing;
        } else if average >= minimum {
            spacing.hanzi = average;
        } else {
            break;
        }
    }

    spacing
}

/// One wrapped row. The last character is always the line-end slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    chars: Vec<Character>,
    spacing: Spacing,
}

impl Line {
    /// Consume a prefix of `stream` into a new line.
    ///
    /// At least one character is taken whenever `stream` is non-empty, even
    /// if it is wider than the whole budget, so repeated fills always drain
    /// the stream.
    pub fn fill(stream: &mut Vec<Character>, loose: bool, config: &LayoutConfig) -> Line {
        let spacing = compute_spacing(stream, loose, config);
        let limit = config.line_length + config.overflow_tolerance;

        let mut x = 0.0f32;
        let mut taken = 0;
        for i in 0..stream.len() {
            let lead = if i == 0 {
                0.0
            } else {
                spacing.between(&stream[i - 1], &stream[i])
            };
            if i > 0 && x + lead + stream[i].width() > limit {
                break;
            }
            x += lead;
            stream[i].x = x;
            x += stream[i].width();
            taken = i + 1;
        }

        let mut chars: Vec<Character> = stream.drain(..taken).collect();
        chars.push(Character::line_end(x));

        log::trace!(
            "fill: took {} chars (loose={}, hanzi spacing {:.2}), {} left",
            taken,
            loose,
            spacing.hanzi,
            stream.len()
        );

        Line { chars, spacing }
    }

    pub fn chars(&self) -> &[Character] {
        &self.chars
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Number of slots including the line-end
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Number of printable characters
    pub fn printable_len(&self) -> usize {
        self.chars.len() - 1
    }

    /// True when the line holds only its line-end slot
    pub fn is_empty(&self) -> bool {
        self.printable_len() == 0
    }

    pub fn end_index(&self) -> usize {
        self.chars.len() - 1
    }

    pub fn end(&self) -> &Character {
        &self.chars[self.end_index()]
    }

    /// Printable characters, line-end stripped
    pub fn printable(&self) -> &[Character] {
        &self.chars[..self.end_index()]
    }

    pub(crate) fn into_printable(mut self) -> Vec<Character> {
        self.chars.pop();
        self.chars
    }

    pub(crate) fn set_y(&mut self, y: f32) {
        for c in &mut self.chars {
            c.y = y;
        }
    }

    /// Index of the slot a click at `x` lands on.
    ///
    /// A click left of the midpoint of the gap after a character selects that
    /// character; anything past the last character selects the line-end.
    pub fn hit_test(&self, x: f32) -> usize {
        for (i, pair) in self.chars.windows(2).enumerate() {
            let midpoint = (pair[0].right() + pair[1].left()) / 2.0;
            if x < midpoint {
                return i;
            }
        }
        self.end_index()
    }

    pub fn text(&self) -> String {
        self.chars.iter().filter_map(Character::ch).collect()
    }
}
