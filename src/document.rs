// Document
// Ordered paragraphs plus the cursor; routes edits and navigation, then re-places rows

use crate::character::{Character, Glyph, convert_text};
use crate::config::{FontSpec, LayoutConfig};
use crate::cursor::{CharRef, Movement, Point, Size};
use crate::line::Line;
use crate::metrics::GlyphMetrics;
use crate::paragraph::Paragraph;

/// A printable character as handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PositionedGlyph {
    fn from_char(c: &Character) -> Option<Self> {
        match c.glyph {
            Glyph::Printable { ch, width, height } => Some(PositionedGlyph {
                ch,
                x: c.x,
                y: c.y,
                width,
                height,
            }),
            Glyph::LineEnd => None,
        }
    }
}

/// The text-flow document with its cursor
pub struct Document {
    paragraphs: Vec<Paragraph>,
    size: Size,
    font: FontSpec,
    config: LayoutConfig,
    metrics: Box<dyn GlyphMetrics>,
    line_height: f32,
    cursor: CharRef,
}

impl Document {
    /// Create an empty document: one paragraph, one line, cursor on its end
    pub fn new(
        size: Size,
        font: FontSpec,
        config: LayoutConfig,
        metrics: impl GlyphMetrics + 'static,
    ) -> Self {
        let line_height = metrics.line_height(&font);
        let mut document = Document {
            paragraphs: Vec::new(),
            size,
            font,
            config,
            metrics: Box::new(metrics),
            line_height,
            cursor: CharRef::default(),
        };
        let flow = document.flow_config();
        document.paragraphs.push(Paragraph::new(&flow));
        document.place_rows();
        document
    }

    /// Create a document and insert `text` at its start
    pub fn with_text(
        size: Size,
        font: FontSpec,
        config: LayoutConfig,
        metrics: impl GlyphMetrics + 'static,
        text: &str,
    ) -> Self {
        let mut document = Self::new(size, font, config, metrics);
        document.insert_text(text);
        document
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn font(&self) -> FontSpec {
        self.font
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Effective line budget: the configured length, capped by the display width
    pub fn line_length(&self) -> f32 {
        self.config.line_length.min(self.size.width)
    }

    fn flow_config(&self) -> LayoutConfig {
        self.config.with_line_length(self.line_length())
    }

    /// Vertical distance between the tops of two consecutive rows
    fn pitch(&self) -> f32 {
        self.line_height + self.config.row_spacing
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn line_count(&self) -> usize {
        self.paragraphs.iter().map(Paragraph::line_count).sum()
    }

    /// Document content with paragraphs joined by `\n`
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn line(&self, at: CharRef) -> &Line {
        &self.paragraphs[at.paragraph].lines()[at.line]
    }

    pub fn char_at(&self, at: CharRef) -> &Character {
        self.paragraphs[at.paragraph].char_at(at.slot())
    }

    /// Every slot of the document, line-ends included, in document order
    pub fn slots(&self) -> impl Iterator<Item = CharRef> + '_ {
        self.paragraphs
            .iter()
            .enumerate()
            .flat_map(|(p, paragraph)| {
                paragraph
                    .lines()
                    .iter()
                    .enumerate()
                    .flat_map(move |(l, line)| (0..line.len()).map(move |i| CharRef::new(p, l, i)))
            })
    }

    /// Printable characters with their layout positions, in document order
    pub fn glyphs(&self) -> impl Iterator<Item = PositionedGlyph> + '_ {
        self.paragraphs
            .iter()
            .flat_map(Paragraph::lines)
            .flat_map(Line::printable)
            .filter_map(PositionedGlyph::from_char)
    }

    pub fn cursor(&self) -> CharRef {
        self.cursor
    }

    pub fn cursor_char(&self) -> &Character {
        self.char_at(self.cursor)
    }

    /// Top-left corner of the cursor slot
    pub fn cursor_point(&self) -> Point {
        let c = self.cursor_char();
        Point::new(c.x, c.y)
    }

    /// Move the cursor to `at`, clamped into the current structure
    pub fn set_cursor(&mut self, at: CharRef) {
        let paragraph = at.paragraph.min(self.paragraphs.len() - 1);
        let lines = self.paragraphs[paragraph].lines();
        let line = at.line.min(lines.len() - 1);
        let index = at.index.min(lines[line].end_index());
        self.cursor = CharRef::new(paragraph, line, index);
    }

    pub fn is_paragraph_home(&self, at: CharRef) -> bool {
        at.slot() == self.paragraphs[at.paragraph].home()
    }

    pub fn is_paragraph_end(&self, at: CharRef) -> bool {
        at.slot() == self.paragraphs[at.paragraph].end()
    }

    /// The slot before `at`; the first slot of the document maps to itself
    pub fn previous_char(&self, at: CharRef) -> CharRef {
        if at.index > 0 {
            CharRef::new(at.paragraph, at.line, at.index - 1)
        } else if at.line > 0 {
            let previous = &self.paragraphs[at.paragraph].lines()[at.line - 1];
            CharRef::new(at.paragraph, at.line - 1, previous.end_index())
        } else if at.paragraph > 0 {
            CharRef::at(at.paragraph - 1, self.paragraphs[at.paragraph - 1].end())
        } else {
            at
        }
    }

    /// The slot after `at`; the last slot of the document maps to itself
    pub fn next_char(&self, at: CharRef) -> CharRef {
        let paragraph = &self.paragraphs[at.paragraph];
        if at.index + 1 < self.line(at).len() {
            CharRef::new(at.paragraph, at.line, at.index + 1)
        } else if at.line + 1 < paragraph.line_count() {
            CharRef::new(at.paragraph, at.line + 1, 0)
        } else if at.paragraph + 1 < self.paragraphs.len() {
            CharRef::at(at.paragraph + 1, self.paragraphs[at.paragraph + 1].home())
        } else {
            at
        }
    }

    /// First slot of the line holding `at`
    pub fn home_char(&self, at: CharRef) -> CharRef {
        CharRef::new(at.paragraph, at.line, 0)
    }

    /// Line-end slot of the line holding `at`
    pub fn end_char(&self, at: CharRef) -> CharRef {
        CharRef::new(at.paragraph, at.line, self.line(at).end_index())
    }

    /// Resolve a point to the slot a click there would select.
    ///
    /// Each row owns the band from its top down to the top of the next row.
    /// Points above the content hit the first row, points below it the last.
    pub fn locate(&self, point: Point) -> CharRef {
        let pitch = self.pitch();
        for (p, paragraph) in self.paragraphs.iter().enumerate() {
            for (l, line) in paragraph.lines().iter().enumerate() {
                if point.y < line.end().y + pitch {
                    return CharRef::new(p, l, line.hit_test(point.x));
                }
            }
        }

        let p = self.paragraphs.len() - 1;
        let l = self.paragraphs[p].line_count() - 1;
        let line = &self.paragraphs[p].lines()[l];
        CharRef::new(p, l, line.hit_test(point.x))
    }

    pub fn set_cursor_by_point(&mut self, x: f32, y: f32) {
        self.cursor = self.locate(Point::new(x, y));
        log::debug!("cursor placed by point ({x}, {y}) at {:?}", self.cursor);
    }

    pub fn move_cursor(&mut self, movement: Movement) {
        let cursor = self.cursor;
        self.cursor = match movement {
            Movement::Left => {
                let target = self.previous_char(cursor);
                self.skip_inner_line_end(target, Self::previous_char)
            }
            Movement::Right => {
                let target = self.next_char(cursor);
                self.skip_inner_line_end(target, Self::next_char)
            }
            Movement::Up => {
                let at = self.cursor_point();
                self.locate(Point::new(at.x, at.y - self.pitch()))
            }
            Movement::Down => {
                let at = self.cursor_point();
                self.locate(Point::new(at.x, at.y + self.pitch()))
            }
            Movement::Home => self.home_char(cursor),
            Movement::End => self.end_char(cursor),
        };
        log::debug!("cursor {movement:?}: {cursor:?} -> {:?}", self.cursor);
    }

    /// Line-ends inside a paragraph are transparent to horizontal movement;
    /// paragraph ends are stopping points.
    fn skip_inner_line_end(&self, at: CharRef, step: fn(&Self, CharRef) -> CharRef) -> CharRef {
        if self.char_at(at).is_line_end() && !self.is_paragraph_end(at) {
            step(self, at)
        } else {
            at
        }
    }

    /// Insert `text` at the cursor. `\r\n` and `\r` count as paragraph breaks.
    pub fn insert_text(&mut self, text: &str) {
        let text = normalize_line_breaks(text);
        if text.is_empty() {
            return;
        }

        let flow = self.flow_config();
        let mut segments: Vec<Vec<Character>> = text
            .split('\n')
            .map(|segment| convert_text(segment, &self.font, self.metrics.as_ref(), &self.config))
            .collect();

        let p = self.cursor.paragraph;
        let at = self.cursor.slot();

        if segments.len() == 1 {
            let inserted = segments.remove(0);
            let start = self.paragraphs[p].offset_of(at);
            let count = inserted.len();
            self.paragraphs[p].insert(at, inserted, &flow);
            self.place_rows();
            self.cursor = self.after_inserted(p, start + count);
        } else {
            let last = segments.pop().unwrap_or_default();
            let first = segments.remove(0);
            let middle = segments;

            let mut tail = self.paragraphs[p].split(at, &flow);
            let end = self.paragraphs[p].end();
            self.paragraphs[p].insert(end, first, &flow);

            let last_count = last.len();
            let home = tail.home();
            tail.insert(home, last, &flow);

            let tail_index = p + 1 + middle.len();
            let inserted = middle
                .into_iter()
                .map(|chars| Paragraph::from_chars(chars, &flow))
                .chain(std::iter::once(tail));
            self.paragraphs.splice(p + 1..p + 1, inserted);
            self.place_rows();

            self.cursor = if last_count > 0 {
                self.after_inserted(tail_index, last_count)
            } else {
                CharRef::at(tail_index, self.paragraphs[tail_index].home())
            };
        }

        log::debug!(
            "inserted {} chars, {} paragraphs now, cursor at {:?}",
            text.chars().count(),
            self.paragraphs.len(),
            self.cursor
        );
    }

    /// Slot following the inserted run that ends just before `end_offset`
    fn after_inserted(&self, paragraph: usize, end_offset: usize) -> CharRef {
        if end_offset == 0 {
            return CharRef::at(paragraph, self.paragraphs[paragraph].home());
        }
        let last = self.paragraphs[paragraph].slot_at(end_offset - 1);
        self.next_char(CharRef::at(paragraph, last))
    }

    /// Backspace: delete the printable character before the cursor, or join
    /// this paragraph onto the previous one when the cursor is at its start.
    pub fn delete_left(&mut self) {
        let flow = self.flow_config();
        let p = self.cursor.paragraph;
        let offset = self.paragraphs[p].offset_of(self.cursor.slot());

        if offset == 0 {
            if p == 0 {
                return;
            }
            let current = self.paragraphs.remove(p);
            let previous = &mut self.paragraphs[p - 1];
            let boundary = previous.len();
            previous.merge(current, &flow);
            let slot = previous.slot_at(boundary);
            self.cursor = CharRef::at(p - 1, slot);
            log::debug!("merged paragraph {p} into {}", p - 1);
        } else {
            let paragraph = &mut self.paragraphs[p];
            let target = paragraph.slot_at(offset - 1);
            paragraph.delete(target, &flow);
            self.cursor = CharRef::at(p, paragraph.slot_at(offset - 1));
        }

        self.place_rows();
    }

    /// Forward delete: delete the printable character at the cursor, or pull
    /// the next paragraph up when the cursor is at this paragraph's end.
    pub fn delete_right(&mut self) {
        let flow = self.flow_config();
        let p = self.cursor.paragraph;
        let offset = self.paragraphs[p].offset_of(self.cursor.slot());

        if offset == self.paragraphs[p].len() {
            if p + 1 == self.paragraphs.len() {
                return;
            }
            let next = self.paragraphs.remove(p + 1);
            self.paragraphs[p].merge(next, &flow);
            log::debug!("merged paragraph {} into {p}", p + 1);
        } else {
            let target = self.paragraphs[p].slot_at(offset);
            self.paragraphs[p].delete(target, &flow);
        }

        self.cursor = CharRef::at(p, self.paragraphs[p].slot_at(offset));
        self.place_rows();
    }

    /// Change the display area and re-flow every paragraph
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
        let flow = self.flow_config();
        self.reflow_all(|paragraph| paragraph.relayout(&flow));
        log::debug!(
            "resized to {width}x{height}: {} lines in {} paragraphs",
            self.line_count(),
            self.paragraphs.len()
        );
    }

    /// Switch fonts: re-measure every character and re-flow
    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
        self.line_height = self.metrics.line_height(&font);

        let flow = self.flow_config();
        let config = self.config;
        let p = self.cursor.paragraph;
        let offset = self.paragraphs[p].offset_of(self.cursor.slot());

        let metrics = self.metrics.as_ref();
        for paragraph in &mut self.paragraphs {
            paragraph.remap(&flow, |c| match c.glyph {
                Glyph::Printable { ch, .. } => Character::measure(ch, &font, metrics, &config),
                Glyph::LineEnd => c,
            });
        }

        self.cursor = CharRef::at(p, self.paragraphs[p].slot_at(offset));
        self.place_rows();
        log::debug!("font changed to {font:?}, line height {}", self.line_height);
    }

    /// Apply `f` to every paragraph, keeping the cursor on the same logical slot
    fn reflow_all<F>(&mut self, f: F)
    where
        F: Fn(&mut Paragraph),
    {
        let p = self.cursor.paragraph;
        let offset = self.paragraphs[p].offset_of(self.cursor.slot());
        for paragraph in &mut self.paragraphs {
            f(paragraph);
        }
        self.cursor = CharRef::at(p, self.paragraphs[p].slot_at(offset));
        self.place_rows();
    }

    /// Assign row positions across the whole document
    fn place_rows(&mut self) {
        let pitch = self.pitch();
        let mut y = 0.0;
        for paragraph in &mut self.paragraphs {
            y = paragraph.place_rows(y, pitch);
        }
    }
}

fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::UniformMetrics;

    /// Latin letters are 10 wide, ideographs 20, rows 20 high plus 10 gap
    fn document(line_length: f32) -> Document {
        Document::new(
            Size::new(800.0, 600.0),
            FontSpec::default(),
            LayoutConfig::default().with_line_length(line_length),
            UniformMetrics::new(10.0, 20.0, 20.0),
        )
    }

    fn line_texts(doc: &Document) -> Vec<String> {
        doc.paragraphs()
            .iter()
            .flat_map(Paragraph::lines)
            .map(Line::text)
            .collect()
    }

    #[test]
    fn test_new_document_is_one_empty_line() {
        let doc = document(32.0);
        assert_eq!(doc.paragraph_count(), 1);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.cursor(), CharRef::new(0, 0, 0));
        assert!(doc.cursor_char().is_line_end());
        assert_eq!(doc.cursor_point(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_insert_wraps_lines() {
        let mut doc = document(32.0);
        doc.insert_text("abcde");
        assert_eq!(line_texts(&doc), vec!["abc", "de"]);
        assert!(doc.is_paragraph_end(doc.cursor()));
    }

    #[test]
    fn test_line_break_normalization() {
        let mut doc = document(480.0);
        doc.insert_text("a\r\nb\rc\nd");
        assert_eq!(doc.paragraph_count(), 4);
        assert_eq!(doc.text(), "a\nb\nc\nd");
    }

    #[test]
    fn test_empty_insert_is_noop() {
        let mut doc = document(480.0);
        doc.insert_text("ab");
        let before = doc.cursor();
        doc.insert_text("");
        assert_eq!(doc.cursor(), before);
        assert_eq!(doc.text(), "ab");
    }

    #[test]
    fn test_insert_in_middle_moves_cursor_past_insert() {
        let mut doc = document(480.0);
        doc.insert_text("ad");
        doc.set_cursor(CharRef::new(0, 0, 1));
        doc.insert_text("bc");
        assert_eq!(doc.text(), "abcd");
        assert_eq!(doc.cursor_char().ch(), Some('d'));
    }

    #[test]
    fn test_cursor_lands_on_line_end_after_wrapping_insert() {
        let mut doc = document(32.0);
        doc.insert_text("abcdef");
        doc.set_cursor(CharRef::new(0, 0, 0));
        doc.insert_text("x");
        // "xab" fills the first row; the slot after x is b
        assert_eq!(line_texts(&doc), vec!["xab", "cde", "f"]);
        assert_eq!(doc.cursor(), CharRef::new(0, 0, 1));

        doc.set_cursor(CharRef::new(0, 0, 2));
        doc.insert_text("y");
        // y is now the last glyph of row one; its successor is that row's end
        assert_eq!(line_texts(&doc), vec!["xay", "bcd", "ef"]);
        assert_eq!(doc.cursor(), CharRef::new(0, 0, 3));
        assert!(doc.cursor_char().is_line_end());
    }

    #[test]
    fn test_multi_paragraph_insert_in_middle() {
        let mut doc = document(480.0);
        doc.insert_text("AB");
        doc.set_cursor(CharRef::new(0, 0, 1));
        doc.insert_text("x\nmid\ny");
        assert_eq!(doc.text(), "Ax\nmid\nyB");
        assert_eq!(doc.cursor(), CharRef::new(2, 0, 1));
        assert_eq!(doc.cursor_char().ch(), Some('B'));
    }

    #[test]
    fn test_trailing_newline_puts_cursor_at_new_paragraph() {
        let mut doc = document(480.0);
        doc.insert_text("AB");
        doc.set_cursor(CharRef::new(0, 0, 1));
        doc.insert_text("\n");
        assert_eq!(doc.text(), "A\nB");
        assert_eq!(doc.cursor(), CharRef::new(1, 0, 0));
    }

    #[test]
    fn test_delete_left_within_paragraph() {
        let mut doc = document(480.0);
        doc.insert_text("abc");
        doc.delete_left();
        assert_eq!(doc.text(), "ab");
        assert!(doc.is_paragraph_end(doc.cursor()));
    }

    #[test]
    fn test_delete_left_at_document_start_is_noop() {
        let mut doc = document(480.0);
        doc.insert_text("abc");
        doc.set_cursor(CharRef::new(0, 0, 0));
        doc.delete_left();
        assert_eq!(doc.text(), "abc");
        assert_eq!(doc.cursor(), CharRef::new(0, 0, 0));
    }

    #[test]
    fn test_delete_left_from_line_end_slot() {
        let mut doc = document(32.0);
        doc.insert_text("abcde");
        // Line-end of the first row: after "c"
        doc.set_cursor(CharRef::new(0, 0, 3));
        doc.delete_left();
        assert_eq!(doc.text(), "abde");
        assert_eq!(doc.cursor_char().ch(), Some('d'));
    }

    #[test]
    fn test_delete_left_merges_empty_paragraph() {
        let mut doc = document(480.0);
        doc.insert_text("ab\n");
        assert_eq!(doc.paragraph_count(), 2);
        doc.delete_left();
        assert_eq!(doc.paragraph_count(), 1);
        assert_eq!(doc.text(), "ab");
        assert!(doc.is_paragraph_end(doc.cursor()));
    }

    #[test]
    fn test_delete_right_within_paragraph() {
        let mut doc = document(480.0);
        doc.insert_text("abc");
        doc.set_cursor(CharRef::new(0, 0, 1));
        doc.delete_right();
        assert_eq!(doc.text(), "ac");
        assert_eq!(doc.cursor_char().ch(), Some('c'));
    }

    #[test]
    fn test_delete_right_from_line_end_slot() {
        let mut doc = document(32.0);
        doc.insert_text("abcde");
        doc.set_cursor(CharRef::new(0, 0, 3));
        doc.delete_right();
        assert_eq!(doc.text(), "abce");
        assert_eq!(doc.cursor_char().ch(), Some('e'));
    }

    #[test]
    fn test_delete_right_merges_next_paragraph() {
        let mut doc = document(480.0);
        doc.insert_text("ab\ncd");
        doc.set_cursor(CharRef::new(0, 0, 2));
        doc.delete_right();
        assert_eq!(doc.text(), "abcd");
        assert_eq!(doc.cursor_char().ch(), Some('c'));
    }

    #[test]
    fn test_delete_right_at_document_end_is_noop() {
        let mut doc = document(480.0);
        doc.insert_text("ab");
        doc.delete_right();
        assert_eq!(doc.text(), "ab");
    }

    #[test]
    fn test_delete_right_pulls_up_empty_paragraph() {
        let mut doc = document(480.0);
        doc.insert_text("ab\n");
        doc.set_cursor(CharRef::new(0, 0, 2));
        doc.delete_right();
        assert_eq!(doc.paragraph_count(), 1);
        assert!(doc.is_paragraph_end(doc.cursor()));
    }

    #[test]
    fn test_previous_and_next_clamp_at_boundaries() {
        let mut doc = document(480.0);
        doc.insert_text("ab");
        let first = CharRef::new(0, 0, 0);
        let last = CharRef::new(0, 0, 2);
        assert_eq!(doc.previous_char(first), first);
        assert_eq!(doc.next_char(last), last);
    }

    #[test]
    fn test_next_char_crosses_lines_and_paragraphs() {
        let mut doc = document(32.0);
        doc.insert_text("abcd\nef");
        assert_eq!(doc.next_char(CharRef::new(0, 0, 2)), CharRef::new(0, 0, 3));
        assert_eq!(doc.next_char(CharRef::new(0, 0, 3)), CharRef::new(0, 1, 0));
        assert_eq!(doc.next_char(CharRef::new(0, 1, 1)), CharRef::new(1, 0, 0));
        assert_eq!(doc.previous_char(CharRef::new(1, 0, 0)), CharRef::new(0, 1, 1));
        assert_eq!(doc.previous_char(CharRef::new(0, 1, 0)), CharRef::new(0, 0, 3));
    }

    #[test]
    fn test_horizontal_moves_skip_inner_line_ends() {
        let mut doc = document(32.0);
        doc.insert_text("abcd\nef");
        doc.set_cursor(CharRef::new(0, 0, 2));
        doc.move_cursor(Movement::Right);
        assert_eq!(doc.cursor(), CharRef::new(0, 1, 0));
        doc.move_cursor(Movement::Left);
        assert_eq!(doc.cursor(), CharRef::new(0, 0, 2));

        // Paragraph ends are stopping points
        doc.set_cursor(CharRef::new(0, 1, 0));
        doc.move_cursor(Movement::Right);
        assert_eq!(doc.cursor(), CharRef::new(0, 1, 1));
        doc.move_cursor(Movement::Right);
        assert_eq!(doc.cursor(), CharRef::new(1, 0, 0));
        doc.move_cursor(Movement::Left);
        assert_eq!(doc.cursor(), CharRef::new(0, 1, 1));
    }

    #[test]
    fn test_home_and_end_stay_on_line() {
        let mut doc = document(32.0);
        doc.insert_text("abcdef");
        doc.set_cursor(CharRef::new(0, 1, 1));
        doc.move_cursor(Movement::Home);
        assert_eq!(doc.cursor(), CharRef::new(0, 1, 0));
        doc.move_cursor(Movement::End);
        assert_eq!(doc.cursor(), CharRef::new(0, 1, 3));
    }

    #[test]
    fn test_vertical_moves_keep_column() {
        let mut doc = document(32.0);
        doc.insert_text("abcdefg");
        doc.set_cursor(CharRef::new(0, 0, 1));
        doc.move_cursor(Movement::Down);
        assert_eq!(doc.cursor(), CharRef::new(0, 1, 1));
        doc.move_cursor(Movement::Down);
        // Third row holds only "g": x = 11 is past it, so the line-end wins
        assert_eq!(doc.cursor(), CharRef::new(0, 2, 1));
        doc.move_cursor(Movement::Down);
        assert_eq!(doc.cursor(), CharRef::new(0, 2, 1));
        // The line-end of "g" sits at x = 10, left of the d|e midpoint
        doc.move_cursor(Movement::Up);
        assert_eq!(doc.cursor(), CharRef::new(0, 1, 0));
        doc.move_cursor(Movement::Up);
        doc.move_cursor(Movement::Up);
        assert_eq!(doc.cursor(), CharRef::new(0, 0, 0));
    }

    #[test]
    fn test_rows_are_placed_across_paragraphs() {
        let mut doc = document(32.0);
        doc.insert_text("abcd\nef");
        let tops: Vec<f32> = doc
            .paragraphs()
            .iter()
            .flat_map(Paragraph::lines)
            .map(|line| line.end().y)
            .collect();
        assert_eq!(tops, vec![0.0, 30.0, 60.0]);
    }

    #[test]
    fn test_locate_bands_and_overflow() {
        let mut doc = document(32.0);
        doc.insert_text("abcd\nef");
        assert_eq!(doc.locate(Point::new(0.0, -40.0)), CharRef::new(0, 0, 0));
        // The gap below a row still belongs to that row
        assert_eq!(doc.locate(Point::new(12.0, 25.0)), CharRef::new(0, 0, 1));
        assert_eq!(doc.locate(Point::new(12.0, 30.0)), CharRef::new(0, 1, 1));
        assert_eq!(doc.locate(Point::new(500.0, 65.0)), CharRef::new(1, 0, 2));
        assert_eq!(doc.locate(Point::new(0.0, 9000.0)), CharRef::new(1, 0, 0));
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut doc = document(480.0);
        doc.insert_text("ab");
        doc.set_cursor(CharRef::new(7, 3, 99));
        assert_eq!(doc.cursor(), CharRef::new(0, 0, 2));
    }

    #[test]
    fn test_display_width_caps_line_length() {
        let mut doc = document(480.0);
        doc.insert_text("abcdef");
        assert_eq!(doc.line_count(), 1);

        doc.resize(32.0, 600.0);
        assert_eq!(line_texts(&doc), vec!["abc", "def"]);
        assert!(doc.is_paragraph_end(doc.cursor()));
    }

    #[test]
    fn test_resize_keeps_cursor_slot() {
        let mut doc = document(480.0);
        doc.insert_text("abcdef");
        doc.set_cursor(CharRef::new(0, 0, 4));
        doc.resize(32.0, 600.0);
        assert_eq!(doc.cursor_char().ch(), Some('e'));
        assert_eq!(doc.cursor(), CharRef::new(0, 1, 1));
    }

    #[test]
    fn test_degenerate_width_places_one_glyph_per_line() {
        let mut doc = document(480.0);
        doc.insert_text("abc");
        doc.resize(0.0, 0.0);
        assert_eq!(line_texts(&doc), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_set_font_remeasures() {
        let mut doc = Document::new(
            Size::new(800.0, 600.0),
            FontSpec::new(0, 10),
            LayoutConfig::default().with_line_length(40.0),
            crate::metrics::ScaledMetrics,
        );
        doc.insert_text("abcde");
        // 6 wide glyphs with 1 gaps: five fit in 34
        assert_eq!(doc.line_count(), 1);

        doc.set_font(FontSpec::new(0, 20));
        // 12 wide glyphs: 12 + 1 + 12 + 1 + 12 = 38, a fourth would overflow
        assert_eq!(line_texts(&doc), vec!["abc", "de"]);
        assert_eq!(doc.line_height(), 24.0);
        assert_eq!(doc.glyphs().next().map(|g| g.width), Some(12.0));
        assert!(doc.is_paragraph_end(doc.cursor()));
    }

    #[test]
    fn test_glyphs_skip_line_ends() {
        let mut doc = document(32.0);
        doc.insert_text("abcd\nef");
        let text: String = doc.glyphs().map(|g| g.ch).collect();
        assert_eq!(text, "abcdef");
        let d = doc.glyphs().nth(3).unwrap();
        assert_eq!((d.x, d.y, d.width, d.height), (0.0, 30.0, 10.0, 20.0));
    }
}
