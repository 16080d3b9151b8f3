// Paragraph model
// A logical block of text between hard line breaks, re-flowed wholesale on every edit

use crate::character::Character;
use crate::config::LayoutConfig;
use crate::line::Line;

/// Address of a character slot within one paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub line: usize,
    pub index: usize,
}

impl Slot {
    pub fn new(line: usize, index: usize) -> Self {
        Slot { line, index }
    }
}

/// A paragraph: never empty, at minimum one line holding only its line-end
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    lines: Vec<Line>,
}

impl Paragraph {
    pub fn new(config: &LayoutConfig) -> Self {
        Self::from_chars(Vec::new(), config)
    }

    /// Lay out `chars` (printable characters only) as a fresh paragraph
    pub fn from_chars(chars: Vec<Character>, config: &LayoutConfig) -> Self {
        let mut paragraph = Paragraph { lines: Vec::new() };
        paragraph.reflow(chars, config);
        paragraph
    }

    /// Rebuild every line from a flat character stream.
    ///
    /// Lines alternate loose and tight justification, starting loose, so that
    /// consecutive justified rows do not share the same rhythm.
    fn reflow(&mut self, mut stream: Vec<Character>, config: &LayoutConfig) {
        debug_assert!(stream.iter().all(Character::is_printable));

        self.lines.clear();
        let mut loose = true;
        loop {
            self.lines.push(Line::fill(&mut stream, loose, config));
            loose = !loose;
            if stream.is_empty() {
                break;
            }
        }
    }

    /// Re-run the fill pass over the current content
    pub fn relayout(&mut self, config: &LayoutConfig) {
        let stream = self.take_chars();
        self.reflow(stream, config);
    }

    /// Replace the content character by character, then re-flow
    pub(crate) fn remap<F>(&mut self, config: &LayoutConfig, f: F)
    where
        F: FnMut(Character) -> Character,
    {
        let stream = self.take_chars().into_iter().map(f).collect();
        self.reflow(stream, config);
    }

    fn take_chars(&mut self) -> Vec<Character> {
        std::mem::take(&mut self.lines)
            .into_iter()
            .flat_map(Line::into_printable)
            .collect()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of printable characters
    pub fn len(&self) -> usize {
        self.lines.iter().map(Line::printable_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First slot of the first line
    pub fn home(&self) -> Slot {
        Slot::new(0, 0)
    }

    /// Line-end slot of the last line
    pub fn end(&self) -> Slot {
        let line = self.lines.len() - 1;
        Slot::new(line, self.lines[line].end_index())
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.lines
            .get(slot.line)
            .is_some_and(|line| slot.index < line.len())
    }

    pub fn char_at(&self, slot: Slot) -> &Character {
        &self.lines[slot.line].chars()[slot.index]
    }

    /// Count of printable characters before `slot`
    pub fn offset_of(&self, slot: Slot) -> usize {
        debug_assert!(self.contains(slot), "slot {slot:?} outside paragraph");
        let before: usize = self.lines[..slot.line]
            .iter()
            .map(Line::printable_len)
            .sum();
        before + slot.index
    }

    /// Slot holding the printable character at `offset`, or the paragraph
    /// end once `offset` reaches the length.
    ///
    /// A line-end in the middle of the paragraph shares its offset with the
    /// first character of the next line; the printable character wins.
    pub fn slot_at(&self, offset: usize) -> Slot {
        let mut start = 0;
        for (i, line) in self.lines.iter().enumerate() {
            if offset < start + line.printable_len() {
                return Slot::new(i, offset - start);
            }
            start += line.printable_len();
        }
        self.end()
    }

    /// Splice `chars` in immediately before `at`
    pub fn insert(&mut self, at: Slot, chars: Vec<Character>, config: &LayoutConfig) {
        let offset = self.offset_of(at);
        let mut stream = self.take_chars();
        stream.splice(offset..offset, chars);
        self.reflow(stream, config);
    }

    /// Cut the paragraph at `at`; everything from `at` on moves to the
    /// returned paragraph.
    pub fn split(&mut self, at: Slot, config: &LayoutConfig) -> Paragraph {
        let offset = self.offset_of(at);
        let mut stream = self.take_chars();
        let tail = stream.split_off(offset);
        self.reflow(stream, config);
        Paragraph::from_chars(tail, config)
    }

    /// Append the content of `next` to this paragraph
    pub fn merge(&mut self, mut next: Paragraph, config: &LayoutConfig) {
        let mut stream = self.take_chars();
        stream.extend(next.take_chars());
        self.reflow(stream, config);
    }

    /// Remove the printable character at `at`. Line-ends cannot be deleted.
    pub fn delete(&mut self, at: Slot, config: &LayoutConfig) -> Option<Character> {
        let target = self.char_at(at);
        debug_assert!(target.is_printable(), "attempted to delete a line-end at {at:?}");
        if target.is_line_end() {
            return None;
        }
        let offset = self.offset_of(at);
        let mut stream = self.take_chars();
        let removed = stream.remove(offset);
        self.reflow(stream, config);
        Some(removed)
    }

    /// Assign row positions starting at `y`; returns the top of the next row
    pub(crate) fn place_rows(&mut self, mut y: f32, pitch: f32) -> f32 {
        for line in &mut self.lines {
            line.set_y(y);
            y += pitch;
        }
        y
    }

    pub fn text(&self) -> String {
        self.lines.iter().map(Line::text).collect()
    }
}
