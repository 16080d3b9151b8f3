// Cursor addressing
// Handles into the document structure; re-resolved after every re-flow

use crate::paragraph::Slot;

/// Reference to one character slot of a Document.
///
/// A `CharRef` is only meaningful for the layout it was taken from: any
/// mutating Document call may rebuild lines, after which old handles must be
/// resolved again through the Document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CharRef {
    pub paragraph: usize,
    pub line: usize,
    pub index: usize,
}

impl CharRef {
    pub fn new(paragraph: usize, line: usize, index: usize) -> Self {
        CharRef {
            paragraph,
            line,
            index,
        }
    }

    pub fn at(paragraph: usize, slot: Slot) -> Self {
        Self::new(paragraph, slot.line, slot.index)
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.line, self.index)
    }
}

/// Cursor movement requested by the editing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// A point in layout coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Display area dimensions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}
