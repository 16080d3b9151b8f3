// Library exports for flowtext

pub mod character;
pub mod config;
pub mod cursor;
pub mod document;
pub mod error;
pub mod line;
pub mod metrics;
pub mod paragraph;
pub mod svg;

pub use config::{FontSpec, LayoutConfig};
pub use cursor::{CharRef, Movement, Point, Size};
pub use document::{Document, PositionedGlyph};
pub use error::{Error, Result};
pub use metrics::{GlyphMetrics, GlyphSize, ScaledMetrics, UniformMetrics};
