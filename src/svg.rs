// SVG preview rendering
// Draws the laid-out glyphs of a Document; used by the CLI and snapshot tests

use crate::document::Document;
use std::fmt::Write;

const BACKGROUND_COLOR: u32 = 0xFFFFFFFF;
const GLYPH_BOX_COLOR: u32 = 0xFFF5B4FF;
const TEXT_COLOR: u32 = 0x000000FF;
const CARET_COLOR: u32 = 0xD02020FF;

/// Minimal SVG canvas that accumulates markup
pub struct SvgCanvas {
    svg_content: String,
    current_color: u32,
    font_size: u8,
}

impl SvgCanvas {
    pub fn new(width: f32, height: f32, font_size: u8) -> Self {
        let mut canvas = SvgCanvas {
            svg_content: String::new(),
            current_color: TEXT_COLOR,
            font_size,
        };

        let _ = writeln!(
            &mut canvas.svg_content,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(
            &mut canvas.svg_content,
            r#"  <rect width="{}" height="{}" fill="{}"/>"#,
            width,
            height,
            color_to_svg(BACKGROUND_COLOR)
        );

        canvas
    }

    pub fn set_color(&mut self, color: u32) {
        self.current_color = color;
    }

    pub fn draw_rect_filled(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let _ = writeln!(
            &mut self.svg_content,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            x,
            y,
            w,
            h,
            color_to_svg(self.current_color)
        );
    }

    /// Draw `text` with its baseline at `y`
    pub fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        if text.is_empty() {
            return;
        }
        let _ = writeln!(
            &mut self.svg_content,
            r#"  <text x="{}" y="{}" fill="{}" font-size="{}">{}</text>"#,
            x,
            y,
            color_to_svg(self.current_color),
            self.font_size,
            escape_xml(text)
        );
    }

    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let _ = writeln!(
            &mut self.svg_content,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
            x1,
            y1,
            x2,
            y2,
            color_to_svg(self.current_color)
        );
    }

    /// Close the document and return the markup
    pub fn finish(mut self) -> String {
        self.svg_content.push_str("</svg>\n");
        self.svg_content
    }
}

/// Render every printable glyph as a shaded box with its character, plus the caret
pub fn render_svg(document: &Document) -> String {
    let size = document.size();
    let mut canvas = SvgCanvas::new(size.width, size.height, document.font().size);

    canvas.set_color(GLYPH_BOX_COLOR);
    for glyph in document.glyphs() {
        canvas.draw_rect_filled(glyph.x, glyph.y, glyph.width, glyph.height);
    }

    canvas.set_color(TEXT_COLOR);
    for glyph in document.glyphs().filter(|g| !g.ch.is_whitespace()) {
        // Baseline one fifth of the glyph height above its bottom edge
        let baseline = glyph.y + glyph.height - glyph.height / 5.0;
        canvas.draw_text(&glyph.ch.to_string(), glyph.x, baseline);
    }

    let caret = document.cursor_point();
    canvas.set_color(CARET_COLOR);
    canvas.draw_line(caret.x, caret.y, caret.x, caret.y + document.line_height());

    canvas.finish()
}

/// Convert RGBA color to SVG color string
fn color_to_svg(color: u32) -> String {
    let r = (color >> 24) & 0xFF;
    let g = (color >> 16) & 0xFF;
    let b = (color >> 8) & 0xFF;
    let a = color & 0xFF;

    if a == 0xFF {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("rgba({}, {}, {}, {:.2})", r, g, b, a as f32 / 255.0)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
