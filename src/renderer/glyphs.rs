//! Segment-font glyphs for score popups and wheel shortcuts
//!
//! Only digits and `+` are drawable; other characters advance the cursor.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;

/// Glyph width as a share of its height
const WIDTH_RATIO: f32 = 0.55;
/// Stroke thickness as a share of height
const STROKE_RATIO: f32 = 0.14;
/// Gap between glyphs as a share of height
const SPACING_RATIO: f32 = 0.2;

// Segment bits: top, top-right, bottom-right, bottom, bottom-left, top-left, middle
const A: u8 = 1 << 0;
const B: u8 = 1 << 1;
const C: u8 = 1 << 2;
const D: u8 = 1 << 3;
const E: u8 = 1 << 4;
const F: u8 = 1 << 5;
const G: u8 = 1 << 6;

/// Lit segments for a digit
pub fn segments(digit: u32) -> u8 {
    match digit {
        0 => A | B | C | D | E | F,
        1 => B | C,
        2 => A | B | G | E | D,
        3 => A | B | G | C | D,
        4 => F | G | B | C,
        5 => A | F | G | C | D,
        6 => A | F | G | E | C | D,
        7 => A | B | C,
        8 => A | B | C | D | E | F | G,
        9 => A | B | C | D | F | G,
        _ => 0,
    }
}

/// Horizontal advance per glyph
pub fn advance(height: f32) -> f32 {
    height * (WIDTH_RATIO + SPACING_RATIO)
}

/// Total width of `text` at `height`
pub fn text_width(text: &str, height: f32) -> f32 {
    let n = text.chars().count() as f32;
    if n == 0.0 {
        0.0
    } else {
        n * advance(height) - height * SPACING_RATIO
    }
}

/// Draw one glyph with its top-left corner at `origin`
pub fn glyph(out: &mut Vec<Vertex>, ch: char, origin: Vec2, height: f32, color: [f32; 4]) {
    let w = height * WIDTH_RATIO;
    let t = height * STROKE_RATIO;
    let half = height / 2.0;

    if ch == '+' {
        out.extend(shapes::rect(Vec2::new(origin.x, origin.y + half - t / 2.0), Vec2::new(w, t), color));
        let arm = w.min(height);
        out.extend(shapes::rect(
            Vec2::new(origin.x + w / 2.0 - t / 2.0, origin.y + half - arm / 2.0),
            Vec2::new(t, arm),
            color,
        ));
        return;
    }

    let Some(digit) = ch.to_digit(10) else {
        return;
    };
    let lit = segments(digit);

    let horizontal = |y: f32| (Vec2::new(origin.x, origin.y + y), Vec2::new(w, t));
    let vertical = |x: f32, y: f32| (Vec2::new(origin.x + x, origin.y + y), Vec2::new(t, half));

    let parts = [
        (A, horizontal(0.0)),
        (B, vertical(w - t, 0.0)),
        (C, vertical(w - t, half)),
        (D, horizontal(height - t)),
        (E, vertical(0.0, half)),
        (F, vertical(0.0, 0.0)),
        (G, horizontal(half - t / 2.0)),
    ];
    for (bit, (min, size)) in parts {
        if lit & bit != 0 {
            out.extend(shapes::rect(min, size, color));
        }
    }
}

/// Draw `text` horizontally centred on `center`
pub fn text_centered(out: &mut Vec<Vertex>, text: &str, center: Vec2, height: f32, color: [f32; 4]) {
    let width = text_width(text, height);
    let mut cursor = Vec2::new(center.x - width / 2.0, center.y - height / 2.0);
    for ch in text.chars() {
        glyph(out, ch, cursor, height, color);
        cursor.x += advance(height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_counts() {
        let counts: Vec<u32> = (0..10).map(|d| segments(d).count_ones()).collect();
        assert_eq!(counts, vec![6, 2, 5, 5, 4, 5, 6, 3, 7, 6]);
    }

    #[test]
    fn test_glyph_vertex_counts() {
        let mut out = Vec::new();
        glyph(&mut out, '8', Vec2::ZERO, 10.0, [1.0; 4]);
        assert_eq!(out.len(), 7 * 6);
        out.clear();
        glyph(&mut out, '+', Vec2::ZERO, 10.0, [1.0; 4]);
        assert_eq!(out.len(), 12);
        out.clear();
        glyph(&mut out, 'x', Vec2::ZERO, 10.0, [1.0; 4]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_text_is_centred() {
        let mut out = Vec::new();
        text_centered(&mut out, "+10", Vec2::new(100.0, 50.0), 12.0, [1.0; 4]);
        let min_x = out.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = out.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!(((min_x + max_x) / 2.0 - 100.0).abs() < 0.5);
        assert!(out.iter().all(|v| (v.position[1] - 50.0).abs() <= 6.0 + 1e-4));
    }

    #[test]
    fn test_width_of_empty_text() {
        assert_eq!(text_width("", 10.0), 0.0);
        assert!((text_width("1", 10.0) - 5.5).abs() < 1e-5);
    }
}
