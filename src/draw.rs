// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the mirrored camera image.
// 2) Filled/outlined rectangles, lines and dots for keys and the hand skeleton.
// 3) A 5x7 bitmap font, scaled up, for key labels and the typed text.

use crate::error::Error;
use crate::types::FrameBuffer;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the camera feed.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image (live video).
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in window pixel coordinates, None when the
    /// cursor is outside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    pub fn right_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Right)
    }
}

/* ---------- Software drawing: pixels, lines, rectangles, dots ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Cut the segment down to the part inside a `w` x `h` frame (Liang-Barsky).
/// None when the segment misses the frame entirely.
fn clip_line(x0: i32, y0: i32, x1: i32, y1: i32, w: usize, h: usize) -> Option<(i32, i32, i32, i32)> {
    if w == 0 || h == 0 {
        return None;
    }
    let (xmax, ymax) = ((w - 1) as f64, (h - 1) as f64);
    let (fx0, fy0) = (x0 as f64, y0 as f64);
    let (dx, dy) = (x1 as f64 - fx0, y1 as f64 - fy0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, fx0), (dx, xmax - fx0), (-dy, fy0), (dy, ymax - fy0)] {
        if p == 0.0 {
            if q < 0.0 { return None; }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 { return None; }
                t0 = t0.max(r);
            } else {
                if r < t0 { return None; }
                t1 = t1.min(r);
            }
        }
    }
    let at = |t: f64| {
        let x = (fx0 + t * dx).round().clamp(0.0, xmax) as i32;
        let y = (fy0 + t * dy).round().clamp(0.0, ymax) as i32;
        (x, y)
    };
    let ((ax, ay), (bx, by)) = (at(t0), at(t1));
    Some((ax, ay, bx, by))
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham,
/// clipped to the frame first so far-off endpoints cost nothing.
pub fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let Some((mut x0, mut y0, x1, y1)) = clip_line(x0, y0, x1, y1, fb.width, fb.height) else {
        return;
    };
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Solid rectangle covering [x, x+w) x [y, y+h), clipped to the frame.
pub fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(w).min(fb.width as i32);
    let y1 = y.saturating_add(h).min(fb.height as i32);
    for py in y0..y1 {
        let row = py as usize * fb.width;
        for px in x0..x1 {
            fb.pixels[row + px as usize] = color;
        }
    }
}

/// Rectangle outline from (x0,y0) to (x1,y1), `thickness` pixels growing inward.
pub fn stroke_rect(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, color: u32) {
    for t in 0..thickness.max(1) {
        let (ax, ay, bx, by) = (x0 + t, y0 + t, x1 - t, y1 - t);
        if ax > bx || ay > by { break; }
        draw_line(fb, ax, ay, bx, ay, color);
        draw_line(fb, ax, by, bx, by, color);
        draw_line(fb, ax, ay, ax, by, color);
        draw_line(fb, bx, ay, bx, by, color);
    }
}

/// Filled disc of `radius` around (cx,cy).
pub fn fill_circle(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, cx.saturating_add(dx), cy.saturating_add(dy), color);
            }
        }
    }
}

/* ---------- 5x7 bitmap font: A-Z, digits and a little punctuation ---------- */

pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;

/// Return a 5x7 glyph bitmap. Lowercase letters reuse the uppercase shapes.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Letters
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation: space, vertical bar, colon, dot, dash
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw one glyph with its top-left at (x,y), each font pixel a `scale`-sized block.
fn draw_char(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by one block in black to improve readability,
        // then the glyph itself in the chosen color.
        for (dx, dy, c) in [(scale, scale, 0x00000000), (0, 0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..GLYPH_W {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        let px = x + rx * scale + dx;
                        let py = y + ry as i32 * scale + dy;
                        fill_rect(fb, px, py, scale, scale, c);
                    }
                }
            }
        }
    }
}

/// Draw `text` with its baseline at `baseline_y`, starting at `x`.
pub fn draw_text(fb: &mut FrameBuffer, mut x: i32, baseline_y: i32, text: &str, scale: i32, color: u32) {
    let scale = scale.max(1);
    let top = baseline_y - GLYPH_H * scale;
    for ch in text.chars() {
        draw_char(fb, x, top, ch, scale, color);
        x += (GLYPH_W + 1) * scale; // glyph width + 1 block spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(fb: &FrameBuffer, color: u32) -> usize {
        fb.pixels.iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn fill_rect_clips_to_frame() {
        let mut fb = FrameBuffer::new(10, 10);
        fill_rect(&mut fb, -5, 8, 20, 20, 0xFF);
        assert_eq!(count(&fb, 0xFF), 20);
    }

    #[test]
    fn stroke_rect_is_hollow() {
        let mut fb = FrameBuffer::new(10, 10);
        stroke_rect(&mut fb, 1, 1, 8, 8, 1, 0xFF);
        assert_eq!(fb.pixels[11], 0xFF);
        assert_eq!(fb.pixels[5 * 10 + 5], 0);
        assert_eq!(count(&fb, 0xFF), 28);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let mut fb = FrameBuffer::new(10, 10);
        fill_circle(&mut fb, i32::MAX, i32::MIN, 3, 0xFF);
        draw_line(&mut fb, i32::MAX, 0, i32::MAX, i32::MAX, 0xFF);
        fill_rect(&mut fb, i32::MAX - 1, 0, 10, 10, 0xFF);
        assert_eq!(count(&fb, 0xFF), 0);

        // spans the whole frame: only the visible row is walked
        draw_line(&mut fb, i32::MIN, 5, i32::MAX, 5, 0xFF);
        assert_eq!(count(&fb, 0xFF), 10);
        assert!(fb.pixels[5 * 10..6 * 10].iter().all(|&p| p == 0xFF));
    }

    #[test]
    fn line_is_clipped_to_the_frame() {
        let mut fb = FrameBuffer::new(10, 10);
        draw_line(&mut fb, -100, 5, 100, 5, 0xFF);
        assert_eq!(count(&fb, 0xFF), 10);
    }

    #[test]
    fn lines_off_the_frame_are_skipped() {
        let mut fb = FrameBuffer::new(10, 10);
        draw_line(&mut fb, -20, -5, 30, -1, 0xFF);
        draw_line(&mut fb, 12, 0, 40, 9, 0xFF);
        assert_eq!(count(&fb, 0xFF), 0);
    }

    #[test]
    fn inside_lines_keep_their_endpoints() {
        let mut fb = FrameBuffer::new(10, 10);
        draw_line(&mut fb, 1, 1, 8, 6, 0xFF);
        assert_eq!(fb.pixels[11], 0xFF);
        assert_eq!(fb.pixels[6 * 10 + 8], 0xFF);
    }

    #[test]
    fn circle_stays_in_bounds_at_edges() {
        let mut fb = FrameBuffer::new(4, 4);
        fill_circle(&mut fb, 0, 0, 2, 0xAB);
        assert!(count(&fb, 0xAB) > 0);
    }

    #[test]
    fn every_key_label_has_glyphs() {
        for c in ('A'..='Z').chain("Bksp Space: Pressed Deleted".chars()) {
            assert!(glyph5x7(c).is_some(), "no glyph for {c:?}");
        }
    }

    #[test]
    fn text_sits_on_its_baseline() {
        let mut fb = FrameBuffer::new(40, 40);
        draw_text(&mut fb, 0, 30, "I", 2, 0xFFFFFF);
        let rows: Vec<usize> = (0..40)
            .filter(|y| fb.pixels[y * 40..(y + 1) * 40].contains(&0xFFFFFF))
            .collect();
        assert_eq!(rows.first(), Some(&16));
        assert_eq!(rows.last(), Some(&29));
    }
}
