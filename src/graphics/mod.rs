pub mod blend;
pub mod draw;
pub mod font;

#[cfg(test)]
pub mod tests_support;

use blend::Mixer;

use crate::math::Vec2;

pub type Argb = u32;

pub const COLOR_WHITE: Argb = 0xFF_FF_FF_FF;

/// Opaque color from a `0xRRGGBB` literal.
pub const fn rgb(hex: u32) -> Argb {
    0xFF_00_00_00 | (hex & 0x00_FF_FF_FF)
}

pub(crate) trait Pixel: Copy + Clone + Sized + std::fmt::Debug {
    fn trans() -> Self;

    fn mix(self, other: Self) -> Self;

    fn set_alpha(self, alpha: u8) -> Self;

    fn decompose(self) -> [u8; 4];
    fn compose(array: [u8; 4]) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub bold: bool,
}

impl TextStyle {
    pub const fn new(size: f32) -> Self {
        Self {
            size,
            h_align: HAlign::Left,
            v_align: VAlign::Top,
            bold: false,
        }
    }

    pub const fn align(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Everything the game needs from a drawing target.
///
/// Coordinates are canvas pixels with y growing downward. Colors are ARGB,
/// the alpha byte being the opacity the shape is composited with.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn clear(&mut self, color: Argb);

    fn fill_circle(&mut self, center: Vec2<f32>, radius: f32, color: Argb);

    /// Axis-aligned rectangle from its top-left corner.
    fn fill_rect(&mut self, top_left: Vec2<f32>, size: Vec2<f32>, color: Argb);

    /// Closed polygon, filled with the even-odd rule.
    fn fill_polygon(&mut self, points: &[Vec2<f32>], color: Argb);

    fn draw_text(&mut self, text: &str, pos: Vec2<f32>, style: TextStyle, color: Argb);
}

pub struct Canvas {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,

    mixer: Mixer,
    background: Argb,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![Argb::trans(); w * h],
            width: w,
            height: h,

            mixer: u32::mix,
            background: 0xFF_24_24_24,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[cfg(test)]
    pub fn pixel_xy(&self, x: usize, y: usize) -> Option<Argb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.buffer.get(y * self.width + x).copied()
    }

    pub fn as_slice(&self) -> &[Argb] {
        &self.buffer
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.buffer.resize(w * h, self.background);
        self.width = w;
        self.height = h;
    }

    /// Copies the canvas into a window buffer, each canvas pixel becoming a
    /// `scale`x`scale` block. `width` is the destination row length when it
    /// differs from `self.width * scale`.
    pub fn scale_to(&self, scale: usize, dest: &mut [Argb], width: Option<usize>) {
        let dst_width = width.unwrap_or(self.width * scale);

        if self.width == 0 || scale == 0 || dst_width == 0 {
            return;
        }

        // Window buffers want the top byte zeroed.
        dest.fill(self.background & 0x00_FF_FF_FF);

        self.buffer
            .chunks_exact(self.width) // source lines
            .zip(dest.chunks_exact_mut(dst_width * scale)) // with destination line groups
            .for_each(|(src_row, dst_rows)| {
                for dst_row in dst_rows.chunks_exact_mut(dst_width) {
                    src_row
                        .iter()
                        .zip(dst_row.chunks_mut(scale))
                        .for_each(|(src_pixel, dst_chunk)| {
                            dst_chunk.fill(src_pixel & 0x00_FF_FF_FF)
                        });
                }
            });
    }
}

impl Surface for Canvas {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn clear(&mut self, color: Argb) {
        self.background = color;
        self.buffer.fill(color);
    }

    fn fill_circle(&mut self, center: Vec2<f32>, radius: f32, color: Argb) {
        self.draw_circle(center, radius, color);
    }

    fn fill_rect(&mut self, top_left: Vec2<f32>, size: Vec2<f32>, color: Argb) {
        self.draw_rect(top_left, size, color);
    }

    fn fill_polygon(&mut self, points: &[Vec2<f32>], color: Argb) {
        self.draw_polygon(points, color);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2<f32>, style: TextStyle, color: Argb) {
        font::draw_text(self, text, pos, style, color);
    }
}
