use super::{Argb, Canvas, HAlign, TextStyle, VAlign};
use crate::math::{Vec2, P2};

const GLYPH_W: i32 = 4;
const GLYPH_H: i32 = 6;
const ADVANCE: i32 = GLYPH_W + 1;

/// Pixel height of a glyph cell at `scale` 1, used to turn a
/// text size into an integer scale.
const CELL_H: f32 = 7.0;

// 4x6 ASCII font, printable range 0x20..=0x7E, each row's low 4 bits
// read left to right.
static FONT_4X6: [[u8; 6]; 95] = [
    [0x0, 0x0, 0x0, 0x0, 0x0, 0x0], // Space
    [0x4, 0x4, 0x4, 0x0, 0x4, 0x0], // !
    [0xA, 0xA, 0x0, 0x0, 0x0, 0x0], // "
    [0xA, 0xF, 0xA, 0xF, 0xA, 0x0], // #
    [0x4, 0xE, 0xC, 0x6, 0xE, 0x4], // $
    [0x9, 0x2, 0x4, 0x8, 0x9, 0x0], // %
    [0x4, 0xA, 0x4, 0xA, 0x5, 0x0], // &
    [0x4, 0x4, 0x0, 0x0, 0x0, 0x0], // '
    [0x2, 0x4, 0x4, 0x4, 0x2, 0x0], // (
    [0x4, 0x2, 0x2, 0x2, 0x4, 0x0], // )
    [0x0, 0xA, 0x4, 0xA, 0x0, 0x0], // *
    [0x0, 0x4, 0xE, 0x4, 0x0, 0x0], // +
    [0x0, 0x0, 0x0, 0x4, 0x4, 0x8], // ,
    [0x0, 0x0, 0xE, 0x0, 0x0, 0x0], // -
    [0x0, 0x0, 0x0, 0x0, 0x4, 0x0], // .
    [0x1, 0x2, 0x4, 0x8, 0x8, 0x0], // /
    [0x6, 0x9, 0x9, 0x9, 0x6, 0x0], // 0
    [0x4, 0xC, 0x4, 0x4, 0xE, 0x0], // 1
    [0x6, 0x9, 0x2, 0x4, 0xF, 0x0], // 2
    [0xE, 0x1, 0x6, 0x1, 0xE, 0x0], // 3
    [0x2, 0x6, 0xA, 0xF, 0x2, 0x0], // 4
    [0xF, 0x8, 0xE, 0x1, 0xE, 0x0], // 5
    [0x6, 0x8, 0xE, 0x9, 0x6, 0x0], // 6
    [0xF, 0x1, 0x2, 0x4, 0x4, 0x0], // 7
    [0x6, 0x9, 0x6, 0x9, 0x6, 0x0], // 8
    [0x6, 0x9, 0x7, 0x1, 0x6, 0x0], // 9
    [0x0, 0x4, 0x0, 0x4, 0x0, 0x0], // :
    [0x0, 0x4, 0x0, 0x4, 0x4, 0x8], // ;
    [0x1, 0x2, 0x4, 0x2, 0x1, 0x0], // <
    [0x0, 0xE, 0x0, 0xE, 0x0, 0x0], // =
    [0x4, 0x2, 0x1, 0x2, 0x4, 0x0], // >
    [0x6, 0x9, 0x2, 0x0, 0x2, 0x0], // ?
    [0x6, 0x9, 0xB, 0x8, 0x6, 0x0], // @
    [0x6, 0x9, 0xF, 0x9, 0x9, 0x0], // A
    [0xE, 0x9, 0xE, 0x9, 0xE, 0x0], // B
    [0x6, 0x9, 0x8, 0x9, 0x6, 0x0], // C
    [0xE, 0x9, 0x9, 0x9, 0xE, 0x0], // D
    [0xF, 0x8, 0xE, 0x8, 0xF, 0x0], // E
    [0xF, 0x8, 0xE, 0x8, 0x8, 0x0], // F
    [0x6, 0x8, 0xB, 0x9, 0x6, 0x0], // G
    [0x9, 0x9, 0xF, 0x9, 0x9, 0x0], // H
    [0xE, 0x4, 0x4, 0x4, 0xE, 0x0], // I
    [0x7, 0x2, 0x2, 0xA, 0x4, 0x0], // J
    [0x9, 0xA, 0xC, 0xA, 0x9, 0x0], // K
    [0x8, 0x8, 0x8, 0x8, 0xF, 0x0], // L
    [0x9, 0xF, 0xF, 0x9, 0x9, 0x0], // M
    [0x9, 0xD, 0xB, 0x9, 0x9, 0x0], // N
    [0x6, 0x9, 0x9, 0x9, 0x6, 0x0], // O
    [0xE, 0x9, 0xE, 0x8, 0x8, 0x0], // P
    [0x6, 0x9, 0x9, 0xA, 0x5, 0x0], // Q
    [0xE, 0x9, 0xE, 0xA, 0x9, 0x0], // R
    [0x6, 0x8, 0x6, 0x1, 0xE, 0x0], // S
    [0xE, 0x4, 0x4, 0x4, 0x4, 0x0], // T
    [0x9, 0x9, 0x9, 0x9, 0x6, 0x0], // U
    [0x9, 0x9, 0x9, 0x6, 0x6, 0x0], // V
    [0x9, 0x9, 0xF, 0xF, 0x9, 0x0], // W
    [0x9, 0x9, 0x6, 0x9, 0x9, 0x0], // X
    [0x9, 0x9, 0x6, 0x4, 0x4, 0x0], // Y
    [0xF, 0x1, 0x6, 0x8, 0xF, 0x0], // Z
    [0x6, 0x4, 0x4, 0x4, 0x6, 0x0], // [
    [0x8, 0x8, 0x4, 0x2, 0x1, 0x0], // \
    [0x6, 0x2, 0x2, 0x2, 0x6, 0x0], // ]
    [0x4, 0xA, 0x0, 0x0, 0x0, 0x0], // ^
    [0x0, 0x0, 0x0, 0x0, 0xF, 0x0], // _
    [0x4, 0x2, 0x0, 0x0, 0x0, 0x0], // `
    [0x0, 0x6, 0xA, 0xA, 0x5, 0x0], // a
    [0x8, 0xE, 0x9, 0x9, 0xE, 0x0], // b
    [0x0, 0x6, 0x8, 0x8, 0x6, 0x0], // c
    [0x1, 0x7, 0x9, 0x9, 0x7, 0x0], // d
    [0x0, 0x6, 0xF, 0x8, 0x6, 0x0], // e
    [0x2, 0x4, 0xE, 0x4, 0x4, 0x0], // f
    [0x0, 0x7, 0x9, 0x7, 0x1, 0x6], // g
    [0x8, 0xE, 0x9, 0x9, 0x9, 0x0], // h
    [0x4, 0x0, 0x4, 0x4, 0x4, 0x0], // i
    [0x2, 0x0, 0x2, 0x2, 0xA, 0x4], // j
    [0x8, 0xA, 0xC, 0xA, 0x9, 0x0], // k
    [0x4, 0x4, 0x4, 0x4, 0x2, 0x0], // l
    [0x0, 0xA, 0xF, 0x9, 0x9, 0x0], // m
    [0x0, 0xE, 0x9, 0x9, 0x9, 0x0], // n
    [0x0, 0x6, 0x9, 0x9, 0x6, 0x0], // o
    [0x0, 0xE, 0x9, 0xE, 0x8, 0x8], // p
    [0x0, 0x7, 0x9, 0x7, 0x1, 0x1], // q
    [0x0, 0xE, 0x9, 0x8, 0x8, 0x0], // r
    [0x0, 0x6, 0xC, 0x2, 0xC, 0x0], // s
    [0x4, 0xE, 0x4, 0x4, 0x2, 0x0], // t
    [0x0, 0x9, 0x9, 0x9, 0x6, 0x0], // u
    [0x0, 0x9, 0x9, 0x6, 0x6, 0x0], // v
    [0x0, 0x9, 0x9, 0xF, 0x6, 0x0], // w
    [0x0, 0x9, 0x6, 0x6, 0x9, 0x0], // x
    [0x0, 0x9, 0x9, 0x7, 0x1, 0x6], // y
    [0x0, 0xF, 0x2, 0x4, 0xF, 0x0], // z
    [0x2, 0x4, 0x8, 0x4, 0x2, 0x0], // {
    [0x4, 0x4, 0x4, 0x4, 0x4, 0x0], // |
    [0x8, 0x4, 0x2, 0x4, 0x8, 0x0], // }
    [0x0, 0x5, 0xA, 0x0, 0x0, 0x0], // ~
];

fn glyph(ch: char) -> &'static [u8; 6] {
    let code = ch as u32;
    let index = match code {
        0x20..=0x7E => code - 0x20,
        _ => '?' as u32 - 0x20,
    };
    &FONT_4X6[index as usize]
}

pub fn scale_for(size: f32) -> i32 {
    ((size / CELL_H).round() as i32).max(1)
}

/// Width and height in pixels of `text` laid out at `scale`.
pub fn text_extent(text: &str, scale: i32) -> (i32, i32) {
    let n = text.chars().count() as i32;
    let w = if n == 0 { 0 } else { (n * ADVANCE - 1) * scale };
    (w, GLYPH_H * scale)
}

pub fn draw_text(canvas: &mut Canvas, text: &str, pos: Vec2<f32>, style: TextStyle, color: Argb) {
    let scale = scale_for(style.size);
    let (w, h) = text_extent(text, scale);

    let x = match style.h_align {
        HAlign::Left => pos.x,
        HAlign::Center => pos.x - w as f32 / 2.0,
        HAlign::Right => pos.x - w as f32,
    };

    let y = match style.v_align {
        VAlign::Top => pos.y,
        VAlign::Center => pos.y - h as f32 / 2.0,
        VAlign::Bottom => pos.y - h as f32,
    };

    let origin = Vec2::new(x, y).to_p2();

    let mut cx = origin.x;
    for ch in text.chars() {
        for (row, &bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_W {
                if (bits >> (GLYPH_W - 1 - col)) & 1 == 0 {
                    continue;
                }

                let ps = P2 {
                    x: cx + col * scale,
                    y: origin.y + row as i32 * scale,
                };

                // Bold widens the last dot of each run by one pixel,
                // so no pixel is composited twice.
                let run_ends = col + 1 == GLYPH_W || (bits >> (GLYPH_W - 2 - col)) & 1 == 0;
                let dot_w = scale + (style.bold && run_ends) as i32;
                canvas.draw_rect_wh(ps, dot_w as usize, scale as usize, color);
            }
        }
        cx += ADVANCE * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{rgb, Pixel, Surface};

    const BG: Argb = rgb(0x000000);
    const FG: Argb = rgb(0xFFFFFF);

    fn lit(canvas: &Canvas) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.pixel_xy(x, y) == Some(FG) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn extent_counts_advance() {
        assert_eq!(text_extent("", 2), (0, 12));
        assert_eq!(text_extent("A", 1), (4, 6));
        assert_eq!(text_extent("+10", 3), ((3 * 5 - 1) * 3, 18));
    }

    #[test]
    fn scale_never_drops_below_one() {
        assert_eq!(scale_for(1.0), 1);
        assert_eq!(scale_for(24.0), 3);
        assert_eq!(scale_for(56.0), 8);
    }

    #[test]
    fn unknown_chars_render_as_question_mark() {
        assert_eq!(glyph('分'), glyph('?'));
        assert_eq!(glyph('\n'), glyph('?'));
    }

    #[test]
    fn minus_sign_lands_where_expected() {
        let mut canvas = Canvas::new(8, 8);
        canvas.clear(BG);
        canvas.draw_text("-", Vec2::new(1.0, 1.0), TextStyle::new(7.0), FG);

        // row 2 of the glyph, columns 0..3
        assert_eq!(lit(&canvas), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn right_and_bottom_alignment() {
        let mut canvas = Canvas::new(16, 16);
        canvas.clear(BG);
        let style = TextStyle::new(7.0).align(HAlign::Right, VAlign::Bottom);
        canvas.draw_text("|", Vec2::new(10.0, 10.0), style, FG);

        // "|" is column 1 of a 4-wide cell, rows 0..5, cell ends at (10, 10)
        let expected: Vec<_> = (4..9).map(|y| (7, y)).collect();
        assert_eq!(lit(&canvas), expected);
    }

    #[test]
    fn bold_widens_strokes() {
        let mut plain = Canvas::new(8, 8);
        plain.clear(BG);
        plain.draw_text("-", Vec2::new(1.0, 1.0), TextStyle::new(7.0), FG);

        let mut bold = Canvas::new(8, 8);
        bold.clear(BG);
        bold.draw_text("-", Vec2::new(1.0, 1.0), TextStyle::new(7.0).bold(), FG);

        assert_eq!(lit(&plain).len(), 3);
        assert_eq!(lit(&bold), vec![(1, 3), (2, 3), (3, 3), (4, 3)]);
    }

    #[test]
    fn translucent_bold_text_blends_evenly() {
        let mut canvas = Canvas::new(64, 16);
        canvas.clear(BG);
        let color = FG.set_alpha(0x80);
        canvas.draw_text("-HW=", Vec2::new(1.0, 1.0), TextStyle::new(7.0).bold(), color);

        let mut shades: Vec<Argb> = canvas
            .as_slice()
            .iter()
            .copied()
            .filter(|&p| p != BG)
            .collect();
        shades.sort_unstable();
        shades.dedup();

        assert_eq!(shades.len(), 1, "{shades:x?}");
    }

    #[test]
    fn offscreen_text_is_clipped() {
        let mut canvas = Canvas::new(4, 4);
        canvas.clear(BG);
        canvas.draw_text("SCORE: -40", Vec2::new(-100.0, 2.0), TextStyle::new(56.0), FG);
        canvas.draw_text("SCORE: -40", Vec2::new(1e7, 1e7), TextStyle::new(56.0), FG);
    }
}
