use crate::graphics::{rgb, Argb, HAlign, Surface, TextStyle, VAlign};
use crate::math::Vec2;

use super::bubble::BubbleKind;

const PADDING: f32 = 20.0;
const TEXT_COLOR: Argb = rgb(0x323232);

const SCORE_STYLE: TextStyle = TextStyle::new(56.0);
const HINT_STYLE: TextStyle = TextStyle::new(22.0).align(HAlign::Right, VAlign::Top);
const LEGEND_STYLE: TextStyle = TextStyle::new(18.0)
    .align(HAlign::Right, VAlign::Top)
    .bold();
const TAG_STYLE: TextStyle = TextStyle::new(24.0).align(HAlign::Left, VAlign::Bottom);

pub const HINT: &str = "Click the bubbles to pop them and score!";

/// "Pink (+10) | Blue (-10) | Other (+2)"
pub fn legend() -> String {
    BubbleKind::ALL
        .iter()
        .map(|kind| format!("{} ({:+})", kind.label(), kind.score()))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn draw(surface: &mut dyn Surface, score: i64, tag: &str) {
    let w = surface.width();
    let h = surface.height();

    surface.draw_text(
        &format!("SCORE: {score}"),
        Vec2::new(PADDING, PADDING),
        SCORE_STYLE,
        TEXT_COLOR,
    );

    surface.draw_text(HINT, Vec2::new(w - PADDING, PADDING), HINT_STYLE, TEXT_COLOR);

    surface.draw_text(
        &legend(),
        Vec2::new(w - PADDING, PADDING + 40.0),
        LEGEND_STYLE,
        TEXT_COLOR,
    );

    if !tag.is_empty() {
        surface.draw_text(tag, Vec2::new(PADDING, h - PADDING), TAG_STYLE, TEXT_COLOR);
    }
}
