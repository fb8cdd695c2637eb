use crate::graphics::{Argb, HAlign, Pixel, Surface, TextStyle, VAlign};
use crate::math::{interpolate, Vec2};

pub const DISPLAY_LIFE: i32 = 100;
const DECAY: i32 = 2;
const RISE: f32 = 1.0;

const GAIN_COLOR: Argb = crate::graphics::rgb(0x009600);
const LOSS_COLOR: Argb = crate::graphics::rgb(0xFF0000);

const STYLE: TextStyle = TextStyle::new(24.0).align(HAlign::Center, VAlign::Center);

/// Floating "+N"/"-N" label left behind by a burst.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreDisplay {
    pub pos: Vec2<f32>,
    pub change: i32,
    pub life: i32,
    color: Argb,
}

impl ScoreDisplay {
    pub fn new(change: i32, pos: Vec2<f32>) -> Self {
        let color = if change > 0 { GAIN_COLOR } else { LOSS_COLOR };

        Self {
            pos,
            change,
            life: DISPLAY_LIFE,
            color,
        }
    }

    pub fn update(&mut self) {
        self.pos.y -= RISE;
        self.life -= DECAY;
    }

    pub fn label(&self) -> String {
        if self.change > 0 {
            format!("+{}", self.change)
        } else {
            self.change.to_string()
        }
    }

    pub fn color(&self) -> Argb {
        let alpha = interpolate::map(self.life as f32, 0.0, DISPLAY_LIFE as f32, 0.0, 255.0);
        self.color.set_alpha(alpha.clamp(0.0, 255.0) as u8)
    }

    pub fn show(&self, surface: &mut dyn Surface) {
        if self.is_expired() {
            return;
        }

        surface.draw_text(&self.label(), self.pos, STYLE, self.color());
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0
    }
}
