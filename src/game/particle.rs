use crate::graphics::{Argb, Pixel, Surface};
use crate::math::{rng::GameRng, Vec2};

pub const PARTICLE_LIFE: i32 = 255;
const DECAY: i32 = 8;
const GRAVITY: f32 = 0.05;
const DRAG: f32 = 0.98;

/// A dot thrown out of a burst bubble, fading as `life` runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2<f32>,
    pub vel: Vec2<f32>,
    pub radius: f32,
    pub color: Argb,
    pub life: i32,
}

impl Particle {
    /// `color` carries the alpha the particle starts with.
    pub fn new(pos: Vec2<f32>, color: Argb, rng: &mut GameRng) -> Self {
        let radius = rng.range(2.0, 5.0);
        let angle = rng.angle();
        let speed = rng.range(1.0, 4.0);

        Self {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            radius,
            color,
            life: PARTICLE_LIFE,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;

        self.vel.y += GRAVITY;
        self.vel.x *= DRAG;

        self.life -= DECAY;
        self.color = self.color.set_alpha(self.life.max(0) as u8);
    }

    pub fn show(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.radius, self.color);
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }
}
