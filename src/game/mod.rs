pub mod bubble;
pub mod hud;
pub mod particle;
pub mod score_display;

use crate::audio::PopSound;
use crate::graphics::{rgb, Argb, Surface};
use crate::math::{rng::GameRng, Vec2};

use bubble::{Bubble, BubbleKind};
use particle::Particle;
use score_display::ScoreDisplay;

pub const DEFAULT_NUM_BUBBLES: usize = 100;

pub const BACKGROUND: Argb = rgb(0xFCF6BD);

pub const PALETTE: [(Argb, BubbleKind); 4] = [
    (rgb(0xFF99C8), BubbleKind::Primary),
    (rgb(0xD0F4DE), BubbleKind::Other),
    (rgb(0xA9DEF9), BubbleKind::Secondary),
    (rgb(0xE4C1F9), BubbleKind::Other),
];

const RADIUS_MIN: f32 = 25.0;
const RADIUS_MAX: f32 = 75.0;
const ALPHA_MIN: f32 = 50.0;
const ALPHA_MAX: f32 = 200.0;

/// Canvas area bubbles spawn and respawn in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub num_bubbles: usize,
    pub bounds: Bounds,
    /// Identifier line drawn in the bottom-left corner.
    pub tag: String,
}

/// Everything a burst leaves behind.
#[derive(Debug, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub score_displays: Vec<ScoreDisplay>,
    pub score: i64,
}

pub struct BurstContext<'a> {
    pub effects: &'a mut Effects,
    pub rng: &'a mut GameRng,
    pub sound: &'a PopSound,
    pub bounds: Bounds,
}

pub struct Game {
    bubbles: Vec<Bubble>,
    effects: Effects,
    rng: GameRng,
    sound: PopSound,
    bounds: Bounds,
    tag: String,
}

impl Game {
    pub fn new(config: &GameConfig, mut rng: GameRng, sound: PopSound) -> Self {
        let bounds = config.bounds;

        let bubbles = (0..config.num_bubbles)
            .map(|_| {
                let radius = rng.range(RADIUS_MIN, RADIUS_MAX);
                let pos = Vec2::new(rng.below(bounds.width), rng.below(bounds.height));
                let (color, kind) = PALETTE[rng.index(PALETTE.len())];
                let alpha = rng.range(ALPHA_MIN, ALPHA_MAX) as u8;
                let speed = Bubble::random_speed(&mut rng);

                Bubble::new(pos, radius, color, kind, alpha, speed)
            })
            .collect();

        Self {
            bubbles,
            effects: Effects::default(),
            rng,
            sound,
            bounds,
            tag: config.tag.clone(),
        }
    }

    /// Pops the topmost live bubble under the pointer, if any.
    pub fn on_click(&mut self, px: f32, py: f32) -> Option<i32> {
        let mut ctx = BurstContext {
            effects: &mut self.effects,
            rng: &mut self.rng,
            sound: &self.sound,
            bounds: self.bounds,
        };

        // Bubbles are drawn in order, so the last one is on top.
        self.bubbles
            .iter_mut()
            .rev()
            .find(|b| b.alive && b.check_click(px, py))
            .and_then(|b| b.burst(&mut ctx))
    }

    pub fn on_frame(&mut self, surface: &mut dyn Surface) {
        surface.clear(BACKGROUND);

        for bubble in self.bubbles.iter_mut() {
            bubble.step(self.bounds, &mut self.rng);
            bubble.show(surface);
        }

        self.effects.particles.retain_mut(|p| {
            p.update();
            if p.is_dead() {
                return false;
            }
            p.show(surface);
            true
        });

        self.effects.score_displays.retain_mut(|d| {
            d.update();
            d.show(surface);
            !d.is_expired()
        });

        hud::draw(surface, self.effects.score, &self.tag);
    }

    /// New spawns use the new size. Nothing already on screen moves.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds { width, height };
    }

    pub fn score(&self) -> i64 {
        self.effects.score
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn particles(&self) -> &[Particle] {
        &self.effects.particles
    }

    pub fn score_displays(&self) -> &[ScoreDisplay] {
        &self.effects.score_displays
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn has_sound(&self) -> bool {
        self.sound.is_loaded()
    }

    #[cfg(test)]
    pub(crate) fn bubbles_mut(&mut self) -> &mut Vec<Bubble> {
        &mut self.bubbles
    }
}
