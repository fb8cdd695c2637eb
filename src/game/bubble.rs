use crate::graphics::{Argb, Pixel, Surface, COLOR_WHITE};
use crate::math::{distance, rng::GameRng, Vec2, FRAC_1_SQRT_2, SQRT_2, TAU};

use super::{particle::Particle, score_display::ScoreDisplay, Bounds, BurstContext};

pub const PARTICLES_PER_BURST: usize = 15;

const SPEED_MIN: f32 = 0.5;
const SPEED_MAX: f32 = 3.0;

const SQUARE_ALPHA: u8 = 120;
const STAR_POINTS: usize = 5;
const STAR_INNER_RATIO: f32 = 0.4;

/// What popping a bubble is worth, keyed by its palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    /// Target color.
    Primary,
    /// Trap color.
    Secondary,
    Other,
}

impl BubbleKind {
    pub const ALL: [BubbleKind; 3] = [
        BubbleKind::Primary,
        BubbleKind::Secondary,
        BubbleKind::Other,
    ];

    pub const fn score(self) -> i32 {
        match self {
            BubbleKind::Primary => 10,
            BubbleKind::Secondary => -10,
            BubbleKind::Other => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            BubbleKind::Primary => "Pink",
            BubbleKind::Secondary => "Blue",
            BubbleKind::Other => "Other",
        }
    }
}

/// Sizes of the highlight square and star drawn over a bubble of radius `r`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    /// Distance of both shape centers from the bubble center, per axis.
    pub offset: f32,
    pub square_side: f32,
    pub star_outer: f32,
    pub star_inner: f32,
}

pub fn decoration_sizes(r: f32) -> Decoration {
    let offset = r * FRAC_1_SQRT_2 / 2.0;
    let d = (offset * offset * 2.0).sqrt();

    let square_side = f32::min(r * 2.0 / 6.0, (r - d) * 2.0 / SQRT_2).max(0.0);
    let star_outer = f32::min(r * 2.0 / 12.0, r - d).max(0.0);

    Decoration {
        offset,
        square_side,
        star_outer,
        star_inner: star_outer * STAR_INNER_RATIO,
    }
}

/// Closed outline of a star with its first point straight up.
fn star_points(center: Vec2<f32>, inner: f32, outer: f32) -> [Vec2<f32>; STAR_POINTS * 2] {
    let step = TAU / STAR_POINTS as f32;
    let half = step / 2.0;

    std::array::from_fn(|i| {
        let a = -TAU / 4.0 + (i / 2) as f32 * step;
        if i % 2 == 0 {
            center + Vec2::from_angle(a) * outer
        } else {
            center + Vec2::from_angle(a + half) * inner
        }
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub pos: Vec2<f32>,
    pub radius: f32,
    pub kind: BubbleKind,
    /// Opaque fill color, see `alpha`.
    pub color: Argb,
    pub alpha: u8,
    pub speed: f32,
    pub alive: bool,
}

impl Bubble {
    pub fn new(
        pos: Vec2<f32>,
        radius: f32,
        color: Argb,
        kind: BubbleKind,
        alpha: u8,
        speed: f32,
    ) -> Self {
        Self {
            pos,
            radius,
            kind,
            color,
            alpha,
            speed,
            alive: true,
        }
    }

    pub fn random_speed(rng: &mut GameRng) -> f32 {
        rng.range(SPEED_MIN, SPEED_MAX)
    }

    pub fn check_click(&self, px: f32, py: f32) -> bool {
        distance(Vec2::new(px, py), self.pos) < self.radius
    }

    /// Pops the bubble: scores it, leaves a label and particles behind,
    /// then respawns it below the canvas. Returns the score change.
    pub fn burst(&mut self, ctx: &mut BurstContext<'_>) -> Option<i32> {
        if !self.alive {
            return None;
        }

        let change = self.kind.score();
        ctx.effects.score += change as i64;
        ctx.effects
            .score_displays
            .push(ScoreDisplay::new(change, self.pos));

        let color = self.color.set_alpha(self.alpha);
        for _ in 0..PARTICLES_PER_BURST {
            let particle = Particle::new(self.pos, color, ctx.rng);
            ctx.effects.particles.push(particle);
        }

        ctx.sound.try_play();

        self.alive = false;
        self.reset(ctx.bounds, ctx.rng);

        Some(change)
    }

    /// Respawns just below the bottom edge. Radius and color are kept.
    pub fn reset(&mut self, bounds: Bounds, rng: &mut GameRng) {
        self.pos.y = bounds.height + self.radius;
        self.pos.x = rng.below(bounds.width);
        self.speed = Self::random_speed(rng);
        self.alive = true;
    }

    pub fn step(&mut self, bounds: Bounds, rng: &mut GameRng) {
        if !self.alive {
            return;
        }

        self.pos.y -= self.speed;

        if self.pos.y < -self.radius {
            self.reset(bounds, rng);
        }
    }

    pub fn show(&self, surface: &mut dyn Surface) {
        if !self.alive {
            return;
        }

        surface.fill_circle(self.pos, self.radius, self.color.set_alpha(self.alpha));

        let deco = decoration_sizes(self.radius);

        let square_center = self.pos + Vec2::new(deco.offset, -deco.offset);
        let half = deco.square_side / 2.0;
        surface.fill_rect(
            square_center - Vec2::new(half, half),
            Vec2::new(deco.square_side, deco.square_side),
            COLOR_WHITE.set_alpha(SQUARE_ALPHA),
        );

        let star_center = self.pos + Vec2::new(-deco.offset, -deco.offset);
        surface.fill_polygon(
            &star_points(star_center, deco.star_inner, deco.star_outer),
            COLOR_WHITE,
        );
    }
}
