use super::{Argb, Surface, TextStyle};
use crate::math::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Argb),
    Circle {
        center: Vec2<f32>,
        radius: f32,
        color: Argb,
    },
    Rect {
        top_left: Vec2<f32>,
        size: Vec2<f32>,
        color: Argb,
    },
    Polygon {
        points: Vec<Vec2<f32>>,
        color: Argb,
    },
    Text {
        text: String,
        pos: Vec2<f32>,
        style: TextStyle,
        color: Argb,
    },
}

/// Surface that only remembers what was asked of it.
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2<f32>, f32, Argb)> + '_ {
        self.ops.iter().filter_map(|op| match *op {
            DrawOp::Circle {
                center,
                radius,
                color,
            } => Some((center, radius, color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self, color: Argb) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_circle(&mut self, center: Vec2<f32>, radius: f32, color: Argb) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, top_left: Vec2<f32>, size: Vec2<f32>, color: Argb) {
        self.ops.push(DrawOp::Rect {
            top_left,
            size,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2<f32>], color: Argb) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2<f32>, style: TextStyle, color: Argb) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            pos,
            style,
            color,
        });
    }
}
