use super::{Argb, Canvas};
use crate::math::{Vec2, P2};

// Every primitive samples pixel centers, so a pixel is covered when
// (px + 0.5, py + 0.5) lies inside the shape. Each covered pixel is
// composited exactly once, which keeps translucent shapes even.

/// First pixel index whose center is past `edge`.
fn first_center_after(edge: f32) -> i32 {
    (edge - 0.5).floor() as i32 + 1
}

/// First pixel index whose center is at or past `edge`.
fn first_center_from(edge: f32) -> i32 {
    (edge - 0.5).ceil() as i32
}

impl Canvas {
    fn row_range(&self, top: f32, bottom: f32) -> std::ops::Range<i32> {
        let ys = first_center_from(top).max(0);
        let ye = first_center_from(bottom).min(self.height as i32);
        ys..ye
    }

    /// Composites `c` over the pixels `[xs, xe)` of row `y`, clipped.
    pub fn draw_span(&mut self, y: i32, xs: i32, xe: i32, c: Argb) {
        if y < 0 || y >= self.height as i32 {
            return;
        }

        let xs = xs.max(0) as usize;
        let xe = xe.min(self.width as i32);
        if xe <= 0 || xs >= xe as usize {
            return;
        }

        let mixer = self.mixer;
        let row = y as usize * self.width;
        let Some(line) = self.buffer.get_mut(row + xs..row + xe as usize) else {
            return;
        };

        for p in line {
            *p = mixer(*p, c);
        }
    }

    pub fn draw_rect_wh(&mut self, ps: P2, w: usize, h: usize, c: Argb) {
        for y in ps.y..ps.y.saturating_add(h as i32) {
            self.draw_span(y, ps.x, ps.x.saturating_add(w as i32), c);
        }
    }

    pub fn draw_rect(&mut self, top_left: Vec2<f32>, size: Vec2<f32>, c: Argb) {
        if !(size.x > 0.0 && size.y > 0.0) {
            return;
        }

        let xs = first_center_from(top_left.x);
        let xe = first_center_from(top_left.x + size.x);

        for y in self.row_range(top_left.y, top_left.y + size.y) {
            self.draw_span(y, xs, xe, c);
        }
    }

    pub fn draw_circle(&mut self, center: Vec2<f32>, radius: f32, c: Argb) {
        if !(radius > 0.0) {
            return;
        }

        let r2 = radius * radius;

        for y in self.row_range(center.y - radius, center.y + radius) {
            let dy = y as f32 + 0.5 - center.y;
            let rem = r2 - dy * dy;
            if rem <= 0.0 {
                continue;
            }

            let half = rem.sqrt();
            let xs = first_center_after(center.x - half);
            let xe = first_center_from(center.x + half);

            self.draw_span(y, xs, xe, c);
        }
    }

    pub fn draw_polygon(&mut self, points: &[Vec2<f32>], c: Argb) {
        if points.len() < 3 {
            return;
        }

        let (top, bottom) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(t, b), p| (t.min(p.y), b.max(p.y)));

        let mut crossings = Vec::with_capacity(points.len());

        for y in self.row_range(top, bottom) {
            let sy = y as f32 + 0.5;

            crossings.clear();

            let edges = points.iter().zip(points.iter().cycle().skip(1));
            for (a, b) in edges {
                let crosses = (a.y <= sy && sy < b.y) || (b.y <= sy && sy < a.y);
                if crosses {
                    crossings.push(a.x + (sy - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }

            crossings.sort_by(f32::total_cmp);

            for pair in crossings.chunks_exact(2) {
                self.draw_span(y, first_center_from(pair[0]), first_center_from(pair[1]), c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{rgb, Pixel, Surface};

    const BG: Argb = rgb(0x000000);
    const FG: Argb = rgb(0xFFFFFF);

    fn canvas(w: usize, h: usize) -> Canvas {
        let mut canvas = Canvas::new(w, h);
        canvas.clear(BG);
        canvas
    }

    fn count(canvas: &Canvas, c: Argb) -> usize {
        canvas.as_slice().iter().filter(|&&p| p == c).count()
    }

    #[test]
    fn rect_covers_exact_cells() {
        let mut cv = canvas(10, 10);
        cv.draw_rect(Vec2::new(2.0, 3.0), Vec2::new(4.0, 2.0), FG);

        assert_eq!(count(&cv, FG), 8);
        assert_eq!(cv.pixel_xy(2, 3), Some(FG));
        assert_eq!(cv.pixel_xy(5, 4), Some(FG));
        assert_eq!(cv.pixel_xy(6, 4), Some(BG));
        assert_eq!(cv.pixel_xy(2, 5), Some(BG));
    }

    #[test]
    fn zero_sized_shapes_draw_nothing() {
        let mut cv = canvas(8, 8);
        cv.draw_rect(Vec2::new(2.0, 2.0), Vec2::new(0.0, 3.0), FG);
        cv.draw_circle(Vec2::new(4.0, 4.0), 0.0, FG);
        cv.draw_circle(Vec2::new(4.0, 4.0), -2.0, FG);
        cv.draw_polygon(&[Vec2::new(1.0, 1.0), Vec2::new(5.0, 5.0)], FG);
        assert_eq!(count(&cv, FG), 0);
    }

    #[test]
    fn circle_area_is_close_to_pi_r_squared() {
        let mut cv = canvas(64, 64);
        cv.draw_circle(Vec2::new(32.0, 32.0), 20.0, FG);

        let expected = std::f32::consts::PI * 400.0;
        let got = count(&cv, FG) as f32;
        assert!((got - expected).abs() / expected < 0.02, "{got} vs {expected}");

        assert_eq!(cv.pixel_xy(32, 32), Some(FG));
        assert_eq!(cv.pixel_xy(32, 11), Some(BG));
        assert_eq!(cv.pixel_xy(0, 0), Some(BG));
    }

    #[test]
    fn translucent_circle_is_uniform() {
        let mut cv = canvas(40, 40);
        let c = 0x80_FF_FF_FF;
        cv.draw_circle(Vec2::new(20.0, 20.0), 15.0, c);

        let once = BG.mix(c);
        let touched: Vec<_> = cv.as_slice().iter().filter(|&&p| p != BG).collect();
        assert!(!touched.is_empty());
        assert!(touched.iter().all(|&&p| p == once));
    }

    #[test]
    fn shapes_outside_canvas_are_clipped() {
        let mut cv = canvas(16, 16);
        cv.draw_circle(Vec2::new(-30.0, -30.0), 10.0, FG);
        cv.draw_circle(Vec2::new(0.0, 0.0), 4.0, FG);
        cv.draw_rect(Vec2::new(12.0, 12.0), Vec2::new(100.0, 100.0), FG);
        cv.draw_polygon(
            &[
                Vec2::new(-50.0, -50.0),
                Vec2::new(1e9, 3.0),
                Vec2::new(3.0, 1e9),
            ],
            FG,
        );
        cv.draw_span(-1, 0, 16, FG);
        cv.draw_span(16, 0, 16, FG);
        assert_eq!(cv.pixel_xy(15, 15), Some(FG));
    }

    #[test]
    fn polygon_fills_interior_only() {
        let mut cv = canvas(20, 20);
        // 10x10 square as a polygon
        cv.draw_polygon(
            &[
                Vec2::new(5.0, 5.0),
                Vec2::new(15.0, 5.0),
                Vec2::new(15.0, 15.0),
                Vec2::new(5.0, 15.0),
            ],
            FG,
        );
        assert_eq!(count(&cv, FG), 100);
        assert_eq!(cv.pixel_xy(4, 10), Some(BG));
        assert_eq!(cv.pixel_xy(10, 10), Some(FG));
    }

    #[test]
    fn rect_wh_in_pixels() {
        let mut cv = canvas(6, 6);
        cv.draw_rect_wh(P2 { x: 1, y: 1 }, 2, 3, FG);
        assert_eq!(count(&cv, FG), 6);
    }
}
