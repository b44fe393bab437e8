pub mod batch;
pub mod doctor;
pub mod loss;

use serde::{Deserialize, Serialize};

/// Additive guard used wherever a quotient can degenerate to 0/0.
pub const GEOM_EPS: f32 = 1e-7;

/// Axis-aligned box in corner form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Rect {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self { x_min, y_min, x_max, y_max }
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    // negative for inverted extents, callers rely on that
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.x_min + self.x_max) / 2.0, (self.y_min + self.y_max) / 2.0)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width() / (self.height() + GEOM_EPS)
    }
}

impl From<[f32; 4]> for Rect {
    fn from(c: [f32; 4]) -> Self {
        Self { x_min: c[0], y_min: c[1], x_max: c[2], y_max: c[3] }
    }
}

/// Intersection over union of two boxes, 0 when they are disjoint or the
/// union collapses to nothing.
pub fn overlap_ratio(a: Rect, b: Rect) -> f32 {
    let left = a.x_min.max(b.x_min);
    let top = a.y_min.max(b.y_min);
    let right = a.x_max.min(b.x_max);
    let bottom = a.y_max.min(b.y_max);

    if right < left || bottom < top {
        return 0.0;
    }

    let inter = (right - left) * (bottom - top);
    let union = a.area() + b.area() - inter;
    if union <= 0.0 { 0.0 } else { inter / union }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_overlap_is_one() {
        let r = Rect::new(10.0, 10.0, 30.0, 30.0);
        assert_eq!(overlap_ratio(r, r), 1.0);
    }

    #[test]
    fn disjoint_is_zero() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(2.0, 2.0, 3.0, 3.0);
        assert_eq!(overlap_ratio(a, b), 0.0);
        assert_eq!(overlap_ratio(b, a), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = Rect::new(10.0, 10.0, 30.0, 30.0);
        let b = Rect::new(15.0, 15.0, 35.0, 35.0);
        assert_eq!(overlap_ratio(a, b), overlap_ratio(b, a));
    }

    #[test]
    fn partial_overlap_value() {
        // 15x15 intersection, 400 + 400 - 225 union
        let a = Rect::new(10.0, 10.0, 30.0, 30.0);
        let b = Rect::new(15.0, 15.0, 35.0, 35.0);
        let got = overlap_ratio(a, b);
        assert!((got - 225.0 / 575.0).abs() < 1e-6);
    }

    #[test]
    fn bounded_for_valid_boxes() {
        let cases = [
            (Rect::new(0.0, 0.0, 5.0, 5.0), Rect::new(3.0, 3.0, 8.0, 8.0)),
            (Rect::new(0.0, 0.0, 5.0, 5.0), Rect::new(0.0, 0.0, 5.0, 5.0)),
            (Rect::new(0.0, 0.0, 5.0, 5.0), Rect::new(5.0, 5.0, 9.0, 9.0)),
        ];
        for (a, b) in cases {
            let v = overlap_ratio(a, b);
            assert!((0.0..=1.0).contains(&v), "iou out of range: {}", v);
        }
    }

    #[test]
    fn zero_area_box_is_zero() {
        let a = Rect::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(overlap_ratio(a, a), 0.0);
    }

    #[test]
    fn inverted_box_is_zero() {
        // x_max < x_min sinks the union below zero
        let bad = Rect::new(5.0, 0.0, 0.0, 5.0);
        let good = Rect::new(0.0, 0.0, 5.0, 5.0);
        assert_eq!(overlap_ratio(bad, bad), 0.0);
        assert_eq!(overlap_ratio(bad, good), 0.0);
    }

    #[test]
    fn rect_from_corner_array() {
        let r = Rect::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(r, Rect::new(1.0, 2.0, 3.0, 4.0));
    }
}
