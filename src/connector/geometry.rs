//! Measured boxes and the line segments planned between them.

use serde::{Deserialize, Serialize};

/// Axis-aligned box of a rendered element, `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// This box in the coordinate space whose origin is `container`'s
    /// top-left corner.
    #[inline]
    pub fn relative_to(&self, container: &BoundingBox) -> Self {
        Self {
            x: self.x - container.x,
            y: self.y - container.y,
            ..*self
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether the point lies inside the box, edges included.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// A straight connector segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl LineSegment {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }
}

/// Interleave segments into `[x1, y1, x2, y2, ...]` for GPU/canvas upload.
pub fn flatten_segments(segments: &[LineSegment]) -> Vec<f32> {
    let mut flat = Vec::with_capacity(segments.len() * 4);
    for s in segments {
        flat.extend_from_slice(&[s.x1, s.y1, s.x2, s.y2]);
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_to_container() {
        let container = BoundingBox::new(100.0, 50.0, 800.0, 600.0);
        let node = BoundingBox::new(150.0, 90.0, 40.0, 20.0);
        let rel = node.relative_to(&container);

        assert_eq!(rel, BoundingBox::new(50.0, 40.0, 40.0, 20.0));
        assert_eq!(rel.center_x(), 70.0);
        assert_eq!(rel.top(), 40.0);
        assert_eq!(rel.bottom(), 60.0);
    }

    #[test]
    fn test_contains_includes_edges() {
        let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(10.0, 10.0));
        assert!(!b.contains(10.5, 5.0));
    }

    #[test]
    fn test_flatten_segments() {
        let flat = flatten_segments(&[
            LineSegment::new(1.0, 2.0, 3.0, 4.0),
            LineSegment::new(5.0, 6.0, 7.0, 8.0),
        ]);
        assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }
}
