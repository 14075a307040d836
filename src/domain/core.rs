//! Pixel geometry shared by layout, hit-testing and rendering
//!
//! Rectangles are in unscaled layout pixels. The export scale is applied
//! only when rasterizing.

/// Axis-aligned rectangle in layout pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Shrinks the rectangle by `amount` on every side, never below zero size
    pub fn inset(&self, amount: i32) -> Rect {
        let w = (self.w - 2 * amount).max(0);
        let h = (self.h - 2 * amount).max(0);
        Rect::new(self.x + amount, self.y + amount, w, h)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Converts to a tiny-skia rect in device pixels
    pub fn to_skia(&self, scale: f32) -> Option<tiny_skia::Rect> {
        if self.is_empty() {
            return None;
        }
        tiny_skia::Rect::from_xywh(
            self.x as f32 * scale,
            self.y as f32 * scale,
            self.w as f32 * scale,
            self.h as f32 * scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let rect = Rect::new(10, 20, 100, 50);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 70);
        assert!(!rect.is_empty());
        assert!(Rect::new(0, 0, 0, 10).is_empty());
    }

    #[test]
    fn rect_contains_point() {
        let rect = Rect::new(10, 10, 20, 20);
        assert!(rect.contains_point(15, 15));
        assert!(rect.contains_point(10, 10));
        assert!(!rect.contains_point(30, 30));
        assert!(!rect.contains_point(5, 5));
    }

    #[test]
    fn rect_inset_clamps() {
        assert_eq!(Rect::new(0, 0, 10, 10).inset(2), Rect::new(2, 2, 6, 6));
        assert_eq!(Rect::new(0, 0, 3, 3).inset(2), Rect::new(2, 2, 0, 0));
    }

    #[test]
    fn rect_to_skia_scales() {
        let skia = Rect::new(1, 2, 3, 4).to_skia(2.0).unwrap();
        assert_eq!(skia.x(), 2.0);
        assert_eq!(skia.y(), 4.0);
        assert_eq!(skia.width(), 6.0);
        assert_eq!(skia.height(), 8.0);
        assert!(Rect::new(0, 0, 0, 4).to_skia(1.0).is_none());
    }
}
