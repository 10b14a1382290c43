use super::Vec2;

/// Axis-aligned rectangle in pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle anchored at the origin with the given pixel size.
    #[inline]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.origin.x = x;
    }

    #[inline]
    pub fn set_y(&mut self, y: f32) {
        self.origin.y = y;
    }

    #[inline]
    pub fn set_width(&mut self, w: f32) {
        self.size.x = w;
    }

    #[inline]
    pub fn set_height(&mut self, h: f32) {
        self.size.y = h;
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_size_sits_at_origin() {
        let r = Rect::from_size(400, 300);
        assert_eq!(r.origin, Vec2::zero());
        assert_eq!(r.width(), 400.0);
        assert_eq!(r.height(), 300.0);
    }

    #[test]
    fn setters_overwrite_every_component() {
        let mut r = Rect::new(5.0, 6.0, 7.0, 8.0);
        r.set_x(0.0);
        r.set_y(0.0);
        r.set_width(10.0);
        r.set_height(20.0);
        assert_eq!(r, Rect::new(0.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn is_empty_on_zero_dimension() {
        assert!(Rect::from_size(0, 5).is_empty());
        assert!(Rect::from_size(5, 0).is_empty());
        assert!(!Rect::from_size(1, 1).is_empty());
    }
}
