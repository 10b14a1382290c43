use std::fmt;

/// Straight-alpha RGBA color with `f32` components in `[0, 1]`.
///
/// The same value feeds two sinks: the container's CSS background and the
/// context clear color, so it keeps straight alpha rather than premultiplying.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }


    /// Returns the components as an array, in clear-color argument order.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS `rgba(...)` serialization: byte channels, fractional alpha.
    pub fn to_css(self) -> String {
        self.to_string()
    }
}

fn channel_byte(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_uses_byte_channels_and_fractional_alpha() {
        assert_eq!(Color::black().to_css(), "rgba(0, 0, 0, 1)");
        assert_eq!(Color::new(1.0, 0.5, 0.0, 0.25).to_css(), "rgba(255, 128, 0, 0.25)");
    }

    #[test]
    fn css_clamps_out_of_range_components() {
        assert_eq!(Color::new(2.0, -1.0, 0.0, 3.0).to_css(), "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn to_array_orders_rgba() {
        assert_eq!(Color::new(0.1, 0.2, 0.3, 0.4).to_array(), [0.1, 0.2, 0.3, 0.4]);
    }
}
