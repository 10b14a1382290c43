use std::fmt;

/// Layout length applied to a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dimension {
    /// A pixel count, serialized as `"<n>px"`.
    Pixels(u32),
    /// A raw CSS length (`"50%"`, `"12em"`, ...), passed through untouched.
    Css(String),
}

impl Dimension {
    /// The pixel count if this length is absolute (`Pixels`, or a `"<n>px"` string).
    pub fn as_pixels(&self) -> Option<u32> {
        match self {
            Self::Pixels(px) => Some(*px),
            Self::Css(css) => css.trim().strip_suffix("px")?.trim().parse().ok(),
        }
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => write!(f, "{px}px"),
            Self::Css(css) => f.write_str(css),
        }
    }
}

impl From<u32> for Dimension {
    fn from(px: u32) -> Self {
        Self::Pixels(px)
    }
}

impl From<&str> for Dimension {
    fn from(css: &str) -> Self {
        Self::Css(css.to_owned())
    }
}

impl From<String> for Dimension {
    fn from(css: String) -> Self {
        Self::Css(css)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_serialize_with_unit() {
        assert_eq!(Dimension::from(400).to_css(), "400px");
    }

    #[test]
    fn css_lengths_pass_through() {
        assert_eq!(Dimension::from("50%").to_css(), "50%");
    }

    #[test]
    fn as_pixels_parses_px_strings_only() {
        assert_eq!(Dimension::from(" 120px ").as_pixels(), Some(120));
        assert_eq!(Dimension::from("50%").as_pixels(), None);
        assert_eq!(Dimension::from(7).as_pixels(), Some(7));
    }
}
