use std::fmt;

/// Raw platform error code, as returned by `glGetError`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct GlError(pub u32);

impl GlError {
    pub const NO_ERROR: Self = Self(0);
    pub const INVALID_ENUM: Self = Self(0x0500);
    pub const INVALID_VALUE: Self = Self(0x0501);
    pub const INVALID_OPERATION: Self = Self(0x0502);
    pub const OUT_OF_MEMORY: Self = Self(0x0505);
    pub const INVALID_FRAMEBUFFER_OPERATION: Self = Self(0x0506);
    pub const CONTEXT_LOST_WEBGL: Self = Self(0x9242);

    /// True for any code other than `NO_ERROR`.
    #[inline]
    pub fn is_error(self) -> bool {
        self != Self::NO_ERROR
    }

    /// True for codes that indicate a real failure.
    ///
    /// `CONTEXT_LOST_WEBGL` is excluded: loss is reported through the
    /// lifecycle, not as an operation failure.
    #[inline]
    pub fn is_failure(self) -> bool {
        self.is_error() && self != Self::CONTEXT_LOST_WEBGL
    }

    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::NO_ERROR => "NO_ERROR",
            Self::INVALID_ENUM => "INVALID_ENUM",
            Self::INVALID_VALUE => "INVALID_VALUE",
            Self::INVALID_OPERATION => "INVALID_OPERATION",
            Self::OUT_OF_MEMORY => "OUT_OF_MEMORY",
            Self::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
            Self::CONTEXT_LOST_WEBGL => "CONTEXT_LOST_WEBGL",
            _ => return None,
        })
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:04X}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_lost_is_an_error_but_not_a_failure() {
        assert!(GlError::CONTEXT_LOST_WEBGL.is_error());
        assert!(!GlError::CONTEXT_LOST_WEBGL.is_failure());
        assert!(GlError::OUT_OF_MEMORY.is_failure());
        assert!(!GlError::NO_ERROR.is_error());
    }

    #[test]
    fn unknown_codes_display_as_hex() {
        assert_eq!(GlError(0x1234).to_string(), "0x1234");
        assert_eq!(GlError::INVALID_VALUE.to_string(), "INVALID_VALUE");
    }
}
