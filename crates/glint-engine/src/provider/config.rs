use crate::paint::Color;

/// Construction-time provider settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider identity. When `None`, a process-unique numeric id is assigned.
    pub id: Option<String>,

    /// Color behind the surface and the context clear color.
    pub background: Color,

    /// Explicit `(width, height)` override, applied through `set_explicit_size`.
    pub explicit_size: Option<(u32, u32)>,

    /// Query platform error codes and link status while building programs.
    ///
    /// Disabling skips those round trips; failures then surface at draw time.
    pub error_checks: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            id: None,
            background: Color::black(),
            explicit_size: None,
            error_checks: true,
        }
    }
}
