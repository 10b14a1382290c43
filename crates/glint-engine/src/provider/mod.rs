//! Surface provider: the owner of one container, one lazily created surface,
//! one lazily created context, and the shader programs built on that context.
//!
//! The implementation is split by concern:
//! - `surface`: surface creation, container access, `render`
//! - `context`: context creation and the context-change listener
//! - `sizing`: explicit size, measured size, background
//! - `program`: the cached compile-link entry point

mod config;
mod context;
mod id;
mod lifecycle;
mod program;
mod sizing;
mod surface;

use std::cell::Ref;

use crate::error::{ProviderError, Result};
use crate::paint::Color;
use crate::platform::{Backend, Container, GraphicsContext};
use crate::shader::ShaderCache;

pub use config::ProviderConfig;
pub use id::ProviderId;
pub use lifecycle::{ContextChange, ContextListener};
pub use program::compile_program;

use lifecycle::{Lifecycle, SharedLifecycle};

/// Program handle type produced by backend `B`.
pub type ProgramOf<B> = <<B as Backend>::Context as GraphicsContext>::Program;

/// Owns a drawing surface, its container, its context and its shader cache.
///
/// Nothing GPU-side is created at construction; the surface appears on first
/// `surface()`/`render()`, the context on first `context()`/`compile_program()`.
pub struct SurfaceProvider<B: Backend> {
    id: ProviderId,
    backend: B,
    container: B::Container,
    surface: Option<B::Surface>,
    context: Option<B::Context>,
    explicit_size: Option<(u32, u32)>,
    background: Color,
    error_checks: bool,
    lifecycle: SharedLifecycle<ProgramOf<B>>,
}

impl<B: Backend> SurfaceProvider<B> {
    /// Creates the provider and its container.
    ///
    /// The container background is applied immediately so host chrome matches
    /// before any context exists.
    pub fn new(mut backend: B, config: ProviderConfig) -> Result<Self> {
        let ProviderConfig {
            id,
            background,
            explicit_size,
            error_checks,
        } = config;

        let container = backend
            .create_container()
            .map_err(|e| ProviderError::backend("create container", e))?;

        let id = match id {
            Some(id) => ProviderId::new(id),
            None => ProviderId::generate(),
        };

        let mut provider = Self {
            id,
            backend,
            container,
            surface: None,
            context: None,
            explicit_size: None,
            background,
            error_checks,
            lifecycle: Lifecycle::shared(),
        };

        provider.container.set_background(background);
        if let Some((width, height)) = explicit_size {
            provider.set_explicit_size(width, height);
        }

        log::debug!("provider {} created", provider.id);
        Ok(provider)
    }

    pub fn id(&self) -> &ProviderId {
        &self.id
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The shader programs cached for the current context generation.
    pub fn shaders(&self) -> Ref<'_, ShaderCache<ProgramOf<B>>> {
        Ref::map(self.lifecycle.borrow(), |state| &state.shaders)
    }

    pub fn error_checks(&self) -> bool {
        self.error_checks
    }

    pub fn set_error_checks(&mut self, enabled: bool) {
        self.error_checks = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessBackend;

    #[test]
    fn construction_is_lazy() {
        let provider = SurfaceProvider::new(HeadlessBackend::new(), ProviderConfig::default()).unwrap();
        assert!(!provider.has_surface());
        assert!(!provider.has_context());
        assert_eq!(provider.backend().surfaces_created(), 0);
        assert!(provider.shaders().is_empty());
    }

    #[test]
    fn caller_supplied_id_is_kept() {
        let config = ProviderConfig {
            id: Some("main-view".into()),
            ..ProviderConfig::default()
        };
        let provider = SurfaceProvider::new(HeadlessBackend::new(), config).unwrap();
        assert_eq!(provider.id().as_str(), "main-view");
    }

    #[test]
    fn missing_id_is_generated() {
        let a = SurfaceProvider::new(HeadlessBackend::new(), ProviderConfig::default()).unwrap();
        let b = SurfaceProvider::new(HeadlessBackend::new(), ProviderConfig::default()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn construction_paints_container_background() {
        let config = ProviderConfig {
            background: Color::white(),
            ..ProviderConfig::default()
        };
        let provider = SurfaceProvider::new(HeadlessBackend::new(), config).unwrap();
        assert_eq!(provider.container().background(), Some(Color::white()));
    }

    #[test]
    fn configured_explicit_size_is_applied() {
        let config = ProviderConfig {
            explicit_size: Some((640, 480)),
            ..ProviderConfig::default()
        };
        let provider = SurfaceProvider::new(HeadlessBackend::new(), config).unwrap();
        assert_eq!((provider.width(), provider.height()), (640, 480));
        assert_eq!(provider.container().style_width().map(|d| d.to_css()), Some("640px".into()));
    }
}
