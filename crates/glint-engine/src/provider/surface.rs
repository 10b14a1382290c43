use std::rc::Rc;

use crate::error::{ProviderError, Result};
use crate::platform::{Backend, GraphicsContext, Surface};

use super::lifecycle::surface_event_handler;
use super::SurfaceProvider;

impl<B: Backend> SurfaceProvider<B> {
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Returns the surface, creating and attaching it on first call.
    pub fn surface(&mut self) -> Result<&mut B::Surface> {
        let surface = match self.surface.take() {
            Some(surface) => surface,
            None => self.create_surface()?,
        };
        Ok(self.surface.insert(surface))
    }

    /// The layout container; mount this into the host UI.
    pub fn container(&self) -> &B::Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut B::Container {
        &mut self.container
    }

    /// Per-frame entry point.
    ///
    /// Returns `Ok(true)` while the context is lost (call again later), and
    /// `Ok(false)` once the surface is synchronized to the layout size.
    ///
    /// # Errors
    /// [`ProviderError::Unprojectable`] when width or height is zero.
    pub fn render(&mut self) -> Result<bool> {
        if self.context.as_ref().is_some_and(|ctx| ctx.is_context_lost()) {
            log::trace!("provider {}: context lost; render deferred", self.id);
            return Ok(true);
        }

        let (width, height) = (self.width(), self.height());
        if !self.can_project() {
            return Err(ProviderError::Unprojectable { width, height });
        }

        let surface = self.surface()?;
        let (old_width, old_height) = surface.pixel_size();
        if (old_width, old_height) != (width, height) {
            surface.set_pixel_size(width, height);
            log::debug!("surface resized {old_width}x{old_height} -> {width}x{height}");
        }

        if let Some(ctx) = &self.context {
            ctx.set_clear_color(self.background);
        }

        Ok(false)
    }

    pub(super) fn create_surface(&mut self) -> Result<B::Surface> {
        let mut surface = self
            .backend
            .create_surface()
            .map_err(|e| ProviderError::backend("create surface", e))?;
        self.backend
            .attach_surface(&mut self.container, &surface)
            .map_err(|e| ProviderError::backend("attach surface", e))?;
        surface.set_event_handler(surface_event_handler(Rc::downgrade(&self.lifecycle)));

        log::debug!("provider {}: surface created", self.id);
        Ok(surface)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ProviderError;
    use crate::paint::Color;
    use crate::platform::headless::HeadlessBackend;
    use crate::platform::Surface;
    use crate::provider::{ProviderConfig, SurfaceProvider};

    fn provider() -> SurfaceProvider<HeadlessBackend> {
        SurfaceProvider::new(HeadlessBackend::new(), ProviderConfig::default()).unwrap()
    }

    // ── surface creation ──────────────────────────────────────────────────

    #[test]
    fn surface_is_created_and_attached_once() {
        let mut p = provider();
        p.surface().unwrap();
        p.surface().unwrap();
        assert!(p.has_surface());
        assert_eq!(p.backend().surfaces_created(), 1);
        assert_eq!(p.container().children(), 1);
    }

    #[test]
    fn new_surface_is_block_and_wired() {
        let mut p = provider();
        let surface = p.surface().unwrap();
        assert_eq!(surface.display(), "block");
        assert!(surface.has_event_handler());
    }

    #[test]
    fn context_menu_is_suppressed() {
        let mut p = provider();
        assert!(p.surface().unwrap().open_context_menu());
    }

    // ── render preconditions ──────────────────────────────────────────────

    #[test]
    fn render_fails_on_unmounted_container() {
        let mut p = provider();
        let err = p.render().unwrap_err();
        assert!(matches!(err, ProviderError::Unprojectable { width: 0, height: 0 }));
        assert!(!p.has_surface());
    }

    #[test]
    fn render_fails_on_zero_height() {
        let mut p = provider();
        p.container_mut().mount(800, 600);
        let err = p.render().unwrap_err();
        assert!(matches!(err, ProviderError::Unprojectable { width: 800, height: 0 }));
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn explicit_size_then_mount_then_render() {
        let mut p = provider();
        p.set_explicit_size(400, 400);
        p.container_mut().mount(1024, 768);
        assert!(!p.render().unwrap());
        assert_eq!(p.surface().unwrap().pixel_size(), (400, 400));
    }

    #[test]
    fn render_resizes_only_on_mismatch() {
        let mut p = provider();
        p.set_explicit_size(400, 400);
        p.render().unwrap();
        p.render().unwrap();
        assert_eq!(p.surface().unwrap().resizes(), 1);

        p.set_explicit_size(200, 100);
        p.render().unwrap();
        let surface = p.surface().unwrap();
        assert_eq!(surface.resizes(), 2);
        assert_eq!(surface.pixel_size(), (200, 100));
    }

    #[test]
    fn render_follows_measured_layout() {
        let mut p = provider();
        p.container_mut().mount(800, 600);
        p.resize("50%", "25%");
        assert!(!p.render().unwrap());
        assert_eq!(p.surface().unwrap().pixel_size(), (400, 150));
    }

    #[test]
    fn render_while_lost_requests_another_call_without_resizing() {
        let mut p = provider();
        p.set_explicit_size(400, 400);
        p.context().unwrap();
        p.render().unwrap();

        p.surface().unwrap().lose_context();
        p.set_explicit_size(500, 500);
        assert!(p.render().unwrap());
        assert!(p.render().unwrap());

        let surface = p.surface().unwrap();
        assert_eq!(surface.resizes(), 1);
        assert_eq!(surface.pixel_size(), (400, 400));
    }

    #[test]
    fn render_resumes_after_restore() {
        let mut p = provider();
        p.set_explicit_size(400, 400);
        p.context().unwrap();
        p.surface().unwrap().lose_context();
        assert!(p.render().unwrap());

        assert!(p.surface().unwrap().restore_context());
        assert!(!p.render().unwrap());
    }

    #[test]
    fn render_sets_clear_color_on_live_context() {
        let config = ProviderConfig {
            background: Color::new(0.2, 0.3, 0.4, 1.0),
            explicit_size: Some((10, 10)),
            ..ProviderConfig::default()
        };
        let mut p = SurfaceProvider::new(HeadlessBackend::new(), config).unwrap();
        p.context().unwrap();
        p.render().unwrap();
        assert_eq!(p.context().unwrap().clear_color(), Some(Color::new(0.2, 0.3, 0.4, 1.0)));
    }

    #[test]
    fn render_does_not_create_a_context() {
        let mut p = provider();
        p.set_explicit_size(10, 10);
        p.render().unwrap();
        assert!(!p.has_context());
    }
}
