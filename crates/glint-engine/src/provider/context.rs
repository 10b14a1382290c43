use crate::error::{ProviderError, Result};
use crate::platform::{Backend, GraphicsContext};

use super::lifecycle::{self, ContextChange};
use super::SurfaceProvider;

impl<B: Backend> SurfaceProvider<B> {
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// Returns the context, requesting it from the surface on first call.
    ///
    /// A lost context is still returned; check `is_context_lost()`.
    ///
    /// # Errors
    /// [`ProviderError::UnsupportedContext`] if the platform refuses to create
    /// one. A platform error pending right after creation is reported once as
    /// [`ProviderError::Platform`].
    pub fn context(&mut self) -> Result<&B::Context> {
        if let Some(context) = self.context.take() {
            return Ok(self.context.insert(context));
        }

        let surface = match self.surface.take() {
            Some(surface) => surface,
            None => self.create_surface()?,
        };
        let surface = self.surface.insert(surface);
        let context = self
            .backend
            .create_context(surface)
            .map_err(|e| ProviderError::backend("create context", e))?
            .ok_or(ProviderError::UnsupportedContext)?;
        log::debug!("provider {}: graphics context created", self.id);

        let error_checks = self.error_checks;
        let context = self.context.insert(context);
        if error_checks {
            let code = context.take_error();
            if code.is_failure() {
                return Err(ProviderError::Platform {
                    operation: "context creation".to_owned(),
                    code,
                });
            }
        }
        Ok(context)
    }

    /// Registers the single context-change listener, replacing any previous one.
    ///
    /// The listener runs synchronously from the platform notification, after
    /// the shader cache has been cleared on loss.
    pub fn set_on_context_changed<F>(&mut self, listener: F)
    where
        F: FnMut(ContextChange) + 'static,
    {
        self.lifecycle
            .borrow_mut()
            .set_listener(Some(Box::new(listener)));
    }

    /// Detaches the context-change listener.
    pub fn clear_on_context_changed(&mut self) {
        self.lifecycle.borrow_mut().set_listener(None);
    }

    pub fn has_context_listener(&self) -> bool {
        self.lifecycle.borrow().has_listener()
    }

    /// Applies a context change as if the surface had reported it.
    ///
    /// Hosts whose platform reports loss outside the surface (for example a
    /// device-reset query) feed it in here.
    pub fn notify_context_changed(&mut self, change: ContextChange) {
        lifecycle::on_context_changed(&self.lifecycle, change);
    }
}
