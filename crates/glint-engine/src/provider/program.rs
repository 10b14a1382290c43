use std::rc::Rc;

use crate::error::Result;
use crate::platform::{Backend, GraphicsContext};
use crate::shader;

use super::{ProgramOf, SurfaceProvider};

/// Returns the program cached under `name`, compiling and linking it first if
/// this context generation has not built it yet.
///
/// Free-function form of [`SurfaceProvider::compile_program`].
pub fn compile_program<B: Backend>(
    provider: &mut SurfaceProvider<B>,
    name: &str,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<Option<ProgramOf<B>>> {
    provider.compile_program(name, vertex_source, fragment_source)
}

impl<B: Backend> SurfaceProvider<B> {
    /// Returns the program cached under `name`, building it on a miss.
    ///
    /// - `Ok(None)`: the context is lost; retry once it is restored.
    /// - cache hit: the cached handle, even if the sources differ from the
    ///   ones it was built from. Names are the cache key, not source text.
    ///
    /// # Errors
    /// Context creation errors, and the compile/link errors of
    /// [`shader::link_program`].
    pub fn compile_program(
        &mut self,
        name: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Option<ProgramOf<B>>> {
        let error_checks = self.error_checks;
        let lifecycle = Rc::clone(&self.lifecycle);
        let ctx = self.context()?;
        if ctx.is_context_lost() {
            log::debug!("context lost; skipping program '{name}'");
            return Ok(None);
        }

        let cached = lifecycle.borrow().shaders.get(name).cloned();
        if let Some(program) = cached {
            return Ok(Some(program));
        }

        let built = shader::link_program(ctx, name, vertex_source, fragment_source, error_checks);
        if ctx.is_context_lost() {
            // Whatever was built belongs to a dead generation.
            log::debug!("context lost while building program '{name}'");
            return Ok(None);
        }
        let program = built?;

        lifecycle
            .borrow_mut()
            .shaders
            .insert(name, program.clone());
        Ok(Some(program))
    }
}

#[cfg(test)]
mod tests {
    use super::compile_program;
    use crate::error::ProviderError;
    use crate::platform::headless::HeadlessBackend;
    use crate::provider::{ProviderConfig, SurfaceProvider};
    use crate::shader::ShaderStage;

    const VS: &str = "attribute vec2 a_pos;\nvoid main() { gl_Position = vec4(a_pos, 0.0, 1.0); }";
    const FS: &str = "precision mediump float;\nvoid main() { gl_FragColor = vec4(1.0); }";
    const FS_RED: &str = "precision mediump float;\nvoid main() { gl_FragColor = vec4(1.0, 0.0, 0.0, 1.0); }";

    fn provider() -> SurfaceProvider<HeadlessBackend> {
        SurfaceProvider::new(HeadlessBackend::new(), ProviderConfig::default()).unwrap()
    }

    // ── caching ───────────────────────────────────────────────────────────

    #[test]
    fn same_name_returns_same_program() {
        let mut p = provider();
        let first = compile_program(&mut p, "solid", VS, FS).unwrap().unwrap();
        let second = compile_program(&mut p, "solid", VS, FS_RED).unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(p.shaders().len(), 1);
        assert_eq!(p.context().unwrap().programs_linked(), 1);
    }

    #[test]
    fn distinct_names_build_distinct_programs() {
        let mut p = provider();
        let a = p.compile_program("solid", VS, FS).unwrap().unwrap();
        let b = p.compile_program("red", VS, FS_RED).unwrap().unwrap();
        assert_ne!(a, b);
        assert_eq!(p.shaders().len(), 2);
    }

    #[test]
    fn failed_build_is_not_cached() {
        let mut p = provider();
        let err = p.compile_program("solid", VS, "#error later").unwrap_err();
        assert!(matches!(err, ProviderError::ShaderCompile { stage: ShaderStage::Fragment, .. }));
        assert!(!p.shaders().contains("solid"));
        assert!(p.compile_program("solid", VS, FS).unwrap().is_some());
    }

    #[test]
    fn link_failure_surfaces_to_caller() {
        let mut p = provider();
        p.context().unwrap().fail_next_link("too many varyings");
        let err = p.compile_program("solid", VS, FS).unwrap_err();
        assert_eq!(err.program_name(), Some("solid"));
        assert!(matches!(err, ProviderError::ProgramLink { .. }));
    }

    // ── context loss ──────────────────────────────────────────────────────

    #[test]
    fn loss_empties_cache_and_rebuild_yields_new_program() {
        let mut p = provider();
        let before = p.compile_program("solid", VS, FS).unwrap().unwrap();
        p.compile_program("red", VS, FS_RED).unwrap();

        p.surface().unwrap().lose_context();
        assert!(p.shaders().is_empty());
        assert!(p.compile_program("solid", VS, FS).unwrap().is_none());
        assert!(p.shaders().is_empty());

        p.surface().unwrap().restore_context();
        let after = p.compile_program("solid", VS, FS).unwrap().unwrap();
        assert_ne!(before, after);
        assert!(p.context().unwrap().is_program(&after));
        assert_eq!(p.shaders().len(), 1);
    }

    #[test]
    fn restore_does_not_touch_cache() {
        let mut p = provider();
        p.compile_program("solid", VS, FS).unwrap();
        p.surface().unwrap().lose_context();
        p.surface().unwrap().restore_context();
        assert!(p.shaders().is_empty());

        p.compile_program("solid", VS, FS).unwrap();
        p.notify_context_changed(crate::provider::ContextChange::Restored);
        assert_eq!(p.shaders().len(), 1);
    }

    #[test]
    fn loss_during_build_is_transient_and_uncached() {
        let mut p = provider();
        p.context().unwrap().lose_on_next_link();
        assert!(p.compile_program("solid", VS, FS).unwrap().is_none());
        assert!(p.shaders().is_empty());
    }

    #[test]
    fn unsupported_context_fails_compile() {
        let mut p = SurfaceProvider::new(HeadlessBackend::unsupported(), ProviderConfig::default())
            .unwrap();
        assert!(matches!(
            p.compile_program("solid", VS, FS).unwrap_err(),
            ProviderError::UnsupportedContext
        ));
    }
}
