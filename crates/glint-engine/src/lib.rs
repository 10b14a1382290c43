//! Glint engine crate.
//!
//! This crate owns the lifecycle of a GPU drawing surface embedded in a host
//! layout: lazy surface + context creation, context-loss recovery, sizing to
//! the container, and a shader program cache that lives exactly as long as
//! one context generation.
//!
//! Drawing itself is left to the caller. A frame loop typically looks like:
//!
//! ```rust
//! use glint_engine::platform::headless::HeadlessBackend;
//! use glint_engine::{ProviderConfig, SurfaceProvider};
//!
//! let mut provider = SurfaceProvider::new(HeadlessBackend::new(), ProviderConfig::default())?;
//! provider.set_explicit_size(400, 400);
//! provider.container_mut().mount(800, 600);
//!
//! let program = provider.compile_program("solid", "void main() {}", "void main() {}")?;
//! assert!(program.is_some());
//!
//! let again = provider.render()?;
//! assert!(!again);
//! # Ok::<(), glint_engine::ProviderError>(())
//! ```

pub mod coords;
pub mod error;
pub mod logging;
pub mod paint;
pub mod platform;
pub mod provider;
pub mod shader;

pub use error::{ProviderError, Result};
pub use provider::{
    compile_program, ContextChange, ContextListener, ProgramOf, ProviderConfig, ProviderId,
    SurfaceProvider,
};
