//! Platform capability traits.
//!
//! A provider never talks to a windowing system or graphics API directly. It
//! drives four small capabilities:
//! - [`Backend`]: the strategy object that creates the container, surface and
//!   context (WebGL 1 vs WebGL 2, headless, ...)
//! - [`Container`]: the host layout element the surface lives in
//! - [`Surface`]: the drawing target and its platform notifications
//! - [`GraphicsContext`]: the GL-style API used to build shader programs

mod backend;
mod dimension;
mod event;
mod gl_error;

pub mod headless;
#[cfg(feature = "web")]
pub mod web;

pub use backend::{Backend, Container, GraphicsContext, Surface};
pub use dimension::Dimension;
pub use event::{Propagation, SurfaceEvent, SurfaceEventHandler};
pub use gl_error::GlError;
