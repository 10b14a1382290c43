//! Shader program cache and the compile-link protocol.
//!
//! Programs are bound to one context generation. The cache is owned by a
//! provider and emptied wholesale when its context is lost.

mod cache;
mod link;
mod stage;

pub use cache::ShaderCache;
pub use link::link_program;
pub use stage::ShaderStage;
