//! Geometry value types.
//!
//! Sizes reported by a provider are integral pixel counts; `Rect` stores them
//! as `f32` so it can be handed straight to projection math.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
