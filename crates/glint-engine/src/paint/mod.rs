//! Paint values applied to the container chrome and the context clear color.

pub mod color;

pub use color::Color;
