use crate::coords::Rect;
use crate::paint::Color;
use crate::platform::{Backend, Container, Dimension, GraphicsContext};

use super::SurfaceProvider;

impl<B: Backend> SurfaceProvider<B> {
    /// Sets the container's layout size. The pixel buffer follows on the next
    /// `render()`.
    pub fn resize(&mut self, width: impl Into<Dimension>, height: impl Into<Dimension>) {
        let (width, height) = (width.into(), height.into());
        self.container.set_layout_size(&width, &height);
    }

    /// Square shorthand for [`resize`](Self::resize).
    pub fn resize_square(&mut self, side: impl Into<Dimension>) {
        let side = side.into();
        self.container.set_layout_size(&side, &side);
    }

    /// Stores an explicit size that overrides container measurement, and
    /// resizes the container to it.
    pub fn set_explicit_size(&mut self, width: u32, height: u32) {
        self.explicit_size = Some((width, height));
        self.resize(width, height);
    }

    pub fn explicit_size(&self) -> Option<(u32, u32)> {
        self.explicit_size
    }

    /// Logical width: the explicit override when non-zero, else the
    /// container's measured width (`0` until laid out).
    pub fn width(&self) -> u32 {
        match self.explicit_size {
            Some((width, _)) if width != 0 => width,
            _ => self.container.client_width(),
        }
    }

    /// Logical height; see [`width`](Self::width).
    pub fn height(&self) -> u32 {
        match self.explicit_size {
            Some((_, height)) if height != 0 => height,
            _ => self.container.client_height(),
        }
    }

    /// Whether both dimensions are non-zero, i.e. `render()` may proceed.
    pub fn can_project(&self) -> bool {
        self.width() != 0 && self.height() != 0
    }

    /// Current size as a rectangle at the origin.
    pub fn size(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    /// Writes the current size into `out`, origin reset to (0, 0).
    pub fn size_into(&self, out: &mut Rect) {
        out.set_x(0.0);
        out.set_y(0.0);
        out.set_width(self.width() as f32);
        out.set_height(self.height() as f32);
    }

    /// Sets the background: always on the container, and on the context clear
    /// color when a live context exists.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        self.container.set_background(color);
        if let Some(ctx) = self.context.as_ref().filter(|ctx| !ctx.is_context_lost()) {
            ctx.set_clear_color(color);
        }
    }

    pub fn background_color(&self) -> Color {
        self.background
    }
}
