use std::fmt;

use crate::paint::Color;
use crate::shader::ShaderStage;

use super::{Dimension, GlError, SurfaceEventHandler};

/// Strategy that produces the host objects a provider owns.
///
/// Variants (context API version, debug/loss-simulating surfaces, headless
/// hosts) are separate implementations of this trait rather than subclasses of
/// the provider.
pub trait Backend {
    type Container: Container;
    type Surface: Surface;
    type Context: GraphicsContext;

    /// Creates the layout container. Called once, from provider construction.
    fn create_container(&mut self) -> anyhow::Result<Self::Container>;

    /// Instantiates a detached surface.
    fn create_surface(&mut self) -> anyhow::Result<Self::Surface>;

    /// Appends `surface` to `container`'s children.
    fn attach_surface(
        &mut self,
        container: &mut Self::Container,
        surface: &Self::Surface,
    ) -> anyhow::Result<()>;

    /// Requests a context from `surface`.
    ///
    /// `Ok(None)` means the platform refused (no GL support); `Err` means the
    /// request itself failed.
    fn create_context(&mut self, surface: &mut Self::Surface)
        -> anyhow::Result<Option<Self::Context>>;
}

/// Host layout element that encloses the surface.
pub trait Container {
    /// Sets the layout (style) width and height.
    fn set_layout_size(&mut self, width: &Dimension, height: &Dimension);

    /// Measured content-box width; `0` until laid out.
    fn client_width(&self) -> u32;

    /// Measured content-box height; `0` until laid out.
    fn client_height(&self) -> u32;

    /// Sets the visual background behind the surface.
    fn set_background(&mut self, color: Color);
}

/// Drawing target presented inside a [`Container`].
pub trait Surface {
    /// Pixel-buffer dimensions (the rendering resolution).
    fn pixel_size(&self) -> (u32, u32);

    fn set_pixel_size(&mut self, width: u32, height: u32);

    /// Installs the handler for platform notifications, replacing any other.
    fn set_event_handler(&mut self, handler: SurfaceEventHandler);
}

/// The slice of a GL-style API needed to own a context and build programs.
pub trait GraphicsContext {
    /// Linked program handle. Cloning yields another handle to the same program.
    type Program: Clone + fmt::Debug + 'static;
    type Shader;

    fn is_context_lost(&self) -> bool;

    /// Returns and clears the oldest pending error code.
    fn take_error(&self) -> GlError;

    fn set_clear_color(&self, color: Color);

    /// `Err` carries a platform message when no program object can be made.
    fn create_program(&self) -> Result<Self::Program, String>;

    /// Compiles one stage. `Err` carries the platform info log.
    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;

    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);

    fn link_program(&self, program: &Self::Program);

    fn link_status(&self, program: &Self::Program) -> bool;

    fn program_info_log(&self, program: &Self::Program) -> String;
}
