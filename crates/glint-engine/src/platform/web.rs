//! Browser platform: a `<div>` container, a `<canvas>` surface and a WebGL
//! context.
//!
//! Context-loss notifications arrive as DOM events on the canvas
//! (`webglcontextlost`, `webglcontextrestored`) and are forwarded to the
//! provider's handler from the listener closures kept alive by [`WebSurface`].

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context as _, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Event, HtmlCanvasElement, HtmlDivElement, HtmlElement, WebGl2RenderingContext,
    WebGlContextAttributes, WebGlProgram, WebGlRenderingContext, WebGlShader,
};

use crate::paint::Color;
use crate::shader::ShaderStage;

use super::{
    Backend, Container, Dimension, GlError, GraphicsContext, Propagation, Surface, SurfaceEvent,
    SurfaceEventHandler,
};

fn js_error(value: JsValue) -> anyhow::Error {
    anyhow!("{value:?}")
}

/// Which WebGL API a [`WebBackend`] requests from its canvases.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum WebGlApi {
    #[default]
    WebGl1,
    WebGl2 {
        antialias: bool,
    },
}

/// Backend creating DOM elements in the current document.
pub struct WebBackend {
    document: Document,
    api: WebGlApi,
}

impl WebBackend {
    pub fn new(api: WebGlApi) -> Result<Self> {
        let document = web_sys::window()
            .context("no global window")?
            .document()
            .context("window has no document")?;
        Ok(Self { document, api })
    }

    pub fn api(&self) -> WebGlApi {
        self.api
    }

    fn create<T: JsCast>(&self, tag: &str) -> Result<T> {
        self.document
            .create_element(tag)
            .map_err(js_error)
            .with_context(|| format!("failed to create <{tag}>"))?
            .dyn_into::<T>()
            .map_err(|_| anyhow!("<{tag}> has an unexpected element type"))
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::warn!("failed to set style {property}: {value}: {e:?}");
    }
}

impl Backend for WebBackend {
    type Container = WebContainer;
    type Surface = WebSurface;
    type Context = WebGlContext;

    fn create_container(&mut self) -> Result<WebContainer> {
        Ok(WebContainer {
            element: self.create("div")?,
        })
    }

    fn create_surface(&mut self) -> Result<WebSurface> {
        let canvas: HtmlCanvasElement = self.create("canvas")?;
        set_style(&canvas, "display", "block");

        let handler = Rc::new(RefCell::new(None));
        let mut listeners = Vec::with_capacity(3);
        for (kind, event) in [
            ("webglcontextlost", SurfaceEvent::ContextLost),
            ("webglcontextrestored", SurfaceEvent::ContextRestored),
            ("contextmenu", SurfaceEvent::ContextMenu),
        ] {
            listeners.push((kind, listen(&canvas, kind, event, Rc::clone(&handler))?));
        }

        Ok(WebSurface {
            canvas,
            handler,
            listeners,
        })
    }

    fn attach_surface(&mut self, container: &mut WebContainer, surface: &WebSurface) -> Result<()> {
        container
            .element
            .append_child(&surface.canvas)
            .map_err(js_error)
            .context("failed to append canvas to container")?;
        Ok(())
    }

    fn create_context(&mut self, surface: &mut WebSurface) -> Result<Option<WebGlContext>> {
        let canvas = &surface.canvas;
        match self.api {
            WebGlApi::WebGl1 => canvas
                .get_context("webgl")
                .map_err(js_error)?
                .map(|object| {
                    object
                        .dyn_into::<WebGlRenderingContext>()
                        .map(WebGlContext::WebGl1)
                        .map_err(|_| anyhow!("\"webgl\" returned a non-WebGL context"))
                })
                .transpose(),
            WebGlApi::WebGl2 { antialias } => {
                let attributes = WebGlContextAttributes::new();
                attributes.set_antialias(antialias);
                canvas
                    .get_context_with_context_options("webgl2", &attributes)
                    .map_err(js_error)?
                    .map(|object| {
                        object
                            .dyn_into::<WebGl2RenderingContext>()
                            .map(WebGlContext::WebGl2)
                            .map_err(|_| anyhow!("\"webgl2\" returned a non-WebGL2 context"))
                    })
                    .transpose()
            }
        }
    }
}

// ── container ─────────────────────────────────────────────────────────────

/// `<div>` wrapping the canvas. Append [`element`](Self::element) to the page.
pub struct WebContainer {
    element: HtmlDivElement,
}

impl WebContainer {
    pub fn element(&self) -> &HtmlDivElement {
        &self.element
    }
}

impl Container for WebContainer {
    fn set_layout_size(&mut self, width: &Dimension, height: &Dimension) {
        set_style(&self.element, "width", &width.to_css());
        set_style(&self.element, "height", &height.to_css());
    }

    fn client_width(&self) -> u32 {
        self.element.client_width().max(0) as u32
    }

    fn client_height(&self) -> u32 {
        self.element.client_height().max(0) as u32
    }

    fn set_background(&mut self, color: Color) {
        set_style(&self.element, "background-color", &color.to_css());
    }
}

// ── surface ───────────────────────────────────────────────────────────────

type HandlerSlot = Rc<RefCell<Option<SurfaceEventHandler>>>;
type Listener = Closure<dyn FnMut(Event)>;

fn listen(
    canvas: &HtmlCanvasElement,
    kind: &'static str,
    event: SurfaceEvent,
    handler: HandlerSlot,
) -> Result<Listener> {
    let listener = Closure::<dyn FnMut(Event)>::new(move |dom_event: Event| {
        if let Some(handler) = handler.borrow_mut().as_mut() {
            if handler(event) == Propagation::PreventDefault {
                dom_event.prevent_default();
            }
        }
    });
    canvas
        .add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
        .map_err(js_error)
        .with_context(|| format!("failed to listen for {kind}"))?;
    Ok(listener)
}

/// `<canvas>` plus the DOM listeners that feed its event handler.
///
/// Listeners are removed when the surface is dropped.
pub struct WebSurface {
    canvas: HtmlCanvasElement,
    handler: HandlerSlot,
    listeners: Vec<(&'static str, Listener)>,
}

impl WebSurface {
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for WebSurface {
    fn pixel_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_pixel_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn set_event_handler(&mut self, handler: SurfaceEventHandler) {
        *self.handler.borrow_mut() = Some(handler);
    }
}

impl Drop for WebSurface {
    fn drop(&mut self) {
        for (kind, listener) in &self.listeners {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
        }
    }
}

// ── context ───────────────────────────────────────────────────────────────

/// WebGL 1 or WebGL 2 rendering context.
#[derive(Debug, Clone)]
pub enum WebGlContext {
    WebGl1(WebGlRenderingContext),
    WebGl2(WebGl2RenderingContext),
}

/// Both context types expose the same method names for everything used here.
macro_rules! with_gl {
    ($ctx:expr, $gl:ident => $body:expr) => {
        match $ctx {
            WebGlContext::WebGl1($gl) => $body,
            WebGlContext::WebGl2($gl) => $body,
        }
    };
}

impl GraphicsContext for WebGlContext {
    type Program = WebGlProgram;
    type Shader = WebGlShader;

    fn is_context_lost(&self) -> bool {
        with_gl!(self, gl => gl.is_context_lost())
    }

    fn take_error(&self) -> GlError {
        GlError(with_gl!(self, gl => gl.get_error()))
    }

    fn set_clear_color(&self, color: Color) {
        let [r, g, b, a] = color.to_array();
        with_gl!(self, gl => gl.clear_color(r, g, b, a));
    }

    fn create_program(&self) -> Result<WebGlProgram, String> {
        with_gl!(self, gl => gl.create_program())
            .ok_or_else(|| "createProgram returned null".to_owned())
    }

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<WebGlShader, String> {
        let shader = with_gl!(self, gl => gl.create_shader(stage.gl_enum()))
            .ok_or_else(|| format!("createShader({stage}) returned null"))?;
        with_gl!(self, gl => {
            gl.shader_source(&shader, source);
            gl.compile_shader(&shader);
        });
        let compiled = with_gl!(self, gl => {
            gl.get_shader_parameter(&shader, WebGlRenderingContext::COMPILE_STATUS)
        })
        .as_bool()
        .unwrap_or(false);
        if compiled {
            Ok(shader)
        } else {
            Err(with_gl!(self, gl => gl.get_shader_info_log(&shader)).unwrap_or_default())
        }
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        with_gl!(self, gl => gl.attach_shader(program, shader));
    }

    fn link_program(&self, program: &WebGlProgram) {
        with_gl!(self, gl => gl.link_program(program));
    }

    fn link_status(&self, program: &WebGlProgram) -> bool {
        with_gl!(self, gl => gl.get_program_parameter(program, WebGlRenderingContext::LINK_STATUS))
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> String {
        with_gl!(self, gl => gl.get_program_info_log(program)).unwrap_or_default()
    }
}
