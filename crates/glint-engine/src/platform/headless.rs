//! In-memory platform.
//!
//! Implements every capability trait without a GPU or a DOM. Layout is a
//! simple box model (a mounted container fills its parent's width; height
//! comes from style only), and the "GPU" tracks program/shader objects per
//! context generation.
//!
//! The surface exposes loss/restore hooks that raise the same notifications a
//! browser would, so it doubles as a context-loss simulator.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::paint::Color;
use crate::shader::ShaderStage;

use super::{
    Backend, Container, Dimension, GlError, GraphicsContext, Propagation, Surface, SurfaceEvent,
    SurfaceEventHandler,
};

/// Headless backend configuration.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// When false, every context request is refused.
    pub supports_context: bool,

    /// Error code left pending on a freshly created context.
    pub creation_error: GlError,

    /// Pixel-buffer size of a new surface (browser canvas default: 300×150).
    pub initial_pixel_size: (u32, u32),
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            supports_context: true,
            creation_error: GlError::NO_ERROR,
            initial_pixel_size: (300, 150),
        }
    }
}

/// Backend producing [`HeadlessContainer`], [`HeadlessSurface`] and [`HeadlessContext`].
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    config: HeadlessConfig,
    surfaces_created: usize,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HeadlessConfig) -> Self {
        Self {
            config,
            surfaces_created: 0,
        }
    }

    /// A backend whose surfaces never yield a context.
    pub fn unsupported() -> Self {
        Self::with_config(HeadlessConfig {
            supports_context: false,
            ..HeadlessConfig::default()
        })
    }

    pub fn surfaces_created(&self) -> usize {
        self.surfaces_created
    }
}

impl Backend for HeadlessBackend {
    type Container = HeadlessContainer;
    type Surface = HeadlessSurface;
    type Context = HeadlessContext;

    fn create_container(&mut self) -> anyhow::Result<HeadlessContainer> {
        Ok(HeadlessContainer::default())
    }

    fn create_surface(&mut self) -> anyhow::Result<HeadlessSurface> {
        self.surfaces_created += 1;
        Ok(HeadlessSurface {
            pixel_size: self.config.initial_pixel_size,
            display: "block",
            handler: None,
            device: Rc::new(RefCell::new(Device::default())),
            resizes: 0,
        })
    }

    fn attach_surface(
        &mut self,
        container: &mut HeadlessContainer,
        _surface: &HeadlessSurface,
    ) -> anyhow::Result<()> {
        container.children += 1;
        Ok(())
    }

    fn create_context(
        &mut self,
        surface: &mut HeadlessSurface,
    ) -> anyhow::Result<Option<HeadlessContext>> {
        if !self.config.supports_context {
            return Ok(None);
        }
        let mut device = surface.device.borrow_mut();
        if self.config.creation_error.is_error() {
            device.errors.push_back(self.config.creation_error);
        }
        device.contexts += 1;
        Ok(Some(HeadlessContext {
            device: Rc::clone(&surface.device),
        }))
    }
}

// ── container ─────────────────────────────────────────────────────────────

/// Layout box. Unmounted containers measure 0×0.
#[derive(Debug, Default)]
pub struct HeadlessContainer {
    style_width: Option<Dimension>,
    style_height: Option<Dimension>,
    parent: Option<(u32, u32)>,
    background: Option<Color>,
    children: usize,
}

impl HeadlessContainer {
    /// Places the container inside a parent box of the given size.
    pub fn mount(&mut self, parent_width: u32, parent_height: u32) {
        self.parent = Some((parent_width, parent_height));
    }

    pub fn style_width(&self) -> Option<&Dimension> {
        self.style_width.as_ref()
    }

    pub fn style_height(&self) -> Option<&Dimension> {
        self.style_height.as_ref()
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Number of surfaces attached to this container.
    pub fn children(&self) -> usize {
        self.children
    }
}

/// Resolves a style length against the parent extent. An unset width fills
/// the parent (block layout); an unset height collapses to zero.
fn resolve(style: Option<&Dimension>, parent: u32, fill_when_unset: bool) -> u32 {
    let Some(dim) = style else {
        return if fill_when_unset { parent } else { 0 };
    };
    if let Some(px) = dim.as_pixels() {
        return px;
    }
    match dim {
        Dimension::Css(css) => css
            .trim()
            .strip_suffix('%')
            .and_then(|p| p.trim().parse::<f32>().ok())
            .map_or(0, |pct| (parent as f32 * pct / 100.0).round().max(0.0) as u32),
        Dimension::Pixels(px) => *px,
    }
}

impl Container for HeadlessContainer {
    fn set_layout_size(&mut self, width: &Dimension, height: &Dimension) {
        self.style_width = Some(width.clone());
        self.style_height = Some(height.clone());
    }

    fn client_width(&self) -> u32 {
        self.parent
            .map_or(0, |(w, _)| resolve(self.style_width.as_ref(), w, true))
    }

    fn client_height(&self) -> u32 {
        self.parent
            .map_or(0, |(_, h)| resolve(self.style_height.as_ref(), h, false))
    }

    fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }
}

// ── device ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct ProgramState {
    attached: Vec<ShaderStage>,
    linked: bool,
    log: String,
}

/// GPU-side state shared by a surface and the context created from it.
#[derive(Debug, Default)]
struct Device {
    lost: bool,
    restorable: bool,
    generation: u32,
    next_object: u32,
    contexts: usize,
    errors: VecDeque<GlError>,
    error_after_link: Option<GlError>,
    link_failure: Option<String>,
    lose_on_link: bool,
    clear_color: Option<Color>,
    clear_color_calls: usize,
    programs: HashMap<u32, ProgramState>,
    shaders: HashMap<u32, ShaderStage>,
    programs_linked: usize,
}

impl Device {
    fn alloc(&mut self) -> u32 {
        self.next_object += 1;
        self.next_object
    }

    fn lose(&mut self) {
        self.lost = true;
        self.errors.push_back(GlError::CONTEXT_LOST_WEBGL);
    }

    fn restore(&mut self) {
        self.lost = false;
        self.restorable = false;
        self.generation += 1;
        self.errors.clear();
        self.programs.clear();
        self.shaders.clear();
        self.clear_color = None;
    }

    fn program_mut(&mut self, program: &HeadlessProgram) -> Option<&mut ProgramState> {
        if program.generation != self.generation {
            return None;
        }
        self.programs.get_mut(&program.id)
    }
}

// ── surface ───────────────────────────────────────────────────────────────

/// Drawing target with loss/restore simulation hooks.
pub struct HeadlessSurface {
    pixel_size: (u32, u32),
    display: &'static str,
    handler: Option<SurfaceEventHandler>,
    device: Rc<RefCell<Device>>,
    resizes: usize,
}

impl HeadlessSurface {
    /// Loses the context and raises `ContextLost`.
    ///
    /// Returns whether the handler prevented the default action, which is
    /// what makes the context restorable. Losing an already lost context does
    /// nothing and returns false.
    pub fn lose_context(&mut self) -> bool {
        {
            let mut device = self.device.borrow_mut();
            if device.lost {
                return false;
            }
            device.lose();
        }
        let restorable = self.dispatch(SurfaceEvent::ContextLost) == Propagation::PreventDefault;
        self.device.borrow_mut().restorable = restorable;
        restorable
    }

    /// Restores a lost, restorable context and raises `ContextRestored`.
    ///
    /// The restored context starts a new generation: every program and shader
    /// object from before the loss is invalid.
    pub fn restore_context(&mut self) -> bool {
        {
            let mut device = self.device.borrow_mut();
            if !device.lost || !device.restorable {
                return false;
            }
            device.restore();
        }
        self.dispatch(SurfaceEvent::ContextRestored);
        true
    }

    /// Raises `ContextMenu`; returns whether the menu was suppressed.
    pub fn open_context_menu(&mut self) -> bool {
        self.dispatch(SurfaceEvent::ContextMenu) == Propagation::PreventDefault
    }

    pub fn display(&self) -> &str {
        self.display
    }

    pub fn has_event_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Number of pixel-buffer resizes applied so far.
    pub fn resizes(&self) -> usize {
        self.resizes
    }

    /// Number of contexts requested from this surface.
    pub fn contexts_created(&self) -> usize {
        self.device.borrow().contexts
    }

    fn dispatch(&mut self, event: SurfaceEvent) -> Propagation {
        match self.handler.as_mut() {
            Some(handler) => handler(event),
            None => Propagation::Continue,
        }
    }
}

impl Surface for HeadlessSurface {
    fn pixel_size(&self) -> (u32, u32) {
        self.pixel_size
    }

    fn set_pixel_size(&mut self, width: u32, height: u32) {
        self.pixel_size = (width, height);
        self.resizes += 1;
    }

    fn set_event_handler(&mut self, handler: SurfaceEventHandler) {
        self.handler = Some(handler);
    }
}

// ── context ───────────────────────────────────────────────────────────────

/// Program handle. Equal handles name the same program object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct HeadlessProgram {
    id: u32,
    generation: u32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HeadlessShader {
    id: u32,
    stage: ShaderStage,
    generation: u32,
}

/// Context handle. Clones share the same device.
#[derive(Debug, Clone)]
pub struct HeadlessContext {
    device: Rc<RefCell<Device>>,
}

impl HeadlessContext {
    /// A context with its own device and no surface; useful for exercising
    /// program building in isolation.
    pub fn detached() -> Self {
        Self {
            device: Rc::new(RefCell::new(Device::default())),
        }
    }

    /// Makes the next `link_program` fail with `log`.
    pub fn fail_next_link(&self, log: impl Into<String>) {
        self.device.borrow_mut().link_failure = Some(log.into());
    }

    /// Queues an error code, as if a previous call had failed.
    pub fn inject_error(&self, code: GlError) {
        self.device.borrow_mut().errors.push_back(code);
    }

    /// Queues `code` right after the next link completes.
    pub fn inject_error_after_link(&self, code: GlError) {
        self.device.borrow_mut().error_after_link = Some(code);
    }

    /// Marks the context lost during the next link, before the surface has
    /// had a chance to raise the notification.
    pub fn lose_on_next_link(&self) {
        self.device.borrow_mut().lose_on_link = true;
    }

    /// Programs successfully linked over the device's lifetime.
    pub fn programs_linked(&self) -> usize {
        self.device.borrow().programs_linked
    }

    /// Clear color of the current generation, if one was set.
    pub fn clear_color(&self) -> Option<Color> {
        self.device.borrow().clear_color
    }

    /// `set_clear_color` calls over the device's lifetime, including calls
    /// dropped while lost.
    pub fn clear_color_calls(&self) -> usize {
        self.device.borrow().clear_color_calls
    }

    pub fn generation(&self) -> u32 {
        self.device.borrow().generation
    }

    /// Whether `program` is a live object of the current generation.
    pub fn is_program(&self, program: &HeadlessProgram) -> bool {
        let device = self.device.borrow();
        program.generation == device.generation && device.programs.contains_key(&program.id)
    }
}

fn directive_error(source: &str) -> Option<String> {
    source.lines().enumerate().find_map(|(i, line)| {
        let message = line.trim_start().strip_prefix("#error")?;
        Some(format!("ERROR: 0:{}: '#error' : {}", i + 1, message.trim()))
    })
}

impl GraphicsContext for HeadlessContext {
    type Program = HeadlessProgram;
    type Shader = HeadlessShader;

    fn is_context_lost(&self) -> bool {
        self.device.borrow().lost
    }

    fn take_error(&self) -> GlError {
        self.device
            .borrow_mut()
            .errors
            .pop_front()
            .unwrap_or(GlError::NO_ERROR)
    }

    fn set_clear_color(&self, color: Color) {
        let mut device = self.device.borrow_mut();
        device.clear_color_calls += 1;
        if !device.lost {
            device.clear_color = Some(color);
        }
    }

    fn create_program(&self) -> Result<HeadlessProgram, String> {
        let mut device = self.device.borrow_mut();
        if device.lost {
            return Err("context lost".to_owned());
        }
        let id = device.alloc();
        device.programs.insert(id, ProgramState::default());
        Ok(HeadlessProgram {
            id,
            generation: device.generation,
        })
    }

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<HeadlessShader, String> {
        let mut device = self.device.borrow_mut();
        if device.lost {
            return Err("context lost".to_owned());
        }
        if source.trim().is_empty() {
            return Err("ERROR: 0:0: '' : shader source is empty".to_owned());
        }
        if let Some(log) = directive_error(source) {
            return Err(log);
        }
        let id = device.alloc();
        device.shaders.insert(id, stage);
        Ok(HeadlessShader {
            id,
            stage,
            generation: device.generation,
        })
    }

    fn attach_shader(&self, program: &HeadlessProgram, shader: &HeadlessShader) {
        let mut device = self.device.borrow_mut();
        if device.lost {
            return;
        }
        let shader_live =
            shader.generation == device.generation && device.shaders.contains_key(&shader.id);
        let attached = device
            .program_mut(program)
            .filter(|state| shader_live && !state.attached.contains(&shader.stage))
            .map(|state| state.attached.push(shader.stage))
            .is_some();
        if !attached {
            device.errors.push_back(GlError::INVALID_OPERATION);
        }
    }

    fn link_program(&self, program: &HeadlessProgram) {
        let mut device = self.device.borrow_mut();
        if device.lost {
            return;
        }
        let forced_failure = device.link_failure.take();
        let outcome = device.program_mut(program).map(|state| {
            let complete = state.attached.contains(&ShaderStage::Vertex)
                && state.attached.contains(&ShaderStage::Fragment);
            let (linked, log) = match forced_failure {
                Some(log) => (false, log),
                None if !complete => (
                    false,
                    "program is missing a vertex or fragment shader".to_owned(),
                ),
                None => (true, String::new()),
            };
            state.linked = linked;
            state.log = log;
            linked
        });
        let linked = match outcome {
            Some(linked) => linked,
            None => {
                device.errors.push_back(GlError::INVALID_OPERATION);
                false
            }
        };
        if linked {
            device.programs_linked += 1;
        }
        if let Some(code) = device.error_after_link.take() {
            device.errors.push_back(code);
        }
        if std::mem::take(&mut device.lose_on_link) {
            device.lose();
        }
    }

    fn link_status(&self, program: &HeadlessProgram) -> bool {
        self.device
            .borrow_mut()
            .program_mut(program)
            .is_some_and(|state| state.linked)
    }

    fn program_info_log(&self, program: &HeadlessProgram) -> String {
        self.device
            .borrow_mut()
            .program_mut(program)
            .map(|state| state.log.clone())
            .unwrap_or_default()
    }
}
