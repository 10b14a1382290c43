/// Platform notification raised by a surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceEvent {
    /// The graphics context was lost; every GPU object is gone.
    ContextLost,
    /// A lost context became usable again (empty of resources).
    ContextRestored,
    /// The user requested the secondary-action (context) menu.
    ContextMenu,
}

/// Handler verdict for a [`SurfaceEvent`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Propagation {
    /// Let the platform run its default action.
    Continue,
    /// Suppress the default action. For `ContextLost` this is what allows
    /// the platform to restore the context later.
    PreventDefault,
}

/// Single handler installed on a surface by its provider.
pub type SurfaceEventHandler = Box<dyn FnMut(SurfaceEvent) -> Propagation>;
