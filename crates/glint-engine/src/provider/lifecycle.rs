use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::platform::{Propagation, SurfaceEvent, SurfaceEventHandler};
use crate::shader::ShaderCache;

/// Context-change notification delivered to the provider's listener.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ContextChange {
    Lost,
    Restored,
}

impl ContextChange {
    #[inline]
    pub fn is_lost(self) -> bool {
        self == ContextChange::Lost
    }
}

/// Listener registered with `SurfaceProvider::set_on_context_changed`.
pub type ContextListener = Box<dyn FnMut(ContextChange)>;

/// State shared between a provider and its surface's event handler.
pub(super) struct Lifecycle<P> {
    pub(super) shaders: ShaderCache<P>,
    listener: Option<ContextListener>,
    /// Bumped when a listener is installed or removed; lets a dispatch tell
    /// whether the listener it took out was replaced meanwhile.
    listener_epoch: u64,
}

pub(super) type SharedLifecycle<P> = Rc<RefCell<Lifecycle<P>>>;

impl<P> Lifecycle<P> {
    pub(super) fn shared() -> SharedLifecycle<P> {
        Rc::new(RefCell::new(Self {
            shaders: ShaderCache::new(),
            listener: None,
            listener_epoch: 0,
        }))
    }

    pub(super) fn set_listener(&mut self, listener: Option<ContextListener>) {
        self.listener = listener;
        self.listener_epoch += 1;
    }

    pub(super) fn has_listener(&self) -> bool {
        self.listener.is_some()
    }
}

/// Applies a context change: clears the cache on loss, then notifies.
///
/// The listener is taken out of the shared cell before it runs, so it never
/// executes under a borrow and never sees a partially cleared cache.
pub(super) fn on_context_changed<P>(lifecycle: &SharedLifecycle<P>, change: ContextChange) {
    let (mut listener, epoch) = {
        let mut state = lifecycle.borrow_mut();
        if change.is_lost() {
            let dropped = state.shaders.clear();
            log::warn!("graphics context lost; dropped {dropped} cached shader program(s)");
        } else {
            log::info!("graphics context restored");
        }
        (state.listener.take(), state.listener_epoch)
    };

    if let Some(listener) = listener.as_mut() {
        listener(change);
    }

    let mut state = lifecycle.borrow_mut();
    if state.listener_epoch == epoch {
        state.listener = listener;
    }
}

/// Builds the handler installed on a freshly created surface.
///
/// Loss prevents the platform default so the context may be restored later;
/// the context menu is suppressed and otherwise ignored.
pub(super) fn surface_event_handler<P: 'static>(lifecycle: Weak<RefCell<Lifecycle<P>>>) -> SurfaceEventHandler {
    Box::new(move |event| {
        let change = match event {
            SurfaceEvent::ContextLost => ContextChange::Lost,
            SurfaceEvent::ContextRestored => ContextChange::Restored,
            SurfaceEvent::ContextMenu => return Propagation::PreventDefault,
        };
        if let Some(lifecycle) = lifecycle.upgrade() {
            on_context_changed(&lifecycle, change);
        }
        match change {
            ContextChange::Lost => Propagation::PreventDefault,
            ContextChange::Restored => Propagation::Continue,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<ContextChange>>>, ContextListener) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, Box::new(move |change| sink.borrow_mut().push(change)))
    }

    #[test]
    fn loss_clears_cache_before_listener_runs() {
        let lifecycle: SharedLifecycle<u32> = Lifecycle::shared();
        lifecycle.borrow_mut().shaders.insert("solid", 1);

        let observed = Rc::new(Cell::new(usize::MAX));
        let probe = Rc::downgrade(&lifecycle);
        let sink = Rc::clone(&observed);
        lifecycle.borrow_mut().set_listener(Some(Box::new(move |_: ContextChange| {
            if let Some(l) = probe.upgrade() {
                sink.set(l.borrow().shaders.len());
            }
        })));

        on_context_changed(&lifecycle, ContextChange::Lost);
        assert_eq!(observed.get(), 0);
    }

    #[test]
    fn restore_keeps_cache_and_notifies() {
        let lifecycle: SharedLifecycle<u32> = Lifecycle::shared();
        lifecycle.borrow_mut().shaders.insert("solid", 1);
        let (seen, listener) = recorder();
        lifecycle.borrow_mut().set_listener(Some(listener));

        on_context_changed(&lifecycle, ContextChange::Restored);
        assert_eq!(*seen.borrow(), [ContextChange::Restored]);
        assert_eq!(lifecycle.borrow().shaders.len(), 1);
        assert!(lifecycle.borrow().has_listener());
    }

    #[test]
    fn listener_replaced_during_dispatch_wins() {
        let lifecycle: SharedLifecycle<u32> = Lifecycle::shared();
        let (seen, replacement) = recorder();
        let slot = Rc::new(RefCell::new(Some(replacement)));
        let probe = Rc::downgrade(&lifecycle);
        let pending = Rc::clone(&slot);
        lifecycle.borrow_mut().set_listener(Some(Box::new(move |_: ContextChange| {
            if let (Some(l), Some(next)) = (probe.upgrade(), pending.borrow_mut().take()) {
                l.borrow_mut().set_listener(Some(next));
            }
        })));

        on_context_changed(&lifecycle, ContextChange::Lost);
        on_context_changed(&lifecycle, ContextChange::Restored);
        assert_eq!(*seen.borrow(), [ContextChange::Restored]);
    }

    #[test]
    fn handler_suppresses_context_menu_without_notifying() {
        let lifecycle: SharedLifecycle<u32> = Lifecycle::shared();
        let (seen, listener) = recorder();
        lifecycle.borrow_mut().set_listener(Some(listener));
        let mut handler = surface_event_handler(Rc::downgrade(&lifecycle));

        assert_eq!(handler(SurfaceEvent::ContextMenu), Propagation::PreventDefault);
        assert!(seen.borrow().is_empty());
        assert_eq!(handler(SurfaceEvent::ContextLost), Propagation::PreventDefault);
        assert_eq!(handler(SurfaceEvent::ContextRestored), Propagation::Continue);
        assert_eq!(*seen.borrow(), [ContextChange::Lost, ContextChange::Restored]);
    }

    #[test]
    fn handler_outliving_provider_state_is_inert() {
        let lifecycle: SharedLifecycle<u32> = Lifecycle::shared();
        let mut handler = surface_event_handler(Rc::downgrade(&lifecycle));
        drop(lifecycle);
        assert_eq!(handler(SurfaceEvent::ContextLost), Propagation::PreventDefault);
    }
}
