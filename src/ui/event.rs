use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Why the backend asks an overlay to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissReason {
    OutsideClick,
    EscapeKey,
    FocusLost,
}

#[derive(Clone, Default)]
pub struct EventMeta {
    propagation_stopped: Rc<Cell<bool>>,
}

impl fmt::Debug for EventMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventMeta")
            .field("propagation_stopped", &self.propagation_stopped.get())
            .finish()
    }
}

impl EventMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped.set(true);
    }
}

#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub meta: EventMeta,
    pub position: Vec2,
}

impl ClickEvent {
    pub fn at(position: Vec2) -> Self {
        Self {
            meta: EventMeta::new(),
            position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DismissRequestEvent {
    pub meta: EventMeta,
    pub reason: DismissReason,
}

impl DismissRequestEvent {
    pub fn new(reason: DismissReason) -> Self {
        Self {
            meta: EventMeta::new(),
            reason,
        }
    }
}

#[derive(Clone)]
pub struct ClickHandlerProp {
    id: u64,
    handler: Rc<RefCell<dyn FnMut(&mut ClickEvent)>>,
}

#[derive(Clone)]
pub struct DismissHandlerProp {
    id: u64,
    handler: Rc<RefCell<dyn FnMut(&mut DismissRequestEvent)>>,
}

fn next_handler_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

macro_rules! impl_handler_prop {
    ($ty:ident, $event_ty:ty) => {
        impl $ty {
            pub fn new<F>(handler: F) -> Self
            where
                F: for<'a> FnMut(&'a mut $event_ty) + 'static,
            {
                Self {
                    id: next_handler_id(),
                    handler: Rc::new(RefCell::new(handler)),
                }
            }

            pub fn id(&self) -> u64 {
                self.id
            }

            pub fn call(&self, event: &mut $event_ty) {
                (self.handler.borrow_mut())(event);
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($ty))
                    .field("id", &self.id)
                    .finish()
            }
        }

        impl<F> From<F> for $ty
        where
            F: for<'a> FnMut(&'a mut $event_ty) + 'static,
        {
            fn from(handler: F) -> Self {
                $ty::new(handler)
            }
        }
    };
}

impl_handler_prop!(ClickHandlerProp, ClickEvent);
impl_handler_prop!(DismissHandlerProp, DismissRequestEvent);

pub fn on_click<F>(handler: F) -> ClickHandlerProp
where
    F: for<'a> FnMut(&'a mut ClickEvent) + 'static,
{
    ClickHandlerProp::new(handler)
}

pub fn on_dismiss_request<F>(handler: F) -> DismissHandlerProp
where
    F: for<'a> FnMut(&'a mut DismissRequestEvent) + 'static,
{
    DismissHandlerProp::new(handler)
}
