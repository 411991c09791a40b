use rustc_hash::{FxHashMap, FxHashSet};
use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::ui::{IntoPropValue, PropValue, SharedPropValue};

macro_rules! state_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<T: 'static> {
            cell: Rc<RefCell<T>>,
        }

        impl<T: 'static> Clone for $name<T> {
            fn clone(&self) -> Self {
                Self {
                    cell: Rc::clone(&self.cell),
                }
            }
        }

        impl<T: Clone + 'static> $name<T> {
            pub fn get(&self) -> T {
                self.cell.borrow().clone()
            }

            /// Replaces the value and schedules a redraw.
            pub fn set(&self, value: T) {
                drop(self.cell.replace(value));
                notify_state_changed();
            }

            pub fn update(&self, updater: impl FnOnce(&mut T)) {
                updater(&mut *self.cell.borrow_mut());
                notify_state_changed();
            }

            pub fn binding(&self) -> Binding<T> {
                Binding {
                    cell: Rc::clone(&self.cell),
                }
            }
        }

        impl<T: 'static> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))
            }
        }

        impl<T: 'static> PartialEq for $name<T> {
            fn eq(&self, other: &Self) -> bool {
                Rc::ptr_eq(&self.cell, &other.cell)
            }
        }
    };
}

state_handle!(
    /// Shared handle onto a piece of UI state, passed down to children and
    /// captured by event handlers.
    Binding
);
state_handle!(
    /// Hook slot owned by one component instance.
    State
);
state_handle!(
    /// Per-thread state keyed by type, shared by every component.
    GlobalState
);

impl<T: 'static> Binding<T> {
    pub fn new(initial: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(initial)),
        }
    }
}

impl<T: Clone + 'static> State<T> {
    /// Mutates without scheduling a redraw. Meant for bookkeeping done while
    /// rendering, where a redraw request would loop.
    pub fn update_quiet<R>(&self, updater: impl FnOnce(&mut T) -> R) -> R {
        updater(&mut *self.cell.borrow_mut())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ComponentKey {
    type_id: TypeId,
    path: Vec<usize>,
}

struct Frame {
    key: ComponentKey,
    child_cursor: usize,
    hook_cursor: usize,
}

#[derive(Default)]
struct StateStore {
    slots: FxHashMap<ComponentKey, Vec<Box<dyn Any>>>,
    frames: Vec<Frame>,
    build_depth: usize,
    root_cursor: usize,
    live_keys: FxHashSet<ComponentKey>,
}

thread_local! {
    static STORE: RefCell<StateStore> = RefCell::new(StateStore::default());
    static GLOBAL_STORE: RefCell<FxHashMap<TypeId, Box<dyn Any>>> =
        RefCell::new(FxHashMap::default());
    static REDRAW_CALLBACK: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
    static STATE_DIRTY: Cell<bool> = const { Cell::new(false) };
}

/// Runs one tree build. Hook slots of components not rendered during the
/// outermost scope are dropped at its end.
pub fn build_scope<R>(f: impl FnOnce() -> R) -> R {
    STORE.with(|store| {
        let mut store = store.borrow_mut();
        if store.build_depth == 0 {
            store.root_cursor = 0;
            store.live_keys.clear();
        }
        store.build_depth += 1;
    });

    let out = f();

    STORE.with(|store| {
        let mut store = store.borrow_mut();
        store.build_depth = store.build_depth.saturating_sub(1);
        if store.build_depth == 0 {
            let StateStore {
                slots, live_keys, ..
            } = &mut *store;
            slots.retain(|key, _| live_keys.contains(key));
        }
    });

    out
}

/// Gives `f` a hook frame keyed by component type and tree position.
pub fn render_component<T: 'static, R>(f: impl FnOnce() -> R) -> R {
    STORE.with(|store| {
        let mut store = store.borrow_mut();
        let child_path = store.frames.last_mut().map(|parent| {
            let mut path = parent.key.path.clone();
            path.push(parent.child_cursor);
            parent.child_cursor += 1;
            path
        });
        let path = child_path.unwrap_or_else(|| {
            let index = store.root_cursor;
            store.root_cursor += 1;
            vec![index]
        });
        let key = ComponentKey {
            type_id: TypeId::of::<T>(),
            path,
        };
        store.live_keys.insert(key.clone());
        store.frames.push(Frame {
            key,
            child_cursor: 0,
            hook_cursor: 0,
        });
    });

    struct FrameGuard;
    impl Drop for FrameGuard {
        fn drop(&mut self) {
            STORE.with(|store| {
                let _ = store.borrow_mut().frames.pop();
            });
        }
    }
    let _guard = FrameGuard;
    f()
}

pub fn use_state<T: Clone + 'static>(init: impl FnOnce() -> T) -> State<T> {
    STORE.with(|store| {
        let mut store = store.borrow_mut();
        let frame = store
            .frames
            .last_mut()
            .expect("use_state() must be called inside a component render");
        let index = frame.hook_cursor;
        frame.hook_cursor += 1;
        let key = frame.key.clone();

        let slots = store.slots.entry(key).or_default();
        if slots.len() <= index {
            slots.push(Box::new(Rc::new(RefCell::new(init()))));
        }
        let cell = slots[index]
            .downcast_ref::<Rc<RefCell<T>>>()
            .unwrap_or_else(|| panic!("use_state slot type mismatch at index {index}"))
            .clone();
        State { cell }
    })
}

pub fn global_state<T: Clone + 'static>(init: impl FnOnce() -> T) -> GlobalState<T> {
    GLOBAL_STORE.with(|store| {
        let mut store = store.borrow_mut();
        let entry = store
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Rc::new(RefCell::new(init()))) as Box<dyn Any>);
        let cell = entry
            .downcast_ref::<Rc<RefCell<T>>>()
            .unwrap_or_else(|| {
                panic!(
                    "global_state type mismatch for {}",
                    std::any::type_name::<T>()
                )
            })
            .clone();
        GlobalState { cell }
    })
}

pub fn try_use_global_state<T: Clone + 'static>() -> Option<GlobalState<T>> {
    GLOBAL_STORE.with(|store| {
        let store = store.borrow();
        let cell = store
            .get(&TypeId::of::<T>())?
            .downcast_ref::<Rc<RefCell<T>>>()?
            .clone();
        Some(GlobalState { cell })
    })
}

pub fn use_global_state<T: Clone + 'static>() -> GlobalState<T> {
    try_use_global_state::<T>().unwrap_or_else(|| {
        panic!(
            "use_global_state::<{}>() called before global_state initialization",
            std::any::type_name::<T>()
        )
    })
}

/// Removes a global entry, returning whether one existed.
pub fn clear_global_state<T: 'static>() -> bool {
    GLOBAL_STORE.with(|store| store.borrow_mut().remove(&TypeId::of::<T>()).is_some())
}

pub fn set_redraw_callback<F>(callback: F)
where
    F: Fn() + 'static,
{
    REDRAW_CALLBACK.with(|slot| {
        *slot.borrow_mut() = Some(Rc::new(callback));
    });
}

pub fn clear_redraw_callback() {
    REDRAW_CALLBACK.with(|slot| {
        *slot.borrow_mut() = None;
    });
}

pub fn take_state_dirty() -> bool {
    STATE_DIRTY.with(|dirty| dirty.replace(false))
}

fn notify_state_changed() {
    STATE_DIRTY.with(|dirty| dirty.set(true));
    let callback = REDRAW_CALLBACK.with(|slot| slot.borrow().clone());
    if let Some(callback) = callback {
        callback();
    }
}

impl<T: Clone + 'static> IntoPropValue for Binding<T> {
    fn into_prop_value(self) -> PropValue {
        let erased: Rc<dyn Any> = self.cell.clone();
        PropValue::Shared(SharedPropValue::new(erased))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter;
    struct Other;

    #[test]
    fn binding_writes_reach_the_redraw_callback() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        set_redraw_callback(move || seen.set(seen.get() + 1));
        let binding = Binding::new(1_u8);
        binding.set(2);
        binding.update(|value| *value += 1);
        clear_redraw_callback();
        binding.set(4);
        assert_eq!(calls.get(), 2);
        assert_eq!(binding.get(), 4);
        assert!(take_state_dirty());
    }

    #[test]
    fn use_state_survives_rebuilds_at_same_position() {
        let first = build_scope(|| {
            render_component::<Counter, _>(|| {
                let value = use_state(|| 0_i32);
                value.set(7);
                value
            })
        });
        assert_eq!(first.get(), 7);
        assert!(take_state_dirty());

        let second = build_scope(|| render_component::<Counter, _>(|| use_state(|| 0_i32)));
        assert_eq!(second.get(), 7);
        assert_eq!(first, second);
    }

    #[test]
    fn unrendered_components_lose_their_state() {
        build_scope(|| {
            render_component::<Counter, _>(|| use_state(|| 1_u8).set(5));
        });
        build_scope(|| {
            render_component::<Other, _>(|| use_state(|| 0_u8));
        });
        let fresh = build_scope(|| render_component::<Counter, _>(|| use_state(|| 1_u8)));
        assert_eq!(fresh.get(), 1);
    }

    #[test]
    fn nested_components_get_distinct_slots() {
        let (outer, inner) = build_scope(|| {
            render_component::<Counter, _>(|| {
                let outer = use_state(|| "outer");
                let inner = render_component::<Counter, _>(|| use_state(|| "inner"));
                (outer.get(), inner.get())
            })
        });
        assert_eq!((outer, inner), ("outer", "inner"));
    }

    #[test]
    fn quiet_updates_do_not_mark_dirty() {
        let state = build_scope(|| render_component::<Other, _>(|| use_state(|| 0_u32)));
        let _ = take_state_dirty();
        state.update_quiet(|value| *value += 1);
        assert!(!take_state_dirty());
        assert_eq!(state.get(), 1);
    }

    #[test]
    fn global_state_is_initialised_once() {
        #[derive(Clone, Debug, PartialEq)]
        struct Tokens(u32);

        assert!(try_use_global_state::<Tokens>().is_none());
        global_state(|| Tokens(3));
        global_state(|| Tokens(9));
        assert_eq!(use_global_state::<Tokens>().get(), Tokens(3));
        assert!(clear_global_state::<Tokens>());
        assert!(try_use_global_state::<Tokens>().is_none());
    }
}
