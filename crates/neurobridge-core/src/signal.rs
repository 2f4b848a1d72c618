//! Single-threaded observable progress values.
//!
//! Listeners are registered with `on_change`, which hands back an
//! `Unsubscribe` guard. Dropping the guard removes the listener, so teardown
//! does not depend on any UI framework lifecycle.
//!
//! Listener code never runs while the shared cell is borrowed: closures are
//! called from a detached list and removed closures are dropped only after the
//! borrow ends. A listener may therefore set the signal, subscribe, or drop
//! guards (its own included).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Box<dyn FnMut(f32)>;

#[derive(Default)]
struct Inner {
    value: f32,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    dispatching: bool,
    pending: bool,
    removed: Vec<u64>,
}

impl Inner {
    /// Detach listeners matching `remove`; the caller drops them unborrowed.
    fn detach(&mut self, remove: impl Fn(u64) -> bool) -> Vec<(u64, Listener)> {
        let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.listeners)
            .into_iter()
            .partition(|(id, _)| remove(*id));
        self.listeners = kept;
        gone
    }
}

/// Shared `f32` that notifies listeners when it changes.
#[derive(Clone, Default)]
pub struct ProgressSignal {
    inner: Rc<RefCell<Inner>>,
}

impl ProgressSignal {
    pub fn new(initial: f32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value: initial,
                ..Inner::default()
            })),
        }
    }

    pub fn get(&self) -> f32 {
        self.inner.borrow().value
    }

    /// Store `value` and notify listeners if it differs from the current one.
    ///
    /// A `set` made by a listener is stored at once; listeners hear about it
    /// in another pass after the running one finishes.
    pub fn set(&self, value: f32) {
        let mut listeners = {
            let mut inner = self.inner.borrow_mut();
            if inner.value.to_bits() == value.to_bits() {
                return;
            }
            inner.value = value;
            if inner.dispatching {
                inner.pending = true;
                return;
            }
            inner.dispatching = true;
            std::mem::take(&mut inner.listeners)
        };

        let mut value = value;
        loop {
            for (id, listener) in listeners.iter_mut() {
                if self.inner.borrow().removed.contains(id) {
                    continue;
                }
                listener(value);
            }

            let detached: Vec<(u64, Listener)>;
            let again = {
                let mut inner = self.inner.borrow_mut();
                let added = std::mem::take(&mut inner.listeners);
                listeners.extend(added);
                let removed = std::mem::take(&mut inner.removed);
                let (gone, kept): (Vec<_>, Vec<_>) = listeners
                    .into_iter()
                    .partition(|(id, _)| removed.contains(id));
                listeners = kept;
                detached = gone;

                let again = inner.pending && inner.value.to_bits() != value.to_bits();
                inner.pending = false;
                if again {
                    value = inner.value;
                } else {
                    inner.listeners = std::mem::take(&mut listeners);
                    inner.dispatching = false;
                }
                again
            };
            drop(detached);
            if !again {
                return;
            }
        }
    }

    pub fn on_change(&self, listener: impl FnMut(f32) + 'static) -> Unsubscribe {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Box::new(listener)));
        Unsubscribe {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Drop every listener, including ones whose guards are still alive.
    pub fn clear(&self) {
        let detached = {
            let mut inner = self.inner.borrow_mut();
            if inner.dispatching {
                let ids: Vec<u64> = (0..inner.next_id).collect();
                inner.removed.extend(ids);
            }
            inner.detach(|_| true)
        };
        drop(detached);
    }
}

/// Guard returned by `ProgressSignal::on_change`.
#[must_use = "dropping the guard removes the listener immediately"]
pub struct Unsubscribe {
    inner: Weak<RefCell<Inner>>,
    id: u64,
}

impl Unsubscribe {
    pub fn unsubscribe(self) {}
}

impl Drop for Unsubscribe {
    fn drop(&mut self) {
        let Some(cell) = self.inner.upgrade() else {
            return;
        };
        let id = self.id;
        let detached = {
            // Cannot fail: no listener code runs while the cell is borrowed.
            let mut inner = cell.borrow_mut();
            if inner.dispatching {
                inner.removed.push(id);
            }
            inner.detach(|listener_id| listener_id == id)
        };
        drop(detached);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn notifies_only_on_change() {
        let signal = ProgressSignal::new(0.0);
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let _guard = signal.on_change(move |_| seen.set(seen.get() + 1));

        signal.set(0.25);
        signal.set(0.25);
        signal.set(0.5);

        assert_eq!(calls.get(), 2);
        assert_eq!(signal.get(), 0.5);
    }

    #[test]
    fn dropping_guard_unsubscribes() {
        let signal = ProgressSignal::new(0.0);
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let guard = signal.on_change(move |_| seen.set(seen.get() + 1));
        assert_eq!(signal.listener_count(), 1);

        guard.unsubscribe();
        signal.set(1.0);

        assert_eq!(signal.listener_count(), 0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn listener_can_unsubscribe_itself_during_dispatch() {
        let signal = ProgressSignal::new(0.0);
        let slot: Rc<RefCell<Option<Unsubscribe>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let slot_in_listener = Rc::clone(&slot);
        let seen = Rc::clone(&calls);
        let guard = signal.on_change(move |_| {
            seen.set(seen.get() + 1);
            slot_in_listener.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(guard);

        signal.set(0.1);
        signal.set(0.2);

        assert_eq!(calls.get(), 1);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn guard_outliving_signal_is_harmless() {
        let signal = ProgressSignal::new(0.0);
        let guard = signal.on_change(|_| {});
        drop(signal);
        drop(guard);
    }

    #[test]
    fn set_from_listener_reaches_every_listener() {
        let signal = ProgressSignal::new(0.0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let nested = signal.clone();
        let redirect = signal.on_change(move |value| {
            if value == 0.1 {
                nested.set(0.9);
            }
        });
        let recorded = Rc::clone(&seen);
        let _record = signal.on_change(move |value| recorded.borrow_mut().push(value));

        signal.set(0.1);

        assert_eq!(signal.get(), 0.9);
        assert_eq!(*seen.borrow(), vec![0.1, 0.9]);

        signal.set(0.5);
        assert_eq!(*seen.borrow(), vec![0.1, 0.9, 0.5]);
        drop(redirect);
    }

    #[test]
    fn set_back_to_dispatched_value_is_not_repeated() {
        let signal = ProgressSignal::new(0.0);
        let calls = Rc::new(Cell::new(0));

        let nested = signal.clone();
        let _bounce = signal.on_change(move |value| {
            if value == 0.3 {
                nested.set(0.6);
                nested.set(0.3);
            }
        });
        let seen = Rc::clone(&calls);
        let _count = signal.on_change(move |_| seen.set(seen.get() + 1));

        signal.set(0.3);

        assert_eq!(signal.get(), 0.3);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn guard_held_by_dropped_listener_unsubscribes() {
        let signal = ProgressSignal::new(0.0);
        let inner_guard = signal.on_change(|_| {});
        let outer_guard = signal.on_change(move |_| {
            let _held = &inner_guard;
        });
        assert_eq!(signal.listener_count(), 2);

        drop(outer_guard);

        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn clear_drops_listeners_holding_guards() {
        let signal = ProgressSignal::new(0.0);
        let other = ProgressSignal::new(0.0);
        let other_guard = other.on_change(|_| {});
        let _guard = signal.on_change(move |_| {
            let _held = &other_guard;
        });

        signal.clear();

        assert_eq!(signal.listener_count(), 0);
        assert_eq!(other.listener_count(), 0);
    }
}
