//! Observer lists with reentrancy-safe emission.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// An opaque token identifying one connection to a `Signal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Connection(u64);

struct Slot<T> {
    id: u64,
    callback: Rc<dyn Fn(&T)>,
    once: bool,
    alive: bool,
}

struct Inner<T> {
    slots: RefCell<Vec<Slot<T>>>,
    depth: Cell<u32>,
    tombstones: Cell<bool>,
    next_id: Cell<u64>,
}

/// A list of callbacks invoked, in connection order, every time the signal is
/// emitted.
///
/// `Signal` is a cheap, clonable handle: clones observe the same list. A
/// callback may connect, disconnect or emit again on the very signal that is
/// invoking it. Slots connected during an emission are not invoked by it, and
/// slots disconnected during an emission are skipped from that point on. A
/// nested emission reaches every live slot, the running one included. Dead
/// slots are tombstoned and only compacted once the outermost emission
/// returns.
pub struct Signal<T = ()> {
    inner: Rc<Inner<T>>,
}

/// A non-owning handle to a `Signal`, suitable for capture inside the
/// signal's own callbacks without forming a reference cycle.
pub struct WeakSignal<T = ()> {
    inner: Weak<Inner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Signal {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Signal::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.len())
            .field("depth", &self.inner.depth.get())
            .finish()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Signal {
            inner: Rc::new(Inner {
                slots: RefCell::new(Vec::new()),
                depth: Cell::new(0),
                tombstones: Cell::new(false),
                next_id: Cell::new(1),
            }),
        }
    }

    /// Connects a callback that stays until explicitly disconnected.
    pub fn connect<F>(&self, callback: F) -> Connection
    where
        F: Fn(&T) + 'static,
    {
        self.push(Rc::new(callback), false)
    }

    /// Connects a callback that disconnects itself after its first invocation.
    pub fn connect_once<F>(&self, callback: F) -> Connection
    where
        F: Fn(&T) + 'static,
    {
        self.push(Rc::new(callback), true)
    }

    fn push(&self, callback: Rc<dyn Fn(&T)>, once: bool) -> Connection {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        self.inner.slots.borrow_mut().push(Slot {
            id,
            callback,
            once,
            alive: true,
        });

        Connection(id)
    }

    /// Disconnects a callback. Disconnecting twice, or disconnecting a token
    /// from another signal, does nothing and returns false.
    pub fn disconnect(&self, connection: Connection) -> bool {
        let removed = {
            let mut slots = self.inner.slots.borrow_mut();
            match slots
                .iter_mut()
                .find(|slot| slot.alive && slot.id == connection.0)
            {
                Some(slot) => {
                    slot.alive = false;
                    true
                }
                None => false,
            }
        };

        if removed {
            self.inner.tombstones.set(true);
            self.compact();
        }

        removed
    }

    /// Disconnects every callback.
    pub fn clear(&self) {
        for slot in self.inner.slots.borrow_mut().iter_mut() {
            slot.alive = false;
        }

        self.inner.tombstones.set(true);
        self.compact();
    }

    pub fn is_connected(&self, connection: Connection) -> bool {
        self.inner
            .slots
            .borrow()
            .iter()
            .any(|slot| slot.alive && slot.id == connection.0)
    }

    /// The number of live connections.
    pub fn len(&self) -> usize {
        self.inner
            .slots
            .borrow()
            .iter()
            .filter(|slot| slot.alive)
            .count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true while an emission of this signal is on the stack.
    #[inline]
    pub fn is_emitting(&self) -> bool {
        self.inner.depth.get() > 0
    }

    pub fn downgrade(&self) -> WeakSignal<T> {
        WeakSignal {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Invokes every live callback connected before this call, in connection
    /// order.
    pub fn emit(&self, arg: &T) {
        let inner = &*self.inner;
        inner.depth.set(inner.depth.get() + 1);

        let len = inner.slots.borrow().len();
        for i in 0..len {
            let callback = {
                let mut slots = inner.slots.borrow_mut();
                let slot = &mut slots[i];
                if !slot.alive {
                    continue;
                }

                if slot.once {
                    slot.alive = false;
                    inner.tombstones.set(true);
                }

                slot.callback.clone()
            };

            // The slot list stays unborrowed while the callback runs.
            callback(arg);
        }

        inner.depth.set(inner.depth.get() - 1);
        self.compact();
    }

    fn compact(&self) {
        let inner = &*self.inner;
        if inner.depth.get() == 0 && inner.tombstones.replace(false) {
            inner.slots.borrow_mut().retain(|slot| slot.alive);
        }
    }
}

impl<T> Clone for WeakSignal<T> {
    fn clone(&self) -> Self {
        WeakSignal {
            inner: self.inner.clone(),
        }
    }
}

impl<T> WeakSignal<T> {
    pub fn upgrade(&self) -> Option<Signal<T>> {
        self.inner.upgrade().map(|inner| Signal { inner })
    }
}
