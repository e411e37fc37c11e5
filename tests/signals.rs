extern crate crayon_tree;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crayon_tree::prelude::*;

#[test]
fn connect_and_disconnect() {
    let signal: Signal<i32> = Signal::new();
    let sum = Rc::new(Cell::new(0));

    let s = sum.clone();
    let c1 = signal.connect(move |v| s.set(s.get() + *v));
    let s = sum.clone();
    let c2 = signal.connect(move |v| s.set(s.get() + *v * 10));
    assert_eq!(signal.len(), 2);

    signal.emit(&1);
    assert_eq!(sum.get(), 11);

    assert!(signal.disconnect(c1));
    assert!(!signal.disconnect(c1));
    assert!(!signal.is_connected(c1));
    assert!(signal.is_connected(c2));

    signal.emit(&1);
    assert_eq!(sum.get(), 21);

    signal.clear();
    assert!(signal.is_empty());
    signal.emit(&1);
    assert_eq!(sum.get(), 21);
}

#[test]
fn once() {
    let signal: Signal<()> = Signal::new();
    let count = Rc::new(Cell::new(0));

    let c = count.clone();
    let connection = signal.connect_once(move |_| c.set(c.get() + 1));
    assert!(signal.is_connected(connection));

    signal.emit(&());
    signal.emit(&());
    assert_eq!(count.get(), 1);
    assert!(!signal.is_connected(connection));
    assert!(signal.is_empty());
}

#[test]
fn disconnect_during_emission() {
    let signal: Signal<()> = Signal::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    let victim = Rc::new(Cell::new(None));

    let o = order.clone();
    signal.connect(move |_| o.borrow_mut().push("first"));

    {
        let weak = signal.downgrade();
        let victim = victim.clone();
        let order = order.clone();
        signal.connect(move |_| {
            order.borrow_mut().push("second");
            if let (Some(signal), Some(connection)) = (weak.upgrade(), victim.get()) {
                signal.disconnect(connection);
            }
        });
    }

    let o = order.clone();
    victim.set(Some(signal.connect(move |_| o.borrow_mut().push("third"))));

    signal.emit(&());
    assert_eq!(*order.borrow(), vec!["first", "second"]);
    assert_eq!(signal.len(), 2);

    signal.emit(&());
    assert_eq!(order.borrow().len(), 4);
}

#[test]
fn connect_during_emission() {
    let signal: Signal<()> = Signal::new();
    let count = Rc::new(Cell::new(0));

    {
        let weak = signal.downgrade();
        let count = count.clone();
        signal.connect_once(move |_| {
            if let Some(signal) = weak.upgrade() {
                let count = count.clone();
                signal.connect(move |_| count.set(count.get() + 1));
            }
        });
    }

    // The late slot waits for the next emission.
    signal.emit(&());
    assert_eq!(count.get(), 0);
    assert_eq!(signal.len(), 1);

    signal.emit(&());
    assert_eq!(count.get(), 1);
}

#[test]
fn reentrant_emission() {
    let signal: Signal<u32> = Signal::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    {
        let weak = signal.downgrade();
        let seen = seen.clone();
        signal.connect(move |v| {
            seen.borrow_mut().push(("outer", *v));
            if *v == 0 {
                if let Some(signal) = weak.upgrade() {
                    assert!(signal.is_emitting());
                    signal.emit(&1);
                }
            }
        });
    }

    let s = seen.clone();
    signal.connect(move |v| s.borrow_mut().push(("inner", *v)));

    signal.emit(&0);

    // The nested emission runs every slot, the re-emitting one included,
    // before the outer emission moves on.
    assert_eq!(
        *seen.borrow(),
        vec![("outer", 0), ("outer", 1), ("inner", 1), ("inner", 0)]
    );
    assert!(!signal.is_emitting());
}

#[test]
fn countdown() {
    let signal: Signal<u32> = Signal::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    {
        let weak = signal.downgrade();
        let seen = seen.clone();
        signal.connect(move |&v| {
            seen.borrow_mut().push(v);
            if v > 0 {
                if let Some(signal) = weak.upgrade() {
                    signal.emit(&(v - 1));
                }
            }
        });
    }

    signal.emit(&2);
    assert_eq!(*seen.borrow(), vec![2, 1, 0]);
    assert_eq!(signal.len(), 1);
}

#[test]
fn weak_signal() {
    let signal: Signal<()> = Signal::new();
    let weak = signal.downgrade();
    assert!(weak.upgrade().is_some());

    let clone = signal.clone();
    drop(signal);
    assert!(weak.upgrade().is_some());

    drop(clone);
    assert!(weak.upgrade().is_none());
}

#[test]
fn tree_signals() {
    let mut tree = SceneTree::new(Node::new("root"), &Settings::default()).unwrap();
    let root = tree.root();
    let added = Rc::new(RefCell::new(Vec::new()));
    let removed = Rc::new(RefCell::new(Vec::new()));

    let a = added.clone();
    tree.signals().node_added.connect(move |&v| a.borrow_mut().push(v));
    let r = removed.clone();
    tree.signals().node_removed.connect(move |&v| r.borrow_mut().push(v));

    let parent = tree.create(Node::new("parent"));
    let child = tree.create(Node::new("child"));
    tree.add_child(parent, child, false).unwrap();
    tree.add_child(root, parent, false).unwrap();
    assert_eq!(*added.borrow(), vec![parent, child]);

    tree.queue_free(parent).unwrap();
    tree.flush_free_queue();
    assert_eq!(*removed.borrow(), vec![parent, child]);
}
