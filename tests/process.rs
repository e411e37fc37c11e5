extern crate crayon_tree;

use std::cell::RefCell;
use std::rc::Rc;

use crayon_tree::prelude::*;

type Journal = Rc<RefCell<Vec<String>>>;

/// Logs every frame callback, and optionally spawns a child on its first
/// `process` call.
struct Ticker {
    tag: String,
    journal: Journal,
    spawn: Option<&'static str>,
}

impl Ticker {
    fn new<T: Into<String>>(tag: T, journal: &Journal) -> Self {
        Ticker {
            tag: tag.into(),
            journal: journal.clone(),
            spawn: None,
        }
    }
}

impl Component for Ticker {
    fn process(&mut self, tree: &mut SceneTree, owner: NodeId, _: f32) {
        self.journal.borrow_mut().push(format!("process:{}", self.tag));
        if let Some(name) = self.spawn.take() {
            let child = tree.create(Node::new(name).with_component(Ticker::new(name, &self.journal)));
            tree.add_child(owner, child, false).unwrap();
        }
    }

    fn physics_process(&mut self, _: &mut SceneTree, _: NodeId, _: f32) {
        self.journal.borrow_mut().push(format!("physics:{}", self.tag));
    }
}

fn drain(journal: &Journal) -> Vec<String> {
    journal.borrow_mut().drain(..).collect()
}

fn spawn(tree: &mut SceneTree, parent: NodeId, name: &str, mode: ProcessMode, journal: &Journal) -> NodeId {
    let v = tree.create(
        Node::new(name)
            .with_process_mode(mode)
            .with_component(Ticker::new(name, journal)),
    );
    tree.add_child(parent, v, false).unwrap();
    v
}

#[test]
fn pre_order() {
    let journal: Journal = Rc::default();
    let mut tree = SceneTree::new(Node::new("root"), &Settings::default()).unwrap();
    let root = tree.root();

    let a = spawn(&mut tree, root, "a", ProcessMode::Inherit, &journal);
    spawn(&mut tree, a, "a1", ProcessMode::Inherit, &journal);
    spawn(&mut tree, a, "a2", ProcessMode::Inherit, &journal);
    spawn(&mut tree, root, "b", ProcessMode::Inherit, &journal);

    tree.process(0.016);
    assert_eq!(
        drain(&journal),
        vec!["process:a", "process:a1", "process:a2", "process:b"]
    );

    tree.physics_process(0.016);
    assert_eq!(
        drain(&journal),
        vec!["physics:a", "physics:a1", "physics:a2", "physics:b"]
    );
}

#[test]
fn pause_modes() {
    let journal: Journal = Rc::default();
    let mut tree = SceneTree::new(Node::new("root"), &Settings::default()).unwrap();
    let root = tree.root();

    let pausable = spawn(&mut tree, root, "pausable", ProcessMode::Pausable, &journal);
    spawn(&mut tree, pausable, "inherit", ProcessMode::Inherit, &journal);
    spawn(&mut tree, root, "when_paused", ProcessMode::WhenPaused, &journal);
    let always = spawn(&mut tree, root, "always", ProcessMode::Always, &journal);
    spawn(&mut tree, always, "inherit_always", ProcessMode::Inherit, &journal);
    let disabled = spawn(&mut tree, root, "disabled", ProcessMode::Disabled, &journal);
    spawn(&mut tree, disabled, "under_disabled", ProcessMode::Always, &journal);

    tree.process(0.016);
    assert_eq!(
        drain(&journal),
        vec![
            "process:pausable",
            "process:inherit",
            "process:always",
            "process:inherit_always",
            "process:under_disabled",
        ]
    );

    tree.set_paused(true);
    assert!(tree.is_paused());
    tree.process(0.016);
    assert_eq!(
        drain(&journal),
        vec![
            "process:when_paused",
            "process:always",
            "process:inherit_always",
            "process:under_disabled",
        ]
    );

    assert_eq!(tree.effective_process_mode(always), Some(ProcessMode::Always));
    assert_eq!(tree.effective_process_mode(root), Some(ProcessMode::Pausable));
    assert!(!tree.can_process(disabled));
}

#[test]
fn disabled_callbacks() {
    let journal: Journal = Rc::default();
    let mut tree = SceneTree::new(Node::new("root"), &Settings::default()).unwrap();
    let root = tree.root();
    let a = spawn(&mut tree, root, "a", ProcessMode::Inherit, &journal);
    let b = spawn(&mut tree, root, "b", ProcessMode::Inherit, &journal);

    tree.set_process(a, false).unwrap();
    tree.set_physics_process(b, false).unwrap();
    assert!(!tree.node(a).unwrap().is_processing());

    tree.process(0.016);
    tree.physics_process(0.016);
    assert_eq!(drain(&journal), vec!["process:b", "physics:a"]);
}

#[test]
fn added_during_frame_waits() {
    let journal: Journal = Rc::default();
    let mut tree = SceneTree::new(Node::new("root"), &Settings::default()).unwrap();
    let root = tree.root();

    let mut ticker = Ticker::new("spawner", &journal);
    ticker.spawn = Some("late");
    let spawner = tree.create(Node::new("spawner").with_component(ticker));
    tree.add_child(root, spawner, false).unwrap();

    tree.process(0.016);
    assert_eq!(drain(&journal), vec!["process:spawner"]);
    assert_eq!(tree.child_count(spawner), 1);

    tree.process(0.016);
    assert_eq!(drain(&journal), vec!["process:spawner", "process:late"]);
}

#[test]
fn main_loop() {
    let journal: Journal = Rc::default();
    let settings = Settings {
        physics_ticks_per_second: 10,
        max_physics_steps_per_frame: 2,
        ..Settings::default()
    };

    let mut tree = SceneTree::new(Node::new("root"), &settings).unwrap();
    let root = tree.root();
    let a = spawn(&mut tree, root, "a", ProcessMode::Inherit, &journal);

    let mut main_loop = MainLoop::new(&settings);
    let info = main_loop.iteration(&mut tree, &[], 0.25);
    assert_eq!(info.frame, 0);
    assert_eq!(info.physics_steps, 2);
    assert_eq!(
        drain(&journal),
        vec!["physics:a", "physics:a", "process:a"]
    );

    // Less than one tick accumulated.
    let info = main_loop.iteration(&mut tree, &[], 0.02);
    assert_eq!(info.physics_steps, 0);

    let info = main_loop.iteration(&mut tree, &[], 0.06);
    assert_eq!(info.physics_steps, 1);
    assert_eq!(main_loop.frames(), 3);

    tree.queue_free(a).unwrap();
    let info = main_loop.iteration(&mut tree, &[], 0.0);
    assert_eq!(info.freed, 1);
    assert!(!tree.contains(a));
}

#[test]
fn settings() {
    let settings = Settings::from_json(r#"{ "free_queue_capacity": 4 }"#).unwrap();
    assert_eq!(settings.free_queue_capacity, 4);
    assert_eq!(settings.physics_ticks_per_second, 60);

    match Settings::from_json(r#"{ "free_queue_capacity": 0 }"#) {
        Err(Error::InvalidSettings(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(Settings::from_json("{").is_err());

    let invalid = Settings {
        physics_ticks_per_second: 0,
        ..Settings::default()
    };
    assert!(SceneTree::new(Node::new("root"), &invalid).is_err());
}
