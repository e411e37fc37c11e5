extern crate crayon_tree;

use crayon_tree::prelude::*;

struct Fixture {
    tree: SceneTree,
    player: NodeId,
    sprite: NodeId,
    hud: NodeId,
}

// root <- (player <- (sprite), ui <- (hud))
fn fixture() -> Fixture {
    let mut tree = SceneTree::new(Node::new("root"), &Settings::default()).unwrap();
    let root = tree.root();

    let player = tree.create(Node::new("player"));
    let sprite = tree.create(Node::new("sprite"));
    let ui = tree.create(Node::new("ui"));
    let hud = tree.create(Node::new("hud"));

    tree.add_child(root, player, false).unwrap();
    tree.add_child(player, sprite, false).unwrap();
    tree.add_child(root, ui, false).unwrap();
    tree.add_child(ui, hud, false).unwrap();

    Fixture {
        tree,
        player,
        sprite,
        hud,
    }
}

#[test]
fn relative() {
    let Fixture {
        tree,
        player,
        sprite,
        hud,
    } = fixture();

    assert_eq!(tree.find_node(player, "sprite"), Some(sprite));
    assert_eq!(tree.find_node(player, "./sprite"), Some(sprite));
    assert_eq!(tree.find_node(sprite, ".."), Some(player));
    assert_eq!(tree.find_node(sprite, "../../ui/hud"), Some(hud));
    assert_eq!(tree.find_node(player, "sprite//"), Some(sprite));
    assert_eq!(tree.find_node(player, ""), Some(player));
    assert_eq!(tree.find_node(player, "."), Some(player));

    assert_eq!(tree.find_node(player, "hud"), None);
    assert_eq!(tree.find_node(tree.root(), ".."), None);
    assert!(tree.has_node(player, "sprite"));
    assert!(!tree.has_node(player, "missing"));
}

#[test]
fn absolute() {
    let Fixture {
        tree, sprite, hud, ..
    } = fixture();

    assert_eq!(tree.find_node(hud, "/"), Some(tree.root()));
    assert_eq!(tree.find_node(hud, "/player/sprite"), Some(sprite));
    assert_eq!(tree.find_node(hud, "/player/sprite/.."), tree.find_node(hud, "/player"));

    // The root's own name is not part of absolute paths.
    assert_eq!(tree.find_node(hud, "/root/player"), None);

    assert_eq!(tree.path_of(sprite).unwrap(), "/player/sprite");
    assert_eq!(tree.path_of(tree.root()).unwrap(), "/");
    assert_eq!(
        tree.find_node(tree.root(), &tree.path_of(hud).unwrap()),
        Some(hud)
    );
}

#[test]
fn parsed_paths() {
    let Fixture {
        tree, player, hud, ..
    } = fixture();

    let path = NodePath::parse("/ui//./hud/");
    assert!(path.is_absolute());
    assert_eq!(path.segments().collect::<Vec<_>>(), vec!["ui", "hud"]);
    assert_eq!(path.to_string(), "/ui/hud");
    assert_eq!(tree.find_node_path(player, &path), Some(hud));

    let path: NodePath = "../ui".into();
    assert!(!path.is_absolute());
    assert_eq!(tree.find_node_path(player, &path), tree.find_node(hud, ".."));

    assert!(NodePath::parse(".").is_empty());
    assert_eq!(NodePath::parse("").to_string(), ".");
}

#[test]
fn get_node() {
    let Fixture {
        mut tree,
        player,
        sprite,
        ..
    } = fixture();

    assert_eq!(tree.get_node(player, "sprite").unwrap(), sprite);
    match tree.get_node(player, "nope/sprite") {
        Err(Error::PathNotFound(path)) => assert_eq!(path, "nope/sprite"),
        other => panic!("unexpected {:?}", other),
    }

    tree.set_name(sprite, "body").unwrap();
    assert_eq!(tree.find_node(player, "body"), Some(sprite));
    assert_eq!(tree.find_node(player, "sprite"), None);
    assert_eq!(tree.child_by_name(player, "body"), Some(sprite));

    // Detached nodes have no absolute path.
    tree.remove_child(player, sprite).unwrap();
    assert_eq!(tree.path_of(sprite), None);

    tree.queue_free(sprite).unwrap();
    assert!(tree.get_node(sprite, ".").is_err());
}
