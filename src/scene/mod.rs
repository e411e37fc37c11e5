//! The scene tree: a hierarchy of named nodes with lazily evaluated 2D
//! transforms, per-node components, signals and groups.
//!
//! All nodes are owned by a `SceneTree` and addressed with `NodeId` handles.
//! A node is *inside* the tree while its parent chain reaches the root;
//! detached nodes stay alive in the same tree until they are freed.
//!
//! ```ignore
//! let mut tree = SceneTree::new(Node::new("root"), &Settings::default())?;
//! let player = tree.create(Node::new("player").with_group("actors", false));
//! tree.add_component(player, SpriteRenderer::new("player.png"))?;
//! tree.add_child(tree.root(), player, false)?;
//!
//! tree.process(1.0 / 60.0);
//! tree.flush_free_queue();
//! ```

pub mod camera;
pub mod component;
pub mod group;
pub mod id;
pub mod main_loop;
pub mod node;
pub mod path;
pub mod process_mode;
pub mod signal;
pub mod sprite;
pub mod transform;
pub mod tree;

pub use self::camera::Camera2D;
pub use self::component::{Component, ComponentKind};
pub use self::group::GroupIndex;
pub use self::id::NodeId;
pub use self::main_loop::{FrameInfo, MainLoop};
pub use self::node::{Node, NodeSignals};
pub use self::path::NodePath;
pub use self::process_mode::ProcessMode;
pub use self::signal::{Connection, Signal, WeakSignal};
pub use self::sprite::SpriteRenderer;
pub use self::transform::{Transform, Trs, TRANSFORM_QUANTUM};
pub use self::tree::{Ancestors, Descendants, RenderItem, SceneTree, TreeSignals};
