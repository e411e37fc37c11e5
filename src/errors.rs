use failure::Fail;

use crate::scene::NodeId;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{} is invalid.", _0)]
    NodeNotFound(NodeId),
    #[fail(display = "No node found at path '{}'.", _0)]
    PathNotFound(String),
    #[fail(display = "Node can not set self as parent.")]
    CanNotAttachSelfAsParent,
    #[fail(
        display = "{} is an ancestor of {}, attaching it would create a cycle.",
        child, parent
    )]
    CycleDetected { parent: NodeId, child: NodeId },
    #[fail(display = "{} is not a child of {}.", child, parent)]
    NotAChild { parent: NodeId, child: NodeId },
    #[fail(display = "The root node can not be {}.", _0)]
    RootMisuse(&'static str),
    #[fail(display = "{} is not inside the scene tree.", _0)]
    NotInsideTree(NodeId),
    #[fail(display = "{} is not a registered camera.", _0)]
    NotACamera(NodeId),
    #[fail(
        display = "The deferred free queue is full ({} nodes), the node can not be queued.",
        _0
    )]
    FreeQueueOverflow(usize),
    #[fail(
        display = "Parent world scale ({}, {}) has a zero component, the transform can not be inversed.",
        _0, _1
    )]
    DegenerateParentScale(f32, f32),
    #[fail(display = "Invalid settings: {}.", _0)]
    InvalidSettings(&'static str),
    #[fail(display = "{}", _0)]
    Json(serde_json::Error),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
