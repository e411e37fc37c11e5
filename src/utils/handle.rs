use std::fmt;
use std::hash::Hash;

/// The index and version width of a `Handle`. Two of them pack a handle into
/// a single 64-bits word.
pub type HandleIndex = u32;

/// A generational reference into a pool: `index` names the slot, `version`
/// tells successive occupants of that slot apart. Pools hand out odd
/// versions only, so the default handle never resolves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
    index: HandleIndex,
    version: HandleIndex,
}

impl Handle {
    #[inline]
    pub fn new(index: HandleIndex, version: HandleIndex) -> Self {
        Handle { index, version }
    }

    #[inline]
    pub fn index(self) -> HandleIndex {
        self.index
    }

    #[inline]
    pub fn version(self) -> HandleIndex {
        self.version
    }

    /// Returns true if the version marks a live slot.
    #[inline]
    pub fn is_alive(self) -> bool {
        self.version & 0x1 == 1
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.version)
    }
}

/// Keys of the generic pools. Everything is derived from the conversions to
/// and from `Handle`, so an implementation is a one-liner.
pub trait HandleLike: fmt::Debug + Copy + Hash + Eq + From<Handle> + Into<Handle> {
    #[inline]
    fn new(index: HandleIndex, version: HandleIndex) -> Self {
        Handle::new(index, version).into()
    }

    #[inline]
    fn index(&self) -> HandleIndex {
        let handle: Handle = (*self).into();
        handle.index()
    }

    #[inline]
    fn version(&self) -> HandleIndex {
        let handle: Handle = (*self).into();
        handle.version()
    }
}

impl HandleLike for Handle {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::hash::FastHashSet;

    #[test]
    fn liveness() {
        let h = Handle::new(2, 3);
        assert_eq!(h.index(), 2);
        assert_eq!(h.version(), 3);
        assert!(h.is_alive());
        assert!(!Handle::new(2, 4).is_alive());
        assert!(!Handle::default().is_alive());
    }

    #[test]
    fn versions_tell_handles_apart() {
        let mut set = FastHashSet::default();
        assert!(set.insert(Handle::new(1, 1)));
        assert!(set.insert(Handle::new(1, 3)));
        assert!(set.insert(Handle::new(2, 1)));
        assert!(!set.insert(Handle::new(1, 1)));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn display() {
        let handle = <Handle as HandleLike>::new(4, 1);
        assert_eq!(format!("{}", handle), "4v1");
        assert_eq!(HandleLike::index(&handle), 4);
        assert_eq!(HandleLike::version(&handle), 1);
    }
}
