use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

use super::handle::{HandleIndex, HandleLike};

/// `HandlePool` manages a collection of handles created with a continuous
/// `index` field. Odd versions are alive and even versions are dead, so a
/// freed slot bumps its version once on free and once again when reused.
pub struct HandlePool<H: HandleLike> {
    versions: Vec<HandleIndex>,
    frees: BinaryHeap<Reverse<HandleIndex>>,
    _phantom: PhantomData<H>,
}

impl<H: HandleLike> Default for HandlePool<H> {
    fn default() -> Self {
        HandlePool::new()
    }
}

impl<H: HandleLike> HandlePool<H> {
    pub fn new() -> Self {
        HandlePool {
            versions: Vec::new(),
            frees: BinaryHeap::new(),
            _phantom: PhantomData,
        }
    }

    /// Creates an unused handle, recycling the lowest free index first.
    pub fn create(&mut self) -> H {
        if let Some(Reverse(index)) = self.frees.pop() {
            let version = &mut self.versions[index as usize];
            *version += 1;
            H::new(index, *version)
        } else {
            self.versions.push(1);
            H::new(self.versions.len() as HandleIndex - 1, 1)
        }
    }

    /// Returns true if this handle was created by this pool and has not been
    /// freed yet.
    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        let index = handle.index() as usize;
        match self.versions.get(index) {
            Some(&version) => version & 0x1 == 1 && version == handle.version(),
            None => false,
        }
    }

    /// Recycles the handle index and marks its version as dead.
    pub fn free(&mut self, handle: H) -> bool {
        if !self.contains(handle) {
            return false;
        }

        self.versions[handle.index() as usize] += 1;
        self.frees.push(Reverse(handle.index()));
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the alive handles.
    #[inline]
    pub fn iter(&self) -> Iter<H> {
        Iter {
            versions: &self.versions,
            index: 0,
            _phantom: PhantomData,
        }
    }
}

/// Immutable `HandlePool` iterator, created by `HandlePool::iter`.
pub struct Iter<'a, H: HandleLike> {
    versions: &'a [HandleIndex],
    index: usize,
    _phantom: PhantomData<H>,
}

impl<'a, H: HandleLike> Iterator for Iter<'a, H> {
    type Item = H;

    fn next(&mut self) -> Option<H> {
        while self.index < self.versions.len() {
            let index = self.index;
            self.index += 1;

            let version = self.versions[index];
            if version & 0x1 == 1 {
                return Some(H::new(index as HandleIndex, version));
            }
        }

        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::handle::Handle;

    #[test]
    fn basic() {
        let mut pool = HandlePool::<Handle>::new();

        let e1 = pool.create();
        assert!(pool.contains(e1));
        assert_eq!(e1.index(), 0);

        let e2 = pool.create();
        assert!(pool.contains(e2));
        assert_eq!(e2.index(), 1);

        assert!(pool.free(e1));
        assert!(!pool.contains(e1));
        assert!(!pool.free(e1));
        assert_eq!(pool.len(), 1);

        let e3 = pool.create();
        assert_eq!(e3.index(), 0);
        assert_eq!(e3.version(), 3);
        assert!(!pool.contains(e1));
        assert!(pool.contains(e3));
    }

    #[test]
    fn recycles_lowest_index_first() {
        let mut pool = HandlePool::<Handle>::new();
        let handles: Vec<_> = (0..4).map(|_| pool.create()).collect();

        pool.free(handles[3]);
        pool.free(handles[1]);

        assert_eq!(pool.create().index(), 1);
        assert_eq!(pool.create().index(), 3);
        assert_eq!(pool.create().index(), 4);
    }

    #[test]
    fn iter() {
        let mut pool = HandlePool::<Handle>::new();
        let e1 = pool.create();
        let e2 = pool.create();
        let e3 = pool.create();
        pool.free(e2);

        let alive: Vec<_> = pool.iter().collect();
        assert_eq!(alive, vec![e1, e3]);
    }
}
