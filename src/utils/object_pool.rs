use super::handle::HandleLike;
use super::handle_pool::{HandlePool, Iter};

/// Values addressed by generational handles. A value lives exactly as long as
/// its handle: `create` stores it under a fresh handle, `free` retires the
/// handle and hands the value back.
pub struct ObjectPool<H: HandleLike, T> {
    handles: HandlePool<H>,
    slots: Vec<Option<T>>,
}

impl<H: HandleLike, T> Default for ObjectPool<H, T> {
    fn default() -> Self {
        ObjectPool {
            handles: HandlePool::new(),
            slots: Vec::new(),
        }
    }
}

impl<H: HandleLike, T> ObjectPool<H, T> {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    pub fn create(&mut self, value: T) -> H {
        let handle = self.handles.create();
        let slot = handle.index() as usize;
        if slot == self.slots.len() {
            self.slots.push(None);
        }

        self.slots[slot] = Some(value);
        handle
    }

    #[inline]
    fn slot(&self, handle: H) -> Option<usize> {
        if self.handles.contains(handle) {
            Some(handle.index() as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, handle: H) -> Option<&T> {
        let slot = self.slot(handle)?;
        self.slots.get(slot)?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        let slot = self.slot(handle)?;
        self.slots.get_mut(slot)?.as_mut()
    }

    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        self.handles.contains(handle)
    }

    pub fn free(&mut self, handle: H) -> Option<T> {
        let slot = self.slot(handle)?;
        self.handles.free(handle);
        self.slots.get_mut(slot)?.take()
    }

    /// The number of live values.
    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterates over the handles of live values in slot order.
    #[inline]
    pub fn iter(&self) -> Iter<H> {
        self.handles.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::handle::Handle;

    #[test]
    fn lifetime_follows_handle() {
        let mut pool = ObjectPool::<Handle, String>::new();

        let e1 = pool.create("e1".to_owned());
        let e2 = pool.create("e2".to_owned());
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(e1).map(|v| v.as_str()), Some("e1"));

        assert_eq!(pool.free(e1), Some("e1".to_owned()));
        assert_eq!(pool.free(e1), None);
        assert!(!pool.contains(e1));
        assert_eq!(pool.iter().collect::<Vec<_>>(), vec![e2]);
    }

    #[test]
    fn stale_handle_misses_recycled_slot() {
        let mut pool = ObjectPool::<Handle, &'static str>::new();

        let e1 = pool.create("first");
        pool.free(e1);
        let e2 = pool.create("second");

        assert_eq!(e1.index(), e2.index());
        assert_eq!(pool.get(e1), None);
        assert_eq!(pool.get_mut(e1), None);

        if let Some(v) = pool.get_mut(e2) {
            *v = "third";
        }
        assert_eq!(pool.get(e2), Some(&"third"));
    }
}
