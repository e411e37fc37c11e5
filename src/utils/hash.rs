//! Hash containers keyed by handles and group names. Both use the Fx hash from
//! `rustc-hash`, which is fast on small keys but not DoS resistant.

pub use rustc_hash::{FxHashMap as FastHashMap, FxHashSet as FastHashSet};

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn map() {
        let mut map = FastHashMap::default();
        map.insert("enemies".to_owned(), 1);
        map.insert("pickups".to_owned(), 2);

        assert_eq!(map.get("enemies"), Some(&1));
        assert_eq!(map.get("pickups"), Some(&2));
        assert_eq!(map.get("walls"), None);
    }

    #[test]
    fn set() {
        let mut set = FastHashSet::default();
        assert!(set.insert(7u32));
        assert!(!set.insert(7u32));
        assert!(set.contains(&7));
    }
}
