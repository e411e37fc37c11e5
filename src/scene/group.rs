use crate::utils::FastHashMap;

use super::NodeId;

/// Maps group names to the nodes currently registered under them.
///
/// Membership lists are unordered. Removal swaps the last member into the
/// vacated index, so both insertion and removal are constant time as long as
/// the caller remembers each member's index.
#[derive(Debug, Default)]
pub struct GroupIndex {
    groups: FastHashMap<String, Vec<NodeId>>,
}

impl GroupIndex {
    pub fn new() -> Self {
        GroupIndex::default()
    }

    /// Appends `node` to the group `name` and returns its index.
    pub fn add(&mut self, name: &str, node: NodeId) -> usize {
        if let Some(members) = self.groups.get_mut(name) {
            members.push(node);
            return members.len() - 1;
        }

        self.groups.insert(name.to_owned(), vec![node]);
        0
    }

    /// Removes the member at `index` from the group `name`. Returns the node
    /// that was moved into `index` to fill the gap, if any, so the caller can
    /// update its cached index. A group is dropped with its last member.
    pub fn remove(&mut self, name: &str, index: usize) -> Option<NodeId> {
        let members = self.groups.get_mut(name)?;
        if index >= members.len() {
            return None;
        }

        members.swap_remove(index);
        if members.is_empty() {
            self.groups.remove(name);
            return None;
        }

        members.get(index).cloned()
    }

    pub fn members(&self, name: &str) -> &[NodeId] {
        self.groups.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self, name: &str) -> usize {
        self.members(name).len()
    }

    pub fn is_empty(&self, name: &str) -> bool {
        self.len(name) == 0
    }

    /// Iterates over the names of every group with at least one member.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(|name| name.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::Handle;

    fn id(index: u32) -> NodeId {
        NodeId::new(1, Handle::new(index, 1))
    }

    #[test]
    fn swap_remove_reports_moved_member() {
        let mut groups = GroupIndex::new();
        assert_eq!(groups.add("enemies", id(0)), 0);
        assert_eq!(groups.add("enemies", id(1)), 1);
        assert_eq!(groups.add("enemies", id(2)), 2);

        assert_eq!(groups.remove("enemies", 0), Some(id(2)));
        assert_eq!(groups.members("enemies"), &[id(2), id(1)]);

        assert_eq!(groups.remove("enemies", 1), None);
        assert_eq!(groups.members("enemies"), &[id(2)]);
        assert_eq!(groups.members("enemies")[0].index(), 2);
    }

    #[test]
    fn empty_groups_are_dropped() {
        let mut groups = GroupIndex::new();
        groups.add("enemies", id(0));
        groups.add("pickups", id(1));
        assert_eq!(groups.names().count(), 2);

        assert_eq!(groups.remove("enemies", 0), None);
        assert!(groups.is_empty("enemies"));
        assert_eq!(groups.names().collect::<Vec<_>>(), vec!["pickups"]);
        assert_eq!(groups.groups.len(), 1);

        assert_eq!(groups.add("enemies", id(2)), 0);
        assert_eq!(groups.members("enemies"), &[id(2)]);
    }

    #[test]
    fn unknown_group() {
        let mut groups = GroupIndex::new();
        assert!(groups.is_empty("walls"));
        assert_eq!(groups.remove("walls", 0), None);
        assert_eq!(groups.names().count(), 0);
    }
}
