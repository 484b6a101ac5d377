//! The two lookup tables derived from the record sequence
//!
//! Both tables refer to records by their position in the store's record
//! vector, so they never clone records and never outlive the store.

use std::collections::HashMap;

use crate::item::{ItemId, ParentId, TreeRecord};

/// Handle to one child list inside a [`ChildrenIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ChildListId(usize);

/// Parent id -> ordered positions of the records that name it as parent
#[derive(Debug, Clone, Default)]
pub(crate) struct ChildrenIndex {
    /// Child lists, each in first-seen order
    lists: Vec<Vec<usize>>,
    /// List of records whose parent is the root sentinel
    root: Option<ChildListId>,
    /// Lists keyed by the parent's item id
    by_item: HashMap<ItemId, ChildListId>,
}

impl ChildrenIndex {
    /// Group record positions by their parent reference
    pub fn build<R: TreeRecord>(records: &[R]) -> Self {
        let mut index = Self::default();
        for (position, record) in records.iter().enumerate() {
            let list = index.list_or_insert(record.parent());
            index.lists[list.0].push(position);
        }
        index
    }

    fn list_or_insert(&mut self, parent: &ParentId) -> ChildListId {
        if let Some(list) = self.list_for(parent) {
            return list;
        }

        let list = ChildListId(self.lists.len());
        self.lists.push(Vec::new());
        match parent {
            ParentId::Root => self.root = Some(list),
            ParentId::Item(id) => {
                self.by_item.insert(id.clone(), list);
            }
        }
        list
    }

    /// Find the list for a parent reference, if any record names it
    pub fn list_for(&self, parent: &ParentId) -> Option<ChildListId> {
        match parent {
            ParentId::Root => self.root,
            ParentId::Item(id) => self.list_for_item(id),
        }
    }

    /// Find the list of records hanging below `id`
    pub fn list_for_item(&self, id: &ItemId) -> Option<ChildListId> {
        self.by_item.get(id).copied()
    }

    /// Positions held by a list
    pub fn positions(&self, list: ChildListId) -> &[usize] {
        &self.lists[list.0]
    }

    /// Positions of the records whose parent is `id`
    pub fn children_of(&self, id: &ItemId) -> &[usize] {
        self.list_for_item(id)
            .map(|list| self.positions(list))
            .unwrap_or(&[])
    }

    /// Positions of the records whose parent is the root sentinel
    pub fn roots(&self) -> &[usize] {
        self.root.map(|list| self.positions(list)).unwrap_or(&[])
    }

    /// Number of distinct parent references, the root sentinel included
    pub fn key_count(&self) -> usize {
        self.lists.len()
    }
}

/// Where a record lives and which child list belongs to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ItemSlot {
    /// Position of the record in the store
    pub position: usize,
    /// The record's children, `None` for leaves
    pub children: Option<ChildListId>,
}

/// Item id -> record slot
#[derive(Debug, Clone, Default)]
pub(crate) struct ItemIndex {
    slots: HashMap<ItemId, ItemSlot>,
}

impl ItemIndex {
    /// Attach each record's child list; a later duplicate id replaces the earlier slot
    pub fn build<R: TreeRecord>(records: &[R], children: &ChildrenIndex) -> Self {
        let mut slots = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            let slot = ItemSlot {
                position,
                children: children.list_for_item(record.id()),
            };
            slots.insert(record.id().clone(), slot);
        }
        Self { slots }
    }

    pub fn get(&self, id: &ItemId) -> Option<ItemSlot> {
        self.slots.get(id).copied()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.slots.contains_key(id)
    }

    /// Number of distinct ids
    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::TreeItem;

    fn records() -> Vec<TreeItem> {
        vec![
            TreeItem::root(1),
            TreeItem::new(2, 1),
            TreeItem::new(3, 1),
            TreeItem::new(4, 2),
            TreeItem::root(5),
        ]
    }

    #[test]
    fn test_children_index_groups_in_input_order() {
        let index = ChildrenIndex::build(&records());

        assert_eq!(index.roots(), &[0, 4]);
        assert_eq!(index.children_of(&ItemId::from(1)), &[1, 2]);
        assert_eq!(index.children_of(&ItemId::from(2)), &[3]);
        assert!(index.children_of(&ItemId::from(3)).is_empty());
        assert!(index.children_of(&ItemId::from(99)).is_empty());
        assert_eq!(index.key_count(), 3);
    }

    #[test]
    fn test_item_index_attaches_child_lists() {
        let records = records();
        let children = ChildrenIndex::build(&records);
        let items = ItemIndex::build(&records, &children);

        assert_eq!(items.len(), 5);
        let slot = items.get(&ItemId::from(1)).unwrap();
        assert_eq!(slot.position, 0);
        assert_eq!(children.positions(slot.children.unwrap()), &[1, 2]);

        let leaf = items.get(&ItemId::from(4)).unwrap();
        assert_eq!(leaf.position, 3);
        assert_eq!(leaf.children, None);

        assert!(items.get(&ItemId::from("1")).is_none());
    }

    #[test]
    fn test_item_index_last_duplicate_wins() {
        let records = vec![TreeItem::root(1), TreeItem::new(1, 7)];
        let children = ChildrenIndex::build(&records);
        let items = ItemIndex::build(&records, &children);

        assert_eq!(items.len(), 1);
        assert_eq!(items.get(&ItemId::from(1)).unwrap().position, 1);
    }
}
