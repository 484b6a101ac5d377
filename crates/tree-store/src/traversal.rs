//! Iterators walking down to descendants and up to ancestors
//!
//! Both walkers keep their work list on the heap, so deep trees do not grow
//! the call stack. Each walker also stops once it has yielded as many records
//! as the store holds, which only happens when parent links form a cycle.

use log::{trace, warn};
use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::mem;

use crate::error::{Result, TreeStoreError};
use crate::item::{ItemId, ParentId, TreeRecord};
use crate::store::TreeStore;

/// Order in which [`Walker`] visits descendants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TraversalOrder {
    /// All children of a node, then the descendants of each child in turn
    ///
    /// Below `1 -> [2, 3]`, `2 -> [4]` this yields `2, 3, 4`.
    #[default]
    SiblingsFirst,
    /// Node before its subtree, siblings in input order
    PreOrder,
    /// Subtree before its node, siblings in input order
    PostOrder,
    /// Level by level, siblings in input order
    BreadthFirst,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    position: usize,
    expanded: bool,
}

impl Pending {
    fn new(position: usize) -> Self {
        Self {
            position,
            expanded: false,
        }
    }
}

/// Iterator over every descendant of one item
///
/// The start item itself is never yielded. Created by
/// [`TreeStore::walk_from`].
pub struct Walker<'a, R> {
    store: &'a TreeStore<R>,
    order: TraversalOrder,
    /// Stack for the depth-first orders (back is the top), queue for breadth-first
    pending: VecDeque<Pending>,
    /// Scheduled but not yet yielded, only used by [`TraversalOrder::SiblingsFirst`]
    ready: VecDeque<usize>,
    /// Records whose children were scheduled so far
    expanded: usize,
    /// Records yielded so far
    emitted: usize,
    truncated: bool,
}

impl<'a, R: TreeRecord> Walker<'a, R> {
    pub(crate) fn new(store: &'a TreeStore<R>, start: &ItemId, order: TraversalOrder) -> Self {
        let mut walker = Self {
            store,
            order,
            pending: VecDeque::new(),
            ready: VecDeque::new(),
            expanded: 0,
            emitted: 0,
            truncated: false,
        };
        walker.schedule(store.child_positions(start));
        trace!(
            "walking descendants of {} ({:?}), {} direct children",
            start,
            order,
            walker.pending.len()
        );
        walker
    }

    /// The order this walker visits records in
    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    fn schedule(&mut self, children: &[usize]) {
        match self.order {
            TraversalOrder::BreadthFirst => {
                self.pending.extend(children.iter().map(|&p| Pending::new(p)));
            }
            TraversalOrder::SiblingsFirst => {
                self.ready.extend(children);
                self.pending
                    .extend(children.iter().rev().map(|&p| Pending::new(p)));
            }
            // Reversed so the first child ends up on top of the stack
            TraversalOrder::PreOrder | TraversalOrder::PostOrder => {
                self.pending
                    .extend(children.iter().rev().map(|&p| Pending::new(p)));
            }
        }
    }

    fn warn_truncated(&mut self) {
        if !self.truncated {
            warn!(
                "descendant walk reached {} records without finishing; parent links form a cycle",
                self.store.len()
            );
            self.truncated = true;
        }
    }

    /// Schedule the children of `position`
    ///
    /// Past `len()` expansions nothing more is scheduled, so the work list
    /// only drains from then on.
    fn expand(&mut self, position: usize) {
        let store = self.store;
        if self.expanded == store.len() {
            self.warn_truncated();
            return;
        }
        self.expanded += 1;
        self.schedule(store.child_positions_at(position));
    }

    fn next_siblings_first(&mut self) -> Option<usize> {
        loop {
            if let Some(position) = self.ready.pop_front() {
                return Some(position);
            }
            let current = self.pending.pop_back()?;
            self.expand(current.position);
        }
    }

    fn next_preorder(&mut self) -> Option<usize> {
        let current = self.pending.pop_back()?;
        self.expand(current.position);
        Some(current.position)
    }

    fn next_postorder(&mut self) -> Option<usize> {
        while let Some(current) = self.pending.back_mut() {
            if current.expanded {
                let position = current.position;
                self.pending.pop_back();
                return Some(position);
            }

            current.expanded = true;
            let position = current.position;
            self.expand(position);
        }
        None
    }

    fn next_breadthfirst(&mut self) -> Option<usize> {
        let current = self.pending.pop_front()?;
        self.expand(current.position);
        Some(current.position)
    }
}

impl<'a, R: TreeRecord> Iterator for Walker<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        // An acyclic walk yields fewer records than the store holds
        if self.emitted == self.store.len() {
            if !self.pending.is_empty() || !self.ready.is_empty() {
                self.warn_truncated();
                self.pending.clear();
                self.ready.clear();
            }
            return None;
        }

        let position = match self.order {
            TraversalOrder::SiblingsFirst => self.next_siblings_first(),
            TraversalOrder::PreOrder => self.next_preorder(),
            TraversalOrder::PostOrder => self.next_postorder(),
            TraversalOrder::BreadthFirst => self.next_breadthfirst(),
        }?;
        self.emitted += 1;
        Some(self.store.record_at(position))
    }
}

impl<'a, R: TreeRecord> FusedIterator for Walker<'a, R> {}

enum AncestorState<'a> {
    Next(&'a ParentId),
    Failed(TreeStoreError),
    Done,
}

/// Iterator over the ancestor chain of one item, nearest parent first
///
/// Yields `Err` once and then stops if the start item or any ancestor is
/// missing, or if the chain never reaches the root sentinel. Created by
/// [`TreeStore::ancestors`].
pub struct Ancestors<'a, R> {
    store: &'a TreeStore<R>,
    start: ItemId,
    state: AncestorState<'a>,
    steps: usize,
}

impl<'a, R: TreeRecord> Ancestors<'a, R> {
    pub(crate) fn new(store: &'a TreeStore<R>, start: &ItemId) -> Self {
        let state = match store.get_item(start) {
            Ok(record) => AncestorState::Next(record.parent()),
            Err(err) => AncestorState::Failed(err),
        };
        Self {
            store,
            start: start.clone(),
            state,
            steps: 0,
        }
    }
}

impl<'a, R: TreeRecord> Iterator for Ancestors<'a, R> {
    type Item = Result<&'a R>;

    fn next(&mut self) -> Option<Self::Item> {
        let parent_id = match mem::replace(&mut self.state, AncestorState::Done) {
            AncestorState::Done | AncestorState::Next(ParentId::Root) => return None,
            AncestorState::Failed(err) => return Some(Err(err)),
            AncestorState::Next(ParentId::Item(id)) => id,
        };

        // An acyclic chain holds fewer ancestors than the store has records
        if self.steps == self.store.len() {
            warn!(
                "ancestor chain of {} is longer than the store; parent links form a cycle",
                self.start
            );
            return Some(Err(TreeStoreError::Cycle(self.start.clone())));
        }
        self.steps += 1;

        let parent = match self.store.get_item(parent_id) {
            Ok(parent) => parent,
            Err(err) => return Some(Err(err)),
        };
        self.state = AncestorState::Next(parent.parent());
        Some(Ok(parent))
    }
}

impl<'a, R: TreeRecord> FusedIterator for Ancestors<'a, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::TreeItem;

    // root
    //   1
    //     2
    //       4
    //     3
    //   5
    //     6
    fn store() -> TreeStore {
        TreeStore::new(vec![
            TreeItem::root(1),
            TreeItem::new(2, 1),
            TreeItem::new(3, 1),
            TreeItem::new(4, 2),
            TreeItem::root(5),
            TreeItem::new(6, 5),
        ])
    }

    fn ids<'a>(items: impl Iterator<Item = &'a TreeItem>) -> Vec<ItemId> {
        items.map(|item| item.id.clone()).collect()
    }

    fn expected(values: &[i64]) -> Vec<ItemId> {
        values.iter().map(|&v| ItemId::from(v)).collect()
    }

    #[test]
    fn test_walker_siblings_first() {
        let store = store();
        let walked = ids(store.walk_from(&1.into(), TraversalOrder::SiblingsFirst));
        assert_eq!(walked, expected(&[2, 3, 4]));
        let walked = ids(store.walk_from(&5.into(), TraversalOrder::SiblingsFirst));
        assert_eq!(walked, expected(&[6]));
    }

    #[test]
    fn test_walker_preorder() {
        let store = store();
        let walked = ids(store.walk_from(&1.into(), TraversalOrder::PreOrder));
        assert_eq!(walked, expected(&[2, 4, 3]));
    }

    #[test]
    fn test_walker_postorder() {
        let store = store();
        let walked = ids(store.walk_from(&1.into(), TraversalOrder::PostOrder));
        assert_eq!(walked, expected(&[4, 2, 3]));
    }

    #[test]
    fn test_walker_breadthfirst() {
        let store = store();
        let walked = ids(store.walk_from(&1.into(), TraversalOrder::BreadthFirst));
        assert_eq!(walked, expected(&[2, 3, 4]));
    }

    #[test]
    fn test_walker_from_leaf_or_unknown_is_empty() {
        let store = store();
        assert_eq!(store.walk_from(&4.into(), TraversalOrder::PreOrder).count(), 0);
        assert_eq!(store.walk_from(&"x".into(), TraversalOrder::PostOrder).count(), 0);
    }

    #[test]
    fn test_walker_stops_on_cycle() {
        // 1 -> 2 -> 1, neither reaches the root
        let store = TreeStore::new(vec![TreeItem::new(1, 2), TreeItem::new(2, 1)]);

        for order in [
            TraversalOrder::SiblingsFirst,
            TraversalOrder::PreOrder,
            TraversalOrder::PostOrder,
            TraversalOrder::BreadthFirst,
        ] {
            let walked = ids(store.walk_from(&1.into(), order));
            assert_eq!(walked.len(), store.len(), "{:?}", order);
        }
    }

    #[test]
    fn test_postorder_on_cycle_yields_what_it_expanded() {
        let store = TreeStore::new(vec![TreeItem::new(1, 2), TreeItem::new(2, 1)]);
        let walked = ids(store.walk_from(&1.into(), TraversalOrder::PostOrder));
        assert_eq!(walked, expected(&[2, 1]));
    }

    #[test]
    fn test_walk_below_cycle_is_capped_at_store_size() {
        // 2 -> 3 -> 2 loops, 4 hangs off the loop
        let store = TreeStore::new(vec![
            TreeItem::root(1),
            TreeItem::new(2, 3),
            TreeItem::new(3, 2),
            TreeItem::new(4, 3),
        ]);

        let walked = ids(store.walk_from(&2.into(), TraversalOrder::SiblingsFirst));
        assert_eq!(walked, expected(&[3, 2, 4, 3]));
        assert_eq!(store.get_all_children(&2.into()).len(), store.len());
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let store = store();
        let chain: Vec<_> = store
            .ancestors(&4.into())
            .map(|item| item.map(|item| item.id.clone()))
            .collect();
        assert_eq!(chain, vec![Ok(ItemId::from(2)), Ok(ItemId::from(1))]);
    }

    #[test]
    fn test_ancestors_reports_missing_start_once() {
        let store = store();
        let mut chain = store.ancestors(&99.into());
        assert_eq!(
            chain.next().map(|r| r.map(|item| item.id.clone())),
            Some(Err(TreeStoreError::NotFound(99.into())))
        );
        assert!(chain.next().is_none());
    }

    #[test]
    fn test_ancestors_reports_cycle() {
        let store = TreeStore::new(vec![TreeItem::new(1, 2), TreeItem::new(2, 1)]);
        let result: Result<Vec<_>> = store.ancestors(&1.into()).collect();
        assert_eq!(result.unwrap_err(), TreeStoreError::Cycle(1.into()));
    }
}
