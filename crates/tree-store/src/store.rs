use log::{debug, warn};

use crate::error::{Result, TreeStoreError};
use crate::index::{ChildrenIndex, ItemIndex};
use crate::item::{ItemId, TreeItem, TreeRecord};
use crate::options::{StoreOptions, Validation};
use crate::traversal::{Ancestors, TraversalOrder, Walker};
use crate::validate::{self, ValidationReport};

/// Read-only index over a flat list of tree records
///
/// Built once from the records, after which single-item lookups, direct
/// children, all descendants and the ancestor chain are answered from two
/// derived tables without rescanning the input.
///
/// # Preconditions
///
/// [`TreeStore::new`] does not check its input. Callers are expected to
/// supply unique ids, parents that exist (or the root sentinel) and no
/// cycles. On malformed input a later duplicate id shadows the earlier one,
/// dangling parents surface as [`TreeStoreError::NotFound`] while walking
/// up, and cycles cut walks short. Use [`TreeStore::validate`] or
/// [`TreeStore::try_new`] to check.
///
/// # Example
///
/// ```
/// use tree_store::{ItemId, TreeItem, TreeStore};
///
/// let store = TreeStore::new(vec![
///     TreeItem::root(1),
///     TreeItem::new(2, 1),
///     TreeItem::new(3, 2),
/// ]);
///
/// let descendants: Vec<ItemId> = store
///     .get_all_children(&1.into())
///     .iter()
///     .map(|item| item.id.clone())
///     .collect();
/// assert_eq!(descendants, vec![ItemId::from(2), ItemId::from(3)]);
/// assert_eq!(store.get_all_parents(&3.into()).unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TreeStore<R = TreeItem> {
    /// The records, in input order
    items: Vec<R>,
    /// Parent id -> child positions
    children: ChildrenIndex,
    /// Item id -> position and child list
    index: ItemIndex,
}

impl<R: TreeRecord> TreeStore<R> {
    /// Index `items` without checking them
    pub fn new(items: Vec<R>) -> Self {
        let children = ChildrenIndex::build(&items);
        let index = ItemIndex::build(&items, &children);

        debug!(
            "indexed {} records: {} distinct ids, {} parent keys",
            items.len(),
            index.len(),
            children.key_count()
        );

        Self {
            items,
            children,
            index,
        }
    }

    /// Index `items`, rejecting duplicate ids, dangling parents and cycles
    pub fn try_new(items: Vec<R>) -> Result<Self> {
        Self::with_options(items, &StoreOptions::new().validation(Validation::Strict))
    }

    /// Index `items` according to `options`
    pub fn with_options(items: Vec<R>, options: &StoreOptions) -> Result<Self> {
        let store = Self::new(items);
        if options.validation == Validation::Strict {
            let report = store.validate();
            if !report.is_ok() {
                warn!("rejecting input: {}", report);
                return Err(TreeStoreError::Malformed(report));
            }
        }
        Ok(store)
    }

    /// All records, unmodified and in input order
    pub fn get_all(&self) -> &[R] {
        &self.items
    }

    /// Give the records back, in input order
    pub fn into_items(self) -> Vec<R> {
        self.items
    }

    /// Number of records, duplicates included
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a record with this id was indexed
    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains(id)
    }

    /// Look up a record by id
    ///
    /// # Errors
    ///
    /// Returns [`TreeStoreError::NotFound`] if no record has this id.
    pub fn get_item(&self, id: &ItemId) -> Result<&R> {
        self.index
            .get(id)
            .map(|slot| &self.items[slot.position])
            .ok_or_else(|| TreeStoreError::NotFound(id.clone()))
    }

    /// Direct children of `id`, in input order
    ///
    /// Empty for leaves and for ids nothing refers to.
    pub fn get_children(&self, id: &ItemId) -> Vec<&R> {
        self.children(id).collect()
    }

    /// Iterate over the direct children of `id`
    pub fn children(&self, id: &ItemId) -> impl Iterator<Item = &R> + '_ {
        self.positions_to_records(self.child_positions(id))
    }

    /// Number of direct children of `id`
    pub fn child_count(&self, id: &ItemId) -> usize {
        self.child_positions(id).len()
    }

    /// Records whose parent is the root sentinel, in input order
    pub fn roots(&self) -> Vec<&R> {
        self.positions_to_records(self.children.roots()).collect()
    }

    /// Every descendant of `id`
    ///
    /// The direct children come first, in input order, followed by the
    /// descendants of each child in turn (see [`TraversalOrder::SiblingsFirst`]).
    /// Empty for leaves and unknown ids.
    pub fn get_all_children(&self, id: &ItemId) -> Vec<&R> {
        self.walk_from(id, TraversalOrder::SiblingsFirst).collect()
    }

    /// Iterate over the descendants of `id` in the given order
    pub fn walk_from(&self, id: &ItemId, order: TraversalOrder) -> Walker<'_, R> {
        Walker::new(self, id, order)
    }

    /// The ancestors of `id`, nearest parent first, root sentinel excluded
    ///
    /// # Errors
    ///
    /// Returns [`TreeStoreError::NotFound`] if `id` or any ancestor along the
    /// chain is missing, and [`TreeStoreError::Cycle`] if the chain never
    /// reaches the root sentinel.
    pub fn get_all_parents(&self, id: &ItemId) -> Result<Vec<&R>> {
        self.ancestors(id).collect()
    }

    /// Iterate over the ancestors of `id`, nearest parent first
    pub fn ancestors(&self, id: &ItemId) -> Ancestors<'_, R> {
        Ancestors::new(self, id)
    }

    /// The direct parent of `id`, `None` for top-level records
    pub fn get_parent(&self, id: &ItemId) -> Result<Option<&R>> {
        let item = self.get_item(id)?;
        item.parent()
            .item()
            .map(|parent| self.get_item(parent))
            .transpose()
    }

    /// Number of ancestors of `id`; top-level records have depth 0
    pub fn depth(&self, id: &ItemId) -> Result<usize> {
        self.ancestors(id)
            .try_fold(0, |depth, ancestor| ancestor.map(|_| depth + 1))
    }

    /// The chain from the top-level ancestor down to `id` itself
    pub fn path(&self, id: &ItemId) -> Result<Vec<&R>> {
        let mut path = self.get_all_parents(id)?;
        path.reverse();
        path.push(self.get_item(id)?);
        Ok(path)
    }

    /// Whether `ancestor` appears in the ancestor chain of `descendant`
    pub fn is_ancestor_of(&self, ancestor: &ItemId, descendant: &ItemId) -> Result<bool> {
        for item in self.ancestors(descendant) {
            if item?.id() == ancestor {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Check the input for duplicate ids, reserved ids, dangling parents and cycles
    pub fn validate(&self) -> ValidationReport {
        validate::check(&self.items, &self.index)
    }

    /// Record at a position in the input
    pub(crate) fn record_at(&self, position: usize) -> &R {
        &self.items[position]
    }

    /// Child positions of `id`, preferring the list attached to its slot
    pub(crate) fn child_positions(&self, id: &ItemId) -> &[usize] {
        match self.index.get(id) {
            Some(slot) => slot
                .children
                .map(|list| self.children.positions(list))
                .unwrap_or(&[]),
            None => self.children.children_of(id),
        }
    }

    /// Child positions of the record at `position`
    pub(crate) fn child_positions_at(&self, position: usize) -> &[usize] {
        self.child_positions(self.items[position].id())
    }

    fn positions_to_records<'a>(
        &'a self,
        positions: &'a [usize],
    ) -> impl Iterator<Item = &'a R> + 'a {
        positions.iter().map(move |&position| &self.items[position])
    }
}

impl<R: TreeRecord> FromIterator<R> for TreeStore<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
