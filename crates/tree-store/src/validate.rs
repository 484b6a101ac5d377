//! Detection of malformed input
//!
//! Construction never checks its input, so these checks are opt-in: call
//! [`TreeStore::validate`](crate::TreeStore::validate) or build with
//! [`Validation::Strict`](crate::Validation::Strict).

use derive_more::Display;
use log::debug;
use std::collections::HashMap;
use std::fmt;

use crate::index::ItemIndex;
use crate::item::{ItemId, ParentId, TreeRecord};

/// A single problem found in the input
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Issue {
    /// More than one record uses this id; the last one is indexed
    #[display(fmt = "duplicate id {}", _0)]
    DuplicateId(ItemId),

    /// A record uses the string reserved for the root sentinel as its id
    #[display(fmt = "id {} collides with the root sentinel", _0)]
    ReservedId(ItemId),

    /// A record names a parent that no record defines
    #[display(fmt = "item {} references missing parent {}", item, parent)]
    DanglingParent { item: ItemId, parent: ItemId },

    /// Following parent links from this record loops back onto itself
    #[display(fmt = "item {} is part of a parent cycle", _0)]
    Cycle(ItemId),
}

/// Every issue found in one input, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    /// True if no issues were found
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether any parent cycle was found
    pub fn has_cycles(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, Issue::Cycle(_)))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return write!(f, "no issues");
        }
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationReport {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

pub(crate) fn check<R: TreeRecord>(items: &[R], index: &ItemIndex) -> ValidationReport {
    let mut issues = Vec::new();
    // id -> whether it was already reported as a duplicate
    let mut seen: HashMap<&ItemId, bool> = HashMap::with_capacity(items.len());

    for item in items {
        let id = item.id();
        if id.is_root_sentinel() {
            issues.push(Issue::ReservedId(id.clone()));
        }

        match seen.get_mut(id) {
            Some(reported) => {
                if !*reported {
                    issues.push(Issue::DuplicateId(id.clone()));
                    *reported = true;
                }
            }
            None => {
                seen.insert(id, false);
            }
        }

        if let ParentId::Item(parent) = item.parent() {
            if !index.contains(parent) {
                issues.push(Issue::DanglingParent {
                    item: id.clone(),
                    parent: parent.clone(),
                });
            }
        }
    }

    find_cycles(items, index, &mut issues);

    debug!("validated {} records: {} issues", items.len(), issues.len());
    ValidationReport { issues }
}

/// Walk up from every record, marking the records on the current path
fn find_cycles<R: TreeRecord>(items: &[R], index: &ItemIndex, issues: &mut Vec<Issue>) {
    let mut marks = vec![Mark::Unvisited; items.len()];
    let mut path = Vec::new();

    for start in 0..items.len() {
        let mut current = start;
        loop {
            match marks[current] {
                Mark::Done => break,
                Mark::OnPath => {
                    issues.push(Issue::Cycle(items[current].id().clone()));
                    break;
                }
                Mark::Unvisited => {
                    marks[current] = Mark::OnPath;
                    path.push(current);
                }
            }

            let next = items[current]
                .parent()
                .item()
                .and_then(|parent| index.get(parent));
            match next {
                Some(slot) => current = slot.position,
                None => break,
            }
        }

        for position in path.drain(..) {
            marks[position] = Mark::Done;
        }
    }
}
