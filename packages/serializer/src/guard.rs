//! Re-entrancy guard
//!
//! While the printer runs on a transformed tree it may hand the same nodes
//! back to the serializer. Nodes are marked for exactly that window; the
//! marks are keyed by node identity and always removed when the window
//! closes, whether the printer returned, failed or panicked.

use std::cell::RefCell;
use std::collections::HashSet;
use stylesnap_tree::NodeId;

/// Identities of nodes currently owned by an in-flight serialize call
#[derive(Debug, Default)]
pub struct ProcessedNodes {
    ids: RefCell<HashSet<NodeId>>,
}

impl ProcessedNodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.borrow().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.borrow().is_empty()
    }

    /// Mark `ids` until the returned scope is dropped.
    ///
    /// Ids that are already marked belong to an outer scope and are left for
    /// that scope to release.
    pub fn mark(&self, ids: impl IntoIterator<Item = NodeId>) -> MarkedScope<'_> {
        let mut set = self.ids.borrow_mut();
        let added = ids.into_iter().filter(|id| set.insert(*id)).collect();
        MarkedScope { owner: self, ids: added }
    }
}

/// Marks held by one serialize call
#[must_use = "nodes are unmarked as soon as the scope is dropped"]
#[derive(Debug)]
pub struct MarkedScope<'a> {
    owner: &'a ProcessedNodes,
    ids: Vec<NodeId>,
}

impl MarkedScope<'_> {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Drop for MarkedScope<'_> {
    fn drop(&mut self) {
        let mut set = self.owner.ids.borrow_mut();
        for id in &self.ids {
            set.remove(id);
        }
    }
}
