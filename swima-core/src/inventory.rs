//! Software inventory collection

use crate::sw_id::SwIdRef;
use std::slice;

/// Ordered collection of software identities
///
/// Items are kept in insertion order. The inventory holds one reference
/// per member and releases exactly that reference when dropped, so
/// identities shared with other inventories or attributes stay alive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<SwIdRef>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a software identity, taking over the supplied reference
    pub fn add(&mut self, item: SwIdRef) {
        self.items.push(item);
    }

    /// Get the number of collected software identities
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Check whether the inventory is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Create an iterator over the current contents
    ///
    /// Each call yields a fresh iterator starting at the first item.
    pub fn iter(&self) -> slice::Iter<'_, SwIdRef> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a SwIdRef;
    type IntoIter = slice::Iter<'a, SwIdRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
