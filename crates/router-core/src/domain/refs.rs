//! Intrusive reference lists over arena-allocated entries.
//!
//! A [`RefList`] is an insertion-ordered doubly-linked list whose nodes live
//! in a [`SlotMap`] arena rather than behind raw pointers. The arena key is
//! the node's stable, generation-checked handle: whoever holds it can remove
//! the node in O(1). The list owns its entries; it never owns the link or
//! node object an entry points back to.
//!
//! The arenas are owned by the registry, so every list operation takes the
//! arena explicitly. Entries for different lists share one arena per kind.

use slotmap::{new_key_type, Key, SlotMap};

new_key_type! {
    /// Handle to a link reference entry.
    pub struct LinkRefId;

    /// Handle to a remote-node reference entry.
    pub struct NodeRefId;
}

/// Arena node: a non-owning back-reference plus intrusive linkage.
#[derive(Debug, Clone, Copy)]
pub struct RefEntry<K: Key, T> {
    item: T,
    prev: Option<K>,
    next: Option<K>,
}

/// Arena type for one kind of reference entry.
pub type RefArena<K, T> = SlotMap<K, RefEntry<K, T>>;

/// Insertion-ordered intrusive list threaded through a [`RefArena`].
#[derive(Debug, Clone, Copy)]
pub struct RefList<K: Key> {
    head: Option<K>,
    tail: Option<K>,
    len: usize,
}

impl<K: Key> Default for RefList<K> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<K: Key> RefList<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocate an entry for `item` and link it at the tail. Returns the
    /// entry's handle; store it on the referenced object for O(1) removal.
    pub fn push_back<T>(&mut self, arena: &mut RefArena<K, T>, item: T) -> K {
        let key = arena.insert(RefEntry {
            item,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => arena[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.len += 1;
        key
    }

    /// Unlink and free the entry behind `key`. Returns the referenced item,
    /// or `None` if the handle is stale (already removed): a no-op, not an
    /// error.
    ///
    /// `key` must have been returned by this list's `push_back`: arenas are
    /// shared across lists of one entry kind, and a live key from another
    /// list would splice that list's linkage while shrinking this list's
    /// length. The registry's back-handle discipline guarantees this.
    pub(crate) fn remove<T>(&mut self, arena: &mut RefArena<K, T>, key: K) -> Option<T> {
        let entry = arena.remove(key)?;
        match entry.prev {
            Some(prev) => arena[prev].next = entry.next,
            None => self.head = entry.next,
        }
        match entry.next {
            Some(next) => arena[next].prev = entry.prev,
            None => self.tail = entry.prev,
        }
        self.len -= 1;
        Some(entry.item)
    }

    /// Forward iteration in insertion order.
    pub fn iter<'a, T>(&self, arena: &'a RefArena<K, T>) -> RefIter<'a, K, T> {
        RefIter {
            arena,
            next: self.head,
        }
    }
}

/// Forward iterator over a [`RefList`].
pub struct RefIter<'a, K: Key, T> {
    arena: &'a RefArena<K, T>,
    next: Option<K>,
}

impl<'a, K: Key, T> Iterator for RefIter<'a, K, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let key = self.next?;
        let entry = self.arena.get(key)?;
        self.next = entry.next;
        Some(&entry.item)
    }
}
