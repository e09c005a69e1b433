//! Sentinel-bounded recency list backed by [`SlotArena`].
//!
//! Nodes live in a `SlotArena` and are linked by `SlotId`, so the list has
//! stable handles and O(1) splice operations without raw pointers. Two
//! sentinel nodes occupy the first two arena slots for the lifetime of the
//! list; every real node always has a real `prev` and `next`, which removes
//! the empty/first/last special cases from `detach` and `attach_after_head`.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<K, V>>)
//!   ┌────────┬──────────────────────────────────────────────────┐
//!   │ SlotId │ Node { prev, next, entry }                       │
//!   ├────────┼──────────────────────────────────────────────────┤
//!   │ 0 HEAD │ { prev: HEAD, next: id_2, entry: None }          │
//!   │ 1 TAIL │ { prev: id_3, next: TAIL, entry: None }          │
//!   │ id_2   │ { prev: HEAD, next: id_3, entry: (k2, v2) }      │
//!   │ id_3   │ { prev: id_2, next: TAIL, entry: (k3, v3) }      │
//!   └────────┴──────────────────────────────────────────────────┘
//!
//!   [HEAD] ◄──► [id_2] ◄──► [id_3] ◄──► [TAIL]
//!               MRU          LRU
//! ```
//!
//! ## Operations
//! - `push_front(k, v)`: allocate + attach after HEAD
//! - `move_to_front(id)`: detach + attach after HEAD
//! - `pop_back()`: detach the node before TAIL + free its slot
//!
//! All operations except iteration are O(1). Sentinels are never handed out,
//! never detached and never freed.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

const HEAD: SlotId = SlotId(0);
const TAIL: SlotId = SlotId(1);
const SENTINELS: usize = 2;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

#[derive(Debug)]
struct Node<K, V> {
    prev: SlotId,
    next: SlotId,
    // `None` only for the two sentinels.
    entry: Option<Entry<K, V>>,
}

impl<K, V> Node<K, V> {
    fn sentinel() -> Self {
        Self {
            prev: HEAD,
            next: TAIL,
            entry: None,
        }
    }
}

/// Doubly linked list of key/value entries ordered from most to least
/// recently used.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    arena: SlotArena<Node<K, V>>,
}

impl<K, V> RecencyList<K, V> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = SlotArena::with_capacity(capacity.saturating_add(SENTINELS));
        // A fresh arena hands out slots 0 and 1 in order; both sentinels
        // start out already pointing at each other.
        let head = arena.insert(Node::sentinel());
        let tail = arena.insert(Node::sentinel());
        debug_assert_eq!((head, tail), (HEAD, TAIL));
        Self { arena }
    }

    /// Number of entries, sentinels excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len() - SENTINELS
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` refers to a live entry of this list.
    #[inline]
    pub fn contains(&self, id: SlotId) -> bool {
        self.entry(id).is_some()
    }

    /// Key and value stored at `id`.
    #[inline]
    pub fn get(&self, id: SlotId) -> Option<(&K, &V)> {
        self.entry(id).map(|entry| (&entry.key, &entry.value))
    }

    /// Mutable access to the value stored at `id`. Does not reorder.
    #[inline]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut V> {
        self.arena
            .get_mut(id)
            .and_then(|node| node.entry.as_mut())
            .map(|entry| &mut entry.value)
    }

    /// Most recently used entry.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.get(self.next_of(HEAD)?)
    }

    /// Least recently used entry.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.get(self.prev_of(TAIL)?)
    }

    /// Inserts a new entry in the most recently used position.
    pub fn push_front(&mut self, key: K, value: V) -> SlotId {
        let id = self.arena.insert(Node {
            prev: HEAD,
            next: TAIL,
            entry: Some(Entry { key, value }),
        });
        self.attach_after_head(id);
        id
    }

    /// Moves an entry to the most recently used position.
    ///
    /// Returns `false` if `id` is not a live entry.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.next_of(HEAD) == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_after_head(id);
        true
    }

    /// Unlinks and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let id = self.prev_of(TAIL)?;
        if id == HEAD {
            return None;
        }
        self.detach(id)?;
        let entry = self.arena.remove(id)?.entry?;
        Some((entry.key, entry.value))
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            current: self.next_of(HEAD).unwrap_or(TAIL),
            remaining: self.len(),
        }
    }

    /// Iterates entry handles from most to least recently used.
    pub fn ids(&self) -> Ids<'_, K, V> {
        Ids {
            list: self,
            current: self.next_of(HEAD).unwrap_or(TAIL),
        }
    }

    /// Walks the list from HEAD to TAIL and checks link symmetry, sentinel
    /// placement and that the walk visits exactly `len()` entries.
    pub fn check_links(&self) -> Result<(), InvariantError> {
        let head = self
            .arena
            .get(HEAD)
            .ok_or_else(|| InvariantError::new("head sentinel missing"))?;
        let tail = self
            .arena
            .get(TAIL)
            .ok_or_else(|| InvariantError::new("tail sentinel missing"))?;
        if head.entry.is_some() || tail.entry.is_some() {
            return Err(InvariantError::new("sentinel node holds an entry"));
        }

        let mut count = 0usize;
        let mut prev = HEAD;
        let mut current = head.next;
        while current != TAIL {
            let node = self.arena.get(current).ok_or_else(|| {
                InvariantError::new(format!("stale link to slot {}", current.index()))
            })?;
            if node.entry.is_none() {
                return Err(InvariantError::new(format!(
                    "sentinel reachable in the middle of the list at slot {}",
                    current.index()
                )));
            }
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} prev link is {} but was reached from {}",
                    current.index(),
                    node.prev.index(),
                    prev.index()
                )));
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            prev = current;
            current = node.next;
        }

        if tail.prev != prev {
            return Err(InvariantError::new(format!(
                "tail prev link is {} but last node is {}",
                tail.prev.index(),
                prev.index()
            )));
        }
        if count != self.len() {
            return Err(InvariantError::new(format!(
                "walked {} nodes but arena holds {} entries",
                count,
                self.len()
            )));
        }
        Ok(())
    }

    fn entry(&self, id: SlotId) -> Option<&Entry<K, V>> {
        self.arena.get(id).and_then(|node| node.entry.as_ref())
    }

    #[inline]
    fn next_of(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).map(|node| node.next)
    }

    #[inline]
    fn prev_of(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).map(|node| node.prev)
    }

    /// Splices `id` out by joining its neighbours. No-op on sentinels.
    fn detach(&mut self, id: SlotId) -> Option<()> {
        if id == HEAD || id == TAIL {
            return None;
        }
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };
        self.arena.get_mut(prev)?.next = next;
        self.arena.get_mut(next)?.prev = prev;
        Some(())
    }

    /// Links `id` between HEAD and the current most recently used node.
    fn attach_after_head(&mut self, id: SlotId) -> Option<()> {
        let first = self.next_of(HEAD)?;
        {
            let node = self.arena.get_mut(id)?;
            node.prev = HEAD;
            node.next = first;
        }
        self.arena.get_mut(first)?.prev = id;
        self.arena.get_mut(HEAD)?.next = id;
        Some(())
    }
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(&K, &V)` from most to least recently used.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    current: SlotId,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == TAIL {
            return None;
        }
        let node = self.list.arena.get(self.current)?;
        let entry = node.entry.as_ref()?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over entry handles from most to least recently used.
pub struct Ids<'a, K, V> {
    list: &'a RecencyList<K, V>,
    current: SlotId,
}

impl<K, V> Iterator for Ids<'_, K, V> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == TAIL {
            return None;
        }
        let id = self.current;
        self.current = self.list.next_of(id)?;
        Some(id)
    }
}
