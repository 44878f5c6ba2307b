//! Write-order list backed by a [`SlotArena`].
//!
//! Nodes are stored in the arena and linked by [`SlotId`], so a handle kept
//! elsewhere (the cache index) can unlink its node in O(1) without pointer
//! chasing or `unsafe`.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: C, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: A, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//!   newest write                        oldest write
//! ```
//!
//! ## Performance
//! - `push_front`: O(1)
//! - `remove(id)` / `pop_back`: O(1)
//! - `position(id)` / `iter`: O(n)
//!
//! There is no `move_to_front`; a node only reaches the head through
//! `push_front`.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list whose nodes live in a `SlotArena`.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Number of linked nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if no nodes are linked.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` refers to a live node of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Newest value.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Handle of the newest node.
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Oldest value, i.e. the next eviction victim.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Handle of the oldest node.
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Value of node `id`, or `None` for a stale handle.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Links `value` in at the head and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head.and_then(|head| self.arena.get_mut(head)) {
            Some(old_head) => old_head.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Unlinks and frees the tail node.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks and frees the node `id`. Stale ids return `None`.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let node = self.arena.remove(id)?;

        match node.prev.and_then(|prev| self.arena.get_mut(prev)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|next| self.arena.get_mut(next)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }

        Some(node.value)
    }

    /// Distance of `id` from the head (0 = newest).
    pub fn position(&self, id: SlotId) -> Option<usize> {
        if !self.arena.contains(id) {
            return None;
        }
        self.iter_entries().position(|(current, _)| current == id)
    }

    /// Iterates values from head (newest) to tail (oldest).
    pub fn iter(&self) -> RecencyIter<'_, T> {
        RecencyIter {
            list: self,
            current: self.head,
        }
    }

    /// Iterates `(SlotId, &T)` from head to tail.
    pub fn iter_entries(&self) -> RecencyEntryIter<'_, T> {
        RecencyEntryIter {
            list: self,
            current: self.head,
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional);
    }

    /// Walks the list and checks link symmetry, head/tail and length.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() {
                return Err(InvariantError::new("head and tail disagree on emptiness"));
            }
            if self.len() != 0 {
                return Err(InvariantError::new(format!(
                    "empty list reports len {}",
                    self.len()
                )));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;

        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new("link points at a freed slot"))?;
            if node.prev != prev {
                return Err(InvariantError::new("prev link is not symmetric"));
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::new("last node is not the tail"));
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected"));
            }
            prev = Some(id);
            current = node.next;
        }

        if count != self.len() {
            return Err(InvariantError::new(format!(
                "walked {} nodes but arena holds {}",
                count,
                self.len()
            )));
        }
        Ok(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RecencyIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for RecencyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

pub struct RecencyEntryIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for RecencyEntryIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some((id, &node.value))
    }
}
