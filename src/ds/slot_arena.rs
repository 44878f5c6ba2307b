//! Generational slot arena.
//!
//! Values live in a `Vec` of slots addressed by [`SlotId`]. Freed slots go on
//! a free list and are reused by later inserts; each reuse bumps the slot's
//! generation so a `SlotId` held from before the free no longer resolves.
//!
//! ```text
//!   slots:     [ (g0, A) | (g1, -) | (g0, C) ]
//!   free_list: [ 1 ]
//!
//!   SlotId { index: 1, generation: 0 }  -> stale, resolves to None
//!   insert(D)                           -> SlotId { index: 1, generation: 1 }
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u32,
}

impl SlotId {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        let id = match self.free_list.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.value = Some(value);
                SlotId {
                    index,
                    generation: slot.generation,
                }
            },
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                SlotId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            },
        };
        self.len += 1;
        id
    }

    /// Frees the slot for `id` and returns its value.
    ///
    /// Returns `None` for a stale or never-issued id.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots that can be held without reallocating.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value.as_ref().map(|value| {
                (
                    SlotId {
                        index,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_reuses_slot() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));

        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.len(), 1);

        let c = arena.insert("c");
        assert_eq!(arena.len(), 2);
        assert_eq!(c.index(), a.index());
        assert_ne!(c.generation(), a.generation());
        assert_eq!(arena.get(c), Some(&"c"));
    }

    #[test]
    fn stale_id_does_not_resolve_after_reuse() {
        let mut arena = SlotArena::new();
        let old = arena.insert(1);
        arena.remove(old);
        let new = arena.insert(2);

        assert_eq!(arena.get(old), None);
        assert!(!arena.contains(old));
        assert_eq!(arena.remove(old), None);
        assert_eq!(arena.get(new), Some(&2));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn double_remove_is_noop() {
        let mut arena = SlotArena::new();
        let id = arena.insert(7);
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn get_mut_and_iter() {
        let mut arena = SlotArena::with_capacity(4);
        assert!(arena.capacity() >= 4);
        let a = arena.insert(10);
        let b = arena.insert(20);
        if let Some(v) = arena.get_mut(a) {
            *v += 1;
        }
        arena.remove(b);

        let live: Vec<_> = arena.iter().map(|(id, v)| (id, *v)).collect();
        assert_eq!(live, vec![(a, 11)]);
    }
}
