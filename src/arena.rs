//! Typed storage with stable indices.
//!
//! Each entity category (colliders, hazards, switches, pickups) lives in its
//! own [`Arena`], keyed by a dedicated id type declared with
//! [`crate::arena_id!`]. Removing an entry leaves a hole, so ids handed out
//! earlier never start pointing at a different entity.

use std::fmt;
use std::marker::PhantomData;

/// Index newtype usable as an [`Arena`] key.
pub trait ArenaId: Copy + Eq + fmt::Debug {
    /// Wraps a slot index.
    fn from_index(index: usize) -> Self;
    /// Slot index this id refers to.
    fn index(self) -> usize;
}

/// Append-only slot storage addressed by `I`.
pub struct Arena<I, T> {
    slots: Vec<Option<T>>,
    live: usize,
    _id: PhantomData<I>,
}

impl<I, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            _id: PhantomData,
        }
    }
}

impl<I, T: fmt::Debug> fmt::Debug for Arena<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("live", &self.live)
            .field("slots", &self.slots)
            .finish()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// An empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` and returns its permanent id.
    pub fn insert(&mut self, value: T) -> I {
        let id = I::from_index(self.slots.len());
        self.slots.push(Some(value));
        self.live += 1;
        id
    }

    /// Stores the value produced by `make`, which receives the id it will get.
    pub fn insert_with(&mut self, make: impl FnOnce(I) -> T) -> I {
        let id = I::from_index(self.slots.len());
        self.slots.push(Some(make(id)));
        self.live += 1;
        id
    }

    /// The live value at `id`, if any.
    #[must_use]
    pub fn get(&self, id: I) -> Option<&T> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Mutable access to the live value at `id`.
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Takes the value out, leaving its slot permanently empty.
    pub fn remove(&mut self, id: I) -> Option<T> {
        let taken = self.slots.get_mut(id.index()).and_then(Option::take);
        if taken.is_some() {
            self.live -= 1;
        }
        taken
    }

    /// Whether `id` still refers to a live value.
    #[must_use]
    pub fn contains(&self, id: I) -> bool {
        self.get(id).is_some()
    }

    /// Number of live entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// True once every entry has been removed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterates live entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (I::from_index(index), value)))
    }

    /// Iterates live entries mutably, in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|value| (I::from_index(index), value)))
    }

    /// Live values without their ids.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Live values, mutably.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }
}

impl<I: ArenaId, T> FromIterator<T> for Arena<I, T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let slots: Vec<Option<T>> = iter.into_iter().map(Some).collect();
        let live = slots.len();
        Self {
            slots,
            live,
            _id: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::arena_id! {
        struct TestId;
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut arena: Arena<TestId, &str> = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.remove(a), None);
        let c = arena.insert("c");
        assert_ne!(a, c);
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 2);
        let ids: Vec<_> = arena.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![b, c]);
    }

    #[test]
    fn insert_with_sees_its_own_id() {
        let mut arena: Arena<TestId, TestId> = Arena::new();
        let id = arena.insert_with(|id| id);
        assert_eq!(arena.get(id), Some(&id));
    }
}
