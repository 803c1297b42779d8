use std::{marker::PhantomData, mem, ptr::NonNull};

use tracing::{trace, warn};

use crate::error::ListError;

/// index of the next node, `None` terminates the chain
pub(crate) type Link = Option<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Link,
}

#[derive(Debug)]
enum Slot<T> {
    Occupied { node: Node<T>, generation: u32 },
    Vacant { next_free: Link, generation: u32 },
}

impl<T> Slot<T> {
    fn generation(&self) -> u32 {
        match self {
            Slot::Occupied { generation, .. } | Slot::Vacant { generation, .. } => *generation,
        }
    }
}

/// Backing storage for the nodes of one list.
///
/// Every node lives in a slot of a single `Vec`. Removing a node turns its slot
/// vacant and pushes it onto a free list, so the next insertion reuses it.
/// Each slot carries a generation that is bumped whenever its node is removed,
/// which lets a `(index, generation)` pair tell a live node from a recycled slot.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Link,
    len: usize,
    /// generation given to freshly pushed slots
    epoch: u32,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free_head: None,
            len: 0,
            epoch: 0,
        }
    }

    /// number of occupied slots
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// makes sure the next [`Arena::insert`] does not need to allocate
    pub(crate) fn try_reserve_one(&mut self) -> Result<(), ListError> {
        if self.free_head.is_some() {
            return Ok(());
        }
        self.slots.try_reserve(1).map_err(|e| {
            warn!(slots = self.slots.len(), "could not reserve a node slot: {e}");
            ListError::from(e)
        })
    }

    /// stores `node` and returns its index and generation
    pub(crate) fn insert(&mut self, node: Node<T>) -> (usize, u32) {
        self.len += 1;
        match self.free_head {
            Some(index) => {
                let generation = match self.slots[index] {
                    Slot::Vacant {
                        next_free,
                        generation,
                    } => {
                        self.free_head = next_free;
                        generation
                    }
                    Slot::Occupied { .. } => unreachable!("free list points at an occupied slot"),
                };
                self.slots[index] = Slot::Occupied { node, generation };
                (index, generation)
            }
            None => {
                let index = self.slots.len();
                trace!(index, "growing node arena");
                self.slots.push(Slot::Occupied {
                    node,
                    generation: self.epoch,
                });
                (index, self.epoch)
            }
        }
    }

    /// takes the node out of slot `index`, which must be occupied
    pub(crate) fn remove(&mut self, index: usize) -> Node<T> {
        let generation = match &self.slots[index] {
            Slot::Occupied { generation, .. } => generation.wrapping_add(1),
            Slot::Vacant { .. } => unreachable!("removing a vacant slot"),
        };
        let vacated = mem::replace(
            &mut self.slots[index],
            Slot::Vacant {
                next_free: self.free_head,
                generation,
            },
        );
        self.free_head = Some(index);
        self.len -= 1;
        match vacated {
            Slot::Occupied { node, .. } => node,
            Slot::Vacant { .. } => unreachable!("removing a vacant slot"),
        }
    }

    /// the node at `index`, if it is still the one created with `generation`
    pub(crate) fn get(&self, index: usize, generation: u32) -> Option<&Node<T>> {
        match self.slots.get(index)? {
            Slot::Occupied {
                node,
                generation: current,
            } if *current == generation => Some(node),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, index: usize, generation: u32) -> Option<&mut Node<T>> {
        match self.slots.get_mut(index)? {
            Slot::Occupied {
                node,
                generation: current,
            } if *current == generation => Some(node),
            _ => None,
        }
    }

    pub(crate) fn is_live(&self, index: usize, generation: u32) -> bool {
        self.get(index, generation).is_some()
    }

    /// generation of the occupied slot `index`; links only ever point at occupied slots
    pub(crate) fn generation(&self, index: usize) -> u32 {
        match &self.slots[index] {
            Slot::Occupied { generation, .. } => *generation,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }

    pub(crate) fn node(&self, index: usize) -> &Node<T> {
        match &self.slots[index] {
            Slot::Occupied { node, .. } => node,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match &mut self.slots[index] {
            Slot::Occupied { node, .. } => node,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }

    /// Drops every node.
    ///
    /// Slots created afterwards start at a generation newer than any handed out
    /// so far, so positions from before the clear stay stale.
    pub(crate) fn clear(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        trace!(dropped = self.len, "clearing node arena");
        self.epoch = self
            .slots
            .iter()
            .map(Slot::generation)
            .fold(self.epoch, u32::max)
            .wrapping_add(1);
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    pub(crate) fn nodes_mut(&mut self) -> NodesMut<'_, T> {
        NodesMut {
            base: NonNull::from(self.slots.as_mut_slice()).cast(),
            slots: self.slots.len(),
            marker: PhantomData,
        }
    }
}

/// Mutable access to several nodes of an [`Arena`] at once.
///
/// Handing out `&mut` to distinct slots goes through a raw base pointer so that
/// borrowing one node never reborrows the whole slot vector.
pub(crate) struct NodesMut<'a, T> {
    base: NonNull<Slot<T>>,
    slots: usize,
    marker: PhantomData<&'a mut [Slot<T>]>,
}

impl<'a, T> NodesMut<'a, T> {
    /// # Safety
    ///
    /// `index` must be an occupied slot that has not been requested before
    /// through this value.
    pub(crate) unsafe fn node_mut(&mut self, index: usize) -> &'a mut Node<T> {
        assert!(index < self.slots, "link points past the node arena");
        // SAFETY: `index` is in bounds and the caller guarantees no other
        // reference to this slot is alive.
        let slot = unsafe { &mut *self.base.as_ptr().add(index) };
        match slot {
            Slot::Occupied { node, .. } => node,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: i32) -> Node<i32> {
        Node { value, next: None }
    }

    #[test]
    fn removed_slots_are_reused_with_a_new_generation() {
        let mut arena = Arena::new();
        let (a, gen_a) = arena.insert(node(1));
        let (b, _) = arena.insert(node(2));
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.remove(a).value, 1);
        assert!(!arena.is_live(a, gen_a));
        assert_eq!(arena.len(), 1);

        let (c, gen_c) = arena.insert(node(3));
        assert_eq!(c, a);
        assert_ne!(gen_c, gen_a);
        assert_eq!(arena.get(c, gen_c).map(|n| n.value), Some(3));
        assert_eq!(arena.get(c, gen_a), None);
        assert_eq!(arena.node(b).value, 2);
    }

    #[test]
    fn free_list_is_last_in_first_out() {
        let mut arena = Arena::new();
        let indices: Vec<usize> = (0..4).map(|v| arena.insert(node(v)).0).collect();
        arena.remove(indices[1]);
        arena.remove(indices[3]);
        assert_eq!(arena.insert(node(10)).0, indices[3]);
        assert_eq!(arena.insert(node(11)).0, indices[1]);
        assert_eq!(arena.insert(node(12)).0, 4);
    }

    #[test]
    fn clear_keeps_old_handles_stale() {
        let mut arena = Arena::new();
        let (a, gen_a) = arena.insert(node(1));
        arena.clear();
        assert_eq!(arena.len(), 0);
        let (b, gen_b) = arena.insert(node(2));
        assert_eq!(a, b);
        assert!(gen_b > gen_a);
        assert!(!arena.is_live(a, gen_a));
    }

    #[test]
    fn reserving_with_a_free_slot_does_not_allocate() {
        let mut arena = Arena::new();
        let (a, _) = arena.insert(node(1));
        arena.remove(a);
        assert_eq!(arena.try_reserve_one(), Ok(()));
        let capacity = arena.slots.capacity();
        arena.insert(node(2));
        assert_eq!(arena.slots.capacity(), capacity);
    }

    #[test]
    fn nodes_mut_hands_out_disjoint_nodes() {
        let mut arena = Arena::new();
        let (a, _) = arena.insert(node(1));
        let (b, _) = arena.insert(node(2));
        let mut nodes = arena.nodes_mut();
        let (first, second) = unsafe { (nodes.node_mut(a), nodes.node_mut(b)) };
        mem::swap(&mut first.value, &mut second.value);
        assert_eq!(arena.node(a).value, 2);
        assert_eq!(arena.node(b).value, 1);
    }
}
