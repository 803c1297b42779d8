use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem,
    ops::{Index, IndexMut},
};

use crate::{
    arena::{Arena, Link, Node},
    error::ListError,
    iter::{IntoIter, Iter, IterMut},
    position::{Place, Position},
};

/// A singly linked list.
///
/// The list starts with a sentinel that holds no value. Its position,
/// [`before_begin`](LinkedList::before_begin), lets [`insert_after`](LinkedList::insert_after)
/// and [`erase_after`](LinkedList::erase_after) work at the front exactly like
/// they work after any element.
///
/// Nodes are kept in an arena owned by the list and linked by index, so every
/// node has exactly one owner and dropping the list drops every value.
///
/// # Examples
/// ```
/// use single_linked_list::LinkedList;
///
/// let mut list = LinkedList::from([1, 2, 4]);
/// let two = list.next(list.begin());
/// list.insert_after(two, 3);
/// list.push_front(0);
/// assert_eq!(list, LinkedList::from([0, 1, 2, 3, 4]));
///
/// list.reverse();
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1, 0]);
/// ```
pub struct LinkedList<T> {
    /// the sentinel: link to the first node
    head: Link,
    nodes: Arena<T>,
}

/// a validated place that has a `next` link
#[derive(Debug, Clone, Copy)]
enum Anchor {
    Sentinel,
    Node(usize),
}

impl<T> LinkedList<T> {
    /// creates an empty list
    pub const fn new() -> Self {
        LinkedList {
            head: None,
            nodes: Arena::new(),
        }
    }

    /// number of elements, O(1)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|index| &self.nodes.node(index).value)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let index = self.head?;
        Some(&mut self.nodes.node_mut(index).value)
    }

    /// inserts `value` as the new first element
    pub fn push_front(&mut self, value: T) {
        self.link_after(Anchor::Sentinel, value);
    }

    /// Like [`push_front`](LinkedList::push_front), but reports a failed
    /// allocation instead of aborting. On error the list is unchanged.
    pub fn try_push_front(&mut self, value: T) -> Result<(), ListError> {
        self.nodes.try_reserve_one()?;
        self.link_after(Anchor::Sentinel, value);
        Ok(())
    }

    /// removes the first element and returns it, or `None` if the list is empty
    pub fn pop_front(&mut self) -> Option<T> {
        self.unlink_after(Anchor::Sentinel)
    }

    /// drops every element
    pub fn clear(&mut self) {
        self.head = None;
        self.nodes.clear();
    }

    /// Reverses the order of the elements in place.
    ///
    /// Walks the chain once, pointing every `next` link backwards. No node is
    /// moved or allocated.
    pub fn reverse(&mut self) {
        let mut previous: Link = None;
        let mut current = self.head;
        while let Some(index) = current {
            let node = self.nodes.node_mut(index);
            current = mem::replace(&mut node.next, previous);
            previous = Some(index);
        }
        self.head = previous;
    }

    /// Exchanges the contents of two lists in O(1).
    ///
    /// Positions follow their elements: a position obtained from `self` refers
    /// to the same element inside `other` afterwards.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|e| e == value)
    }

    /// the sentinel position preceding the first element
    pub fn before_begin(&self) -> Position {
        Position::BEFORE_BEGIN
    }

    /// position of the first element, or [`end`](LinkedList::end) if the list is empty
    pub fn begin(&self) -> Position {
        self.position_of(self.head)
    }

    /// the position one past the last element
    pub fn end(&self) -> Position {
        Position::END
    }

    /// The position following `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end position or stale.
    /// A position taken from a different list is not detected when its slot
    /// happens to hold a live node here; it then anchors on that node.
    pub fn next(&self, pos: Position) -> Position {
        let anchor = self.anchor(pos, "advance");
        self.position_of(self.next_link(anchor))
    }

    /// the element referenced by `pos`, `None` for end, before-begin or stale positions
    pub fn get(&self, pos: Position) -> Option<&T> {
        match pos.0 {
            Place::Node { index, generation } => {
                self.nodes.get(index, generation).map(|node| &node.value)
            }
            Place::BeforeBegin | Place::End => None,
        }
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        match pos.0 {
            Place::Node { index, generation } => self
                .nodes
                .get_mut(index, generation)
                .map(|node| &mut node.value),
            Place::BeforeBegin | Place::End => None,
        }
    }

    /// Inserts `value` right after `pos` and returns the position of the new element.
    ///
    /// Inserting after [`before_begin`](LinkedList::before_begin) inserts at the front.
    /// Other positions in the list stay valid.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end position or stale.
    /// A position taken from a different list is not detected when its slot
    /// happens to hold a live node here; it then anchors on that node.
    ///
    /// # Examples
    /// ```
    /// use single_linked_list::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// let first = list.insert_after(list.before_begin(), 'a');
    /// list.insert_after(first, 'c');
    /// list.insert_after(first, 'b');
    /// assert_eq!(list, LinkedList::from(['a', 'b', 'c']));
    /// ```
    pub fn insert_after(&mut self, pos: Position, value: T) -> Position {
        let anchor = self.anchor(pos, "insert");
        self.link_after(anchor, value)
    }

    /// Like [`insert_after`](LinkedList::insert_after), but reports a failed
    /// allocation instead of aborting. On error the list is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end position or stale.
    /// A position taken from a different list is not detected when its slot
    /// happens to hold a live node here; it then anchors on that node.
    pub fn try_insert_after(&mut self, pos: Position, value: T) -> Result<Position, ListError> {
        let anchor = self.anchor(pos, "insert");
        self.nodes.try_reserve_one()?;
        Ok(self.link_after(anchor, value))
    }

    /// Removes the element right after `pos` and returns it.
    ///
    /// Returns `None` and changes nothing if `pos` has no successor.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end position or stale.
    /// A position taken from a different list is not detected when its slot
    /// happens to hold a live node here; it then anchors on that node.
    pub fn remove_after(&mut self, pos: Position) -> Option<T> {
        let anchor = self.anchor(pos, "erase");
        self.unlink_after(anchor)
    }

    /// Drops the element right after `pos`, if there is one, and returns the
    /// position now following `pos`.
    ///
    /// Only positions referencing the erased element become stale.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end position or stale.
    /// A position taken from a different list is not detected when its slot
    /// happens to hold a live node here; it then anchors on that node.
    ///
    /// # Examples
    /// ```
    /// use single_linked_list::LinkedList;
    ///
    /// let mut list = LinkedList::from([1, 2, 3]);
    /// let one = list.begin();
    /// let three = list.erase_after(one);
    /// assert_eq!(list[three], 3);
    /// assert!(list.erase_after(three).is_end());
    /// assert_eq!(list, LinkedList::from([1, 3]));
    /// ```
    pub fn erase_after(&mut self, pos: Position) -> Position {
        let anchor = self.anchor(pos, "erase");
        self.unlink_after(anchor);
        self.position_of(self.next_link(anchor))
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.head)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let head = self.head;
        IterMut::new(&mut self.nodes, head)
    }

    /// Deep copy that reports a failed allocation instead of aborting.
    ///
    /// A partially built copy is dropped before the error is returned.
    pub fn try_clone(&self) -> Result<Self, ListError>
    where
        T: Clone,
    {
        let mut copy = LinkedList::new();
        let mut tail = copy.before_begin();
        for value in self {
            tail = copy.try_insert_after(tail, value.clone())?;
        }
        Ok(copy)
    }

    /// Makes `self` a copy of `source`.
    ///
    /// The copy is built completely before it replaces the old contents, so
    /// `self` is untouched when an error is returned.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), ListError>
    where
        T: Clone,
    {
        let mut replacement = source.try_clone()?;
        self.swap(&mut replacement);
        Ok(())
    }

    fn anchor(&self, pos: Position, operation: &str) -> Anchor {
        match pos.0 {
            Place::BeforeBegin => Anchor::Sentinel,
            Place::Node { index, generation } => {
                assert!(
                    self.nodes.is_live(index, generation),
                    "cannot {operation} after a stale position: its element was erased"
                );
                Anchor::Node(index)
            }
            Place::End => panic!("cannot {operation} after the end position"),
        }
    }

    fn next_link(&self, anchor: Anchor) -> Link {
        match anchor {
            Anchor::Sentinel => self.head,
            Anchor::Node(index) => self.nodes.node(index).next,
        }
    }

    fn next_link_mut(&mut self, anchor: Anchor) -> &mut Link {
        match anchor {
            Anchor::Sentinel => &mut self.head,
            Anchor::Node(index) => &mut self.nodes.node_mut(index).next,
        }
    }

    fn link_after(&mut self, anchor: Anchor, value: T) -> Position {
        let next = self.next_link(anchor);
        let (index, generation) = self.nodes.insert(Node { value, next });
        *self.next_link_mut(anchor) = Some(index);
        Position::node(index, generation)
    }

    fn unlink_after(&mut self, anchor: Anchor) -> Option<T> {
        let index = self.next_link(anchor)?;
        let removed = self.nodes.remove(index);
        *self.next_link_mut(anchor) = removed.next;
        Some(removed.value)
    }

    fn position_of(&self, link: Link) -> Position {
        match link {
            Some(index) => Position::node(index, self.nodes.generation(index)),
            None => Position::END,
        }
    }

    /// position of the last element, before-begin if the list is empty
    fn last_position(&self) -> Position {
        let mut last = Position::BEFORE_BEGIN;
        let mut link = self.head;
        while let Some(index) = link {
            last = Position::node(index, self.nodes.generation(index));
            link = self.nodes.node(index).next;
        }
        last
    }
}

/// Exchanges the contents of `lhs` and `rhs`. Same as `lhs.swap(rhs)`.
pub fn swap<T>(lhs: &mut LinkedList<T>, rhs: &mut LinkedList<T>) {
    lhs.swap(rhs);
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        LinkedList::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        let mut copy = LinkedList::new();
        let mut tail = copy.before_begin();
        for value in self {
            tail = copy.insert_after(tail, value.clone());
        }
        copy
    }

    /// copy-and-swap: the old contents are dropped only once the copy is complete
    fn clone_from(&mut self, source: &Self) {
        let mut replacement = source.clone();
        self.swap(&mut replacement);
    }
}

impl<T> Index<Position> for LinkedList<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics unless `pos` references a live element of this list.
    fn index(&self, pos: Position) -> &T {
        match self.get(pos) {
            Some(value) => value,
            None => panic!("{pos:?} does not reference an element of this list"),
        }
    }
}

impl<T> IndexMut<Position> for LinkedList<T> {
    fn index_mut(&mut self, pos: Position) -> &mut T {
        match self.get_mut(pos) {
            Some(value) => value,
            None => panic!("{pos:?} does not reference an element of this list"),
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    /// keeps the order of `iter`: its first item becomes the first element
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    /// appends at the back
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut tail = self.last_position();
        for value in iter {
            tail = self.insert_after(tail, value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for LinkedList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: PartialOrd> PartialOrd for LinkedList<T> {
    /// lexicographic, a strict prefix orders first
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for LinkedList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Hash> Hash for LinkedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}


// proptest doesn't run under miri
#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn from_sequence_traverses_in_order(values in prop::collection::vec(any::<i32>(), 0..64)) {
            let list: LinkedList<i32> = values.iter().copied().collect();
            prop_assert_eq!(list.len(), values.len());
            prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), values);
        }

        #[test]
        fn reverse_is_an_involution(values in prop::collection::vec(any::<i32>(), 0..64)) {
            let mut list = LinkedList::from(values.clone());
            list.reverse();
            let mut reversed = values.clone();
            reversed.reverse();
            prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), reversed);
            list.reverse();
            prop_assert_eq!(list, LinkedList::from(values));
        }

        #[test]
        fn mutating_a_clone_leaves_the_source(values in prop::collection::vec(any::<i32>(), 1..32)) {
            let source = LinkedList::from(values.clone());
            let mut copy = source.clone();
            prop_assert_eq!(&copy, &source);
            for value in copy.iter_mut() {
                *value = value.wrapping_add(1);
            }
            copy.pop_front();
            prop_assert_eq!(source, LinkedList::from(values));
        }

        #[test]
        fn push_then_pop_front_is_a_no_op(values in prop::collection::vec(any::<i32>(), 0..32), v in any::<i32>()) {
            let mut list = LinkedList::from(values.clone());
            list.push_front(v);
            prop_assert_eq!(list.pop_front(), Some(v));
            prop_assert_eq!(list, LinkedList::from(values));
        }

        #[test]
        fn insert_after_before_begin_matches_push_front(values in prop::collection::vec(any::<i32>(), 0..32), v in any::<i32>()) {
            let mut inserted = LinkedList::from(values.clone());
            inserted.insert_after(inserted.before_begin(), v);
            let mut pushed = LinkedList::from(values);
            pushed.push_front(v);
            prop_assert_eq!(inserted, pushed);
        }

        #[test]
        fn ordering_matches_slices(a in prop::collection::vec(0..4u8, 0..6), b in prop::collection::vec(0..4u8, 0..6)) {
            let lhs = LinkedList::from(a.clone());
            let rhs = LinkedList::from(b.clone());
            prop_assert_eq!(lhs.cmp(&rhs), a.cmp(&b));
            prop_assert_eq!(lhs == rhs, a == b);
        }

        #[test]
        fn swap_exchanges_by_value(a in prop::collection::vec(any::<i16>(), 0..16), b in prop::collection::vec(any::<i16>(), 0..16)) {
            let mut lhs = LinkedList::from(a.clone());
            let mut rhs = LinkedList::from(b.clone());
            lhs.swap(&mut rhs);
            prop_assert_eq!(lhs, LinkedList::from(b));
            prop_assert_eq!(rhs, LinkedList::from(a));
        }

        #[test]
        fn erasing_at_random_keeps_count_consistent(
            values in prop::collection::vec(any::<i32>(), 0..32),
            steps in prop::collection::vec(0..40usize, 0..40),
        ) {
            let mut list = LinkedList::from(values.clone());
            let mut model = values;
            for step in steps {
                let offset = step % (model.len() + 1);
                let mut pos = list.before_begin();
                for _ in 0..offset {
                    pos = list.next(pos);
                }
                list.erase_after(pos);
                if offset < model.len() {
                    model.remove(offset);
                }
                prop_assert_eq!(list.len(), model.len());
            }
            prop_assert_eq!(list.into_iter().collect::<Vec<_>>(), model);
        }
    }
}
