use std::{fmt, iter::FusedIterator};

use crate::{
    arena::{Arena, Link, NodesMut},
    linked_list::LinkedList,
};

/// An iterator over references to the elements of a [`LinkedList`], front to back.
///
/// Created by [`LinkedList::iter`]. Cloning it gives an independent second pass.
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    link: Link,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, head: Link) -> Self {
        Iter {
            nodes,
            link: head,
            remaining: nodes.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let index = self.link?;
        let node = self.nodes.node(index);
        self.link = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over mutable references to the elements of a [`LinkedList`].
///
/// Created by [`LinkedList::iter_mut`].
pub struct IterMut<'a, T> {
    nodes: NodesMut<'a, T>,
    link: Link,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(nodes: &'a mut Arena<T>, head: Link) -> Self {
        let remaining = nodes.len();
        IterMut {
            nodes: nodes.nodes_mut(),
            link: head,
            remaining,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let index = self.link?;
        // SAFETY: links form a single acyclic chain, so every index is reached once.
        let node = unsafe { self.nodes.node_mut(index) };
        self.link = node.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

// SAFETY: `IterMut` behaves like `&mut [T]`; the raw pointer inside is only a
// way to split the borrow between nodes.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// An owning iterator over the elements of a [`LinkedList`].
///
/// Created by [`LinkedList::into_iter`](IntoIterator::into_iter).
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(list: LinkedList<T>) -> Self {
        IntoIter { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}
