//! A singly linked list with a before-begin sentinel.
//!
//! [`LinkedList`] supports forward traversal, insertion and removal right after
//! any [`Position`] (including the sentinel, which makes the front an ordinary
//! case), in-place reversal, O(1) swap, and value semantics: deep [`Clone`],
//! equality, lexicographic ordering and hashing.
//!
//! ```
//! use single_linked_list::LinkedList;
//!
//! let mut list: LinkedList<i32> = (1..=3).collect();
//! let mut pos = list.before_begin();
//! while !list.next(pos).is_end() {
//!     pos = list.next(pos);
//! }
//! list.insert_after(pos, 4);
//! assert_eq!(list, LinkedList::from([1, 2, 3, 4]));
//! assert!(LinkedList::from([1, 2]) < list);
//! ```
mod arena;
mod error;
mod iter;
mod linked_list;
mod position;

pub use error::ListError;
pub use iter::{IntoIter, Iter, IterMut};
pub use linked_list::{swap, LinkedList};
pub use position::Position;
