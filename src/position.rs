/// A handle to a place in a [`LinkedList`](crate::LinkedList).
///
/// A position is one of
/// - the before-begin position, returned by
///   [`LinkedList::before_begin`](crate::LinkedList::before_begin). It stands
///   for the list's sentinel and can only be used as an anchor for
///   [`insert_after`](crate::LinkedList::insert_after),
///   [`erase_after`](crate::LinkedList::erase_after) and
///   [`next`](crate::LinkedList::next);
/// - a position referencing one element;
/// - the end position, one past the last element.
///
/// Positions do not borrow the list. A position referencing an element stays
/// valid through any insertion or erasure elsewhere in the list, and becomes
/// stale once its own element is erased or the list is cleared. Stale positions
/// are detected: [`get`](crate::LinkedList::get) returns `None` for them and
/// the anchoring operations panic.
///
/// Two positions are equal when they denote the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(pub(crate) Place);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Place {
    BeforeBegin,
    Node { index: usize, generation: u32 },
    End,
}

impl Position {
    pub(crate) const BEFORE_BEGIN: Position = Position(Place::BeforeBegin);
    pub(crate) const END: Position = Position(Place::End);

    pub(crate) const fn node(index: usize, generation: u32) -> Position {
        Position(Place::Node { index, generation })
    }

    /// `true` for the position one past the last element
    pub fn is_end(&self) -> bool {
        matches!(self.0, Place::End)
    }

    /// `true` for the sentinel position preceding the first element
    pub fn is_before_begin(&self) -> bool {
        matches!(self.0, Place::BeforeBegin)
    }
}
