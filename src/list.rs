//! Arena-backed doubly linked list.
//!
//! Nodes live in a `Vec` of slots and link to each other by slot index, so the
//! list never needs raw pointers and the cache index can refer to a node with
//! a plain `usize`. Slot indices stay stable for as long as the node is linked;
//! once a node is removed its slot goes onto a free list and may be handed out
//! again by a later [`List::add`].

use std::fmt;

/// Marker for "no slot" in `prev`/`next` links and `head`/`tail`.
const NIL: usize = usize::MAX;

/// A node in the list.
///
/// Holds the stored value plus the indices of its neighbours. A `None` value
/// marks a vacant slot sitting on the free list.
struct Slot<T> {
    val: Option<T>,
    prev: usize,
    next: usize,
}

/// A doubly linked list whose nodes are addressed by stable slot indices.
///
/// The front of the list is the most recently added or promoted node; the
/// back is the oldest. All linking operations are O(1).
///
/// # Examples
///
/// ```ignore
/// use sync_lru::list::List;
///
/// let mut list = List::with_capacity(3);
///
/// let a = list.add(10);
/// let b = list.add(20);
///
/// list.move_to_front(a);
/// assert_eq!(list.remove_last(), Some(20));
/// ```
pub(crate) struct List<T> {
    slots: Vec<Slot<T>>,
    /// Vacant slot indices available for reuse.
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list with room for `cap` nodes before reallocating.
    pub(crate) fn with_capacity(cap: usize) -> Self {
        List {
            slots: Vec::with_capacity(cap),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    /// Returns the number of linked nodes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no nodes are linked.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pushes `val` onto the front of the list and returns its slot index.
    pub(crate) fn add(&mut self, val: T) -> usize {
        let slot = Slot {
            val: Some(val),
            prev: NIL,
            next: NIL,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = slot;
                idx
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };
        self.attach(idx);
        self.len += 1;
        idx
    }

    /// Unlinks the node at `idx` and returns its value.
    ///
    /// Returns `None` if `idx` does not refer to a linked node.
    pub(crate) fn remove(&mut self, idx: usize) -> Option<T> {
        if !self.is_linked(idx) {
            return None;
        }
        self.detach(idx);
        self.len -= 1;
        self.free.push(idx);
        self.slots[idx].val.take()
    }

    /// Unlinks the back (oldest) node and returns its value.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        if self.tail == NIL {
            return None;
        }
        self.remove(self.tail)
    }

    /// Moves the node at `idx` to the front of the list.
    ///
    /// Does nothing if `idx` is already the front or is not linked.
    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if idx == self.head || !self.is_linked(idx) {
            return;
        }
        self.detach(idx);
        self.attach(idx);
    }

    /// Returns a reference to the value at `idx`.
    #[inline]
    pub(crate) fn get_value(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx).and_then(|slot| slot.val.as_ref())
    }

    /// Returns a mutable reference to the value at `idx`.
    #[inline]
    pub(crate) fn get_value_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots.get_mut(idx).and_then(|slot| slot.val.as_mut())
    }

    /// Returns the value at the back of the list without unlinking it.
    pub(crate) fn back(&self) -> Option<&T> {
        self.get_value(self.tail)
    }

    /// Iterates values from front (newest) to back (oldest).
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Drops every node and releases the free list.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    #[inline]
    fn is_linked(&self, idx: usize) -> bool {
        self.slots.get(idx).is_some_and(|slot| slot.val.is_some())
    }

    /// Splices the slot at `idx` in at the front. The slot must be unlinked.
    fn attach(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let slot = &mut self.slots[idx];
            slot.prev = NIL;
            slot.next = old_head;
        }
        if old_head != NIL {
            self.slots[old_head].prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
    }

    /// Unlinks the slot at `idx` from its neighbours without freeing it.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let slot = &self.slots[idx];
            (slot.prev, slot.next)
        };
        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }
        let slot = &mut self.slots[idx];
        slot.prev = NIL;
        slot.next = NIL;
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    cursor: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cursor == NIL {
            return None;
        }
        let slot = &self.list.slots[self.cursor];
        self.cursor = slot.next;
        self.remaining -= 1;
        slot.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_add_items() {
        let mut list = List::with_capacity(3);
        assert!(list.is_empty());
        list.add(1);
        list.add(2);
        list.add(3);
        assert_eq!(list.len(), 3);
        assert_eq!(collect(&list), vec![3, 2, 1]);
        assert_eq!(list.back(), Some(&1));
    }

    #[test]
    fn test_update_item() {
        let mut list = List::with_capacity(2);
        let idx = list.add(10);
        assert_eq!(list.get_value(idx), Some(&10));
        if let Some(v) = list.get_value_mut(idx) {
            *v = 20;
        }
        assert_eq!(list.get_value(idx), Some(&20));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_last_order() {
        let mut list = List::with_capacity(3);
        list.add("a");
        list.add("b");
        list.add("c");
        assert_eq!(list.remove_last(), Some("a"));
        assert_eq!(list.remove_last(), Some("b"));
        assert_eq!(list.remove_last(), Some("c"));
        assert_eq!(list.remove_last(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_middle() {
        let mut list = List::with_capacity(3);
        list.add(1);
        let mid = list.add(2);
        list.add(3);
        assert_eq!(list.remove(mid), Some(2));
        assert_eq!(collect(&list), vec![3, 1]);
        // Second removal of the same slot is a no-op.
        assert_eq!(list.remove(mid), None);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::with_capacity(3);
        let a = list.add('a');
        let b = list.add('b');
        list.add('c');
        list.move_to_front(a);
        assert_eq!(collect(&list), vec!['a', 'c', 'b']);
        list.move_to_front(b);
        assert_eq!(collect(&list), vec!['b', 'a', 'c']);
        assert_eq!(list.back(), Some(&'c'));
        // Promoting the head leaves the order untouched.
        list.move_to_front(b);
        assert_eq!(collect(&list), vec!['b', 'a', 'c']);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_to_front_of_removed_slot_is_ignored() {
        let mut list = List::with_capacity(2);
        let a = list.add(1);
        list.add(2);
        list.remove(a);
        list.move_to_front(a);
        assert_eq!(collect(&list), vec![2]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = List::with_capacity(2);
        let a = list.add(1);
        list.add(2);
        list.remove(a);
        let c = list.add(3);
        assert_eq!(a, c);
        assert_eq!(list.slots.len(), 2);
        assert_eq!(collect(&list), vec![3, 2]);
    }

    #[test]
    fn test_single_node_head_and_tail() {
        let mut list = List::with_capacity(1);
        let a = list.add(String::from("only"));
        assert_eq!(list.back().map(String::as_str), Some("only"));
        assert_eq!(list.remove(a).as_deref(), Some("only"));
        assert_eq!(list.back(), None);
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut list = List::with_capacity(3);
        list.add(1);
        list.add(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter().next(), None);
        list.add(3);
        assert_eq!(collect(&list), vec![3]);
    }

    #[test]
    fn test_length_consistency_after_complex_operations() {
        let mut list = List::with_capacity(8);
        let mut handles = Vec::new();
        for i in 0..8 {
            handles.push(list.add(i));
        }
        for (n, idx) in handles.iter().enumerate() {
            if n % 2 == 0 {
                list.remove(*idx);
            } else {
                list.move_to_front(*idx);
            }
        }
        assert_eq!(list.len(), 4);
        assert_eq!(list.iter().count(), 4);
        assert_eq!(collect(&list), vec![7, 5, 3, 1]);
        assert_eq!(list.iter().size_hint(), (4, Some(4)));
    }
}
