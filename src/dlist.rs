//! Doubly-linked task list — eager O(1) unlink
//!
//! Links are slot indices into fixed arrays, no heap.
//! The walk remembers the slot it will return next; removing that slot
//! moves the walk on to its successor.

use crate::list::TaskList;

/// Doubly-linked list over slots `0..N`
///
/// Size: N × (2 links + flag) + 3 cursors
#[derive(Debug, Clone)]
pub struct DList<const N: usize> {
    next: [Option<usize>; N],
    prev: [Option<usize>; N],
    linked: [bool; N],
    head: Option<usize>,
    tail: Option<usize>,
    /// Slot the walk returns next
    walk: Option<usize>,
}

impl<const N: usize> DList<N> {
    /// Create empty list
    pub const fn new() -> Self {
        Self {
            next: [None; N],
            prev: [None; N],
            linked: [false; N],
            head: None,
            tail: None,
            walk: None,
        }
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.prev[slot], self.next[slot]);
        match prev {
            Some(p) => self.next[p] = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.prev[n] = prev,
            None => self.tail = prev,
        }
        self.prev[slot] = None;
        self.next[slot] = None;
        self.linked[slot] = false;
    }
}

impl<const N: usize> Default for DList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TaskList<N> for DList<N> {
    const EMPTY: Self = Self::new();

    fn push_back(&mut self, slot: usize) -> bool {
        if slot >= N || self.linked[slot] {
            return false;
        }
        self.prev[slot] = self.tail;
        self.next[slot] = None;
        match self.tail {
            Some(t) => self.next[t] = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.linked[slot] = true;
        true
    }

    fn remove(&mut self, slot: usize) -> bool {
        if !self.contains(slot) {
            return false;
        }
        if self.walk == Some(slot) {
            self.walk = self.next[slot];
        }
        self.unlink(slot);
        true
    }

    fn contains(&self, slot: usize) -> bool {
        slot < N && self.linked[slot]
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn rewind(&mut self) {
        self.walk = self.head;
    }

    fn advance(&mut self) -> Option<usize> {
        let slot = self.walk?;
        self.walk = self.next[slot];
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk<const N: usize>(list: &mut DList<N>, out: &mut [usize]) -> usize {
        list.rewind();
        let mut n = 0;
        while let Some(slot) = list.advance() {
            out[n] = slot;
            n += 1;
        }
        n
    }

    #[test]
    fn test_push_back_order() {
        let mut list = DList::<4>::new();
        assert!(list.is_empty());
        assert!(list.push_back(2));
        assert!(list.push_back(0));
        assert!(list.push_back(3));
        let mut out = [0; 4];
        assert_eq!(walk(&mut list, &mut out), 3);
        assert_eq!(&out[..3], &[2, 0, 3]);
    }

    #[test]
    fn test_double_push_and_remove() {
        let mut list = DList::<4>::new();
        assert!(list.push_back(1));
        assert!(!list.push_back(1));
        assert!(list.remove(1));
        assert!(!list.remove(1));
        assert!(list.is_empty());
        assert!(!list.contains(1));
    }

    #[test]
    fn test_out_of_range_slot() {
        let mut list = DList::<2>::new();
        assert!(!list.push_back(2));
        assert!(!list.remove(5));
        assert!(!list.contains(7));
    }

    #[test]
    fn test_remove_middle_and_tail() {
        let mut list = DList::<4>::new();
        for slot in 0..4 {
            list.push_back(slot);
        }
        list.remove(1);
        list.remove(3);
        let mut out = [0; 4];
        assert_eq!(walk(&mut list, &mut out), 2);
        assert_eq!(&out[..2], &[0, 2]);
        // tail must be fixed up: append lands after 2
        list.push_back(3);
        assert_eq!(walk(&mut list, &mut out), 3);
        assert_eq!(&out[..3], &[0, 2, 3]);
    }

    #[test]
    fn test_remove_current_during_walk() {
        let mut list = DList::<4>::new();
        for slot in 0..4 {
            list.push_back(slot);
        }
        list.rewind();
        assert_eq!(list.advance(), Some(0));
        list.remove(0);
        assert_eq!(list.advance(), Some(1));
        assert_eq!(list.advance(), Some(2));
        assert_eq!(list.advance(), Some(3));
        assert_eq!(list.advance(), None);
    }

    #[test]
    fn test_remove_upcoming_during_walk() {
        let mut list = DList::<4>::new();
        for slot in 0..4 {
            list.push_back(slot);
        }
        list.rewind();
        assert_eq!(list.advance(), Some(0));
        // 1 is next in line; both it and the current slot go away
        list.remove(1);
        list.remove(0);
        assert_eq!(list.advance(), Some(2));
        list.remove(3);
        assert_eq!(list.advance(), None);
    }

    #[test]
    fn test_push_during_walk_is_reached() {
        let mut list = DList::<4>::new();
        list.push_back(0);
        list.push_back(1);
        list.rewind();
        assert_eq!(list.advance(), Some(0));
        list.push_back(2);
        assert_eq!(list.advance(), Some(1));
        assert_eq!(list.advance(), Some(2));
        assert_eq!(list.advance(), None);
    }
}
