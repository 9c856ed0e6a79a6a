//! Singly-linked task list — lazy O(1) unlink
//!
//! A singly-linked node cannot be unlinked without its predecessor, so
//! `remove` only clears membership. The node stays threaded until the
//! next walk steps over it, where the predecessor is at hand.
//!
//! A slot re-joined before any walk has passed it keeps its old position.

use crate::list::TaskList;

/// Where the walk stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Next candidate is the head
    Head,
    /// Next candidate follows this slot
    After(usize),
}

/// Singly-linked list over slots `0..N`
#[derive(Debug, Clone)]
pub struct SList<const N: usize> {
    next: [Option<usize>; N],
    /// Physically threaded into the chain
    threaded: [bool; N],
    /// Logically a member
    member: [bool; N],
    members: usize,
    head: Option<usize>,
    tail: Option<usize>,
    cursor: Cursor,
}

impl<const N: usize> SList<N> {
    /// Create empty list
    pub const fn new() -> Self {
        Self {
            next: [None; N],
            threaded: [false; N],
            member: [false; N],
            members: 0,
            head: None,
            tail: None,
            cursor: Cursor::Head,
        }
    }

    /// Unlink `slot`, whose predecessor is `prev` (`None` = head)
    fn unthread(&mut self, prev: Option<usize>, slot: usize) {
        let next = self.next[slot];
        match prev {
            Some(p) => self.next[p] = next,
            None => self.head = next,
        }
        if self.tail == Some(slot) {
            self.tail = prev;
        }
        self.next[slot] = None;
        self.threaded[slot] = false;
    }

    fn candidate(&self) -> Option<usize> {
        match self.cursor {
            Cursor::Head => self.head,
            Cursor::After(p) => self.next[p],
        }
    }
}

impl<const N: usize> Default for SList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TaskList<N> for SList<N> {
    const EMPTY: Self = Self::new();

    fn push_back(&mut self, slot: usize) -> bool {
        if slot >= N || self.member[slot] {
            return false;
        }
        self.member[slot] = true;
        self.members += 1;
        if !self.threaded[slot] {
            self.next[slot] = None;
            match self.tail {
                Some(t) => self.next[t] = Some(slot),
                None => self.head = Some(slot),
            }
            self.tail = Some(slot);
            self.threaded[slot] = true;
        }
        true
    }

    fn remove(&mut self, slot: usize) -> bool {
        if !self.contains(slot) {
            return false;
        }
        self.member[slot] = false;
        self.members -= 1;
        true
    }

    fn contains(&self, slot: usize) -> bool {
        slot < N && self.member[slot]
    }

    fn is_empty(&self) -> bool {
        self.members == 0
    }

    fn rewind(&mut self) {
        self.cursor = Cursor::Head;
    }

    fn advance(&mut self) -> Option<usize> {
        loop {
            let slot = self.candidate()?;
            if self.member[slot] {
                self.cursor = Cursor::After(slot);
                return Some(slot);
            }
            let prev = match self.cursor {
                Cursor::Head => None,
                Cursor::After(p) => Some(p),
            };
            self.unthread(prev, slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk<const N: usize>(list: &mut SList<N>, out: &mut [usize]) -> usize {
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
        let mut list = SList::<4>::new();
        assert!(list.is_empty());
        list.push_back(3);
        list.push_back(1);
        let mut out = [0; 4];
        assert_eq!(walk(&mut list, &mut out), 2);
        assert_eq!(&out[..2], &[3, 1]);
    }

    #[test]
    fn test_lazy_remove_is_reaped_by_walk() {
        let mut list = SList::<4>::new();
        for slot in 0..3 {
            list.push_back(slot);
        }
        assert!(list.remove(1));
        assert!(!list.remove(1));
        assert!(!list.contains(1));
        // still threaded until a walk passes over it
        assert!(list.threaded[1]);

        let mut out = [0; 4];
        assert_eq!(walk(&mut list, &mut out), 2);
        assert_eq!(&out[..2], &[0, 2]);
        assert!(!list.threaded[1]);
    }

    #[test]
    fn test_rejoin_before_reap_keeps_position() {
        let mut list = SList::<4>::new();
        for slot in 0..3 {
            list.push_back(slot);
        }
        list.remove(0);
        assert!(list.push_back(0));
        let mut out = [0; 4];
        assert_eq!(walk(&mut list, &mut out), 3);
        assert_eq!(&out[..3], &[0, 1, 2]);
    }

    #[test]
    fn test_rejoin_after_reap_appends() {
        let mut list = SList::<4>::new();
        for slot in 0..3 {
            list.push_back(slot);
        }
        list.remove(0);
        let mut out = [0; 4];
        walk(&mut list, &mut out);
        list.push_back(0);
        assert_eq!(walk(&mut list, &mut out), 3);
        assert_eq!(&out[..3], &[1, 2, 0]);
    }

    #[test]
    fn test_reap_tail_fixes_append() {
        let mut list = SList::<4>::new();
        list.push_back(0);
        list.push_back(1);
        list.remove(1);
        let mut out = [0; 4];
        assert_eq!(walk(&mut list, &mut out), 1);
        list.push_back(2);
        assert_eq!(walk(&mut list, &mut out), 2);
        assert_eq!(&out[..2], &[0, 2]);
    }

    #[test]
    fn test_remove_during_walk() {
        let mut list = SList::<4>::new();
        for slot in 0..4 {
            list.push_back(slot);
        }
        list.rewind();
        assert_eq!(list.advance(), Some(0));
        list.remove(0);
        list.remove(1);
        assert_eq!(list.advance(), Some(2));
        list.remove(3);
        assert_eq!(list.advance(), None);
        assert!(!list.is_empty());
        list.remove(2);
        assert!(list.is_empty());
    }

    #[test]
    fn test_all_removed_empties_chain() {
        let mut list = SList::<2>::new();
        list.push_back(0);
        list.push_back(1);
        list.remove(0);
        list.remove(1);
        assert!(list.is_empty());
        let mut out = [0; 2];
        assert_eq!(walk(&mut list, &mut out), 0);
        assert_eq!(list.head, None);
        assert_eq!(list.tail, None);
    }
}
