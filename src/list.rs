//! Task list capability
//!
//! The scheduler keeps joined tasks in a list addressed by slot index.
//! Any backend that can append, remove a given slot, test membership and
//! walk forward while slots are removed underneath it will do.

/// Fixed-capacity list of slot indices `0..N`.
///
/// The walk (`rewind` + `advance`) must stay valid across any
/// `push_back`/`remove` issued between two `advance` calls, including
/// removal of the slot most recently returned and of the slot about to
/// be returned.
pub trait TaskList<const N: usize> {
    /// Empty list, usable in `const` contexts
    const EMPTY: Self;

    /// Append `slot` at the end. Returns false if it was already a member.
    fn push_back(&mut self, slot: usize) -> bool;

    /// Remove `slot`. Returns false if it was not a member.
    fn remove(&mut self, slot: usize) -> bool;

    /// Is `slot` currently a member?
    fn contains(&self, slot: usize) -> bool;

    /// O(1) emptiness test
    fn is_empty(&self) -> bool;

    /// Restart the walk at the head of the list
    fn rewind(&mut self);

    /// Next member of the walk, or `None` when the walk is finished
    fn advance(&mut self) -> Option<usize>;
}
