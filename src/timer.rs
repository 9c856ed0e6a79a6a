//! Tick latch — interrupt-safe hand-off of elapsed ticks
//!
//! The hardware timer ISR calls `signal()`; the main loop drains the
//! pending count with `Scheduler::poll`. The ISR never touches task
//! state, so tick and exec stay in one execution context.
//! Critical section rather than atomics: riscv32imc and thumbv6m have
//! no atomic read-modify-write.

use core::cell::Cell;

use critical_section::Mutex;

/// Pending tick counter
///
/// Size: 4 bytes
pub struct TickLatch {
    pending: Mutex<Cell<u32>>,
}

impl TickLatch {
    /// Create an empty latch, usable in a `static`
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(0)),
        }
    }

    /// Record one elapsed tick (ISR side). Saturates at `u32::MAX`.
    pub fn signal(&self) {
        critical_section::with(|cs| {
            let pending = self.pending.borrow(cs);
            pending.set(pending.get().saturating_add(1));
        });
    }

    /// Ticks recorded and not yet taken
    pub fn pending(&self) -> u32 {
        critical_section::with(|cs| self.pending.borrow(cs).get())
    }

    /// Take every pending tick, leaving the latch empty
    pub fn take(&self) -> u32 {
        critical_section::with(|cs| self.pending.borrow(cs).replace(0))
    }
}

impl Default for TickLatch {
    fn default() -> Self {
        Self::new()
    }
}
