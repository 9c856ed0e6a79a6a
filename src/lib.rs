//! timeslice — cooperative timeslice scheduler
//!
//! Tick the timers, run what is due.
//!
//! Minimal scheduler for bare-metal main loops:
//! - Static task table (no heap, no allocation)
//! - Periodic and one-shot tasks counted down in ticks
//! - Callbacks may join/drop any task, themselves included, mid-pass
//! - One scheduling algorithm over interchangeable list backends
//!   (doubly-linked `DList`, singly-linked `SList`)
//! - ISR-safe tick hand-off through `TickLatch`

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod task;
pub mod list;
pub mod dlist;
pub mod slist;
pub mod scheduler;
pub mod timer;

pub use task::{Task, TaskFn, TaskId, TaskKind, Ticks, MAX_TASKS};
pub use list::TaskList;
pub use dlist::DList;
pub use slist::SList;
pub use scheduler::{Exec, InsertError, Scheduler};
pub use timer::TickLatch;
