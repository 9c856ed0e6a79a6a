//! Task definition — static, no-alloc task descriptors
//!
//! A task is a callback plus a countdown. Periodic tasks reload the
//! countdown every time they fire; one-shot tasks fire once and leave
//! the scheduler.

use core::fmt;

use crate::dlist::DList;
use crate::scheduler::Exec;

/// Maximum tasks a scheduler holds unless told otherwise
pub const MAX_TASKS: usize = 16;

/// Scheduling time unit: one call to `tick`
pub type Ticks = u32;

/// Task callback
///
/// Receives the dispatch handle for the running task and a copy of the
/// task's context.
pub type TaskFn<C, const N: usize = MAX_TASKS, L = DList<N>> = fn(&mut Exec<'_, C, N, L>, C);

/// What happens after a task fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Reload the timer and keep firing until dropped ("cron")
    Periodic,
    /// Drop right after the first execution ("once")
    OneShot,
}

/// Task descriptor
///
/// `context` is an opaque, host-owned value handed to the callback on
/// every run, typically a `&'static` reference to interrupt-safe state.
pub struct Task<C, const N: usize = MAX_TASKS, L = DList<N>> {
    /// Interval in ticks
    pub(crate) slice: Ticks,
    /// Ticks left until the task becomes ready
    pub(crate) timer: Ticks,
    pub(crate) callback: TaskFn<C, N, L>,
    pub(crate) context: C,
    pub(crate) kind: TaskKind,
    /// Set by tick, cleared by exec and drop
    pub(crate) ready: bool,
}

impl<C: Copy, const N: usize, L> Task<C, N, L> {
    /// Create a periodic task firing every `slice` ticks
    ///
    /// A zero slice never fires: the countdown only runs while non-zero.
    pub fn periodic(callback: TaskFn<C, N, L>, context: C, slice: Ticks) -> Self {
        Self {
            slice,
            timer: slice,
            callback,
            context,
            kind: TaskKind::Periodic,
            ready: false,
        }
    }

    /// Create a one-shot task firing once after `delay` ticks
    pub fn one_shot(callback: TaskFn<C, N, L>, context: C, delay: Ticks) -> Self {
        Self {
            slice: delay,
            timer: delay,
            callback,
            context,
            kind: TaskKind::OneShot,
            ready: false,
        }
    }

    /// Advance the countdown by one tick. Returns true if the task just
    /// became ready.
    pub(crate) fn tick(&mut self) -> bool {
        if self.timer == 0 {
            return false;
        }
        self.timer -= 1;
        if self.timer == 0 {
            self.ready = true;
            self.timer = self.slice;
            return true;
        }
        false
    }

    /// Interval in ticks
    pub fn slice(&self) -> Ticks {
        self.slice
    }

    /// Ticks left until the task becomes ready
    pub fn timer(&self) -> Ticks {
        self.timer
    }

    /// Periodic or one-shot
    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Context handed to the callback
    pub fn context(&self) -> C {
        self.context
    }

    /// Has the timer expired since the last dispatch pass?
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

impl<C: Copy, const N: usize, L> Clone for Task<C, N, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Copy, const N: usize, L> Copy for Task<C, N, L> {}

impl<C: fmt::Debug, const N: usize, L> fmt::Debug for Task<C, N, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("slice", &self.slice)
            .field("timer", &self.timer)
            .field("context", &self.context)
            .field("kind", &self.kind)
            .field("ready", &self.ready)
            .finish_non_exhaustive()
    }
}

/// Handle to a task slot, returned by `Scheduler::insert`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub(crate) usize);

impl TaskId {
    /// Slot index in the task table
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
