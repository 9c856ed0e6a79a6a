//! Cooperative timeslice scheduler
//!
//! Two independent entry points driven by the host:
//! - `tick()` advances every joined task's countdown by one unit
//! - `exec()` makes one dispatch pass and runs every ready task
//!
//! Callbacks get an [`Exec`] handle and may join or drop any task,
//! themselves included, in the middle of the pass.
//!
//! Every mutating operation takes `&mut self`: tick and exec run from
//! one logical execution context. An interrupt-driven time source
//! should signal a [`TickLatch`] and let the main loop call
//! [`Scheduler::poll`], or wrap the scheduler in a critical section.

use core::fmt;

use log::{debug, trace, warn};

use crate::dlist::DList;
use crate::list::TaskList;
use crate::task::{Task, TaskFn, TaskId, TaskKind, Ticks, MAX_TASKS};
use crate::timer::TickLatch;

/// Timeslice scheduler
///
/// Static task table, no dynamic allocation. Slots are claimed with
/// [`insert`](Self::insert) and never released; joining and dropping
/// only touches the list links.
pub struct Scheduler<C, const N: usize = MAX_TASKS, L = DList<N>> {
    /// Static task table
    tasks: [Option<Task<C, N, L>>; N],
    /// Number of claimed slots
    len: usize,
    /// Joined tasks in join order
    list: L,
    /// Number of joined tasks
    count: usize,
}

impl<C: Copy, const N: usize, L: TaskList<N>> Scheduler<C, N, L> {
    /// Create empty scheduler
    pub const fn new() -> Self {
        Self {
            tasks: [None; N],
            len: 0,
            list: L::EMPTY,
            count: 0,
        }
    }

    /// Store a task in the next free slot. The task is not joined.
    pub fn insert(&mut self, task: Task<C, N, L>) -> Result<TaskId, InsertError<Task<C, N, L>>> {
        if self.len >= N {
            warn!("timeslice: task table full ({} slots)", N);
            return Err(InsertError::Full(task));
        }
        let id = TaskId(self.len);
        self.tasks[self.len] = Some(task);
        self.len += 1;
        debug!("timeslice: task {} stored ({:?}, slice {})", id, task.kind, task.slice);
        Ok(id)
    }

    /// Re-initialize a stored task as periodic
    ///
    /// Overwrites timer, slice, callback, context and kind. List
    /// membership is left alone; doing this to a joined task is a
    /// caller error.
    pub fn init_periodic(&mut self, id: TaskId, callback: TaskFn<C, N, L>, context: C, slice: Ticks) {
        if let Some(task) = self.task_mut(id) {
            *task = Task::periodic(callback, context, slice);
            debug!("timeslice: task {} reset periodic, slice {}", id, slice);
        }
    }

    /// Re-initialize a stored task as one-shot. Same caveats as
    /// [`init_periodic`](Self::init_periodic).
    pub fn init_one_shot(&mut self, id: TaskId, callback: TaskFn<C, N, L>, context: C, delay: Ticks) {
        if let Some(task) = self.task_mut(id) {
            *task = Task::one_shot(callback, context, delay);
            debug!("timeslice: task {} reset one-shot, delay {}", id, delay);
        }
    }

    /// Admit a task into the dispatch set. No-op if already joined.
    pub fn join(&mut self, id: TaskId) {
        if self.task(id).is_none() {
            return;
        }
        if self.list.push_back(id.0) {
            self.count += 1;
            trace!("timeslice: join {} (count {})", id, self.count);
        }
    }

    /// Remove a task from the dispatch set and clear its ready flag.
    /// No-op if not joined.
    pub fn drop(&mut self, id: TaskId) {
        if !self.list.remove(id.0) {
            return;
        }
        self.count -= 1;
        if let Some(task) = self.task_mut(id) {
            task.ready = false;
        }
        trace!("timeslice: drop {} (count {})", id, self.count);
    }

    /// Advance every joined task's timer by one tick
    pub fn tick(&mut self) {
        self.list.rewind();
        while let Some(slot) = self.list.advance() {
            if let Some(task) = self.tasks[slot].as_mut() {
                if task.tick() {
                    trace!("timeslice: task #{} ready", slot);
                }
            }
        }
    }

    /// One dispatch pass: run every ready task once
    ///
    /// The list walk tolerates any join/drop issued by the callbacks.
    /// One-shot tasks are dropped after their callback returns, even if
    /// the callback already dropped (or re-joined) itself.
    ///
    /// Returns the number of callbacks invoked.
    pub fn exec(&mut self) -> usize {
        let mut fired = 0;
        self.list.rewind();
        while let Some(slot) = self.list.advance() {
            let id = TaskId(slot);
            let Some(task) = self.tasks[slot].as_mut() else {
                continue;
            };
            if !task.ready {
                continue;
            }
            task.ready = false;
            let (callback, context) = (task.callback, task.context);

            callback(&mut Exec { scheduler: &mut *self, id }, context);
            fired += 1;

            if self.task(id).map(|t| t.kind) == Some(TaskKind::OneShot) {
                self.drop(id);
            }
        }
        fired
    }

    /// Apply every tick pending on `latch`, each followed by a dispatch
    /// pass. Returns the number of callbacks invoked.
    pub fn poll(&mut self, latch: &TickLatch) -> usize {
        let mut fired = 0;
        for _ in 0..latch.take() {
            self.tick();
            fired += self.exec();
        }
        fired
    }

    /// Is the task currently joined?
    pub fn exists(&self, id: TaskId) -> bool {
        self.task(id).is_some() && self.list.contains(id.0)
    }

    /// Number of joined tasks
    pub fn count(&self) -> usize {
        self.count
    }

    /// Is no task joined?
    pub fn is_idle(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of claimed slots
    pub fn len(&self) -> usize {
        self.len
    }

    /// Has no slot been claimed yet?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slots in the task table
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Get task by id
    pub fn get(&self, id: TaskId) -> Option<&Task<C, N, L>> {
        self.task(id)
    }

    /// Ticks left until the task fires (0 for an unknown id)
    pub fn timer(&self, id: TaskId) -> Ticks {
        self.task(id).map_or(0, |t| t.timer)
    }

    /// Configured interval (0 for an unknown id)
    pub fn slice(&self, id: TaskId) -> Ticks {
        self.task(id).map_or(0, |t| t.slice)
    }

    /// Periodic or one-shot
    pub fn kind(&self, id: TaskId) -> Option<TaskKind> {
        self.task(id).map(|t| t.kind)
    }

    /// Is the task waiting for the next dispatch pass?
    pub fn is_ready(&self, id: TaskId) -> bool {
        self.task(id).map_or(false, |t| t.ready)
    }

    /// Context handed to the callback
    pub fn context(&self, id: TaskId) -> Option<C> {
        self.task(id).map(|t| t.context)
    }

    /// Overwrite the remaining ticks
    pub fn set_timer(&mut self, id: TaskId, timer: Ticks) {
        if let Some(task) = self.task_mut(id) {
            task.timer = timer;
        }
    }

    /// Overwrite the interval, used from the next reload
    pub fn set_slice(&mut self, id: TaskId, slice: Ticks) {
        if let Some(task) = self.task_mut(id) {
            task.slice = slice;
        }
    }

    /// Replace the callback
    pub fn set_callback(&mut self, id: TaskId, callback: TaskFn<C, N, L>) {
        if let Some(task) = self.task_mut(id) {
            task.callback = callback;
        }
    }

    /// Replace the context
    pub fn set_context(&mut self, id: TaskId, context: C) {
        if let Some(task) = self.task_mut(id) {
            task.context = context;
        }
    }

    fn task(&self, id: TaskId) -> Option<&Task<C, N, L>> {
        self.tasks.get(id.0)?.as_ref()
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task<C, N, L>> {
        self.tasks.get_mut(id.0)?.as_mut()
    }
}

impl<C: Copy, const N: usize, L: TaskList<N>> Default for Scheduler<C, N, L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatch handle passed to a running callback
///
/// Identifies the task being executed and gives access to the registry.
/// It cannot tick, start another pass or store new tasks.
pub struct Exec<'a, C, const N: usize = MAX_TASKS, L = DList<N>> {
    scheduler: &'a mut Scheduler<C, N, L>,
    id: TaskId,
}

impl<C: Copy, const N: usize, L: TaskList<N>> Exec<'_, C, N, L> {
    /// The task currently executing
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Join a task, see [`Scheduler::join`]
    pub fn join(&mut self, id: TaskId) {
        self.scheduler.join(id);
    }

    /// Drop a task. Dropping the running task stops it from being
    /// visited again in this pass.
    pub fn drop(&mut self, id: TaskId) {
        self.scheduler.drop(id);
    }

    /// Is the task joined?
    pub fn exists(&self, id: TaskId) -> bool {
        self.scheduler.exists(id)
    }

    /// Number of joined tasks
    pub fn count(&self) -> usize {
        self.scheduler.count()
    }

    /// Ticks left until the task fires
    pub fn timer(&self, id: TaskId) -> Ticks {
        self.scheduler.timer(id)
    }

    /// Configured interval
    pub fn slice(&self, id: TaskId) -> Ticks {
        self.scheduler.slice(id)
    }

    /// Periodic or one-shot
    pub fn kind(&self, id: TaskId) -> Option<TaskKind> {
        self.scheduler.kind(id)
    }

    /// Is the task waiting for dispatch?
    pub fn is_ready(&self, id: TaskId) -> bool {
        self.scheduler.is_ready(id)
    }

    /// Overwrite the remaining ticks
    pub fn set_timer(&mut self, id: TaskId, timer: Ticks) {
        self.scheduler.set_timer(id, timer);
    }

    /// Overwrite the interval
    pub fn set_slice(&mut self, id: TaskId, slice: Ticks) {
        self.scheduler.set_slice(id, slice);
    }

    /// Replace the callback
    pub fn set_callback(&mut self, id: TaskId, callback: TaskFn<C, N, L>) {
        self.scheduler.set_callback(id, callback);
    }

    /// Replace the context
    pub fn set_context(&mut self, id: TaskId, context: C) {
        self.scheduler.set_context(id, context);
    }
}

/// Error returned by [`Scheduler::insert`]
#[derive(Debug, Clone, Copy)]
pub enum InsertError<T> {
    /// Every slot is taken, contains the rejected task
    Full(T),
}

impl<T> InsertError<T> {
    /// Get the rejected task back
    pub fn into_inner(self) -> T {
        match self {
            InsertError::Full(task) => task,
        }
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::Full(_) => write!(f, "task table full"),
        }
    }
}

#[cfg(feature = "std")]
impl<T: fmt::Debug> std::error::Error for InsertError<T> {}
