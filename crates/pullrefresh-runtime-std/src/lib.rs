//! Standard runtime services backed by Rust's `std` library.
//!
//! [`StdRuntime`] is a single-threaded stand-in for a host UI loop. It keeps a
//! queue of one-shot frame callbacks and a set of local UI tasks, and
//! implements the [`FrameScheduler`] and [`UiSpawner`] traits from
//! `pullrefresh-core`. The host drives it by calling
//! [`StdRuntime::drain_frame_callbacks`] once per rendered frame and
//! [`StdRuntime::poll_tasks`] whenever a task has been woken.

mod frame_clock;

pub use frame_clock::{FrameCallbackRegistration, FrameClock, NextFrame};

use pullrefresh_core::{FrameScheduler, LocalTask, UiSpawner};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Waker};

pub type FrameCallbackId = u64;
pub type TaskId = u64;

/// Frame-request and task-wake flags for the host loop.
///
/// Wakers may fire from any thread, so the flags are atomics even though the
/// runtime itself never leaves the UI thread.
struct StdScheduler {
    frame_requested: AtomicBool,
    tasks_woken: AtomicBool,
}

impl StdScheduler {
    fn new() -> Self {
        Self {
            frame_requested: AtomicBool::new(false),
            tasks_woken: AtomicBool::new(false),
        }
    }

    fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }

    fn take_task_wake(&self) -> bool {
        self.tasks_woken.swap(false, Ordering::SeqCst)
    }

    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
    }

    fn wake_tasks(&self) {
        self.tasks_woken.store(true, Ordering::SeqCst);
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field(
                "frame_requested",
                &self.frame_requested.load(Ordering::SeqCst),
            )
            .field("tasks_woken", &self.tasks_woken.load(Ordering::SeqCst))
            .finish()
    }
}

struct TaskWaker {
    scheduler: Arc<StdScheduler>,
}

impl futures_task::ArcWake for TaskWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.scheduler.wake_tasks();
    }
}

struct TaskEntry {
    id: TaskId,
    future: LocalTask,
}

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

struct RuntimeInner {
    scheduler: Arc<StdScheduler>,
    task_waker: Waker,
    frame_callbacks: RefCell<SmallVec<[(FrameCallbackId, FrameCallback); 4]>>,
    next_callback_id: Cell<FrameCallbackId>,
    tasks: RefCell<Vec<TaskEntry>>,
    next_task_id: Cell<TaskId>,
}

/// Single-threaded frame and task runtime.
#[derive(Clone)]
pub struct StdRuntime {
    inner: Rc<RuntimeInner>,
}

impl StdRuntime {
    /// Creates a new standard runtime instance.
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::new());
        let task_waker = futures_task::waker(Arc::new(TaskWaker {
            scheduler: Arc::clone(&scheduler),
        }));
        Self {
            inner: Rc::new(RuntimeInner {
                scheduler,
                task_waker,
                frame_callbacks: RefCell::new(SmallVec::new()),
                next_callback_id: Cell::new(1),
                tasks: RefCell::new(Vec::new()),
                next_task_id: Cell::new(1),
            }),
        }
    }

    /// Returns the runtime's frame clock.
    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    /// Returns whether a frame was requested since the last poll.
    pub fn take_frame_request(&self) -> bool {
        self.inner.scheduler.take_frame_request()
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackId {
        let id = self.inner.next_callback_id.get();
        self.inner.next_callback_id.set(id + 1);
        self.inner
            .frame_callbacks
            .borrow_mut()
            .push((id, Box::new(callback)));
        self.inner.scheduler.schedule_frame();
        id
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        self.inner
            .frame_callbacks
            .borrow_mut()
            .retain(|(callback_id, _)| *callback_id != id);
    }

    pub fn has_frame_callbacks(&self) -> bool {
        !self.inner.frame_callbacks.borrow().is_empty()
    }

    /// Runs every callback registered before this frame.
    ///
    /// Callbacks registered while draining run on the next frame.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let callbacks = std::mem::take(&mut *self.inner.frame_callbacks.borrow_mut());
        if !callbacks.is_empty() {
            log::trace!(
                "running {} frame callback(s) at {frame_time_nanos}ns",
                callbacks.len()
            );
        }
        for (_, callback) in callbacks {
            callback(frame_time_nanos);
        }
    }

    pub fn spawn_ui(&self, future: LocalTask) -> TaskId {
        let id = self.inner.next_task_id.get();
        self.inner.next_task_id.set(id + 1);
        self.inner.tasks.borrow_mut().push(TaskEntry { id, future });
        self.inner.scheduler.wake_tasks();
        id
    }

    pub fn cancel_task(&self, id: TaskId) {
        self.inner.tasks.borrow_mut().retain(|entry| entry.id != id);
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.inner.tasks.borrow().is_empty()
    }

    /// Polls every task once. Returns true when at least one completed.
    pub fn poll_tasks(&self) -> bool {
        let mut cx = Context::from_waker(&self.inner.task_waker);
        let tasks = std::mem::take(&mut *self.inner.tasks.borrow_mut());
        let mut pending = Vec::with_capacity(tasks.len());
        let mut made_progress = false;
        for mut entry in tasks {
            if entry.future.as_mut().poll(&mut cx).is_ready() {
                made_progress = true;
            } else {
                pending.push(entry);
            }
        }
        if !pending.is_empty() {
            // Tasks spawned while polling were pushed behind the taken batch.
            let mut tasks = self.inner.tasks.borrow_mut();
            let spawned = std::mem::take(&mut *tasks);
            tasks.extend(pending);
            tasks.extend(spawned);
        }
        made_progress
    }

    /// Runs one host iteration: woken tasks, then the frame callbacks.
    pub fn run_frame(&self, frame_time_nanos: u64) {
        if self.inner.scheduler.take_task_wake() {
            self.poll_tasks();
        }
        self.inner.scheduler.take_frame_request();
        self.drain_frame_callbacks(frame_time_nanos);
    }

    pub fn is_idle(&self) -> bool {
        !self.has_pending_tasks() && !self.has_frame_callbacks()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.inner.scheduler)
            .field("frame_callbacks", &self.inner.frame_callbacks.borrow().len())
            .field("tasks", &self.inner.tasks.borrow().len())
            .finish()
    }
}

impl FrameScheduler for StdRuntime {
    fn request_frame(&self, callback: Box<dyn FnOnce(u64) + 'static>) {
        self.register_frame_callback(callback);
    }
}

impl UiSpawner for StdRuntime {
    fn spawn_local(&self, task: LocalTask) {
        self.spawn_ui(task);
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
