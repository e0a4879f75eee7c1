//! Deferred work for the render loop.
//!
//! Two queues, both drained by the run loop:
//!
//! - **frames**: run right after the next draw has been committed, for work
//!   that must see the freshly laid-out elements (caret placement, editor
//!   resize checks).
//! - **timers**: run once their deadline passes (preview refresh throttle).
//!
//! Tasks can't be cancelled. A task that has been superseded is expected to
//! notice that itself (e.g. a cleared flag) and do nothing.

use std::time::{Duration, Instant};

type Task = Box<dyn FnOnce()>;

struct Timer {
    due: Instant,
    task: Task,
}

#[derive(Default)]
pub struct Scheduler {
    frames: Vec<Task>,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` for after the next draw.
    pub fn request_frame(&mut self, task: impl FnOnce() + 'static) {
        self.frames.push(Box::new(task));
    }

    /// Queue `task` to run at `now + after`.
    pub fn delay(&mut self, now: Instant, after: Duration, task: impl FnOnce() + 'static) {
        self.timers.push(Timer {
            due: now + after,
            task: Box::new(task),
        });
    }

    /// Runs every frame task queued before this call. Tasks queued while
    /// running wait for the next frame. Returns how many ran.
    pub fn run_frame(&mut self) -> usize {
        let tasks = std::mem::take(&mut self.frames);
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }

    /// Runs every timer due at `now`, earliest first. Returns how many ran.
    pub fn run_due(&mut self, now: Instant) -> usize {
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            std::mem::take(&mut self.timers).into_iter().partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by_key(|t| t.due);
        let count = due.len();
        for timer in due {
            (timer.task)();
        }
        count
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    pub fn has_pending_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
