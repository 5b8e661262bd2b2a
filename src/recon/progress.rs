//! Progress sink shared between a long-running job and its caller.
//!
//! The caller constructs the sink, hands a reference to the job and may poll
//! or cancel it from another thread (wrap it in an `Arc` for that). Jobs
//! advance it one step per unit of work and check for cancellation between
//! steps. Each coordinator job starts with [`Progress::reset`]; within a job
//! the completed count only ever grows.

use crate::error::{CorTiltError, Result};
use log::{debug, info};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct Progress {
    num_steps: AtomicUsize,
    completed: AtomicUsize,
    cancelled: AtomicBool,
    last_message: Mutex<String>,
}

impl Progress {
    /// Sink expecting `num_steps` units of work.
    pub fn new(num_steps: usize) -> Self {
        Self {
            num_steps: AtomicUsize::new(num_steps),
            ..Default::default()
        }
    }

    /// Change the expected step count, keeping the steps already completed.
    pub fn set_num_steps(&self, num_steps: usize) {
        self.num_steps.store(num_steps, Ordering::SeqCst);
    }

    /// Start a new job of `num_steps` on this sink: completed steps and the
    /// last message are cleared. A pending cancellation is kept.
    pub fn reset(&self, num_steps: usize) {
        self.num_steps.store(num_steps, Ordering::SeqCst);
        self.completed.store(0, Ordering::SeqCst);
        if let Ok(mut last) = self.last_message.lock() {
            last.clear();
        }
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps.load(Ordering::SeqCst)
    }

    pub fn completed_steps(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Completed fraction in `[0, 1]`. A sink expecting no work reports 1.
    pub fn fraction(&self) -> f64 {
        let total = self.num_steps();
        if total == 0 {
            return 1.0;
        }
        (self.completed_steps() as f64 / total as f64).min(1.0)
    }

    /// Advance by `steps` (one when `None`) and record `message`.
    ///
    /// Returns the completed step count after the update.
    pub fn update(&self, steps: Option<usize>, message: impl AsRef<str>) -> usize {
        let steps = steps.unwrap_or(1);
        let completed = self.completed.fetch_add(steps, Ordering::SeqCst) + steps;
        let message = message.as_ref();
        debug!("Progress {}/{}: {}", completed, self.num_steps(), message);
        if let Ok(mut last) = self.last_message.lock() {
            last.clear();
            last.push_str(message);
        }
        completed
    }

    pub fn last_message(&self) -> String {
        self.last_message
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Request cancellation. Returns `false` if it was already requested.
    pub fn cancel(&self) -> bool {
        let first = self
            .cancelled
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if first {
            info!(
                "Progress cancelled at {}/{}",
                self.completed_steps(),
                self.num_steps()
            );
        }
        first
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once cancellation has been requested.
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(CorTiltError::Cancelled {
                completed: self.completed_steps(),
                total: self.num_steps(),
            })
        } else {
            Ok(())
        }
    }
}
