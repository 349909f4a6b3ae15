//! Render dispatcher that queues jobs until told to run them

use std::sync::{Mutex, PoisonError};

use crate::platform::{RenderDispatcher, RenderJob};

/// Collects posted jobs; [`QueueDispatcher::run_pending`] plays the
/// rendering thread.
#[derive(Default)]
pub struct QueueDispatcher {
    jobs: Mutex<Vec<RenderJob>>,
}

impl QueueDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued jobs
    pub fn pending(&self) -> usize {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Run and drain every queued job, returning how many ran
    pub fn run_pending(&self) -> usize {
        let jobs: Vec<RenderJob> = std::mem::take(&mut *self.jobs.lock().unwrap_or_else(PoisonError::into_inner));
        let count = jobs.len();
        for job in jobs {
            job();
        }
        count
    }
}

impl RenderDispatcher for QueueDispatcher {
    fn post(&self, job: RenderJob) {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner).push(job);
    }
}
