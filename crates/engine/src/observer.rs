//! Run observers receive each submission result as soon as it completes, so
//! callers can stream progress while a sequential run is still going.

use outreach_core::types::SubmissionResult;
use std::sync::Mutex;

pub trait RunObserver: Send + Sync {
    /// Called once per directory, in directory order. `index` is zero-based.
    fn on_submission(&self, index: usize, total: usize, result: &SubmissionResult);
}

/// Observer for callers that only want the final result list.
pub struct NoOpObserver;

impl RunObserver for NoOpObserver {
    fn on_submission(&self, _index: usize, _total: usize, _result: &SubmissionResult) {}
}

/// In-memory observer that records every notification, for testing.
#[derive(Default)]
pub struct CaptureObserver {
    seen: Mutex<Vec<(usize, usize, SubmissionResult)>>,
}

impl CaptureObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<(usize, usize, SubmissionResult)> {
        self.seen.lock().expect("observer mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().expect("observer mutex poisoned").len()
    }
}

impl RunObserver for CaptureObserver {
    fn on_submission(&self, index: usize, total: usize, result: &SubmissionResult) {
        self.seen
            .lock()
            .expect("observer mutex poisoned")
            .push((index, total, result.clone()));
    }
}
