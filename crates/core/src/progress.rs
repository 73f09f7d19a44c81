//! The sink trait that receives progress reports, plus stock sinks.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::report::ProgressReport;

/// Receives progress reports. Implement this to forward reports to progress
/// bars, GUI bindings, channels, or FFI callbacks.
pub trait ProgressSink<M>: Send + Sync {
    fn on_progress(&self, report: ProgressReport<M>);
}

/// A no-op sink for when progress reporting is not needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl<M> ProgressSink<M> for NoopProgress {
    fn on_progress(&self, _report: ProgressReport<M>) {}
}

/// Sink backed by a closure.
pub struct ProgressCallback<F> {
    callback: F,
}

impl<F> ProgressCallback<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<M, F> ProgressSink<M> for ProgressCallback<F>
where
    F: Fn(ProgressReport<M>) + Send + Sync,
{
    fn on_progress(&self, report: ProgressReport<M>) {
        (self.callback)(report);
    }
}

/// Records every report it receives, in order.
#[derive(Debug)]
pub struct CollectingSink<M> {
    reports: Mutex<Vec<ProgressReport<M>>>,
}

impl<M> CollectingSink<M> {
    pub fn new() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
        }
    }

    // A panic in another reporter must not hide what was already collected.
    fn lock(&self) -> MutexGuard<'_, Vec<ProgressReport<M>>> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drain and return everything collected so far.
    pub fn take(&self) -> Vec<ProgressReport<M>> {
        std::mem::take(&mut *self.lock())
    }
}

impl<M: Clone> CollectingSink<M> {
    pub fn reports(&self) -> Vec<ProgressReport<M>> {
        self.lock().clone()
    }
}

impl<M> Default for CollectingSink<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Send> ProgressSink<M> for CollectingSink<M> {
    fn on_progress(&self, report: ProgressReport<M>) {
        self.lock().push(report);
    }
}

impl<M: Send> ProgressSink<M> for std::sync::mpsc::Sender<ProgressReport<M>> {
    fn on_progress(&self, report: ProgressReport<M>) {
        if self.send(report).is_err() {
            tracing::debug!("progress receiver dropped; report discarded");
        }
    }
}

impl<M: Send> ProgressSink<M> for tokio::sync::mpsc::UnboundedSender<ProgressReport<M>> {
    fn on_progress(&self, report: ProgressReport<M>) {
        if self.send(report).is_err() {
            tracing::debug!("async progress observer closed; report discarded");
        }
    }
}

impl<M, S: ProgressSink<M> + ?Sized> ProgressSink<M> for &S {
    fn on_progress(&self, report: ProgressReport<M>) {
        (**self).on_progress(report);
    }
}

impl<M, S: ProgressSink<M> + ?Sized> ProgressSink<M> for Box<S> {
    fn on_progress(&self, report: ProgressReport<M>) {
        (**self).on_progress(report);
    }
}

impl<M, S: ProgressSink<M> + ?Sized> ProgressSink<M> for Arc<S> {
    fn on_progress(&self, report: ProgressReport<M>) {
        (**self).on_progress(report);
    }
}
