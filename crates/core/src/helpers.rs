//! Reporting helpers: build one [`ProgressReport`] and hand it to a sink.
//!
//! Each helper calls the sink exactly once and never fails. Omitted fields take
//! the [`ProgressReport`] defaults (value `0`, maximum `0`, state `Normal`).
//! The same operations are available as methods through [`ProgressSinkExt`].

use crate::progress::ProgressSink;
use crate::report::ProgressReport;
use crate::state::ProgressState;

fn publish<M, S>(sink: &S, helper: &'static str, report: ProgressReport<M>)
where
    S: ProgressSink<M> + ?Sized,
{
    tracing::trace!(
        helper,
        value = report.value(),
        maximum = report.maximum(),
        state = %report.state(),
        "publishing progress report"
    );
    sink.on_progress(report);
}

/// Report a message with default progress and state.
pub fn report<M, S>(sink: &S, message: M)
where
    S: ProgressSink<M> + ?Sized,
{
    publish(sink, "report", ProgressReport::new(message));
}

/// Report a message with explicit progress bounds.
///
/// `value` should lie in `[0, maximum]`; it is forwarded unchecked.
pub fn report_progress<M, S>(sink: &S, message: M, value: f64, maximum: f64)
where
    S: ProgressSink<M> + ?Sized,
{
    publish(
        sink,
        "report_progress",
        ProgressReport::with_progress(message, value, maximum),
    );
}

pub fn report_progress_with_state<M, S>(
    sink: &S,
    message: M,
    value: f64,
    maximum: f64,
    state: ProgressState,
) where
    S: ProgressSink<M> + ?Sized,
{
    publish(
        sink,
        "report_progress_with_state",
        ProgressReport::with_progress_and_state(message, value, maximum, state),
    );
}

/// Report a message with an explicit state and default progress.
pub fn report_state<M, S>(sink: &S, message: M, state: ProgressState)
where
    S: ProgressSink<M> + ?Sized,
{
    publish(
        sink,
        "report_state",
        ProgressReport::with_state(message, state),
    );
}

/// Signal failure of a long-running operation: no message, state `Error`.
pub fn report_error<M, S>(sink: &S)
where
    S: ProgressSink<M> + ?Sized,
{
    publish(sink, "report_error", ProgressReport::error());
}

/// Method-call form of the reporting helpers, available on every sink.
pub trait ProgressSinkExt<M>: ProgressSink<M> {
    fn report(&self, message: M) {
        report(self, message);
    }

    fn report_progress(&self, message: M, value: f64, maximum: f64) {
        report_progress(self, message, value, maximum);
    }

    fn report_progress_with_state(&self, message: M, value: f64, maximum: f64, state: ProgressState) {
        report_progress_with_state(self, message, value, maximum, state);
    }

    fn report_state(&self, message: M, state: ProgressState) {
        report_state(self, message, state);
    }

    fn report_error(&self) {
        report_error::<M, Self>(self);
    }
}

impl<M, S: ProgressSink<M> + ?Sized> ProgressSinkExt<M> for S {}
