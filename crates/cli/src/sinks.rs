//! Terminal sinks: plain text lines, JSON lines, and an indicatif progress bar.

use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use indicatif::ProgressBar;
use progress_provider_core::progress::ProgressSink;
use progress_provider_core::report::ProgressReport;

/// Human-readable form of a report, e.g. `[normal] Loading 50/100 (50.0%)`.
pub fn format_report(report: &ProgressReport<String>) -> String {
    let mut line = format!("[{}]", report.state());
    if let Some(message) = report.message() {
        line.push(' ');
        line.push_str(message);
    }
    if report.value() != 0.0 || report.maximum() != 0.0 {
        line.push_str(&format!(" {}/{}", report.value(), report.maximum()));
        if let Some(percent) = report.percent() {
            line.push_str(&format!(" ({:.1}%)", percent));
        }
    }
    line
}

fn lock<W>(writer: &Mutex<W>) -> MutexGuard<'_, W> {
    writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct TextSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> ProgressSink<String> for TextSink<W> {
    fn on_progress(&self, report: ProgressReport<String>) {
        let line = format_report(&report);
        if let Err(e) = writeln!(lock(&self.writer), "{}", line) {
            tracing::warn!("Failed to write progress report: {}", e);
        }
    }
}

/// Writes one JSON object per report.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> ProgressSink<String> for JsonLinesSink<W> {
    fn on_progress(&self, report: ProgressReport<String>) {
        let mut writer = lock(&self.writer);
        let result = serde_json::to_writer(&mut *writer, &report)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(writer));
        if let Err(e) = result {
            tracing::warn!("Failed to write progress report: {}", e);
        }
    }
}

/// Drives a progress bar. A report reaching its maximum finishes the bar and
/// an error report abandons it.
pub struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl ProgressSink<String> for BarSink {
    fn on_progress(&self, report: ProgressReport<String>) {
        if report.state().is_error() {
            let message = report.into_message().unwrap_or_else(|| "failed".to_string());
            self.bar.abandon_with_message(message);
            return;
        }
        let done = report.has_progress() && report.value() >= report.maximum();
        if report.has_progress() {
            self.bar.set_length(report.maximum() as u64);
            self.bar.set_position(report.value().max(0.0) as u64);
        } else {
            self.bar.tick();
        }
        if let Some(message) = report.into_message() {
            self.bar.set_message(message);
        }
        if done {
            self.bar.finish();
        }
    }
}
