//! Progress report values, sinks, and the helpers that publish them.
//!
//! A caller holding any [`ProgressSink`] can publish an update in one call:
//!
//! ```
//! use progress_provider_core::prelude::*;
//!
//! let sink: CollectingSink<&str> = CollectingSink::new();
//! sink.report("Loading");
//! sink.report_progress("Loading", 50.0, 100.0);
//! sink.report_error();
//! assert_eq!(sink.len(), 3);
//! ```

pub mod error;
pub mod helpers;
pub mod progress;
pub mod report;
pub mod state;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::helpers::{
        report, report_error, report_progress, report_progress_with_state, report_state,
        ProgressSinkExt,
    };
    pub use crate::progress::*;
    pub use crate::report::ProgressReport;
    pub use crate::state::ProgressState;
}
