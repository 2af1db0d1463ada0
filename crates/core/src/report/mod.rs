//! Outcome reporting.
//!
//! Every unit of work ends in one or more [`Outcome`]s. The [`Reporter`]
//! routes each outcome to the console and to the run log, each sink filtered
//! by its own [`Verbosity`].

mod outcome;
mod reporter;
mod sink;

pub use outcome::{Outcome, OutcomeKind, Verbosity};
pub use reporter::{OutcomeTally, Reporter};
pub use sink::{ConsoleSink, LogFileSink, MemorySink, OutputSink};
