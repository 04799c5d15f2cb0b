//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod inspect;
mod output;

pub use inspect::InspectReport;
pub use output::{Report, TerminalOutput};
