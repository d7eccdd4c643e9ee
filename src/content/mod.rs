//! Fills the descriptive sections of venues and destinations from fixed
//! templates chosen by a coarse kind of the record.

pub mod destination;
pub mod venue;

/// Outcome of one content pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContentReport {
    /// Records without content when the pass started.
    pub pending: usize,
    /// Records written. Zero on a dry run.
    pub updated: usize,
}
