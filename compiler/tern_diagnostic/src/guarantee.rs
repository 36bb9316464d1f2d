//! Proof that an error was emitted.

use std::fmt;

/// Zero-sized token proving at least one error diagnostic was emitted.
///
/// Only the diagnostic sink can create one, so functions returning
/// `Result<T, ErrorGuaranteed>` cannot fail without reporting.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Proof from an error count, for code that only has the counter.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error(s) emitted")
    }
}
