//! Compile-time scan options for a pattern set.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Options fixed when a [`PatternSet`](crate::PatternSet) is created.
    ///
    /// Both backends honor these bits; how they are honored differs:
    /// the regex backend attaches them to every pattern at compile time,
    /// the trie backend applies case folding while scanning.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Flags: u32 {
        /// ASCII letters match regardless of case. The regex backend also
        /// folds non-ASCII letters when `UNICODE_MODE` is set.
        const CASE_INSENSITIVE = 1 << 0;
        /// Patterns and input are treated as UTF-8 text rather than bytes.
        const UNICODE_MODE     = 1 << 1;
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::empty()
    }
}

impl Flags {
    pub fn case_insensitive(self) -> bool {
        self.contains(Flags::CASE_INSENSITIVE)
    }

    pub fn unicode(self) -> bool {
        self.contains(Flags::UNICODE_MODE)
    }
}
