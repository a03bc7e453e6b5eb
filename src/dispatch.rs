//! Bridge between backend match events and the caller's scan callback.
//!
//! Backends report bare `(pattern index, end offset)` pairs and stop on
//! `ControlFlow::Break`. The bridge turns each pair into a [`MatchEvent`],
//! counts it, and converts the callback's integer answer into the
//! backend's stop signal without reinterpreting it: `0` continues, any
//! other value becomes `Break(value)` and ends up as [`ScanResult::code`].

use std::ops::ControlFlow;

/// One match as seen by a scan callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEvent<'a> {
    /// Insertion index of the matching pattern.
    pub pattern_id: usize,
    /// Offset one past the last matched byte.
    pub end: usize,
    /// Stored text of the matching pattern.
    pub pattern: &'a str,
    /// The buffer being scanned.
    pub haystack: &'a [u8],
}

impl MatchEvent<'_> {
    pub fn haystack_len(&self) -> usize {
        self.haystack.len()
    }
}

/// A collected `(pattern id, end offset)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Match {
    pub pattern_id: usize,
    pub end: usize,
}

impl From<MatchEvent<'_>> for Match {
    fn from(event: MatchEvent<'_>) -> Self {
        Match {
            pattern_id: event.pattern_id,
            end: event.end,
        }
    }
}

/// Outcome of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanResult {
    /// `0` if the scan ran to the end, otherwise the non-zero value the
    /// callback returned to stop it.
    pub code: i32,
    /// Matches delivered to the callback, including the one that stopped it.
    pub matches: usize,
}

impl ScanResult {
    pub fn stopped(&self) -> bool {
        self.code != 0
    }
}

pub(crate) struct Bridge<'a, F> {
    patterns: &'a [String],
    haystack: &'a [u8],
    callback: F,
    matches: usize,
}

impl<'a, F> Bridge<'a, F>
where
    F: FnMut(MatchEvent<'_>) -> i32,
{
    pub(crate) fn new(patterns: &'a [String], haystack: &'a [u8], callback: F) -> Self {
        Self {
            patterns,
            haystack,
            callback,
            matches: 0,
        }
    }

    pub(crate) fn on_match(&mut self, pattern_id: usize, end: usize) -> ControlFlow<i32> {
        debug_assert!(pattern_id < self.patterns.len());
        let event = MatchEvent {
            pattern_id,
            end,
            pattern: &self.patterns[pattern_id],
            haystack: self.haystack,
        };
        let ret = (self.callback)(event);
        self.matches += 1;
        match ret {
            0 => ControlFlow::Continue(()),
            code => ControlFlow::Break(code),
        }
    }

    pub(crate) fn finish(self, flow: ControlFlow<i32>) -> ScanResult {
        let code = match flow {
            ControlFlow::Continue(()) => 0,
            ControlFlow::Break(code) => code,
        };
        ScanResult {
            code,
            matches: self.matches,
        }
    }
}
