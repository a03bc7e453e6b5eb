//! Pattern set lifecycle: build, compile once, scan many times, release.
//!
//! ```text
//! new / with_capacity / from_patterns
//!         │ add_pattern (0..n)
//!         ▼
//!      Building ──compile──▶ Compiled ──scan (0..n)
//!         │
//!         └──compile fails──▶ Failed (discard and rebuild)
//! ```
//!
//! Calling an operation from the wrong state is a caller bug and panics.
//! Every resource (pattern text, automaton, workspace) is owned by the set
//! and released when it is dropped, whatever state it reached.

use crate::backend::{global_backend, BackendKind, ScanEngine};
use crate::dispatch::{Bridge, Match, MatchEvent, ScanResult};
use crate::error::CompileError;
use crate::filter::{PatternFilter, Verbatim};
use crate::flags::Flags;
use tracing::{debug, trace, warn};

#[derive(Debug)]
enum State {
    Building,
    Compiled(Box<dyn ScanEngine>),
    Failed,
}

/// An ordered set of patterns compiled into one scanning automaton.
///
/// Pattern ids are insertion indices `0..len()`, identical across
/// backends. The set owns exactly one scan workspace, so scanning needs
/// `&mut self`; share a set between threads behind a lock or give each
/// worker its own set.
#[derive(Debug)]
pub struct PatternSet {
    flags: Flags,
    backend: BackendKind,
    filter: Box<dyn PatternFilter>,
    patterns: Vec<String>,
    state: State,
}

impl PatternSet {
    /// Empty set using the process-wide backend.
    pub fn new(flags: Flags) -> Self {
        Self {
            flags,
            backend: global_backend(),
            filter: Box::new(Verbatim),
            patterns: Vec::new(),
            state: State::Building,
        }
    }

    /// Empty set with room for `capacity` patterns.
    ///
    /// # Panics
    ///
    /// If `capacity` is zero.
    pub fn with_capacity(capacity: usize, flags: Flags) -> Self {
        assert!(capacity > 0, "pattern set capacity must be positive");
        let mut set = Self::new(flags);
        set.patterns.reserve_exact(capacity);
        set
    }

    /// Sized set with every pattern of `patterns` added in order. Not compiled.
    ///
    /// # Panics
    ///
    /// If `patterns` is empty or contains an empty pattern.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S], flags: Flags) -> Self {
        assert!(!patterns.is_empty(), "pattern list must not be empty");
        let mut set = Self::with_capacity(patterns.len(), flags);
        for pattern in patterns {
            set.add_pattern(pattern.as_ref());
        }
        set
    }

    /// Override the process-wide backend for this set.
    ///
    /// # Panics
    ///
    /// If the set has already been compiled.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.assert_building("select a backend for");
        self.backend = backend;
        self
    }

    /// Install the hook applied to each pattern as it is added.
    ///
    /// # Panics
    ///
    /// If any pattern has already been added.
    pub fn with_filter(mut self, filter: impl PatternFilter + 'static) -> Self {
        assert!(
            self.patterns.is_empty(),
            "pattern filter must be installed before patterns are added"
        );
        self.filter = Box::new(filter);
        self
    }

    pub(crate) fn with_boxed_filter(mut self, filter: Box<dyn PatternFilter>) -> Self {
        assert!(
            self.patterns.is_empty(),
            "pattern filter must be installed before patterns are added"
        );
        self.filter = filter;
        self
    }

    /// Append a pattern; its id is the number of patterns added before it.
    ///
    /// # Panics
    ///
    /// If `pattern` is empty or the set is no longer building.
    pub fn add_pattern(&mut self, pattern: &str) {
        assert!(!pattern.is_empty(), "pattern must not be empty");
        self.assert_building("add a pattern to");
        let stored = self.filter.filter(pattern, self.flags);
        self.patterns.push(stored);
    }

    /// Compile every pattern into the backend's automaton.
    ///
    /// On error the set is unusable; build a new one.
    ///
    /// # Panics
    ///
    /// If the set is not building, or holds no patterns.
    pub fn compile(&mut self) -> Result<(), CompileError> {
        self.assert_building("compile");
        assert!(!self.patterns.is_empty(), "cannot compile an empty pattern set");

        match self.backend.compile(&self.patterns, self.flags) {
            Ok(engine) => {
                debug!(
                    backend = %self.backend,
                    patterns = self.patterns.len(),
                    "compiled pattern set"
                );
                self.state = State::Compiled(engine);
                Ok(())
            }
            Err(err) => {
                warn!(
                    backend = %self.backend,
                    pattern_id = ?err.pattern_id,
                    reason = %err.reason,
                    "pattern set failed to compile"
                );
                self.state = State::Failed;
                Err(err)
            }
        }
    }

    /// Scan `haystack`, calling `callback` for every match in order.
    ///
    /// A non-zero return from `callback` stops the scan immediately and
    /// becomes [`ScanResult::code`].
    ///
    /// # Panics
    ///
    /// If the set has not been compiled.
    pub fn scan<F>(&mut self, haystack: &[u8], callback: F) -> ScanResult
    where
        F: FnMut(MatchEvent<'_>) -> i32,
    {
        let engine = match &mut self.state {
            State::Compiled(engine) => engine,
            _ => panic!("cannot scan a pattern set that is not compiled"),
        };

        let mut bridge = Bridge::new(&self.patterns, haystack, callback);
        let flow = engine.scan(haystack, &mut |id, end| bridge.on_match(id, end));
        let result = bridge.finish(flow);
        trace!(
            backend = %self.backend,
            len = haystack.len(),
            matches = result.matches,
            code = result.code,
            "scan finished"
        );
        result
    }

    /// True if any pattern occurs in `haystack`; stops at the first match.
    pub fn has_matches(&mut self, haystack: &[u8]) -> bool {
        self.scan(haystack, |_| 1).matches > 0
    }

    /// Every match in `haystack`, in the order the backend reports them.
    pub fn find_all(&mut self, haystack: &[u8]) -> Vec<Match> {
        let mut found = Vec::new();
        self.scan(haystack, |event| {
            found.push(Match::from(event));
            0
        });
        found
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self.state, State::Compiled(_))
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Stored text of pattern `id`, after filtering.
    pub fn pattern(&self, id: usize) -> Option<&str> {
        self.patterns.get(id).map(String::as_str)
    }

    pub fn patterns(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.patterns.iter().map(String::as_str).enumerate()
    }

    fn assert_building(&self, action: &str) {
        match self.state {
            State::Building => {}
            State::Compiled(_) => panic!("cannot {action} a compiled pattern set"),
            State::Failed => panic!("cannot {action} a pattern set that failed to compile"),
        }
    }
}

impl Drop for PatternSet {
    fn drop(&mut self) {
        trace!(
            backend = %self.backend,
            patterns = self.patterns.len(),
            compiled = self.is_compiled(),
            "releasing pattern set"
        );
    }
}

/// Release a pattern set. `None` is accepted and does nothing.
pub fn destroy(set: Option<PatternSet>) {
    drop(set);
}
