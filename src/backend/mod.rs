//! Matching backends and process-wide backend selection.
//!
//! A backend turns an ordered list of pattern texts into an immutable
//! [`Automaton`] plus a mutable workspace, and walks a haystack reporting
//! `(pattern index, end offset)` pairs. Pattern indices are the insertion
//! order handed in by [`PatternSet`](crate::PatternSet); backends never
//! invent their own ids.
//!
//! | Backend | Patterns are | Automaton | Workspace |
//! |---------|--------------|-----------|-----------|
//! | [`BackendKind::RegexAutomaton`] | regular expressions | lazy DFA | DFA transition cache |
//! | [`BackendKind::LiteralTrie`] | literal bytes | Aho-Corasick trie | overlapping search state |
//!
//! For sets made only of literals without regex metacharacters both
//! backends report the same `(pattern id, end offset)` matches. Outside
//! that boundary they diverge: the trie reads metacharacters literally,
//! the regex backend interprets them. Case-insensitive matching of
//! non-ASCII letters also differs: the trie folds ASCII only, the regex
//! backend in `UNICODE_MODE` folds all of Unicode.

pub mod regex_dfa;
pub mod trie;

use crate::error::{CompileError, ConfigError};
use crate::flags::Flags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;
use std::sync::OnceLock;

pub use regex_dfa::DfaAutomaton;
pub use trie::TrieAutomaton;

/// Which matching strategy compiles and scans a pattern set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Every pattern is a regular expression, all compiled into one DFA.
    #[default]
    #[serde(alias = "regex", alias = "hyperscan")]
    RegexAutomaton,
    /// Every pattern is a literal byte string, all compiled into one trie.
    #[serde(alias = "trie", alias = "acism", alias = "aho-corasick")]
    LiteralTrie,
}

impl BackendKind {
    pub fn name(self) -> &'static str {
        match self {
            BackendKind::RegexAutomaton => "regex-automaton",
            BackendKind::LiteralTrie => "literal-trie",
        }
    }

    /// Compile `patterns` with this backend into a ready-to-scan engine.
    pub(crate) fn compile(
        self,
        patterns: &[String],
        flags: Flags,
    ) -> Result<Box<dyn ScanEngine>, CompileError> {
        match self {
            BackendKind::RegexAutomaton => Compiled::<DfaAutomaton>::build(patterns, flags),
            BackendKind::LiteralTrie => Compiled::<TrieAutomaton>::build(patterns, flags),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regex-automaton" | "regex" | "hyperscan" => Ok(BackendKind::RegexAutomaton),
            "literal-trie" | "trie" | "acism" | "aho-corasick" => Ok(BackendKind::LiteralTrie),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Capability every backend provides: build, create scratch, scan.
///
/// Release is `Drop`. The automaton is read-only after `build`; all
/// per-scan mutation goes through `Workspace`.
pub trait Automaton: fmt::Debug + Send + Sync + Sized {
    type Workspace: fmt::Debug + Send;

    const KIND: BackendKind;

    fn build(patterns: &[String], flags: Flags) -> Result<Self, CompileError>;

    fn create_workspace(&self) -> Self::Workspace;

    /// Report every match in offset-ascending order.
    ///
    /// Stops and returns `Break` as soon as `on_match` does, carrying its
    /// value through untouched.
    fn scan<F>(
        &self,
        workspace: &mut Self::Workspace,
        haystack: &[u8],
        on_match: F,
    ) -> ControlFlow<i32>
    where
        F: FnMut(usize, usize) -> ControlFlow<i32>;
}

/// Object-safe view of a compiled automaton and its workspace.
pub(crate) trait ScanEngine: fmt::Debug + Send {
    fn kind(&self) -> BackendKind;

    fn scan(
        &mut self,
        haystack: &[u8],
        on_match: &mut dyn FnMut(usize, usize) -> ControlFlow<i32>,
    ) -> ControlFlow<i32>;
}

#[derive(Debug)]
struct Compiled<A: Automaton> {
    automaton: A,
    workspace: A::Workspace,
}

impl<A: Automaton + 'static> Compiled<A> {
    fn build(patterns: &[String], flags: Flags) -> Result<Box<dyn ScanEngine>, CompileError> {
        let automaton = A::build(patterns, flags)?;
        let workspace = automaton.create_workspace();
        Ok(Box::new(Compiled {
            automaton,
            workspace,
        }))
    }
}

impl<A: Automaton> ScanEngine for Compiled<A> {
    fn kind(&self) -> BackendKind {
        A::KIND
    }

    fn scan(
        &mut self,
        haystack: &[u8],
        on_match: &mut dyn FnMut(usize, usize) -> ControlFlow<i32>,
    ) -> ControlFlow<i32> {
        self.automaton
            .scan(&mut self.workspace, haystack, on_match)
    }
}

static GLOBAL_BACKEND: OnceLock<BackendKind> = OnceLock::new();

/// Backend used by pattern sets that don't name one explicitly.
///
/// Fixed on first read; defaults to [`BackendKind::RegexAutomaton`].
pub fn global_backend() -> BackendKind {
    *GLOBAL_BACKEND.get_or_init(BackendKind::default)
}

/// Select the process-wide backend. Returns `false` if it was already fixed.
pub fn init_global_backend(kind: BackendKind) -> bool {
    let installed = GLOBAL_BACKEND.set(kind).is_ok();
    if !installed {
        tracing::warn!(
            requested = %kind,
            active = %global_backend(),
            "process-wide backend already selected"
        );
    }
    installed
}
