//! Literal-trie backend: an Aho-Corasick automaton over raw pattern bytes.
//!
//! Patterns are never interpreted; `a.b` matches the three bytes `a`, `.`,
//! `b`. Case-insensitivity is ASCII folding applied while walking the trie,
//! the stored pattern bytes stay as given.

use super::{Automaton, BackendKind};
use crate::error::{CompileError, ErrorCode};
use crate::flags::Flags;
use aho_corasick::automaton::OverlappingState;
use aho_corasick::{AhoCorasick, Input, MatchKind};
use std::ops::ControlFlow;

/// Trie with failure links covering every literal of a set.
#[derive(Debug)]
pub struct TrieAutomaton {
    trie: AhoCorasick,
}

/// Position of the trie walk between reported matches.
#[derive(Debug, Clone)]
pub struct TrieWorkspace {
    state: OverlappingState,
}

impl TrieAutomaton {
    pub fn pattern_count(&self) -> usize {
        self.trie.patterns_len()
    }

    /// Heap bytes used by the trie.
    pub fn memory_usage(&self) -> usize {
        self.trie.memory_usage()
    }
}

impl Automaton for TrieAutomaton {
    type Workspace = TrieWorkspace;

    const KIND: BackendKind = BackendKind::LiteralTrie;

    fn build(patterns: &[String], flags: Flags) -> Result<Self, CompileError> {
        // Overlapping search is only available with standard semantics.
        let trie = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .ascii_case_insensitive(flags.case_insensitive())
            .build(patterns)
            .map_err(|err| {
                CompileError::whole_set(BackendKind::LiteralTrie, ErrorCode::TooLarge, err.to_string())
            })?;
        Ok(Self { trie })
    }

    fn create_workspace(&self) -> TrieWorkspace {
        TrieWorkspace {
            state: OverlappingState::start(),
        }
    }

    fn scan<F>(
        &self,
        workspace: &mut TrieWorkspace,
        haystack: &[u8],
        mut on_match: F,
    ) -> ControlFlow<i32>
    where
        F: FnMut(usize, usize) -> ControlFlow<i32>,
    {
        let input = Input::new(haystack);
        workspace.state = OverlappingState::start();
        loop {
            self.trie.find_overlapping(input.clone(), &mut workspace.state);
            match workspace.state.get_match() {
                Some(m) => on_match(m.pattern().as_usize(), m.end())?,
                None => return ControlFlow::Continue(()),
            }
        }
    }
}
