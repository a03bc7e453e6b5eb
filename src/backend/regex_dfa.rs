//! Regex-automaton backend: all patterns compiled into one lazy DFA.
//!
//! Each pattern is parsed on its own with the set's flags attached, so a
//! syntax error always names the pattern that caused it. The parsed
//! patterns are then joined into a single Thompson NFA and determinized
//! lazily during scanning. The DFA runs with [`MatchKind::All`] and an
//! overlapping search, which reports every `(pattern, end offset)` pair
//! exactly once, the way a block-mode Hyperscan database does.
//!
//! Patterns that can match the empty string are rejected: a scanner that
//! only reports end offsets would fire them at every position.

use super::{Automaton, BackendKind};
use crate::error::{CompileError, ErrorCode};
use crate::flags::Flags;
use regex_automata::hybrid::dfa::{Cache, OverlappingState, DFA};
use regex_automata::nfa::thompson;
use regex_automata::{Input, MatchKind};
use regex_syntax::hir::Hir;
use regex_syntax::{Parser, ParserBuilder};
use std::ops::ControlFlow;

/// Transition cache budget per workspace.
const CACHE_CAPACITY: usize = 10 * (1 << 20);

/// Compiled lazy DFA matching every pattern of a set simultaneously.
#[derive(Debug)]
pub struct DfaAutomaton {
    dfa: DFA,
    pattern_count: usize,
}

/// Transition cache the lazy DFA fills in while scanning.
#[derive(Debug, Clone)]
pub struct DfaWorkspace {
    cache: Cache,
}

impl DfaWorkspace {
    /// Bytes currently held by the transition cache.
    pub fn memory_usage(&self) -> usize {
        self.cache.memory_usage()
    }
}

fn parser_for(flags: Flags) -> Parser {
    ParserBuilder::new()
        .case_insensitive(flags.case_insensitive())
        .unicode(flags.unicode())
        .utf8(flags.unicode())
        .build()
}

fn parse_pattern(id: usize, pattern: &str, flags: Flags) -> Result<Hir, CompileError> {
    let hir = parser_for(flags).parse(pattern).map_err(|err| {
        CompileError::invalid_pattern(BackendKind::RegexAutomaton, id, pattern, err.to_string())
    })?;
    if hir.properties().minimum_len() == Some(0) {
        return Err(CompileError::invalid_pattern(
            BackendKind::RegexAutomaton,
            id,
            pattern,
            "pattern matches empty buffer",
        ));
    }
    Ok(hir)
}

fn build_dfa(hirs: &[Hir]) -> Result<DFA, String> {
    let nfa = thompson::Compiler::new()
        .configure(thompson::Config::new().utf8(false))
        .build_many_from_hir(hirs)
        .map_err(|err| err.to_string())?;
    DFA::builder()
        .configure(
            DFA::config()
                .match_kind(MatchKind::All)
                .cache_capacity(CACHE_CAPACITY)
                .skip_cache_capacity_check(true),
        )
        .build_from_nfa(nfa)
        .map_err(|err| err.to_string())
}

/// Find the first pattern that fails to build alone.
///
/// Only called once the combined build has already failed.
fn attribute_failure(patterns: &[String], hirs: &[Hir], combined: String) -> CompileError {
    for (id, (pattern, hir)) in patterns.iter().zip(hirs).enumerate() {
        if let Err(reason) = build_dfa(std::slice::from_ref(hir)) {
            return CompileError::invalid_pattern(BackendKind::RegexAutomaton, id, pattern, reason);
        }
    }
    CompileError::whole_set(BackendKind::RegexAutomaton, ErrorCode::TooLarge, combined)
}

impl DfaAutomaton {
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }
}

impl Automaton for DfaAutomaton {
    type Workspace = DfaWorkspace;

    const KIND: BackendKind = BackendKind::RegexAutomaton;

    fn build(patterns: &[String], flags: Flags) -> Result<Self, CompileError> {
        let hirs = patterns
            .iter()
            .enumerate()
            .map(|(id, pattern)| parse_pattern(id, pattern, flags))
            .collect::<Result<Vec<_>, _>>()?;

        let dfa = build_dfa(&hirs).map_err(|reason| attribute_failure(patterns, &hirs, reason))?;
        Ok(Self {
            dfa,
            pattern_count: patterns.len(),
        })
    }

    fn create_workspace(&self) -> DfaWorkspace {
        DfaWorkspace {
            cache: self.dfa.create_cache(),
        }
    }

    fn scan<F>(
        &self,
        workspace: &mut DfaWorkspace,
        haystack: &[u8],
        mut on_match: F,
    ) -> ControlFlow<i32>
    where
        F: FnMut(usize, usize) -> ControlFlow<i32>,
    {
        let input = Input::new(haystack);
        let mut state = OverlappingState::start();
        loop {
            // No quit bytes and no cache give-up are configured, so the
            // search has no failure mode left.
            if let Err(err) =
                self.dfa
                    .try_search_overlapping_fwd(&mut workspace.cache, &input, &mut state)
            {
                panic!("lazy DFA search failed: {err}");
            }
            match state.get_match() {
                Some(hm) => on_match(hm.pattern().as_usize(), hm.offset())?,
                None => return ControlFlow::Continue(()),
            }
        }
    }
}
