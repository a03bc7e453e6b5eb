//! # Multipattern
//!
//! A multi-pattern scanning engine for content filtering: compile thousands
//! of literal or regular-expression signatures into one automaton and find
//! every occurrence of every signature in a single pass over a buffer.
//!
//! Two interchangeable backends implement the same contract:
//!
//! - [`BackendKind::RegexAutomaton`]: patterns are regular expressions,
//!   combined into one lazily built DFA.
//! - [`BackendKind::LiteralTrie`]: patterns are literal bytes, combined
//!   into one Aho-Corasick trie.
//!
//! Pattern ids are insertion indices in both. For literal pattern sets
//! without regex metacharacters the two report the same
//! `(pattern id, end offset)` matches; see [`backend`] for where they differ.
//!
//! ## Quick Start
//!
//! ```rust
//! use multipattern::{BackendKind, Flags, PatternSet};
//!
//! let mut set = PatternSet::from_patterns(&["spam", "viagra", "lottery"], Flags::CASE_INSENSITIVE)
//!     .with_backend(BackendKind::LiteralTrie);
//! set.compile()?;
//!
//! let mut hits = Vec::new();
//! let result = set.scan(b"You won the LOTTERY! Buy Viagra now", |m| {
//!     hits.push((m.pattern_id, m.end));
//!     0 // keep scanning
//! });
//!
//! assert_eq!(hits, vec![(2, 19), (1, 31)]);
//! assert_eq!(result.code, 0);
//! assert_eq!(result.matches, 2);
//! # Ok::<(), multipattern::CompileError>(())
//! ```
//!
//! ## Early Stop
//!
//! Returning a non-zero value from the callback ends the scan; that value
//! comes back as [`ScanResult::code`].
//!
//! ```rust
//! use multipattern::{Flags, PatternSet};
//!
//! let mut set = PatternSet::from_patterns(&["free"], Flags::empty());
//! set.compile()?;
//!
//! let result = set.scan(b"free money, free prizes", |_| 1);
//! assert_eq!(result.code, 1);
//! assert_eq!(result.matches, 1);
//! # Ok::<(), multipattern::CompileError>(())
//! ```
//!
//! ## Concurrency
//!
//! A compiled automaton is immutable, but each [`PatternSet`] owns a single
//! scan workspace, so [`PatternSet::scan`] takes `&mut self`. Either guard a
//! shared set with a lock or build one set per worker thread.

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod flags;
pub mod pattern_set;

pub use backend::{global_backend, init_global_backend, BackendKind};
pub use config::EngineConfig;
pub use dispatch::{Match, MatchEvent, ScanResult};
pub use error::{CompileError, ConfigError, ErrorCode, MultipatternError, Result};
pub use filter::{EscapeMetacharacters, FilterKind, PatternFilter, Verbatim};
pub use flags::Flags;
pub use pattern_set::{destroy, PatternSet};
