//! Pattern filtering hook applied to raw pattern text before storage.
//!
//! The default filter stores patterns verbatim. [`EscapeMetacharacters`]
//! is opt-in: it lets a set of plain literals be compiled by the regex
//! backend without any character being read as regex syntax.

use crate::flags::Flags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transforms a pattern's raw text into the text that gets stored and compiled.
pub trait PatternFilter: fmt::Debug + Send + Sync {
    fn filter(&self, pattern: &str, flags: Flags) -> String;
}

/// Stores patterns exactly as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl PatternFilter for Verbatim {
    fn filter(&self, pattern: &str, _flags: Flags) -> String {
        pattern.to_string()
    }
}

/// Escapes every regex metacharacter so the pattern matches literally.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeMetacharacters;

impl PatternFilter for EscapeMetacharacters {
    fn filter(&self, pattern: &str, _flags: Flags) -> String {
        regex::escape(pattern)
    }
}

/// Serializable selector for the built-in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    #[default]
    Verbatim,
    EscapeMetacharacters,
}

impl FilterKind {
    pub fn build(self) -> Box<dyn PatternFilter> {
        match self {
            FilterKind::Verbatim => Box::new(Verbatim),
            FilterKind::EscapeMetacharacters => Box::new(EscapeMetacharacters),
        }
    }
}
