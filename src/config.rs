//! Engine configuration.
//!
//! The backend is chosen once per process, normally from the same config
//! file the rest of the mail pipeline reads at start-up:
//!
//! ```yaml
//! backend: literal-trie
//! filter: verbatim
//! flags: CASE_INSENSITIVE
//! capacity_hint: 4096
//! ```

use crate::backend::{init_global_backend, BackendKind};
use crate::error::ConfigError;
use crate::filter::FilterKind;
use crate::flags::Flags;
use crate::pattern_set::PatternSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every pattern set a process builds.
///
/// # Example
/// ```rust
/// use multipattern::{BackendKind, EngineConfig, Flags};
///
/// let config = EngineConfig::new()
///     .with_backend(BackendKind::LiteralTrie)
///     .with_flags(Flags::CASE_INSENSITIVE);
///
/// let mut set = config.pattern_set_from(&["spam", "lottery"]);
/// set.compile()?;
/// assert!(set.has_matches(b"LOTTERY winner"));
/// # Ok::<(), multipattern::CompileError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Matching strategy for every set built from this config.
    pub backend: BackendKind,
    /// Hook applied to each pattern before it is stored.
    pub filter: FilterKind,
    /// Flags given to sets built from this config.
    pub flags: Flags,
    /// Storage reserved up front by [`EngineConfig::pattern_set`].
    pub capacity_hint: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            filter: FilterKind::default(),
            flags: Flags::empty(),
            capacity_hint: None,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain literal signatures, case-insensitive, scanned by the trie.
    pub fn literal_signatures() -> Self {
        Self {
            backend: BackendKind::LiteralTrie,
            flags: Flags::CASE_INSENSITIVE,
            ..Default::default()
        }
    }

    /// Regex signatures over UTF-8 text.
    pub fn regex_signatures() -> Self {
        Self {
            backend: BackendKind::RegexAutomaton,
            flags: Flags::UNICODE_MODE,
            ..Default::default()
        }
    }

    /// Literal signatures compiled by the regex backend, metacharacters escaped.
    pub fn escaped_literals() -> Self {
        Self {
            backend: BackendKind::RegexAutomaton,
            filter: FilterKind::EscapeMetacharacters,
            flags: Flags::CASE_INSENSITIVE,
            ..Default::default()
        }
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_filter(mut self, filter: FilterKind) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_capacity_hint(mut self, capacity: usize) -> Self {
        self.capacity_hint = Some(capacity);
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a `.json` file, or YAML for any other extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Make this config's backend the process-wide default.
    ///
    /// Returns `false` if a backend was already fixed for this process.
    pub fn apply(&self) -> bool {
        init_global_backend(self.backend)
    }

    /// Empty, uncompiled set carrying this config's backend, filter and flags.
    pub fn pattern_set(&self) -> PatternSet {
        let set = match self.capacity_hint {
            Some(capacity) if capacity > 0 => PatternSet::with_capacity(capacity, self.flags),
            _ => PatternSet::new(self.flags),
        };
        set.with_backend(self.backend)
            .with_boxed_filter(self.filter.build())
    }

    /// Like [`EngineConfig::pattern_set`] with `patterns` added in order.
    ///
    /// # Panics
    ///
    /// If `patterns` is empty or contains an empty pattern.
    pub fn pattern_set_from<S: AsRef<str>>(&self, patterns: &[S]) -> PatternSet {
        assert!(!patterns.is_empty(), "pattern list must not be empty");
        let mut set = self.pattern_set();
        for pattern in patterns {
            set.add_pattern(pattern.as_ref());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.backend, BackendKind::RegexAutomaton);
        assert_eq!(config.filter, FilterKind::Verbatim);
        assert!(config.flags.is_empty());
        assert_eq!(config.capacity_hint, None);
    }

    #[test]
    fn test_presets() {
        let literal = EngineConfig::literal_signatures();
        assert_eq!(literal.backend, BackendKind::LiteralTrie);
        assert!(literal.flags.case_insensitive());

        let regex = EngineConfig::regex_signatures();
        assert_eq!(regex.backend, BackendKind::RegexAutomaton);
        assert!(regex.flags.unicode());

        let escaped = EngineConfig::escaped_literals();
        assert_eq!(escaped.filter, FilterKind::EscapeMetacharacters);
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::new()
            .with_backend(BackendKind::LiteralTrie)
            .with_filter(FilterKind::EscapeMetacharacters)
            .with_flags(Flags::CASE_INSENSITIVE | Flags::UNICODE_MODE)
            .with_capacity_hint(128);

        assert_eq!(config.backend, BackendKind::LiteralTrie);
        assert_eq!(config.filter, FilterKind::EscapeMetacharacters);
        assert!(config.flags.case_insensitive());
        assert!(config.flags.unicode());
        assert_eq!(config.capacity_hint, Some(128));
    }

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
backend: acism
flags: CASE_INSENSITIVE | UNICODE_MODE
capacity_hint: 64
"#;
        let config = EngineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.backend, BackendKind::LiteralTrie);
        assert_eq!(config.flags, Flags::CASE_INSENSITIVE | Flags::UNICODE_MODE);
        assert_eq!(config.filter, FilterKind::Verbatim);
        assert_eq!(config.capacity_hint, Some(64));
    }

    #[test]
    fn test_json_config() {
        let json = r#"{"backend": "regex-automaton", "filter": "escape-metacharacters"}"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.backend, BackendKind::RegexAutomaton);
        assert_eq!(config.filter, FilterKind::EscapeMetacharacters);
        assert!(config.flags.is_empty());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = EngineConfig::from_yaml_str("backend: pcre").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_from_file() {
        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(yaml, "backend: trie").unwrap();
        let config = EngineConfig::from_file(yaml.path()).unwrap();
        assert_eq!(config.backend, BackendKind::LiteralTrie);

        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(json, r#"{{"flags": "CASE_INSENSITIVE"}}"#).unwrap();
        let config = EngineConfig::from_file(json.path()).unwrap();
        assert_eq!(config.flags, Flags::CASE_INSENSITIVE);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_pattern_set_from_config() {
        let config = EngineConfig::escaped_literals().with_capacity_hint(8);
        let mut set = config.pattern_set_from(&["1+1", "free"]);
        assert_eq!(set.backend(), BackendKind::RegexAutomaton);
        assert_eq!(set.flags(), Flags::CASE_INSENSITIVE);
        assert_eq!(set.pattern(0), Some(r"1\+1"));

        set.compile().unwrap();
        assert!(set.has_matches(b"1+1 = FREE"));
        assert!(!set.has_matches(b"111"));
    }
}
