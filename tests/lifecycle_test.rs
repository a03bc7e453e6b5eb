//! Build/compile/scan/destroy lifecycle and caller-contract checks.

use multipattern::{destroy, BackendKind, ErrorCode, Flags, PatternSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::thread;

const BACKENDS: [BackendKind; 2] = [BackendKind::RegexAutomaton, BackendKind::LiteralTrie];

fn panics<F: FnOnce()>(f: F) -> bool {
    catch_unwind(AssertUnwindSafe(f)).is_err()
}

#[test]
fn test_contract_violations_panic_on_every_backend() {
    for backend in BACKENDS {
        assert!(panics(|| {
            let _ = PatternSet::with_capacity(0, Flags::empty()).with_backend(backend);
        }));

        assert!(panics(|| {
            let mut set = PatternSet::from_patterns(&["abc"], Flags::empty()).with_backend(backend);
            set.compile().unwrap();
            set.add_pattern("late");
        }));

        assert!(panics(|| {
            let mut set = PatternSet::from_patterns(&["abc"], Flags::empty()).with_backend(backend);
            set.compile().unwrap();
            let _ = set.compile();
        }));

        assert!(panics(|| {
            let mut set = PatternSet::from_patterns(&["abc"], Flags::empty()).with_backend(backend);
            set.scan(b"abc", |_| 0);
        }));
    }
}

#[test]
fn test_destroy_none_is_noop() {
    destroy(None);
}

#[test]
fn test_destroy_in_every_state() {
    for backend in BACKENDS {
        destroy(Some(PatternSet::new(Flags::empty()).with_backend(backend)));

        let building = PatternSet::from_patterns(&["a", "b"], Flags::empty()).with_backend(backend);
        destroy(Some(building));

        let mut compiled = PatternSet::from_patterns(&["a", "b"], Flags::empty()).with_backend(backend);
        compiled.compile().unwrap();
        compiled.find_all(b"ab");
        destroy(Some(compiled));
    }

    let mut failed =
        PatternSet::from_patterns(&["[z-a]"], Flags::empty()).with_backend(BackendKind::RegexAutomaton);
    assert!(failed.compile().is_err());
    destroy(Some(failed));
}

#[test]
fn test_compile_error_is_structured() {
    let mut set = PatternSet::from_patterns(
        &["cheap meds", "casino", "[unterminated", "prize"],
        Flags::CASE_INSENSITIVE,
    )
    .with_backend(BackendKind::RegexAutomaton);

    let err = set.compile().unwrap_err();
    assert_eq!(err.domain(), "multipattern");
    assert_eq!(err.backend, BackendKind::RegexAutomaton);
    assert_eq!(err.code, ErrorCode::InvalidPattern);
    assert_eq!(err.code.as_i32(), 22);
    assert_eq!(err.pattern_id, Some(2));
    assert_eq!(err.pattern.as_deref(), Some("[unterminated"));

    let message = err.to_string();
    assert!(message.contains("'[unterminated'"), "message: {message}");
    assert!(!err.reason.is_empty());
}

#[test]
fn test_failed_set_rebuilt_without_bad_pattern() {
    let patterns = ["cheap meds", "(bad", "casino"];
    let mut set =
        PatternSet::from_patterns(&patterns, Flags::empty()).with_backend(BackendKind::RegexAutomaton);
    let bad = set.compile().unwrap_err().pattern_id.unwrap();
    destroy(Some(set));

    let kept: Vec<&str> = patterns
        .iter()
        .enumerate()
        .filter(|&(id, _)| id != bad)
        .map(|(_, p)| *p)
        .collect();
    let mut rebuilt =
        PatternSet::from_patterns(&kept, Flags::empty()).with_backend(BackendKind::RegexAutomaton);
    rebuilt.compile().unwrap();
    assert!(rebuilt.has_matches(b"online casino"));
}

#[test]
fn test_trie_accepts_regex_syntax_as_literal() {
    let mut set = PatternSet::from_patterns(&["(bad", "[z-a]"], Flags::empty())
        .with_backend(BackendKind::LiteralTrie);
    set.compile().unwrap();
    assert_eq!(set.find_all(b"so (bad").len(), 1);
}

#[test]
fn test_shared_set_behind_lock() {
    for backend in BACKENDS {
        let mut set = PatternSet::from_patterns(&["spam"], Flags::empty()).with_backend(backend);
        set.compile().unwrap();
        let shared = Arc::new(Mutex::new(set));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    let body = format!("message {i}: spam spam");
                    let mut set = shared.lock().unwrap();
                    set.find_all(body.as_bytes()).len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
    }
}

#[test]
fn test_one_set_per_worker() {
    for backend in BACKENDS {
        let counts: Vec<usize> = thread::scope(|scope| {
            let workers: Vec<_> = (0..4)
                .map(|i| {
                    scope.spawn(move || {
                        let mut set = PatternSet::from_patterns(&["win", "prize"], Flags::CASE_INSENSITIVE)
                            .with_backend(backend);
                        set.compile().unwrap();
                        let body = "WIN a PRIZE! ".repeat(i + 1);
                        set.find_all(body.as_bytes()).len()
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        assert_eq!(counts, vec![2, 4, 6, 8]);
    }
}
