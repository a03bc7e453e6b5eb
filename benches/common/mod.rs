//! Shared data for multipattern benchmarks.
//!
//! Signatures and message bodies are generated deterministically so runs
//! are comparable across backends and machines.

#![allow(dead_code)]

use multipattern::{BackendKind, Flags, PatternSet};

pub const BACKENDS: [BackendKind; 2] = [BackendKind::RegexAutomaton, BackendKind::LiteralTrie];

const WORDS: [&str; 16] = [
    "free", "offer", "winner", "casino", "pharmacy", "discount", "bitcoin", "urgent",
    "account", "verify", "prize", "lottery", "meds", "cheap", "click", "unsubscribe",
];

/// `count` distinct literal signatures built from spam vocabulary.
pub fn generate_signatures(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let first = WORDS[i % WORDS.len()];
            let second = WORDS[(i / WORDS.len()) % WORDS.len()];
            format!("{first} {second} {i}")
        })
        .collect()
}

/// A plain-text message body of roughly `len` bytes that contains `hits`
/// signature occurrences spread through it.
pub fn generate_message(len: usize, signatures: &[String], hits: usize) -> Vec<u8> {
    let filler = "Dear customer, thank you for your recent order. Your parcel is on its way. ";
    let mut body = String::with_capacity(len + 64);
    let mut placed = 0;
    while body.len() < len {
        body.push_str(filler);
        if placed < hits && !signatures.is_empty() {
            let sig = &signatures[(placed * 7919) % signatures.len()];
            body.push_str(sig);
            body.push(' ');
            placed += 1;
        }
    }
    body.into_bytes()
}

pub fn compiled_set(signatures: &[String], backend: BackendKind) -> anyhow::Result<PatternSet> {
    let mut set = PatternSet::from_patterns(signatures, Flags::CASE_INSENSITIVE).with_backend(backend);
    set.compile()?;
    Ok(set)
}
