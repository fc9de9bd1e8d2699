// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Bounded case-insensitive token grammar matching for Petrel.
// Author: Lukas Bower

//! Bounded case-insensitive token grammar matching.
//!
//! A grammar is the fixed, compiled-in set of legal tokens for one argument
//! position. Matching compares up to the length of the longer operand capped
//! at [`MAX_TOKEN_LEN`], so a candidate that merely extends a known token
//! never matches it as a prefix.

/// Longest token length considered when comparing grammar entries.
pub const MAX_TOKEN_LEN: usize = 32;

/// Compiled-in grammar tables for the peripheral command surfaces.
pub mod terms {
    /// GPIO action words.
    pub const GPIO_ACTIONS: &[&str] = &["get", "set", "clear", "config", "help"];

    /// GPIO pad directions.
    pub const GPIO_DIRECTIONS: &[&str] = &["input", "output"];

    /// GPIO pad sense modes.
    pub const GPIO_SENSES: &[&str] = &["pullup", "pulldown", "floating", "analog"];

    /// DAC action words.
    pub const DAC_ACTIONS: &[&str] = &["help", "write", "reset"];

    /// Port name tokens.
    pub const PORTS: &[&str] = &[
        "porta", "portb", "portc", "portd", "porte", "portf", "portg", "porth", "porti",
    ];

    /// Pin name tokens.
    pub const PINS: &[&str] = &[
        "pin0", "pin1", "pin2", "pin3", "pin4", "pin5", "pin6", "pin7", "pin8", "pin9", "pin10",
        "pin11", "pin12", "pin13", "pin14", "pin15",
    ];
}

/// Compare a known grammar token against a candidate under the bounded policy.
///
/// The comparison length is the longer of the two operand lengths capped at
/// [`MAX_TOKEN_LEN`]; within the cap a length mismatch is a mismatch.
pub(crate) fn token_eq(known: &str, candidate: &str) -> bool {
    let bound = known.len().max(candidate.len()).min(MAX_TOKEN_LEN);
    let lhs = &known.as_bytes()[..known.len().min(bound)];
    let rhs = &candidate.as_bytes()[..candidate.len().min(bound)];
    lhs.len() == rhs.len() && lhs.eq_ignore_ascii_case(rhs)
}

/// Return the index of the first grammar entry matching the candidate.
///
/// Scans the grammar in declaration order; `None` when no entry matches.
#[must_use]
pub fn match_token(candidate: &str, grammar: &[&str]) -> Option<usize> {
    grammar.iter().position(|token| token_eq(token, candidate))
}
