// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Console line splitting into command and data token lists.
// Author: Lukas Bower

//! Console line splitting.
//!
//! A command line is a colon separated command chain, optionally followed by
//! a parenthesised, comma separated data list:
//!
//! ```text
//! gpio:config:porta:pin3:input:pullup
//! dac:write(4, 2048)
//! ```
//!
//! Whitespace is ignored everywhere inside the command chain, so operators
//! may space or tab freely between (and within) tokens. Data arguments are
//! trimmed but otherwise passed through verbatim.

use core::fmt;

use heapless::{String, Vec};

use crate::grammar::MAX_TOKEN_LEN;

/// Maximum length accepted for a single console line.
pub const MAX_LINE_LEN: usize = 256;

/// Maximum number of command tokens in one invocation.
pub const MAX_CMD_TOKENS: usize = 8;

/// Maximum number of data arguments in one invocation.
pub const MAX_DATA_TOKENS: usize = 8;

/// One whitespace-stripped command token.
pub type CmdToken = String<MAX_TOKEN_LEN>;

/// A split command invocation: positional command tokens plus free-form data
/// arguments. Created per invocation and consumed synchronously.
#[derive(Debug, Default)]
pub struct CommandLine<'a> {
    cmd: Vec<CmdToken, MAX_CMD_TOKENS>,
    data: Vec<&'a str, MAX_DATA_TOKENS>,
}

impl<'a> CommandLine<'a> {
    /// Borrow the command tokens as string slices.
    #[must_use]
    pub fn cmd_tokens(&self) -> Vec<&str, MAX_CMD_TOKENS> {
        let mut view = Vec::new();
        for token in &self.cmd {
            // Capacity matches by construction.
            let _ = view.push(token.as_str());
        }
        view
    }

    /// Borrow the data arguments.
    #[must_use]
    pub fn data_tokens(&self) -> &[&'a str] {
        &self.data
    }
}

/// Errors surfaced while splitting a console line.
#[derive(Debug, PartialEq, Eq)]
pub enum LineError {
    /// No command tokens were present.
    Empty,
    /// Line exceeded [`MAX_LINE_LEN`].
    LineTooLong,
    /// A command token exceeded [`MAX_TOKEN_LEN`].
    TokenTooLong,
    /// Command or data token count exceeded its bound.
    TooManyTokens,
    /// A data list was opened but never closed.
    UnterminatedData,
    /// Text followed the closing parenthesis of the data list.
    TrailingInput,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::LineTooLong => write!(f, "console line exceeded maximum length"),
            Self::TokenTooLong => write!(f, "command token exceeds allowed length"),
            Self::TooManyTokens => write!(f, "too many command or data tokens"),
            Self::UnterminatedData => write!(f, "data list is missing its closing parenthesis"),
            Self::TrailingInput => write!(f, "unexpected text after data list"),
        }
    }
}

/// Split a raw console line into command tokens and data arguments.
pub fn split_line(line: &str) -> Result<CommandLine<'_>, LineError> {
    if line.len() > MAX_LINE_LEN {
        return Err(LineError::LineTooLong);
    }
    let line = line.trim();
    if line.is_empty() {
        return Err(LineError::Empty);
    }

    let (head, tail) = match line.find('(') {
        Some(open) => (&line[..open], Some(&line[open + 1..])),
        None => (line, None),
    };

    let mut cmd: Vec<CmdToken, MAX_CMD_TOKENS> = Vec::new();
    for piece in head.split(':') {
        let mut token = CmdToken::new();
        for ch in piece.chars().filter(|ch| !ch.is_whitespace()) {
            token.push(ch).map_err(|_| LineError::TokenTooLong)?;
        }
        if token.is_empty() {
            continue;
        }
        cmd.push(token).map_err(|_| LineError::TooManyTokens)?;
    }
    if cmd.is_empty() {
        return Err(LineError::Empty);
    }

    let mut data: Vec<&str, MAX_DATA_TOKENS> = Vec::new();
    if let Some(rest) = tail {
        let close = rest.find(')').ok_or(LineError::UnterminatedData)?;
        if !rest[close + 1..].trim().is_empty() {
            return Err(LineError::TrailingInput);
        }
        for piece in rest[..close].split(',') {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            data.push(piece).map_err(|_| LineError::TooManyTokens)?;
        }
    }

    Ok(CommandLine { cmd, data })
}

/// Parse a free-form integer argument.
///
/// Accepts decimal and `0x`/`0X` hexadecimal with an optional leading minus,
/// matching the original firmware's `strtol(.., 0)` behaviour for the bases
/// the command set uses.
#[must_use]
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        text.parse::<i64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}
