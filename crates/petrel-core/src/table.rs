// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Generic command table lookup and dispatch for Petrel peripherals.
// Author: Lukas Bower

//! Generic command table lookup and dispatch.
//!
//! Every peripheral declares an ordered table of named handlers and exposes a
//! single dispatch entry point; callers never know which peripheral they are
//! talking to beyond that function. Verb lookup is a case-insensitive prefix
//! match against the declared name, and with overlapping names the first
//! table entry wins: declaration order is load-bearing.

use crate::report::Report;

/// Handler invoked with the dispatch context, command tokens, and data
/// arguments. Returns the command outcome.
pub type Handler<C> = fn(&mut C, &[&str], &[&str]) -> bool;

/// One named handler in a peripheral's command table.
pub struct CommandEntry<C> {
    /// Verb that selects this handler.
    pub name: &'static str,
    /// Help text shown by the peripheral's `help` command.
    pub help: &'static str,
    /// Handler to invoke on a match.
    pub handler: Handler<C>,
}

/// Context seam required by the dispatch loop: access to the host report
/// channel for failure and help output.
pub trait DispatchCtx {
    /// Borrow the host report channel.
    fn report(&self) -> &dyn Report;
}

/// Whether a candidate verb selects an entry with the given name.
///
/// The comparison covers exactly the declared name's length, so a verb that
/// extends a declared name still selects it (`configure` selects `config`).
#[must_use]
pub fn verb_matches(name: &str, verb: &str) -> bool {
    verb.len() >= name.len() && verb.as_bytes()[..name.len()].eq_ignore_ascii_case(name.as_bytes())
}

/// Dispatch a verb through a peripheral's command table.
///
/// Scans the table in declaration order and invokes the first matching
/// entry's handler with the full token lists. A miss is reported as a
/// well-formed failure, never a panic.
pub fn dispatch<C: DispatchCtx>(
    ctx: &mut C,
    table: &[CommandEntry<C>],
    verb: &str,
    cmd: &[&str],
    data: &[&str],
) -> bool {
    for entry in table {
        if verb_matches(entry.name, verb) {
            log::trace!("[dispatch] verb={verb} entry={}", entry.name);
            return (entry.handler)(ctx, cmd, data);
        }
    }
    log::trace!("[dispatch] verb={verb} not implemented");
    ctx.report().error("command not implemented");
    false
}

/// Render a table's names and help text as info lines.
pub fn display_help<C: DispatchCtx>(ctx: &C, table: &[CommandEntry<C>]) {
    for entry in table {
        let mut lines = entry.help.lines();
        let mut buffer = heapless::String::<{ crate::line::MAX_LINE_LEN }>::new();
        let _ = core::fmt::write(
            &mut buffer,
            format_args!("  {} - {}", entry.name, lines.next().unwrap_or("")),
        );
        ctx.report().info(&buffer);
        for continuation in lines {
            buffer.clear();
            let _ = core::fmt::write(&mut buffer, format_args!("      {continuation}"));
            ctx.report().info(&buffer);
        }
    }
}

/// Verify a handler received exactly the expected token counts, reporting a
/// usage error otherwise.
pub fn input_check<C: DispatchCtx>(
    ctx: &C,
    cmd: &[&str],
    expected_cmd: usize,
    data: &[&str],
    expected_data: usize,
) -> bool {
    if cmd.len() != expected_cmd || data.len() != expected_data {
        ctx.report().error("invalid number of arguments");
        return false;
    }
    true
}
