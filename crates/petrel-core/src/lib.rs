// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Shared Petrel command grammar, dispatch, and reporting primitives.
// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![no_std]

//! Shared Petrel command grammar and dispatch primitives used by the firmware
//! peripheral modules, the console driver, and host tooling.
//!
//! The crate is `no_std`; the `std` feature adds the locking [`Reporter`]
//! that serialises concurrent writers onto one host channel.

#[cfg(feature = "std")]
extern crate std;

pub mod grammar;
pub mod line;
pub mod names;
pub mod report;
pub mod table;

pub use grammar::{match_token, terms, MAX_TOKEN_LEN};
pub use line::{
    parse_int, split_line, CommandLine, LineError, MAX_CMD_TOKENS, MAX_DATA_TOKENS, MAX_LINE_LEN,
};
pub use names::{
    resolve_pin, resolve_port, Direction, Level, PinId, PortId, Sense, PINS_PER_PORT, PIN_NAMES,
    PORT_NAMES,
};
pub use report::Report;
#[cfg(feature = "std")]
pub use report::Reporter;
pub use table::{dispatch, display_help, input_check, CommandEntry, DispatchCtx};
