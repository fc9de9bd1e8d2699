// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Console driver feeding stdin lines through the command deck.
// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Console driver for the Petrel command deck.
//!
//! Reads raw command lines from stdin and reports on stdout over the mock
//! hardware capabilities. Line editing, prompts, and session management are
//! a host shell's concern, not this driver's.

use std::io::{self, BufRead};
use std::sync::Arc;

use anyhow::{Context, Result};
use env_logger::Env;

use petrel::hal::{MockDacLink, MockPads};
use petrel::Bench;
use petrel_core::Reporter;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let report = Arc::new(Reporter::new(io::stdout()));
    let mut bench = Bench::new(report, MockPads::default(), MockDacLink::default());

    log::info!("[petrel] command deck online");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("read command line")?;
        if line.trim().is_empty() {
            continue;
        }
        bench.handle_line(&line);
    }
    Ok(())
}
