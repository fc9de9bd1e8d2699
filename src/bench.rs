// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Top-level module router and transaction framing.
// Author: Lukas Bower

//! Top-level module router.
//!
//! [`Bench`] is the single entry point a shell session calls: it splits a
//! raw line, opens the response transaction, routes the module word to the
//! owning peripheral through the same prefix-match table machinery the
//! peripherals use internally, and closes the transaction with the outcome.

use std::sync::Arc;

use petrel_core::table::{self, CommandEntry, DispatchCtx};
use petrel_core::{split_line, Report};

use crate::dac::Dac;
use crate::gpio::Gpio;
use crate::hal::{DacLink, GpioPads};

/// Instrument command deck: shared report channel plus the peripherals.
pub struct Bench<P: GpioPads, L: DacLink> {
    report: Arc<dyn Report + Send + Sync>,
    gpio: Gpio<P>,
    dac: Dac<L>,
}

impl<P: GpioPads, L: DacLink> DispatchCtx for Bench<P, L> {
    fn report(&self) -> &dyn Report {
        &*self.report
    }
}

impl<P: GpioPads, L: DacLink> Bench<P, L> {
    /// Assemble the deck over the host channel and hardware capabilities.
    pub fn new(report: Arc<dyn Report + Send + Sync>, pads: P, link: L) -> Self {
        Self {
            gpio: Gpio::new(pads, report.clone()),
            dac: Dac::new(link, report.clone()),
            report,
        }
    }

    /// Borrow the GPIO peripheral.
    #[must_use]
    pub fn gpio(&self) -> &Gpio<P> {
        &self.gpio
    }

    /// Mutably borrow the GPIO peripheral, for presetting mock state.
    pub fn gpio_mut(&mut self) -> &mut Gpio<P> {
        &mut self.gpio
    }

    /// Borrow the DAC peripheral.
    #[must_use]
    pub fn dac(&self) -> &Dac<L> {
        &self.dac
    }

    fn commands() -> [CommandEntry<Self>; 3] {
        [
            CommandEntry {
                name: "gpio",
                help: "GPIO pad control\nUsage: gpio:<action>:...",
                handler: Self::gpio_cmd,
            },
            CommandEntry {
                name: "dac",
                help: "DAC output control\nUsage: dac:<action>...",
                handler: Self::dac_cmd,
            },
            CommandEntry {
                name: "help",
                help: "Module help",
                handler: Self::help_cmd,
            },
        ]
    }

    fn gpio_cmd(&mut self, cmd: &[&str], data: &[&str]) -> bool {
        self.gpio.dispatch(&cmd[1..], data)
    }

    fn dac_cmd(&mut self, cmd: &[&str], data: &[&str]) -> bool {
        self.dac.dispatch(&cmd[1..], data)
    }

    fn help_cmd(&mut self, _cmd: &[&str], _data: &[&str]) -> bool {
        self.report.info("Modules:");
        table::display_help(self, &Self::commands());
        true
    }

    /// Execute one raw console line inside a response transaction.
    pub fn handle_line(&mut self, line: &str) -> bool {
        log::trace!("[bench] line=<{line}>");
        let parsed = match split_line(line) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.report.begin();
                self.report.error(&err.to_string());
                self.report.end(false);
                return false;
            }
        };
        let cmd_view = parsed.cmd_tokens();
        let cmd: &[&str] = &cmd_view;
        let data = parsed.data_tokens();

        self.report.begin();
        let ok = table::dispatch(self, &Self::commands(), cmd[0], cmd, data);
        self.report.end(ok);
        ok
    }
}
