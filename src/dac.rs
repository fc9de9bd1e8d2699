// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: DAC peripheral command module.
// Author: Lukas Bower

//! DAC peripheral command module.
//!
//! Channels 0..=3 address the external four-channel converter over its
//! serial link; channel 4 addresses the on-chip converter. Both paths are
//! 12 bit: out-of-range channels and values are rejected before the
//! transport is touched.

use std::sync::Arc;

use petrel_core::table::{self, CommandEntry, DispatchCtx};
use petrel_core::{parse_int, Report};

use crate::hal::DacLink;

/// Highest channel addressing the external converter.
const EXTERNAL_CHANNEL_MAX: i64 = 3;

/// Channel number of the on-chip converter.
const INTERNAL_CHANNEL: i64 = 4;

/// Full-scale value of both 12-bit converters.
const VALUE_MAX: i64 = 0xfff;

/// DAC peripheral bound to its transport capability and the shared report
/// channel.
pub struct Dac<L: DacLink> {
    link: L,
    report: Arc<dyn Report + Send + Sync>,
    // One-time bring-up latch; dispatch initialises the converters once.
    initialized: bool,
}

impl<L: DacLink> DispatchCtx for Dac<L> {
    fn report(&self) -> &dyn Report {
        &*self.report
    }
}

impl<L: DacLink> Dac<L> {
    /// Create the peripheral over its transport capability.
    pub fn new(link: L, report: Arc<dyn Report + Send + Sync>) -> Self {
        Self {
            link,
            report,
            initialized: false,
        }
    }

    /// Borrow the transport capability, for inspection in tests.
    #[must_use]
    pub fn link(&self) -> &L {
        &self.link
    }

    fn commands() -> [CommandEntry<Self>; 3] {
        [
            CommandEntry {
                name: "help",
                help: "DAC command help",
                handler: Self::help_cmd,
            },
            CommandEntry {
                name: "write",
                help: "Write a value to a converter channel\nUsage: dac:write(<channel>, <value>)",
                handler: Self::write_cmd,
            },
            CommandEntry {
                name: "reset",
                help: "Reset all DAC outputs to 0v",
                handler: Self::reset_cmd,
            },
        ]
    }

    /// Dispatch a DAC command. `cmd` starts at the action word.
    pub fn dispatch(&mut self, cmd: &[&str], data: &[&str]) -> bool {
        self.init_once();
        let Some(action) = cmd.first().copied() else {
            self.report.error("missing dac action");
            return false;
        };
        table::dispatch(self, &Self::commands(), action, cmd, data)
    }

    /// Bring the converters up on first use only.
    fn init_once(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        log::debug!("[dac] converter bring-up");
        self.zero_outputs();
    }

    /// Drive every output to 0v.
    fn zero_outputs(&mut self) -> bool {
        let mut ok = self.link.internal_write(0);
        for channel in 0..=EXTERNAL_CHANNEL_MAX {
            ok &= self.external_write(channel as u16, 0);
        }
        ok
    }

    /// Frame and transmit a value for the external converter.
    ///
    /// Frame layout: channel in bits 15..14, the write-and-update op code in
    /// bits 13..12, the 12-bit value below. Fails closed on range errors.
    fn external_write(&mut self, channel: u16, value: u16) -> bool {
        if i64::from(channel) > EXTERNAL_CHANNEL_MAX || i64::from(value) > VALUE_MAX {
            return false;
        }
        let word = (channel << 14) | (1 << 12) | value;
        self.link.spi_frame([(word >> 8) as u8, (word & 0xff) as u8])
    }

    fn help_cmd(&mut self, cmd: &[&str], data: &[&str]) -> bool {
        if !table::input_check(self, cmd, 1, data, 0) {
            return false;
        }
        self.report.info("DAC commands:");
        table::display_help(self, &Self::commands());
        true
    }

    fn write_cmd(&mut self, cmd: &[&str], data: &[&str]) -> bool {
        if !table::input_check(self, cmd, 1, data, 2) {
            return false;
        }
        let Some(channel) = parse_int(data[0]) else {
            self.report.error("invalid channel");
            return false;
        };
        let Some(value) = parse_int(data[1]) else {
            self.report.error("invalid value");
            return false;
        };
        if !(0..=VALUE_MAX).contains(&value) {
            self.report.error("invalid value");
            return false;
        }
        match channel {
            0..=EXTERNAL_CHANNEL_MAX => self.external_write(channel as u16, value as u16),
            INTERNAL_CHANNEL => self.link.internal_write(value as u16),
            _ => {
                self.report.error("invalid channel");
                false
            }
        }
    }

    fn reset_cmd(&mut self, cmd: &[&str], data: &[&str]) -> bool {
        if !table::input_check(self, cmd, 1, data, 0) {
            return false;
        }
        self.zero_outputs()
    }
}
