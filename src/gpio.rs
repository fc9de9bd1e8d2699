// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: GPIO peripheral command module.
// Author: Lukas Bower

//! GPIO peripheral command module.
//!
//! Command layout after the module word: `action:port:pin`, with
//! `direction:sense` appended for `config`. Every positional token is
//! validated against its grammar and resolved before any pad is touched, so
//! a malformed command never leaves partial hardware state behind.

use std::sync::Arc;

use petrel_core::grammar::terms;
use petrel_core::table::{self, CommandEntry, DispatchCtx};
use petrel_core::{
    match_token, resolve_pin, resolve_port, Direction, PinId, PortId, Report, Sense,
};

use crate::hal::GpioPads;

/// GPIO peripheral bound to a pad capability and the shared report channel.
pub struct Gpio<P: GpioPads> {
    pads: P,
    report: Arc<dyn Report + Send + Sync>,
}

impl<P: GpioPads> DispatchCtx for Gpio<P> {
    fn report(&self) -> &dyn Report {
        &*self.report
    }
}

impl<P: GpioPads> Gpio<P> {
    /// Create the peripheral over its pad capability.
    pub fn new(pads: P, report: Arc<dyn Report + Send + Sync>) -> Self {
        Self { pads, report }
    }

    /// Borrow the pad capability, for inspection in tests.
    #[must_use]
    pub fn pads(&self) -> &P {
        &self.pads
    }

    /// Mutably borrow the pad capability, for presetting mock state.
    pub fn pads_mut(&mut self) -> &mut P {
        &mut self.pads
    }

    fn commands() -> [CommandEntry<Self>; 5] {
        [
            CommandEntry {
                name: "get",
                help: "Read a pad level\nUsage: gpio:get:<port>:<pin>",
                handler: Self::get_cmd,
            },
            CommandEntry {
                name: "set",
                help: "Drive a pad high\nUsage: gpio:set:<port>:<pin>",
                handler: Self::set_cmd,
            },
            CommandEntry {
                name: "clear",
                help: "Drive a pad low\nUsage: gpio:clear:<port>:<pin>",
                handler: Self::clear_cmd,
            },
            CommandEntry {
                name: "config",
                help: "Configure a pad\nUsage: gpio:config:<port>:<pin>:<direction>:<sense>",
                handler: Self::config_cmd,
            },
            CommandEntry {
                name: "help",
                help: "GPIO command help",
                handler: Self::help_cmd,
            },
        ]
    }

    /// Dispatch a GPIO command. `cmd` starts at the action word.
    pub fn dispatch(&mut self, cmd: &[&str], data: &[&str]) -> bool {
        let Some(action) = cmd.first().copied() else {
            self.report.error("missing gpio action");
            return false;
        };
        if match_token(action, terms::GPIO_ACTIONS).is_none() {
            self.report.error("unknown gpio action");
            return false;
        }
        table::dispatch(self, &Self::commands(), action, cmd, data)
    }

    /// Validate and resolve the port and pin tokens, reporting on failure.
    fn port_pin(&self, cmd: &[&str]) -> Option<(PortId, PinId)> {
        let Some(port_token) = cmd.get(1).copied() else {
            self.report.error("missing port");
            return None;
        };
        if match_token(port_token, terms::PORTS).is_none() {
            self.report.error("invalid port");
            return None;
        }
        let Some(port) = resolve_port(port_token) else {
            self.report.error("invalid port");
            return None;
        };

        let Some(pin_token) = cmd.get(2).copied() else {
            self.report.error("missing pin");
            return None;
        };
        if match_token(pin_token, terms::PINS).is_none() {
            self.report.error("invalid pin");
            return None;
        }
        let Some(pin) = resolve_pin(pin_token) else {
            self.report.error("invalid pin");
            return None;
        };

        Some((port, pin))
    }

    fn get_cmd(&mut self, cmd: &[&str], data: &[&str]) -> bool {
        if !table::input_check(self, cmd, 3, data, 0) {
            return false;
        }
        let Some((port, pin)) = self.port_pin(cmd) else {
            return false;
        };
        let level = self.pads.read(port, pin);
        self.report.bool_value("level", level.is_high());
        true
    }

    fn set_cmd(&mut self, cmd: &[&str], data: &[&str]) -> bool {
        if !table::input_check(self, cmd, 3, data, 0) {
            return false;
        }
        let Some((port, pin)) = self.port_pin(cmd) else {
            return false;
        };
        self.pads.set(port, pin);
        true
    }

    fn clear_cmd(&mut self, cmd: &[&str], data: &[&str]) -> bool {
        if !table::input_check(self, cmd, 3, data, 0) {
            return false;
        }
        let Some((port, pin)) = self.port_pin(cmd) else {
            return false;
        };
        self.pads.clear(port, pin);
        true
    }

    fn config_cmd(&mut self, cmd: &[&str], data: &[&str]) -> bool {
        if !data.is_empty() {
            self.report.error("invalid number of arguments");
            return false;
        }
        // Both trailing fields must be present before any validation runs.
        if cmd.len() != 5 {
            self.report.error("config requires direction and sense");
            return false;
        }

        let direction_token = cmd[3];
        if match_token(direction_token, terms::GPIO_DIRECTIONS).is_none() {
            self.report.error("invalid direction");
            return false;
        }
        let Some(direction) = Direction::from_token(direction_token) else {
            self.report.error("invalid direction");
            return false;
        };

        let sense_token = cmd[4];
        if match_token(sense_token, terms::GPIO_SENSES).is_none() {
            self.report.error("invalid sense");
            return false;
        }
        let Some(sense) = Sense::from_token(sense_token) else {
            self.report.error("invalid sense");
            return false;
        };

        let Some((port, pin)) = self.port_pin(cmd) else {
            return false;
        };
        self.report.debug(
            file!(),
            line!(),
            "config",
            &format!("{port:?} pin{} {direction:?} {sense:?}", pin.index()),
        );
        if !self.pads.configure(port, pin, direction, sense) {
            self.report.error("configure rejected");
            return false;
        }
        true
    }

    fn help_cmd(&mut self, _cmd: &[&str], _data: &[&str]) -> bool {
        self.report.info("GPIO commands:");
        table::display_help(self, &Self::commands());
        true
    }
}
