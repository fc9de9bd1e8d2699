// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Domain value types and name resolution tables for Petrel.
// Author: Lukas Bower

//! Domain value types and the static name maps resolving textual tokens to
//! them.
//!
//! Resolution is the same bounded case-insensitive linear scan as grammar
//! matching; a miss is `None`, never a default value, and callers must check
//! before touching hardware.

use crate::grammar::token_eq;

/// GPIO port handles known to the instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PortId {
    /// `porta`
    A,
    /// `portb`
    B,
    /// `portc`
    C,
    /// `portd`
    D,
    /// `porte`
    E,
    /// `portf`
    F,
    /// `portg`
    G,
    /// `porth`
    H,
    /// `porti`
    I,
}

impl PortId {
    /// Zero-based index of this port, for table storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// GPIO pad numbers within one port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PinId(u8);

/// Number of pads per port.
pub const PINS_PER_PORT: usize = 16;

impl PinId {
    /// Construct a pin id, rejecting numbers outside the pad range.
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        if (number as usize) < PINS_PER_PORT {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Zero-based index of this pad, for table storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Logic level of a pad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Level {
    /// Pad reads low.
    #[default]
    Low,
    /// Pad reads high.
    High,
}

impl Level {
    /// Whether the level is high.
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

/// Configured direction of a pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Pad driven by the outside world.
    Input,
    /// Pad driven by the instrument.
    Output,
}

impl Direction {
    /// Parse a direction token, matching case-insensitively.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        if token_eq("input", token) {
            Some(Self::Input)
        } else if token_eq("output", token) {
            Some(Self::Output)
        } else {
            None
        }
    }
}

/// Configured sense mode of a pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    /// Weak pull to the supply rail.
    PullUp,
    /// Weak pull to ground.
    PullDown,
    /// No pull, digital input.
    Floating,
    /// Analog mode, digital input path disabled.
    Analog,
}

impl Sense {
    /// Parse a sense token, matching case-insensitively.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        if token_eq("pullup", token) {
            Some(Self::PullUp)
        } else if token_eq("pulldown", token) {
            Some(Self::PullDown)
        } else if token_eq("floating", token) {
            Some(Self::Floating)
        } else if token_eq("analog", token) {
            Some(Self::Analog)
        } else {
            None
        }
    }
}

/// Name map from port tokens to port handles.
pub const PORT_NAMES: [(&str, PortId); 9] = [
    ("porta", PortId::A),
    ("portb", PortId::B),
    ("portc", PortId::C),
    ("portd", PortId::D),
    ("porte", PortId::E),
    ("portf", PortId::F),
    ("portg", PortId::G),
    ("porth", PortId::H),
    ("porti", PortId::I),
];

/// Name map from pin tokens to pad numbers.
pub const PIN_NAMES: [(&str, PinId); 16] = [
    ("pin0", PinId(0)),
    ("pin1", PinId(1)),
    ("pin2", PinId(2)),
    ("pin3", PinId(3)),
    ("pin4", PinId(4)),
    ("pin5", PinId(5)),
    ("pin6", PinId(6)),
    ("pin7", PinId(7)),
    ("pin8", PinId(8)),
    ("pin9", PinId(9)),
    ("pin10", PinId(10)),
    ("pin11", PinId(11)),
    ("pin12", PinId(12)),
    ("pin13", PinId(13)),
    ("pin14", PinId(14)),
    ("pin15", PinId(15)),
];

/// Resolve a port token to its handle. First map entry wins.
#[must_use]
pub fn resolve_port(token: &str) -> Option<PortId> {
    PORT_NAMES
        .iter()
        .find(|(name, _)| token_eq(name, token))
        .map(|(_, port)| *port)
}

/// Resolve a pin token to its pad number. First map entry wins.
#[must_use]
pub fn resolve_pin(token: &str) -> Option<PinId> {
    PIN_NAMES
        .iter()
        .find(|(name, _)| token_eq(name, token))
        .map(|(_, pin)| *pin)
}
