// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Recording mock hardware for tests and the hardware-free driver.
// Author: Lukas Bower

//! Recording mock hardware.
//!
//! The mocks simulate just enough pad and converter state for the driver to
//! run without an instrument attached, and they record every capability call
//! so tests can assert exact invocation counts.

use petrel_core::{Direction, Level, PinId, PortId, Sense, PINS_PER_PORT};

use super::{DacLink, GpioPads};

/// Number of ports the pad mock models.
const PORT_COUNT: usize = 9;

/// One recorded pad capability call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadOp {
    /// `read(port, pin)`
    Read(PortId, PinId),
    /// `set(port, pin)`
    Set(PortId, PinId),
    /// `clear(port, pin)`
    Clear(PortId, PinId),
    /// `configure(port, pin, direction, sense)`
    Configure(PortId, PinId, Direction, Sense),
}

/// Pad mock backed by an in-memory level table.
#[derive(Debug)]
pub struct MockPads {
    levels: [[Level; PINS_PER_PORT]; PORT_COUNT],
    ops: Vec<PadOp>,
}

impl Default for MockPads {
    fn default() -> Self {
        Self {
            levels: [[Level::Low; PINS_PER_PORT]; PORT_COUNT],
            ops: Vec::new(),
        }
    }
}

impl MockPads {
    /// Recorded capability calls, in order.
    #[must_use]
    pub fn ops(&self) -> &[PadOp] {
        &self.ops
    }

    /// Preset a pad level without recording an operation.
    pub fn preset(&mut self, port: PortId, pin: PinId, level: Level) {
        self.levels[port.index()][pin.index()] = level;
    }
}

impl GpioPads for MockPads {
    fn read(&mut self, port: PortId, pin: PinId) -> Level {
        self.ops.push(PadOp::Read(port, pin));
        self.levels[port.index()][pin.index()]
    }

    fn set(&mut self, port: PortId, pin: PinId) {
        self.levels[port.index()][pin.index()] = Level::High;
        self.ops.push(PadOp::Set(port, pin));
    }

    fn clear(&mut self, port: PortId, pin: PinId) {
        self.levels[port.index()][pin.index()] = Level::Low;
        self.ops.push(PadOp::Clear(port, pin));
    }

    fn configure(&mut self, port: PortId, pin: PinId, direction: Direction, sense: Sense) -> bool {
        self.ops.push(PadOp::Configure(port, pin, direction, sense));
        true
    }
}

/// Converter link mock recording every transport write.
#[derive(Debug, Default)]
pub struct MockDacLink {
    internal: Vec<u16>,
    frames: Vec<[u8; 2]>,
}

impl MockDacLink {
    /// Values loaded into the internal converter, in order.
    #[must_use]
    pub fn internal_writes(&self) -> &[u16] {
        &self.internal
    }

    /// Frames sent to the external converter, in order.
    #[must_use]
    pub fn frames(&self) -> &[[u8; 2]] {
        &self.frames
    }

    /// Total transport writes across both converters.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.internal.len() + self.frames.len()
    }
}

impl DacLink for MockDacLink {
    fn internal_write(&mut self, value: u16) -> bool {
        self.internal.push(value);
        true
    }

    fn spi_frame(&mut self, frame: [u8; 2]) -> bool {
        self.frames.push(frame);
        true
    }
}
