// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Defines the petrel library and public module surface.
// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Petrel bench instrument command core.
//!
//! The firmware-side assembly of the Petrel dispatch substrate: peripheral
//! command modules (GPIO, DAC), the hardware capability interfaces they
//! consume, and the top-level [`Bench`] router a shell session drives. The
//! grammar, dispatch, and reporting primitives live in `petrel-core`; the
//! host line format lives in `report-wire`.

pub mod bench;
pub mod dac;
pub mod gpio;
pub mod hal;

#[cfg(test)]
mod test_support;

pub use bench::Bench;
pub use dac::Dac;
pub use gpio::Gpio;
