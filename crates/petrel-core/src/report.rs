// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Host report channel seam and the channel-locking reporter.
// Author: Lukas Bower

//! Host report channel seam.
//!
//! [`Report`] is the object-safe interface peripheral handlers use to emit
//! typed result lines; [`Reporter`] is the std implementation that owns the
//! shared host channel and serialises concurrent writers onto it. Each line
//! write is the atomic unit of mutual exclusion: the lock is held for one
//! formatted line, never across a whole transaction.

/// Typed host reporting interface.
///
/// Methods mirror the wire grammar one to one. Reporting never feeds errors
/// back into handler control flow; a broken host channel is logged and the
/// command proceeds to its own verdict.
pub trait Report {
    /// Open a response transaction (`BEGIN:`).
    fn begin(&self);
    /// Close the transaction with the command outcome (`END:OK`/`END:ERROR`).
    fn end(&self, ok: bool);
    /// Emit an informational text line.
    fn info(&self, text: &str);
    /// Emit a warning text line.
    fn warning(&self, text: &str);
    /// Emit an error text line.
    fn error(&self, text: &str);
    /// Emit a debug line carrying the emitting source location.
    fn debug(&self, file: &str, line: u32, func: &str, text: &str);
    /// Emit a named boolean.
    fn bool_value(&self, name: &str, value: bool);
    /// Emit a named string.
    fn string(&self, name: &str, text: &str);
    /// Emit a named string array.
    fn string_array(&self, name: &str, values: &[&str]);
    /// Emit a named `i8` array.
    fn i8_array(&self, name: &str, values: &[i8]);
    /// Emit a named `u8` array.
    fn u8_array(&self, name: &str, values: &[u8]);
    /// Emit a named `i16` array.
    fn i16_array(&self, name: &str, values: &[i16]);
    /// Emit a named `u16` array.
    fn u16_array(&self, name: &str, values: &[u16]);
    /// Emit a named `i32` array.
    fn i32_array(&self, name: &str, values: &[i32]);
    /// Emit a named `u32` array.
    fn u32_array(&self, name: &str, values: &[u32]);
    /// Emit a named floating point array.
    fn f64_array(&self, name: &str, values: &[f64]);
    /// Emit a named byte array as two-digit hex groups.
    fn hex8(&self, name: &str, values: &[u8]);
    /// Emit a named `u16` array as four-digit hex groups.
    fn hex16(&self, name: &str, values: &[u16]);
    /// Emit a named `u32` array as eight-digit hex groups.
    fn hex32(&self, name: &str, values: &[u32]);
}

#[cfg(feature = "std")]
pub use imp::Reporter;

#[cfg(feature = "std")]
mod imp {
    use core::fmt;
    use std::io::Write as IoWrite;
    use std::sync::{Mutex, MutexGuard};

    use report_wire as wire;

    use super::Report;

    /// Host channel reporter.
    ///
    /// Owns the shared output channel behind a mutex acquired for the
    /// duration of one formatted line and released by the guard on every
    /// exit path, so two concurrent callers' lines never interleave at the
    /// character level.
    pub struct Reporter<W: IoWrite> {
        channel: Mutex<W>,
    }

    /// `fmt::Write` adapter over the locked channel, surfacing io failures
    /// as `fmt::Error`.
    struct ChannelSink<'a, W: IoWrite> {
        inner: &'a mut W,
    }

    impl<W: IoWrite> fmt::Write for ChannelSink<'_, W> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.inner.write_all(s.as_bytes()).map_err(|_| fmt::Error)
        }
    }

    impl<W: IoWrite> Reporter<W> {
        /// Wrap the host channel.
        pub fn new(channel: W) -> Self {
            Self {
                channel: Mutex::new(channel),
            }
        }

        /// Consume the reporter and return the channel.
        pub fn into_inner(self) -> W {
            match self.channel.into_inner() {
                Ok(channel) => channel,
                Err(poisoned) => poisoned.into_inner(),
            }
        }

        // A panicking writer thread must not wedge the host channel.
        fn locked(&self) -> MutexGuard<'_, W> {
            match self.channel.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            }
        }

        fn emit<F>(&self, render: F)
        where
            F: FnOnce(&mut ChannelSink<'_, W>) -> fmt::Result,
        {
            let mut guard = self.locked();
            let mut sink = ChannelSink {
                inner: &mut *guard,
            };
            if render(&mut sink).is_err() {
                log::warn!("[report] host channel write failed");
            }
            let _ = guard.flush();
        }
    }

    impl<W: IoWrite> Report for Reporter<W> {
        fn begin(&self) {
            self.emit(|w| wire::render_begin(w));
        }

        fn end(&self, ok: bool) {
            self.emit(|w| wire::render_end(w, ok));
        }

        fn info(&self, text: &str) {
            self.emit(|w| wire::render_text(w, wire::TextLevel::Info, text));
        }

        fn warning(&self, text: &str) {
            self.emit(|w| wire::render_text(w, wire::TextLevel::Warning, text));
        }

        fn error(&self, text: &str) {
            self.emit(|w| wire::render_text(w, wire::TextLevel::Error, text));
        }

        fn debug(&self, file: &str, line: u32, func: &str, text: &str) {
            self.emit(|w| wire::render_debug(w, file, line, func, text));
        }

        fn bool_value(&self, name: &str, value: bool) {
            self.emit(|w| wire::render_bool(w, name, value));
        }

        fn string(&self, name: &str, text: &str) {
            self.emit(|w| wire::render_string(w, name, text));
        }

        fn string_array(&self, name: &str, values: &[&str]) {
            self.emit(|w| wire::render_str_array(w, name, values));
        }

        fn i8_array(&self, name: &str, values: &[i8]) {
            self.emit(|w| wire::render_i8s(w, name, values));
        }

        fn u8_array(&self, name: &str, values: &[u8]) {
            self.emit(|w| wire::render_u8s(w, name, values));
        }

        fn i16_array(&self, name: &str, values: &[i16]) {
            self.emit(|w| wire::render_i16s(w, name, values));
        }

        fn u16_array(&self, name: &str, values: &[u16]) {
            self.emit(|w| wire::render_u16s(w, name, values));
        }

        fn i32_array(&self, name: &str, values: &[i32]) {
            self.emit(|w| wire::render_i32s(w, name, values));
        }

        fn u32_array(&self, name: &str, values: &[u32]) {
            self.emit(|w| wire::render_u32s(w, name, values));
        }

        fn f64_array(&self, name: &str, values: &[f64]) {
            self.emit(|w| wire::render_f64s(w, name, values));
        }

        fn hex8(&self, name: &str, values: &[u8]) {
            self.emit(|w| wire::render_hex8(w, name, values));
        }

        fn hex16(&self, name: &str, values: &[u16]) {
            self.emit(|w| wire::render_hex16(w, name, values));
        }

        fn hex32(&self, name: &str, values: &[u32]) {
            self.emit(|w| wire::render_hex32(w, name, values));
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::string::String;
        use std::vec::Vec;

        #[test]
        fn lines_render_through_the_channel() {
            let reporter = Reporter::new(Vec::new());
            reporter.begin();
            reporter.bool_value("level", true);
            reporter.u16_array("samples", &[1, 2, 3]);
            reporter.string("name", "petrel");
            reporter.end(true);
            let output = String::from_utf8(reporter.into_inner()).expect("utf8");
            assert_eq!(
                output,
                "BEGIN:\r\nB:level:true\r\nU16:samples:1,2,3\r\nS:name:petrel\r\nEND:OK\r\n"
            );
        }

        #[test]
        fn failed_channel_does_not_panic() {
            /// Channel rejecting every write.
            struct Broken;

            impl IoWrite for Broken {
                fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                    Err(std::io::Error::other("down"))
                }
                fn flush(&mut self) -> std::io::Result<()> {
                    Ok(())
                }
            }

            let reporter = Reporter::new(Broken);
            reporter.error("nobody listening");
            reporter.end(false);
        }
    }
}
