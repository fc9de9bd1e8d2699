// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Shared report stub for unit tests.
// Author: Lukas Bower

//! Report stub collecting emitted lines for unit test assertions.

use std::sync::Mutex;

use petrel_core::Report;

/// Thread-safe report collecting one string per emitted line.
#[derive(Default)]
pub struct CollectingReport {
    lines: Mutex<Vec<String>>,
}

impl CollectingReport {
    /// Snapshot of the collected lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("report lock").clone()
    }

    fn push(&self, line: String) {
        self.lines.lock().expect("report lock").push(line);
    }
}

impl Report for CollectingReport {
    fn begin(&self) {
        self.push("BEGIN:".into());
    }
    fn end(&self, ok: bool) {
        self.push(if ok { "END:OK" } else { "END:ERROR" }.into());
    }
    fn info(&self, text: &str) {
        self.push(format!("#:{text}"));
    }
    fn warning(&self, text: &str) {
        self.push(format!("W:{text}"));
    }
    fn error(&self, text: &str) {
        self.push(format!("E:{text}"));
    }
    fn debug(&self, _file: &str, _line: u32, _func: &str, text: &str) {
        self.push(format!("?:{text}"));
    }
    fn bool_value(&self, name: &str, value: bool) {
        self.push(format!("B:{name}:{value}"));
    }
    fn string(&self, name: &str, text: &str) {
        self.push(format!("S:{name}:{text}"));
    }
    fn string_array(&self, name: &str, values: &[&str]) {
        self.push(format!("SA:{name}:{}", values.join(",")));
    }
    fn i8_array(&self, name: &str, values: &[i8]) {
        self.push(format!("S8:{name}:{values:?}"));
    }
    fn u8_array(&self, name: &str, values: &[u8]) {
        self.push(format!("U8:{name}:{values:?}"));
    }
    fn i16_array(&self, name: &str, values: &[i16]) {
        self.push(format!("S16:{name}:{values:?}"));
    }
    fn u16_array(&self, name: &str, values: &[u16]) {
        self.push(format!("U16:{name}:{values:?}"));
    }
    fn i32_array(&self, name: &str, values: &[i32]) {
        self.push(format!("S32:{name}:{values:?}"));
    }
    fn u32_array(&self, name: &str, values: &[u32]) {
        self.push(format!("U32:{name}:{values:?}"));
    }
    fn f64_array(&self, name: &str, values: &[f64]) {
        self.push(format!("F:{name}:{values:?}"));
    }
    fn hex8(&self, name: &str, values: &[u8]) {
        self.push(format!("H8:{name}:{values:X?}"));
    }
    fn hex16(&self, name: &str, values: &[u16]) {
        self.push(format!("H16:{name}:{values:X?}"));
    }
    fn hex32(&self, name: &str, values: &[u32]) {
        self.push(format!("H32:{name}:{values:X?}"));
    }
}
