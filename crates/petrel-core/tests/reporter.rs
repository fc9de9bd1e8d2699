// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Exercise reporter line atomicity under concurrent writers.
// Author: Lukas Bower

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;

use petrel_core::{Report, Reporter};
use report_wire::{parse_report_line, DataKind, ReportLine};

const WRITERS: usize = 8;
const LINES_PER_WRITER: usize = 64;
const VALUES_PER_LINE: usize = 16;

/// Shared in-memory host channel.
#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    fn contents(&self) -> String {
        let buffer = self.0.lock().expect("sink lock");
        String::from_utf8(buffer.clone()).expect("utf8 output")
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("sink lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn concurrent_writers_never_tear_lines() {
    let sink = SharedSink::default();
    let reporter = Arc::new(Reporter::new(sink.clone()));

    let mut handles = Vec::new();
    for writer in 0..WRITERS {
        let reporter = Arc::clone(&reporter);
        handles.push(thread::spawn(move || {
            let name = format!("writer{writer}");
            let values = [writer as u16; VALUES_PER_LINE];
            for _ in 0..LINES_PER_WRITER {
                reporter.u16_array(&name, &values);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("writer thread");
    }

    let output = sink.contents();
    let mut seen = [0usize; WRITERS];
    for line in output.split_terminator("\r\n") {
        let parsed = parse_report_line(line)
            .unwrap_or_else(|| panic!("torn or foreign line: {line:?}"));
        let ReportLine::Data { kind, name, values } = parsed else {
            panic!("unexpected line kind: {line:?}");
        };
        assert_eq!(kind, DataKind::U16);
        let writer: usize = name
            .strip_prefix("writer")
            .and_then(|id| id.parse().ok())
            .unwrap_or_else(|| panic!("unknown writer name: {name:?}"));
        let expected = vec![writer.to_string(); VALUES_PER_LINE].join(",");
        assert_eq!(values, expected, "payload torn for {name}");
        seen[writer] += 1;
    }
    assert_eq!(seen, [LINES_PER_WRITER; WRITERS]);
}

#[test]
fn transaction_lines_interleave_but_stay_whole() {
    let sink = SharedSink::default();
    let reporter = Arc::new(Reporter::new(sink.clone()));

    let mut handles = Vec::new();
    for writer in 0..WRITERS {
        let reporter = Arc::clone(&reporter);
        handles.push(thread::spawn(move || {
            reporter.begin();
            reporter.info(&format!("writer {writer} reporting"));
            reporter.end(true);
        }));
    }
    for handle in handles {
        handle.join().expect("writer thread");
    }

    let output = sink.contents();
    let mut begins = 0;
    let mut ends = 0;
    for line in output.split_terminator("\r\n") {
        match parse_report_line(line) {
            Some(ReportLine::Begin) => begins += 1,
            Some(ReportLine::End { ok: true }) => ends += 1,
            Some(ReportLine::Text { .. }) => {}
            other => panic!("unexpected line {line:?}: {other:?}"),
        }
    }
    assert_eq!(begins, WRITERS);
    assert_eq!(ends, WRITERS);
}
