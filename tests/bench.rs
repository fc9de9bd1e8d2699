// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: End-to-end command round trips through the Bench router.
// Author: Lukas Bower

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use petrel::hal::{MockDacLink, MockPads, PadOp};
use petrel::Bench;
use petrel_core::{Level, PinId, PortId, Reporter};
use report_wire::{parse_report_line, ReportLine};

/// Shared in-memory host channel.
#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().expect("sink lock").clone()).expect("utf8 output")
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

fn bench() -> (Bench<MockPads, MockDacLink>, SharedSink) {
    let sink = SharedSink::default();
    let report = Arc::new(Reporter::new(sink.clone()));
    let bench = Bench::new(report, MockPads::default(), MockDacLink::default());
    (bench, sink)
}

fn pin(number: u8) -> PinId {
    PinId::new(number).expect("pin in range")
}

#[test]
fn set_round_trip_drives_the_pad_and_closes_ok() {
    let (mut bench, sink) = bench();
    assert!(bench.handle_line("gpio:set:porta:pin3"));
    assert_eq!(bench.gpio().pads().ops(), [PadOp::Set(PortId::A, pin(3))]);
    assert_eq!(sink.contents(), "BEGIN:\r\nEND:OK\r\n");
}

#[test]
fn get_round_trip_reports_the_level() {
    let (mut bench, sink) = bench();
    bench
        .gpio_mut()
        .pads_mut()
        .preset(PortId::H, pin(2), Level::High);
    assert!(bench.handle_line("gpio:get:porth:pin2"));
    assert_eq!(
        sink.contents(),
        "BEGIN:\r\nB:level:true\r\nEND:OK\r\n"
    );
}

#[test]
fn whitespace_heavy_config_still_lands() {
    let (mut bench, _sink) = bench();
    assert!(bench.handle_line(" gpio : \tconfig :p orth:p\tin2:output:floa  t i n g "));
    assert_eq!(
        bench.gpio().pads().ops(),
        [PadOp::Configure(
            PortId::H,
            pin(2),
            petrel_core::Direction::Output,
            petrel_core::Sense::Floating
        )]
    );
}

#[test]
fn bogus_direction_closes_error_without_touching_pads() {
    let (mut bench, sink) = bench();
    assert!(!bench.handle_line("gpio:config:porta:pin3:bogus:floating"));
    assert!(bench.gpio().pads().ops().is_empty());
    let output = sink.contents();
    assert!(output.starts_with("BEGIN:\r\n"));
    assert!(output.ends_with("END:ERROR\r\n"));
    assert!(output.contains("E:invalid direction"));
}

#[test]
fn config_missing_sense_closes_error_without_touching_pads() {
    let (mut bench, sink) = bench();
    assert!(!bench.handle_line("gpio:config:porta:pin3:input"));
    assert!(bench.gpio().pads().ops().is_empty());
    assert!(sink.contents().ends_with("END:ERROR\r\n"));
}

#[test]
fn dac_write_routes_channels() {
    let (mut bench, sink) = bench();
    assert!(bench.handle_line("dac:write(4, 2048)"));
    assert_eq!(bench.dac().link().internal_writes(), [0, 2048]);
    assert!(sink.contents().ends_with("END:OK\r\n"));

    let writes_before = bench.dac().link().write_count();
    assert!(!bench.handle_line("dac:write(7, 100)"));
    assert_eq!(bench.dac().link().write_count(), writes_before);
    assert!(sink.contents().ends_with("END:ERROR\r\n"));
}

#[test]
fn unknown_module_is_a_well_formed_failure() {
    let (mut bench, sink) = bench();
    assert!(!bench.handle_line("adc:start"));
    assert_eq!(
        sink.contents(),
        "BEGIN:\r\nE:command not implemented\r\nEND:ERROR\r\n"
    );
}

#[test]
fn split_errors_are_reported_inside_a_transaction() {
    let (mut bench, sink) = bench();
    assert!(!bench.handle_line("dac:write(4, 2048"));
    let output = sink.contents();
    assert!(output.starts_with("BEGIN:\r\nE:"));
    assert!(output.ends_with("END:ERROR\r\n"));
}

#[test]
fn module_prefix_abbreviation_selects_the_declared_entry() {
    let (mut bench, _sink) = bench();
    // "gpios" extends the declared module name and still routes to it.
    assert!(bench.handle_line("gpios:set:porta:pin0"));
    assert_eq!(bench.gpio().pads().ops(), [PadOp::Set(PortId::A, pin(0))]);
}

#[test]
fn every_output_line_parses_as_report_wire() {
    let (mut bench, sink) = bench();
    bench.handle_line("help");
    bench.handle_line("gpio:help");
    bench.handle_line("dac:help()");
    bench.handle_line("gpio:get:porta:pin0");
    bench.handle_line("dac:write(2, 0x800)");
    bench.handle_line("bogus:thing");

    let output = sink.contents();
    let mut begins = 0;
    let mut ends = 0;
    for line in output.split_terminator("\r\n") {
        match parse_report_line(line) {
            Some(ReportLine::Begin) => begins += 1,
            Some(ReportLine::End { .. }) => ends += 1,
            Some(_) => {}
            None => panic!("unparseable output line: {line:?}"),
        }
    }
    assert_eq!(begins, 6);
    assert_eq!(ends, 6);
}
