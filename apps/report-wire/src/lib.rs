// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Defines the report-wire library and public module surface.
// Author: Lukas Bower
#![no_std]

//! Typed host report line representations shared across Petrel firmware and
//! host tooling.
//!
//! Every line on the host channel carries a one or two character type tag,
//! an optional payload name, and comma separated values, terminated by CRLF.
//! Transactions are bracketed by `BEGIN:` and `END:OK`/`END:ERROR`.

use core::fmt::{self, Display, UpperHex, Write};

/// Line terminator used on the host channel.
pub const EOL: &str = "\r\n";

/// Marker opening a response transaction.
pub const BEGIN_LINE: &str = "BEGIN:";

/// Marker closing a successful transaction.
pub const END_OK_LINE: &str = "END:OK";

/// Marker closing a failed transaction.
pub const END_ERROR_LINE: &str = "END:ERROR";

/// Severity of a free-form text line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextLevel {
    /// `#:` informational text.
    Info,
    /// `W:` warning text.
    Warning,
    /// `E:` error text.
    Error,
}

impl TextLevel {
    /// Return the wire tag for this level.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Info => "#",
            Self::Warning => "W",
            Self::Error => "E",
        }
    }

    /// Parse a wire tag into a text level.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "#" => Some(Self::Info),
            "W" => Some(Self::Warning),
            "E" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Payload kind of a typed data line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataKind {
    Bool,
    Str,
    StrArray,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F64,
    Hex8,
    Hex16,
    Hex32,
}

/// All data kinds in canonical order.
pub const ALL_DATA_KINDS: [DataKind; 13] = [
    DataKind::Bool,
    DataKind::Str,
    DataKind::StrArray,
    DataKind::I8,
    DataKind::U8,
    DataKind::I16,
    DataKind::U16,
    DataKind::I32,
    DataKind::U32,
    DataKind::F64,
    DataKind::Hex8,
    DataKind::Hex16,
    DataKind::Hex32,
];

impl DataKind {
    /// Return the wire tag for this payload kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Bool => "B",
            Self::Str => "S",
            Self::StrArray => "SA",
            Self::I8 => "S8",
            Self::U8 => "U8",
            Self::I16 => "S16",
            Self::U16 => "U16",
            Self::I32 => "S32",
            Self::U32 => "U32",
            Self::F64 => "F",
            Self::Hex8 => "H8",
            Self::Hex16 => "H16",
            Self::Hex32 => "H32",
        }
    }

    /// Parse a wire tag into a payload kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        ALL_DATA_KINDS.iter().copied().find(|kind| kind.tag() == tag)
    }
}

/// Parsed host report line classification.
#[derive(Clone, Debug, PartialEq)]
pub enum ReportLine<'a> {
    /// Transaction open marker.
    Begin,
    /// Transaction close marker with outcome.
    End {
        /// Whether the command succeeded.
        ok: bool,
    },
    /// Free-form leveled text.
    Text {
        /// Severity of the line.
        level: TextLevel,
        /// Text payload.
        text: &'a str,
    },
    /// Debug line carrying its source location.
    Debug {
        /// Source file that emitted the line.
        file: &'a str,
        /// Source line number.
        line: u32,
        /// Function name.
        func: &'a str,
        /// Text payload.
        text: &'a str,
    },
    /// Typed named data payload.
    Data {
        /// Payload kind derived from the tag.
        kind: DataKind,
        /// Payload name.
        name: &'a str,
        /// Raw comma separated value text.
        values: &'a str,
    },
}

/// Whether a text payload still needs a line terminator appended.
fn needs_newline(text: &str) -> bool {
    !(text.ends_with('\n') || text.ends_with('\r'))
}

/// Render the transaction open marker.
pub fn render_begin<W: Write>(w: &mut W) -> fmt::Result {
    w.write_str(BEGIN_LINE)?;
    w.write_str(EOL)
}

/// Render the transaction close marker for the given outcome.
pub fn render_end<W: Write>(w: &mut W, ok: bool) -> fmt::Result {
    w.write_str(if ok { END_OK_LINE } else { END_ERROR_LINE })?;
    w.write_str(EOL)
}

/// Render a free-form text line at the given level.
///
/// The terminator is appended only when the text does not already end in a
/// newline, so callers may supply pre-terminated text verbatim.
pub fn render_text<W: Write>(w: &mut W, level: TextLevel, text: &str) -> fmt::Result {
    w.write_str(level.tag())?;
    w.write_char(':')?;
    w.write_str(text)?;
    if needs_newline(text) {
        w.write_str(EOL)?;
    }
    Ok(())
}

/// Render a debug line carrying the emitting source location.
pub fn render_debug<W: Write>(
    w: &mut W,
    file: &str,
    line: u32,
    func: &str,
    text: &str,
) -> fmt::Result {
    write!(w, "?:{file}:{line}:{func}:{text}")?;
    if needs_newline(text) {
        w.write_str(EOL)?;
    }
    Ok(())
}

/// Render a named boolean payload.
pub fn render_bool<W: Write>(w: &mut W, name: &str, value: bool) -> fmt::Result {
    write!(w, "B:{name}:{}{EOL}", if value { "true" } else { "false" })
}

/// Render a named string payload.
pub fn render_string<W: Write>(w: &mut W, name: &str, text: &str) -> fmt::Result {
    write!(w, "S:{name}:{text}")?;
    if needs_newline(text) {
        w.write_str(EOL)?;
    }
    Ok(())
}

/// Render a named string array payload.
pub fn render_str_array<W: Write>(w: &mut W, name: &str, values: &[&str]) -> fmt::Result {
    write!(w, "SA:{name}:")?;
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            w.write_char(',')?;
        }
        w.write_str(value)?;
    }
    w.write_str(EOL)
}

/// Comma separated display values behind a tag and name.
fn render_display_array<W: Write, T: Display>(
    w: &mut W,
    tag: &str,
    name: &str,
    values: &[T],
) -> fmt::Result {
    write!(w, "{tag}:{name}:")?;
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            w.write_char(',')?;
        }
        write!(w, "{value}")?;
    }
    w.write_str(EOL)
}

/// Render a named `i8` array payload.
pub fn render_i8s<W: Write>(w: &mut W, name: &str, values: &[i8]) -> fmt::Result {
    render_display_array(w, "S8", name, values)
}

/// Render a named `u8` array payload.
pub fn render_u8s<W: Write>(w: &mut W, name: &str, values: &[u8]) -> fmt::Result {
    render_display_array(w, "U8", name, values)
}

/// Render a named `i16` array payload.
pub fn render_i16s<W: Write>(w: &mut W, name: &str, values: &[i16]) -> fmt::Result {
    render_display_array(w, "S16", name, values)
}

/// Render a named `u16` array payload.
pub fn render_u16s<W: Write>(w: &mut W, name: &str, values: &[u16]) -> fmt::Result {
    render_display_array(w, "U16", name, values)
}

/// Render a named `i32` array payload.
pub fn render_i32s<W: Write>(w: &mut W, name: &str, values: &[i32]) -> fmt::Result {
    render_display_array(w, "S32", name, values)
}

/// Render a named `u32` array payload.
pub fn render_u32s<W: Write>(w: &mut W, name: &str, values: &[u32]) -> fmt::Result {
    render_display_array(w, "U32", name, values)
}

/// Render a named floating point array payload with six decimal places.
pub fn render_f64s<W: Write>(w: &mut W, name: &str, values: &[f64]) -> fmt::Result {
    write!(w, "F:{name}:")?;
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            w.write_char(',')?;
        }
        write!(w, "{value:.6}")?;
    }
    w.write_str(EOL)
}

/// Zero padded uppercase hex values behind a tag and name.
fn render_hex_array<W: Write, T: UpperHex>(
    w: &mut W,
    tag: &str,
    name: &str,
    width: usize,
    values: &[T],
) -> fmt::Result {
    write!(w, "{tag}:{name}:")?;
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            w.write_char(',')?;
        }
        write!(w, "{value:0width$X}")?;
    }
    w.write_str(EOL)
}

/// Render a named byte array as two-digit hex groups.
pub fn render_hex8<W: Write>(w: &mut W, name: &str, values: &[u8]) -> fmt::Result {
    render_hex_array(w, "H8", name, 2, values)
}

/// Render a named `u16` array as four-digit hex groups.
pub fn render_hex16<W: Write>(w: &mut W, name: &str, values: &[u16]) -> fmt::Result {
    render_hex_array(w, "H16", name, 4, values)
}

/// Render a named `u32` array as eight-digit hex groups.
pub fn render_hex32<W: Write>(w: &mut W, name: &str, values: &[u32]) -> fmt::Result {
    render_hex_array(w, "H32", name, 8, values)
}

/// Parse a received host line into its wire classification.
///
/// Trailing CR/LF is tolerated. Returns `None` for lines that do not follow
/// the report grammar.
#[must_use]
pub fn parse_report_line(line: &str) -> Option<ReportLine<'_>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line == BEGIN_LINE {
        return Some(ReportLine::Begin);
    }
    if line == END_OK_LINE {
        return Some(ReportLine::End { ok: true });
    }
    if line == END_ERROR_LINE {
        return Some(ReportLine::End { ok: false });
    }

    let (tag, rest) = line.split_once(':')?;
    if let Some(level) = TextLevel::from_tag(tag) {
        return Some(ReportLine::Text { level, text: rest });
    }
    if tag == "?" {
        let mut parts = rest.splitn(4, ':');
        let file = parts.next()?;
        let line_no = parts.next()?.parse().ok()?;
        let func = parts.next()?;
        let text = parts.next()?;
        return Some(ReportLine::Debug {
            file,
            line: line_no,
            func,
            text,
        });
    }
    let kind = DataKind::from_tag(tag)?;
    let (name, values) = rest.split_once(':')?;
    Some(ReportLine::Data { kind, name, values })
}
