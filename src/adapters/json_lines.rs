//! JSON-lines adapters for the host binary.
//!
//! [`JsonLinesSource`] reads one [`FuzzyInputs`] object per line and
//! implements [`SamplePort`]; [`JsonLinesSink`] writes one
//! [`FuzzyOutputs`] object per line and implements [`CommandPort`].
//!
//! ```text
//! {"speed":90,"acceleration":10,"path":0,"next_path":0,"stability":0.1}
//!   ──▶ {"steer":0.0,"accel":1.0,"gear":6,"brake":0.0}
//! ```

use std::io::{BufRead, ErrorKind, Read, Write};

use log::warn;

use crate::app::ports::{CommandPort, SamplePort};
use crate::control::{FuzzyInputs, FuzzyOutputs};

/// Longest accepted input line, newline excluded.  Longer lines are
/// discarded as malformed.
pub const MAX_LINE_BYTES: usize = 4096;

pub struct JsonLinesSource<R> {
    reader: R,
    line: Vec<u8>,
    line_no: u64,
    skipped: u64,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::with_capacity(256),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Lines rejected as malformed so far.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    fn reject(&mut self, reason: &dyn core::fmt::Display) {
        self.skipped += 1;
        warn!("line {}: skipping malformed sample: {reason}", self.line_no);
    }
}

impl<R: BufRead> SamplePort for JsonLinesSource<R> {
    /// Blank and malformed lines (bad JSON, invalid UTF-8, over
    /// [`MAX_LINE_BYTES`]) are skipped; end of input or an I/O error ends
    /// the feed.
    fn next_sample(&mut self) -> Option<FuzzyInputs> {
        loop {
            self.line.clear();
            let limit = MAX_LINE_BYTES as u64 + 1;
            match (&mut self.reader).take(limit).read_until(b'\n', &mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("input read failed after line {}: {e}", self.line_no);
                    return None;
                }
            }
            self.line_no += 1;

            if self.line.last() != Some(&b'\n') && self.line.len() > MAX_LINE_BYTES {
                if let Err(e) = self.reader.skip_until(b'\n') {
                    warn!("input read failed in line {}: {e}", self.line_no);
                    return None;
                }
                self.reject(&format_args!("longer than {MAX_LINE_BYTES} bytes"));
                continue;
            }

            let text = self.line.trim_ascii();
            if text.is_empty() {
                continue;
            }
            match serde_json::from_slice(text) {
                Ok(inputs) => return Some(inputs),
                Err(e) => self.reject(&e),
            }
        }
    }
}

pub struct JsonLinesSink<W: Write> {
    writer: W,
    failed: bool,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failed: false,
        }
    }

    /// `true` once any write has failed.
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CommandPort for JsonLinesSink<W> {
    fn apply(&mut self, outputs: &FuzzyOutputs) {
        if self.failed {
            return;
        }
        let written = serde_json::to_writer(&mut self.writer, outputs)
            .map_err(std::io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"))
            .and_then(|()| self.writer.flush());
        if let Err(e) = written {
            warn!("output write failed: {e}");
            self.failed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_skips_blank_and_malformed_lines() {
        let input = b"\n{not json}\n{\"speed\":12.5,\"acceleration\":0,\"path\":0.1,\"next_path\":0,\"stability\":0.3}\n";
        let mut src = JsonLinesSource::new(&input[..]);

        let sample = src.next_sample().unwrap();
        assert_eq!(sample.speed, 12.5);
        assert_eq!(sample.path, 0.1);
        assert_eq!(src.skipped(), 1);
        assert!(src.next_sample().is_none());
    }

    #[test]
    fn source_skips_invalid_utf8_and_keeps_reading() {
        let sample = br#"{"speed":40,"acceleration":0,"path":0,"next_path":0,"stability":0.1}"#;
        let mut input = Vec::new();
        input.extend_from_slice(sample);
        input.extend_from_slice(b"\n\xff\xfe garbage\n");
        input.extend_from_slice(sample);
        input.push(b'\n');

        let mut src = JsonLinesSource::new(&input[..]);
        let mut read = 0;
        while let Some(s) = src.next_sample() {
            assert_eq!(s.speed, 40.0);
            read += 1;
        }
        assert_eq!(read, 2);
        assert_eq!(src.skipped(), 1);
    }

    #[test]
    fn source_discards_overlong_lines() {
        let mut input = vec![b' '; MAX_LINE_BYTES * 3];
        input.extend_from_slice(b"{}\n");
        input.extend_from_slice(br#"{"speed":7,"acceleration":0,"path":0,"next_path":0,"stability":0}"#);

        let mut src = JsonLinesSource::new(&input[..]);
        let sample = src.next_sample().unwrap();
        assert_eq!(sample.speed, 7.0);
        assert_eq!(src.skipped(), 1);
        assert!(src.next_sample().is_none());
    }

    #[test]
    fn sink_writes_one_object_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.apply(&FuzzyOutputs::INITIAL);
        sink.apply(&FuzzyOutputs {
            steer: 0.5,
            accel: 1.0,
            gear: 3,
            brake: 0.0,
        });
        assert!(!sink.failed());

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: FuzzyOutputs = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, FuzzyOutputs::INITIAL);
        assert!(lines[1].contains("\"gear\":3"));
    }
}
