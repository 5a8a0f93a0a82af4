//! DXF ASCII pair reader with forward-scanning primitives

use super::stream_reader::DxfCodePair;
use crate::error::{IngestError, Result};
use crate::io::line_reader::LineReader;
use encoding_rs::Encoding;
use std::io::BufRead;

/// Keyword of the code 0 pair that ends a DXF file
const END_OF_FILE: &str = "EOF";

/// Reads code/value pairs from an ASCII DXF stream.
///
/// Each pair spans two physical lines; both are trimmed. A single pair can be
/// pushed back so that the keyword scan sees the pair that ended a record.
/// The `0/EOF` pair ends the stream; nothing after it is read.
pub struct DxfTextReader<R: BufRead> {
    lines: LineReader<R>,
    peeked_pair: Option<DxfCodePair>,
    at_end: bool,
}

impl<R: BufRead> DxfTextReader<R> {
    /// Create a new DXF text reader
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
            peeked_pair: None,
            at_end: false,
        }
    }

    pub fn set_encoding(&mut self, encoding: Option<&'static Encoding>) {
        self.lines.set_encoding(encoding);
    }

    pub fn line_number(&self) -> usize {
        self.lines.line_number()
    }

    /// Read the next pair. `None` when the stream ends at either line or at
    /// the `0/EOF` marker.
    pub fn read_pair(&mut self) -> Result<Option<DxfCodePair>> {
        if let Some(pair) = self.peeked_pair.take() {
            return Ok(Some(pair));
        }
        if self.at_end {
            return Ok(None);
        }

        let code_line = match self.next_code_line()? {
            Some(line) => line,
            None => return Ok(None),
        };

        let code = code_line.trim().parse::<i32>().map_err(|_| {
            IngestError::parse(
                self.lines.line_number(),
                format!("invalid DXF group code '{}'", code_line.trim()),
            )
        })?;

        let value_line = match self.lines.read_line()? {
            Some(line) => line,
            None => {
                tracing::warn!(
                    "DXF stream ends after group code {} at line {}",
                    code,
                    self.lines.line_number()
                );
                return Ok(None);
            }
        };

        let pair = DxfCodePair::new(code, value_line.trim().to_string(), self.lines.line_number());
        if pair.is_start() && pair.value_string == END_OF_FILE {
            tracing::trace!("EOF marker at line {}", pair.line);
            self.at_end = true;
            return Ok(None);
        }
        Ok(Some(pair))
    }

    /// Next non-blank code line. Blank lines are accepted only as trailing
    /// padding at the end of the stream.
    fn next_code_line(&mut self) -> Result<Option<String>> {
        let mut blank_at = None;
        while let Some(line) = self.lines.read_line()? {
            if !line.trim().is_empty() {
                return match blank_at {
                    Some(line_number) => Err(IngestError::parse(
                        line_number,
                        "invalid DXF group code ''",
                    )),
                    None => Ok(Some(line)),
                };
            }
            blank_at.get_or_insert(self.lines.line_number());
        }
        Ok(None)
    }

    /// Push a pair back to be read again on the next `read_pair` call
    pub fn push_back(&mut self, pair: DxfCodePair) {
        self.peeked_pair = Some(pair);
    }

    /// Skip forward until a value equals `target`. Returns whether it was
    /// found; the matching pair is consumed.
    pub fn find_value(&mut self, target: &str) -> Result<bool> {
        while let Some(pair) = self.read_pair()? {
            if pair.value_string == target {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Skip forward until an entity keyword (a code 0 value) equals one of
    /// `candidates`. Returns the index of the match, consuming its pair.
    pub fn find_keyword(&mut self, candidates: &[&str]) -> Result<Option<usize>> {
        while let Some(pair) = self.read_pair()? {
            if !pair.is_start() {
                continue;
            }
            if let Some(index) = candidates.iter().position(|c| *c == pair.value_string) {
                tracing::trace!("keyword {} at line {}", pair.value_string, pair.line);
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}
