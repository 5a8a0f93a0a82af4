//! Line source shared by the DXF and motion-log readers

use crate::error::Result;
use encoding_rs::Encoding;
use std::io::BufRead;

/// Reads physical lines from a buffered stream.
///
/// Line endings (`\n` or `\r\n`) are removed. Lines that are not valid UTF-8
/// are decoded with the configured fallback encoding, or as Latin-1 when none
/// is set.
pub(crate) struct LineReader<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
    /// Non-UTF8 fallback encoding. `None` means Latin-1 (byte-to-char).
    encoding: Option<&'static Encoding>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: Vec::new(),
            encoding: None,
        }
    }

    /// Number of the last line returned, 1-based (0 before the first read)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn set_encoding(&mut self, encoding: Option<&'static Encoding>) {
        self.encoding = encoding;
    }

    /// Read the next line, or `None` once the stream is exhausted.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        while matches!(self.buffer.last(), Some(b'\n') | Some(b'\r')) {
            self.buffer.pop();
        }

        // Try UTF-8 first, then the configured encoding or Latin-1
        let line = match std::str::from_utf8(&self.buffer) {
            Ok(s) => s.to_string(),
            Err(_) => match self.encoding {
                Some(enc) => {
                    let (decoded, _, _) = enc.decode(&self.buffer);
                    decoded.into_owned()
                }
                // Latin-1 is a 1:1 mapping of bytes 0-255 to Unicode code points
                None => self.buffer.iter().map(|&b| b as char).collect(),
            },
        };

        Ok(Some(line))
    }
}
