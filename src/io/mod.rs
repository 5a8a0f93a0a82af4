//! I/O module: streaming readers that turn input files into polylines
//!
//! Every reader implements [`PolylineReader`]: a pull-based protocol where
//! each call hands back one finished [`Polyline`] or signals the end of the
//! stream. All state needed to resume between calls lives inside the reader.

pub mod dxf;
pub mod motion;
mod line_reader;

pub use dxf::{DxfPolylineReader, DxfReaderConfiguration, LayerFilter, RegexDialect};
pub use motion::{MotionLogConfiguration, MotionLogReader};

use crate::entities::Polyline;
use crate::error::Result;
use crate::notification::NotificationCollection;
use crate::pattern::Pattern;
use std::path::Path;

/// Pull-based polyline source
pub trait PolylineReader {
    /// Produce the next polyline, or `None` once the stream is exhausted.
    ///
    /// A returned polyline always has at least one vertex. A call may scan
    /// arbitrarily far ahead before it returns.
    fn read_polyline(&mut self) -> Result<Option<Polyline>>;

    /// Release the underlying stream.
    ///
    /// Calling it more than once is harmless; later reads return `None`.
    fn close(&mut self) -> Result<()>;

    /// Non-fatal events recorded so far
    fn notifications(&self) -> &NotificationCollection;

    /// Read every remaining polyline into a fresh pattern.
    ///
    /// On error nothing is returned; a half-read pattern is never handed out.
    fn read_pattern(&mut self) -> Result<Pattern> {
        let mut pattern = Pattern::new();
        while let Some(polyline) = self.read_polyline()? {
            pattern.add_polyline(polyline);
        }
        Ok(pattern)
    }

    /// Append every remaining polyline to `pattern`, returning how many were
    /// added. `pattern` is left untouched when reading fails.
    fn append_to(&mut self, pattern: &mut Pattern) -> Result<usize> {
        let read = self.read_pattern()?;
        let count = read.len();
        pattern.extend(read);
        Ok(count)
    }
}

/// Input file kinds understood by [`open_reader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// ASCII DXF drawing
    Dxf,
    /// Stage motion-command log
    MotionLog,
}

impl InputFormat {
    /// Pick the format from the file extension. Anything that is not `.dxf`
    /// is treated as a motion log.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("dxf") => InputFormat::Dxf,
            _ => InputFormat::MotionLog,
        }
    }
}

/// Configuration for both readers, used by [`open_reader`]
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    pub dxf: DxfReaderConfiguration,
    pub motion: MotionLogConfiguration,
}

/// Open `path` with the reader matching its extension.
pub fn open_reader<P: AsRef<Path>>(
    path: P,
    options: &ReaderOptions,
) -> Result<Box<dyn PolylineReader>> {
    let path = path.as_ref();
    let reader: Box<dyn PolylineReader> = match InputFormat::from_path(path) {
        InputFormat::Dxf => Box::new(
            DxfPolylineReader::from_file(path)?.with_configuration(options.dxf.clone()),
        ),
        InputFormat::MotionLog => Box::new(
            MotionLogReader::from_file(path)?.with_configuration(options.motion.clone()),
        ),
    };
    tracing::debug!("opened {} as {:?}", path.display(), InputFormat::from_path(path));
    Ok(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path("drawing.dxf"), InputFormat::Dxf);
        assert_eq!(InputFormat::from_path("DRAWING.DXF"), InputFormat::Dxf);
        assert_eq!(InputFormat::from_path("run.gwl"), InputFormat::MotionLog);
        assert_eq!(InputFormat::from_path("commands"), InputFormat::MotionLog);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let result = open_reader("does/not/exist.dxf", &ReaderOptions::default());
        assert!(matches!(result, Err(crate::error::IngestError::Io(_))));
    }
}
