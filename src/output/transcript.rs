//! JSONL transcript of emitted symbols.
//!
//! Each symbol is appended as one line:
//!
//! ```text
//! {"timestamp":"2024-05-01T12:00:00.123456789+00:00","symbol":"a"}
//! {"timestamp":"2024-05-01T12:00:01.482117003+00:00","symbol":"backspace"}
//! ```

use chrono::Utc;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::SymbolSink;
use crate::error::Result;
use crate::typing::symbol::Symbol;

#[derive(Debug, Serialize)]
struct TranscriptRecord {
    timestamp: String,
    symbol: String,
}

/// Forwards every symbol to an inner sink and records it to a file.
///
/// The record is written after the inner sink accepted the symbol.
pub struct TranscriptSink<S: SymbolSink> {
    inner: S,
    file: BufWriter<File>,
}

impl<S: SymbolSink> TranscriptSink<S> {
    /// Opens `path` for appending, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, inner: S) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        info!("Recording transcript to {}", path.as_ref().display());

        Ok(Self {
            inner,
            file: BufWriter::new(file),
        })
    }

    /// Returns the wrapped sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SymbolSink> SymbolSink for TranscriptSink<S> {
    fn emit(&mut self, symbol: Symbol) -> Result<()> {
        self.inner.emit(symbol)?;

        let record = TranscriptRecord {
            timestamp: Utc::now().to_rfc3339(),
            symbol: symbol.to_string(),
        };
        serde_json::to_writer(&mut self.file, &record)?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MockSymbolSink;
    use tempfile::NamedTempFile;

    fn read_records(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_records_one_line_per_symbol() {
        let temp = NamedTempFile::new().unwrap();
        let mut sink = TranscriptSink::open(temp.path(), Vec::<Symbol>::new()).unwrap();

        sink.emit(Symbol::Char('q')).unwrap();
        sink.emit(Symbol::LeftClick).unwrap();

        let records = read_records(temp.path());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["symbol"], "q");
        assert_eq!(records[1]["symbol"], "left click");
        assert!(records[0]["timestamp"].as_str().unwrap().contains('T'));

        assert_eq!(sink.into_inner(), vec![Symbol::Char('q'), Symbol::LeftClick]);
    }

    #[test]
    fn test_appends_to_existing_file() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "{\"timestamp\":\"x\",\"symbol\":\"z\"}\n").unwrap();

        let mut sink = TranscriptSink::open(temp.path(), Vec::<Symbol>::new()).unwrap();
        sink.emit(Symbol::Char('a')).unwrap();

        let records = read_records(temp.path());
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["symbol"], "a");
    }

    #[test]
    fn test_inner_failure_is_not_recorded() {
        let temp = NamedTempFile::new().unwrap();
        let mut inner = MockSymbolSink::new();
        inner.expect_emit().times(1).returning(|_| {
            Err(crate::error::StickTyperError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "closed",
            )))
        });

        let mut sink = TranscriptSink::open(temp.path(), inner).unwrap();
        assert!(sink.emit(Symbol::Char('a')).is_err());
        assert!(read_records(temp.path()).is_empty());
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let result = TranscriptSink::open("/nonexistent/dir/transcript.jsonl", Vec::<Symbol>::new());
        assert!(result.is_err());
    }
}
