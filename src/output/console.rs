//! Console rendering of symbols.

use serde::Deserialize;
use std::io::Write;
use tracing::debug;

use super::SymbolSink;
use crate::error::Result;
use crate::typing::symbol::Symbol;

/// How symbols are written to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One symbol per line; named keys are written by name.
    #[default]
    Lines,
    /// Characters inline; whitespace and backspace are applied, other
    /// named keys are skipped.
    Text,
}

/// Writes symbols to any `Write` target, flushing after each one.
///
/// # Examples
///
/// ```
/// use stick_typer::output::{ConsoleSink, OutputMode, SymbolSink};
/// use stick_typer::typing::symbol::Symbol;
///
/// let mut sink = ConsoleSink::new(Vec::new(), OutputMode::Lines);
/// sink.emit(Symbol::Char('a')).unwrap();
/// sink.emit(Symbol::Backspace).unwrap();
/// assert_eq!(sink.into_inner(), b"a\nbackspace\n");
/// ```
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    writer: W,
    mode: OutputMode,
}

impl ConsoleSink<std::io::Stdout> {
    /// Sink writing to standard output.
    #[must_use]
    pub fn stdout(mode: OutputMode) -> Self {
        Self::new(std::io::stdout(), mode)
    }
}

impl<W: Write> ConsoleSink<W> {
    #[must_use]
    pub fn new(writer: W, mode: OutputMode) -> Self {
        Self { writer, mode }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SymbolSink for ConsoleSink<W> {
    fn emit(&mut self, symbol: Symbol) -> Result<()> {
        match self.mode {
            OutputMode::Lines => writeln!(self.writer, "{}", symbol)?,
            OutputMode::Text => match symbol.as_text() {
                Some(text) => write!(self.writer, "{}", text)?,
                None => debug!("No text form for {}, skipped", symbol),
            },
        }
        self.writer.flush()?;
        Ok(())
    }
}
