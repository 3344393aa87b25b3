//! # Output Module
//!
//! Delivers emitted symbols.
//!
//! This module handles:
//! - The sink abstraction used by the typing loop
//! - Console rendering (one symbol per line, or inline text)
//! - Optional JSONL transcript of everything typed

pub mod console;
pub mod transcript;

use crate::error::Result;
use crate::typing::symbol::Symbol;

pub use console::{ConsoleSink, OutputMode};
pub use transcript::TranscriptSink;

/// Consumer of emitted symbols, called once per symbol in emission order.
#[cfg_attr(test, mockall::automock)]
pub trait SymbolSink {
    /// Deliver one symbol.
    fn emit(&mut self, symbol: Symbol) -> Result<()>;
}

impl<S: SymbolSink + ?Sized> SymbolSink for Box<S> {
    fn emit(&mut self, symbol: Symbol) -> Result<()> {
        (**self).emit(symbol)
    }
}

impl SymbolSink for Vec<Symbol> {
    fn emit(&mut self, symbol: Symbol) -> Result<()> {
        self.push(symbol);
        Ok(())
    }
}
