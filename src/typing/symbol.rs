//! # Output Symbols
//!
//! The alphabet produced by the selection state machine. Most symbols are
//! printable characters; the rest are named editing or control keys that a
//! sink has to interpret itself.

use std::fmt;

/// A single emitted symbol.
///
/// `Display` renders printable characters as themselves and named keys by
/// their lowercase name (`"backspace"`, `"left click"`, ...).
///
/// # Examples
///
/// ```
/// use stick_typer::typing::symbol::Symbol;
///
/// assert_eq!(Symbol::Char('a').to_string(), "a");
/// assert_eq!(Symbol::LeftClick.to_string(), "left click");
/// assert!(Symbol::Char('7').is_printable());
/// assert!(!Symbol::Shift.is_printable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A printable character.
    Char(char),
    Backspace,
    Enter,
    Space,
    Tab,
    Delete,
    Ctrl,
    Shift,
    Alt,
    LeftClick,
    RightClick,
    /// Number-lock style layer toggle.
    Num,
    Mouse,
    /// Caps toggle.
    Cap,
}

impl Symbol {
    /// Returns the name used for this symbol in line output and transcripts.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Char(_) => "char",
            Symbol::Backspace => "backspace",
            Symbol::Enter => "enter",
            Symbol::Space => "space",
            Symbol::Tab => "tab",
            Symbol::Delete => "delete",
            Symbol::Ctrl => "ctrl",
            Symbol::Shift => "shift",
            Symbol::Alt => "alt",
            Symbol::LeftClick => "left click",
            Symbol::RightClick => "right click",
            Symbol::Num => "num",
            Symbol::Mouse => "mouse",
            Symbol::Cap => "cap",
        }
    }

    /// True for plain characters.
    #[must_use]
    pub fn is_printable(&self) -> bool {
        matches!(self, Symbol::Char(_))
    }

    /// The text a terminal should receive for this symbol, if any.
    ///
    /// Whitespace keys become their characters and backspace erases the
    /// previous cell. Modifiers and pointer keys have no text form.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Symbol::Char(c) => Some(c.to_string()),
            Symbol::Space => Some(" ".to_string()),
            Symbol::Enter => Some("\n".to_string()),
            Symbol::Tab => Some("\t".to_string()),
            Symbol::Backspace => Some("\x08 \x08".to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{}", c),
            other => f.write_str(other.name()),
        }
    }
}
