// src/readers/recordparser.rs

//! The [`RecordParser`] trait, the boundary between the format-agnostic
//! [`EntryAssembler`] and a format-specific log message grammar.
//!
//! [`EntryAssembler`]: crate::readers::entryassembler::EntryAssembler
//! [`RecordParser`]: self::RecordParser

use crate::data::entry::LogEntry;

use std::fmt;

/// `Result` Extended for [`RecordParser::parse`].
///
/// Distinguishes text that is not a log message ([`Malformed`]), which is
/// expected and recoverable, from unexpected failures ([`Err`]).
///
/// [`RecordParser::parse`]: self::RecordParser#tymethod.parse
/// [`Malformed`]: self::ResultParse#variant.Malformed
/// [`Err`]: self::ResultParse#variant.Err
#[derive(Debug, PartialEq)]
pub enum ResultParse<T, E> {
    /// Contains the parsed log message.
    Found(T),
    /// The text could not be parsed as a log message. Contains a short
    /// reason for debug printing.
    Malformed(String),
    /// Contains the error value, something bad happened.
    Err(E),
}

impl<T, E> ResultParse<T, E> {
    /// Returns `true` if the result is [`Found`].
    ///
    /// [`Found`]: self::ResultParse#variant.Found
    #[inline(always)]
    pub const fn is_found(&self) -> bool {
        matches!(*self, ResultParse::Found(_))
    }

    /// Returns `true` if the result is [`Malformed`].
    ///
    /// [`Malformed`]: self::ResultParse#variant.Malformed
    #[inline(always)]
    pub const fn is_malformed(&self) -> bool {
        matches!(*self, ResultParse::Malformed(_))
    }

    /// Returns `true` if the result is [`Err`].
    ///
    /// [`Err`]: self::ResultParse#variant.Err
    #[inline(always)]
    pub const fn is_err(&self) -> bool {
        matches!(*self, ResultParse::Err(_))
    }

    /// Converts from `ResultParse<T, E>` to [`Option<T>`], discarding the
    /// malformed reason or error, if any.
    #[inline(always)]
    pub fn ok(self) -> Option<T> {
        match self {
            ResultParse::Found(x) => Some(x),
            ResultParse::Malformed(_) => None,
            ResultParse::Err(_) => None,
        }
    }
}

impl<T, E> fmt::Display for ResultParse<T, E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultParse::Found(_) => write!(f, "ResultParse::Found"),
            ResultParse::Malformed(reason) => write!(f, "ResultParse::Malformed({})", reason),
            ResultParse::Err(err) => write!(f, "ResultParse::Err({})", err),
        }
    }
}

/// Typed [`ResultParse`] for a [`RecordParser`].
pub type ResultParseEntry<T> = ResultParse<T, std::io::Error>;

/// A format-specific parser of log messages.
///
/// Implementations decide which lines begin a new log message, and parse
/// the text of a complete log message into a [`LogEntry`].
pub trait RecordParser {
    type Entry: LogEntry;

    /// Does `line` begin a new log message?
    ///
    /// Decided only from the content of `line`.
    fn is_beginning_of_log_entry(&self, line: &str) -> bool;

    /// Parse the `raw` text of one complete log message. Multiple lines are
    /// separated by `'\n'`.
    ///
    /// Return [`ResultParse::Malformed`] for text that is not a log message
    /// in this format. Return [`ResultParse::Err`] only for unexpected
    /// failures; that stops all further processing.
    fn parse(&self, raw: &str) -> ResultParseEntry<Self::Entry>;
}
