// src/data/entry.rs

//! Implements the [`LogEntry`] trait and the [`DtEntry`] struct.
//!
//! [`LogEntry`]: crate::data::entry::LogEntry
//! [`DtEntry`]: crate::data::entry::DtEntry

use crate::common::{Count, NLc};
use crate::data::datetime::DateTimeL;

use std::fmt;

use ::more_asserts::debug_assert_le;

// --------
// LogEntry

/// A log message parsed from the text of one or more lines.
///
/// The datetime returned by [`dt`] is the creation time of the log message,
/// compared to the datetime filters.
///
/// [`dt`]: self::LogEntry#tymethod.dt
pub trait LogEntry: fmt::Debug {
    fn dt(&self) -> &DateTimeL;
}

// -------
// DtEntry

/// A `DtEntry` is a log message that begins with a datetime string on its
/// first line, created by a [`DtPrefixParser`].
///
/// [`DtPrefixParser`]: crate::readers::dtprefixparser::DtPrefixParser
#[derive(Clone, Eq, PartialEq)]
pub struct DtEntry {
    /// The full text of the log message; lines separated by `'\n'`.
    text: String,
    /// Index into `text` where datetime string starts (inclusive).
    ///
    /// Byte-based count.
    dt_beg: usize,
    /// Index into `text` where datetime string ends (exclusive).
    ///
    /// Byte-based count.
    dt_end: usize,
    /// Parsed DateTime instance.
    dt: DateTimeL,
}

impl fmt::Debug for DtEntry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("DtEntry")
            .field("dt", &self.dt)
            .field("dt_beg", &self.dt_beg)
            .field("dt_end", &self.dt_end)
            .field("count_lines()", &self.count_lines())
            .field("len()", &self.len())
            .finish()
    }
}

impl LogEntry for DtEntry {
    #[inline(always)]
    fn dt(&self) -> &DateTimeL {
        &self.dt
    }
}

impl DtEntry {
    /// Create a `DtEntry` from passed arguments.
    pub fn new(
        text: String,
        dt_beg: usize,
        dt_end: usize,
        dt: DateTimeL,
    ) -> DtEntry {
        debug_assert_le!(dt_beg, dt_end, "bad dt_beg {} dt_end {}", dt_beg, dt_end);
        debug_assert_le!(dt_end, text.len(), "bad dt_end {} text.len() {}", dt_end, text.len());

        DtEntry {
            text,
            dt_beg,
            dt_end,
            dt,
        }
    }

    /// Full text of the log message.
    #[inline(always)]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// The datetime substring of the first line.
    #[inline(always)]
    pub fn dt_str(&self) -> &str {
        &self.text[self.dt_beg..self.dt_end]
    }

    /// Text preceding the datetime substring, e.g. `"# Time: "`.
    #[inline(always)]
    pub fn prefix(&self) -> &str {
        &self.text[..self.dt_beg]
    }

    /// Text following the datetime substring, leading whitespace trimmed.
    pub fn message(&self) -> &str {
        self.text[self.dt_end..].trim_start()
    }

    #[inline(always)]
    pub const fn dt_beg(&self) -> usize {
        self.dt_beg
    }

    #[inline(always)]
    pub const fn dt_end(&self) -> usize {
        self.dt_end
    }

    /// Length of `text` in bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Count of lines in this log message.
    pub fn count_lines(&self) -> Count {
        self.text.matches(NLc).count() as Count + 1
    }

    /// Consume this `DtEntry` and return the text.
    pub fn into_text(self) -> String {
        self.text
    }
}
