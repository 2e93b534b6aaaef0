// src/data/mod.rs

//! The `data` module is specialized data containers and datetime helpers.
//!
//! ## Definitions of data
//!
//! ### Line
//!
//! A "line" is a sequence of characters in a file that:
//!
//! * begin after a prior "line" or the beginning of a file.
//! * end with a newline character `'\n'` or the end of a file.
//!
//! A line does not include the newline character.
//!
//! ### Log entry
//!
//! A "log entry" is sequence of "lines" that:
//!
//! * begins with a line the [`RecordParser`] declares to be the beginning of a
//!   log entry, or is the very first line of the file.
//! * continues up to, but not including, the next line that begins a log entry.
//!
//! A parsed log entry is represented by a type implementing [`LogEntry`],
//! e.g. [`DtEntry`]. The text of a log entry that failed to parse is kept
//! as a `String`, an "unknown entry".
//!
//! [`RecordParser`]: crate::readers::recordparser::RecordParser
//! [`LogEntry`]: crate::data::entry::LogEntry
//! [`DtEntry`]: crate::data::entry::DtEntry

pub mod datetime;
pub mod entry;
