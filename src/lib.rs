// src/lib.rs

//! _lealib_ reassembles multi-line log messages from a stream of lines,
//! parses each log message, filters it by datetime, and forwards it.
//!
//! A log message may span many physical lines, e.g. a stack trace following
//! a datetime-stamped line. An [`EntryAssembler`] decides where one log
//! message ends and the next begins, hands the reassembled text to a
//! [`RecordParser`], and forwards the result to an [`EntrySink`].
//! A [`LogStreamProcessor`] drives an `EntryAssembler` with the lines of one
//! file.
//!
//! [`EntryAssembler`]: crate::readers::entryassembler::EntryAssembler
//! [`RecordParser`]: crate::readers::recordparser::RecordParser
//! [`EntrySink`]: crate::readers::entrysink::EntrySink
//! [`LogStreamProcessor`]: crate::readers::logstreamprocessor::LogStreamProcessor

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
