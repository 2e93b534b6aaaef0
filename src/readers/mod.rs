// src/readers/mod.rs

//! "Readers" for _lealib_.
//!
//! ## Overview of readers
//!
//! * A [`LogStreamProcessor`] reads the lines of one input source and drives
//!   an [`EntryAssembler`].
//! * An `EntryAssembler` groups lines into log messages, asks a
//!   [`RecordParser`] to parse each log message, filters by datetime, and
//!   passes results to an [`EntrySink`].
//! * A [`DtPrefixParser`] is a `RecordParser` for log messages that begin
//!   with a datetime stamp.
//!
//! An `EntryAssembler` may also notify registered [`EntryMonitor`]s.
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`Read`]: std::io::Read
//! [`LogStreamProcessor`]: crate::readers::logstreamprocessor::LogStreamProcessor
//! [`EntryAssembler`]: crate::readers::entryassembler::EntryAssembler
//! [`RecordParser`]: crate::readers::recordparser::RecordParser
//! [`EntrySink`]: crate::readers::entrysink::EntrySink
//! [`EntryMonitor`]: crate::readers::entrymonitor::EntryMonitor
//! [`DtPrefixParser`]: crate::readers::dtprefixparser::DtPrefixParser

pub mod dtprefixparser;
pub mod entryassembler;
pub mod entrymonitor;
pub mod entrysink;
pub mod logstreamprocessor;
pub mod recordparser;
pub mod summary;
