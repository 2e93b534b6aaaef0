// src/readers/entrysink.rs

//! The [`EntrySink`] trait, receiver of the log messages finalized by an
//! [`EntryAssembler`], and [`EntryCollector`], a sink that keeps everything.
//!
//! [`EntryAssembler`]: crate::readers::entryassembler::EntryAssembler
//! [`EntrySink`]: self::EntrySink
//! [`EntryCollector`]: self::EntryCollector

use crate::common::Count;

/// Receives log messages from an [`EntryAssembler`].
///
/// Calls are in the order the log messages were finalized.
///
/// [`EntryAssembler`]: crate::readers::entryassembler::EntryAssembler
pub trait EntrySink<E> {
    /// A log message that parsed and passed the datetime filters.
    fn add_entry(&mut self, entry: E);

    /// The exact text of a log message that could not be parsed.
    /// Never subject to the datetime filters.
    fn add_unknown_entry(&mut self, raw: String);
}

/// An [`EntrySink`] that stores every entry and unknown entry in arrival
/// order.
#[derive(Debug)]
pub struct EntryCollector<E> {
    pub entries: Vec<E>,
    pub unknown_entries: Vec<String>,
}

impl<E> Default for EntryCollector<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EntryCollector<E> {
    pub fn new() -> Self {
        EntryCollector {
            entries: Vec::new(),
            unknown_entries: Vec::new(),
        }
    }

    pub fn count_entries(&self) -> Count {
        self.entries.len() as Count
    }

    pub fn count_unknown_entries(&self) -> Count {
        self.unknown_entries.len() as Count
    }
}

impl<E> EntrySink<E> for EntryCollector<E> {
    fn add_entry(&mut self, entry: E) {
        self.entries.push(entry);
    }

    fn add_unknown_entry(&mut self, raw: String) {
        self.unknown_entries.push(raw);
    }
}

/// Forward to the referenced sink; lets a caller keep ownership of a sink.
impl<E, S> EntrySink<E> for &mut S
where
    S: EntrySink<E> + ?Sized,
{
    #[inline(always)]
    fn add_entry(&mut self, entry: E) {
        (**self).add_entry(entry)
    }

    #[inline(always)]
    fn add_unknown_entry(&mut self, raw: String) {
        (**self).add_unknown_entry(raw)
    }
}
