// src/readers/summary.rs

//! Implements `SummaryEntryAssembler` statistics tracking struct.

#![allow(non_snake_case)]

use crate::common::Count;
use crate::data::datetime::{DateTimeL, DateTimeLOpt};

/// Accumulated statistics about the processing activity of an
/// [`EntryAssembler`]. Gathered as processing happens; never influences
/// processing.
///
/// For CLI option `--summary`.
///
/// [`EntryAssembler`]: crate::readers::entryassembler::EntryAssembler
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SummaryEntryAssembler {
    /// Count of lines passed to `consume_line`.
    pub EntryAssembler_lines: Count,
    /// Count of log messages finalized; i.e. passed to the `RecordParser`.
    pub EntryAssembler_records: Count,
    /// Count of log messages passed to `EntrySink::add_entry`.
    pub EntryAssembler_entries_accepted: Count,
    /// Count of parsed log messages with datetime before the
    /// `dt_filter_after`.
    pub EntryAssembler_entries_filtered_before: Count,
    /// Count of parsed log messages with datetime after the
    /// `dt_filter_before`.
    pub EntryAssembler_entries_filtered_after: Count,
    /// Count of log messages passed to `EntrySink::add_unknown_entry`.
    pub EntryAssembler_entries_unknown: Count,
    /// Largest log message text, in bytes.
    pub EntryAssembler_record_bytes_max: usize,
    /// Earliest datetime of accepted log messages.
    pub EntryAssembler_dt_first: DateTimeLOpt,
    /// Latest datetime of accepted log messages.
    pub EntryAssembler_dt_last: DateTimeLOpt,
}

impl SummaryEntryAssembler {
    /// Count of parsed log messages rejected by the datetime filters.
    pub const fn entries_filtered(&self) -> Count {
        self.EntryAssembler_entries_filtered_before + self.EntryAssembler_entries_filtered_after
    }

    /// Update `EntryAssembler_dt_first` and `EntryAssembler_dt_last`.
    ///
    /// Log messages are not required to be in chronological order.
    pub(crate) fn update_dt_first_last(&mut self, dt: &DateTimeL) {
        match self.EntryAssembler_dt_first {
            Some(dt_first) if &dt_first <= dt => {}
            _ => self.EntryAssembler_dt_first = Some(*dt),
        }
        match self.EntryAssembler_dt_last {
            Some(dt_last) if &dt_last >= dt => {}
            _ => self.EntryAssembler_dt_last = Some(*dt),
        }
    }
}
