// src/readers/entryassembler.rs

//! Implements an [`EntryAssembler`], the reassembler of multi-line log
//! messages.
//!
//! An `EntryAssembler` is passed lines one at a time. The lines are
//! accumulated in a single buffer until a line that begins a new log message
//! is passed. Then the accumulated text is "finalized": parsed by a
//! [`RecordParser`], compared to the datetime filters, and passed to an
//! [`EntrySink`].
//!
//! Every line passed is part of exactly one finalized log message.
//!
//! [`EntryAssembler`]: self::EntryAssembler
//! [`RecordParser`]: crate::readers::recordparser::RecordParser
//! [`EntrySink`]: crate::readers::entrysink::EntrySink

use crate::common::{Count, NLc};
use crate::data::datetime::{
    dt_filters_valid,
    dt_pass_filters,
    DateTimeLOpt,
    Result_Filter_DateTime2,
};
use crate::data::entry::LogEntry;
use crate::de_err;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;
use crate::readers::entrymonitor::{CompositeEntryMonitor, EntryMonitor};
use crate::readers::entrysink::EntrySink;
use crate::readers::recordparser::{RecordParser, ResultParse};
use crate::readers::summary::SummaryEntryAssembler;

use std::fmt;
use std::io::{Error, ErrorKind, Result};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// The `EntryAssembler` owns the buffer of the not-yet-finalized log message
/// and decides where one log message ends and the next begins.
///
/// A log message ends just before a line that the [`RecordParser`] declares
/// to be the beginning of a log message, or at [`flush`].
///
/// One `EntryAssembler` is meant for one stream of lines, e.g. one file.
///
/// [`RecordParser`]: crate::readers::recordparser::RecordParser
/// [`flush`]: self::EntryAssembler#method.flush
pub struct EntryAssembler<'a, P, S>
where
    P: RecordParser,
    S: EntrySink<P::Entry>,
{
    parser: P,
    sink: S,
    /// Observers notified before each parse and for each accepted entry.
    monitors: CompositeEntryMonitor<'a, P::Entry>,
    /// Text of the not-yet-finalized log message; lines separated by `'\n'`.
    buffer: String,
    /// Count of lines in `buffer`. Zero means there is no log message
    /// pending, even if a passed line was empty.
    buffer_lines: Count,
    /// Optional filter, log messages at or _after_ this `DateTimeL`.
    filter_dt_after_opt: DateTimeLOpt,
    /// Optional filter, log messages at or _before_ this `DateTimeL`.
    filter_dt_before_opt: DateTimeLOpt,
    summary: SummaryEntryAssembler,
}

impl<'a, P, S> fmt::Debug for EntryAssembler<'a, P, S>
where
    P: RecordParser,
    S: EntrySink<P::Entry>,
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("EntryAssembler")
            .field("buffer.len()", &self.buffer.len())
            .field("buffer_lines", &self.buffer_lines)
            .field("monitors", &self.monitors.len())
            .field("filter_dt_after_opt", &self.filter_dt_after_opt)
            .field("filter_dt_before_opt", &self.filter_dt_before_opt)
            .field("summary", &self.summary)
            .finish()
    }
}

impl<'a, P, S> EntryAssembler<'a, P, S>
where
    P: RecordParser,
    S: EntrySink<P::Entry>,
{
    /// Create a new `EntryAssembler`.
    ///
    /// The datetime filters are fixed for the life of the `EntryAssembler`.
    /// Returns `InvalidInput` if `filter_dt_after_opt` is after
    /// `filter_dt_before_opt`.
    pub fn new(
        parser: P,
        sink: S,
        filter_dt_after_opt: DateTimeLOpt,
        filter_dt_before_opt: DateTimeLOpt,
    ) -> Result<EntryAssembler<'a, P, S>> {
        defn!("({:?}, {:?})", filter_dt_after_opt, filter_dt_before_opt);
        if !dt_filters_valid(&filter_dt_after_opt, &filter_dt_before_opt) {
            defx!("bad datetime filters");
            return Result::Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "datetime filter after {:?} is after datetime filter before {:?}",
                    filter_dt_after_opt, filter_dt_before_opt,
                ),
            ));
        }
        defx!("return Ok(EntryAssembler)");

        Ok(EntryAssembler {
            parser,
            sink,
            monitors: CompositeEntryMonitor::new(),
            buffer: String::new(),
            buffer_lines: 0,
            filter_dt_after_opt,
            filter_dt_before_opt,
            summary: SummaryEntryAssembler::default(),
        })
    }

    /// Register an [`EntryMonitor`]. Monitors are notified in the order they
    /// were added.
    ///
    /// [`EntryMonitor`]: crate::readers::entrymonitor::EntryMonitor
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: EntryMonitor<P::Entry> + 'a,
    {
        self.monitors.add_monitor(monitor);
    }

    /// Pass the next `line` in the stream. `line` has no line terminator.
    ///
    /// If `line` begins a new log message then the pending log message, if
    /// any, is finalized first. Then `line` is appended to the buffer.
    ///
    /// Returns `Err` only for an unexpected failure of the `RecordParser`;
    /// processing of the stream should not continue.
    pub fn consume_line(
        &mut self,
        line: &str,
    ) -> Result<()> {
        defn!("({:?})", str_to_String_noraw(line));
        self.summary.EntryAssembler_lines += 1;
        let is_beginning: bool = self.parser.is_beginning_of_log_entry(line);
        if is_beginning && !self.is_buffer_empty() {
            defo!("line begins a new log message; finalize {} buffered lines", self.buffer_lines);
            if let Err(err) = self.finalize() {
                defx!("return Err({:?})", err);
                return Err(err);
            }
        }
        if self.buffer_lines != 0 {
            self.buffer.push(NLc);
        }
        self.buffer.push_str(line);
        self.buffer_lines += 1;
        defx!("buffer_lines {}", self.buffer_lines);

        Ok(())
    }

    /// Finalize the pending log message, if any.
    ///
    /// Must be called after the last line of the stream was passed to
    /// [`consume_line`]. Does nothing if there is no pending log message.
    ///
    /// [`consume_line`]: self::EntryAssembler#method.consume_line
    pub fn flush(&mut self) -> Result<()> {
        if self.is_buffer_empty() {
            defñ!("buffer is empty");
            return Ok(());
        }
        defn!("finalize {} buffered lines", self.buffer_lines);
        let result = self.finalize();
        defx!("{:?}", result);

        result
    }

    /// Parse the buffered text, filter, and dispatch. The buffer is empty
    /// afterward.
    fn finalize(&mut self) -> Result<()> {
        let raw: String = std::mem::take(&mut self.buffer);
        self.buffer_lines = 0;
        defn!("({:?})", str_to_String_noraw(raw.as_str()));
        self.summary.EntryAssembler_records += 1;
        self.summary.EntryAssembler_record_bytes_max =
            std::cmp::max(self.summary.EntryAssembler_record_bytes_max, raw.len());

        self.monitors.on_before_entry_parsed(raw.as_str());
        match self.parser.parse(raw.as_str()) {
            ResultParse::Found(entry) => {
                match dt_pass_filters(entry.dt(), &self.filter_dt_after_opt, &self.filter_dt_before_opt) {
                    Result_Filter_DateTime2::InRange => {
                        defo!("entry {:?} InRange; add_entry", entry.dt());
                        self.summary.EntryAssembler_entries_accepted += 1;
                        self.summary.update_dt_first_last(entry.dt());
                        self.monitors.on_entry_parsed(&entry);
                        self.sink.add_entry(entry);
                    }
                    Result_Filter_DateTime2::BeforeRange => {
                        defo!("entry {:?} BeforeRange; discard", entry.dt());
                        self.summary.EntryAssembler_entries_filtered_before += 1;
                    }
                    Result_Filter_DateTime2::AfterRange => {
                        defo!("entry {:?} AfterRange; discard", entry.dt());
                        self.summary.EntryAssembler_entries_filtered_after += 1;
                    }
                }
            }
            ResultParse::Malformed(_reason) => {
                defo!("Malformed ({}); add_unknown_entry", _reason);
                self.summary.EntryAssembler_entries_unknown += 1;
                self.sink.add_unknown_entry(raw);
            }
            ResultParse::Err(err) => {
                de_err!("RecordParser::parse failed {}", err);
                defx!("return Err({:?})", err);
                return Err(err);
            }
        }
        defx!();

        Ok(())
    }

    /// Is there no pending log message?
    #[inline(always)]
    pub const fn is_buffer_empty(&self) -> bool {
        self.buffer_lines == 0
    }

    /// Count of lines of the pending log message.
    #[inline(always)]
    pub const fn count_lines_buffered(&self) -> Count {
        self.buffer_lines
    }

    #[inline(always)]
    pub const fn filter_dt_after_opt(&self) -> &DateTimeLOpt {
        &self.filter_dt_after_opt
    }

    #[inline(always)]
    pub const fn filter_dt_before_opt(&self) -> &DateTimeLOpt {
        &self.filter_dt_before_opt
    }

    #[inline(always)]
    pub const fn parser(&self) -> &P {
        &self.parser
    }

    #[inline(always)]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    #[inline(always)]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume this `EntryAssembler` and return the [`EntrySink`].
    ///
    /// A pending log message is discarded; call [`flush`] first.
    ///
    /// [`EntrySink`]: crate::readers::entrysink::EntrySink
    /// [`flush`]: self::EntryAssembler#method.flush
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Statistics gathered so far.
    pub fn summary(&self) -> SummaryEntryAssembler {
        self.summary.clone()
    }
}
