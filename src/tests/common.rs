// src/tests/common.rs

//! common fixtures for tests

#![allow(non_upper_case_globals)]

use crate::data::datetime::{DateTimeL, FixedOffset, TimeZone};
use crate::data::entry::LogEntry;
use crate::readers::entrymonitor::EntryMonitor;
use crate::readers::entrysink::EntrySink;
use crate::readers::recordparser::{RecordParser, ResultParse, ResultParseEntry};

use std::cell::RefCell;
use std::io::{Error, ErrorKind};
use std::rc::Rc;

use ::lazy_static::lazy_static;

/// FixedOffset `+00:00`
pub const FO_0: FixedOffset = match FixedOffset::east_opt(0) {
    Some(val) => val,
    None => panic!("bad FixedOffset"),
};

/// FixedOffset `+08:00`
pub const FO_P8: FixedOffset = match FixedOffset::east_opt(8 * 3600) {
    Some(val) => val,
    None => panic!("bad FixedOffset"),
};

/// FixedOffset `-05:00`
pub const FO_M5: FixedOffset = match FixedOffset::east_opt(-5 * 3600) {
    Some(val) => val,
    None => panic!("bad FixedOffset"),
};

/// Helper to create a `DateTimeL`.
pub fn dt_ymdhms(
    fo: &FixedOffset,
    y: i32,
    mo: u32,
    d: u32,
    h: u32,
    mi: u32,
    s: u32,
) -> DateTimeL {
    fo.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

/// A log with three log messages; the second is three lines.
pub const LOG_3ENTRY: &str = "\
2024-01-01 00:00:00 start
2024-01-02 00:00:00 ERROR request failed
Traceback (most recent call last):
  File \"app.py\", line 12, in <module>
2024-01-03 00:00:00 stop
";

lazy_static! {
    pub static ref DT_20240101: DateTimeL = dt_ymdhms(&FO_0, 2024, 1, 1, 0, 0, 0);
    pub static ref DT_20240102: DateTimeL = dt_ymdhms(&FO_0, 2024, 1, 2, 0, 0, 0);
    pub static ref DT_20240103: DateTimeL = dt_ymdhms(&FO_0, 2024, 1, 3, 0, 0, 0);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// a simple RecordParser, sink, and monitor for testing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A log message begins with `"BEGIN <unix seconds>"`.
pub const TP_BEGIN: &str = "BEGIN ";
/// `TestParser::parse` returns `Err` for text containing this.
pub const TP_FAIL: &str = "PARSER_FAILURE";

/// Entry created by `TestParser`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestEntry {
    pub dt: DateTimeL,
    pub raw: String,
}

impl LogEntry for TestEntry {
    fn dt(&self) -> &DateTimeL {
        &self.dt
    }
}

/// `RecordParser` for lines like `"BEGIN 86400 message"`.
#[derive(Debug, Default)]
pub struct TestParser {}

impl RecordParser for TestParser {
    type Entry = TestEntry;

    fn is_beginning_of_log_entry(
        &self,
        line: &str,
    ) -> bool {
        line.starts_with(TP_BEGIN)
    }

    fn parse(
        &self,
        raw: &str,
    ) -> ResultParseEntry<TestEntry> {
        if raw.contains(TP_FAIL) {
            return ResultParse::Err(Error::new(ErrorKind::Other, "TestParser failure"));
        }
        let line_first: &str = raw.split('\n').next().unwrap_or(raw);
        let secs_s: &str = match line_first.strip_prefix(TP_BEGIN) {
            Some(rest) => rest.split(' ').next().unwrap_or(""),
            None => return ResultParse::Malformed(String::from("no BEGIN")),
        };
        let secs: i64 = match secs_s.parse::<i64>() {
            Ok(val) => val,
            Err(err) => return ResultParse::Malformed(err.to_string()),
        };
        match FO_0.timestamp_opt(secs, 0).single() {
            Some(dt) => ResultParse::Found(TestEntry {
                dt,
                raw: String::from(raw),
            }),
            None => ResultParse::Malformed(String::from("bad seconds")),
        }
    }
}

/// Datetime of `"BEGIN <secs>"`.
pub fn dt_secs(secs: i64) -> DateTimeL {
    FO_0.timestamp_opt(secs, 0).unwrap()
}

/// Shared, ordered record of events from sinks and monitors.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn new_eventlog() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// `EntrySink` that records each call to an `EventLog`.
pub struct EventSink {
    pub log: EventLog,
}

impl<E: LogEntry> EntrySink<E> for EventSink {
    fn add_entry(&mut self, entry: E) {
        self.log
            .borrow_mut()
            .push(format!("add_entry {}", entry.dt().timestamp()));
    }

    fn add_unknown_entry(&mut self, raw: String) {
        self.log
            .borrow_mut()
            .push(format!("add_unknown_entry {:?}", raw));
    }
}

/// `EntryMonitor` that records each notification to an `EventLog`, prefixed
/// with the monitor `name`.
pub struct EventMonitor {
    pub name: &'static str,
    pub log: EventLog,
}

impl<E: LogEntry> EntryMonitor<E> for EventMonitor {
    fn on_before_entry_parsed(&mut self, raw: &str) {
        self.log
            .borrow_mut()
            .push(format!("{} before {:?}", self.name, raw));
    }

    fn on_entry_parsed(&mut self, entry: &E) {
        self.log
            .borrow_mut()
            .push(format!("{} parsed {}", self.name, entry.dt().timestamp()));
    }
}

/// `EntryMonitor` that keeps the raw text of every log message finalized.
#[derive(Debug, Default)]
pub struct RawMonitor {
    pub raws: Vec<String>,
}

impl<E> EntryMonitor<E> for RawMonitor {
    fn on_before_entry_parsed(&mut self, raw: &str) {
        self.raws.push(String::from(raw));
    }
}
