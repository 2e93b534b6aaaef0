// src/readers/dtprefixparser.rs

//! Implements a [`DtPrefixParser`], a [`RecordParser`] for log messages that
//! begin with a datetime stamp, e.g.
//!
//! ```text
//! 2024-01-02 03:04:05 ERROR request failed
//! Traceback (most recent call last):
//!   File "app.py", line 12, in <module>
//! 2024-01-02 03:04:06 INFO retrying
//! ```
//!
//! holds two log messages; the first is three lines.
//!
//! [`RecordParser`]: crate::readers::recordparser::RecordParser

use crate::common::NLc;
use crate::data::datetime::{
    datetime_parse_from_str,
    replace_zulu,
    DateTimeLOpt,
    DateTimePattern_string,
    FixedOffset,
};
use crate::data::entry::DtEntry;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;
use crate::readers::recordparser::{RecordParser, ResultParse, ResultParseEntry};

use std::fmt;
use std::io::{Error, ErrorKind, Result};

use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DtPattern
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Name of the regex capture group holding the datetime substring.
pub const CGN_DT: &str = "dt";

/// `D`ate`T`ime `P`attern: a regex to find a datetime substring at the
/// beginning of a line and a chrono [`strftime`] format to parse that
/// substring.
///
/// [`strftime`]: https://docs.rs/chrono/latest/chrono/format/strftime/index.html
#[derive(Clone)]
pub struct DtPattern {
    /// Must have a capture group named [`CGN_DT`].
    pub regex: Regex,
    /// chrono `strftime` format of the captured datetime substring.
    pub format: DateTimePattern_string,
    /// Does `format` have a timezone specifier?
    pub has_tz: bool,
    /// Does `format` have a time specifier?
    pub has_time: bool,
}

impl fmt::Debug for DtPattern {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("DtPattern")
            .field("regex", &self.regex.as_str())
            .field("format", &self.format)
            .field("has_tz", &self.has_tz)
            .field("has_time", &self.has_time)
            .finish()
    }
}

/// Shortcut to create a built-in [`DtPattern`].
macro_rules! DTP {
    (
        $regex:expr,
        $format:expr,
        $has_tz:expr,
        $has_time:expr
    ) => {
        DtPattern {
            regex: Regex::new($regex).unwrap(),
            format: String::from($format),
            has_tz: $has_tz,
            has_time: $has_time,
        }
    };
}

/// Fractional seconds, optional.
const RP_FRAC: &str = r"(?:\.\d{1,9})?";

lazy_static! {
    /// Built-in datetime patterns, tried in order.
    ///
    /// Patterns with a timezone come before their counterpart without a
    /// timezone, the latter would match a prefix of the former.
    pub static ref DT_PATTERNS_BUILTIN: Vec<DtPattern> = vec![
        // 2024-01-02T03:04:05.678+08:00  2024-01-02T03:04:05Z
        DTP!(
            &format!(r"^(?P<dt>\d{{4}}-\d{{2}}-\d{{2}}T\d{{2}}:\d{{2}}:\d{{2}}{}(?:[Zz]|[+-]\d{{2}}:?\d{{2}}))", RP_FRAC),
            "%Y-%m-%dT%H:%M:%S%.f%z", true, true
        ),
        // 2024-01-02 03:04:05.678 +0800
        DTP!(
            &format!(r"^(?P<dt>\d{{4}}-\d{{2}}-\d{{2}} \d{{2}}:\d{{2}}:\d{{2}}{} [+-]\d{{2}}:?\d{{2}})", RP_FRAC),
            "%Y-%m-%d %H:%M:%S%.f %z", true, true
        ),
        // 2024-01-02 03:04:05.678+0800
        DTP!(
            &format!(r"^(?P<dt>\d{{4}}-\d{{2}}-\d{{2}} \d{{2}}:\d{{2}}:\d{{2}}{}[+-]\d{{2}}:?\d{{2}})", RP_FRAC),
            "%Y-%m-%d %H:%M:%S%.f%z", true, true
        ),
        // 2024-01-02T03:04:05.678
        DTP!(
            &format!(r"^(?P<dt>\d{{4}}-\d{{2}}-\d{{2}}T\d{{2}}:\d{{2}}:\d{{2}}{})", RP_FRAC),
            "%Y-%m-%dT%H:%M:%S%.f", false, true
        ),
        // 2024-01-02 03:04:05.678
        DTP!(
            &format!(r"^(?P<dt>\d{{4}}-\d{{2}}-\d{{2}} \d{{2}}:\d{{2}}:\d{{2}}{})", RP_FRAC),
            "%Y-%m-%d %H:%M:%S%.f", false, true
        ),
        // [2024-01-02 03:04:05.678]
        DTP!(
            &format!(r"^\[(?P<dt>\d{{4}}-\d{{2}}-\d{{2}} \d{{2}}:\d{{2}}:\d{{2}}{})\]", RP_FRAC),
            "%Y-%m-%d %H:%M:%S%.f", false, true
        ),
        // MySQL 5.7+ slow query log
        // # Time: 2024-01-02T03:04:05.678901Z
        DTP!(
            &format!(r"^# Time: (?P<dt>\d{{4}}-\d{{2}}-\d{{2}}T\d{{2}}:\d{{2}}:\d{{2}}{}(?:[Zz]|[+-]\d{{2}}:?\d{{2}}))", RP_FRAC),
            "%Y-%m-%dT%H:%M:%S%.f%z", true, true
        ),
        // MySQL 5.6 slow query log
        // # Time: 240102  3:04:05
        DTP!(
            r"^# Time: (?P<dt>\d{6}\s+\d{1,2}:\d{2}:\d{2})",
            "%y%m%d %H:%M:%S", false, true
        ),
        // 2024-01-02
        DTP!(
            r"^(?P<dt>\d{4}-\d{2}-\d{2})(?:\s|$)",
            "%Y-%m-%d", false, false
        ),
    ];
}

/// chrono `strftime` specifiers of a timezone.
const FORMAT_TZ_SPECIFIERS: [&str; 4] = ["%z", "%:z", "%#z", "%Z"];
/// chrono `strftime` specifiers of a time.
const FORMAT_TIME_SPECIFIERS: [&str; 8] = ["%H", "%I", "%k", "%l", "%T", "%R", "%X", "%s"];

impl DtPattern {
    /// Create a `DtPattern` from a user-passed `regex` and chrono `format`.
    ///
    /// The `regex` must have a capture group named `dt`; it is only matched
    /// at the beginning of a line.
    pub fn new(
        regex: &str,
        format: &str,
    ) -> Result<DtPattern> {
        defn!("({:?}, {:?})", regex, format);
        let regex_: Regex = match Regex::new(regex) {
            Ok(val) => val,
            Err(err) => {
                defx!("Regex::new({:?}) failed {}", regex, err);
                return Result::Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("bad datetime regex {:?}; {}", regex, err),
                ));
            }
        };
        if !regex_.capture_names().any(|name| name == Some(CGN_DT)) {
            defx!("no capture group {:?}", CGN_DT);
            return Result::Err(Error::new(
                ErrorKind::InvalidInput,
                format!("datetime regex {:?} must have a capture group named {:?}, e.g. (?P<{}>…)", regex, CGN_DT, CGN_DT),
            ));
        }
        let has_tz: bool = FORMAT_TZ_SPECIFIERS.iter().any(|s| format.contains(s));
        let has_time: bool = FORMAT_TIME_SPECIFIERS.iter().any(|s| format.contains(s));
        let dtp = DtPattern {
            regex: regex_,
            format: String::from(format),
            has_tz,
            has_time,
        };
        defx!("return {:?}", dtp);

        Ok(dtp)
    }

    /// Find the datetime substring at the beginning of `line`.
    /// Returns byte offsets `(dt_beg, dt_end)`.
    pub fn find_dt(
        &self,
        line: &str,
    ) -> Option<(usize, usize)> {
        let captures = self.regex.captures(line)?;
        // leftmost match; a match beginning later is not a prefix
        if captures.get(0)?.start() != 0 {
            return None;
        }
        let dt_match = captures.name(CGN_DT)?;

        Some((dt_match.start(), dt_match.end()))
    }

    /// Parse the datetime substring `dt_s` found by [`find_dt`].
    ///
    /// [`find_dt`]: self::DtPattern#method.find_dt
    pub fn parse_dt(
        &self,
        dt_s: &str,
        tz_offset: &FixedOffset,
    ) -> DateTimeLOpt {
        // chrono expects exactly one space where the format has one space
        let mut dt_norm: String = dt_s
            .split_whitespace()
            .collect::<Vec<&str>>()
            .join(" ");
        if self.has_tz {
            dt_norm = replace_zulu(dt_norm.as_str());
        }

        datetime_parse_from_str(dt_norm.as_str(), self.format.as_str(), self.has_tz, self.has_time, tz_offset)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DtPrefixParser
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A [`RecordParser`] for log messages where the first line begins with a
/// datetime stamp. Following lines without a datetime stamp are part of the
/// same log message.
///
/// [`RecordParser`]: crate::readers::recordparser::RecordParser
pub struct DtPrefixParser {
    /// Patterns tried in order.
    patterns: Vec<DtPattern>,
    /// `FixedOffset` timezone for datetime formats without a timezone.
    tz_offset: FixedOffset,
}

impl fmt::Debug for DtPrefixParser {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("DtPrefixParser")
            .field("patterns", &self.patterns.len())
            .field("tz_offset", &self.tz_offset)
            .finish()
    }
}

impl DtPrefixParser {
    /// Create a `DtPrefixParser` using the [`DT_PATTERNS_BUILTIN`].
    pub fn new(tz_offset: FixedOffset) -> DtPrefixParser {
        defñ!("({:?})", tz_offset);
        DtPrefixParser {
            patterns: DT_PATTERNS_BUILTIN.clone(),
            tz_offset,
        }
    }

    /// Create a `DtPrefixParser` using only the one user-passed pattern.
    /// See [`DtPattern::new`].
    pub fn with_pattern(
        regex: &str,
        format: &str,
        tz_offset: FixedOffset,
    ) -> Result<DtPrefixParser> {
        let dtp: DtPattern = DtPattern::new(regex, format)?;

        Ok(DtPrefixParser {
            patterns: vec![dtp],
            tz_offset,
        })
    }

    pub fn patterns(&self) -> &[DtPattern] {
        self.patterns.as_slice()
    }

    pub const fn tz_offset(&self) -> &FixedOffset {
        &self.tz_offset
    }
}

impl RecordParser for DtPrefixParser {
    type Entry = DtEntry;

    fn is_beginning_of_log_entry(
        &self,
        line: &str,
    ) -> bool {
        self.patterns
            .iter()
            .any(|dtp| dtp.find_dt(line).is_some())
    }

    fn parse(
        &self,
        raw: &str,
    ) -> ResultParseEntry<DtEntry> {
        defn!("({:?})", str_to_String_noraw(raw));
        let line_first: &str = match raw.split(NLc).next() {
            Some(line) => line,
            None => raw,
        };
        // the first pattern that matches decides; a later, less specific
        // pattern must not match a prefix of a bad datetime
        for (_i, dtp) in self.patterns.iter().enumerate() {
            let (dt_beg, dt_end) = match dtp.find_dt(line_first) {
                Some(val) => val,
                None => continue,
            };
            let dt_s: &str = &line_first[dt_beg..dt_end];
            defo!("pattern {} found datetime substring {:?} at [{}‥{})", _i, dt_s, dt_beg, dt_end);
            return match dtp.parse_dt(dt_s, &self.tz_offset) {
                Some(dt) => {
                    defx!("return Found({:?})", dt);
                    ResultParse::Found(DtEntry::new(String::from(raw), dt_beg, dt_end, dt))
                }
                None => {
                    let reason = format!("datetime substring {:?} is not a valid datetime", dt_s);
                    defx!("return Malformed({:?})", reason);
                    ResultParse::Malformed(reason)
                }
            };
        }
        defx!("return Malformed, no datetime");

        ResultParse::Malformed(String::from("first line does not begin with a datetime"))
    }
}
