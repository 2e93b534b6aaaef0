// src/data/datetime.rs

//! Functions to parse datetime strings and to compare datetimes to the
//! user-passed datetime filters.
//!
//! The datetime filters form a "time window" of two optional bounds,
//! `dt_filter_after` and `dt_filter_before`. Both bounds are inclusive.

#![allow(non_camel_case_types)]

#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    Duration,
    FixedOffset,
    Local,
    NaiveDate,
    NaiveDateTime,
    Offset,
    TimeZone,
    Utc,
};
use ::lazy_static::lazy_static;
use ::more_asserts::debug_assert_le;
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime Type Aliases
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The datetime of all log messages. Always has a timezone offset.
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// A chrono [`strftime`] format string.
///
/// [`strftime`]: https://docs.rs/chrono/latest/chrono/format/strftime/index.html
pub type DateTimePattern_str = str;
pub type DateTimePattern_string = String;

/// Appended to a datetime value without a time so it may be parsed as a
/// datetime at midnight.
pub const DT_APPEND_TIME_VALUE: &str = " T000000";
/// Appended to a datetime pattern without a time so it may be parsed as a
/// datetime at midnight.
pub const DT_APPEND_TIME_PATTERN: &str = " T%H%M%S";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// datetime parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Parse `data` with chrono `pattern`.
///
/// If `has_tz` is `false` then the `pattern` has no timezone specifier and
/// the `tz_offset` is applied to the parsed naive datetime.
///
/// If `has_time` is `false` then the `pattern` has no time specifiers and the
/// resulting datetime is at midnight.
pub fn datetime_parse_from_str(
    data: &str,
    pattern: &DateTimePattern_str,
    has_tz: bool,
    has_time: bool,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    dpfn!("(pattern {:?}, has_tz {}, has_time {}, tz_offset {:?}, data {:?})",
        pattern, has_tz, has_time, tz_offset, str_to_String_noraw(data));

    let data_: String;
    let pattern_: DateTimePattern_string;
    let (data, pattern) = match has_time {
        true => (data, pattern),
        false => {
            data_ = [data, DT_APPEND_TIME_VALUE].concat();
            pattern_ = [pattern, DT_APPEND_TIME_PATTERN].concat();
            (data_.as_str(), pattern_.as_str())
        }
    };

    if has_tz {
        return match DateTime::parse_from_str(data, pattern) {
            Ok(val) => {
                dpfx!("return Some({:?})", val);

                Some(val)
            }
            Err(_err) => {
                dpfx!("DateTime::parse_from_str({:?}, {:?}) failed ParseError: {}", data, pattern, _err);

                None
            }
        };
    }
    // no timezone in `pattern` so first parse a `NaiveDateTime` instance
    let dt_naive = match NaiveDateTime::parse_from_str(data, pattern) {
        Ok(val) => val,
        Err(_err) => {
            dpfx!("NaiveDateTime::parse_from_str({:?}, {:?}) failed ParseError: {}", data, pattern, _err);
            return None;
        }
    };
    // then convert the `NaiveDateTime` instance to `DateTime<FixedOffset>`
    match tz_offset
        .from_local_datetime(&dt_naive)
        .earliest()
    {
        Some(val) => {
            dpfx!("return Some({:?})", val);

            Some(val)
        }
        None => {
            dpfx!("tz_offset.from_local_datetime({:?}) returned None, return None", dt_naive);

            None
        }
    }
}

/// A user-friendly datetime format accepted for a datetime filter value.
///
/// Tuple of (`pattern`, `has_tz`, `has_time`).
type CliFilterPattern = (&'static DateTimePattern_str, bool, bool);

/// Datetime formats accepted for the datetime filters, tried in order.
const CLI_FILTER_PATTERNS: [CliFilterPattern; 12] = [
    ("%Y-%m-%dT%H:%M:%S%.f%z", true, true),
    ("%Y-%m-%d %H:%M:%S%.f %z", true, true),
    ("%Y-%m-%d %H:%M:%S%.f%z", true, true),
    ("%Y-%m-%dT%H:%M:%S%.f", false, true),
    ("%Y-%m-%d %H:%M:%S%.f", false, true),
    ("%Y-%m-%dT%H:%M", false, true),
    ("%Y-%m-%d %H:%M", false, true),
    ("%Y%m%dT%H%M%S%z", true, true),
    ("%Y%m%dT%H%M%S", false, true),
    ("%Y/%m/%d %H:%M:%S", false, true),
    ("%Y-%m-%d", false, false),
    ("%Y%m%d", false, false),
];

/// Transform a user-passed datetime filter string, e.g. `"2024-01-15"` or
/// `"2024-01-15T12:00:00+02:00"`, into a [`DateTimeL`].
///
/// A trailing `Z` is treated as offset `+00:00`. A value beginning with `@` is
/// Unix epoch seconds, e.g. `"@1705276800"`.
/// Values without a timezone use `tz_offset`.
pub fn datetime_from_str_fallback(
    dts: &str,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    dpfn!("({:?}, {:?})", dts, tz_offset);
    let dts = dts.trim();
    if let Some(secs) = dts.strip_prefix('@') {
        let dto: DateTimeLOpt = match secs.parse::<i64>() {
            Ok(secs) => DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.with_timezone(tz_offset)),
            Err(_) => None,
        };
        dpfx!("return {:?}", dto);
        return dto;
    }
    let dts_z: String = replace_zulu(dts);
    for (pattern, has_tz, has_time) in CLI_FILTER_PATTERNS.iter() {
        dpfo!("try pattern {:?}", pattern);
        if let Some(dt) = datetime_parse_from_str(dts_z.as_str(), pattern, *has_tz, *has_time, tz_offset) {
            dpfx!("return {:?}", dt);
            return Some(dt);
        }
    }
    dpfx!("return None");

    None
}

/// Replace a trailing Zulu timezone designator `Z` with numeric offset
/// `+0000`, which chrono `%z` can parse.
pub fn replace_zulu(dts: &str) -> String {
    match dts.strip_suffix(['Z', 'z']) {
        Some(s) if s.ends_with(|c: char| c.is_ascii_digit()) => [s, "+0000"].concat(),
        _ => String::from(dts),
    }
}

lazy_static! {
    /// The local system timezone offset at the time of first use.
    pub static ref LOCAL_NOW_OFFSET: FixedOffset = {
        let offset: FixedOffset = Local::now().offset().fix();
        dpfñ!("LOCAL_NOW_OFFSET {:?}", offset);

        offset
    };
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime comparisons
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Describe the result of comparing one [`DateTimeL`] to one DateTime Filter.
#[derive(Debug, Eq, PartialEq)]
pub enum Result_Filter_DateTime1 {
    /// like Skip
    Pass,
    OccursAtOrAfter,
    OccursBefore,
}

impl Result_Filter_DateTime1 {
    /// Returns `true` if the result is `OccursAtOrAfter`.
    #[inline(always)]
    pub const fn is_after(&self) -> bool {
        matches!(*self, Result_Filter_DateTime1::OccursAtOrAfter)
    }

    /// Returns `true` if the result is `OccursBefore`.
    #[inline(always)]
    pub const fn is_before(&self) -> bool {
        matches!(*self, Result_Filter_DateTime1::OccursBefore)
    }
}

/// Describe the result of comparing one [`DateTimeL`] to two DateTime Filters
/// `(after, before)`.
#[derive(Debug, Eq, PartialEq)]
pub enum Result_Filter_DateTime2 {
    /// like Pass
    InRange,
    /// like Fail
    BeforeRange,
    /// like Fail
    AfterRange,
}

impl Result_Filter_DateTime2 {
    #[inline(always)]
    pub const fn is_pass(&self) -> bool {
        matches!(*self, Result_Filter_DateTime2::InRange)
    }

    #[inline(always)]
    pub const fn is_fail(&self) -> bool {
        matches!(*self, Result_Filter_DateTime2::AfterRange | Result_Filter_DateTime2::BeforeRange)
    }
}

/// Compare passed [`DateTimeL`] `dt` to the passed filter `dt_filter`.
///
/// If `dt` is at or after `dt_filter` then return [`OccursAtOrAfter`]<br/>
/// If `dt` is before `dt_filter` then return [`OccursBefore`]<br/>
/// Else return [`Pass`] (including if `dt_filter` is `None`)
///
/// [`OccursAtOrAfter`]: crate::data::datetime::Result_Filter_DateTime1
/// [`OccursBefore`]: crate::data::datetime::Result_Filter_DateTime1
/// [`Pass`]: crate::data::datetime::Result_Filter_DateTime1
pub fn dt_after_or_before(
    dt: &DateTimeL,
    dt_filter: &DateTimeLOpt,
) -> Result_Filter_DateTime1 {
    let dt_a = match dt_filter {
        Some(dt_a) => dt_a,
        None => {
            dpfñ!("return Result_Filter_DateTime1::Pass; (no dt filters)");
            return Result_Filter_DateTime1::Pass;
        }
    };
    dpfn!("comparing dt datetime {:?} to filter datetime {:?}", dt, dt_a);
    if dt < dt_a {
        dpfx!("return Result_Filter_DateTime1::OccursBefore; (dt {:?} is before dt_filter {:?})", dt, dt_a);
        return Result_Filter_DateTime1::OccursBefore;
    }
    dpfx!("return Result_Filter_DateTime1::OccursAtOrAfter; (dt {:?} is at or after dt_filter {:?})", dt, dt_a);

    Result_Filter_DateTime1::OccursAtOrAfter
}

/// How does the passed [`DateTimeL`], `dt`, pass the optional `DateTimeLOpt`
/// filter instances,
/// `dt_filter_after` and `dt_filter_before`?  Is `dt` before ([`BeforeRange`]),
/// after ([`AfterRange`]), or in between ([`InRange`])?
///
/// If both filters are `None` then return `InRange`.
/// A filter that is `None` is open-ended.
///
/// Comparisons are "inclusive" i.e. `dt` == `dt_filter_after` will return
/// `InRange`.
///
/// [`AfterRange`]: crate::data::datetime::Result_Filter_DateTime2::AfterRange
/// [`BeforeRange`]: crate::data::datetime::Result_Filter_DateTime2::BeforeRange
/// [`InRange`]: crate::data::datetime::Result_Filter_DateTime2::InRange
pub fn dt_pass_filters(
    dt: &DateTimeL,
    dt_filter_after: &DateTimeLOpt,
    dt_filter_before: &DateTimeLOpt,
) -> Result_Filter_DateTime2 {
    dpfn!("({:?}, {:?}, {:?})", dt, dt_filter_after, dt_filter_before);
    if let (Some(da), Some(db)) = (dt_filter_after, dt_filter_before) {
        debug_assert_le!(da, db, "Bad datetime range values filter_after {:?} {:?} filter_before", da, db);
    }
    if dt_after_or_before(dt, dt_filter_after).is_before() {
        dpfx!("return {:?}", Result_Filter_DateTime2::BeforeRange);
        return Result_Filter_DateTime2::BeforeRange;
    }
    if let Some(db) = dt_filter_before {
        if db < dt {
            dpfx!("return {:?}", Result_Filter_DateTime2::AfterRange);
            return Result_Filter_DateTime2::AfterRange;
        }
    }
    dpfx!("return {:?}", Result_Filter_DateTime2::InRange);

    Result_Filter_DateTime2::InRange
}

/// Are the datetime filters a possible range? i.e. is `dt_filter_after` at or
/// before `dt_filter_before`. An unset filter is always valid.
pub fn dt_filters_valid(
    dt_filter_after: &DateTimeLOpt,
    dt_filter_before: &DateTimeLOpt,
) -> bool {
    match (dt_filter_after, dt_filter_before) {
        (Some(da), Some(db)) => da <= db,
        _ => true,
    }
}
