// src/printer/summary.rs

//! Functions to print the `--summary` of processing a file.

use crate::common::{FPath, FileType};
use crate::data::datetime::{DateTimeL, DateTimeLOpt, FixedOffset};
use crate::readers::summary::SummaryEntryAssembler;

use std::io::{Result, Write};

const OPT_SUMMARY_PRINT_INDENT1: &str = "  ";
const OPT_SUMMARY_PRINT_INDENT2: &str = "      ";

/// datetime format for primary printing of datetime
const DATETIMEFMT: &str = "%Y-%m-%d %H:%M:%S %:z";
/// datetime format for secondary printing of datetime
const DATETIMEFMT_SEC: &str = "%Y-%m-%d %H:%M:%S%.6f %:z";

const FIXEDOFFSET0: FixedOffset = match FixedOffset::east_opt(0) {
    Some(val) => val,
    None => panic!("bad FixedOffset"),
};

/// Write a datetime as-is and, if not already UTC, in UTC.
fn write_datetime_asis_utc<W: Write>(
    out: &mut W,
    dt: &DateTimeL,
) -> Result<()> {
    write!(out, "{}", dt.format(DATETIMEFMT))?;
    if dt.offset() != &FIXEDOFFSET0 {
        let dt_utc = dt.with_timezone(&FIXEDOFFSET0);
        write!(out, " ({})", dt_utc.format(DATETIMEFMT_SEC))?;
    }

    Ok(())
}

fn write_datetime_opt<W: Write>(
    out: &mut W,
    label: &str,
    dt_opt: &DateTimeLOpt,
) -> Result<()> {
    write!(out, "{}{}: ", OPT_SUMMARY_PRINT_INDENT2, label)?;
    match dt_opt {
        Some(dt) => write_datetime_asis_utc(out, dt)?,
        None => write!(out, "None")?,
    }
    writeln!(out)
}

/// Write the summary of one processed file to `out`.
#[allow(clippy::too_many_arguments)]
pub fn write_summary<W: Write>(
    out: &mut W,
    path: &FPath,
    filetype: FileType,
    summary: &SummaryEntryAssembler,
    filter_dt_after_opt: &DateTimeLOpt,
    filter_dt_before_opt: &DateTimeLOpt,
    error_opt: Option<&str>,
) -> Result<()> {
    let indent1 = OPT_SUMMARY_PRINT_INDENT1;
    let indent2 = OPT_SUMMARY_PRINT_INDENT2;
    writeln!(out, "File: {}", path)?;
    writeln!(out, "{}About:", indent1)?;
    writeln!(out, "{}filetype       : {}", indent2, filetype)?;
    writeln!(out, "{}Datetime Filters:", indent1)?;
    write_datetime_opt(out, "after          ", filter_dt_after_opt)?;
    write_datetime_opt(out, "before         ", filter_dt_before_opt)?;
    writeln!(out, "{}Processed:", indent1)?;
    writeln!(out, "{}lines          : {}", indent2, summary.EntryAssembler_lines)?;
    writeln!(out, "{}log messages   : {}", indent2, summary.EntryAssembler_records)?;
    writeln!(out, "{}accepted       : {}", indent2, summary.EntryAssembler_entries_accepted)?;
    writeln!(
        out,
        "{}filtered       : {} (before range {}, after range {})",
        indent2,
        summary.entries_filtered(),
        summary.EntryAssembler_entries_filtered_before,
        summary.EntryAssembler_entries_filtered_after,
    )?;
    writeln!(out, "{}unknown        : {}", indent2, summary.EntryAssembler_entries_unknown)?;
    writeln!(out, "{}largest bytes  : {}", indent2, summary.EntryAssembler_record_bytes_max)?;
    write_datetime_opt(out, "datetime first ", &summary.EntryAssembler_dt_first)?;
    write_datetime_opt(out, "datetime last  ", &summary.EntryAssembler_dt_last)?;
    if let Some(error) = error_opt {
        writeln!(out, "{}Error: {}", indent1, error)?;
    }

    Ok(())
}

/// Print the summary of one processed file to STDERR.
pub fn print_summary(
    path: &FPath,
    filetype: FileType,
    summary: &SummaryEntryAssembler,
    filter_dt_after_opt: &DateTimeLOpt,
    filter_dt_before_opt: &DateTimeLOpt,
    error_opt: Option<&str>,
) -> Result<()> {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    writeln!(out)?;

    write_summary(&mut out, path, filetype, summary, filter_dt_after_opt, filter_dt_before_opt, error_opt)
}
