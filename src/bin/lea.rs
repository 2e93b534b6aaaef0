// src/bin/lea.rs

//! Driver program _lea_ drives the [_lealib_].
//!
//! Processes user-passed command-line arguments.
//! Then processes each path passed, one after another. Each path gets its
//! own [`DtPrefixParser`], [`PrinterEntry`], and [`LogStreamProcessor`].
//! Accepted log messages are printed to STDOUT in file order.
//!
//! If passed CLI option `--summary`, a [`SummaryEntryAssembler`] is printed
//! to STDERR after each path is processed.
//!
//! [_lealib_]: lealib
//! [`DtPrefixParser`]: lealib::readers::dtprefixparser::DtPrefixParser
//! [`PrinterEntry`]: lealib::printer::printers::PrinterEntry
//! [`LogStreamProcessor`]: lealib::readers::logstreamprocessor::LogStreamProcessor
//! [`SummaryEntryAssembler`]: lealib::readers::summary::SummaryEntryAssembler

#![allow(non_camel_case_types)]

use std::io::{BufRead, ErrorKind};
use std::process::ExitCode;
use std::sync::RwLock;

use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
use ::lazy_static::lazy_static;

use ::lealib::common::{FPath, FPaths, FileType};
use ::lealib::data::datetime::{
    datetime_from_str_fallback,
    datetime_parse_from_str,
    dt_filters_valid,
    DateTimeLOpt,
    FixedOffset,
    LOCAL_NOW_OFFSET,
};
use ::lealib::printer::printers::{color_rand, ColorChoice, PrinterEntry, StandardStream};
use ::lealib::printer::summary::print_summary;
use ::lealib::readers::dtprefixparser::{DtPattern, DtPrefixParser};
use ::lealib::readers::logstreamprocessor::{open_path, Lines, LogStreamProcessor};
use ::lealib::readers::summary::SummaryEntryAssembler;
use ::lealib::{de_err, e_err, e_wrn};
use ::si_trace_print::stack::stack_offset_set;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// --------------------
// command-line parsing

const EXIT_ERR: i32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

const CLI_HELP_AFTER: &str = r#"
DateTime Filters may be strftime specifier patterns:
    "%Y-%m-%dT%H:%M:%S%.f%z"
    "%Y-%m-%d %H:%M:%S%.f %z"
    "%Y-%m-%dT%H:%M:%S%.f"
    "%Y-%m-%d %H:%M:%S%.f"
    "%Y%m%dT%H%M%S%z"
    "%Y%m%dT%H%M%S"
    "%Y/%m/%d %H:%M:%S"
    "%Y-%m-%d"
    "%Y%m%d"
    "@%s"
A trailing "Z" is timezone offset "+00:00".
Pattern "%s" is Unix epoch seconds.
Both DateTime Filters are inclusive.

A log message begins on a line starting with a datetime. Following lines
without a datetime belong to the same log message. A log message with a
datetime that cannot be parsed is an "unknown" log message.

DT_REGEX must have a capture group named "dt", e.g.
    --dt-regex '^(?P<dt>\d{2}/\d{2}/\d{4} \d{2}:\d{2}:\d{2})' --dt-format '%m/%d/%Y %H:%M:%S'
"#;

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "lea",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(Log Entry Assembler)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path(s) of log files. Files ending ".gz" are decompressed.
    /// Pass "-" to read STDIN.
    #[clap(required = true, verbatim_doc_comment)]
    paths: Vec<String>,

    /// DateTime Filter After: print log messages with a datetime that is at
    /// or after this datetime. For example, "20200102T120000".
    #[clap(short = 'a', long, verbatim_doc_comment)]
    dt_after: Option<String>,

    /// DateTime Filter Before: print log messages with a datetime that is at
    /// or before this datetime.
    /// For example, "2020-01-03T23:00:00.321-05:30".
    #[clap(short = 'b', long, verbatim_doc_comment)]
    dt_before: Option<String>,

    /// Default timezone offset for datetimes without a timezone.
    /// Example values, "+12", "-0800", "+02:00", or "UTC".
    /// To pass a value with leading "-" use "=" notation, e.g. "-t=-0800".
    /// If not passed then the local system timezone offset is used.
    #[clap(
        short = 't',
        long,
        verbatim_doc_comment,
        value_parser = cli_process_tz_offset,
        default_value_t = *LOCAL_NOW_OFFSET,
    )]
    tz_offset: FixedOffset,

    /// Regular expression finding the datetime at the beginning of the first
    /// line of a log message. Replaces the built-in datetime patterns.
    /// Requires --dt-format.
    #[clap(long, verbatim_doc_comment, requires = "dt_format")]
    dt_regex: Option<String>,

    /// strftime format of the datetime found by --dt-regex.
    /// Requires --dt-regex.
    #[clap(long, verbatim_doc_comment, requires = "dt_regex")]
    dt_format: Option<String>,

    /// Choose to print using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Prepend file name to each log message.
    #[clap(short = 'n', long, verbatim_doc_comment)]
    prepend_filename: bool,

    /// Print unknown log messages to STDERR, prefixed "UNKNOWN: ".
    #[clap(short = 'u', long, verbatim_doc_comment)]
    print_unknown: bool,

    /// Print a summary of each file processed to STDERR.
    #[clap(short = 's', long, verbatim_doc_comment)]
    summary: bool,
}

/// `clap` argument parser for `--tz-offset`.
fn cli_process_tz_offset(tzo: &str) -> std::result::Result<FixedOffset, String> {
    let tzo_: &str = match tzo.to_ascii_uppercase().as_str() {
        "Z" | "UTC" | "GMT" => "+00:00",
        _ => tzo,
    };
    // transform the timezone string to a `FixedOffset` instance
    // using a dummy datetime
    let mut data: String = String::from("2000-01-02 03:04:05 ");
    data.push_str(tzo_);
    for pattern in [
        "%Y-%m-%d %H:%M:%S %:z",
        "%Y-%m-%d %H:%M:%S %z",
        "%Y-%m-%d %H:%M:%S %#z",
    ] {
        let dt = datetime_parse_from_str(data.as_str(), pattern, true, true, &LOCAL_NOW_OFFSET);
        defo!("datetime_parse_from_str({:?}, {:?}) returned {:?}", data, pattern, dt);
        if let Some(dt_) = dt {
            return Ok(*dt_.offset());
        }
    }

    Err(format!("Unable to parse a timezone offset for --tz-offset {:?}", tzo))
}

/// Transform a user-passed datetime `String` into a [`DateTimeL`].
/// Exits if the `String` cannot be parsed.
///
/// [`DateTimeL`]: lealib::data::datetime::DateTimeL
fn process_dt_exit(
    dts_opt: &Option<String>,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    let dts: &String = match dts_opt {
        Some(dts) => dts,
        None => return None,
    };
    match datetime_from_str_fallback(dts.as_str(), tz_offset) {
        Some(dt) => Some(dt),
        None => {
            e_err!("Unable to parse a datetime from {:?}", dts);
            std::process::exit(EXIT_ERR);
        }
    }
}

/// Settings for processing each path, from the command-line arguments.
#[derive(Debug)]
struct ProcessSettings {
    filter_dt_after: DateTimeLOpt,
    filter_dt_before: DateTimeLOpt,
    tz_offset: FixedOffset,
    /// user-passed `(--dt-regex, --dt-format)`
    dt_pattern: Option<(String, String)>,
    color_choice: ColorChoice,
    prepend_filename: bool,
    print_unknown: bool,
    summary: bool,
}

/// Process the user-passed command-line arguments.
/// Exits on invalid arguments.
fn cli_process_args() -> (FPaths, ProcessSettings) {
    let args = CLI_Args::parse();
    defn!("args {:?}", args);

    let paths: FPaths = args.paths.clone();

    let tz_offset: FixedOffset = args.tz_offset;
    defo!("tz_offset {:?}", tz_offset);

    let filter_dt_after: DateTimeLOpt = process_dt_exit(&args.dt_after, &tz_offset);
    defo!("filter_dt_after {:?}", filter_dt_after);
    let filter_dt_before: DateTimeLOpt = process_dt_exit(&args.dt_before, &tz_offset);
    defo!("filter_dt_before {:?}", filter_dt_before);
    if !dt_filters_valid(&filter_dt_after, &filter_dt_before) {
        if let (Some(dta), Some(dtb)) = (filter_dt_after, filter_dt_before) {
            e_err!("Datetime --dt-after ({}) is after Datetime --dt-before ({})", dta, dtb);
        }
        std::process::exit(EXIT_ERR);
    }

    let dt_pattern: Option<(String, String)> = match (args.dt_regex, args.dt_format) {
        (Some(regex), Some(format)) => {
            // check now so a bad pattern is reported once
            if let Err(err) = DtPattern::new(regex.as_str(), format.as_str()) {
                e_err!("{}", err);
                std::process::exit(EXIT_ERR);
            }
            Some((regex, format))
        }
        _ => None,
    };

    // map `CLI_Color_Choice` to `ColorChoice`
    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };
    defo!("color_choice {:?}", color_choice);

    let settings = ProcessSettings {
        filter_dt_after,
        filter_dt_before,
        tz_offset,
        dt_pattern,
        color_choice,
        prepend_filename: args.prepend_filename,
        print_unknown: args.print_unknown,
        summary: args.summary,
    };
    defx!("{:?}", settings);

    (paths, settings)
}

/// Process the user-passed command-line arguments.
/// Process each path.
/// Determine a process return code.
pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let (paths, settings) = cli_process_args();

    if let Err(err) = set_signal_handler() {
        e_wrn!("failed to set the Ctrl+C handler; {}", err);
    }

    let mut ret: bool = true;
    for path in paths.iter() {
        if exit_early() {
            defo!("exit early before path {:?}", path);
            ret = false;
            break;
        }
        if !process_path(path, &settings) {
            ret = false;
        }
    }

    let exitcode = if ret { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    defx!("exitcode {:?}", exitcode);

    exitcode
}

lazy_static! {
    /// flag to signal processing should stop ASAP.
    static ref EXIT_EARLY: RwLock<bool> = {
        defñ!("lazy_static! exit_early");

        RwLock::new(false)
    };
}

/// Has the user requested an early exit?
fn exit_early() -> bool {
    match EXIT_EARLY.read() {
        Ok(exit_early) => *exit_early,
        Err(err) => {
            e_err!("EXIT_EARLY.read() failed: {:?}", err);
            true
        }
    }
}

/// set a process signal handler
fn set_signal_handler() -> anyhow::Result<()> {
    defn!();

    ctrlc::set_handler(move || {
        defn!();
        // signal the processing loop to return early
        match EXIT_EARLY.write() {
            Ok(mut exit_early) => {
                *exit_early = true;
            }
            Err(_err) => {
                de_err!("EXIT_EARLY.write() failed {}", _err);
            }
        }
        defx!();
    })?;

    defx!();

    Ok(())
}

// -------------------------------------------------------------------------------------------------
// processing
// -------------------------------------------------------------------------------------------------

/// The [`Lines`] of `reader`, ending early once `stop` returns `true`.
/// `stop` is checked before each line is read so no line is read and then
/// discarded.
///
/// [`Lines`]: lealib::readers::logstreamprocessor::Lines
fn lines_until<R, F>(
    reader: R,
    stop: F,
) -> impl Iterator<Item = std::io::Result<String>>
where
    R: BufRead,
    F: Fn() -> bool,
{
    let mut lines = Lines::new(reader);
    std::iter::from_fn(move || {
        if stop() {
            defo!("stop reading lines");
            return None;
        }
        lines.next()
    })
}

/// Process one path: print its accepted log messages and, if requested,
/// its summary. Returns `false` if processing failed.
fn process_path(
    path: &FPath,
    settings: &ProcessSettings,
) -> bool {
    defn!("({:?})", path);

    let parser: DtPrefixParser = match settings.dt_pattern.as_ref() {
        Some((regex, format)) => match DtPrefixParser::with_pattern(regex, format, settings.tz_offset) {
            Ok(val) => val,
            Err(err) => {
                e_err!("{}", err);
                defx!("return false");
                return false;
            }
        },
        None => DtPrefixParser::new(settings.tz_offset),
    };
    let prepend_file: Option<String> = match settings.prepend_filename {
        true => Some(format!("{}:", path)),
        false => None,
    };
    let printer: PrinterEntry<StandardStream> =
        PrinterEntry::new_stdout(settings.color_choice, color_rand(), prepend_file, settings.print_unknown);
    let mut processor = match LogStreamProcessor::new(
        parser,
        printer,
        settings.filter_dt_after,
        settings.filter_dt_before,
    ) {
        Ok(val) => val,
        Err(err) => {
            e_err!("{}", err);
            defx!("return false");
            return false;
        }
    };

    let result: std::io::Result<()> = match open_path(path) {
        Ok(reader) => processor.run(lines_until(reader, exit_early)),
        Err(err) => Err(err),
    };

    let mut ret: bool = true;
    let mut error_s: Option<String> = None;
    if let Err(err) = result.as_ref() {
        e_err!("{}", err);
        error_s = Some(err.to_string());
        ret = false;
    }

    let summary: SummaryEntryAssembler = processor.summary();
    let mut printer: PrinterEntry<StandardStream> = processor.into_sink();
    if let Err(err) = printer.flush() {
        if err.kind() != ErrorKind::BrokenPipe {
            e_err!("failed to flush output; {}", err);
            ret = false;
        }
    }
    if let Some(err) = printer.error() {
        // e.g. `lea file.log | head`
        if err.kind() != ErrorKind::BrokenPipe {
            e_err!("failed to print; {}", err);
            error_s.get_or_insert_with(|| err.to_string());
            ret = false;
        }
    }

    if settings.summary {
        if let Err(_err) = print_summary(
            path,
            FileType::from_path(path),
            &summary,
            &settings.filter_dt_after,
            &settings.filter_dt_before,
            error_s.as_deref(),
        ) {
            de_err!("print_summary failed {}", _err);
        }
    }
    defx!("return {}", ret);

    ret
}

// -------------------------------------------------------------------------------------------------
// tests
// -------------------------------------------------------------------------------------------------
