// src/printer/printers.rs

//! Specialized printer struct [`PrinterEntry`], an [`EntrySink`] that prints
//! [`DtEntry`s] in color.
//!
//! [`PrinterEntry`]: self::PrinterEntry
//! [`EntrySink`]: crate::readers::entrysink::EntrySink
//! [`DtEntry`s]: crate::data::entry::DtEntry

use crate::common::{Count, NLs};
use crate::data::entry::DtEntry;
use crate::de_err;
use crate::readers::entrysink::EntrySink;

use std::io::{Error, Result, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

#[doc(hidden)]
pub use ::termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for printing prepended data like the file name.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_DEFAULT: Color = Color::White;

/// Prefix of a printed unknown entry.
pub const UNKNOWN_PREFIX: &str = "UNKNOWN: ";

/// A preselection of [`Color`s] for printing log messages, one per file.
/// Chosen for a dark background console.
///
/// [`Color`s]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLORS_TEXT: [Color; 12] = [
    Color::Yellow,
    Color::Cyan,
    Color::Magenta,
    // XXX: colors with low pixel values are difficult to see on dark console
    //      backgrounds recommend at least one pixel value of 102 or greater
    Color::Rgb(153, 153, 0),
    Color::Rgb(0, 153, 153),
    Color::Rgb(127, 127, 230),
    Color::Rgb(127, 230, 127),
    Color::Rgb(230, 127, 127),
    Color::Rgb(127, 230, 230),
    Color::Rgb(230, 230, 127),
    Color::Rgb(230, 127, 230),
    Color::Rgb(230, 230, 230),
];

/// Index of the next color returned by `color_rand`.
static COLOR_AT: AtomicUsize = AtomicUsize::new(0);

/// Return the next color from [`COLORS_TEXT`], cycling.
pub fn color_rand() -> Color {
    let ci: usize = COLOR_AT.fetch_add(1, Ordering::Relaxed) % COLORS_TEXT.len();

    COLORS_TEXT[ci]
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterEntry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An [`EntrySink`] that prints each accepted [`DtEntry`] and, optionally,
/// each unknown entry.
///
/// Entries are written to `out`, each followed by a newline. Unknown entries
/// are written to `out_unknown` prefixed with [`UNKNOWN_PREFIX`].
///
/// The first write error is stored, see [`error`]. Once there is an error
/// nothing more is written, e.g. after `lea file.log | head`.
///
/// [`EntrySink`]: crate::readers::entrysink::EntrySink
/// [`DtEntry`]: crate::data::entry::DtEntry
/// [`error`]: self::PrinterEntry#method.error
pub struct PrinterEntry<W: WriteColor> {
    out: W,
    out_unknown: W,
    /// should printing be in color?
    do_color: bool,
    /// color settings for log message text
    color_spec_text: ColorSpec,
    /// color settings for the datetime substring
    color_spec_datetime: ColorSpec,
    /// color settings for prepended file name
    color_spec_default: ColorSpec,
    /// printed before each log message, e.g. the file name
    prepend_file: Option<String>,
    /// should unknown entries be printed?
    print_unknown: bool,
    count_printed: Count,
    count_unknown: Count,
    error: Option<Error>,
}

impl PrinterEntry<StandardStream> {
    /// Create a `PrinterEntry` that prints to STDOUT and prints unknown
    /// entries to STDERR.
    pub fn new_stdout(
        color_choice: ColorChoice,
        color_text: Color,
        prepend_file: Option<String>,
        print_unknown: bool,
    ) -> PrinterEntry<StandardStream> {
        PrinterEntry::new(
            StandardStream::stdout(color_choice),
            StandardStream::stderr(color_choice),
            color_choice != ColorChoice::Never,
            color_text,
            prepend_file,
            print_unknown,
        )
    }
}

impl<W: WriteColor> PrinterEntry<W> {
    pub fn new(
        out: W,
        out_unknown: W,
        do_color: bool,
        color_text: Color,
        prepend_file: Option<String>,
        print_unknown: bool,
    ) -> PrinterEntry<W> {
        let mut color_spec_text = ColorSpec::new();
        color_spec_text.set_fg(Some(color_text));
        let mut color_spec_datetime = ColorSpec::new();
        color_spec_datetime
            .set_fg(Some(color_text))
            .set_bold(true)
            .set_underline(true);
        let mut color_spec_default = ColorSpec::new();
        color_spec_default.set_fg(Some(COLOR_DEFAULT));

        PrinterEntry {
            out,
            out_unknown,
            do_color,
            color_spec_text,
            color_spec_datetime,
            color_spec_default,
            prepend_file,
            print_unknown,
            count_printed: 0,
            count_unknown: 0,
            error: None,
        }
    }

    /// Write a segment of text with the `color_spec`, if color is enabled.
    fn write_segment(
        out: &mut W,
        do_color: bool,
        color_spec: &ColorSpec,
        text: &str,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if do_color {
            out.set_color(color_spec)?;
        }
        out.write_all(text.as_bytes())
    }

    /// Print one `DtEntry`, the datetime substring highlighted.
    pub fn print_entry(
        &mut self,
        entry: &DtEntry,
    ) -> Result<()> {
        if let Some(prepend) = self.prepend_file.as_ref() {
            Self::write_segment(&mut self.out, self.do_color, &self.color_spec_default, prepend.as_str())?;
        }
        Self::write_segment(&mut self.out, self.do_color, &self.color_spec_text, entry.prefix())?;
        Self::write_segment(&mut self.out, self.do_color, &self.color_spec_datetime, entry.dt_str())?;
        Self::write_segment(&mut self.out, self.do_color, &self.color_spec_text, &entry.text()[entry.dt_end()..])?;
        if self.do_color {
            self.out.reset()?;
        }
        self.out.write_all(NLs.as_bytes())?;
        self.count_printed += 1;

        Ok(())
    }

    /// Print the text of one unknown entry.
    pub fn print_unknown_entry(
        &mut self,
        raw: &str,
    ) -> Result<()> {
        if let Some(prepend) = self.prepend_file.as_ref() {
            self.out_unknown.write_all(prepend.as_bytes())?;
        }
        self.out_unknown.write_all(UNKNOWN_PREFIX.as_bytes())?;
        self.out_unknown.write_all(raw.as_bytes())?;
        self.out_unknown.write_all(NLs.as_bytes())?;

        Ok(())
    }

    /// Remember only the first error.
    fn set_error(
        &mut self,
        error: Error,
    ) {
        de_err!("PrinterEntry write error {}", error);
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Flush `out` and `out_unknown`.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        self.out_unknown.flush()
    }

    /// The first write error, if any.
    pub const fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Count of entries printed.
    pub const fn count_printed(&self) -> Count {
        self.count_printed
    }

    /// Count of unknown entries received, printed or not.
    pub const fn count_unknown(&self) -> Count {
        self.count_unknown
    }

    pub const fn out(&self) -> &W {
        &self.out
    }

    pub const fn out_unknown(&self) -> &W {
        &self.out_unknown
    }
}

impl<W: WriteColor> EntrySink<DtEntry> for PrinterEntry<W> {
    fn add_entry(&mut self, entry: DtEntry) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.print_entry(&entry) {
            self.set_error(err);
        }
    }

    fn add_unknown_entry(&mut self, raw: String) {
        self.count_unknown += 1;
        if !self.print_unknown || self.error.is_some() {
            return;
        }
        if let Err(err) = self.print_unknown_entry(raw.as_str()) {
            self.set_error(err);
        }
    }
}
