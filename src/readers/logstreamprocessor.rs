// src/readers/logstreamprocessor.rs

//! Implements a [`LogStreamProcessor`], the driver of an [`EntryAssembler`]
//! over the lines of one input source.
//!
//! Lines are read and passed one at a time, in order. Only the pending log
//! message is held in memory, never the whole file.
//!
//! [`EntryAssembler`]: crate::readers::entryassembler::EntryAssembler
//! [`LogStreamProcessor`]: self::LogStreamProcessor

use crate::common::{Count, CRc, FPath, File, FileType, NLc};
use crate::data::datetime::DateTimeLOpt;
use crate::de_err;
use crate::readers::entryassembler::EntryAssembler;
use crate::readers::entrymonitor::EntryMonitor;
use crate::readers::entrysink::EntrySink;
use crate::readers::recordparser::RecordParser;
use crate::readers::summary::SummaryEntryAssembler;

use std::fmt;
use std::io::{BufRead, BufReader, Error, ErrorKind, Read, Result};

use ::flate2::read::MultiGzDecoder;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Enum for the [`LogStreamProcessor`] processing stages.
///
/// [`LogStreamProcessor`]: self::LogStreamProcessor
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum ProcessingStage {
    /// Created, no line has been read.
    Stage0Ready,
    /// Lines are being passed to the `EntryAssembler`. A processor that
    /// failed remains in this stage.
    Stage1StreamLines,
    /// All lines were passed and the `EntryAssembler` was flushed.
    Stage2Done,
}

/// Drives one [`EntryAssembler`] with the lines of one input source.
///
/// A `LogStreamProcessor` runs once. For another input source, create
/// another `LogStreamProcessor`.
///
/// [`EntryAssembler`]: crate::readers::entryassembler::EntryAssembler
pub struct LogStreamProcessor<'a, P, S>
where
    P: RecordParser,
    S: EntrySink<P::Entry>,
{
    entryassembler: EntryAssembler<'a, P, S>,
    processingstage: ProcessingStage,
    /// Count of lines read from the input source.
    lines_read: Count,
}

impl<'a, P, S> fmt::Debug for LogStreamProcessor<'a, P, S>
where
    P: RecordParser,
    S: EntrySink<P::Entry>,
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LogStreamProcessor")
            .field("Processing Stage", &self.processingstage)
            .field("lines_read", &self.lines_read)
            .field("EntryAssembler", &self.entryassembler)
            .finish()
    }
}

impl<'a, P, S> LogStreamProcessor<'a, P, S>
where
    P: RecordParser,
    S: EntrySink<P::Entry>,
{
    /// Create a new `LogStreamProcessor` and the underlying
    /// [`EntryAssembler`].
    ///
    /// [`EntryAssembler`]: crate::readers::entryassembler::EntryAssembler
    pub fn new(
        parser: P,
        sink: S,
        filter_dt_after_opt: DateTimeLOpt,
        filter_dt_before_opt: DateTimeLOpt,
    ) -> Result<LogStreamProcessor<'a, P, S>> {
        let entryassembler = EntryAssembler::new(parser, sink, filter_dt_after_opt, filter_dt_before_opt)?;

        Ok(LogStreamProcessor::from_entryassembler(entryassembler))
    }

    /// Create a new `LogStreamProcessor` driving a prepared `EntryAssembler`.
    pub fn from_entryassembler(entryassembler: EntryAssembler<'a, P, S>) -> LogStreamProcessor<'a, P, S> {
        LogStreamProcessor {
            entryassembler,
            processingstage: ProcessingStage::Stage0Ready,
            lines_read: 0,
        }
    }

    /// See [`EntryAssembler::add_monitor`].
    ///
    /// [`EntryAssembler::add_monitor`]: crate::readers::entryassembler::EntryAssembler#method.add_monitor
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: EntryMonitor<P::Entry> + 'a,
    {
        self.entryassembler.add_monitor(monitor);
    }

    /// Pass every line from `lines`, in order, to the `EntryAssembler`, then
    /// flush the `EntryAssembler`.
    ///
    /// Stops at the first `Err` from `lines` or from the `EntryAssembler` and
    /// returns that `Err`; no more lines are taken from `lines`.
    ///
    /// Returns `InvalidInput` if this `LogStreamProcessor` already ran.
    pub fn run<I>(
        &mut self,
        lines: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        defn!("processingstage {:?}", self.processingstage);
        if self.processingstage != ProcessingStage::Stage0Ready {
            defx!("already ran");
            return Result::Err(Error::new(
                ErrorKind::InvalidInput,
                format!("LogStreamProcessor already ran, processing stage is {:?}", self.processingstage),
            ));
        }
        self.processingstage = ProcessingStage::Stage1StreamLines;
        for line_result in lines {
            let line: String = match line_result {
                Ok(line) => line,
                Err(err) => {
                    de_err!("reading line {} failed {}", self.lines_read + 1, err);
                    defx!("return Err({:?})", err);
                    return Err(err);
                }
            };
            self.lines_read += 1;
            self.entryassembler.consume_line(line.as_str())?;
        }
        defo!("end of input after {} lines; flush", self.lines_read);
        self.entryassembler.flush()?;
        self.processingstage = ProcessingStage::Stage2Done;
        defx!("return Ok");

        Ok(())
    }

    /// Open the input source at `path` and [`run`] over its lines.
    ///
    /// Path `"-"` reads STDIN. A path ending `.gz` is decompressed.
    ///
    /// [`run`]: self::LogStreamProcessor#method.run
    pub fn read_and_process(
        &mut self,
        path: &FPath,
    ) -> Result<()> {
        defn!("({:?})", path);
        let reader: Box<dyn BufRead> = match open_path(path) {
            Ok(val) => val,
            Err(err) => {
                defx!("open_path({:?}) failed {}", path, err);
                return Err(err);
            }
        };
        let result = self.run(Lines::new(reader));
        defx!("{:?}", result);

        result
    }

    #[inline(always)]
    pub const fn processingstage(&self) -> ProcessingStage {
        self.processingstage
    }

    /// Count of lines read from the input source.
    #[inline(always)]
    pub const fn count_lines_read(&self) -> Count {
        self.lines_read
    }

    #[inline(always)]
    pub const fn entryassembler(&self) -> &EntryAssembler<'a, P, S> {
        &self.entryassembler
    }

    /// See [`EntryAssembler::summary`].
    ///
    /// [`EntryAssembler::summary`]: crate::readers::entryassembler::EntryAssembler#method.summary
    pub fn summary(&self) -> SummaryEntryAssembler {
        self.entryassembler.summary()
    }

    /// Consume this `LogStreamProcessor` and return the [`EntrySink`].
    ///
    /// [`EntrySink`]: crate::readers::entrysink::EntrySink
    pub fn into_sink(self) -> S {
        self.entryassembler.into_sink()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// input sources
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Capacity of the `BufReader` for input sources.
pub const READER_CAPACITY: usize = 0x10000;

/// Open the input source at `path` per its [`FileType`].
///
/// [`FileType`]: crate::common::FileType
pub fn open_path(path: &FPath) -> Result<Box<dyn BufRead>> {
    let filetype: FileType = FileType::from_path(path);
    defn!("({:?}) filetype {:?}", path, filetype);
    let read_: Box<dyn Read> = match filetype {
        FileType::Stdin => Box::new(std::io::stdin()),
        FileType::File | FileType::FileGz => {
            let file: File = match File::open(path) {
                Ok(val) => val,
                Err(err) => {
                    defx!("File::open({:?}) failed {}", path, err);
                    return Err(Error::new(err.kind(), format!("{} for file {:?}", err, path)));
                }
            };
            match filetype {
                FileType::FileGz => Box::new(MultiGzDecoder::new(file)),
                _ => Box::new(file),
            }
        }
    };
    defx!();

    Ok(Box::new(BufReader::with_capacity(READER_CAPACITY, read_)))
}

/// Iterator of the lines of a [`BufRead`], without line terminators.
///
/// Like [`BufRead::lines`] but also removes the `'\r'` of a `"\r\n"`
/// terminator and reports the line number of invalid UTF-8.
///
/// [`BufRead`]: std::io::BufRead
/// [`BufRead::lines`]: std::io::BufRead#method.lines
pub struct Lines<R: BufRead> {
    reader: R,
    /// Count of lines returned.
    lineno: Count,
    /// Set after the first `Err`; no more lines are returned.
    done: bool,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Lines<R> {
        Lines {
            reader,
            lineno: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Result<String>> {
        if self.done {
            return None;
        }
        let mut buf: Vec<u8> = Vec::new();
        match self.reader.read_until(NLc as u8, &mut buf) {
            Ok(0) => {
                self.done = true;
                return None;
            }
            Ok(_) => {}
            Err(err) => {
                self.done = true;
                return Some(Err(err));
            }
        }
        self.lineno += 1;
        if buf.last() == Some(&(NLc as u8)) {
            buf.pop();
            if buf.last() == Some(&(CRc as u8)) {
                buf.pop();
            }
        }
        match String::from_utf8(buf) {
            Ok(line) => Some(Ok(line)),
            Err(err) => {
                self.done = true;
                Some(Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("line {} is not valid UTF-8; {}", self.lineno, err),
                )))
            }
        }
    }
}
