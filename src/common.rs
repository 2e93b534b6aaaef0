// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

//! Common imports, type aliases, and other globals for _lealib_.

use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::fs::File;
pub use std::path::Path;

/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FPaths = Vec<FPath>;

/// A general-purpose counting type.
pub type Count = u64;

/// The special path meaning "read from STDIN".
pub const FPATH_STDIN: &str = "-";

/// How the input source of a log file is read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FileType {
    /// Plain text file.
    #[default]
    File,
    /// gzip compressed text file, decompressed as a stream.
    FileGz,
    /// Process standard input.
    Stdin,
}

impl FileType {
    /// Decide the `FileType` from the path name alone. Does not access the
    /// file system.
    pub fn from_path(path: &FPath) -> FileType {
        if path == FPATH_STDIN {
            return FileType::Stdin;
        }
        match Path::new(path).extension() {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => FileType::FileGz,
            _ => FileType::File,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::File => write!(f, "text"),
            FileType::FileGz => write!(f, "gzip text"),
            FileType::Stdin => write!(f, "stdin"),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Lines
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NewLine as char
#[allow(non_upper_case_globals)]
pub const NLc: char = '\n';
/// NewLine as `&str`
#[allow(non_upper_case_globals)]
pub const NLs: &str = "\n";
/// Carriage Return as char
#[allow(non_upper_case_globals)]
pub const CRc: char = '\r';
