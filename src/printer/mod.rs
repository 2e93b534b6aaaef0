// src/printer/mod.rs

//! Printing log messages and summaries for the _lea_ binary program.

pub mod printers;
pub mod summary;
