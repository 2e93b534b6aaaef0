// src/debug/mod.rs

//! The `debug` module is printer macros, plus functions for printing in
//! debug builds and test builds.

#[cfg(test)]
pub mod helpers;

pub mod printers;
