// src/tests/mod.rs

//! Tests for _lealib_.
//!
//! Tests are placed at `src/tests/`, inside the `lealib`, for crate-internal
//! visibility.
//!
//! Tests placed at top-level path `tests/` only use the public API.

pub mod common;
pub mod logstreamprocessor_tests;
