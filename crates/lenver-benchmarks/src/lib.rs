//! lenver benchmarking suite
//!
//! Benchmarks for version parsing, ordering, client hint evaluation and
//! configuration parsing.

pub mod common;

pub use common::*;
