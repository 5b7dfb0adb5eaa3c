//! Deterministic, pure logic over the in-memory state table.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod error;
pub mod record;
pub mod table;
