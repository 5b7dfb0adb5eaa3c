//! U.S. state information: load, browse, search, chart, and update state records.
//!
//! The crate keeps a strict split between pure table logic and everything
//! that touches the outside world:
//!
//! - **[`core`]**: The typed table, its name index, queries, and the
//!   population mutator. No I/O, fully testable in isolation.
//! - **[`io`]**: Record file loading, flower image discovery, config, and
//!   launching an external image viewer.
//!
//! [`catalog`] ties a loaded table to its image index for the lifetime of a
//! run. [`render`] and [`menu`] present it on the console.

pub mod catalog;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod menu;
pub mod render;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
