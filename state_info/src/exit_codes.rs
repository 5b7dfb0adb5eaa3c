//! Stable exit codes for `state-info` commands.

/// Command succeeded. Usage errors exit with 2 (clap).
pub const OK: i32 = 0;
/// Config or record file could not be loaded, or another fatal error.
pub const FAILURE: i32 = 1;
/// The named state is not in the table.
pub const NOT_FOUND: i32 = 3;
/// The population value was negative or not an integer.
pub const INVALID_POPULATION: i32 = 4;
