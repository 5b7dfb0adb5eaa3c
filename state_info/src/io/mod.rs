//! I/O helpers: record file loading, asset discovery, config, image viewing.

pub mod assets;
pub mod config;
pub mod loader;
pub mod viewer;
