//! Rendering looked-up values in other configuration formats.

pub mod toml;
pub mod yaml;
