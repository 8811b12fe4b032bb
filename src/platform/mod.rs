// DealBook - platform/mod.rs
//
// Platform abstraction layer: config paths and config.toml loading.
// Dependencies: directories and toml crates, plus the core option keys
// for config validation.

pub mod config;
