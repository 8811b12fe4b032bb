// DealBook - core/mod.rs
//
// Core business logic layer: parsing, validation, import, querying,
// aggregation, export. Pure functions over in-memory collections; no
// I/O, no blocking, no mutation of caller-owned data except where a
// function's contract says so (the import path).

pub mod dedupe;
pub mod export;
pub mod fields;
pub mod import;
pub mod model;
pub mod parser;
pub mod query;
pub mod stats;
pub mod validate;
