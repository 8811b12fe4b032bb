// DealBook - lib.rs
//
// Library entry point, exposing all non-CLI modules for integration
// testing and programmatic use. The binary in `main.rs` is a thin shell
// over this surface.

pub mod core;
pub mod platform;
pub mod util;
