//! shelf application library
//!
//! Feature modules and the startup wiring used by both binaries.

pub mod bootstrap;
pub mod modules;
