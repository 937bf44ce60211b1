//! Command implementations for the portal CLI

pub mod serve;

pub use serve::run_serve;
