//! # Alke application library
//!
//! Everything the `alke` binary runs, exposed as a library so integration
//! tests can drive the router and the replay engine directly.

pub mod api;
pub mod cli;
pub mod config;
pub mod replay;
