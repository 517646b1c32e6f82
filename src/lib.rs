//! `claims-watch` library crate.
//!
//! The binary (`claims-watch`) is a thin wrapper around this library so that:
//!
//! - the parse/analyze/compose core is testable without network access
//! - the download and SMS collaborators can be swapped for fakes in tests
//! - the fatal vs. recoverable policy lives in one place (`app::pipeline`)

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod notify;
pub mod report;
