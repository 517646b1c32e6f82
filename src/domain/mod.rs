//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - accepted feed observations (`Observation`) and the cleaned `Series`
//! - the analyzer output (`AnalysisResult`)
//! - the composed notification payload (`AlertMessage`, `StatusLabel`)

pub mod types;

pub use types::*;
