//! Input/output helpers.
//!
//! - FRED CSV ingest + cleaning (`ingest`)
//! - raw feed snapshot writer (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
