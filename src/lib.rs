//! Sum, average and maximum of number sequences.
//!
//! The aggregates themselves live in [`stats`]; the remaining modules load
//! series from TOML files and write their results.

pub mod analysis;
pub mod config;
pub mod manager;
pub mod stats;
