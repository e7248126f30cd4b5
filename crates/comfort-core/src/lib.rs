//! Core domain types and comfort calculations for the ATG comfort tool.
//!
//! Holds the hourly data model, the outdoor running-mean estimator, the
//! adaptive comfort classifier, error types, formatting helpers, and the
//! CLI settings layer. Everything here is pure and synchronous; file I/O
//! lives in the `comfort-data` crate.

pub mod classifier;
pub mod error;
pub mod formatting;
pub mod models;
pub mod running_mean;
pub mod settings;
