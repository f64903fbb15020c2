//! Port Call Reporter Library
//!
//! Exposes the pipeline modules for use in integration tests and by the
//! binary: cache, feed client, event derivation, report assembly, and
//! rendering.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod output;
