//! Batch checker that flags CI-tracked container images whose upstream base
//! images have newer content.
//!
//! The decision lives in [`oracle::UpdateOracle`]: a diff-based checker
//! subprocess first, the Docker Hub tag-age heuristic when that fails, and
//! "assume an update is needed" when neither can answer. Everything else is
//! I/O around that decision.

pub mod cli;
pub mod config;
pub mod exec;
pub mod oracle;
pub mod registry;
pub mod report;
pub mod runner;
