//! Command Line Interface (CLI) layer for coordclean.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-file and batch
//! cleaning. It wires user-provided options to the library functionality
//! exposed via `coordclean::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
