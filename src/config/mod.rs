//! Configuration module for the expense tracker
//!
//! There is no configuration file; the only configurable aspect is where the
//! database lives, resolved from a flag, an environment variable or the
//! platform data directory.

pub mod paths;

pub use paths::{ExpensePaths, DATABASE_FILE_NAME, DATA_DIR_ENV};
