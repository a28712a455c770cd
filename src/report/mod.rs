//! Report generation.

pub mod generator;

pub use generator::{report_path, write_report};
