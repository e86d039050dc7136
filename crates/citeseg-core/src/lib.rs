//! Configuration loading and service construction.

pub mod config;

pub use config::{Config, HighlightConfig};
