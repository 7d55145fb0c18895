//! Data models for order forms and the run configuration.

pub mod config;
pub mod order;
