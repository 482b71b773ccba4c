//! Tracing/logging setup shared by every splitledger binary.

pub mod tracing;

pub use crate::tracing::{LogConfig, LogFormat};
