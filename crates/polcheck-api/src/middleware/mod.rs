//! # Middleware
//!
//! - `metrics`: per-request counter and latency histogram.

pub mod metrics;
