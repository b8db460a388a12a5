//! flowpack-core — the job model consumed by the flowpack scheduler.
//!
//! Defines the data the selection algorithm operates on:
//!
//! - `Job` / `JobSpec` — schedulable units (single jobs or flattenable
//!   group jobs) with a priority, declared resource demands, and input files
//! - `ResourceValue` / `ResourceMap` — numeric or symbolic resource amounts,
//!   used both for per-job demand and per-tick available capacity
//! - `InputSizes` — a batched input-file size table, built once per
//!   selection call by the caller
//! - `ResourceOverlay` — additive, caller-owned late-bound demands merged
//!   into resource computation without mutating the job itself
//!
//! All types are serde-serializable so callers can persist or ship them
//! as JSON/TOML.

pub mod job;
pub mod types;

pub use job::{Job, JobSpec, ResourceOverlay};
pub use types::*;
