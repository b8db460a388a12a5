//! flowpack-scheduler — per-tick job selection under a capacity vector.
//!
//! On every scheduling tick the calling engine hands over the currently
//! runnable jobs, the available resources, and a batched input-size table.
//! The selector answers with a feasible subset to dispatch now:
//!
//! - Candidates are ranked by a reward key (priority, optionally weighted
//!   by temp-file and input-file footprint)
//! - A greediness knob bounds how many candidates are even considered,
//!   via a fixed-capacity heap that evicts the weakest candidate
//! - A first-fit greedy pass admits jobs in reward order as long as no
//!   resource dimension would exceed its capacity
//!
//! The result is a heuristic, O(m log n) selection — not an optimal
//! knapsack solution. Each call is stateless; only the configuration is
//! held across ticks.
//!
//! # Architecture
//!
//! ```text
//! JobSelector
//!   ├── reward  (RewardKey per candidate: priority, temp bytes, input bytes)
//!   ├── filter  (bounded min-heap, greediness-scaled retention, random ties)
//!   └── packer  (first-fit greedy admission against the capacity vector)
//! ```
//!
//! An `Err` from `select_jobs` signals the caller to fall back to its own
//! default admission policy; an empty selection is a valid success.

pub mod config;
pub mod error;
pub mod filter;
pub mod packer;
pub mod reward;
pub mod selector;

pub use config::SelectorConfig;
pub use error::{SelectorError, SelectorResult};
pub use filter::{DEFAULT_MAX_WINDOW, filter_candidates, retention_bound};
pub use packer::{Packed, pack_jobs};
pub use reward::{RewardKey, reward_key};
pub use selector::{JobSelector, SelectionRequest};
