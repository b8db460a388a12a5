//! Candidate filter — bounds how many jobs the packer considers.
//!
//! A fixed-capacity min-heap retains the best candidates by reward key:
//! once full, every stronger arrival evicts the current weakest entry.
//! Ties are broken by a fresh random draw per candidate per call, so
//! equally ranked jobs do not starve each other across repeated ticks.
//! The cost of that choice is run-to-run nondeterminism in tie cases;
//! tests pin outcomes by seeding the generator.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rand::Rng;
use tracing::debug;

use flowpack_core::Job;

use crate::reward::RewardKey;

/// Retention window used when no rate-limiter hint is available.
pub const DEFAULT_MAX_WINDOW: usize = 1000;

/// Number of candidates the filter retains.
///
/// Linear interpolation between the whole pool (greediness 0) and the
/// rate-limiter window (greediness 1):
///
/// ```text
/// n = round((1 - g) * pool + g * window)
/// ```
///
/// `None` greediness disables the filter — retention is unbounded.
pub fn retention_bound(
    greediness: Option<f64>,
    pool: usize,
    window_hint: Option<usize>,
) -> Option<usize> {
    let g = greediness?;
    let window = window_hint.unwrap_or(DEFAULT_MAX_WINDOW);
    Some(((1.0 - g) * pool as f64 + g * window as f64).round() as usize)
}

/// Retain the best `bound` candidates, returned in ascending reward order.
///
/// The output is a stack: the packer pops from the end to process jobs
/// highest-reward-first. `rewards` must be parallel to `jobs`. With
/// `bound` of `None` the whole pool is retained (and sorted); a bound
/// of zero retains nothing.
pub fn filter_candidates<R: Rng>(
    jobs: Vec<Job>,
    rewards: &[RewardKey],
    bound: Option<usize>,
    rng: &mut R,
) -> Vec<Job> {
    debug_assert_eq!(jobs.len(), rewards.len());

    // Min-heap over (reward, tiebreak): the root is always the weakest
    // retained candidate, evicted when a stronger one arrives.
    let retained_at_most = bound.unwrap_or(usize::MAX).min(jobs.len());
    let mut heap: BinaryHeap<Reverse<(RewardKey, u64, usize)>> =
        BinaryHeap::with_capacity(retained_at_most.saturating_add(1));

    for (index, reward) in rewards.iter().enumerate() {
        heap.push(Reverse((*reward, rng.random::<u64>(), index)));
        if let Some(bound) = bound
            && heap.len() > bound
        {
            heap.pop();
        }
    }

    debug!(
        pool = jobs.len(),
        retained = heap.len(),
        "candidate filter complete"
    );

    let mut slots: Vec<Option<Job>> = jobs.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(heap.len());
    while let Some(Reverse((_, _, index))) = heap.pop() {
        if let Some(job) = slots[index].take() {
            ordered.push(job);
        }
    }
    ordered
}
