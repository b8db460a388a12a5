//! Reward keys — the ordering used to rank candidates for selection.

use serde::Serialize;

use flowpack_core::{InputSizes, Job, TEMP_FLAG};

/// Ranking key for a candidate job. Higher compares greater.
///
/// Ordering is lexicographic: priority dominates, then the summed size of
/// temp-flagged inputs (jobs unblocking more temporary storage first),
/// then the total input footprint (heavier jobs first, so they don't
/// linger). The size components are a heuristic surrogate — several jobs
/// with small temp files can collectively outrank one with a large temp
/// file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RewardKey {
    pub priority: i64,
    pub temp_bytes: u64,
    pub input_bytes: u64,
}

/// Compute the reward key for a candidate.
///
/// With `size_aware` off, only the priority counts. Unknown input sizes
/// contribute 0. Group candidates aggregate over all members.
pub fn reward_key(job: &Job, sizes: &InputSizes, size_aware: bool) -> RewardKey {
    let priority = job.priority();
    if !size_aware {
        return RewardKey {
            priority,
            ..RewardKey::default()
        };
    }

    let mut temp_bytes = 0u64;
    let mut input_bytes = 0u64;
    for file in job.inputs() {
        let size = sizes.size_of(file);
        if file.is_flagged(TEMP_FLAG) {
            temp_bytes += size;
        }
        input_bytes += size;
    }

    RewardKey {
        priority,
        temp_bytes,
        input_bytes,
    }
}
