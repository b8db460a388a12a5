//! The job selector — ties filter and packer together for one tick.

use rand::Rng;
use tracing::debug;

use flowpack_core::{InputSizes, Job, ResourceMap, ResourceOverlay};

use crate::config::SelectorConfig;
use crate::error::SelectorResult;
use crate::filter::{filter_candidates, retention_bound};
use crate::packer::pack_jobs;
use crate::reward::{RewardKey, reward_key};

/// One tick's worth of selection input, built fresh by the caller per call.
#[derive(Debug, Clone, Default)]
pub struct SelectionRequest {
    /// Jobs eligible to run right now.
    pub selectable: Vec<Job>,
    /// All jobs still pending, including the selectable ones. Carried for
    /// parity with the calling engine's contract; the algorithm does not
    /// consult it.
    pub remaining: Vec<Job>,
    /// Resource budgets for this tick. Immutable during the call.
    pub available: ResourceMap,
    /// Batched input-file sizes. The caller resolves sizes once per call —
    /// per-job lookups would serialize many small blocking reads.
    pub input_sizes: InputSizes,
    /// Late-bound demands attached to jobs during this call.
    pub overlay: ResourceOverlay,
    /// The rate limiter's max-jobs-per-interval reading, when available.
    /// Falls back to `DEFAULT_MAX_WINDOW`.
    pub max_jobs_hint: Option<usize>,
}

/// Selects which jobs to dispatch on each scheduling tick.
///
/// Holds only immutable configuration; every call is independent. An
/// `Err` result signals the caller to fall back to its default admission
/// policy — an empty selection is a valid success, not an error.
pub struct JobSelector {
    config: SelectorConfig,
}

impl JobSelector {
    /// Create a selector, rejecting invalid configuration.
    pub fn new(config: SelectorConfig) -> SelectorResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Select jobs for this tick using real entropy for tiebreaks.
    pub fn select_jobs(&self, request: SelectionRequest) -> SelectorResult<Vec<Job>> {
        self.select_jobs_with_rng(request, &mut rand::rng())
    }

    /// Select jobs with an injected random source.
    ///
    /// Tiebreaks among equal rewards come from `rng`; a seeded generator
    /// makes the whole selection deterministic.
    pub fn select_jobs_with_rng<R: Rng>(
        &self,
        request: SelectionRequest,
        rng: &mut R,
    ) -> SelectorResult<Vec<Job>> {
        let pool = request.selectable.len();
        let bound = retention_bound(self.config.greediness, pool, request.max_jobs_hint);
        debug!(pool, ?bound, "selecting jobs to run");

        let size_aware = !self.config.omit_prioritize_by_temp_and_input;
        let rewards: Vec<RewardKey> = request
            .selectable
            .iter()
            .map(|job| reward_key(job, &request.input_sizes, size_aware))
            .collect();

        let stack = filter_candidates(request.selectable, &rewards, bound, rng);
        let packed = pack_jobs(stack, &request.available, &request.overlay)?;

        debug!(
            admitted = packed.jobs.len(),
            pool,
            used = ?packed.used,
            "job selection complete"
        );
        Ok(packed.jobs)
    }
}
