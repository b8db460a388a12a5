//! Greedy packer — first-fit admission against the capacity vector.
//!
//! Processes candidates strictly in reward-descending order. A job is
//! admitted only if every tracked resource stays within capacity; a job
//! that does not fit is skipped permanently — no backtracking, no
//! look-ahead. A later, lower-reward job that fits is never traded
//! against an earlier skip, which keeps the pass O(k) and deterministic
//! given the input order.

use std::collections::HashMap;

use tracing::debug;

use flowpack_core::{Job, ResourceMap, ResourceName, ResourceOverlay};

use crate::error::{SelectorError, SelectorResult};

/// Outcome of a packing pass.
#[derive(Debug)]
pub struct Packed {
    /// Admitted jobs, in admission order.
    pub jobs: Vec<Job>,
    /// Resources committed by the admitted set, per tracked dimension.
    pub used: HashMap<ResourceName, u64>,
}

/// Admit jobs from `stack` (ascending reward order, popped from the end)
/// until candidates are exhausted.
///
/// Only numeric capacity entries constrain packing; text-valued entries
/// are skipped. A job's demand is restricted to the tracked dimensions:
/// resources a job does not declare count as zero, and demands attached
/// via the overlay are added on top. A text-valued demand on a tracked
/// dimension is malformed input and fails the whole selection.
pub fn pack_jobs(
    mut stack: Vec<Job>,
    available: &ResourceMap,
    overlay: &ResourceOverlay,
) -> SelectorResult<Packed> {
    let mut tracked: Vec<(&str, u64)> = Vec::with_capacity(available.len());
    for (name, value) in available {
        match value.as_count() {
            Some(capacity) => tracked.push((name.as_str(), capacity)),
            None => debug!(resource = %name, "ignoring text-valued capacity entry"),
        }
    }

    let mut used = vec![0u64; tracked.len()];
    let mut admitted = Vec::new();

    while let Some(job) = stack.pop() {
        let demand = job_demand(&job, &tracked, overlay)?;

        let exceeds = tracked
            .iter()
            .zip(&used)
            .zip(&demand)
            .any(|(((_, capacity), u), d)| u.saturating_add(*d) > *capacity);

        if exceeds {
            debug!(job = %job.id(), "skipping job, would exceed available resources");
            continue;
        }

        for (u, d) in used.iter_mut().zip(&demand) {
            *u += d;
        }
        admitted.push(job);
    }

    let used = tracked
        .iter()
        .zip(&used)
        .map(|((name, _), u)| (name.to_string(), *u))
        .collect();

    Ok(Packed {
        jobs: admitted,
        used,
    })
}

/// Demand of one candidate restricted to the tracked dimensions, summed
/// over group members, with overlay attachments added.
fn job_demand(
    job: &Job,
    tracked: &[(&str, u64)],
    overlay: &ResourceOverlay,
) -> SelectorResult<Vec<u64>> {
    let mut demand = vec![0u64; tracked.len()];
    for (slot, (name, _)) in demand.iter_mut().zip(tracked) {
        for member in job.members() {
            if let Some(value) = member.resources.get(*name) {
                match value.as_count() {
                    Some(n) => *slot = slot.saturating_add(n),
                    None => {
                        return Err(SelectorError::NonNumericDemand {
                            job: job.id().to_string(),
                            resource: name.to_string(),
                        });
                    }
                }
            }
        }
        *slot = slot.saturating_add(overlay.extra(job.id(), name));
    }
    Ok(demand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowpack_core::{JobSpec, ResourceValue};

    fn job(id: &str, cpu: u64) -> Job {
        let mut spec = JobSpec::new(id);
        spec.resources
            .insert("cpu".to_string(), ResourceValue::Count(cpu));
        Job::Single(spec)
    }

    fn capacity(entries: &[(&str, u64)]) -> ResourceMap {
        entries
            .iter()
            .map(|(name, n)| (name.to_string(), ResourceValue::Count(*n)))
            .collect()
    }

    fn admitted_ids(packed: &Packed) -> Vec<&str> {
        packed.jobs.iter().map(|j| j.id()).collect()
    }

    #[test]
    fn empty_stack_packs_nothing() {
        let packed = pack_jobs(vec![], &capacity(&[("cpu", 4)]), &ResourceOverlay::new()).unwrap();
        assert!(packed.jobs.is_empty());
        assert_eq!(packed.used["cpu"], 0);
    }

    #[test]
    fn admits_in_stack_pop_order() {
        // Ascending stack: last element is highest reward.
        let stack = vec![job("low", 1), job("high", 1)];
        let packed = pack_jobs(stack, &capacity(&[("cpu", 4)]), &ResourceOverlay::new()).unwrap();

        assert_eq!(admitted_ids(&packed), ["high", "low"]);
        assert_eq!(packed.used["cpu"], 2);
    }

    #[test]
    fn single_oversized_job_is_skipped() {
        let packed = pack_jobs(
            vec![job("huge", 10)],
            &capacity(&[("cpu", 4)]),
            &ResourceOverlay::new(),
        )
        .unwrap();

        assert!(packed.jobs.is_empty());
        assert_eq!(packed.used["cpu"], 0);
    }

    #[test]
    fn second_job_skipped_when_capacity_exhausted() {
        let stack = vec![job("b", 3), job("a", 3)];
        let packed = pack_jobs(stack, &capacity(&[("cpu", 4)]), &ResourceOverlay::new()).unwrap();

        // a (top of stack) is admitted; b would need 3 + 3 > 4.
        assert_eq!(admitted_ids(&packed), ["a"]);
    }

    #[test]
    fn skipped_job_is_never_reconsidered() {
        // mid doesn't fit after big; small (lower reward) still does.
        let stack = vec![job("small", 1), job("mid", 3), job("big", 2)];
        let packed = pack_jobs(stack, &capacity(&[("cpu", 3)]), &ResourceOverlay::new()).unwrap();

        assert_eq!(admitted_ids(&packed), ["big", "small"]);
        assert_eq!(packed.used["cpu"], 3);
    }

    #[test]
    fn any_exceeded_dimension_rejects() {
        let mut spec = JobSpec::new("j");
        spec.resources
            .insert("cpu".to_string(), ResourceValue::Count(1));
        spec.resources
            .insert("mem_mb".to_string(), ResourceValue::Count(4096));

        let packed = pack_jobs(
            vec![Job::Single(spec)],
            &capacity(&[("cpu", 8), ("mem_mb", 1024)]),
            &ResourceOverlay::new(),
        )
        .unwrap();

        assert!(packed.jobs.is_empty());
    }

    #[test]
    fn undeclared_resources_default_to_zero() {
        let mut spec = JobSpec::new("cpu-only");
        spec.resources
            .insert("cpu".to_string(), ResourceValue::Count(2));

        let packed = pack_jobs(
            vec![Job::Single(spec)],
            &capacity(&[("cpu", 4), ("mem_mb", 1024)]),
            &ResourceOverlay::new(),
        )
        .unwrap();

        assert_eq!(admitted_ids(&packed), ["cpu-only"]);
        assert_eq!(packed.used["mem_mb"], 0);
    }

    #[test]
    fn text_capacity_entries_do_not_constrain() {
        let mut available = capacity(&[("cpu", 4)]);
        available.insert(
            "gpu_model".to_string(),
            ResourceValue::Text("a100".to_string()),
        );

        let packed = pack_jobs(vec![job("j", 2)], &available, &ResourceOverlay::new()).unwrap();

        assert_eq!(admitted_ids(&packed), ["j"]);
        assert!(!packed.used.contains_key("gpu_model"));
    }

    #[test]
    fn text_demand_on_tracked_resource_is_an_error() {
        let mut spec = JobSpec::new("bad");
        spec.resources
            .insert("cpu".to_string(), ResourceValue::Text("lots".to_string()));

        let result = pack_jobs(
            vec![Job::Single(spec)],
            &capacity(&[("cpu", 4)]),
            &ResourceOverlay::new(),
        );

        assert!(matches!(
            result,
            Err(SelectorError::NonNumericDemand { job, resource })
                if job == "bad" && resource == "cpu"
        ));
    }

    #[test]
    fn overlay_demand_counts_against_capacity() {
        let mut overlay = ResourceOverlay::new();
        overlay.attach("j", "cpu", 3);

        // Declared 2 + attached 3 > 4.
        let packed = pack_jobs(vec![job("j", 2)], &capacity(&[("cpu", 4)]), &overlay).unwrap();
        assert!(packed.jobs.is_empty());

        let packed = pack_jobs(
            vec![job("j", 2)],
            &capacity(&[("cpu", 5)]),
            &overlay,
        )
        .unwrap();
        assert_eq!(admitted_ids(&packed), ["j"]);
        assert_eq!(packed.used["cpu"], 5);
    }

    #[test]
    fn group_demand_sums_members() {
        let mut a = JobSpec::new("a");
        a.resources
            .insert("cpu".to_string(), ResourceValue::Count(2));
        let mut b = JobSpec::new("b");
        b.resources
            .insert("cpu".to_string(), ResourceValue::Count(3));
        let group = Job::Group {
            id: "g".to_string(),
            members: vec![a, b],
        };

        let packed = pack_jobs(
            vec![group.clone()],
            &capacity(&[("cpu", 4)]),
            &ResourceOverlay::new(),
        )
        .unwrap();
        assert!(packed.jobs.is_empty()); // 2 + 3 > 4

        let packed = pack_jobs(vec![group], &capacity(&[("cpu", 5)]), &ResourceOverlay::new())
            .unwrap();
        assert_eq!(admitted_ids(&packed), ["g"]);
        assert_eq!(packed.used["cpu"], 5);
    }

    #[test]
    fn packing_is_idempotent_given_fixed_order() {
        let stack = vec![job("c", 2), job("b", 2), job("a", 2)];
        let available = capacity(&[("cpu", 4)]);

        let first = pack_jobs(stack.clone(), &available, &ResourceOverlay::new()).unwrap();
        let second = pack_jobs(stack, &available, &ResourceOverlay::new()).unwrap();

        assert_eq!(admitted_ids(&first), admitted_ids(&second));
        assert_eq!(first.used, second.used);
    }
}
