//! Schedulable jobs and the late-bound demand overlay.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{InputFile, JobId, ResourceMap, ResourceName};

/// A single schedulable unit of work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobSpec {
    pub id: JobId,
    /// Scheduling priority; higher is more desirable.
    #[serde(default)]
    pub priority: i64,
    /// Declared resource demand. Missing entries mean zero demand.
    #[serde(default)]
    pub resources: ResourceMap,
    /// Input files consumed by this job.
    #[serde(default)]
    pub inputs: Vec<InputFile>,
}

impl JobSpec {
    pub fn new(id: impl Into<JobId>) -> Self {
        Self {
            id: id.into(),
            priority: 0,
            resources: ResourceMap::new(),
            inputs: Vec::new(),
        }
    }
}

/// A candidate for selection: a single job, or a group whose members run
/// together and are enumerable individually.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Job {
    Single(JobSpec),
    Group { id: JobId, members: Vec<JobSpec> },
}

impl Job {
    pub fn id(&self) -> &str {
        match self {
            Job::Single(spec) => &spec.id,
            Job::Group { id, .. } => id,
        }
    }

    /// Effective priority: a group ranks by its most urgent member.
    pub fn priority(&self) -> i64 {
        match self {
            Job::Single(spec) => spec.priority,
            Job::Group { members, .. } => {
                members.iter().map(|m| m.priority).max().unwrap_or(0)
            }
        }
    }

    /// Leaf jobs of this candidate: the job itself, or the group members.
    pub fn members(&self) -> impl Iterator<Item = &JobSpec> {
        match self {
            Job::Single(spec) => std::slice::from_ref(spec).iter(),
            Job::Group { members, .. } => members.iter(),
        }
    }

    /// All input files across the leaf jobs.
    pub fn inputs(&self) -> impl Iterator<Item = &InputFile> {
        self.members().flat_map(|m| m.inputs.iter())
    }
}

// ── Demand overlay ────────────────────────────────────────────────

/// Additive resource demands attached during a selection call.
///
/// Jobs are owned by the caller; instead of mutating them, late-bound
/// costs are accumulated here, keyed by the candidate's id, and merged
/// into every subsequent demand read within the same call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceOverlay {
    extra: HashMap<JobId, HashMap<ResourceName, u64>>,
}

impl ResourceOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an additional demand to a job. Repeated attachments for the
    /// same resource accumulate.
    pub fn attach(&mut self, job: &str, resource: &str, amount: u64) {
        *self
            .extra
            .entry(job.to_string())
            .or_default()
            .entry(resource.to_string())
            .or_insert(0) += amount;
    }

    /// Extra demand attached to a job for one resource; 0 when none.
    pub fn extra(&self, job: &str, resource: &str) -> u64 {
        self.extra
            .get(job)
            .and_then(|by_res| by_res.get(resource))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.extra.is_empty()
    }
}
