//! Resource and input-file types for the flowpack job model.
//!
//! Resource amounts are either numeric counts (comparable, summable) or
//! symbolic text values (matchable only). Input files carry string flags;
//! the scheduler cares about the `temp` flag when ranking jobs.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Name of a resource dimension ("cpu", "mem_mb", "disk_mb", ...).
pub type ResourceName = String;

/// Unique identifier for a job within one scheduling tick.
pub type JobId = String;

/// Flag marking an input file as temporary.
pub const TEMP_FLAG: &str = "temp";

// ── Resources ─────────────────────────────────────────────────────

/// A resource amount: a numeric count or a symbolic text value.
///
/// Numeric counts participate in capacity arithmetic. Text values (e.g.
/// a GPU model constraint) carry no arithmetic meaning — the packer treats
/// text capacity entries as non-constraining.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ResourceValue {
    Count(u64),
    Text(String),
}

impl ResourceValue {
    /// Numeric view of this value, `None` for text.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            ResourceValue::Count(n) => Some(*n),
            ResourceValue::Text(_) => None,
        }
    }
}

impl From<u64> for ResourceValue {
    fn from(n: u64) -> Self {
        ResourceValue::Count(n)
    }
}

impl From<&str> for ResourceValue {
    fn from(s: &str) -> Self {
        ResourceValue::Text(s.to_string())
    }
}

/// Resource-name → amount mapping.
///
/// Used both for a job's declared demand (missing entries mean zero
/// demand) and for the capacity available in the current tick (immutable
/// for the duration of one selection call).
pub type ResourceMap = HashMap<ResourceName, ResourceValue>;

// ── Input files ───────────────────────────────────────────────────

/// An input file reference with string flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputFile {
    pub path: String,
    /// Flags attached to this file ("temp", ...).
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub flags: BTreeSet<String>,
}

impl InputFile {
    /// An unflagged input file.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            flags: BTreeSet::new(),
        }
    }

    /// An input file flagged as temporary.
    pub fn temp(path: impl Into<String>) -> Self {
        let mut file = Self::new(path);
        file.flags.insert(TEMP_FLAG.to_string());
        file
    }

    pub fn is_flagged(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }
}

// ── Input sizes ───────────────────────────────────────────────────

/// Byte sizes for input files, keyed by path.
///
/// The caller builds this once per selection call (size lookups may be
/// expensive I/O; batching them is the caller's contract). Unknown sizes
/// are stored as `None` and read back as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSizes {
    sizes: HashMap<String, Option<u64>>,
}

impl InputSizes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the size of a file, `None` when unknown.
    pub fn insert(&mut self, path: impl Into<String>, size: Option<u64>) {
        self.sizes.insert(path.into(), size);
    }

    /// Size of an input file in bytes; 0 when unknown or missing.
    pub fn size_of(&self, file: &InputFile) -> u64 {
        self.sizes.get(&file.path).copied().flatten().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl FromIterator<(String, Option<u64>)> for InputSizes {
    fn from_iter<I: IntoIterator<Item = (String, Option<u64>)>>(iter: I) -> Self {
        Self {
            sizes: iter.into_iter().collect(),
        }
    }
}
