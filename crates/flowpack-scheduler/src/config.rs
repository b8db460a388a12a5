//! Selector configuration.
//!
//! Loaded once at startup (TOML file or built in code) and held immutable
//! for the lifetime of the selector. Invalid configurations are rejected
//! at construction — a `JobSelector` cannot exist in an invalid state.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SelectorError, SelectorResult};

/// Configuration for the job selector.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SelectorConfig {
    /// Greediness of the candidate pre-filter, in `[0, 1]`.
    ///
    /// `0.0` evaluates the whole candidate pool; `1.0` evaluates at most
    /// the rate-limiter's max-jobs-per-interval window. Values in between
    /// interpolate linearly. Unset disables the pre-filter entirely:
    /// every candidate is evaluated, still in reward order.
    #[serde(default)]
    pub greediness: Option<f64>,

    /// Rank candidates by priority alone.
    ///
    /// By default the sizes of temp-flagged and regular input files are
    /// factored into the ranking: temp files should be freed as soon as
    /// possible, and jobs with large inputs take longer, so both are
    /// started earlier.
    #[serde(default)]
    pub omit_prioritize_by_temp_and_input: bool,
}

impl SelectorConfig {
    /// Check configuration invariants.
    ///
    /// Greediness outside `[0, 1]` (including NaN) is rejected.
    pub fn validate(&self) -> SelectorResult<()> {
        if let Some(g) = self.greediness
            && !(0.0..=1.0).contains(&g)
        {
            return Err(SelectorError::GreedinessOutOfRange(g));
        }
        Ok(())
    }

    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SelectorConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
