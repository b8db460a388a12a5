//! `flowpack select` — run one selection tick from a manifest file.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use flowpack_core::{InputSizes, Job, ResourceMap, ResourceOverlay};
use flowpack_scheduler::{JobSelector, SelectionRequest, SelectorConfig};

/// One tick's input as a workflow engine would prepare it, dumped to JSON.
#[derive(Debug, Deserialize)]
pub struct TickManifest {
    /// Jobs eligible to run right now.
    #[serde(default)]
    pub selectable: Vec<Job>,
    /// All jobs still pending, including the selectable ones.
    #[serde(default)]
    pub remaining: Vec<Job>,
    /// Resource budgets for this tick.
    pub available_resources: ResourceMap,
    /// Input-file sizes, resolved by the engine in one batched lookup.
    #[serde(default)]
    pub input_sizes: InputSizes,
    /// Late-bound demands attached to jobs for this tick.
    #[serde(default)]
    pub overlay: ResourceOverlay,
    /// The rate limiter's max-jobs-per-interval reading.
    #[serde(default)]
    pub max_jobs_per_interval: Option<usize>,
}

pub fn run(manifest_path: &str, config_path: Option<&str>, format: &str) -> anyhow::Result<()> {
    let manifest = load_manifest(Path::new(manifest_path))?;
    let config = match config_path {
        Some(path) => SelectorConfig::from_file(Path::new(path))?,
        None => SelectorConfig::default(),
    };

    let selector = JobSelector::new(config)?;
    let selected = selector
        .select_jobs(SelectionRequest {
            selectable: manifest.selectable,
            remaining: manifest.remaining,
            available: manifest.available_resources,
            input_sizes: manifest.input_sizes,
            overlay: manifest.overlay,
            max_jobs_hint: manifest.max_jobs_per_interval,
        })
        .context("selection failed; the engine should fall back to its default policy")?;

    info!(admitted = selected.len(), "selection complete");

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&selected)?),
        _ => {
            if selected.is_empty() {
                println!("no jobs fit the available resources");
            } else {
                for job in &selected {
                    println!("{}", job.id());
                }
            }
        }
    }

    Ok(())
}

fn load_manifest(path: &Path) -> anyhow::Result<TickManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing manifest {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MANIFEST: &str = r#"{
        "selectable": [
            {"kind": "single", "id": "align", "priority": 5, "resources": {"cpu": 3}},
            {"kind": "single", "id": "sort", "priority": 1, "resources": {"cpu": 3}}
        ],
        "available_resources": {"cpu": 4, "gpu_model": "a100"},
        "input_sizes": {"reads.fq": 1024},
        "max_jobs_per_interval": 100
    }"#;

    fn write_manifest(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn manifest_parses_jobs_and_resources() {
        let file = write_manifest(MANIFEST);
        let manifest = load_manifest(file.path()).unwrap();

        assert_eq!(manifest.selectable.len(), 2);
        assert_eq!(manifest.selectable[0].id(), "align");
        assert_eq!(manifest.max_jobs_per_interval, Some(100));
        assert!(manifest.remaining.is_empty());
        assert!(manifest.overlay.is_empty());
    }

    #[test]
    fn missing_manifest_is_an_error() {
        assert!(load_manifest(Path::new("/nonexistent/tick.json")).is_err());
    }

    #[test]
    fn select_runs_end_to_end() {
        let file = write_manifest(MANIFEST);
        run(file.path().to_str().unwrap(), None, "text").unwrap();
    }

    #[test]
    fn select_rejects_invalid_config() {
        let manifest = write_manifest(MANIFEST);
        let mut config = tempfile::NamedTempFile::new().unwrap();
        writeln!(config, "greediness = 7.0").unwrap();

        let result = run(
            manifest.path().to_str().unwrap(),
            Some(config.path().to_str().unwrap()),
            "text",
        );
        assert!(result.is_err());
    }
}
