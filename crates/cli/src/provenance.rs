//! Provenance records written next to every CLI artifact.
//!
//! `hull.json` gets `hull.provenance.json`, `points.csv` gets
//! `points.provenance.json`. The record names the command and its typed
//! parameters so a hull can be traced back to the point set and seed it came from.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced the artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Origin {
    Run {
        algo: &'static str,
        input: String,
        input_points: usize,
        distinct_points: usize,
        shape: &'static str,
        hull_vertices: usize,
    },
    Sample {
        seed: u64,
        requested: usize,
        accepted: usize,
        width: f64,
        height: f64,
        min_separation: f64,
        integral: bool,
    },
}

#[derive(Debug, Serialize)]
struct Record<'a> {
    code_rev: String,
    engine_version: &'static str,
    tag: Option<&'a str>,
    artifact: String,
    #[serde(flatten)]
    origin: &'a Origin,
}

/// Sidecar path: the artifact's extension replaced by `provenance.json`.
pub fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Write the provenance record for `artifact` and return its path.
pub fn record(artifact: &Path, tag: Option<&str>, origin: &Origin) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    let rec = Record {
        code_rev: code_rev(),
        engine_version: planar_hull::VERSION,
        tag,
        artifact: artifact.display().to_string(),
        origin,
    };
    std::fs::write(&path, serde_json::to_vec_pretty(&rec)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(sidecar = %path.display(), "provenance recorded");
    Ok(path)
}

/// `GIT_COMMIT` if set, else the short `git rev-parse`, else "unknown".
pub fn code_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            let out = Command::new("git")
                .args(["rev-parse", "--short=12", "HEAD"])
                .output()
                .ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn sidecar_replaces_extension() {
        assert_eq!(
            sidecar_path(Path::new("out/hull.json")),
            Path::new("out/hull.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("points.csv")),
            Path::new("points.provenance.json")
        );
    }

    #[test]
    fn sample_record_is_flat_and_typed() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("points.csv");
        let origin = Origin::Sample {
            seed: 3,
            requested: 30,
            accepted: 27,
            width: 800.0,
            height: 450.0,
            min_separation: 12.0,
            integral: true,
        };
        let path = record(&artifact, Some("t1"), &origin).unwrap();
        let doc: Value = serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(doc["command"], "sample");
        assert_eq!(doc["accepted"], 27);
        assert_eq!(doc["integral"], true);
        assert_eq!(doc["tag"], "t1");
        assert_eq!(doc["engine_version"], planar_hull::VERSION);
        assert_eq!(doc["artifact"], artifact.display().to_string());
    }
}
