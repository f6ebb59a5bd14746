//! Run results and the three ways they leave the process: a human summary on
//! stdout, key/value pairs for the invoking automation, and a JSON file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One (image, channel) pair that needs a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCandidate {
    pub name: String,
    pub channel: String,
    pub tag: String,
    pub base_image: String,
    pub dockerfile: PathBuf,
    pub registry: String,
}

/// Outcome of one full pass over the image matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub timestamp: DateTime<Utc>,
    pub updates: Vec<UpdateCandidate>,
    pub has_updates: bool,
}

pub fn summary_lines(result: &RunResult) -> Vec<String> {
    if !result.has_updates {
        return vec!["No updates needed".to_string()];
    }
    let mut lines = vec![format!(
        "Found {} images that need updates:",
        result.updates.len()
    )];
    for u in &result.updates {
        lines.push(format!("  - {}:{} (base: {})", u.name, u.channel, u.base_image));
    }
    lines
}

pub fn print_summary(result: &RunResult) {
    println!();
    for line in summary_lines(result) {
        println!("{line}");
    }
}

/// Emits key/value pairs for the invoking automation to consume.
pub trait CiEmitter {
    fn emit(&self, key: &str, value: &str) -> Result<()>;
}

/// Legacy GitHub Actions workflow commands, printed to stdout.
pub struct SetOutputEmitter;

impl CiEmitter for SetOutputEmitter {
    fn emit(&self, key: &str, value: &str) -> Result<()> {
        println!("::set-output name={key}::{value}");
        Ok(())
    }
}

/// The successor protocol: `key=value` lines appended to the file GitHub
/// names in `$GITHUB_OUTPUT`.
pub struct GithubOutputFile {
    path: PathBuf,
}

impl GithubOutputFile {
    pub fn from_env() -> Option<Self> {
        std::env::var_os("GITHUB_OUTPUT").map(|p| Self { path: p.into() })
    }
}

impl CiEmitter for GithubOutputFile {
    fn emit(&self, key: &str, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        writeln!(file, "{key}={value}")
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

pub struct NullEmitter;

impl CiEmitter for NullEmitter {
    fn emit(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}

/// Emit `has_updates`, and when true a JSON-encoded `updates` list.
pub fn emit_ci_outputs(result: &RunResult, emitter: &dyn CiEmitter) -> Result<()> {
    emitter.emit("has_updates", if result.has_updates { "true" } else { "false" })?;
    if result.has_updates {
        let payload =
            serde_json::to_string(&result.updates).context("failed to encode updates list")?;
        emitter.emit("updates", &payload)?;
    }
    Ok(())
}

/// Overwrite `path` with the full run result as pretty JSON.
pub fn write_results(result: &RunResult, path: &Path) -> Result<()> {
    let body = serde_json::to_string_pretty(result).context("failed to encode run result")?;
    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}
