//! The update decision: diff-based checker first, Docker Hub age heuristic
//! second, and "assume stale" when neither can answer.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::exec::{container_runtime_path, run_with_timeout};
use crate::registry::{split_image_ref, TagMetadata};

pub const CHECKER_IMAGE: &str = "lucacome/docker-image-update-checker:latest";
const CHECKER_TIMEOUT: Duration = Duration::from_secs(60);
/// An image whose tag was last pushed more than this many days ago is
/// considered stale by the fallback heuristic. Strictly greater-than: an
/// exactly seven-day-old tag is not flagged.
const STALE_AFTER_DAYS: i64 = 7;

/// Runs the layer-diff checker for one (base, published) pair.
pub trait CheckerExec {
    fn needs_updating(&self, base_image: &str, published: &str) -> Result<bool>;
}

#[derive(Deserialize)]
struct CheckerVerdict {
    needs_updating: Option<bool>,
}

/// Invokes the checker image through the local container runtime.
pub struct DockerChecker;

impl CheckerExec for DockerChecker {
    fn needs_updating(&self, base_image: &str, published: &str) -> Result<bool> {
        // Resolved per call so a missing runtime is just another fallback
        // trigger rather than a startup failure.
        let runtime = container_runtime_path().context("container runtime unavailable")?;
        let out = run_with_timeout(
            &runtime,
            &[
                "run",
                "--rm",
                CHECKER_IMAGE,
                "--base-image",
                base_image,
                "--image",
                published,
                "--output",
                "json",
            ],
            CHECKER_TIMEOUT,
        )?;
        if !out.status.success() {
            bail!(
                "checker exited with {:?}: {}",
                out.status.code(),
                out.stderr.trim()
            );
        }
        let verdict: CheckerVerdict =
            serde_json::from_str(&out.stdout).context("checker produced unparseable output")?;
        Ok(verdict.needs_updating.unwrap_or(false))
    }
}

/// Decides whether one published image needs a rebuild against its base.
///
/// `decide` never fails: every error below it collapses into a boolean, so a
/// broken runtime or flaky network can never abort a batch.
pub struct UpdateOracle {
    checker: Box<dyn CheckerExec>,
    hub: Box<dyn TagMetadata>,
}

impl UpdateOracle {
    pub fn new(checker: Box<dyn CheckerExec>, hub: Box<dyn TagMetadata>) -> Self {
        Self { checker, hub }
    }

    pub fn decide(&self, base_image: &str, published: &str) -> bool {
        self.decide_at(base_image, published, Utc::now())
    }

    fn decide_at(&self, base_image: &str, published: &str, now: DateTime<Utc>) -> bool {
        // Primary: ask the checker. Any failure (spawn, timeout, non-zero
        // exit, bad JSON) falls through to the Hub heuristic.
        if let Ok(verdict) = self.checker.needs_updating(base_image, published) {
            return verdict;
        }
        // Secondary: how long ago was the pinned base tag pushed?
        let (repo, tag) = split_image_ref(base_image);
        match self.hub.last_updated(repo, tag) {
            Ok(pushed) => now - pushed > chrono::Duration::days(STALE_AFTER_DAYS),
            // Cannot determine the true state: assume an update is needed.
            Err(_) => true,
        }
    }
}
