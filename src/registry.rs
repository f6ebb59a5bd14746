//! Docker Hub tag metadata, used as the fallback freshness signal when the
//! diff-based checker is unavailable.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const HUB_TIMEOUT: Duration = Duration::from_secs(10);

/// Split `repo[:tag]` into repository and tag, defaulting to `latest`.
pub fn split_image_ref(image: &str) -> (&str, &str) {
    match image.split_once(':') {
        Some((repo, tag)) => (repo, tag),
        None => (image, "latest"),
    }
}

/// Source of per-tag publish metadata for a base image.
pub trait TagMetadata {
    fn last_updated(&self, repo: &str, tag: &str) -> Result<DateTime<Utc>>;
}

#[derive(Deserialize)]
struct TagInfo {
    last_updated: String,
}

/// Queries the public Docker Hub v2 repositories API.
pub struct DockerHub {
    client: reqwest::blocking::Client,
}

impl DockerHub {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HUB_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl TagMetadata for DockerHub {
    fn last_updated(&self, repo: &str, tag: &str) -> Result<DateTime<Utc>> {
        let url = format!("https://hub.docker.com/v2/repositories/{repo}/tags/{tag}/");
        let resp = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("GET {url} failed"))?;
        if resp.status() != reqwest::StatusCode::OK {
            bail!("GET {url} returned status {}", resp.status());
        }
        let info: TagInfo = resp
            .json()
            .with_context(|| format!("invalid JSON body from {url}"))?;
        // `Z`-suffixed timestamps parse as UTC here without the manual
        // offset rewrite some Hub clients do.
        let ts = DateTime::parse_from_rfc3339(&info.last_updated)
            .with_context(|| format!("unparseable last_updated {:?}", info.last_updated))?;
        Ok(ts.with_timezone(&Utc))
    }
}
