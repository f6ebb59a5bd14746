//! Walks the configured image/channel matrix and collects the pairs whose
//! base images have moved on.

use chrono::Utc;

use crate::config::Config;
use crate::oracle::UpdateOracle;
use crate::report::{RunResult, UpdateCandidate};

pub struct BatchRunner {
    oracle: UpdateOracle,
}

impl BatchRunner {
    pub fn new(oracle: UpdateOracle) -> Self {
        Self { oracle }
    }

    /// One sequential pass: each (image, channel) pair is fully resolved
    /// before the next starts. Per-pair failures are absorbed inside the
    /// oracle, so this cannot fail once the config has parsed.
    pub fn run(&self, config: &Config) -> RunResult {
        let mut updates: Vec<UpdateCandidate> = Vec::new();
        for image in &config.images {
            for (channel, spec) in &image.channels {
                let base_ref = format!("{}:{}", image.base_image, spec.tag);
                let published = format!("{}/{}:{}", image.registry, image.name, channel);
                println!("Checking {}:{}...", image.name, channel);
                if self.oracle.decide(&base_ref, &published) {
                    println!("  Update needed for {}:{}", image.name, channel);
                    updates.push(UpdateCandidate {
                        name: image.name.clone(),
                        channel: channel.clone(),
                        tag: spec.tag.clone(),
                        base_image: image.base_image.clone(),
                        dockerfile: spec.dockerfile.clone(),
                        registry: image.registry.clone(),
                    });
                } else {
                    println!("  No update needed for {}:{}", image.name, channel);
                }
            }
        }
        let has_updates = !updates.is_empty();
        RunResult {
            timestamp: Utc::now(),
            updates,
            has_updates,
        }
    }
}
