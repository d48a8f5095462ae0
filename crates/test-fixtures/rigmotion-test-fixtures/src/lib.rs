use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    motions: HashMap<String, MotionEntry>,
}

/// A motion file plus the manifest-level settings the model file would carry.
#[derive(Debug, Clone, Deserialize)]
pub struct MotionEntry {
    pub file: String,
    #[serde(rename = "FadeInTime", default)]
    pub fade_in_time: Option<f64>,
    #[serde(rename = "FadeOutTime", default)]
    pub fade_out_time: Option<f64>,
    #[serde(rename = "Sound", default)]
    pub sound: Option<String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod motions {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.motions.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn entry(name: &str) -> Result<MotionEntry> {
        lookup(&MANIFEST.motions, "motion", name).cloned()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.motions, "motion", name)?;
        read_to_string(&entry.file)
    }
}
