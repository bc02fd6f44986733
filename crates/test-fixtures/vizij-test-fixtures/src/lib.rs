use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    actions: HashMap<String, ActionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ActionEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        duration: Option<f32>,
    },
}

impl ActionEntry {
    fn as_path(&self) -> &str {
        match self {
            ActionEntry::Path(path) => path,
            ActionEntry::Detailed { path, .. } => path,
        }
    }

    fn duration(&self) -> Option<f32> {
        match self {
            ActionEntry::Path(_) => None,
            ActionEntry::Detailed { duration, .. } => *duration,
        }
    }
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

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod actions {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.actions.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.actions, "action", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.actions, "action", name)?;
        super::load_json(entry.as_path())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.actions, "action", name)?;
        Ok(resolve_path(entry.as_path()))
    }

    /// Expected total duration recorded in the manifest, if any.
    pub fn expected_duration(name: &str) -> Result<Option<f32>> {
        let entry = lookup(&MANIFEST.actions, "action", name)?;
        Ok(entry.duration())
    }
}
