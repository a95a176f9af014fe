use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use tempo_core::{Folder, Task};

/// Store directory: `$TEMPO_HOME` if set (tests point this at a temp dir),
/// otherwise `~/.tempo`.
pub fn tempo_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TEMPO_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tempo"))
}

pub fn ensure_tempo_home() -> Result<PathBuf> {
    let dir = tempo_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn store_path() -> Result<PathBuf> {
    Ok(ensure_tempo_home()?.join("tasks.json"))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Store {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub folders: Vec<Folder>,
}

pub fn read_store() -> Result<Store> {
    let p = store_path()?;
    if !p.exists() {
        return Ok(Store::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn write_store(store: &Store) -> Result<()> {
    let p = store_path()?;
    let json = serde_json::to_string_pretty(store)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Next free id with the given prefix ("t" for tasks, "f" for folders).
pub fn next_id(prefix: &str, existing: impl Iterator<Item = String>) -> String {
    let max = existing
        .filter_map(|id| id.strip_prefix(prefix).and_then(|n| n.parse::<u64>().ok()))
        .max()
        .unwrap_or(0);
    format!("{prefix}{}", max + 1)
}
