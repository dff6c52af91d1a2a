use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn reconcile_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".reconcile"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(reconcile_home()?.join("config.toml"))
}
