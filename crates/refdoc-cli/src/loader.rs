//! Catalogue discovery and loading

use anyhow::{Context, Result};
use refdoc_core::{Catalogue, Registry, RegistryBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CATALOGUE_EXTENSION: &str = "toml";

/// Collect catalogue files under a path.
///
/// A file is taken as is. A directory is searched recursively for `*.toml`
/// files, skipping hidden directories; results are sorted per directory so
/// registration order does not depend on the filesystem.
pub fn collect_catalogue_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("Path '{}' does not exist", path.display());
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(path)
        .with_context(|| format!("Failed to read directory '{}'", path.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("Failed to read directory '{}'", path.display()))?;
    entries.sort();

    let mut files = Vec::new();
    for entry in entries {
        if entry.is_file() {
            if entry.extension().is_some_and(|ext| ext == CATALOGUE_EXTENSION) {
                files.push(entry);
            }
        } else if entry.is_dir() {
            let hidden = entry
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'));
            if !hidden {
                files.extend(collect_catalogue_files(&entry)?);
            }
        }
    }

    Ok(files)
}

/// Load every catalogue under the given paths into a frozen registry
pub fn load_registry(paths: &[PathBuf]) -> Result<Registry> {
    let mut files = Vec::new();
    for path in paths {
        files.extend(collect_catalogue_files(path)?);
    }
    if files.is_empty() {
        anyhow::bail!("No catalogue files found");
    }

    let mut builder = RegistryBuilder::new();
    for file in &files {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read '{}'", file.display()))?;
        let catalogue = Catalogue::parse(&content)
            .with_context(|| format!("Invalid catalogue '{}'", file.display()))?;

        debug!(
            file = %file.display(),
            functions = catalogue.functions.len(),
            protocols = catalogue.protocols.len(),
            "loaded catalogue"
        );
        catalogue
            .register_into(&mut builder)
            .with_context(|| format!("Failed to register '{}'", file.display()))?;
    }

    info!(files = files.len(), "catalogue loaded");
    builder.freeze().context("Invalid catalogue")
}
