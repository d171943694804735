use crate::domain::language::SourceKind;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "dist", "target", "coverage"];

pub struct SourceLoader;

impl SourceLoader {
    /// Expand a mix of files and folders into the list of convertible
    /// source files. Explicit files are kept even if their extension is not
    /// recognised (the caller decides what to do with them); folders are
    /// searched recursively for known extensions.
    pub fn collect(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_dir() {
                Self::collect_recursive(path, &mut files)?;
            } else if path.exists() {
                files.push(path.clone());
            } else {
                anyhow::bail!("Input path not found: {}", path.display());
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    fn collect_recursive(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        if let Some(name) = dir.file_name().and_then(|n| n.to_str()) {
            if SKIPPED_DIRS.contains(&name) {
                return Ok(());
            }
        }

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            // `file_type` does not follow links, so linked folders are never
            // descended into; linked files still count.
            if entry.file_type()?.is_dir() {
                Self::collect_recursive(&path, out)?;
            } else if path.is_file() && SourceKind::from_path(&path).is_some() {
                out.push(path);
            }
        }
        Ok(())
    }
}
