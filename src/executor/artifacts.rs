//! HTML artifact relocation
//!
//! Suites that write their HTML reports inside their own build tree get them
//! copied into the shared reports area after a successful run.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Replace `target` with a copy of `source`.
///
/// The copy is staged in a sibling directory and swapped in with a rename,
/// so a reader never observes a half-copied tree. Each suite kind owns its
/// own target subdirectory; concurrent relocations to different targets do
/// not interfere.
pub fn relocate_dir(source: &Path, target: &Path) -> Result<()> {
    let parent = target
        .parent()
        .context("relocation target has no parent directory")?;
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;

    let staging = parent.join(format!(
        ".{}.staging",
        target
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("artifact")
    ));
    if staging.exists() {
        fs::remove_dir_all(&staging)
            .with_context(|| format!("failed to clear stale staging {}", staging.display()))?;
    }

    copy_dir_recursive(source, &staging)?;

    if target.exists() {
        fs::remove_dir_all(target)
            .with_context(|| format!("failed to remove previous copy {}", target.display()))?;
    }
    fs::rename(&staging, target).with_context(|| {
        format!(
            "failed to move {} into place at {}",
            staging.display(),
            target.display()
        )
    })?;

    Ok(())
}

fn copy_dir_recursive(source: &Path, target: &Path) -> Result<()> {
    fs::create_dir_all(target)
        .with_context(|| format!("failed to create {}", target.display()))?;

    for entry in fs::read_dir(source)
        .with_context(|| format!("failed to read {}", source.display()))?
    {
        let entry = entry?;
        let dest = target.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &dest)?;
        } else {
            fs::copy(entry.path(), &dest).with_context(|| {
                format!("failed to copy {} to {}", entry.path().display(), dest.display())
            })?;
        }
    }

    Ok(())
}
