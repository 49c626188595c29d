use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::ManagerError;
use crate::runtime::Runtime;

/// Well-known manifest filename within the project root.
pub const MANIFEST_FILE_NAME: &str = "project.json";

/// Locates the manifest file for a project root.
///
/// Exactly one candidate is expected; fails with
/// [`ManagerError::ManifestNotFound`] when the file does not exist.
#[tracing::instrument(skip(runtime, project_root))]
pub fn locate<R: Runtime>(runtime: &R, project_root: &Path) -> Result<PathBuf> {
    let path = project_root.join(MANIFEST_FILE_NAME);
    debug!("Locating manifest at {:?}", path);

    if !runtime.exists(&path) {
        return Err(ManagerError::ManifestNotFound(path).into());
    }

    Ok(path)
}
