use anyhow::Result;
use log::debug;

use crate::manager::{ManagerOptions, PackageManager, PackageReference};
use crate::manifest::MANIFEST_FILE_NAME;
use crate::runtime::Runtime;

/// Remove a dependency from the manifest
#[tracing::instrument(skip(runtime, options))]
pub async fn remove<R: Runtime>(runtime: &R, id: &str, options: ManagerOptions) -> Result<()> {
    debug!("Removing {}", id);

    let reference = PackageReference::new(id, "");
    let manager = PackageManager::new(runtime, options)?;
    manager.remove_package(&reference).await?;

    println!("Removed {} from {}.", id, MANIFEST_FILE_NAME);
    Ok(())
}
