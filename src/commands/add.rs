use anyhow::Result;
use log::debug;

use crate::manager::{ManagerOptions, PackageManager, PackageReference};
use crate::manifest::MANIFEST_FILE_NAME;
use crate::runtime::Runtime;

/// Record a dependency in the manifest
#[tracing::instrument(skip(runtime, options))]
pub async fn add<R: Runtime>(
    runtime: &R,
    id: &str,
    version: Option<&str>,
    options: ManagerOptions,
) -> Result<()> {
    debug!("Adding {} version={:?}", id, version);

    let reference = PackageReference::new(id, version.unwrap_or_default());
    let manager = PackageManager::new(runtime, options)?;
    manager.add_package(&reference).await?;

    println!("Added {} to {}.", reference, MANIFEST_FILE_NAME);
    Ok(())
}
