use anyhow::Result;
use log::debug;

use crate::manager::{ManagerOptions, PackageManager};
use crate::runtime::Runtime;

/// Search the feed and print matching packages
#[tracing::instrument(skip(runtime, options))]
pub async fn search<R: Runtime>(runtime: &R, term: &str, options: ManagerOptions) -> Result<()> {
    debug!("Searching for '{}'", term);

    let manager = PackageManager::new(runtime, options)?;
    let hits = manager.search_packages(term).await;

    if hits.is_empty() {
        println!("No packages found for '{}'.", term);
        return Ok(());
    }

    for hit in hits {
        match hit.description.as_deref() {
            Some(description) if !description.is_empty() => {
                println!("{} {}: {}", hit.id, hit.version, description);
            }
            _ => println!("{} {}", hit.id, hit.version),
        }
    }

    Ok(())
}
