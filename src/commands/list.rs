use anyhow::Result;
use log::debug;

use crate::manager::{ManagerOptions, PackageManager, PackageReference};
use crate::runtime::Runtime;

/// List the dependencies declared in the manifest
#[tracing::instrument(skip(runtime, options))]
pub fn list<R: Runtime>(runtime: &R, options: ManagerOptions) -> Result<()> {
    let manager = PackageManager::new(runtime, options)?;
    let packages = manager.installed_packages()?;

    if packages.is_empty() {
        println!("No dependencies declared.");
        return Ok(());
    }

    debug!("Found {} dependency(ies)", packages.len());

    for package in packages {
        print_package(&package);
    }

    Ok(())
}

fn print_package(package: &PackageReference) {
    if package.version.is_empty() {
        println!("{} (any)", package.id);
    } else {
        println!("{} {}", package.id, package.version);
    }
}
