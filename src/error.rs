//! Error taxonomy for manager operations.

use std::path::PathBuf;

/// Errors with a contractual meaning to callers.
///
/// These are carried inside [`anyhow::Error`] and recovered with
/// `downcast_ref` where callers need to branch on the kind.
#[derive(Debug, Clone)]
pub enum ManagerError {
    /// Feed unreachable or the discovery document has no search resource
    Discovery(String),
    /// No manifest file in the project root
    ManifestNotFound(PathBuf),
    /// Manifest present but not valid JSON or not a JSON object
    ManifestParse(String),
    /// Remove target is not a declared dependency
    PackageNotFound(String),
}

impl std::fmt::Display for ManagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManagerError::Discovery(msg) => {
                write!(f, "Feed discovery failed: {}", msg)
            }
            ManagerError::ManifestNotFound(path) => {
                write!(f, "No manifest found at {}", path.display())
            }
            ManagerError::ManifestParse(msg) => {
                write!(f, "Invalid manifest: {}", msg)
            }
            ManagerError::PackageNotFound(id) => {
                write!(f, "Package '{}' is not a declared dependency", id)
            }
        }
    }
}

impl std::error::Error for ManagerError {}
