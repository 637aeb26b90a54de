//! Walker error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while constructing a walker or walking a tree.
///
/// `Clone` is required because the walk result is memoized per walker
/// instance and handed out to every caller, failures included. IO and JSON
/// failures are therefore carried as rendered messages rather than source
/// errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    /// The walker was constructed with an unusable root path.
    #[error("a non-empty root module path must be provided")]
    InvalidRoot,

    /// A required dependency could not be located at any ancestor level.
    ///
    /// This normally means the installation is broken: either the package
    /// was deleted after install or the install itself failed. The rest of
    /// the graph cannot be trusted, so no partial result is produced.
    #[error("failed to locate module \"{name}\" from \"{}\"", searched_from.display())]
    ModuleNotFound {
        name: String,
        searched_from: PathBuf,
    },

    /// A manifest file exists but could not be read.
    #[error("failed to read manifest at {}: {message}", path.display())]
    ManifestRead { path: PathBuf, message: String },

    /// A manifest file exists but is not valid JSON of the expected shape.
    #[error("failed to parse manifest at {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },
}

impl WalkError {
    #[must_use]
    pub fn module_not_found(name: &str, searched_from: &std::path::Path) -> Self {
        Self::ModuleNotFound {
            name: name.to_string(),
            searched_from: searched_from.to_path_buf(),
        }
    }
}
