//! Manifest (package.json) loading.
//!
//! The walker only cares about a package's name and its three dependency
//! sections; everything else in the manifest is ignored. Absent sections
//! are normalized to empty maps so callers never branch on presence.

use crate::error::WalkError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A raw semver range string. Never interpreted, only carried.
pub type VersionRange = String;

/// The subset of package.json the walker reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Declared package name. Some leftover install artifacts omit it.
    #[serde(default)]
    pub name: String,
    /// Production dependencies.
    #[serde(default)]
    pub dependencies: BTreeMap<String, VersionRange>,
    /// Development dependencies. Only walked for the root package.
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, VersionRange>,
    /// Optional dependencies. May legitimately repeat names from
    /// `dependencies`; the optional declaration wins for those edges.
    #[serde(default)]
    pub optional_dependencies: BTreeMap<String, VersionRange>,
}

/// Load the manifest for the package rooted at `module_path`.
///
/// Returns `Ok(None)` when no package.json exists there at all; a missing
/// manifest is an expected state (package managers leave incomplete
/// directories behind), not an error. Read and parse failures on a file
/// that does exist are fatal and propagate.
pub fn load_manifest(module_path: &Path) -> Result<Option<Manifest>, WalkError> {
    let manifest_path = module_path.join("package.json");
    if !manifest_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&manifest_path).map_err(|e| WalkError::ManifestRead {
        path: manifest_path.clone(),
        message: e.to_string(),
    })?;

    let manifest: Manifest =
        serde_json::from_str(&content).map_err(|e| WalkError::ManifestParse {
            path: manifest_path,
            message: e.to_string(),
        })?;

    Ok(Some(manifest))
}
