//! Native build tooling detection.
//!
//! Classifies whether an installed package appears to need native build
//! tooling: fetching a prebuilt binary at install time, compiling from
//! source via a gyp descriptor, or neither.

use crate::manifest::Manifest;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a package obtains its native code, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeBuildKind {
    /// Depends on `prebuild-install`, which downloads a prebuilt binary.
    PrebuiltBinary,
    /// Ships a `binding.gyp`, so node-gyp compiles it from source.
    CompiledFromSource,
    /// Plain JavaScript, nothing to build.
    None,
}

impl std::fmt::Display for NativeBuildKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrebuiltBinary => write!(f, "prebuilt-binary"),
            Self::CompiledFromSource => write!(f, "compiled-from-source"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Classify the package at `module_path` with its loaded manifest.
///
/// Pure apart from the `binding.gyp` existence check; fixed at discovery
/// time and never revised.
#[must_use]
pub fn detect_native_build(module_path: &Path, manifest: &Manifest) -> NativeBuildKind {
    if manifest.dependencies.contains_key("prebuild-install") {
        NativeBuildKind::PrebuiltBinary
    } else if module_path.join("binding.gyp").exists() {
        NativeBuildKind::CompiledFromSource
    } else {
        NativeBuildKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn manifest_with_deps(deps: &[(&str, &str)]) -> Manifest {
        Manifest {
            name: "fixture".to_string(),
            dependencies: deps
                .iter()
                .map(|(n, v)| ((*n).to_string(), (*v).to_string()))
                .collect(),
            ..Manifest::default()
        }
    }

    #[test]
    fn test_prebuild_install_dependency_means_prebuilt_binary() {
        let dir = tempdir().unwrap();
        let manifest = manifest_with_deps(&[("prebuild-install", "^7.0.0")]);
        assert_eq!(
            detect_native_build(dir.path(), &manifest),
            NativeBuildKind::PrebuiltBinary
        );
    }

    #[test]
    fn test_binding_gyp_means_compiled_from_source() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("binding.gyp"), "{ 'targets': [] }").unwrap();
        let manifest = manifest_with_deps(&[]);
        assert_eq!(
            detect_native_build(dir.path(), &manifest),
            NativeBuildKind::CompiledFromSource
        );
    }

    #[test]
    fn test_prebuild_wins_over_binding_gyp() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("binding.gyp"), "{ 'targets': [] }").unwrap();
        let manifest = manifest_with_deps(&[("prebuild-install", "^7.0.0")]);
        assert_eq!(
            detect_native_build(dir.path(), &manifest),
            NativeBuildKind::PrebuiltBinary
        );
    }

    #[test]
    fn test_plain_javascript_is_none() {
        let dir = tempdir().unwrap();
        let manifest = manifest_with_deps(&[("left-pad", "^1.3.0")]);
        assert_eq!(
            detect_native_build(dir.path(), &manifest),
            NativeBuildKind::None
        );
    }
}
