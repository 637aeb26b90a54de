//! Recursive node_modules tree walker.
//!
//! Resolves every declared dependency of a root package to its physical
//! on-disk location using the hoisting lookup rules, classifies each
//! discovered package by the strongest relationship it is reached with, and
//! flags native build tooling. One record is kept per physical path; a
//! path reached along several declaration chains is merged, not repeated.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Serialize;
use tracing::debug;

use crate::error::WalkError;
use crate::manifest::load_manifest;
use crate::native::{detect_native_build, NativeBuildKind};
use crate::relationship::{DepCategory, DepRelationship, DepRequirement};

/// One physical package discovered during a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// On-disk location. The unit of identity: two declaration edges that
    /// resolve here are the same module.
    pub path: PathBuf,
    /// Declared name from the package's own manifest.
    pub name: String,
    /// Strongest relationship this path has been reached with so far.
    pub relationship: DepRelationship,
    /// Native build classification, fixed at discovery time.
    pub native_build_kind: NativeBuildKind,
}

#[derive(Default)]
struct WalkState {
    modules: Vec<Module>,
    visited: HashSet<PathBuf>,
}

/// Walks the installed dependency tree beneath a root package.
///
/// The walk runs at most once per instance: the first `walk_tree` call
/// computes and stores the result, later calls (and concurrent callers
/// blocked on the first computation) all receive the same stored result.
#[derive(Debug)]
pub struct Walker {
    root_module: PathBuf,
    cache: OnceLock<Result<Vec<Module>, WalkError>>,
}

impl Walker {
    /// Create a walker bound to the package directory at `module_path`.
    pub fn new(module_path: impl Into<PathBuf>) -> Result<Self, WalkError> {
        let root_module = module_path.into();
        if root_module.as_os_str().is_empty() {
            return Err(WalkError::InvalidRoot);
        }
        debug!(root = %root_module.display(), "creating walker");
        Ok(Self {
            root_module,
            cache: OnceLock::new(),
        })
    }

    /// The root package directory this walker is bound to.
    #[must_use]
    pub fn root_module(&self) -> &Path {
        &self.root_module
    }

    /// Walk the tree, or return the already-computed result.
    ///
    /// Modules are in discovery order (first-visited-first), the root
    /// package itself first. Fails when a required dependency cannot be
    /// located at any ancestor level; a failure is memoized like a success.
    pub fn walk_tree(&self) -> Result<&[Module], WalkError> {
        debug!("starting tree walk");
        match self.cache.get_or_init(|| self.walk_uncached()) {
            Ok(modules) => Ok(modules),
            Err(e) => Err(e.clone()),
        }
    }

    fn walk_uncached(&self) -> Result<Vec<Module>, WalkError> {
        let mut state = WalkState::default();
        let seed = DepRelationship::new(DepCategory::Root, DepRequirement::Required);
        self.visit_module(&mut state, &self.root_module, seed)?;
        Ok(state.modules)
    }

    /// Visit one physical package path with the relationship it was
    /// reached through.
    fn visit_module(
        &self,
        state: &mut WalkState,
        module_path: &Path,
        relationship: DepRelationship,
    ) -> Result<(), WalkError> {
        debug!(path = %module_path.display(), %relationship, "walk reached module");

        if state.visited.contains(module_path) {
            // Children were enumerated on the first visit and cannot have
            // changed; only the reason this path is reachable can.
            if let Some(existing) = state.modules.iter_mut().find(|m| m.path == module_path) {
                if relationship.supersedes(existing.relationship) {
                    debug!(
                        existing = %existing.relationship,
                        incoming = %relationship,
                        "upgrading module relationship"
                    );
                    existing.relationship = relationship;
                }
            }
            return Ok(());
        }

        let Some(manifest) = load_manifest(module_path)? else {
            // Dead install leftover, e.g. yarn not cleaning up a removed
            // package. Not recorded and not descended into.
            debug!(path = %module_path.display(), "module has no manifest, dead end");
            return Ok(());
        };

        state.visited.insert(module_path.to_path_buf());
        state.modules.push(Module {
            native_build_kind: detect_native_build(module_path, &manifest),
            path: module_path.to_path_buf(),
            name: manifest.name.clone(),
            relationship,
        });

        let child_category = relationship.category().child();

        for name in manifest.dependencies.keys() {
            // npm copies optional entries into "dependencies" after
            // install; the optional declaration wins for those names.
            if manifest.optional_dependencies.contains_key(name) {
                debug!(%name, path = %module_path.display(), "production entry also marked optional");
                continue;
            }
            self.resolve_child(
                state,
                name,
                module_path,
                DepRelationship::new(
                    child_category,
                    DepRequirement::child_of(relationship.requirement(), DepRequirement::Required),
                ),
            )?;
        }

        for name in manifest.optional_dependencies.keys() {
            self.resolve_child(
                state,
                name,
                module_path,
                DepRelationship::new(
                    child_category,
                    DepRequirement::child_of(relationship.requirement(), DepRequirement::Optional),
                ),
            )?;
        }

        // Dev dependencies are only ever walked from the starting package.
        if relationship.category() == DepCategory::Root {
            debug!("walking development dependencies of the root");
            for name in manifest.dev_dependencies.keys() {
                self.resolve_child(
                    state,
                    name,
                    module_path,
                    DepRelationship::new(
                        DepCategory::Development,
                        DepRequirement::child_of(
                            relationship.requirement(),
                            DepRequirement::Required,
                        ),
                    ),
                )?;
            }
        }

        Ok(())
    }

    /// Resolve one declared dependency edge to a physical path and visit it.
    fn resolve_child(
        &self,
        state: &mut WalkState,
        name: &str,
        from: &Path,
        relationship: DepRelationship,
    ) -> Result<(), WalkError> {
        let Some(discovered) = locate_module(name, from) else {
            if relationship.requirement() == DepRequirement::Required {
                // An unlocatable required dependency means the install is
                // broken; nothing downstream can be trusted.
                return Err(WalkError::module_not_found(name, from));
            }
            debug!(%name, from = %from.display(), "optional dependency not installed");
            return Ok(());
        };
        self.visit_module(state, &discovered, relationship)
    }
}

/// Search upward from `from` for `node_modules/<name>`, honoring hoisting.
///
/// Each step climbs past the enclosing `node_modules` store rather than
/// probing intermediate directories, and the search ends when the candidate
/// path stops changing (the filesystem root).
fn locate_module(name: &str, from: &Path) -> Option<PathBuf> {
    let mut search_dir = from.to_path_buf();
    let mut last_candidate: Option<PathBuf> = None;
    loop {
        let candidate = search_dir.join("node_modules").join(name);
        if last_candidate.as_deref() == Some(candidate.as_path()) {
            return None;
        }
        if candidate.exists() {
            return Some(candidate);
        }
        last_candidate = Some(candidate);

        if search_dir.parent().and_then(Path::file_name) != Some(OsStr::new("node_modules")) {
            search_dir = dir_parent(&search_dir);
        }
        search_dir = dir_parent(&dir_parent(&search_dir));
    }
}

/// Parent directory, saturating at the filesystem root.
fn dir_parent(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => path.to_path_buf(),
    }
}
