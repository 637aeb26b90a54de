#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod manifest;
pub mod native;
pub mod relationship;
pub mod walker;

pub use error::WalkError;
pub use manifest::{load_manifest, Manifest, VersionRange};
pub use native::{detect_native_build, NativeBuildKind};
pub use relationship::{DepCategory, DepRelationship, DepRequirement};
pub use walker::{Module, Walker};
