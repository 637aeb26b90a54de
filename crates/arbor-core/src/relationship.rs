//! Dependency relationship model.
//!
//! Classifies how strongly, and for what purpose, a discovered package is
//! reachable from the root: a category (root / production / development)
//! crossed with a requirement (required / optional). A total order over the
//! pair decides which classification wins when the same physical package is
//! reached along more than one declaration chain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a package is reachable from the root.
///
/// Variant declaration order carries the ordering: `Root` supersedes
/// `Production` supersedes `Development`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepCategory {
    Development,
    Production,
    Root,
}

impl DepCategory {
    /// Category propagated to a child edge.
    ///
    /// Only direct children of the root may be classified `Development`,
    /// and only via an explicit dev declaration; everything reached below a
    /// root or production package is production, and a development subtree
    /// stays development all the way down.
    #[must_use]
    pub fn child(self) -> Self {
        match self {
            Self::Development => Self::Development,
            Self::Production | Self::Root => Self::Production,
        }
    }
}

impl fmt::Display for DepCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Root => write!(f, "root"),
        }
    }
}

/// Whether a package must be present for its declaring chain to function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepRequirement {
    Optional,
    Required,
}

impl DepRequirement {
    /// Requirement propagated to a child edge.
    ///
    /// Optionality is contagious downward: a required sub-dependency of an
    /// optional package is only ever reachable when the optional package is
    /// present, so the child is optional too. Otherwise the child keeps
    /// whatever its own declaration says.
    #[must_use]
    pub fn child_of(parent: Self, declared: Self) -> Self {
        match parent {
            Self::Optional => Self::Optional,
            Self::Required => declared,
        }
    }
}

impl fmt::Display for DepRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optional => write!(f, "optional"),
            Self::Required => write!(f, "required"),
        }
    }
}

/// Category and requirement for one reachability chain.
///
/// The derived ordering is lexicographic over (category, requirement),
/// which is exactly the merge rule: a relationship strictly supersedes
/// another iff its category is greater, or the categories are equal and its
/// requirement is greater. Equal pairs supersede in neither direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DepRelationship {
    category: DepCategory,
    requirement: DepRequirement,
}

impl DepRelationship {
    #[must_use]
    pub fn new(category: DepCategory, requirement: DepRequirement) -> Self {
        Self {
            category,
            requirement,
        }
    }

    #[must_use]
    pub fn category(self) -> DepCategory {
        self.category
    }

    #[must_use]
    pub fn requirement(self) -> DepRequirement {
        self.requirement
    }

    /// True when `self` is a strictly stronger reason to keep a package
    /// than `other`.
    #[must_use]
    pub fn supersedes(self, other: Self) -> bool {
        self > other
    }
}

impl fmt::Display for DepRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category, self.requirement)
    }
}
