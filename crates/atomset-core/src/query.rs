//! # Query Module
//!
//! Declarative filter pipelines over an atom space.
//!
//! - `Criterion`: one filter and its parameters, as data
//! - `Source`: where a query's candidate handles come from
//! - `Query`: intersect the sources, then apply the criteria in order
//!
//! Criteria are deserializable so that pipelines can be stored next to the
//! atoms they run against.

use crate::handle_set::HandleSet;
use crate::table::AtomSpace;
use crate::{Arity, AtomSetError, Handle, Sti, Type, VersionHandle};
use serde::{Deserialize, Serialize};

// =============================================================================
// CRITERION
// =============================================================================

/// Filter operations supported by a handle set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criterion {
    /// Keep atoms whose removal flag equals `marked`.
    RemovalFlag { marked: bool },

    /// Keep atoms with exactly `arity` outgoing edges.
    Arity { arity: Arity },

    /// Keep atoms of a type, or of its subtypes.
    Type { ty: Type, subclass: bool },

    /// Keep nodes carrying a name.
    Name { name: String },

    /// Type match plus an optional name.
    NameAndType {
        name: Option<String>,
        ty: Type,
        subclass: bool,
    },

    /// Neighbor at `position` is `target`.
    OutgoingAt {
        target: Handle,
        position: Arity,
        arity: Arity,
    },

    /// Links pointing at `target`.
    IncomingOf { target: Handle },

    /// Some neighbor matches the type.
    AnyOutgoingType {
        ty: Type,
        subclass: bool,
        arity: Arity,
    },

    /// Neighbor at `position` matches the type.
    OutgoingTypeAt {
        ty: Type,
        subclass: bool,
        position: Arity,
        arity: Arity,
    },

    /// Neighbor at `position` matches the type and optional name.
    OutgoingNameTypeAt {
        name: Option<String>,
        ty: Type,
        subclass: bool,
        position: Arity,
        arity: Arity,
    },

    /// Neighbor at `position` matches the optional name.
    OutgoingNameAt {
        name: Option<String>,
        position: Arity,
        arity: Arity,
    },

    /// Inclusive short-term importance range.
    Attention { lower: Sti, upper: Sti },

    /// Own truth value holds the version.
    Version { version: VersionHandle },

    /// Some neighbor of a matching type holds the version.
    OutgoingVersion {
        ty: Type,
        subclass: bool,
        version: VersionHandle,
    },

    /// Some neighbor of exactly `ty`, named `name`, holds the version.
    OutgoingNameVersion {
        name: String,
        ty: Type,
        version: VersionHandle,
    },
}

impl Criterion {
    /// Run the filter this criterion describes.
    pub fn apply<S>(&self, set: HandleSet, space: &S) -> Result<HandleSet, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        match self {
            Self::RemovalFlag { marked } => set.filter_by_removal_flag(space, *marked),
            Self::Arity { arity } => set.filter_by_arity(space, *arity),
            Self::Type { ty, subclass } => set.filter_by_type(space, *ty, *subclass),
            Self::Name { name } => set.filter_by_name(space, name),
            Self::NameAndType { name, ty, subclass } => {
                set.filter_by_name_and_type(space, name.as_deref(), *ty, *subclass)
            }
            Self::OutgoingAt {
                target,
                position,
                arity,
            } => set.filter_by_outgoing_at(space, *target, *position, *arity),
            Self::IncomingOf { target } => set.filter_by_incoming_of(space, *target),
            Self::AnyOutgoingType { ty, subclass, arity } => {
                set.filter_by_any_outgoing_type(space, *ty, *subclass, *arity)
            }
            Self::OutgoingTypeAt {
                ty,
                subclass,
                position,
                arity,
            } => set.filter_by_outgoing_type_at(space, *ty, *subclass, *position, *arity),
            Self::OutgoingNameTypeAt {
                name,
                ty,
                subclass,
                position,
                arity,
            } => set.filter_by_outgoing_name_type_at(
                space,
                name.as_deref(),
                *ty,
                *subclass,
                *position,
                *arity,
            ),
            Self::OutgoingNameAt {
                name,
                position,
                arity,
            } => set.filter_by_outgoing_name_at(space, name.as_deref(), *position, *arity),
            Self::Attention { lower, upper } => set.filter_by_attention(space, *lower, *upper),
            Self::Version { version } => set.filter_by_version(space, *version),
            Self::OutgoingVersion {
                ty,
                subclass,
                version,
            } => set.filter_by_outgoing_version(space, *ty, *subclass, *version),
            Self::OutgoingNameVersion { name, ty, version } => {
                set.filter_by_outgoing_name_version(space, name, *ty, *version)
            }
        }
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RemovalFlag { .. } => "removal_flag",
            Self::Arity { .. } => "arity",
            Self::Type { .. } => "type",
            Self::Name { .. } => "name",
            Self::NameAndType { .. } => "name_and_type",
            Self::OutgoingAt { .. } => "outgoing_at",
            Self::IncomingOf { .. } => "incoming_of",
            Self::AnyOutgoingType { .. } => "any_outgoing_type",
            Self::OutgoingTypeAt { .. } => "outgoing_type_at",
            Self::OutgoingNameTypeAt { .. } => "outgoing_name_type_at",
            Self::OutgoingNameAt { .. } => "outgoing_name_at",
            Self::Attention { .. } => "attention",
            Self::Version { .. } => "version",
            Self::OutgoingVersion { .. } => "outgoing_version",
            Self::OutgoingNameVersion { .. } => "outgoing_name_version",
        }
    }
}

// =============================================================================
// SOURCE
// =============================================================================

/// Candidate handles for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    /// An explicit handle list, kept in the given order.
    Handles { handles: Vec<Handle> },

    /// Every atom of a type (or subtype) known to the atom space.
    ByType { ty: Type, subclass: bool },
}

impl Source {
    /// Materialize the candidate set.
    #[must_use]
    pub fn candidates<S>(&self, space: &S) -> HandleSet
    where
        S: AtomSpace + ?Sized,
    {
        match self {
            Self::Handles { handles } => HandleSet::from_handles(handles),
            Self::ByType { ty, subclass } => space.handles_by_type(*ty, *subclass),
        }
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// A structured query: candidate sources plus an ordered filter pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Candidate sources; several sources are intersected.
    #[serde(default)]
    pub sources: Vec<Source>,
    /// Filters, applied in order.
    #[serde(default)]
    pub criteria: Vec<Criterion>,
}

impl Query {
    /// Create a query over one source.
    #[must_use]
    pub fn new(source: Source) -> Self {
        Self {
            sources: vec![source],
            criteria: Vec::new(),
        }
    }

    /// Add another source to intersect with.
    #[must_use]
    pub fn and_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Append a filter to the pipeline.
    #[must_use]
    pub fn filter(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Evaluate against an atom space.
    ///
    /// A single source keeps its own order; several sources are intersected
    /// and come out ascending. No sources gives the empty set.
    pub fn evaluate<S>(&self, space: &S) -> Result<HandleSet, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        let mut set = match self.sources.as_slice() {
            [] => HandleSet::new(),
            [only] => only.candidates(space),
            sources => {
                let candidates = sources.iter().map(|s| s.candidates(space)).collect();
                HandleSet::intersection(candidates)?
            }
        };

        for criterion in &self.criteria {
            if set.is_empty() {
                break;
            }
            set = criterion.apply(set, space)?;
            tracing::debug!(criterion = criterion.label(), remaining = set.len(), "criterion applied");
        }
        Ok(set)
    }
}

// =============================================================================
// TESTS
// =============================================================================
