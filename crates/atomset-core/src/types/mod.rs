//! # Core Type Definitions
//!
//! This module contains the identifier and error types shared by every
//! part of the engine:
//! - Atom identifiers (`Handle`)
//! - Type codes (`Type`) and scalar aliases (`Arity`, `Sti`)
//! - Context selectors for composite truth values (`VersionHandle`)
//! - Error types (`AtomSetError`)
//!
//! ## Ordering Guarantees
//!
//! `Handle` and `Type` implement `Ord` on their raw value, so sorting and
//! merging handle arrays is deterministic.

use crate::primitives;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// SCALAR ALIASES
// =============================================================================

/// Number of outgoing edges of an atom.
pub type Arity = usize;

/// Short-term importance, the signed attention scalar.
pub type Sti = i16;

// =============================================================================
// HANDLE
// =============================================================================

/// Opaque identifier for an atom stored in an atom table.
///
/// Handles are copyable and totally ordered by their raw value.
/// `Handle::UNDEFINED` is the null handle ("no atom").
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Handle(pub u64);

impl Handle {
    /// The null handle.
    pub const UNDEFINED: Self = Self(primitives::UNDEFINED_HANDLE);

    /// Create a handle from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Check whether this is the null handle.
    #[must_use]
    pub const fn is_undefined(self) -> bool {
        self.0 == primitives::UNDEFINED_HANDLE
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// TYPE
// =============================================================================

/// Atom type code, as handed out by a `TypeRegistry`.
///
/// The four lowest codes are reserved for the roots of every hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Type(pub u16);

impl Type {
    /// Absence of a type.
    pub const NOTYPE: Self = Self(primitives::NOTYPE_CODE);
    /// Universal root: every type is assignable to `ATOM`.
    pub const ATOM: Self = Self(primitives::ATOM_CODE);
    /// Root of named (leaf) atoms.
    pub const NODE: Self = Self(primitives::NODE_CODE);
    /// Root of atoms with an outgoing set.
    pub const LINK: Self = Self(primitives::LINK_CODE);

    /// Get the raw type code.
    #[must_use]
    pub const fn code(self) -> u16 {
        self.0
    }
}

// =============================================================================
// VERSION HANDLE
// =============================================================================

/// Kind of perspective a version handle selects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    Hypothetical,
    Contextual,
    #[default]
    Unknown,
}

/// Context selector for one perspective of a composite truth value.
///
/// A version handle whose substantive is the null handle is itself null:
/// filters treat it as "no context requested".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct VersionHandle {
    pub indicator: IndicatorType,
    pub substantive: Handle,
}

impl VersionHandle {
    /// The null version handle.
    pub const NULL: Self = Self {
        indicator: IndicatorType::Unknown,
        substantive: Handle::UNDEFINED,
    };

    /// Create a version handle.
    #[must_use]
    pub const fn new(indicator: IndicatorType, substantive: Handle) -> Self {
        Self {
            indicator,
            substantive,
        }
    }

    /// Check whether no context is selected.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.substantive.is_undefined()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by the handle-set engine and its reference collaborators.
///
/// Empty results are never errors: a filter that keeps nothing, a disjoint
/// intersection or a removal of an absent handle all return an empty set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AtomSetError {
    /// A chain's counted length disagrees with the number of nodes walked.
    #[error("consistency check failed for {context}: expected {expected} entries, found {actual}")]
    Inconsistent {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The handle does not resolve to an atom.
    #[error("Unknown handle: {0}")]
    UnknownHandle(Handle),

    /// The type code is not registered.
    #[error("Unknown type code: {0:?}")]
    UnknownType(Type),

    /// No type is registered under this name.
    #[error("Unknown type name: {0}")]
    UnknownTypeName(String),

    /// The handle is already bound to an atom.
    #[error("Handle already in use: {0}")]
    DuplicateHandle(Handle),

    /// An atom definition violates the table's rules.
    #[error("Invalid atom: {0}")]
    InvalidAtom(String),
}

// =============================================================================
// TESTS
// =============================================================================
