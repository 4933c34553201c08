//! # Atom Values
//!
//! The atom record resolved from a handle, and the value objects it carries.
//!
//! - `Atom`: type, optional name, outgoing set, attention, truth, removal flag
//! - `AttentionValue`: short-term importance scalar
//! - `TruthValue` / `CompositeTruthValue`: plain and multi-context truth
//!
//! Filters only read atoms; nothing in the engine creates or mutates them.

use crate::{Arity, Handle, Sti, Type, VersionHandle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// ATTENTION VALUE
// =============================================================================

/// Attention carried by an atom.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct AttentionValue {
    /// Short-term importance.
    pub sti: Sti,
    /// Long-term importance.
    pub lti: Sti,
}

impl AttentionValue {
    /// Create an attention value.
    #[must_use]
    pub const fn new(sti: Sti, lti: Sti) -> Self {
        Self { sti, lti }
    }

    /// Attention value with only a short-term importance set.
    #[must_use]
    pub const fn with_sti(sti: Sti) -> Self {
        Self { sti, lti: 0 }
    }

    /// Get the short-term importance.
    #[must_use]
    pub const fn sti(&self) -> Sti {
        self.sti
    }
}

// =============================================================================
// TRUTH VALUE
// =============================================================================

/// Truth value of an atom.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TruthValue {
    /// No truth value.
    #[default]
    Null,
    /// A single strength/confidence pair.
    Simple { strength: f32, confidence: f32 },
    /// One primary value plus one value per context.
    Composite(CompositeTruthValue),
}

impl TruthValue {
    /// Create a simple truth value.
    #[must_use]
    pub const fn simple(strength: f32, confidence: f32) -> Self {
        Self::Simple {
            strength,
            confidence,
        }
    }

    /// Check whether this is the null truth value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the composite form, if this is a multi-context truth value.
    #[must_use]
    pub const fn as_composite(&self) -> Option<&CompositeTruthValue> {
        match self {
            Self::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    /// Check whether a non-null value is stored under `version`.
    ///
    /// Only composite truth values carry versions.
    #[must_use]
    pub fn has_version(&self, version: VersionHandle) -> bool {
        self.as_composite()
            .is_some_and(|composite| !composite.versioned(version).is_null())
    }

    /// Short label of the truth value kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Simple { .. } => "simple",
            Self::Composite(_) => "composite",
        }
    }
}

/// Multi-context truth value.
///
/// Lookups of an absent version return the null truth value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositeTruthValue {
    primary: Box<TruthValue>,
    versions: BTreeMap<VersionHandle, TruthValue>,
}

impl CompositeTruthValue {
    const NULL_TV: TruthValue = TruthValue::Null;

    /// Create a composite value around a primary truth value.
    #[must_use]
    pub fn new(primary: TruthValue) -> Self {
        Self {
            primary: Box::new(primary),
            versions: BTreeMap::new(),
        }
    }

    /// Builder: store `value` under `version`.
    #[must_use]
    pub fn with_version(mut self, version: VersionHandle, value: TruthValue) -> Self {
        self.set_version(version, value);
        self
    }

    /// Store `value` under `version`. Null versions are ignored.
    pub fn set_version(&mut self, version: VersionHandle, value: TruthValue) {
        if version.is_null() {
            return;
        }
        self.versions.insert(version, value);
    }

    /// Remove the value stored under `version`.
    pub fn remove_version(&mut self, version: &VersionHandle) {
        self.versions.remove(version);
    }

    /// Get the primary (context-free) truth value.
    #[must_use]
    pub fn primary(&self) -> &TruthValue {
        &self.primary
    }

    /// Get the value stored under `version`, or the null truth value.
    #[must_use]
    pub fn versioned(&self, version: VersionHandle) -> &TruthValue {
        self.versions.get(&version).unwrap_or(&Self::NULL_TV)
    }

    /// Number of stored versions.
    #[must_use]
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }
}

// =============================================================================
// ATOM
// =============================================================================

/// An atom as resolved from a handle.
///
/// Nodes carry a name and no outgoing set; links carry an outgoing set and no
/// name. Which one an atom is depends on the type registry, not on this record.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    atom_type: Type,
    name: Option<String>,
    outgoing: Vec<Handle>,
    attention: AttentionValue,
    truth: TruthValue,
    marked_for_removal: bool,
}

impl Atom {
    /// Create a named atom.
    #[must_use]
    pub fn node(atom_type: Type, name: impl Into<String>) -> Self {
        Self {
            atom_type,
            name: Some(name.into()),
            outgoing: Vec::new(),
            attention: AttentionValue::default(),
            truth: TruthValue::Null,
            marked_for_removal: false,
        }
    }

    /// Create an atom with an outgoing set.
    #[must_use]
    pub fn link(atom_type: Type, outgoing: Vec<Handle>) -> Self {
        Self {
            atom_type,
            name: None,
            outgoing,
            attention: AttentionValue::default(),
            truth: TruthValue::Null,
            marked_for_removal: false,
        }
    }

    /// Builder: set the attention value.
    #[must_use]
    pub fn with_attention(mut self, attention: AttentionValue) -> Self {
        self.attention = attention;
        self
    }

    /// Builder: set the truth value.
    #[must_use]
    pub fn with_truth(mut self, truth: TruthValue) -> Self {
        self.truth = truth;
        self
    }

    /// Builder: set the removal flag.
    #[must_use]
    pub fn marked(mut self, marked: bool) -> Self {
        self.marked_for_removal = marked;
        self
    }

    #[must_use]
    pub fn atom_type(&self) -> Type {
        self.atom_type
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn outgoing(&self) -> &[Handle] {
        &self.outgoing
    }

    /// Get the outgoing handle at `position`, if the atom has one there.
    #[must_use]
    pub fn outgoing_at(&self, position: Arity) -> Option<Handle> {
        self.outgoing.get(position).copied()
    }

    #[must_use]
    pub fn arity(&self) -> Arity {
        self.outgoing.len()
    }

    #[must_use]
    pub fn attention(&self) -> AttentionValue {
        self.attention
    }

    #[must_use]
    pub fn truth(&self) -> &TruthValue {
        &self.truth
    }

    #[must_use]
    pub fn is_marked_for_removal(&self) -> bool {
        self.marked_for_removal
    }

    pub fn set_attention(&mut self, attention: AttentionValue) {
        self.attention = attention;
    }

    pub fn set_truth(&mut self, truth: TruthValue) {
        self.truth = truth;
    }

    pub fn set_marked_for_removal(&mut self, marked: bool) {
        self.marked_for_removal = marked;
    }
}

// =============================================================================
// TESTS
// =============================================================================
