//! # atomset-core
//!
//! Result sets and structural filtering for an in-memory hypergraph atom
//! store - THE LOGIC.
//!
//! A query produces a `HandleSet`: an ordered chain of atom handles that
//! owns every one of its nodes. Sets are narrowed by predicate filters,
//! combined by k-way intersection or concatenation, and converted to and
//! from flat handle arrays.
//!
//! ## Collaborators
//!
//! The engine never stores atoms. It reaches them through two seams:
//! - `AtomLookup`: handle -> atom, incoming sets, per-type candidates
//! - `TypeRegistry`: the "is-a" relation between atom types
//!
//! `AtomTable` and `ClassServer` are in-memory reference implementations.
//!
//! ## Architectural Constraints
//!
//! - Single-threaded, synchronous, no I/O
//! - Consuming operations take the set by value; nothing is shared
//! - Teardown and clone are iterative for chains of any length
//! - Empty results are values, never errors

// =============================================================================
// MODULES
// =============================================================================

pub mod algebra;
pub mod atom;
pub mod display;
pub mod filter;
pub mod handle_set;
pub mod primitives;
pub mod query;
pub mod registry;
pub mod table;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Arity, AtomSetError, Handle, IndicatorType, Sti, Type, VersionHandle};

// =============================================================================
// RE-EXPORTS: Atoms and Collaborators
// =============================================================================

pub use atom::{Atom, AttentionValue, CompositeTruthValue, TruthValue};
pub use registry::{ClassServer, TypeRegistry};
pub use table::{AtomLookup, AtomSpace, AtomTable};

// =============================================================================
// RE-EXPORTS: Handle Sets
// =============================================================================

pub use display::{render, render_atom};
pub use handle_set::HandleSet;
pub use query::{Criterion, Query, Source};
