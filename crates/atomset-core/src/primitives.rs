//! # Innate Primitives
//!
//! Reserved codes and fixed bounds for the atomset CORE.
//!
//! These primitives are compiled into the binary and are immutable at runtime.
//! Every `TypeRegistry` must honour the reserved type codes so that the
//! filters can recognise the roots of the type hierarchy.

/// Raw value of the null handle.
pub const UNDEFINED_HANDLE: u64 = 0;

/// First raw handle value handed out by the reference atom table.
pub const FIRST_HANDLE: u64 = 1;

// =============================================================================
// RESERVED TYPE CODES
// =============================================================================

/// Absence of a type.
pub const NOTYPE_CODE: u16 = 0;

/// Universal root of the hierarchy.
pub const ATOM_CODE: u16 = 1;

/// Root of named atoms.
pub const NODE_CODE: u16 = 2;

/// Root of atoms with an outgoing set.
pub const LINK_CODE: u16 = 3;

/// First code available for registered types.
pub const FIRST_USER_TYPE_CODE: u16 = 4;

// =============================================================================
// RENDERING
// =============================================================================

/// Separator between rendered entries of a handle set.
pub const RENDER_SEPARATOR: &str = " -> ";

/// Terminator appended after the last rendered entry.
pub const RENDER_TERMINATOR: &str = "NULL";
