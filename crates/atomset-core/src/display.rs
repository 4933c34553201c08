//! # Rendering
//!
//! Human-readable form of a handle set: `cat -> ListLink(cat, dog) -> NULL`.
//!
//! Nodes print by name, links by their type name and outgoing set. A handle
//! the atom space does not know prints as `?<raw>`; rendering never fails.

use crate::handle_set::HandleSet;
use crate::primitives::{RENDER_SEPARATOR, RENDER_TERMINATOR};
use crate::table::AtomSpace;
use crate::Handle;
use std::fmt::Write;

/// Render every entry of `set`, in order, followed by the terminator.
#[must_use]
pub fn render<S>(set: &HandleSet, space: &S) -> String
where
    S: AtomSpace + ?Sized,
{
    let mut out = String::new();
    for handle in set {
        out.push_str(&render_atom(handle, space));
        out.push_str(RENDER_SEPARATOR);
    }
    out.push_str(RENDER_TERMINATOR);
    out
}

/// Short form of one atom.
#[must_use]
pub fn render_atom<S>(handle: Handle, space: &S) -> String
where
    S: AtomSpace + ?Sized,
{
    let Some(atom) = space.atom(handle) else {
        return format!("?{}", handle.value());
    };
    if let Some(name) = atom.name() {
        return name.to_string();
    }

    let mut out = match space.type_name(atom.atom_type()) {
        Some(type_name) => type_name.to_string(),
        None => format!("type{}", atom.atom_type().code()),
    };
    out.push('(');
    for (i, &target) in atom.outgoing().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match space.atom(target).and_then(|t| t.name()) {
            Some(name) => out.push_str(name),
            None => {
                let _ = write!(out, "{}", target);
            }
        }
    }
    out.push(')');
    out
}

impl HandleSet {
    /// See [`render`].
    #[must_use]
    pub fn render<S>(&self, space: &S) -> String
    where
        S: AtomSpace + ?Sized,
    {
        render(self, space)
    }
}

// =============================================================================
// TESTS
// =============================================================================
