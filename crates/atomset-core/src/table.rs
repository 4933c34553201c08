//! # Atom Table
//!
//! The handle-to-atom seam used by the filters, and an in-memory reference
//! implementation of it.
//!
//! `AtomLookup` resolves handles. `AtomSpace` is any collaborator that is
//! both an `AtomLookup` and a `TypeRegistry`; every filter takes one.
//!
//! `AtomTable` keeps atoms in `BTreeMap`s so that per-type candidate sets come
//! out in handle order. It maintains incoming sets as links are added.

use crate::handle_set::HandleSet;
use crate::primitives::FIRST_HANDLE;
use crate::registry::{ClassServer, TypeRegistry};
use crate::{Atom, AtomSetError, AttentionValue, Handle, TruthValue, Type};
use std::collections::BTreeMap;

// =============================================================================
// LOOKUP TRAITS
// =============================================================================

/// Resolves handles to atoms.
pub trait AtomLookup {
    /// Get the atom behind a handle.
    fn atom(&self, handle: Handle) -> Option<&Atom>;

    /// Get the links that hold `handle` in their outgoing set.
    fn incoming(&self, handle: Handle) -> Option<&HandleSet>;

    /// Candidate set of every atom of type `ty` (or a subtype), in handle order.
    fn handles_by_type(&self, ty: Type, subclass: bool) -> HandleSet;

    /// Resolve a handle, treating an unknown handle as an error.
    fn resolve(&self, handle: Handle) -> Result<&Atom, AtomSetError> {
        self.atom(handle)
            .ok_or(AtomSetError::UnknownHandle(handle))
    }
}

/// An atom lookup that also answers type queries.
pub trait AtomSpace: AtomLookup + TypeRegistry {}

impl<T: AtomLookup + TypeRegistry + ?Sized> AtomSpace for T {}

// =============================================================================
// ATOM TABLE
// =============================================================================

/// In-memory atom table with its own type registry.
#[derive(Debug, Clone)]
pub struct AtomTable {
    /// Atom storage: Handle -> Atom
    atoms: BTreeMap<Handle, Atom>,

    /// Reverse edges: Handle -> links whose outgoing set holds it
    incoming: BTreeMap<Handle, HandleSet>,

    /// Name index for nodes: (Type, name) -> Handle
    node_index: BTreeMap<(Type, String), Handle>,

    classes: ClassServer,

    /// Next raw handle to try; `None` once `u64::MAX` has been handed out.
    next_handle: Option<u64>,
}

impl Default for AtomTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AtomTable {
    /// Create an empty table with the root types registered.
    #[must_use]
    pub fn new() -> Self {
        Self::with_classes(ClassServer::new())
    }

    /// Create an empty table around an existing registry.
    #[must_use]
    pub fn with_classes(classes: ClassServer) -> Self {
        Self {
            atoms: BTreeMap::new(),
            incoming: BTreeMap::new(),
            node_index: BTreeMap::new(),
            classes,
            next_handle: Some(FIRST_HANDLE),
        }
    }

    #[must_use]
    pub fn classes(&self) -> &ClassServer {
        &self.classes
    }

    /// Register a type; see `ClassServer::add_type`.
    pub fn add_type(&mut self, name: &str, parent: Type) -> Result<Type, AtomSetError> {
        self.classes.add_type(name, parent)
    }

    /// Add a named atom, returning the existing handle for a known (type, name).
    pub fn add_node(&mut self, ty: Type, name: &str) -> Result<Handle, AtomSetError> {
        if let Some(&existing) = self.node_index.get(&(ty, name.to_string())) {
            return Ok(existing);
        }
        let handle = self.allocate_handle()?;
        self.insert(handle, Atom::node(ty, name))?;
        Ok(handle)
    }

    /// Add a link over existing atoms.
    pub fn add_link(&mut self, ty: Type, outgoing: Vec<Handle>) -> Result<Handle, AtomSetError> {
        let handle = self.allocate_handle()?;
        self.insert(handle, Atom::link(ty, outgoing))?;
        Ok(handle)
    }

    /// Bind a fully built atom to a chosen handle.
    ///
    /// Nodes must be named and have no outgoing set; links must be unnamed and
    /// may only point at atoms already in the table. A (type, name) pair binds
    /// at most one handle.
    pub fn insert(&mut self, handle: Handle, atom: Atom) -> Result<(), AtomSetError> {
        if handle.is_undefined() {
            return Err(AtomSetError::InvalidAtom(
                "the null handle cannot be bound".to_string(),
            ));
        }
        if self.atoms.contains_key(&handle) {
            return Err(AtomSetError::DuplicateHandle(handle));
        }
        self.validate(&atom)?;

        if let Some(name) = atom.name() {
            self.node_index
                .insert((atom.atom_type(), name.to_string()), handle);
        }
        for &target in atom.outgoing() {
            self.incoming.entry(target).or_default().push_front(handle);
        }
        self.atoms.insert(handle, atom);
        if self.next_handle.is_some_and(|next| handle.value() >= next) {
            self.next_handle = handle.value().checked_add(1);
        }
        Ok(())
    }

    fn validate(&self, atom: &Atom) -> Result<(), AtomSetError> {
        let ty = atom.atom_type();
        if !self.classes.contains(ty) {
            return Err(AtomSetError::UnknownType(ty));
        }
        if self.classes.is_node_type(ty) {
            let Some(name) = atom.name().filter(|_| atom.arity() == 0) else {
                return Err(AtomSetError::InvalidAtom(format!(
                    "node of type {:?} needs a name and no outgoing set",
                    ty
                )));
            };
            if let Some(existing) = self.get_node(ty, name) {
                return Err(AtomSetError::InvalidAtom(format!(
                    "node {:?} of type {:?} is already bound to {}",
                    name, ty, existing
                )));
            }
        } else if atom.name().is_some() {
            return Err(AtomSetError::InvalidAtom(format!(
                "atom of non-node type {:?} cannot carry a name",
                ty
            )));
        }
        for &target in atom.outgoing() {
            if !self.atoms.contains_key(&target) {
                return Err(AtomSetError::UnknownHandle(target));
            }
        }
        Ok(())
    }

    fn allocate_handle(&mut self) -> Result<Handle, AtomSetError> {
        while let Some(raw) = self.next_handle {
            self.next_handle = raw.checked_add(1);
            if !self.atoms.contains_key(&Handle(raw)) {
                return Ok(Handle(raw));
            }
        }
        Err(AtomSetError::InvalidAtom(
            "handle space exhausted".to_string(),
        ))
    }

    fn atom_mut(&mut self, handle: Handle) -> Result<&mut Atom, AtomSetError> {
        self.atoms
            .get_mut(&handle)
            .ok_or(AtomSetError::UnknownHandle(handle))
    }

    pub fn set_attention(
        &mut self,
        handle: Handle,
        attention: AttentionValue,
    ) -> Result<(), AtomSetError> {
        self.atom_mut(handle)?.set_attention(attention);
        Ok(())
    }

    pub fn set_truth(&mut self, handle: Handle, truth: TruthValue) -> Result<(), AtomSetError> {
        self.atom_mut(handle)?.set_truth(truth);
        Ok(())
    }

    /// Flag an atom as removed without unlinking it.
    pub fn mark_for_removal(&mut self, handle: Handle, marked: bool) -> Result<(), AtomSetError> {
        self.atom_mut(handle)?.set_marked_for_removal(marked);
        Ok(())
    }

    /// Get a node by type and name.
    #[must_use]
    pub fn get_node(&self, ty: Type, name: &str) -> Option<Handle> {
        self.node_index.get(&(ty, name.to_string())).copied()
    }

    /// Iterate over all atoms in handle order.
    pub fn atoms(&self) -> impl Iterator<Item = (Handle, &Atom)> {
        self.atoms.iter().map(|(h, a)| (*h, a))
    }

    /// Every handle in the table, in handle order.
    #[must_use]
    pub fn all_handles(&self) -> HandleSet {
        self.atoms.keys().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl AtomLookup for AtomTable {
    fn atom(&self, handle: Handle) -> Option<&Atom> {
        self.atoms.get(&handle)
    }

    fn incoming(&self, handle: Handle) -> Option<&HandleSet> {
        self.incoming.get(&handle)
    }

    fn handles_by_type(&self, ty: Type, subclass: bool) -> HandleSet {
        self.atoms
            .iter()
            .filter(|(_, atom)| self.classes.type_matches(ty, subclass, atom.atom_type()))
            .map(|(handle, _)| *handle)
            .collect()
    }
}

impl TypeRegistry for AtomTable {
    fn is_assignable_from(&self, ancestor: Type, candidate: Type) -> bool {
        self.classes.is_assignable_from(ancestor, candidate)
    }

    fn type_name(&self, ty: Type) -> Option<&str> {
        self.classes.type_name(ty)
    }

    fn type_by_name(&self, name: &str) -> Option<Type> {
        self.classes.type_by_name(name)
    }
}

// =============================================================================
// TESTS
// =============================================================================
