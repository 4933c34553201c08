//! # Type Registry
//!
//! The "is-a" relation over atom types.
//!
//! `TypeRegistry` is the seam every subclass-aware filter goes through.
//! `ClassServer` is the in-memory reference registry: a forest rooted at
//! `ATOM`, with `NODE` and `LINK` pre-registered.

use crate::primitives::FIRST_USER_TYPE_CODE;
use crate::{AtomSetError, Type};
use std::collections::BTreeMap;

// =============================================================================
// TYPEREGISTRY TRAIT
// =============================================================================

/// Answers subtype queries for the filters.
///
/// Implementations must be consistent and transitive: if `b` is assignable
/// to `a` and `c` to `b`, then `c` is assignable to `a`. Every type is
/// assignable to itself.
pub trait TypeRegistry {
    /// Check whether `candidate` is `ancestor` or one of its descendants.
    fn is_assignable_from(&self, ancestor: Type, candidate: Type) -> bool;

    /// Get the registered name of a type.
    fn type_name(&self, ty: Type) -> Option<&str>;

    /// Resolve a type by its registered name.
    fn type_by_name(&self, name: &str) -> Option<Type>;

    /// Check whether atoms of type `ty` are named (leaf) atoms.
    fn is_node_type(&self, ty: Type) -> bool {
        self.is_assignable_from(Type::NODE, ty)
    }

    /// Check whether atoms of type `ty` carry an outgoing set.
    fn is_link_type(&self, ty: Type) -> bool {
        self.is_assignable_from(Type::LINK, ty)
    }

    /// Exact match, or registry-confirmed descent when `subclass` is set.
    fn type_matches(&self, wanted: Type, subclass: bool, actual: Type) -> bool {
        if subclass {
            self.is_assignable_from(wanted, actual)
        } else {
            wanted == actual
        }
    }
}

// =============================================================================
// CLASS SERVER
// =============================================================================

#[derive(Debug, Clone)]
struct TypeInfo {
    name: String,
    parent: Option<Type>,
}

/// In-memory type registry.
///
/// Each type has at most one parent, so `is_assignable_from` walks the parent
/// chain of the candidate.
#[derive(Debug, Clone)]
pub struct ClassServer {
    types: BTreeMap<Type, TypeInfo>,
    by_name: BTreeMap<String, Type>,
    next_code: u16,
}

impl Default for ClassServer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassServer {
    /// Create a registry holding the reserved roots `Atom`, `Node` and `Link`.
    #[must_use]
    pub fn new() -> Self {
        let mut server = Self {
            types: BTreeMap::new(),
            by_name: BTreeMap::new(),
            next_code: FIRST_USER_TYPE_CODE,
        };
        server.insert(Type::ATOM, "Atom", None);
        server.insert(Type::NODE, "Node", Some(Type::ATOM));
        server.insert(Type::LINK, "Link", Some(Type::ATOM));
        server
    }

    fn insert(&mut self, ty: Type, name: &str, parent: Option<Type>) {
        self.types.insert(
            ty,
            TypeInfo {
                name: name.to_string(),
                parent,
            },
        );
        self.by_name.insert(name.to_string(), ty);
    }

    /// Register a new type under `parent`.
    ///
    /// Registering an existing name with the same parent returns the existing
    /// type; a different parent is rejected.
    pub fn add_type(&mut self, name: &str, parent: Type) -> Result<Type, AtomSetError> {
        if !self.types.contains_key(&parent) {
            return Err(AtomSetError::UnknownType(parent));
        }
        if let Some(&existing) = self.by_name.get(name) {
            let same_parent = self
                .types
                .get(&existing)
                .is_some_and(|info| info.parent == Some(parent));
            if same_parent {
                return Ok(existing);
            }
            return Err(AtomSetError::InvalidAtom(format!(
                "type '{}' already registered under another parent",
                name
            )));
        }

        let ty = Type(self.next_code);
        self.next_code = self.next_code.checked_add(1).ok_or_else(|| {
            AtomSetError::InvalidAtom("type code space exhausted".to_string())
        })?;
        self.insert(ty, name, Some(parent));
        Ok(ty)
    }

    /// Get the parent of a type (`None` for `Atom` and unknown types).
    #[must_use]
    pub fn parent(&self, ty: Type) -> Option<Type> {
        self.types.get(&ty).and_then(|info| info.parent)
    }

    /// Number of registered types, roots included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check whether a type code is registered.
    #[must_use]
    pub fn contains(&self, ty: Type) -> bool {
        self.types.contains_key(&ty)
    }
}

impl TypeRegistry for ClassServer {
    fn is_assignable_from(&self, ancestor: Type, candidate: Type) -> bool {
        let mut current = Some(candidate);
        // Bounded by the number of registered types even on a corrupt map.
        let mut remaining = self.types.len();
        while let Some(ty) = current {
            if ty == ancestor {
                return self.types.contains_key(&ty);
            }
            if remaining == 0 {
                return false;
            }
            remaining -= 1;
            current = self.parent(ty);
        }
        false
    }

    fn type_name(&self, ty: Type) -> Option<&str> {
        self.types.get(&ty).map(|info| info.name.as_str())
    }

    fn type_by_name(&self, name: &str) -> Option<Type> {
        self.by_name.get(name).copied()
    }
}

// =============================================================================
// TESTS
// =============================================================================
