//! # Predicate Filters
//!
//! Structural filters over the atoms a handle set refers to.
//!
//! Every filter consumes the set, resolves each handle through an
//! `AtomSpace`, and keeps the entries whose atom satisfies the criteria, in
//! their original order. All of them run the same two-phase sweep
//! (`HandleSet::try_retain`).
//!
//! ## Failure Semantics
//!
//! - A criterion that no atom can satisfy (a name asked of a non-node type,
//!   a position past the requested arity) yields an empty set.
//! - A handle that does not resolve aborts the filter with
//!   `AtomSetError::UnknownHandle`; the input is released.
//!
//! ## Neighbor Positions
//!
//! The positional variants always inspect the outgoing neighbor of the atom
//! being tested, in both phases of the sweep.

use crate::handle_set::HandleSet;
use crate::table::AtomSpace;
use crate::{Arity, Atom, AtomSetError, Handle, Sti, Type, VersionHandle};

impl HandleSet {
    /// Shared sweep: resolve each handle and test its atom.
    fn sweep<S, F>(self, space: &S, mut keep: F) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
        F: FnMut(&Atom) -> Result<bool, AtomSetError>,
    {
        self.try_retain(|handle| keep(space.resolve(handle)?))
    }

    // =========================================================================
    // ATOM-LEVEL CRITERIA
    // =========================================================================

    /// Keep atoms whose removal flag equals `marked`.
    pub fn filter_by_removal_flag<S>(self, space: &S, marked: bool) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        self.sweep(space, |atom| Ok(atom.is_marked_for_removal() == marked))
    }

    /// Keep atoms with exactly `arity` outgoing edges.
    pub fn filter_by_arity<S>(self, space: &S, arity: Arity) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        self.sweep(space, |atom| Ok(atom.arity() == arity))
    }

    /// Keep atoms of type `ty`, or of any subtype when `subclass` is set.
    ///
    /// `Atom` with `subclass` matches everything and returns the input as is.
    pub fn filter_by_type<S>(self, space: &S, ty: Type, subclass: bool) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        if ty == Type::ATOM && subclass {
            return Ok(self);
        }
        self.sweep(space, |atom| Ok(space.type_matches(ty, subclass, atom.atom_type())))
    }

    /// Keep nodes named `name`. Links never match.
    ///
    /// Atoms whose type descends from neither `NODE` nor `LINK` carry no name
    /// constraint and are kept.
    pub fn filter_by_name<S>(self, space: &S, name: &str) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        self.sweep(space, |atom| {
            let ty = atom.atom_type();
            Ok(!space.is_link_type(ty)
                && (!space.is_node_type(ty) || atom.name() == Some(name)))
        })
    }

    /// Keep atoms matching `ty`/`subclass` and, when given, named `name`.
    ///
    /// A name combined with a type that cannot be a node yields the empty set.
    pub fn filter_by_name_and_type<S>(
        self,
        space: &S,
        name: Option<&str>,
        ty: Type,
        subclass: bool,
    ) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        if name.is_some() && !space.is_node_type(ty) {
            tracing::debug!(?ty, "name requested for a non-node type");
            return Ok(HandleSet::new());
        }
        self.sweep(space, |atom| {
            Ok(space.type_matches(ty, subclass, atom.atom_type())
                && name.is_none_or(|n| atom.name() == Some(n)))
        })
    }

    /// Keep atoms whose short-term importance lies in `[lower, upper]`.
    pub fn filter_by_attention<S>(self, space: &S, lower: Sti, upper: Sti) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        self.sweep(space, |atom| Ok((lower..=upper).contains(&atom.attention().sti())))
    }

    /// Keep atoms holding a non-null value under `version`.
    ///
    /// A null version requests no context and returns the input unchanged.
    pub fn filter_by_version<S>(self, space: &S, version: VersionHandle) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        if version.is_null() {
            return Ok(self);
        }
        self.sweep(space, |atom| Ok(atom.truth().has_version(version)))
    }

    // =========================================================================
    // OUTGOING-SET CRITERIA
    // =========================================================================

    /// Keep atoms of `arity` whose neighbor at `position` is `target`.
    pub fn filter_by_outgoing_at<S>(
        self,
        space: &S,
        target: Handle,
        position: Arity,
        arity: Arity,
    ) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        self.sweep(space, |atom| {
            Ok(atom.arity() == arity
                && position < arity
                && atom.outgoing_at(position) == Some(target))
        })
    }

    /// Keep only links that point at `target`.
    ///
    /// Intersects with `target`'s incoming set, so the result is ascending.
    pub fn filter_by_incoming_of<S>(self, space: &S, target: Handle) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        space.resolve(target)?;
        let incoming = space.incoming(target).cloned().unwrap_or_default();
        self.intersect(incoming)
    }

    /// Keep atoms of `arity` with at least one neighbor of a matching type.
    pub fn filter_by_any_outgoing_type<S>(
        self,
        space: &S,
        ty: Type,
        subclass: bool,
        arity: Arity,
    ) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        self.sweep(space, |atom| {
            if atom.arity() != arity {
                return Ok(false);
            }
            any_neighbor(space, atom, |neighbor| {
                space.type_matches(ty, subclass, neighbor.atom_type())
            })
        })
    }

    /// Keep atoms of `arity` whose neighbor at `position` has a matching type.
    pub fn filter_by_outgoing_type_at<S>(
        self,
        space: &S,
        ty: Type,
        subclass: bool,
        position: Arity,
        arity: Arity,
    ) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        self.sweep(space, |atom| {
            if atom.arity() != arity {
                return Ok(false);
            }
            let Some(neighbor) = neighbor_at(space, atom, position)? else {
                return Ok(false);
            };
            Ok(space.type_matches(ty, subclass, neighbor.atom_type()))
        })
    }

    /// Keep atoms of `arity` whose neighbor at `position` has a matching
    /// type and, when `name` is given, is a node of that name.
    pub fn filter_by_outgoing_name_type_at<S>(
        self,
        space: &S,
        name: Option<&str>,
        ty: Type,
        subclass: bool,
        position: Arity,
        arity: Arity,
    ) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        self.sweep(space, |atom| {
            if atom.arity() != arity {
                return Ok(false);
            }
            let Some(neighbor) = neighbor_at(space, atom, position)? else {
                return Ok(false);
            };
            Ok(space.type_matches(ty, subclass, neighbor.atom_type())
                && name_matches(space, neighbor, name))
        })
    }

    /// Keep atoms of `arity` whose neighbor at `position` is, when `name` is
    /// given, a node of that name.
    pub fn filter_by_outgoing_name_at<S>(
        self,
        space: &S,
        name: Option<&str>,
        position: Arity,
        arity: Arity,
    ) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        self.sweep(space, |atom| {
            if atom.arity() != arity {
                return Ok(false);
            }
            let Some(neighbor) = neighbor_at(space, atom, position)? else {
                return Ok(false);
            };
            Ok(name_matches(space, neighbor, name))
        })
    }

    /// Keep atoms with a neighbor that holds a non-null value under `version`
    /// and matches `ty`/`subclass`. A null version returns the input unchanged.
    pub fn filter_by_outgoing_version<S>(
        self,
        space: &S,
        ty: Type,
        subclass: bool,
        version: VersionHandle,
    ) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        if version.is_null() {
            return Ok(self);
        }
        self.sweep(space, |atom| {
            any_neighbor(space, atom, |neighbor| {
                neighbor.truth().has_version(version)
                    && space.type_matches(ty, subclass, neighbor.atom_type())
            })
        })
    }

    /// Keep atoms with a neighbor of exactly type `ty`, named `name`, that
    /// holds a non-null value under `version`. A null version returns the
    /// input unchanged.
    pub fn filter_by_outgoing_name_version<S>(
        self,
        space: &S,
        name: &str,
        ty: Type,
        version: VersionHandle,
    ) -> Result<Self, AtomSetError>
    where
        S: AtomSpace + ?Sized,
    {
        if version.is_null() {
            return Ok(self);
        }
        self.sweep(space, |atom| {
            any_neighbor(space, atom, |neighbor| {
                neighbor.truth().has_version(version)
                    && neighbor.atom_type() == ty
                    && neighbor.name() == Some(name)
            })
        })
    }
}

// =============================================================================
// NEIGHBOR HELPERS
// =============================================================================

/// Resolve the neighbor at `position`; `None` past the end of the outgoing set.
fn neighbor_at<'a, S>(
    space: &'a S,
    atom: &Atom,
    position: Arity,
) -> Result<Option<&'a Atom>, AtomSetError>
where
    S: AtomSpace + ?Sized,
{
    atom.outgoing_at(position)
        .map(|handle| space.resolve(handle))
        .transpose()
}

fn any_neighbor<S, F>(space: &S, atom: &Atom, mut test: F) -> Result<bool, AtomSetError>
where
    S: AtomSpace + ?Sized,
    F: FnMut(&Atom) -> bool,
{
    for &handle in atom.outgoing() {
        if test(space.resolve(handle)?) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// No name matches anything; a name only matches a node carrying it.
fn name_matches<S>(space: &S, neighbor: &Atom, name: Option<&str>) -> bool
where
    S: AtomSpace + ?Sized,
{
    match name {
        None => true,
        Some(wanted) => {
            space.is_node_type(neighbor.atom_type()) && neighbor.name() == Some(wanted)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AtomTable, AttentionValue, CompositeTruthValue, IndicatorType, TruthValue,
    };

    struct Fixture {
        table: AtomTable,
        concept: Type,
        predicate: Type,
        list: Type,
        eval: Type,
    }

    fn fixture() -> Fixture {
        let mut table = AtomTable::new();
        let concept = table.add_type("ConceptNode", Type::NODE).expect("type");
        let predicate = table.add_type("PredicateNode", Type::NODE).expect("type");
        let list = table.add_type("ListLink", Type::LINK).expect("type");
        let eval = table.add_type("EvaluationLink", Type::LINK).expect("type");
        Fixture {
            table,
            concept,
            predicate,
            list,
            eval,
        }
    }

    fn context(raw: u64) -> VersionHandle {
        VersionHandle::new(IndicatorType::Contextual, Handle(raw))
    }

    fn versioned(version: VersionHandle) -> TruthValue {
        TruthValue::Composite(
            CompositeTruthValue::new(TruthValue::Null)
                .with_version(version, TruthValue::simple(0.8, 0.9)),
        )
    }

    #[test]
    fn removal_flag_splits_live_and_tombstoned() {
        let mut f = fixture();
        let a = f.table.add_node(f.concept, "a").expect("node");
        let b = f.table.add_node(f.concept, "b").expect("node");
        let c = f.table.add_node(f.concept, "c").expect("node");
        f.table.mark_for_removal(b, true).expect("mark");

        let all = HandleSet::from_handles(&[a, b, c]);
        let live = all.clone().filter_by_removal_flag(&f.table, false).expect("filter");
        let dead = all.filter_by_removal_flag(&f.table, true).expect("filter");

        assert_eq!(live.to_handle_vec(), vec![a, c]);
        assert_eq!(dead.to_handle_vec(), vec![b]);
    }

    #[test]
    fn arity_filter_interior_rejection() {
        let mut f = fixture();
        let a = f.table.add_node(f.concept, "a").expect("node");
        let b = f.table.add_node(f.concept, "b").expect("node");
        let pair = f.table.add_link(f.list, vec![a, b]).expect("link");
        let one = f.table.add_link(f.list, vec![a]).expect("link");

        let set = HandleSet::from_handles(&[pair, a, one, pair, b]);
        let result = set.filter_by_arity(&f.table, 2).expect("filter");
        assert_eq!(result.to_handle_vec(), vec![pair, pair]);
    }

    #[test]
    fn type_filter_exact_and_subclass() {
        let mut f = fixture();
        let cat = f.table.add_node(f.concept, "cat").expect("node");
        let likes = f.table.add_node(f.predicate, "likes").expect("node");
        let link = f.table.add_link(f.list, vec![cat]).expect("link");
        let set = HandleSet::from_handles(&[link, cat, likes]);

        let exact = set.clone().filter_by_type(&f.table, f.concept, false).expect("filter");
        assert_eq!(exact.to_handle_vec(), vec![cat]);

        let nodes = set.clone().filter_by_type(&f.table, Type::NODE, true).expect("filter");
        assert_eq!(nodes.to_handle_vec(), vec![cat, likes]);

        let none = set.filter_by_type(&f.table, Type::NODE, false).expect("filter");
        assert!(none.is_empty());
    }

    #[test]
    fn atom_with_subclass_is_a_passthrough() {
        let f = fixture();
        // Unknown handles are not even resolved on this path.
        let set = HandleSet::from_handles(&[Handle(900), Handle(901)]);
        let result = set.filter_by_type(&f.table, Type::ATOM, true).expect("filter");
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn unknown_handle_aborts_filter() {
        let mut f = fixture();
        let a = f.table.add_node(f.concept, "a").expect("node");
        let set = HandleSet::from_handles(&[a, Handle(404)]);
        let result = set.filter_by_arity(&f.table, 0);
        assert_eq!(result, Err(AtomSetError::UnknownHandle(Handle(404))));
    }

    #[test]
    fn name_filter_rejects_links() {
        let mut f = fixture();
        let cat = f.table.add_node(f.concept, "cat").expect("node");
        let cat2 = f.table.add_node(f.predicate, "cat").expect("node");
        let dog = f.table.add_node(f.concept, "dog").expect("node");
        let link = f.table.add_link(f.list, vec![cat]).expect("link");

        let set = HandleSet::from_handles(&[link, cat, dog, cat2]);
        let result = set.filter_by_name(&f.table, "cat").expect("filter");
        assert_eq!(result.to_handle_vec(), vec![cat, cat2]);
    }

    #[test]
    fn name_filter_keeps_atoms_outside_node_and_link() {
        let mut f = fixture();
        let cat = f.table.add_node(f.concept, "cat").expect("node");
        let dog = f.table.add_node(f.concept, "dog").expect("node");
        let bare = f.table.add_link(Type::ATOM, vec![cat]).expect("atom");

        let set = HandleSet::from_handles(&[dog, cat, bare]);
        let result = set.filter_by_name(&f.table, "cat").expect("filter");
        assert_eq!(result.to_handle_vec(), vec![cat, bare]);
    }

    #[test]
    fn name_and_type_filter() {
        let mut f = fixture();
        let cat = f.table.add_node(f.concept, "cat").expect("node");
        let dog = f.table.add_node(f.concept, "dog").expect("node");
        let cat2 = f.table.add_node(f.predicate, "cat").expect("node");
        let set = HandleSet::from_handles(&[dog, cat2, cat]);

        let typed = set
            .clone()
            .filter_by_name_and_type(&f.table, Some("cat"), f.concept, false)
            .expect("filter");
        assert_eq!(typed.to_handle_vec(), vec![cat]);

        let any_node = set
            .clone()
            .filter_by_name_and_type(&f.table, Some("cat"), Type::NODE, true)
            .expect("filter");
        assert_eq!(any_node.to_handle_vec(), vec![cat2, cat]);

        let unnamed = set
            .filter_by_name_and_type(&f.table, None, f.concept, false)
            .expect("filter");
        assert_eq!(unnamed.to_handle_vec(), vec![dog, cat]);
    }

    #[test]
    fn name_with_link_type_is_empty() {
        let mut f = fixture();
        let cat = f.table.add_node(f.concept, "cat").expect("node");
        let link = f.table.add_link(f.list, vec![cat]).expect("link");
        let result = HandleSet::from_handles(&[cat, link])
            .filter_by_name_and_type(&f.table, Some("cat"), f.list, false)
            .expect("filter");
        assert!(result.is_empty());
    }

    #[test]
    fn outgoing_at_position() {
        let mut f = fixture();
        let a = f.table.add_node(f.concept, "a").expect("node");
        let b = f.table.add_node(f.concept, "b").expect("node");
        let ab = f.table.add_link(f.list, vec![a, b]).expect("link");
        let ba = f.table.add_link(f.list, vec![b, a]).expect("link");
        let aa = f.table.add_link(f.list, vec![a, a, b]).expect("link");
        let set = HandleSet::from_handles(&[ab, ba, aa]);

        let first_a = set.clone().filter_by_outgoing_at(&f.table, a, 0, 2).expect("filter");
        assert_eq!(first_a.to_handle_vec(), vec![ab]);

        let past_end = set.filter_by_outgoing_at(&f.table, a, 2, 2).expect("filter");
        assert!(past_end.is_empty());
    }

    #[test]
    fn incoming_of_intersects_with_incoming_set() {
        let mut f = fixture();
        let a = f.table.add_node(f.concept, "a").expect("node");
        let b = f.table.add_node(f.concept, "b").expect("node");
        let l1 = f.table.add_link(f.list, vec![a]).expect("link");
        let l2 = f.table.add_link(f.list, vec![b]).expect("link");
        let l3 = f.table.add_link(f.list, vec![b, a]).expect("link");

        let set = HandleSet::from_handles(&[l3, l2, l1]);
        let result = set.filter_by_incoming_of(&f.table, a).expect("filter");
        assert_eq!(result.to_handle_vec(), vec![l1, l3]);

        let none = HandleSet::from_handles(&[l1]).filter_by_incoming_of(&f.table, l1);
        assert!(none.expect("filter").is_empty());

        let unknown = HandleSet::from_handles(&[l1]).filter_by_incoming_of(&f.table, Handle(404));
        assert_eq!(unknown, Err(AtomSetError::UnknownHandle(Handle(404))));
    }

    #[test]
    fn any_outgoing_type_match() {
        let mut f = fixture();
        let cat = f.table.add_node(f.concept, "cat").expect("node");
        let likes = f.table.add_node(f.predicate, "likes").expect("node");
        let inner = f.table.add_link(f.list, vec![cat, cat]).expect("link");
        let eval = f.table.add_link(f.eval, vec![likes, inner]).expect("link");
        let pair = f.table.add_link(f.list, vec![cat, cat]).expect("link");
        let set = HandleSet::from_handles(&[eval, pair, inner]);

        let with_predicate = set
            .clone()
            .filter_by_any_outgoing_type(&f.table, f.predicate, false, 2)
            .expect("filter");
        assert_eq!(with_predicate.to_handle_vec(), vec![eval]);

        let with_link = set
            .clone()
            .filter_by_any_outgoing_type(&f.table, Type::LINK, true, 2)
            .expect("filter");
        assert_eq!(with_link.to_handle_vec(), vec![eval]);

        let wrong_arity = set
            .filter_by_any_outgoing_type(&f.table, f.concept, false, 3)
            .expect("filter");
        assert!(wrong_arity.is_empty());
    }

    #[test]
    fn outgoing_type_at_position() {
        let mut f = fixture();
        let cat = f.table.add_node(f.concept, "cat").expect("node");
        let likes = f.table.add_node(f.predicate, "likes").expect("node");
        let pl = f.table.add_link(f.list, vec![likes, cat]).expect("link");
        let cp = f.table.add_link(f.list, vec![cat, likes]).expect("link");
        let set = HandleSet::from_handles(&[cp, pl]);

        let result = set
            .clone()
            .filter_by_outgoing_type_at(&f.table, f.predicate, false, 0, 2)
            .expect("filter");
        assert_eq!(result.to_handle_vec(), vec![pl]);

        let out_of_range = set
            .filter_by_outgoing_type_at(&f.table, Type::NODE, true, 5, 2)
            .expect("filter");
        assert!(out_of_range.is_empty());
    }

    #[test]
    fn position_name_compares_candidates_own_neighbor() {
        // Survivor `first` points at "cat"; the candidate after it points at
        // "dog". Each candidate is judged by its own neighbor only.
        let mut f = fixture();
        let cat = f.table.add_node(f.concept, "cat").expect("node");
        let dog = f.table.add_node(f.concept, "dog").expect("node");
        let first = f.table.add_link(f.list, vec![cat, dog]).expect("link");
        let second = f.table.add_link(f.list, vec![dog, cat]).expect("link");
        let third = f.table.add_link(f.list, vec![cat, cat]).expect("link");
        let set = HandleSet::from_handles(&[first, second, third]);

        let typed = set
            .clone()
            .filter_by_outgoing_name_type_at(&f.table, Some("cat"), f.concept, false, 0, 2)
            .expect("filter");
        assert_eq!(typed.to_handle_vec(), vec![first, third]);

        let untyped = set
            .filter_by_outgoing_name_at(&f.table, Some("cat"), 0, 2)
            .expect("filter");
        assert_eq!(untyped.to_handle_vec(), vec![first, third]);
    }

    #[test]
    fn position_name_rejects_link_neighbor_when_named() {
        let mut f = fixture();
        let cat = f.table.add_node(f.concept, "cat").expect("node");
        let inner = f.table.add_link(f.list, vec![cat]).expect("link");
        let outer = f.table.add_link(f.eval, vec![inner, cat]).expect("link");
        let set = HandleSet::from_handles(&[outer]);

        let named = set
            .clone()
            .filter_by_outgoing_name_at(&f.table, Some("cat"), 0, 2)
            .expect("filter");
        assert!(named.is_empty());

        let unnamed = set
            .filter_by_outgoing_name_type_at(&f.table, None, Type::LINK, true, 0, 2)
            .expect("filter");
        assert_eq!(unnamed.to_handle_vec(), vec![outer]);
    }

    #[test]
    fn attention_range_is_inclusive() {
        let mut f = fixture();
        let mut handles = Vec::new();
        for (name, sti) in [("low", -5), ("mid", 3), ("high", 12), ("edge", 10), ("zero", 0)] {
            let h = f.table.add_node(f.concept, name).expect("node");
            f.table
                .set_attention(h, AttentionValue::with_sti(sti))
                .expect("sti");
            handles.push(h);
        }
        let result = HandleSet::from_handles(&handles)
            .filter_by_attention(&f.table, 0, 10)
            .expect("filter");
        assert_eq!(result.to_handle_vec(), vec![handles[1], handles[3], handles[4]]);
    }

    #[test]
    fn version_filter_on_own_truth() {
        let mut f = fixture();
        let a = f.table.add_node(f.concept, "a").expect("node");
        let b = f.table.add_node(f.concept, "b").expect("node");
        let c = f.table.add_node(f.concept, "c").expect("node");
        f.table.set_truth(a, versioned(context(50))).expect("tv");
        f.table.set_truth(b, TruthValue::simple(1.0, 1.0)).expect("tv");
        f.table.set_truth(c, versioned(context(51))).expect("tv");
        let set = HandleSet::from_handles(&[a, b, c]);

        let result = set.clone().filter_by_version(&f.table, context(50)).expect("filter");
        assert_eq!(result.to_handle_vec(), vec![a]);

        let untouched = set.filter_by_version(&f.table, VersionHandle::NULL).expect("filter");
        assert_eq!(untouched.to_handle_vec(), vec![a, b, c]);
    }

    #[test]
    fn null_version_skips_resolution() {
        let f = fixture();
        let set = HandleSet::from_handles(&[Handle(404)]);
        let result = set
            .filter_by_outgoing_version(&f.table, Type::ATOM, true, VersionHandle::NULL)
            .expect("filter");
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn outgoing_version_filters() {
        let mut f = fixture();
        let cat = f.table.add_node(f.concept, "cat").expect("node");
        let dog = f.table.add_node(f.concept, "dog").expect("node");
        let likes = f.table.add_node(f.predicate, "likes").expect("node");
        f.table.set_truth(cat, versioned(context(7))).expect("tv");
        f.table.set_truth(likes, versioned(context(8))).expect("tv");
        let with_cat = f.table.add_link(f.list, vec![dog, cat]).expect("link");
        let with_likes = f.table.add_link(f.list, vec![likes, dog]).expect("link");
        let set = HandleSet::from_handles(&[with_likes, with_cat]);

        let by_concept = set
            .clone()
            .filter_by_outgoing_version(&f.table, f.concept, false, context(7))
            .expect("filter");
        assert_eq!(by_concept.to_handle_vec(), vec![with_cat]);

        let by_node = set
            .clone()
            .filter_by_outgoing_version(&f.table, Type::NODE, true, context(8))
            .expect("filter");
        assert_eq!(by_node.to_handle_vec(), vec![with_likes]);

        let by_name = set
            .clone()
            .filter_by_outgoing_name_version(&f.table, "cat", f.concept, context(7))
            .expect("filter");
        assert_eq!(by_name.to_handle_vec(), vec![with_cat]);

        let wrong_name = set
            .filter_by_outgoing_name_version(&f.table, "dog", f.concept, context(7))
            .expect("filter");
        assert!(wrong_name.is_empty());
    }

    #[test]
    fn filters_are_idempotent() {
        let mut f = fixture();
        let a = f.table.add_node(f.concept, "a").expect("node");
        let b = f.table.add_node(f.predicate, "b").expect("node");
        let l = f.table.add_link(f.list, vec![a, b]).expect("link");
        let set = HandleSet::from_handles(&[l, a, b, l, a]);

        let once = set.clone().filter_by_type(&f.table, f.concept, false).expect("filter");
        let twice = once.clone().filter_by_type(&f.table, f.concept, false).expect("filter");
        assert_eq!(once, twice);

        let once = set.clone().filter_by_arity(&f.table, 2).expect("filter");
        let twice = once.clone().filter_by_arity(&f.table, 2).expect("filter");
        assert_eq!(once, twice);
    }
}
