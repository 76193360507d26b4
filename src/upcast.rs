//! Automatic upcasts: general-object operations on basic objects.
//!
//! A basic object can always be promoted to a singleton union, so every
//! operation a general object defines is meaningful on its basic variant.
//! The forwarding methods here promote the receiver, invoke the general
//! operation with the original arguments, and return its result unchanged.
//! The promotable pairs form a fixed, closed set; inherent methods on the
//! basic types take precedence over these forwards under Rust's method
//! resolution, so a natively defined operation always wins.

use crate::algebra::map::{BasicMap, Map};
use crate::algebra::set::{BasicSet, Set};
use crate::utils::errors::PolyResult;

/// Promotion of a basic object into its corresponding general object.
pub trait AsGeneral: Sized {
    /// The general (union) counterpart.
    type General;

    /// Promote into a singleton union.
    fn upcast(self) -> Self::General;
}

impl AsGeneral for BasicSet {
    type General = Set;

    fn upcast(self) -> Set {
        Set::from_basic_set(self)
    }
}

impl AsGeneral for BasicMap {
    type General = Map;

    fn upcast(self) -> Map {
        Map::from_basic_map(self)
    }
}

/// [`Set`] operations forwarded to promotable receivers.
pub trait SetExt: AsGeneral<General = Set> + Clone {
    /// Union with a set. See [`Set::union`].
    fn union(self, other: Set) -> PolyResult<Set> {
        self.upcast().union(other)
    }

    /// Drop duplicate basic sets. See [`Set::coalesce`].
    fn coalesce(self) -> Set {
        self.upcast().coalesce()
    }

    /// Emptiness check. See [`Set::is_empty`].
    fn is_empty(&self) -> PolyResult<bool> {
        self.clone().upcast().is_empty()
    }

    /// Representation-level equality. See [`Set::is_equal`].
    fn is_equal(&self, other: &Set) -> bool {
        self.clone().upcast().is_equal(other)
    }

    /// The basic sets of the union. See [`Set::get_basic_sets`].
    fn get_basic_sets(&self) -> Vec<BasicSet> {
        self.clone().upcast().get_basic_sets()
    }
}

impl SetExt for BasicSet {}

/// [`Map`] operations forwarded to promotable receivers.
pub trait MapExt: AsGeneral<General = Map> + Clone {
    /// Union with a map. See [`Map::union`].
    fn union(self, other: Map) -> PolyResult<Map> {
        self.upcast().union(other)
    }

    /// Drop duplicate basic maps. See [`Map::coalesce`].
    fn coalesce(self) -> Map {
        self.upcast().coalesce()
    }

    /// Emptiness check. See [`Map::is_empty`].
    fn is_empty(&self) -> PolyResult<bool> {
        self.clone().upcast().is_empty()
    }

    /// Representation-level equality. See [`Map::is_equal`].
    fn is_equal(&self, other: &Map) -> bool {
        self.clone().upcast().is_equal(other)
    }

    /// The basic maps of the union. See [`Map::get_basic_maps`].
    fn get_basic_maps(&self) -> Vec<BasicMap> {
        self.clone().upcast().get_basic_maps()
    }

    /// The domain of the relation. See [`Map::domain`].
    fn domain(self) -> PolyResult<Set> {
        self.upcast().domain()
    }

    /// The range of the relation. See [`Map::range`].
    fn range(self) -> PolyResult<Set> {
        self.upcast().range()
    }
}

impl MapExt for BasicMap {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::space::Space;

    #[test]
    fn test_upcast_matches_manual_promotion() {
        let space = Space::set_alloc(0, 1);
        let a = BasicSet::universe(space.clone()).unwrap();
        let b = Set::universe(space).unwrap();

        let via_forward = a.clone().union(b.clone()).unwrap();
        let via_manual = Set::from_basic_set(a).union(b).unwrap();
        assert!(via_forward.is_equal(&via_manual));
    }

    #[test]
    fn test_basic_set_gains_general_queries() {
        let bset = BasicSet::universe(Space::set_alloc(0, 2)).unwrap();
        assert!(!bset.is_empty().unwrap());
        assert_eq!(bset.get_basic_sets().len(), 1);
    }

    #[test]
    fn test_basic_map_gains_domain() {
        use crate::algebra::space::DimType;
        let bmap = BasicMap::universe(Space::alloc(0, 2, 1));
        let dom = bmap.domain().unwrap();
        assert_eq!(dom.space().size(DimType::SET), 2);
    }
}
