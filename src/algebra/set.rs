//! Integer sets: basic sets (one conjunction) and sets (unions).

use serde::{Deserialize, Serialize};

use crate::algebra::constraint::{normalized_system, Constraint, ConstraintKind};
use crate::algebra::eliminate::{conjunction_is_empty, project_out_range};
use crate::algebra::space::{DimType, Space};
use crate::utils::errors::{PolyResult, PolySetError};

/// A basic set: a single conjunction of constraints over a set space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicSet {
    space: Space,
    constraints: Vec<Constraint>,
}

impl BasicSet {
    /// The unconstrained set over `space`. Fails if `space` is a map space.
    pub fn universe(space: Space) -> PolyResult<Self> {
        if space.is_map() {
            return Err(PolySetError::InvalidArgument(
                "basic set requires a set space".into(),
            ));
        }
        Ok(Self { space, constraints: Vec::new() })
    }

    /// The space this set lives in.
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Intersect with a single constraint, returning the refined set.
    pub fn add_constraint(self, constraint: &Constraint) -> PolyResult<Self> {
        self.space.check_compatible(constraint.space())?;
        let mut constraints = self.constraints;
        constraints.push(constraint.clone());
        Ok(Self { space: self.space, constraints })
    }

    /// Intersect two basic sets over the same space.
    pub fn intersect(self, other: BasicSet) -> PolyResult<Self> {
        self.space.check_compatible(&other.space)?;
        let mut constraints = self.constraints;
        constraints.extend(other.constraints);
        Ok(Self { space: self.space, constraints })
    }

    /// Eliminate the contiguous dimension range `(tp, first, n)`.
    pub fn project_out(self, tp: DimType, first: usize, n: usize) -> PolyResult<Self> {
        let (space, constraints) = project_out_range(self.space, self.constraints, tp, first, n)?;
        Ok(Self { space, constraints })
    }

    /// Invoke `f` on each constraint of the conjunction.
    pub fn foreach_constraint(&self, mut f: impl FnMut(&Constraint)) {
        for c in &self.constraints {
            f(c);
        }
    }

    /// Get the list of constraints.
    pub fn get_constraints(&self) -> Vec<Constraint> {
        let mut result = Vec::new();
        self.foreach_constraint(|c| result.push(c.clone()));
        result
    }

    /// Membership test for a concrete point. The set must have no
    /// existential dimensions.
    pub fn contains(&self, point: &[i64], params: &[i64]) -> bool {
        self.constraints
            .iter()
            .all(|c| c.is_satisfied(params, &[], point))
    }

    pub(crate) fn is_empty_conjunction(&self) -> PolyResult<bool> {
        conjunction_is_empty(&self.space, &self.constraints)
    }

    pub(crate) fn normal_form(&self) -> Vec<(ConstraintKind, Vec<i64>)> {
        normalized_system(&self.constraints)
    }
}

/// A set: a union of basic sets over a common space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Set {
    space: Space,
    basics: Vec<BasicSet>,
}

impl Set {
    /// Promote a basic set to a singleton union.
    pub fn from_basic_set(bset: BasicSet) -> Self {
        Self { space: bset.space.clone(), basics: vec![bset] }
    }

    /// The unconstrained set over `space`.
    pub fn universe(space: Space) -> PolyResult<Self> {
        Ok(Self::from_basic_set(BasicSet::universe(space)?))
    }

    /// The empty set over `space`.
    pub fn empty(space: Space) -> PolyResult<Self> {
        if space.is_map() {
            return Err(PolySetError::InvalidArgument(
                "set requires a set space".into(),
            ));
        }
        Ok(Self { space, basics: Vec::new() })
    }

    /// The space this set lives in.
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Union of two sets over the same space.
    pub fn union(self, other: Set) -> PolyResult<Set> {
        self.space.check_compatible(&other.space)?;
        let mut basics = self.basics;
        basics.extend(other.basics);
        Ok(Set { space: self.space, basics })
    }

    /// Intersection of two sets over the same space (pairwise on basics).
    pub fn intersect(self, other: &Set) -> PolyResult<Set> {
        self.space.check_compatible(&other.space)?;
        let mut basics = Vec::new();
        for a in &self.basics {
            for b in &other.basics {
                basics.push(a.clone().intersect(b.clone())?);
            }
        }
        Ok(Set { space: self.space, basics })
    }

    /// Intersect every basic set with a single constraint.
    pub fn add_constraint(self, constraint: &Constraint) -> PolyResult<Self> {
        self.space.check_compatible(constraint.space())?;
        let basics = self
            .basics
            .into_iter()
            .map(|b| b.add_constraint(constraint))
            .collect::<PolyResult<Vec<_>>>()?;
        Ok(Self { space: self.space, basics })
    }

    /// Eliminate the contiguous dimension range `(tp, first, n)` from every
    /// basic set.
    pub fn project_out(self, tp: DimType, first: usize, n: usize) -> PolyResult<Self> {
        let space = self.space.drop_dims(tp, first, n)?;
        let basics = self
            .basics
            .into_iter()
            .map(|b| b.project_out(tp, first, n))
            .collect::<PolyResult<Vec<_>>>()?;
        Ok(Self { space, basics })
    }

    /// Invoke `f` on each basic set of the union.
    pub fn foreach_basic_set(&self, mut f: impl FnMut(&BasicSet)) {
        for b in &self.basics {
            f(b);
        }
    }

    /// Get the list of basic sets in this union.
    pub fn get_basic_sets(&self) -> Vec<BasicSet> {
        let mut result = Vec::new();
        self.foreach_basic_set(|b| result.push(b.clone()));
        result
    }

    /// True if no basic set admits a point.
    pub fn is_empty(&self) -> PolyResult<bool> {
        for b in &self.basics {
            if !b.is_empty_conjunction()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Representation-level equality: same space sizes, same union of
    /// normalized conjunctions.
    pub fn is_equal(&self, other: &Set) -> bool {
        if self.space.check_compatible(&other.space).is_err() {
            return false;
        }
        let mut a: Vec<_> = self.basics.iter().map(BasicSet::normal_form).collect();
        let mut b: Vec<_> = other.basics.iter().map(BasicSet::normal_form).collect();
        a.sort();
        b.sort();
        a.dedup();
        b.dedup();
        a == b
    }

    /// Drop duplicate basic sets from the union.
    pub fn coalesce(self) -> Set {
        let mut seen = Vec::new();
        let mut basics = Vec::new();
        for b in self.basics {
            let key = b.normal_form();
            if !seen.contains(&key) {
                seen.push(key);
                basics.push(b);
            }
        }
        Set { space: self.space, basics }
    }

    /// Membership test for a concrete point (any basic set accepts).
    pub fn contains(&self, point: &[i64], params: &[i64]) -> bool {
        self.basics.iter().any(|b| b.contains(point, params))
    }
}
