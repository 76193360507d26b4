//! Integer relations: basic maps (one conjunction) and maps (unions).

use serde::{Deserialize, Serialize};

use crate::algebra::constraint::{normalized_system, Constraint, ConstraintKind};
use crate::algebra::eliminate::{conjunction_is_empty, project_out_range};
use crate::algebra::set::{BasicSet, Set};
use crate::algebra::space::{DimType, Space};
use crate::utils::errors::{PolyResult, PolySetError};

/// A basic map: a single conjunction of constraints over a map space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicMap {
    space: Space,
    constraints: Vec<Constraint>,
}

impl BasicMap {
    /// The unconstrained relation over `space`.
    pub fn universe(space: Space) -> Self {
        Self { space, constraints: Vec::new() }
    }

    /// The space this relation lives in.
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Intersect with a single constraint, returning the refined relation.
    pub fn add_constraint(self, constraint: &Constraint) -> PolyResult<Self> {
        self.space.check_compatible(constraint.space())?;
        let mut constraints = self.constraints;
        constraints.push(constraint.clone());
        Ok(Self { space: self.space, constraints })
    }

    /// Intersect two basic maps over the same space.
    pub fn intersect(self, other: BasicMap) -> PolyResult<Self> {
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

    /// Membership test for a concrete pair of points. The relation must have
    /// no existential dimensions.
    pub fn contains(&self, ins: &[i64], outs: &[i64], params: &[i64]) -> bool {
        self.constraints
            .iter()
            .all(|c| c.is_satisfied(params, ins, outs))
    }

    pub(crate) fn is_empty_conjunction(&self) -> PolyResult<bool> {
        conjunction_is_empty(&self.space, &self.constraints)
    }

    pub(crate) fn normal_form(&self) -> Vec<(ConstraintKind, Vec<i64>)> {
        normalized_system(&self.constraints)
    }

    /// Project away one tuple (and any divs), then rebuild the surviving
    /// tuple as the set dimensions of `target_space`.
    fn collapse_to_set(self, keep: DimType, target_space: Space) -> PolyResult<BasicSet> {
        let drop = match keep {
            DimType::In => DimType::Out,
            DimType::Out => DimType::In,
            _ => {
                return Err(PolySetError::InvalidArgument(
                    "can only collapse onto the input or output tuple".into(),
                ))
            }
        };
        let mut bmap = self;
        let n_div = bmap.space.size(DimType::Div);
        if n_div > 0 {
            bmap = bmap.project_out(DimType::Div, 0, n_div)?;
        }
        let n_drop = bmap.space.size(drop);
        if n_drop > 0 {
            bmap = bmap.project_out(drop, 0, n_drop)?;
        }

        let mut bset = BasicSet::universe(target_space.clone())?;
        for c in bmap.constraints {
            let mut moved = match c.kind() {
                ConstraintKind::Equality => Constraint::equality_alloc(target_space.clone()),
                ConstraintKind::Inequality => Constraint::inequality_alloc(target_space.clone()),
            };
            for i in 0..target_space.size(DimType::Param) {
                moved = moved.set_coefficient(DimType::Param, i, c.coefficient(DimType::Param, i)?)?;
            }
            for i in 0..target_space.size(DimType::SET) {
                moved = moved.set_coefficient(DimType::SET, i, c.coefficient(keep, i)?)?;
            }
            moved = moved.set_constant_term(c.constant_term());
            bset = bset.add_constraint(&moved)?;
        }
        Ok(bset)
    }
}

/// A map: a union of basic maps over a common space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    space: Space,
    basics: Vec<BasicMap>,
}

impl Map {
    /// Promote a basic map to a singleton union.
    pub fn from_basic_map(bmap: BasicMap) -> Self {
        Self { space: bmap.space.clone(), basics: vec![bmap] }
    }

    /// The unconstrained relation over `space`.
    pub fn universe(space: Space) -> Self {
        Self::from_basic_map(BasicMap::universe(space))
    }

    /// The empty relation over `space`.
    pub fn empty(space: Space) -> Self {
        Self { space, basics: Vec::new() }
    }

    /// The space this relation lives in.
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Union of two maps over the same space.
    pub fn union(self, other: Map) -> PolyResult<Map> {
        self.space.check_compatible(&other.space)?;
        let mut basics = self.basics;
        basics.extend(other.basics);
        Ok(Map { space: self.space, basics })
    }

    /// Intersection of two maps over the same space (pairwise on basics).
    pub fn intersect(self, other: &Map) -> PolyResult<Map> {
        self.space.check_compatible(&other.space)?;
        let mut basics = Vec::new();
        for a in &self.basics {
            for b in &other.basics {
                basics.push(a.clone().intersect(b.clone())?);
            }
        }
        Ok(Map { space: self.space, basics })
    }

    /// Intersect every basic map with a single constraint.
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
    /// basic map.
    pub fn project_out(self, tp: DimType, first: usize, n: usize) -> PolyResult<Self> {
        let space = self.space.drop_dims(tp, first, n)?;
        let basics = self
            .basics
            .into_iter()
            .map(|b| b.project_out(tp, first, n))
            .collect::<PolyResult<Vec<_>>>()?;
        Ok(Self { space, basics })
    }

    /// Invoke `f` on each basic map of the union.
    pub fn foreach_basic_map(&self, mut f: impl FnMut(&BasicMap)) {
        for b in &self.basics {
            f(b);
        }
    }

    /// Get the list of basic maps in this union.
    pub fn get_basic_maps(&self) -> Vec<BasicMap> {
        let mut result = Vec::new();
        self.foreach_basic_map(|b| result.push(b.clone()));
        result
    }

    /// True if no basic map admits a pair.
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
    pub fn is_equal(&self, other: &Map) -> bool {
        if self.space.check_compatible(&other.space).is_err() {
            return false;
        }
        let mut a: Vec<_> = self.basics.iter().map(BasicMap::normal_form).collect();
        let mut b: Vec<_> = other.basics.iter().map(BasicMap::normal_form).collect();
        a.sort();
        b.sort();
        a.dedup();
        b.dedup();
        a == b
    }

    /// Drop duplicate basic maps from the union.
    pub fn coalesce(self) -> Map {
        let mut seen = Vec::new();
        let mut basics = Vec::new();
        for b in self.basics {
            let key = b.normal_form();
            if !seen.contains(&key) {
                seen.push(key);
                basics.push(b);
            }
        }
        Map { space: self.space, basics }
    }

    /// The domain of the relation, as a set over the input dimensions.
    pub fn domain(self) -> PolyResult<Set> {
        let target = self.space.domain();
        let mut result = Set::empty(target.clone())?;
        for b in self.basics {
            let bset = b.collapse_to_set(DimType::In, target.clone())?;
            result = result.union(Set::from_basic_set(bset))?;
        }
        Ok(result)
    }

    /// The range of the relation, as a set over the output dimensions.
    pub fn range(self) -> PolyResult<Set> {
        let target = self.space.range();
        let mut result = Set::empty(target.clone())?;
        for b in self.basics {
            let bset = b.collapse_to_set(DimType::Out, target.clone())?;
            result = result.union(Set::from_basic_set(bset))?;
        }
        Ok(result)
    }

    /// Membership test for a concrete pair (any basic map accepts).
    pub fn contains(&self, ins: &[i64], outs: &[i64], params: &[i64]) -> bool {
        self.basics.iter().any(|b| b.contains(ins, outs, params))
    }
}
