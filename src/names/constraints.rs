//! Building constraints from name-keyed coefficient mappings.

use crate::algebra::constraint::Constraint;
use crate::algebra::map::{BasicMap, Map};
use crate::algebra::set::{BasicSet, Set};
use crate::algebra::space::Space;
use crate::names::coefficients::{CoeffKey, Coefficients};
use crate::utils::errors::PolyResult;

impl Constraint {
    /// Create a constraint `constant + coeff_1*var_1 + ... == 0`.
    ///
    /// The constant term is set by the [`CoeffKey::Constant`] key.
    pub fn eq_from_names<I>(space: Space, coefficients: I) -> PolyResult<Constraint>
    where
        I: IntoIterator<Item = (CoeffKey, i64)>,
    {
        Constraint::equality_alloc(space).set_coefficients_by_name(coefficients, None)
    }

    /// Create a constraint `constant + coeff_1*var_1 + ... >= 0`.
    ///
    /// The constant term is set by the [`CoeffKey::Constant`] key.
    pub fn ineq_from_names<I>(space: Space, coefficients: I) -> PolyResult<Constraint>
    where
        I: IntoIterator<Item = (CoeffKey, i64)>,
    {
        Constraint::inequality_alloc(space).set_coefficients_by_name(coefficients, None)
    }
}

/// Folding a sequence of constraints into an object through the backend's
/// single-constraint intersection.
pub trait AddConstraints: Sized {
    /// Intersect with one constraint.
    fn add_constraint(self, constraint: &Constraint) -> PolyResult<Self>;

    /// Intersect with each constraint, left to right. Conjunction is
    /// commutative, so order only affects intermediate representations.
    fn add_constraints<'a, I>(mut self, constraints: I) -> PolyResult<Self>
    where
        I: IntoIterator<Item = &'a Constraint>,
    {
        for constraint in constraints {
            self = self.add_constraint(constraint)?;
        }
        Ok(self)
    }
}

impl AddConstraints for BasicSet {
    fn add_constraint(self, constraint: &Constraint) -> PolyResult<Self> {
        BasicSet::add_constraint(self, constraint)
    }
}

impl AddConstraints for Set {
    fn add_constraint(self, constraint: &Constraint) -> PolyResult<Self> {
        Set::add_constraint(self, constraint)
    }
}

impl AddConstraints for BasicMap {
    fn add_constraint(self, constraint: &Constraint) -> PolyResult<Self> {
        BasicMap::add_constraint(self, constraint)
    }
}

impl AddConstraints for Map {
    fn add_constraint(self, constraint: &Constraint) -> PolyResult<Self> {
        Map::add_constraint(self, constraint)
    }
}
