//! Linear constraints over a space.
//!
//! A constraint is an affine function together with a relation to zero:
//! - Equality: `aff = 0`
//! - Inequality: `aff >= 0`

use serde::{Deserialize, Serialize};

use crate::algebra::aff::Aff;
use crate::algebra::space::{DimType, Space};
use crate::utils::errors::PolyResult;

/// Kind of constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Equal: `aff = 0`
    Equality,
    /// Greater than or equal: `aff >= 0`
    Inequality,
}

/// A linear constraint. Immutable value semantics: coefficient setters
/// consume `self` and return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    aff: Aff,
    kind: ConstraintKind,
}

impl Constraint {
    /// Allocate an equality constraint `0 = 0` over `space`.
    pub fn equality_alloc(space: Space) -> Self {
        Self { aff: Aff::zero(space), kind: ConstraintKind::Equality }
    }

    /// Allocate an inequality constraint `0 >= 0` over `space`.
    pub fn inequality_alloc(space: Space) -> Self {
        Self { aff: Aff::zero(space), kind: ConstraintKind::Inequality }
    }

    pub(crate) fn from_aff(aff: Aff, kind: ConstraintKind) -> Self {
        Self { aff, kind }
    }

    /// The space this constraint is defined over.
    pub fn space(&self) -> &Space {
        self.aff.space()
    }

    /// The underlying affine function.
    pub fn aff(&self) -> &Aff {
        &self.aff
    }

    /// The constraint kind.
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Check if this is an equality constraint.
    pub fn is_equality(&self) -> bool {
        matches!(self.kind, ConstraintKind::Equality)
    }

    /// Check if this is an inequality constraint.
    pub fn is_inequality(&self) -> bool {
        matches!(self.kind, ConstraintKind::Inequality)
    }

    /// Get the coefficient of dimension `(tp, idx)`.
    pub fn coefficient(&self, tp: DimType, idx: usize) -> PolyResult<i64> {
        self.aff.coefficient(tp, idx)
    }

    /// Return a new constraint with the coefficient of `(tp, idx)` replaced.
    pub fn set_coefficient(mut self, tp: DimType, idx: usize, value: i64) -> PolyResult<Self> {
        self.aff = self.aff.set_coefficient(tp, idx, value)?;
        Ok(self)
    }

    /// The constant term.
    pub fn constant_term(&self) -> i64 {
        self.aff.constant_term()
    }

    /// Return a new constraint with the constant term replaced.
    pub fn set_constant_term(mut self, value: i64) -> Self {
        self.aff = self.aff.set_constant_term(value);
        self
    }

    /// Check if a concrete point satisfies this constraint. Existential
    /// dimensions must have been eliminated beforehand.
    pub fn is_satisfied(&self, params: &[i64], ins: &[i64], outs: &[i64]) -> bool {
        let value = self.aff.eval(params, ins, outs);
        match self.kind {
            ConstraintKind::Inequality => value >= 0,
            ConstraintKind::Equality => value == 0,
        }
    }

    /// Strip the coefficient columns for `(tp, first, n)`, shrinking the
    /// constraint's space to match.
    pub(crate) fn remove_dims(&mut self, tp: DimType, first: usize, n: usize) -> PolyResult<()> {
        self.aff.remove_dims(tp, first, n)
    }

    /// A trivially true constraint: `0 = 0`, or `c >= 0` with `c >= 0`.
    pub(crate) fn is_trivially_true(&self) -> bool {
        self.aff.is_constant()
            && match self.kind {
                ConstraintKind::Equality => self.aff.constant_term() == 0,
                ConstraintKind::Inequality => self.aff.constant_term() >= 0,
            }
    }

    /// Canonical form: content-gcd reduced, equalities sign-normalized so the
    /// first nonzero coefficient is positive.
    pub(crate) fn normalized(&self) -> Constraint {
        let g = self.aff.content_gcd();
        let mut aff = if g > 1 { self.aff.divided_by(g) } else { self.aff.clone() };
        if self.kind == ConstraintKind::Equality {
            let lead = flatten(&aff).into_iter().find(|&c| c != 0).unwrap_or(0);
            if lead < 0 {
                aff = aff.negated();
            }
        }
        Constraint { aff, kind: self.kind }
    }

    /// Sort key for order-insensitive comparison of constraint systems.
    pub(crate) fn sort_key(&self) -> (ConstraintKind, Vec<i64>) {
        (self.kind, flatten(&self.aff))
    }
}

/// Flatten an affine function into a single coefficient row:
/// params, ins, outs, divs, constant.
fn flatten(aff: &Aff) -> Vec<i64> {
    let space = aff.space();
    let mut row = Vec::with_capacity(space.total_dim() + 1);
    for tp in [DimType::Param, DimType::In, DimType::Out, DimType::Div] {
        for i in 0..space.size(tp) {
            // in range by construction
            row.push(aff.coefficient(tp, i).unwrap_or(0));
        }
    }
    row.push(aff.constant_term());
    row
}

/// Canonical, order-insensitive form of a conjunction of constraints.
pub(crate) fn normalized_system(constraints: &[Constraint]) -> Vec<(ConstraintKind, Vec<i64>)> {
    let mut rows: Vec<_> = constraints
        .iter()
        .filter(|c| !c.is_trivially_true())
        .map(|c| c.normalized().sort_key())
        .collect();
    rows.sort();
    rows.dedup();
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_space() -> Space {
        Space::set_alloc(1, 2)
    }

    #[test]
    fn test_alloc_kinds() {
        let eq = Constraint::equality_alloc(named_space());
        let ineq = Constraint::inequality_alloc(named_space());
        assert!(eq.is_equality());
        assert!(ineq.is_inequality());
    }

    #[test]
    fn test_satisfaction() {
        // x0 - 5 >= 0
        let c = Constraint::inequality_alloc(named_space())
            .set_coefficient(DimType::SET, 0, 1)
            .unwrap()
            .set_constant_term(-5);
        assert!(c.is_satisfied(&[0], &[], &[5, 0]));
        assert!(c.is_satisfied(&[0], &[], &[9, 0]));
        assert!(!c.is_satisfied(&[0], &[], &[4, 0]));
    }

    #[test]
    fn test_normalized_gcd() {
        // 4*x0 - 8 >= 0 reduces to x0 - 2 >= 0
        let c = Constraint::inequality_alloc(named_space())
            .set_coefficient(DimType::SET, 0, 4)
            .unwrap()
            .set_constant_term(-8)
            .normalized();
        assert_eq!(c.coefficient(DimType::SET, 0).unwrap(), 1);
        assert_eq!(c.constant_term(), -2);
    }

    #[test]
    fn test_normalized_system_order_insensitive() {
        let a = Constraint::inequality_alloc(named_space())
            .set_coefficient(DimType::SET, 0, 1)
            .unwrap();
        let b = Constraint::inequality_alloc(named_space())
            .set_coefficient(DimType::SET, 1, 1)
            .unwrap();
        let ab = normalized_system(&[a.clone(), b.clone()]);
        let ba = normalized_system(&[b, a]);
        assert_eq!(ab, ba);
    }
}
