//! Dimension elimination for constraint systems.
//!
//! The backend's projection primitive eliminates a contiguous range of
//! dimensions of one kind via Fourier-Motzkin: equalities with a nonzero
//! coefficient are used for substitution, otherwise every lower bound is
//! combined with every upper bound. Integer points are preserved; the result
//! may overapproximate by rational shadow points when no equality pivots the
//! eliminated dimension.

use log::debug;
use num_integer::Integer;

use crate::algebra::aff::Aff;
use crate::algebra::constraint::{normalized_system, Constraint, ConstraintKind};
use crate::algebra::space::{DimType, Space};
use crate::utils::errors::{PolyResult, PolySetError};

/// Eliminate the dimension range `(tp, first, n)` from a conjunction of
/// constraints, returning the shrunk space and the projected system.
pub(crate) fn project_out_range(
    space: Space,
    constraints: Vec<Constraint>,
    tp: DimType,
    first: usize,
    n: usize,
) -> PolyResult<(Space, Vec<Constraint>)> {
    if tp == DimType::Cst {
        return Err(PolySetError::InvalidArgument(
            "cannot project out the constant dimension".into(),
        ));
    }
    let size = space.size(tp);
    if first + n > size {
        return Err(PolySetError::DimOutOfRange { tp, index: first + n, size });
    }
    if n == 0 {
        return Ok((space, constraints));
    }

    debug!("eliminating {} {} dim(s) starting at index {}", n, tp, first);

    let mut constraints = constraints;
    for idx in (first..first + n).rev() {
        constraints = eliminate_column(constraints, tp, idx)?;
    }

    let space = space.drop_dims(tp, first, n)?;
    for c in &mut constraints {
        c.remove_dims(tp, first, n)?;
    }
    Ok((space, constraints))
}

/// Produce an equivalent system in which no constraint mentions `(tp, idx)`.
/// The column itself is stripped later, once the whole range is processed.
fn eliminate_column(
    constraints: Vec<Constraint>,
    tp: DimType,
    idx: usize,
) -> PolyResult<Vec<Constraint>> {
    let pivot = constraints
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_equality())
        .filter_map(|(i, c)| match c.coefficient(tp, idx) {
            Ok(v) if v != 0 => Some((i, v)),
            _ => None,
        })
        .min_by_key(|&(_, v)| v.abs());

    let mut result = Vec::new();

    if let Some((pivot_idx, pc)) = pivot {
        // Substitute the pivot equality into every other constraint.
        let pivot = &constraints[pivot_idx];
        for (i, other) in constraints.iter().enumerate() {
            if i == pivot_idx {
                continue;
            }
            let oc = other.coefficient(tp, idx)?;
            if oc == 0 {
                result.push(other.clone());
                continue;
            }
            let l = pc.abs().lcm(&oc.abs());
            let alpha = l / oc.abs();
            let beta = -(oc * alpha) / pc;
            let aff = Aff::combine(other.aff(), alpha, pivot.aff(), beta);
            result.push(Constraint::from_aff(aff, other.kind()));
        }
    } else {
        // No equality mentions the dimension: pair every lower bound with
        // every upper bound.
        let mut lowers = Vec::new();
        let mut uppers = Vec::new();
        for c in &constraints {
            let coeff = c.coefficient(tp, idx)?;
            if coeff == 0 {
                result.push(c.clone());
            } else if coeff > 0 {
                lowers.push((c, coeff));
            } else {
                uppers.push((c, coeff));
            }
        }
        for &(lo, lc) in &lowers {
            for &(up, uc) in &uppers {
                let l = lc.lcm(&-uc);
                let aff = Aff::combine(lo.aff(), l / lc, up.aff(), l / -uc);
                result.push(Constraint::from_aff(aff, ConstraintKind::Inequality));
            }
        }
    }

    // Normalize away redundant rows so repeated eliminations stay small.
    result.retain(|c| !c.is_trivially_true());
    let mut seen = Vec::new();
    result.retain(|c| {
        let key = c.normalized().sort_key();
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });
    Ok(result)
}

/// Decide emptiness of a conjunction by eliminating every dimension and
/// checking the residual constant constraints.
pub(crate) fn conjunction_is_empty(
    space: &Space,
    constraints: &[Constraint],
) -> PolyResult<bool> {
    let mut space = space.clone();
    let mut constraints = constraints.to_vec();
    for tp in [DimType::Div, DimType::Out, DimType::In, DimType::Param] {
        let k = space.size(tp);
        if k > 0 {
            (space, constraints) = project_out_range(space, constraints, tp, 0, k)?;
        }
    }
    Ok(!normalized_system(&constraints).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::space::DimType;

    fn ineq(space: &Space, coeffs: &[(DimType, usize, i64)], constant: i64) -> Constraint {
        let mut c = Constraint::inequality_alloc(space.clone()).set_constant_term(constant);
        for &(tp, i, v) in coeffs {
            c = c.set_coefficient(tp, i, v).unwrap();
        }
        c
    }

    fn eq(space: &Space, coeffs: &[(DimType, usize, i64)], constant: i64) -> Constraint {
        let mut c = Constraint::equality_alloc(space.clone()).set_constant_term(constant);
        for &(tp, i, v) in coeffs {
            c = c.set_coefficient(tp, i, v).unwrap();
        }
        c
    }

    #[test]
    fn test_fm_pairing() {
        // { [x, y] : 0 <= x <= 10, x <= y <= x + 2 }, eliminate y
        let s = Space::set_alloc(0, 2);
        let cs = vec![
            ineq(&s, &[(DimType::SET, 0, 1)], 0),
            ineq(&s, &[(DimType::SET, 0, -1)], 10),
            ineq(&s, &[(DimType::SET, 0, -1), (DimType::SET, 1, 1)], 0),
            ineq(&s, &[(DimType::SET, 0, 1), (DimType::SET, 1, -1)], 2),
        ];
        let (s2, cs2) = project_out_range(s, cs, DimType::SET, 1, 1).unwrap();
        assert_eq!(s2.size(DimType::SET), 1);
        // residual system is exactly 0 <= x <= 10
        assert!(cs2.iter().all(|c| c.is_satisfied(&[], &[], &[5])));
        assert!(!cs2.iter().all(|c| c.is_satisfied(&[], &[], &[11])));
        assert!(!cs2.iter().all(|c| c.is_satisfied(&[], &[], &[-1])));
    }

    #[test]
    fn test_equality_substitution() {
        // { [x, y] : y = 2x, y >= 6 }, eliminate y => 2x >= 6
        let s = Space::set_alloc(0, 2);
        let cs = vec![
            eq(&s, &[(DimType::SET, 0, 2), (DimType::SET, 1, -1)], 0),
            ineq(&s, &[(DimType::SET, 1, 1)], -6),
        ];
        let (_, cs2) = project_out_range(s, cs, DimType::SET, 1, 1).unwrap();
        assert!(cs2.iter().all(|c| c.is_satisfied(&[], &[], &[3])));
        assert!(!cs2.iter().all(|c| c.is_satisfied(&[], &[], &[2])));
    }

    #[test]
    fn test_emptiness() {
        // { [x] : x >= 1, x <= 0 } is empty
        let s = Space::set_alloc(0, 1);
        let cs = vec![
            ineq(&s, &[(DimType::SET, 0, 1)], -1),
            ineq(&s, &[(DimType::SET, 0, -1)], 0),
        ];
        assert!(conjunction_is_empty(&s, &cs).unwrap());

        let s = Space::set_alloc(0, 1);
        let cs = vec![ineq(&s, &[(DimType::SET, 0, 1)], 0)];
        assert!(!conjunction_is_empty(&s, &cs).unwrap());
    }

    #[test]
    fn test_unbounded_direction_drops_constraints() {
        // { [x, y] : y >= x } projected on x is all of Z
        let s = Space::set_alloc(0, 2);
        let cs = vec![ineq(&s, &[(DimType::SET, 0, -1), (DimType::SET, 1, 1)], 0)];
        let (_, cs2) = project_out_range(s, cs, DimType::SET, 1, 1).unwrap();
        assert!(cs2.is_empty());
    }

    #[test]
    fn test_range_rejected_out_of_bounds() {
        let s = Space::set_alloc(0, 2);
        let err = project_out_range(s, Vec::new(), DimType::SET, 1, 5).unwrap_err();
        assert!(matches!(err, PolySetError::DimOutOfRange { .. }));
    }
}
