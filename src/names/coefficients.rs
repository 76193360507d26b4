//! Name-indexed coefficient access for constraints and affine functions.
//!
//! Named access is layered strictly on top of positional access: the
//! backend never needs name awareness, and every resolution is re-derivable
//! from the object's space.

use std::collections::HashMap;

use crate::algebra::aff::Aff;
use crate::algebra::constraint::Constraint;
use crate::algebra::space::{DimType, Space};
use crate::names::vardict::{VarDict, CHECK_DIM_TYPES};
use crate::utils::errors::{PolyResult, PolySetError};

/// Key of a coefficient mapping: either a variable name or the reserved
/// constant-term sentinel, which no valid name can collide with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoeffKey {
    /// The constant term.
    Constant,
    /// A named dimension.
    Name(String),
}

impl From<&str> for CoeffKey {
    fn from(name: &str) -> Self {
        CoeffKey::Name(name.to_owned())
    }
}

impl From<String> for CoeffKey {
    fn from(name: String) -> Self {
        CoeffKey::Name(name)
    }
}

/// Positional coefficient primitives plus the name-indexed operations built
/// on them. Implemented by [`Constraint`] and [`Aff`].
pub trait Coefficients: Sized {
    /// The space the coefficients are defined over.
    fn coeff_space(&self) -> &Space;

    /// Get the coefficient of dimension `(tp, idx)`.
    fn coefficient(&self, tp: DimType, idx: usize) -> PolyResult<i64>;

    /// Return a new value with the coefficient of `(tp, idx)` replaced.
    fn set_coefficient(self, tp: DimType, idx: usize, value: i64) -> PolyResult<Self>;

    /// The constant term.
    fn constant_term(&self) -> i64;

    /// Return a new value with the constant term replaced.
    fn set_constant_term(self, value: i64) -> Self;

    /// Set the coefficients of dimensions `0..coeffs.len()` of kind `tp`.
    /// Trailing dimensions of the kind are left untouched.
    fn set_coefficients(mut self, tp: DimType, coeffs: &[i64]) -> PolyResult<Self> {
        for (i, &coeff) in coeffs.iter().enumerate() {
            self = self.set_coefficient(tp, i, coeff)?;
        }
        Ok(self)
    }

    /// Set coefficients and the constant term from a name-keyed mapping.
    ///
    /// Names resolve through `name_to_dim`, or through the object's own
    /// space when `None`. [`CoeffKey::Constant`] sets the constant term.
    /// Fails with [`PolySetError::UnknownName`] for a name the directory
    /// does not contain.
    fn set_coefficients_by_name<I>(
        mut self,
        coefficients: I,
        name_to_dim: Option<&VarDict>,
    ) -> PolyResult<Self>
    where
        I: IntoIterator<Item = (CoeffKey, i64)>,
    {
        let derived;
        let dict = match name_to_dim {
            Some(dict) => dict,
            None => {
                derived = self.coeff_space().var_dict(None)?;
                &derived
            }
        };

        for (key, coeff) in coefficients {
            match key {
                CoeffKey::Constant => self = self.set_constant_term(coeff),
                CoeffKey::Name(name) => {
                    let &(tp, idx) = dict
                        .get(&name)
                        .ok_or(PolySetError::UnknownName(name))?;
                    self = self.set_coefficient(tp, idx, coeff)?;
                }
            }
        }
        Ok(self)
    }

    /// Extract a sparse name-keyed coefficient mapping.
    ///
    /// Zero coefficients and a zero constant term are omitted: an absent key
    /// means coefficient 0. `dim_to_name` overrides the space's own names;
    /// a nonzero coefficient on a dimension with no resolvable name is an
    /// error rather than a silently dropped term.
    fn get_coefficients_by_name(
        &self,
        dimtype: Option<DimType>,
        dim_to_name: Option<&HashMap<(DimType, usize), String>>,
    ) -> PolyResult<HashMap<CoeffKey, i64>> {
        let one;
        let types: &[DimType] = match dimtype {
            None => &CHECK_DIM_TYPES,
            Some(tp) => {
                one = [tp];
                &one
            }
        };

        let mut result = HashMap::new();
        for &tp in types {
            if tp == DimType::Cst {
                continue;
            }
            for i in 0..self.coeff_space().size(tp) {
                let coeff = self.coefficient(tp, i)?;
                if coeff == 0 {
                    continue;
                }
                let name = match dim_to_name {
                    Some(map) => map.get(&(tp, i)).cloned(),
                    None => self.coeff_space().dim_name(tp, i).map(str::to_owned),
                };
                let name = name.ok_or_else(|| {
                    PolySetError::InvalidArgument(format!(
                        "cannot express {} dim {} by name: dimension is unnamed",
                        tp, i
                    ))
                })?;
                result.insert(CoeffKey::Name(name), coeff);
            }
        }

        let constant = self.constant_term();
        if constant != 0 {
            result.insert(CoeffKey::Constant, constant);
        }
        Ok(result)
    }
}

impl Coefficients for Constraint {
    fn coeff_space(&self) -> &Space {
        self.space()
    }

    fn coefficient(&self, tp: DimType, idx: usize) -> PolyResult<i64> {
        Constraint::coefficient(self, tp, idx)
    }

    fn set_coefficient(self, tp: DimType, idx: usize, value: i64) -> PolyResult<Self> {
        Constraint::set_coefficient(self, tp, idx, value)
    }

    fn constant_term(&self) -> i64 {
        Constraint::constant_term(self)
    }

    fn set_constant_term(self, value: i64) -> Self {
        Constraint::set_constant_term(self, value)
    }
}

impl Coefficients for Aff {
    fn coeff_space(&self) -> &Space {
        self.space()
    }

    fn coefficient(&self, tp: DimType, idx: usize) -> PolyResult<i64> {
        Aff::coefficient(self, tp, idx)
    }

    fn set_coefficient(self, tp: DimType, idx: usize, value: i64) -> PolyResult<Self> {
        Aff::set_coefficient(self, tp, idx, value)
    }

    fn constant_term(&self) -> i64 {
        Aff::constant_term(self)
    }

    fn set_constant_term(self, value: i64) -> Self {
        Aff::set_constant_term(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_space() -> Space {
        Space::create_from_names(Some(&["x", "y"]), None, None, &[]).unwrap()
    }

    #[test]
    fn test_positional_set() {
        let aff = Aff::zero(xy_space())
            .set_coefficients(DimType::SET, &[3])
            .unwrap();
        assert_eq!(aff.coefficient(DimType::SET, 0).unwrap(), 3);
        // trailing dimension untouched
        assert_eq!(aff.coefficient(DimType::SET, 1).unwrap(), 0);
    }

    #[test]
    fn test_by_name_round_trip() {
        let aff = Aff::zero(xy_space())
            .set_coefficients_by_name(
                [("x".into(), 2), ("y".into(), -1), (CoeffKey::Constant, 5)],
                None,
            )
            .unwrap();
        let coeffs = aff.get_coefficients_by_name(None, None).unwrap();
        assert_eq!(coeffs.len(), 3);
        assert_eq!(coeffs[&CoeffKey::from("x")], 2);
        assert_eq!(coeffs[&CoeffKey::from("y")], -1);
        assert_eq!(coeffs[&CoeffKey::Constant], 5);
    }

    #[test]
    fn test_sparse_extraction_omits_zero() {
        let aff = Aff::zero(xy_space())
            .set_coefficients_by_name([("x".into(), 4)], None)
            .unwrap();
        let coeffs = aff.get_coefficients_by_name(None, None).unwrap();
        assert_eq!(coeffs.len(), 1);
        assert!(!coeffs.contains_key(&CoeffKey::from("y")));
        assert!(!coeffs.contains_key(&CoeffKey::Constant));
    }

    #[test]
    fn test_unknown_name_rejected() {
        let err = Aff::zero(xy_space())
            .set_coefficients_by_name([("z".into(), 1)], None)
            .unwrap_err();
        assert_eq!(err, PolySetError::UnknownName("z".into()));
    }

    #[test]
    fn test_explicit_directory_override() {
        let space = xy_space();
        let dict = space.var_dict(Some(DimType::SET)).unwrap();
        let aff = Aff::zero(space)
            .set_coefficients_by_name([("y".into(), 7)], Some(&dict))
            .unwrap();
        assert_eq!(aff.coefficient(DimType::SET, 1).unwrap(), 7);
    }

    #[test]
    fn test_unnamed_nonzero_coefficient_is_error() {
        let space = Space::set_alloc(0, 1);
        let aff = Aff::zero(space)
            .set_coefficient(DimType::SET, 0, 1)
            .unwrap();
        assert!(aff.get_coefficients_by_name(None, None).is_err());
    }

    #[test]
    fn test_dim_to_name_override() {
        let space = Space::set_alloc(0, 1);
        let aff = Aff::zero(space)
            .set_coefficient(DimType::SET, 0, 6)
            .unwrap();
        let mut names = HashMap::new();
        names.insert((DimType::SET, 0), "v".to_owned());
        let coeffs = aff.get_coefficients_by_name(None, Some(&names)).unwrap();
        assert_eq!(coeffs[&CoeffKey::from("v")], 6);
    }
}
