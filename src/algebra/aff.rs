//! Affine functions over a space.
//!
//! An affine function is a linear combination of the space's dimensions plus
//! a constant term: `aff = c0 + c1*x1 + c2*x2 + ... + cn*xn`.

use num_integer::Integer;
use serde::{Deserialize, Serialize};

use crate::algebra::space::{DimType, Space};
use crate::utils::errors::{PolyResult, PolySetError};

/// An affine function: one coefficient per dimension of each kind, plus a
/// constant term. Immutable value semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aff {
    space: Space,
    param_coeffs: Vec<i64>,
    in_coeffs: Vec<i64>,
    out_coeffs: Vec<i64>,
    div_coeffs: Vec<i64>,
    constant: i64,
}

impl Aff {
    /// The zero function on `space`.
    pub fn zero(space: Space) -> Self {
        Self {
            param_coeffs: vec![0; space.size(DimType::Param)],
            in_coeffs: vec![0; space.size(DimType::In)],
            out_coeffs: vec![0; space.size(DimType::Out)],
            div_coeffs: vec![0; space.size(DimType::Div)],
            constant: 0,
            space,
        }
    }

    /// The space this function is defined over.
    pub fn space(&self) -> &Space {
        &self.space
    }

    fn coeffs_of(&self, tp: DimType) -> &[i64] {
        match tp {
            DimType::Param => &self.param_coeffs,
            DimType::In => &self.in_coeffs,
            DimType::Out => &self.out_coeffs,
            DimType::Div => &self.div_coeffs,
            DimType::Cst => std::slice::from_ref(&self.constant),
        }
    }

    fn coeffs_of_mut(&mut self, tp: DimType) -> &mut [i64] {
        match tp {
            DimType::Param => &mut self.param_coeffs,
            DimType::In => &mut self.in_coeffs,
            DimType::Out => &mut self.out_coeffs,
            DimType::Div => &mut self.div_coeffs,
            DimType::Cst => std::slice::from_mut(&mut self.constant),
        }
    }

    /// Get the coefficient of dimension `(tp, idx)`. For `Cst`, index 0
    /// addresses the constant term.
    pub fn coefficient(&self, tp: DimType, idx: usize) -> PolyResult<i64> {
        self.coeffs_of(tp)
            .get(idx)
            .copied()
            .ok_or(PolySetError::DimOutOfRange { tp, index: idx, size: self.space.size(tp) })
    }

    /// Return a new function with the coefficient of `(tp, idx)` replaced.
    pub fn set_coefficient(mut self, tp: DimType, idx: usize, value: i64) -> PolyResult<Self> {
        let size = self.space.size(tp);
        let slot = self
            .coeffs_of_mut(tp)
            .get_mut(idx)
            .ok_or(PolySetError::DimOutOfRange { tp, index: idx, size })?;
        *slot = value;
        Ok(self)
    }

    /// The constant term.
    pub fn constant_term(&self) -> i64 {
        self.constant
    }

    /// Return a new function with the constant term replaced.
    pub fn set_constant_term(mut self, value: i64) -> Self {
        self.constant = value;
        self
    }

    /// Evaluate at a concrete point. Existential dimensions must have been
    /// eliminated beforehand.
    pub fn eval(&self, params: &[i64], ins: &[i64], outs: &[i64]) -> i64 {
        debug_assert_eq!(self.div_coeffs.len(), 0);
        let mut acc = self.constant;
        for (c, v) in self.param_coeffs.iter().zip(params) {
            acc += c * v;
        }
        for (c, v) in self.in_coeffs.iter().zip(ins) {
            acc += c * v;
        }
        for (c, v) in self.out_coeffs.iter().zip(outs) {
            acc += c * v;
        }
        acc
    }

    /// True if every coefficient and the constant term are zero.
    pub fn is_zero(&self) -> bool {
        self.constant == 0 && self.is_constant()
    }

    /// True if every coefficient is zero (the function is constant).
    pub fn is_constant(&self) -> bool {
        self.param_coeffs.iter().all(|&c| c == 0)
            && self.in_coeffs.iter().all(|&c| c == 0)
            && self.out_coeffs.iter().all(|&c| c == 0)
            && self.div_coeffs.iter().all(|&c| c == 0)
    }

    /// GCD of all coefficients and the constant term (1 for the zero function).
    pub fn content_gcd(&self) -> i64 {
        let mut g = self.constant.abs();
        for tp in [DimType::Param, DimType::In, DimType::Out, DimType::Div] {
            for &c in self.coeffs_of(tp) {
                g = g.gcd(&c.abs());
            }
        }
        if g == 0 {
            1
        } else {
            g
        }
    }

    /// Linear combination `ka*a + kb*b`. Both functions must live in the
    /// same space.
    pub(crate) fn combine(a: &Aff, ka: i64, b: &Aff, kb: i64) -> Aff {
        debug_assert_eq!(a.space, b.space);
        let zip = |xs: &[i64], ys: &[i64]| -> Vec<i64> {
            xs.iter().zip(ys).map(|(&x, &y)| ka * x + kb * y).collect()
        };
        Aff {
            space: a.space.clone(),
            param_coeffs: zip(&a.param_coeffs, &b.param_coeffs),
            in_coeffs: zip(&a.in_coeffs, &b.in_coeffs),
            out_coeffs: zip(&a.out_coeffs, &b.out_coeffs),
            div_coeffs: zip(&a.div_coeffs, &b.div_coeffs),
            constant: ka * a.constant + kb * b.constant,
        }
    }

    /// The pointwise negation `-self`.
    pub(crate) fn negated(&self) -> Aff {
        Aff::combine(self, -1, self, 0)
    }

    /// Divide every coefficient and the constant by `d` (must divide exactly).
    pub(crate) fn divided_by(&self, d: i64) -> Aff {
        debug_assert!(d > 0);
        let div = |xs: &[i64]| -> Vec<i64> { xs.iter().map(|&x| x / d).collect() };
        Aff {
            space: self.space.clone(),
            param_coeffs: div(&self.param_coeffs),
            in_coeffs: div(&self.in_coeffs),
            out_coeffs: div(&self.out_coeffs),
            div_coeffs: div(&self.div_coeffs),
            constant: self.constant / d,
        }
    }

    /// Remove the coefficient columns for the dimension range `(tp, first, n)`
    /// and shrink the space to match.
    pub(crate) fn remove_dims(&mut self, tp: DimType, first: usize, n: usize) -> PolyResult<()> {
        match tp {
            DimType::Param => drop(self.param_coeffs.drain(first..first + n)),
            DimType::In => drop(self.in_coeffs.drain(first..first + n)),
            DimType::Out => drop(self.out_coeffs.drain(first..first + n)),
            DimType::Div => drop(self.div_coeffs.drain(first..first + n)),
            DimType::Cst => {
                return Err(PolySetError::InvalidArgument(
                    "cannot drop the constant dimension".into(),
                ))
            }
        }
        self.space = self.space.clone().drop_dims(tp, first, n)?;
        Ok(())
    }
}
