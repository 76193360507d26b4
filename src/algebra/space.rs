//! Spaces describe the dimension structure of sets, maps and constraints.
//!
//! A space partitions its dimensions into kinds:
//! - Input dimensions (for maps)
//! - Output dimensions (these double as the "set" dimensions of a set space)
//! - Parameter dimensions (symbolic constants)
//! - A single constant "dimension" for the constant term
//! - Existentially quantified dimensions ("divs"), which are never named

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::errors::{PolyResult, PolySetError};

/// The kind of a dimension within a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimType {
    /// The constant term (size 1, unnamed).
    Cst,
    /// Parameter dimensions.
    Param,
    /// Input dimensions (maps only).
    In,
    /// Output dimensions.
    Out,
    /// Existentially quantified dimensions (unnamed).
    Div,
}

impl DimType {
    /// Set dimensions are the output dimensions of a space without inputs.
    pub const SET: DimType = DimType::Out;
}

impl fmt::Display for DimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DimType::Cst => "cst",
            DimType::Param => "param",
            DimType::In => "in",
            DimType::Out => "out",
            DimType::Div => "div",
        };
        write!(f, "{}", s)
    }
}

/// A space: per-kind dimension counts plus optional names.
///
/// Spaces are immutable values; every mutator consumes `self` and returns a
/// new space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    n_param: usize,
    n_in: usize,
    n_out: usize,
    n_div: usize,
    param_names: Vec<Option<String>>,
    in_names: Vec<Option<String>>,
    out_names: Vec<Option<String>>,
}

impl Space {
    /// Allocate a set space with the given parameter and set dimension counts.
    pub fn set_alloc(nparam: usize, dim: usize) -> Self {
        Self::alloc(nparam, 0, dim)
    }

    /// Allocate a map space with the given dimension counts.
    pub fn alloc(nparam: usize, n_in: usize, n_out: usize) -> Self {
        Self {
            n_param: nparam,
            n_in,
            n_out,
            n_div: 0,
            param_names: vec![None; nparam],
            in_names: vec![None; n_in],
            out_names: vec![None; n_out],
        }
    }

    /// Number of dimensions of the given kind. `Cst` always has size 1.
    pub fn size(&self, tp: DimType) -> usize {
        match tp {
            DimType::Cst => 1,
            DimType::Param => self.n_param,
            DimType::In => self.n_in,
            DimType::Out => self.n_out,
            DimType::Div => self.n_div,
        }
    }

    /// Total number of variable dimensions (excluding the constant).
    pub fn total_dim(&self) -> usize {
        self.n_param + self.n_in + self.n_out + self.n_div
    }

    /// Check if this is a set space (no input dimensions).
    pub fn is_set(&self) -> bool {
        self.n_in == 0
    }

    /// Check if this is a map space (has input dimensions).
    pub fn is_map(&self) -> bool {
        self.n_in > 0
    }

    /// Get the name of a dimension. `Cst` and `Div` dimensions have none.
    pub fn dim_name(&self, tp: DimType, idx: usize) -> Option<&str> {
        let names = match tp {
            DimType::Param => &self.param_names,
            DimType::In => &self.in_names,
            DimType::Out => &self.out_names,
            DimType::Cst | DimType::Div => return None,
        };
        names.get(idx).and_then(|n| n.as_deref())
    }

    /// Return a new space with the dimension at `(tp, idx)` renamed.
    ///
    /// No duplicate check happens here; uniqueness is enforced lazily when a
    /// variable directory is built.
    pub fn set_dim_name(
        mut self,
        tp: DimType,
        idx: usize,
        name: impl Into<String>,
    ) -> PolyResult<Self> {
        let size = self.size(tp);
        let names = match tp {
            DimType::Param => &mut self.param_names,
            DimType::In => &mut self.in_names,
            DimType::Out => &mut self.out_names,
            DimType::Cst | DimType::Div => {
                return Err(PolySetError::InvalidArgument(format!(
                    "{} dimensions cannot be named",
                    tp
                )))
            }
        };
        let slot = names
            .get_mut(idx)
            .ok_or(PolySetError::DimOutOfRange { tp, index: idx, size })?;
        *slot = Some(name.into());
        Ok(self)
    }

    /// Return a new space with `n` unnamed dimensions of kind `tp` appended.
    pub fn add_dims(mut self, tp: DimType, n: usize) -> PolyResult<Self> {
        match tp {
            DimType::Param => {
                self.n_param += n;
                self.param_names.extend(std::iter::repeat_with(|| None).take(n));
            }
            DimType::In => {
                self.n_in += n;
                self.in_names.extend(std::iter::repeat_with(|| None).take(n));
            }
            DimType::Out => {
                self.n_out += n;
                self.out_names.extend(std::iter::repeat_with(|| None).take(n));
            }
            DimType::Div => self.n_div += n,
            DimType::Cst => {
                return Err(PolySetError::InvalidArgument(
                    "cannot add constant dimensions".into(),
                ))
            }
        }
        Ok(self)
    }

    /// Return a new space with the dimension range `(tp, first, n)` removed.
    /// Dimensions above the range shift down.
    pub fn drop_dims(mut self, tp: DimType, first: usize, n: usize) -> PolyResult<Self> {
        let size = self.size(tp);
        if first + n > size {
            return Err(PolySetError::DimOutOfRange { tp, index: first + n, size });
        }
        match tp {
            DimType::Param => {
                self.n_param -= n;
                self.param_names.drain(first..first + n);
            }
            DimType::In => {
                self.n_in -= n;
                self.in_names.drain(first..first + n);
            }
            DimType::Out => {
                self.n_out -= n;
                self.out_names.drain(first..first + n);
            }
            DimType::Div => self.n_div -= n,
            DimType::Cst => {
                return Err(PolySetError::InvalidArgument(
                    "cannot drop the constant dimension".into(),
                ))
            }
        }
        Ok(self)
    }

    /// The domain of a map space, as a set space over the input dimensions.
    pub fn domain(&self) -> Space {
        Space {
            n_param: self.n_param,
            n_in: 0,
            n_out: self.n_in,
            n_div: 0,
            param_names: self.param_names.clone(),
            in_names: Vec::new(),
            out_names: self.in_names.clone(),
        }
    }

    /// The range of a map space, as a set space over the output dimensions.
    pub fn range(&self) -> Space {
        Space {
            n_param: self.n_param,
            n_in: 0,
            n_out: self.n_out,
            n_div: 0,
            param_names: self.param_names.clone(),
            in_names: Vec::new(),
            out_names: self.out_names.clone(),
        }
    }

    /// Check that `other` has the same per-kind sizes as `self`.
    pub(crate) fn check_compatible(&self, other: &Space) -> PolyResult<()> {
        if self.n_param != other.n_param
            || self.n_in != other.n_in
            || self.n_out != other.n_out
            || self.n_div != other.n_div
        {
            return Err(PolySetError::InvalidArgument(format!(
                "space mismatch: [{},{},{},{}] vs [{},{},{},{}]",
                self.n_param, self.n_in, self.n_out, self.n_div,
                other.n_param, other.n_in, other.n_out, other.n_div,
            )));
        }
        Ok(())
    }
}
