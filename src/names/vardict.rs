//! Variable directories: resolving dimension names to (kind, index) pairs.

use std::collections::HashMap;

use crate::algebra::space::{DimType, Space};
use crate::utils::errors::{PolyResult, PolySetError};

/// The kinds checked for names, in canonical iteration order. `Cst` and
/// `Div` dimensions are unnamed and never contribute entries.
pub const CHECK_DIM_TYPES: [DimType; 5] = [
    DimType::In,
    DimType::Param,
    DimType::Out,
    DimType::Cst,
    DimType::Div,
];

/// A mapping from variable names to `(kind, index)` pairs.
pub type VarDict = HashMap<String, (DimType, usize)>;

impl Space {
    /// Build a directory mapping variable names to `(kind, index)`.
    ///
    /// With `dimtype` of `None` every checked kind is scanned in canonical
    /// order; otherwise only the given kind. Fails with
    /// [`PolySetError::DuplicateName`] at the first repeated name.
    pub fn var_dict(&self, dimtype: Option<DimType>) -> PolyResult<VarDict> {
        let one;
        let types: &[DimType] = match dimtype {
            None => &CHECK_DIM_TYPES,
            Some(tp) => {
                one = [tp];
                &one
            }
        };

        let mut result = VarDict::new();
        for &tp in types {
            for i in 0..self.size(tp) {
                if let Some(name) = self.dim_name(tp, i) {
                    if result.insert(name.to_owned(), (tp, i)).is_some() {
                        return Err(PolySetError::DuplicateName(name.to_owned()));
                    }
                }
            }
        }
        Ok(result)
    }

    /// Create a space from lists of variable names.
    ///
    /// Exactly one of `set` or the `(in_, out)` pair must be supplied. Every
    /// name is assigned to successive indices of its kind in list order;
    /// parameter names are assigned last, independent of the branch taken.
    pub fn create_from_names(
        set: Option<&[&str]>,
        in_: Option<&[&str]>,
        out: Option<&[&str]>,
        params: &[&str],
    ) -> PolyResult<Space> {
        let mut result = match (set, in_, out) {
            (Some(set_names), None, None) => {
                let mut space = Space::set_alloc(params.len(), set_names.len());
                for (i, name) in set_names.iter().enumerate() {
                    space = space.set_dim_name(DimType::SET, i, *name)?;
                }
                space
            }
            (None, Some(in_names), Some(out_names)) => {
                let mut space = Space::alloc(params.len(), in_names.len(), out_names.len());
                for (i, name) in in_names.iter().enumerate() {
                    space = space.set_dim_name(DimType::In, i, *name)?;
                }
                for (i, name) in out_names.iter().enumerate() {
                    space = space.set_dim_name(DimType::Out, i, *name)?;
                }
                space
            }
            (Some(_), _, _) => {
                return Err(PolySetError::InvalidArgument(
                    "must pass only one of set / (in_, out)".into(),
                ))
            }
            _ => {
                return Err(PolySetError::InvalidArgument(
                    "invalid parameter combination".into(),
                ))
            }
        };

        for (i, name) in params.iter().enumerate() {
            result = result.set_dim_name(DimType::Param, i, *name)?;
        }
        Ok(result)
    }
}
