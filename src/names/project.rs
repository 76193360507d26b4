//! Projecting out every dimension of a kind except a named keep-list.

use std::collections::HashSet;

use log::debug;

use crate::algebra::map::{BasicMap, Map};
use crate::algebra::set::{BasicSet, Set};
use crate::algebra::space::{DimType, Space};
use crate::utils::errors::PolyResult;

/// Objects that expose their space and the backend's contiguous-range
/// elimination primitive.
pub trait Projectable: Sized {
    /// The object's current space.
    fn get_space(&self) -> Space;

    /// Eliminate the contiguous dimension range `(tp, first, n)`.
    fn project_out(self, tp: DimType, first: usize, n: usize) -> PolyResult<Self>;

    /// Project out every dimension of the given kinds whose name is not in
    /// `names`.
    ///
    /// Kinds are processed in the given order. For each kind the keep-set is
    /// re-resolved by name against a freshly computed directory every round,
    /// and one maximal run of consecutive doomed indices is eliminated per
    /// backend call; rounds repeat until nothing is left to project (indices
    /// shift after each elimination, and eliminating a div can expose new
    /// divs). Names absent from the current directory are ignored: they may
    /// belong to a different kind or have already been eliminated.
    fn project_out_except(mut self, names: &[&str], types: &[DimType]) -> PolyResult<Self> {
        for &tp in types {
            loop {
                let space = self.get_space();
                let var_dict = space.var_dict(Some(tp))?;
                let size = space.size(tp);
                let keep: HashSet<usize> = names
                    .iter()
                    .filter_map(|name| var_dict.get(*name).map(|&(_, idx)| idx))
                    .collect();

                let Some(first) = (0..size).find(|i| !keep.contains(i)) else {
                    break;
                };
                let mut count = 1;
                while first + count < size && !keep.contains(&(first + count)) {
                    count += 1;
                }

                debug!("projecting out {} {} dim(s) at index {}", count, tp, first);
                self = self.project_out(tp, first, count)?;
            }
        }
        Ok(self)
    }

    /// Project out every existential dimension.
    fn remove_divs(self) -> PolyResult<Self> {
        let n = self.get_space().size(DimType::Div);
        if n == 0 {
            return Ok(self);
        }
        self.project_out(DimType::Div, 0, n)
    }
}

impl Projectable for BasicSet {
    fn get_space(&self) -> Space {
        self.space().clone()
    }

    fn project_out(self, tp: DimType, first: usize, n: usize) -> PolyResult<Self> {
        BasicSet::project_out(self, tp, first, n)
    }
}

impl Projectable for Set {
    fn get_space(&self) -> Space {
        self.space().clone()
    }

    fn project_out(self, tp: DimType, first: usize, n: usize) -> PolyResult<Self> {
        Set::project_out(self, tp, first, n)
    }
}

impl Projectable for BasicMap {
    fn get_space(&self) -> Space {
        self.space().clone()
    }

    fn project_out(self, tp: DimType, first: usize, n: usize) -> PolyResult<Self> {
        BasicMap::project_out(self, tp, first, n)
    }
}

impl Projectable for Map {
    fn get_space(&self) -> Space {
        self.space().clone()
    }

    fn project_out(self, tp: DimType, first: usize, n: usize) -> PolyResult<Self> {
        Map::project_out(self, tp, first, n)
    }
}
