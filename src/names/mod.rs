//! The named-dimension convenience layer.
//!
//! Everything here is built strictly on the backend's positional
//! primitives: name resolution happens in this layer and is re-derived from
//! the object's space whenever indices may have shifted.

pub mod coefficients;
pub mod constraints;
pub mod project;
pub mod vardict;

pub use coefficients::{CoeffKey, Coefficients};
pub use constraints::AddConstraints;
pub use project::Projectable;
pub use vardict::{VarDict, CHECK_DIM_TYPES};
