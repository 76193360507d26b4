//! # polyset - named-dimension spaces over an integer-set algebra
//!
//! A convenience layer for polyhedral analysis: sets and maps of integer
//! points defined by linear constraints, with dimensions addressed by
//! symbolic name instead of raw `(kind, index)` position.
//!
//! ## Architecture
//!
//! ```text
//! caller -> names (directories, coefficients, projection) -> algebra backend
//! ```
//!
//! The `algebra` module holds the positional backend (spaces, constraints,
//! basic/general sets and maps, range elimination). The `names` module
//! layers symbolic addressing on top of it: variable directories, name-keyed
//! coefficient mappings, constraint factories, and keep-list projection. The
//! `upcast` module lets basic (single-conjunction) objects use every
//! operation of their union counterparts.
//!
//! ## Example
//!
//! ```rust
//! use polyset::prelude::*;
//!
//! # fn main() -> polyset::utils::errors::PolyResult<()> {
//! let space = Space::create_from_names(Some(&["x", "y"]), None, None, &["N"])?;
//! let bounds = [
//!     Constraint::ineq_from_names(space.clone(), [("x".into(), 1)])?,
//!     Constraint::ineq_from_names(space.clone(), [("x".into(), -1), ("N".into(), 1)])?,
//!     Constraint::ineq_from_names(space.clone(), [("y".into(), 1), ("x".into(), -1)])?,
//! ];
//! let domain = BasicSet::universe(space)?.add_constraints(&bounds)?;
//! let on_x = domain.project_out_except(&["x"], &[DimType::SET])?;
//! assert!(on_x.space().var_dict(None)?.contains_key("x"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algebra;
pub mod names;
pub mod printer;
pub mod upcast;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::algebra::{
        Aff, BasicMap, BasicSet, Constraint, ConstraintKind, DimType, Map, Set, Space,
    };
    pub use crate::names::{
        AddConstraints, CoeffKey, Coefficients, Projectable, VarDict, CHECK_DIM_TYPES,
    };
    pub use crate::printer::Printer;
    pub use crate::upcast::{AsGeneral, MapExt, SetExt};
    pub use crate::utils::errors::{PolyResult, PolySetError};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
