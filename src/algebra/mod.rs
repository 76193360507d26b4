//! The integer-set/relation algebra backend.
//!
//! This module provides the low-level objects and primitives the
//! name-resolution layer is built on:
//! - Spaces and dimension kinds
//! - Affine functions and constraints
//! - Basic sets/maps (one conjunction) and sets/maps (unions)
//! - Contiguous-range dimension elimination

pub mod aff;
pub mod constraint;
mod eliminate;
pub mod map;
pub mod set;
pub mod space;

pub use aff::Aff;
pub use constraint::{Constraint, ConstraintKind};
pub use map::{BasicMap, Map};
pub use set::{BasicSet, Set};
pub use space::{DimType, Space};
