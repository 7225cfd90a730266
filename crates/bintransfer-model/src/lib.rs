// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Compiled container model.
//!
//! The compiler lowers schema source into a flat list of [`Container`]s; the
//! runtime engine indexes that list and encodes against it. Every type here
//! serializes with serde, so a compiled model can be exported as JSON and
//! loaded back without re-parsing.

pub mod container;
pub mod generic;
pub mod param;

pub use container::{Container, ModelSet};
pub use generic::{GenericType, UnknownGenericType};
pub use param::{Param, ParamFlags, ParamShape, VectorItem};
