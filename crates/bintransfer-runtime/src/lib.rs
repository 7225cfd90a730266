// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Model-driven encoder and decoder.
//!
//! A [`Schema`] indexes one or more compiled [`ModelSet`]s by name, ID, type
//! and trait. Encoding walks a tagged [`Value`] graph and writes each
//! container as its `uint32` ID followed by its params in declaration order.
//! Decoding reads the ID, finds the container and rebuilds the graph with
//! `_name`, `_type` and `_traits` keys first.
//!
//! ```
//! # use bintransfer_model::{Container, GenericType, ModelSet, Param};
//! # use bintransfer_runtime::{Schema, Value};
//! let user = Container::new("user", "User")
//!     .with_params(vec![Param::generic("id", GenericType::Uint)]);
//! let schema = Schema::new(&[ModelSet::new(vec![user])]).unwrap();
//!
//! let bytes = schema.encode(&Value::tagged("user").with("id", 100)).unwrap();
//! let back = schema.decode(&bytes).unwrap();
//! assert_eq!(back.get("id"), Some(&Value::Int(100)));
//! ```
//!
//! [`ModelSet`]: bintransfer_model::ModelSet

pub mod config;
mod decode;
pub mod encode;
pub mod error;
pub mod schema;
pub mod value;

pub use config::EngineConfig;
pub use encode::coerce_bytes;
pub use error::{EngineError, Result};
pub use schema::Schema;
pub use value::{Object, Value};
