// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Wire primitives for bintransfer.
//!
//! Everything is little-endian. Byte strings carry a `uint32` length prefix
//! followed by `len % 4` zero bytes of padding; strings are UTF-8 byte
//! strings; 64-bit values decode to `0x`-prefixed big-endian hex text.
//!
//! # Examples
//!
//! ```
//! # use bintransfer_codec::*;
//! let mut s = Serializer::new();
//! s.write_uint(100).unwrap();
//! s.write_string("hi").unwrap();
//! let bytes = s.into_bytes();
//!
//! let mut d = Deserializer::new(&bytes);
//! assert_eq!(d.read_uint().unwrap(), 100);
//! assert_eq!(d.read_string().unwrap(), "hi");
//! ```

pub mod deserializer;
pub mod error;
pub mod long;
pub mod serializer;

pub use deserializer::Deserializer;
pub use error::{CodecError, CodecResult};
pub use long::LongInput;
pub use serializer::{padding_len, Serializer};
