//! # rvariant
//!
//! A dynamic, self-describing value container for exchanging structured data
//! between strongly-typed code and schema-less JSON documents.
//!
//! ## Core Components
//!
//! - [`Variant`]: a tagged union holding exactly one of `Empty`, `Boolean`,
//!   `Signed` (i64), `Unsigned` (u64), `Floating` (f64), `Text`, `Sequence`
//!   or `Mapping`. Narrower numeric inputs are widened into the canonical
//!   64-bit case of matching signedness.
//! - Narrowing accessors: `as_i16()`, `u8_or(7)`, `get::<T>()` and friends
//!   check the stored class and the target range before handing a value back.
//! - Structural equality over the whole tree, order-sensitive for sequences
//!   and order-insensitive for mappings.
//! - The JSON bridge: [`Variant::from_json`] and [`Variant::to_json`] over
//!   [`serde_json::Value`].
//!
//! Deep copy, drop, equality, rendering and JSON conversion all use explicit
//! heap stacks, so pathologically deep trees do not exhaust the call stack.
//!
//! ## Usage
//!
//! ```rust
//! use rvariant::{ErrorKind, Variant};
//! use serde_json::json;
//!
//! let doc = json!({"name": "Ann", "age": 30, "tags": ["x", "y"]});
//! let person = Variant::from_json(&doc);
//!
//! let fields = person.as_mapping()?;
//! assert_eq!(fields["name"].as_str()?, "Ann");
//! assert_eq!(fields["age"].as_i32()?, 30);
//! assert_eq!(fields["age"].as_u8().unwrap_err().kind(), ErrorKind::TypeMismatch);
//!
//! assert_eq!(person.to_json(), doc);
//! # Ok::<(), rvariant::VariantError>(())
//! ```

pub mod access;
pub mod convert;
pub mod display;
pub mod eq;
pub mod error;
pub mod fields;
pub mod json;
pub mod kind;
pub mod limits;
#[cfg(feature = "serde")]
pub mod serde;
mod traverse;
pub mod value;

pub use convert::VariantConvert;
pub use error::{ErrorKind, Result, VariantError};
pub use fields::{FieldsBuilder, FieldsReader};
pub use json::JsonError;
pub use kind::VariantKind;
pub use limits::{LimitExceeded, VariantLimits};
pub use value::{Mapping, Sequence, Variant, VariantRef};

// Re-export serde_json::json! so callers can build documents without a
// direct serde_json dependency.
pub use serde_json::json;

/// Common imports for working with variants.
pub mod prelude {
    pub use crate::{
        ErrorKind, FieldsBuilder, FieldsReader, Mapping, Sequence, Variant, VariantConvert,
        VariantError, VariantKind, VariantLimits, VariantRef,
    };
}
