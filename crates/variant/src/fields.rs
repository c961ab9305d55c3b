//! Named-field helpers for hand-written [`VariantConvert`] impls.
//!
//! A struct lists its fields explicitly: [`FieldsBuilder`] writes them into a
//! `Mapping`, [`FieldsReader`] reads them back under the strict or the
//! default-valued contract. A failing field is reported with its key.

use crate::convert::VariantConvert;
use crate::error::Result;
use crate::value::{Mapping, Variant};

static MISSING: Variant = Variant::empty();

/// Builder for a mapping of named fields
///
/// # Example
///
/// ```
/// use rvariant::{FieldsBuilder, Variant};
///
/// let person = FieldsBuilder::new()
///     .field("name", &"Ann".to_string())
///     .field("age", &30u8)
///     .insert("extra", Variant::empty())
///     .build();
///
/// assert_eq!(person.as_mapping().unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldsBuilder {
    entries: Mapping,
}

impl FieldsBuilder {
    /// Create a new fields builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mapping::with_capacity(capacity),
        }
    }

    /// Add a field from any convertible value
    pub fn field<T: VariantConvert>(self, name: impl Into<String>, value: &T) -> Self {
        self.insert(name, value.to_variant())
    }

    /// Add a field from an already built variant
    pub fn insert(mut self, name: impl Into<String>, value: Variant) -> Self {
        self.entries.insert(name.into(), value);
        self
    }

    /// Get current number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the final mapping variant
    pub fn build(self) -> Variant {
        Variant::mapping(self.entries)
    }
}

/// Reads named fields out of a mapping variant
#[derive(Debug, Clone, Copy)]
pub struct FieldsReader<'a> {
    entries: &'a Mapping,
}

impl<'a> FieldsReader<'a> {
    /// Fails unless `variant` holds a mapping
    pub fn new(variant: &'a Variant) -> Result<Self> {
        Ok(Self {
            entries: variant.as_mapping()?,
        })
    }

    /// Read a required field; a missing key counts as empty
    pub fn field<T: VariantConvert>(&self, name: &str) -> Result<T> {
        T::from_variant(self.raw(name)).map_err(|e| e.at_key(name))
    }

    /// Read a field, returning `default` when it is missing or empty
    pub fn field_or<T: VariantConvert>(&self, name: &str, default: T) -> Result<T> {
        self.raw(name).get_or(default).map_err(|e| e.at_key(name))
    }

    /// Check whether the field is present, even if empty
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The stored variant, or an empty one when missing
    pub fn raw(&self, name: &str) -> &'a Variant {
        self.entries.get(name).unwrap_or(&MISSING)
    }
}
