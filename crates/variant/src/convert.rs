//! The explicit conversion contract between static types and [`Variant`].
//!
//! A type is convertible exactly when it implements [`VariantConvert`]; there
//! is no discovery by introspection. Built-in scalars, text, containers and
//! `Option` are covered here. Application types implement the trait by hand,
//! usually with [`FieldsBuilder`](crate::FieldsBuilder) and
//! [`FieldsReader`](crate::FieldsReader).
//!
//! Reading back follows the narrowing rules: an empty variant is
//! `EmptyValue`, a different class is `TypeMismatch`, and a value outside the
//! target's range is `RangeOverflow`.

use std::any::type_name;
use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, VariantError};
use crate::kind::VariantKind;
use crate::value::{Variant, VariantRef};

/// Two-way conversion between a static type and [`Variant`]
///
/// # Example
///
/// ```
/// use rvariant::{FieldsBuilder, FieldsReader, Result, Variant, VariantConvert};
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl VariantConvert for Point {
///     fn to_variant(&self) -> Variant {
///         FieldsBuilder::new().field("x", &self.x).field("y", &self.y).build()
///     }
///
///     fn from_variant(variant: &Variant) -> Result<Self> {
///         let fields = FieldsReader::new(variant)?;
///         Ok(Self { x: fields.field("x")?, y: fields.field("y")? })
///     }
/// }
///
/// let point = Point { x: 3, y: -4 };
/// assert_eq!(Point::from_variant(&point.to_variant()).unwrap(), point);
/// ```
pub trait VariantConvert: Sized {
    /// Build a variant holding this value
    fn to_variant(&self) -> Variant;

    /// Read a value back, applying the narrowing checks
    fn from_variant(variant: &Variant) -> Result<Self>;
}

/// Check class and emptiness, then hand the matching payload back.
///
/// `pick` returns `None` when the variant holds a different class.
pub(crate) fn extract<'a, T>(
    variant: &'a Variant,
    requested: &str,
    expected: VariantKind,
    pick: impl FnOnce(VariantRef<'a>) -> Option<T>,
) -> Result<T> {
    let view = variant.view();
    if let VariantRef::Empty = view {
        return Err(VariantError::empty_value(requested));
    }
    pick(view).ok_or_else(|| VariantError::type_mismatch(expected, view.kind()))
}

fn narrow_signed<T: TryFrom<i64>>(variant: &Variant) -> Result<T> {
    let name = type_name::<T>();
    let value = extract(variant, name, VariantKind::Signed, VariantRef::signed)?;
    T::try_from(value).map_err(|_| VariantError::range_overflow(name, value.to_string()))
}

fn narrow_unsigned<T: TryFrom<u64>>(variant: &Variant) -> Result<T> {
    let name = type_name::<T>();
    let value = extract(variant, name, VariantKind::Unsigned, VariantRef::unsigned)?;
    T::try_from(value).map_err(|_| VariantError::range_overflow(name, value.to_string()))
}

macro_rules! integer_convert {
    ($narrow:ident: $($ty:ty),+) => {
        $(
            impl VariantConvert for $ty {
                fn to_variant(&self) -> Variant {
                    Variant::from(*self)
                }

                fn from_variant(variant: &Variant) -> Result<Self> {
                    $narrow(variant)
                }
            }
        )+
    };
}

integer_convert!(narrow_signed: i8, i16, i32, i64, isize);
integer_convert!(narrow_unsigned: u8, u16, u32, u64, usize);

impl VariantConvert for bool {
    fn to_variant(&self) -> Variant {
        Variant::boolean(*self)
    }

    fn from_variant(variant: &Variant) -> Result<Self> {
        extract(variant, "bool", VariantKind::Boolean, VariantRef::boolean)
    }
}

impl VariantConvert for f64 {
    fn to_variant(&self) -> Variant {
        Variant::floating(*self)
    }

    fn from_variant(variant: &Variant) -> Result<Self> {
        extract(variant, "f64", VariantKind::Floating, VariantRef::floating)
    }
}

impl VariantConvert for f32 {
    fn to_variant(&self) -> Variant {
        Variant::from(*self)
    }

    /// NaN and infinities pass through; finite values beyond `f32::MAX`
    /// overflow.
    fn from_variant(variant: &Variant) -> Result<Self> {
        let value = extract(variant, "f32", VariantKind::Floating, VariantRef::floating)?;
        if value.is_finite() && value.abs() > f64::from(f32::MAX) {
            return Err(VariantError::range_overflow("f32", value.to_string()));
        }
        Ok(value as f32)
    }
}

impl VariantConvert for String {
    fn to_variant(&self) -> Variant {
        Variant::text(self.as_str())
    }

    fn from_variant(variant: &Variant) -> Result<Self> {
        extract(variant, "String", VariantKind::Text, VariantRef::text).map(str::to_owned)
    }
}

impl VariantConvert for Variant {
    fn to_variant(&self) -> Variant {
        self.clone()
    }

    fn from_variant(variant: &Variant) -> Result<Self> {
        Ok(variant.clone())
    }
}

impl<T: VariantConvert> VariantConvert for Option<T> {
    fn to_variant(&self) -> Variant {
        self.as_ref().map_or_else(Variant::empty, T::to_variant)
    }

    fn from_variant(variant: &Variant) -> Result<Self> {
        if variant.is_empty() {
            Ok(None)
        } else {
            T::from_variant(variant).map(Some)
        }
    }
}

impl<T: VariantConvert> VariantConvert for Vec<T> {
    fn to_variant(&self) -> Variant {
        self.iter().map(T::to_variant).collect()
    }

    fn from_variant(variant: &Variant) -> Result<Self> {
        let items = extract(
            variant,
            type_name::<Self>(),
            VariantKind::Sequence,
            VariantRef::sequence,
        )?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| T::from_variant(item).map_err(|e| e.at_index(index)))
            .collect()
    }
}

impl<T: VariantConvert> VariantConvert for HashMap<String, T> {
    fn to_variant(&self) -> Variant {
        self.iter().map(|(k, v)| (k.as_str(), v.to_variant())).collect()
    }

    fn from_variant(variant: &Variant) -> Result<Self> {
        let entries = extract(
            variant,
            type_name::<Self>(),
            VariantKind::Mapping,
            VariantRef::mapping,
        )?;
        entries
            .iter()
            .map(|(key, value)| {
                T::from_variant(value)
                    .map(|v| (key.clone(), v))
                    .map_err(|e| e.at_key(key))
            })
            .collect()
    }
}

impl<T: VariantConvert> VariantConvert for BTreeMap<String, T> {
    fn to_variant(&self) -> Variant {
        self.iter().map(|(k, v)| (k.as_str(), v.to_variant())).collect()
    }

    fn from_variant(variant: &Variant) -> Result<Self> {
        let entries = extract(
            variant,
            type_name::<Self>(),
            VariantKind::Mapping,
            VariantRef::mapping,
        )?;
        entries
            .iter()
            .map(|(key, value)| {
                T::from_variant(value)
                    .map(|v| (key.clone(), v))
                    .map_err(|e| e.at_key(key))
            })
            .collect()
    }
}
