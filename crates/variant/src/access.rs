//! Narrowing accessors.
//!
//! Every supported target type gets a strict getter (`as_i16`, `as_str`, ...)
//! and a getter with a caller-supplied default (`i16_or`, `text_or`, ...).
//! Both check the stored class and the target range; only the defaulted form
//! turns an empty variant into its default.

use crate::convert::{VariantConvert, extract};
use crate::error::Result;
use crate::kind::VariantKind;
use crate::value::{Mapping, Sequence, Variant, VariantRef};

macro_rules! scalar_accessors {
    ($($ty:ty => $strict:ident, $defaulted:ident);+ $(;)?) => {
        impl Variant {
            $(
                #[doc = concat!("Read as `", stringify!($ty), "`")]
                #[inline]
                pub fn $strict(&self) -> Result<$ty> {
                    <$ty>::from_variant(self)
                }

                #[doc = concat!("Read as `", stringify!($ty), "`, or `default` when empty")]
                #[inline]
                pub fn $defaulted(&self, default: $ty) -> Result<$ty> {
                    self.get_or(default)
                }
            )+
        }
    };
}

scalar_accessors! {
    bool => as_bool, bool_or;
    i8 => as_i8, i8_or;
    i16 => as_i16, i16_or;
    i32 => as_i32, i32_or;
    i64 => as_i64, i64_or;
    isize => as_isize, isize_or;
    u8 => as_u8, u8_or;
    u16 => as_u16, u16_or;
    u32 => as_u32, u32_or;
    u64 => as_u64, u64_or;
    usize => as_usize, usize_or;
    f32 => as_f32, f32_or;
    f64 => as_f64, f64_or;
}

impl Variant {
    /// Read any convertible type
    ///
    /// ```
    /// use rvariant::Variant;
    ///
    /// let value = Variant::from(vec![Variant::from(1u8), Variant::from(2u8)]);
    /// let numbers: Vec<u16> = value.get().unwrap();
    /// assert_eq!(numbers, [1, 2]);
    /// ```
    pub fn get<T: VariantConvert>(&self) -> Result<T> {
        T::from_variant(self)
    }

    /// Read any convertible type, returning `default` when empty
    ///
    /// Mismatched or out-of-range values still fail.
    pub fn get_or<T: VariantConvert>(&self, default: T) -> Result<T> {
        if self.is_empty() {
            Ok(default)
        } else {
            T::from_variant(self)
        }
    }

    /// Borrow the text without copying
    pub fn as_str(&self) -> Result<&str> {
        extract(self, "&str", VariantKind::Text, VariantRef::text)
    }

    /// Borrow the sequence without copying
    pub fn as_sequence(&self) -> Result<&Sequence> {
        extract(self, "Sequence", VariantKind::Sequence, VariantRef::sequence)
    }

    /// Borrow the mapping without copying
    pub fn as_mapping(&self) -> Result<&Mapping> {
        extract(self, "Mapping", VariantKind::Mapping, VariantRef::mapping)
    }

    /// Owned copy of the text, or `default` when empty
    pub fn text_or(&self, default: impl Into<String>) -> Result<String> {
        if self.is_empty() {
            return Ok(default.into());
        }
        self.as_str().map(str::to_owned)
    }

    /// Owned copy of the sequence, or `default` when empty
    pub fn sequence_or(&self, default: Sequence) -> Result<Sequence> {
        if self.is_empty() {
            return Ok(default);
        }
        self.as_sequence().cloned()
    }

    /// Owned copy of the mapping, or `default` when empty
    pub fn mapping_or(&self, default: Mapping) -> Result<Mapping> {
        if self.is_empty() {
            return Ok(default);
        }
        self.as_mapping().cloned()
    }
}
