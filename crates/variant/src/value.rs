//! The canonical value store.
//!
//! [`Variant`] keeps its payload in a private tagged union. Every numeric
//! input is widened into one of three 64-bit canonical cases (`i64`, `u64`,
//! `f64`), so construction is total. Containers own their children outright:
//! the structure is always a tree, copied deeply and released iteratively.

use std::collections::HashMap;
use std::convert::Infallible;
use std::mem;

use crate::error::{Result, VariantError};
use crate::kind::VariantKind;
use crate::traverse::{self, Builder, Scalar};

/// Ordered list of variants
pub type Sequence = Vec<Variant>;

/// Unique text keys to variants; iteration order carries no meaning
pub type Mapping = HashMap<String, Variant>;

/// A dynamic value holding exactly one active case
///
/// # Example
///
/// ```
/// use rvariant::{Variant, VariantKind};
///
/// let small: i16 = 300;
/// let value = Variant::from(small);
/// assert_eq!(value.kind(), VariantKind::Signed);
/// assert_eq!(value.as_i64().unwrap(), 300);
/// ```
pub struct Variant {
    repr: Repr,
}

#[derive(Default)]
enum Repr {
    #[default]
    Empty,
    Boolean(bool),
    Signed(i64),
    Unsigned(u64),
    Floating(f64),
    Text(String),
    Sequence(Sequence),
    Mapping(Mapping),
}

impl Repr {
    fn kind(&self) -> VariantKind {
        match self {
            Self::Empty => VariantKind::Empty,
            Self::Boolean(_) => VariantKind::Boolean,
            Self::Signed(_) => VariantKind::Signed,
            Self::Unsigned(_) => VariantKind::Unsigned,
            Self::Floating(_) => VariantKind::Floating,
            Self::Text(_) => VariantKind::Text,
            Self::Sequence(_) => VariantKind::Sequence,
            Self::Mapping(_) => VariantKind::Mapping,
        }
    }
}

/// Borrowed view of a variant's active case, for pattern matching
#[derive(Debug, Clone, Copy)]
pub enum VariantRef<'a> {
    Empty,
    Boolean(bool),
    Signed(i64),
    Unsigned(u64),
    Floating(f64),
    Text(&'a str),
    Sequence(&'a Sequence),
    Mapping(&'a Mapping),
}

impl<'a> VariantRef<'a> {
    /// Get the kind of the viewed case
    pub fn kind(self) -> VariantKind {
        match self {
            Self::Empty => VariantKind::Empty,
            Self::Boolean(_) => VariantKind::Boolean,
            Self::Signed(_) => VariantKind::Signed,
            Self::Unsigned(_) => VariantKind::Unsigned,
            Self::Floating(_) => VariantKind::Floating,
            Self::Text(_) => VariantKind::Text,
            Self::Sequence(_) => VariantKind::Sequence,
            Self::Mapping(_) => VariantKind::Mapping,
        }
    }

    pub fn boolean(self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(b),
            _ => None,
        }
    }

    pub fn signed(self) -> Option<i64> {
        match self {
            Self::Signed(i) => Some(i),
            _ => None,
        }
    }

    pub fn unsigned(self) -> Option<u64> {
        match self {
            Self::Unsigned(u) => Some(u),
            _ => None,
        }
    }

    pub fn floating(self) -> Option<f64> {
        match self {
            Self::Floating(f) => Some(f),
            _ => None,
        }
    }

    pub fn text(self) -> Option<&'a str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn sequence(self) -> Option<&'a Sequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn mapping(self) -> Option<&'a Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

impl Variant {
    // ==================== Constructors ====================

    /// Create an empty variant
    pub const fn empty() -> Self {
        Self { repr: Repr::Empty }
    }

    /// Create a boolean variant
    pub const fn boolean(v: bool) -> Self {
        Self {
            repr: Repr::Boolean(v),
        }
    }

    /// Create a signed variant
    pub const fn signed(v: i64) -> Self {
        Self {
            repr: Repr::Signed(v),
        }
    }

    /// Create an unsigned variant
    pub const fn unsigned(v: u64) -> Self {
        Self {
            repr: Repr::Unsigned(v),
        }
    }

    /// Create a floating point variant
    pub const fn floating(v: f64) -> Self {
        Self {
            repr: Repr::Floating(v),
        }
    }

    /// Create a text variant from String or &str
    pub fn text(v: impl Into<String>) -> Self {
        Self {
            repr: Repr::Text(v.into()),
        }
    }

    /// Create a sequence variant
    pub fn sequence(v: Sequence) -> Self {
        Self {
            repr: Repr::Sequence(v),
        }
    }

    /// Create a mapping variant
    pub fn mapping(v: Mapping) -> Self {
        Self {
            repr: Repr::Mapping(v),
        }
    }

    // ==================== Type queries ====================

    /// Get the kind of this variant
    #[inline]
    pub fn kind(&self) -> VariantKind {
        self.repr.kind()
    }

    /// Borrow the active case for pattern matching
    #[inline]
    pub fn view(&self) -> VariantRef<'_> {
        match &self.repr {
            Repr::Empty => VariantRef::Empty,
            Repr::Boolean(b) => VariantRef::Boolean(*b),
            Repr::Signed(i) => VariantRef::Signed(*i),
            Repr::Unsigned(u) => VariantRef::Unsigned(*u),
            Repr::Floating(f) => VariantRef::Floating(*f),
            Repr::Text(t) => VariantRef::Text(t),
            Repr::Sequence(s) => VariantRef::Sequence(s),
            Repr::Mapping(m) => VariantRef::Mapping(m),
        }
    }

    /// Check if this variant holds no value
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self.repr, Repr::Empty)
    }

    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self.repr, Repr::Boolean(_))
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        matches!(self.repr, Repr::Signed(_))
    }

    #[inline]
    pub fn is_unsigned(&self) -> bool {
        matches!(self.repr, Repr::Unsigned(_))
    }

    #[inline]
    pub fn is_floating(&self) -> bool {
        matches!(self.repr, Repr::Floating(_))
    }

    /// Check if this is numeric (signed, unsigned or floating)
    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.repr, Repr::Text(_))
    }

    #[inline]
    pub fn is_sequence(&self) -> bool {
        matches!(self.repr, Repr::Sequence(_))
    }

    #[inline]
    pub fn is_mapping(&self) -> bool {
        matches!(self.repr, Repr::Mapping(_))
    }

    // ==================== Ownership transfer ====================

    /// Move the whole tree out, leaving this variant empty
    ///
    /// ```
    /// use rvariant::{ErrorKind, Variant};
    ///
    /// let mut source = Variant::from("payload");
    /// let target = source.take();
    /// assert_eq!(target.as_str().unwrap(), "payload");
    /// assert_eq!(source.as_str().unwrap_err().kind(), ErrorKind::EmptyValue);
    /// ```
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Store `value` and return the previous content
    pub fn replace(&mut self, value: impl Into<Self>) -> Self {
        mem::replace(self, value.into())
    }

    // ==================== Mutable and owning access ====================

    /// Mutable view of a sequence
    pub fn as_sequence_mut(&mut self) -> Result<&mut Sequence> {
        match &mut self.repr {
            Repr::Sequence(items) => Ok(items),
            Repr::Empty => Err(VariantError::empty_value("Sequence")),
            other => Err(VariantError::type_mismatch(
                VariantKind::Sequence,
                other.kind(),
            )),
        }
    }

    /// Mutable view of a mapping
    pub fn as_mapping_mut(&mut self) -> Result<&mut Mapping> {
        match &mut self.repr {
            Repr::Mapping(entries) => Ok(entries),
            Repr::Empty => Err(VariantError::empty_value("Mapping")),
            other => Err(VariantError::type_mismatch(
                VariantKind::Mapping,
                other.kind(),
            )),
        }
    }

    /// Move the text out without copying
    pub fn into_string(mut self) -> Result<String> {
        match mem::take(&mut self.repr) {
            Repr::Text(text) => Ok(text),
            Repr::Empty => Err(VariantError::empty_value("String")),
            other => Err(VariantError::type_mismatch(VariantKind::Text, other.kind())),
        }
    }

    /// Move the sequence out without copying
    pub fn into_sequence(mut self) -> Result<Sequence> {
        match mem::take(&mut self.repr) {
            Repr::Sequence(items) => Ok(items),
            Repr::Empty => Err(VariantError::empty_value("Sequence")),
            other => Err(VariantError::type_mismatch(
                VariantKind::Sequence,
                other.kind(),
            )),
        }
    }

    /// Move the mapping out without copying
    pub fn into_mapping(mut self) -> Result<Mapping> {
        match mem::take(&mut self.repr) {
            Repr::Mapping(entries) => Ok(entries),
            Repr::Empty => Err(VariantError::empty_value("Mapping")),
            other => Err(VariantError::type_mismatch(
                VariantKind::Mapping,
                other.kind(),
            )),
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::empty()
    }
}

// ==================== Deep copy and release ====================

/// Assembles a variant tree node by node, from any walkable tree.
pub(crate) struct Assemble;

impl Builder for Assemble {
    type Output = Variant;
    type Error = Infallible;

    fn leaf(&mut self, scalar: Scalar<'_>) -> std::result::Result<Variant, Infallible> {
        Ok(Variant::from_scalar(scalar))
    }

    fn sequence(&mut self, items: Vec<Variant>) -> Variant {
        Variant::sequence(items)
    }

    fn mapping(&mut self, entries: Vec<(String, Variant)>) -> Variant {
        Variant::mapping(entries.into_iter().collect())
    }
}

impl Clone for Variant {
    fn clone(&self) -> Self {
        match traverse::rebuild(self, &mut Assemble) {
            Ok(copy) => copy,
            Err(never) => match never {},
        }
    }
}

impl Drop for Variant {
    fn drop(&mut self) {
        // Children are moved onto a heap worklist and emptied one by one, so
        // every nested drop sees leaf-only containers.
        let mut pending: Vec<Variant> = match &mut self.repr {
            Repr::Sequence(items) if !items.is_empty() => mem::take(items),
            Repr::Mapping(entries) if !entries.is_empty() => {
                entries.drain().map(|(_, value)| value).collect()
            }
            _ => return,
        };

        while let Some(mut node) = pending.pop() {
            match &mut node.repr {
                Repr::Sequence(items) => pending.append(items),
                Repr::Mapping(entries) => pending.extend(entries.drain().map(|(_, value)| value)),
                _ => {}
            }
        }
    }
}

static_assertions::assert_impl_all!(Variant: Send, Sync, Clone, Default);

// ==================== From implementations ====================

impl Variant {
    pub(crate) fn from_scalar(scalar: Scalar<'_>) -> Self {
        match scalar {
            Scalar::Empty => Self::empty(),
            Scalar::Boolean(b) => Self::boolean(b),
            Scalar::Signed(i) => Self::signed(i),
            Scalar::Unsigned(u) => Self::unsigned(u),
            Scalar::Floating(f) => Self::floating(f),
            Scalar::Text(t) => Self::text(t),
        }
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Self::boolean(v)
    }
}

macro_rules! widen_into {
    ($ctor:ident, $canonical:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for Variant {
                fn from(v: $ty) -> Self {
                    Self::$ctor(<$canonical>::from(v))
                }
            }
        )+
    };
}

widen_into!(signed, i64: i8, i16, i32, i64);
widen_into!(unsigned, u64: u8, u16, u32, u64);
widen_into!(floating, f64: f32, f64);

impl From<isize> for Variant {
    fn from(v: isize) -> Self {
        Self::signed(v as i64)
    }
}

impl From<usize> for Variant {
    fn from(v: usize) -> Self {
        Self::unsigned(v as u64)
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Self::text(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Self::text(v)
    }
}

impl From<Sequence> for Variant {
    fn from(v: Sequence) -> Self {
        Self::sequence(v)
    }
}

impl From<Mapping> for Variant {
    fn from(v: Mapping) -> Self {
        Self::mapping(v)
    }
}

impl<T: Into<Variant>> From<Option<T>> for Variant {
    fn from(v: Option<T>) -> Self {
        v.map_or_else(Self::empty, Into::into)
    }
}

impl FromIterator<Variant> for Variant {
    fn from_iter<I: IntoIterator<Item = Variant>>(iter: I) -> Self {
        Self::sequence(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Variant)> for Variant {
    fn from_iter<I: IntoIterator<Item = (K, Variant)>>(iter: I) -> Self {
        Self::mapping(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nested(depth: usize) -> Variant {
        let mut value = Variant::from(0);
        for _ in 0..depth {
            value = Variant::sequence(vec![value]);
        }
        value
    }

    #[test]
    fn test_default_is_empty() {
        let value = Variant::default();
        assert!(value.is_empty());
        assert_eq!(value.kind(), VariantKind::Empty);
    }

    #[test]
    fn test_numeric_widening() {
        assert_eq!(Variant::from(-5i8).kind(), VariantKind::Signed);
        assert_eq!(Variant::from(i64::MIN).view().signed(), Some(i64::MIN));
        assert_eq!(Variant::from(200u8).kind(), VariantKind::Unsigned);
        assert_eq!(Variant::from(usize::MAX).view().unsigned(), Some(u64::MAX));
        assert_eq!(Variant::from(1.5f32).view().floating(), Some(1.5));
        assert_eq!(Variant::from(-3isize).view().signed(), Some(-3));
    }

    #[test]
    fn test_option_conversion() {
        assert!(Variant::from(None::<i32>).is_empty());
        assert!(Variant::from(Some("x")).is_text());
    }

    #[test]
    fn test_collect() {
        let items: Variant = (1..=3).map(Variant::from).collect();
        assert_eq!(items.as_sequence().unwrap().len(), 3);

        let entries: Variant = [("a", Variant::from(1)), ("b", Variant::from(2))]
            .into_iter()
            .collect();
        assert_eq!(entries.as_mapping().unwrap().len(), 2);
    }

    #[test]
    fn test_take_leaves_empty() {
        let mut source = Variant::from(vec![Variant::from(1), Variant::from("x")]);
        let target = source.take();
        assert!(source.is_empty());
        assert_eq!(target.as_sequence().unwrap().len(), 2);
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut value = Variant::from(1u8);
        let previous = value.replace("now text");
        assert_eq!(previous.as_u8().unwrap(), 1);
        assert_eq!(value.as_str().unwrap(), "now text");
    }

    #[test]
    fn test_clone_is_deep() {
        let original: Variant = [("list", Variant::from(vec![Variant::from(1)]))]
            .into_iter()
            .collect();
        let mut copy = original.clone();

        let list = copy.as_mapping_mut().unwrap().get_mut("list").unwrap();
        list.as_sequence_mut().unwrap().push(Variant::from(2));

        assert_eq!(original.as_mapping().unwrap()["list"].as_sequence().unwrap().len(), 1);
        assert_eq!(copy.as_mapping().unwrap()["list"].as_sequence().unwrap().len(), 2);
    }

    #[test]
    fn test_into_accessors() {
        assert_eq!(Variant::from("abc").into_string().unwrap(), "abc");
        assert_eq!(
            Variant::from(1).into_string().unwrap_err(),
            VariantError::type_mismatch(VariantKind::Text, VariantKind::Signed)
        );
        assert_eq!(
            Variant::empty().into_sequence().unwrap_err(),
            VariantError::empty_value("Sequence")
        );
        let entries = Variant::mapping(Mapping::new()).into_mapping().unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_mut_views_reject_other_kinds() {
        let mut value = Variant::from(true);
        assert_eq!(
            value.as_mapping_mut().unwrap_err(),
            VariantError::type_mismatch(VariantKind::Mapping, VariantKind::Boolean)
        );
        let mut empty = Variant::empty();
        assert_eq!(
            empty.as_sequence_mut().unwrap_err(),
            VariantError::empty_value("Sequence")
        );
    }

    #[test]
    fn test_deep_clone_and_drop() {
        let deep = nested(200_000);
        let copy = deep.clone();
        drop(deep);
        drop(copy);
    }

    #[test]
    fn test_deep_mapping_drop() {
        let mut value = Variant::from("leaf");
        for level in 0..100_000 {
            value = [(format!("k{level}"), value)].into_iter().collect();
        }
        drop(value);
    }
}
