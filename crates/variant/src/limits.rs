//! Size limits for untrusted input
//!
//! Variants themselves are unbounded. [`VariantLimits`] lets a host reject
//! oversized documents at the JSON boundary, or check an existing tree,
//! before the data reaches application code.

use thiserror::Error;

use crate::traverse::{self, Builder, Container, Scalar, Tree};
use crate::value::Variant;

/// A configured limit was crossed
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{limit} exceeded: {actual} > {max}")]
pub struct LimitExceeded {
    /// Which limit, e.g. `max_nesting_depth`
    pub limit: &'static str,
    pub max: usize,
    pub actual: usize,
}

impl LimitExceeded {
    pub const fn new(limit: &'static str, max: usize, actual: usize) -> Self {
        Self { limit, max, actual }
    }

    /// Get error code for monitoring
    pub const fn code(&self) -> &'static str {
        "VARIANT_LIMIT_EXCEEDED"
    }
}

/// Configurable limits for variant trees
///
/// # Example
///
/// ```
/// use rvariant::VariantLimits;
///
/// let limits = VariantLimits::default();
/// assert_eq!(limits.max_sequence_length, 1_000_000);
///
/// let strict = VariantLimits::strict();
/// assert_eq!(strict.max_nesting_depth, 32);
/// assert!(strict.check_text_bytes(2_000_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VariantLimits {
    /// Maximum depth of nested containers; the root container is depth 1
    pub max_nesting_depth: usize,

    /// Maximum number of items in one sequence
    pub max_sequence_length: usize,

    /// Maximum number of entries in one mapping
    pub max_mapping_entries: usize,

    /// Maximum text length in bytes
    pub max_text_bytes: usize,
}

impl Default for VariantLimits {
    fn default() -> Self {
        Self {
            max_nesting_depth: 128,
            max_sequence_length: 1_000_000,
            max_mapping_entries: 100_000,
            max_text_bytes: 10_000_000, // 10MB
        }
    }
}

impl VariantLimits {
    /// Permissive limits for trusted environments
    pub const fn permissive() -> Self {
        Self {
            max_nesting_depth: 1024,
            max_sequence_length: 10_000_000,
            max_mapping_entries: 1_000_000,
            max_text_bytes: 100_000_000,
        }
    }

    /// Strict limits for untrusted input
    pub const fn strict() -> Self {
        Self {
            max_nesting_depth: 32,
            max_sequence_length: 10_000,
            max_mapping_entries: 1_000,
            max_text_bytes: 1_000_000, // 1MB
        }
    }

    /// No limits (use with caution!)
    pub const fn unlimited() -> Self {
        Self {
            max_nesting_depth: usize::MAX,
            max_sequence_length: usize::MAX,
            max_mapping_entries: usize::MAX,
            max_text_bytes: usize::MAX,
        }
    }

    #[inline]
    pub fn check_nesting_depth(&self, depth: usize) -> Result<(), LimitExceeded> {
        check("max_nesting_depth", self.max_nesting_depth, depth)
    }

    #[inline]
    pub fn check_sequence_length(&self, len: usize) -> Result<(), LimitExceeded> {
        check("max_sequence_length", self.max_sequence_length, len)
    }

    #[inline]
    pub fn check_mapping_entries(&self, count: usize) -> Result<(), LimitExceeded> {
        check("max_mapping_entries", self.max_mapping_entries, count)
    }

    #[inline]
    pub fn check_text_bytes(&self, bytes: usize) -> Result<(), LimitExceeded> {
        check("max_text_bytes", self.max_text_bytes, bytes)
    }
}

fn check(limit: &'static str, max: usize, actual: usize) -> Result<(), LimitExceeded> {
    if actual > max {
        Err(LimitExceeded::new(limit, max, actual))
    } else {
        Ok(())
    }
}

/// Walks a tree without building anything, failing on the first crossed
/// limit. Mapping keys are not measured.
struct LimitCheck<'l> {
    limits: &'l VariantLimits,
}

impl Builder for LimitCheck<'_> {
    type Output = ();
    type Error = LimitExceeded;

    fn leaf(&mut self, scalar: Scalar<'_>) -> Result<(), LimitExceeded> {
        match scalar {
            Scalar::Text(text) => self.limits.check_text_bytes(text.len()),
            _ => Ok(()),
        }
    }

    fn open(&mut self, depth: usize, len: usize, container: Container) -> Result<(), LimitExceeded> {
        self.limits.check_nesting_depth(depth)?;
        match container {
            Container::Sequence => self.limits.check_sequence_length(len),
            Container::Mapping => self.limits.check_mapping_entries(len),
        }
    }

    fn sequence(&mut self, _items: Vec<()>) {}

    fn mapping(&mut self, _entries: Vec<(String, ())>) {}
}

/// Check every node of `root` against `limits`.
pub(crate) fn check_tree<S: Tree>(root: &S, limits: &VariantLimits) -> Result<(), LimitExceeded> {
    traverse::rebuild(root, &mut LimitCheck { limits }).inspect_err(|exceeded| {
        tracing::debug!(
            limit = exceeded.limit,
            max = exceeded.max,
            actual = exceeded.actual,
            "variant tree rejected by limits"
        );
    })
}

impl Variant {
    /// Check this tree against `limits`
    ///
    /// ```
    /// use rvariant::{Variant, VariantLimits};
    ///
    /// let nested = Variant::from(vec![Variant::from(vec![Variant::from(1)])]);
    /// let limits = VariantLimits { max_nesting_depth: 1, ..VariantLimits::default() };
    /// assert_eq!(nested.check_limits(&limits).unwrap_err().actual, 2);
    /// ```
    pub fn check_limits(&self, limits: &VariantLimits) -> Result<(), LimitExceeded> {
        check_tree(self, limits)
    }
}
