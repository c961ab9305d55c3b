//! Variant kinds.
//!
//! `VariantKind` names the active case of a [`Variant`](crate::Variant).
//! Each kind is its own accessor class: booleans never read as numbers, and
//! signed, unsigned and floating values never read as one another.

use std::fmt::{Display, Formatter};

/// The active case of a variant
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VariantKind {
    Empty,
    Boolean,
    Signed,
    Unsigned,
    Floating,
    Text,
    Sequence,
    Mapping,
}

impl VariantKind {
    /// Every kind, in declaration order
    pub const ALL: [Self; 8] = [
        Self::Empty,
        Self::Boolean,
        Self::Signed,
        Self::Unsigned,
        Self::Floating,
        Self::Text,
        Self::Sequence,
        Self::Mapping,
    ];

    /// Check if this kind is numeric (signed, unsigned or floating)
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Signed | Self::Unsigned | Self::Floating)
    }

    /// Check if this kind owns nested variants
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Sequence | Self::Mapping)
    }

    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Boolean => "boolean",
            Self::Signed => "signed",
            Self::Unsigned => "unsigned",
            Self::Floating => "floating",
            Self::Text => "text",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl Display for VariantKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
