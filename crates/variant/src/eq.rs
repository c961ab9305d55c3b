//! Structural equality.
//!
//! Sequences compare element-wise in order, mappings as key sets with equal
//! values per key. Nested pairs are compared from a heap worklist, so deep
//! trees do not grow the call stack.

use std::ptr;

use crate::value::{Variant, VariantRef};

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        let mut pending: Vec<(&Variant, &Variant)> = vec![(self, other)];

        while let Some((left, right)) = pending.pop() {
            if ptr::eq(left, right) {
                continue;
            }
            match (left.view(), right.view()) {
                (VariantRef::Empty, VariantRef::Empty) => {}
                (VariantRef::Boolean(a), VariantRef::Boolean(b)) if a == b => {}
                (VariantRef::Signed(a), VariantRef::Signed(b)) if a == b => {}
                (VariantRef::Unsigned(a), VariantRef::Unsigned(b)) if a == b => {}
                (VariantRef::Floating(a), VariantRef::Floating(b)) if floats_equal(a, b) => {}
                (VariantRef::Text(a), VariantRef::Text(b)) if a == b => {}
                (VariantRef::Sequence(a), VariantRef::Sequence(b)) if a.len() == b.len() => {
                    pending.extend(a.iter().zip(b.iter()));
                }
                (VariantRef::Mapping(a), VariantRef::Mapping(b)) if a.len() == b.len() => {
                    for (key, value) in a {
                        let Some(counterpart) = b.get(key) else {
                            return false;
                        };
                        pending.push((value, counterpart));
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

// NaN equals itself, so the relation stays reflexive.
impl Eq for Variant {}

fn floats_equal(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}
