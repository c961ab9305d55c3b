//! The JSON bridge.
//!
//! Conversion between [`Variant`] and [`serde_json::Value`], the external
//! document tree. Both directions walk the tree with an explicit stack, so
//! nesting depth is limited by memory rather than by the call stack.
//!
//! | JSON                    | Variant    |
//! |-------------------------|------------|
//! | `null`                  | `Empty`    |
//! | `true` / `false`        | `Boolean`  |
//! | number fitting `i64`    | `Signed`   |
//! | number fitting only `u64` | `Unsigned` |
//! | any other number        | `Floating` |
//! | string                  | `Text`     |
//! | array                   | `Sequence` |
//! | object                  | `Mapping`  |
//!
//! JSON has no sign distinction, so a non-negative `Unsigned` value that fits
//! `i64` comes back as `Signed`. Non-finite floats have no JSON form and are
//! written as `null`.
//!
//! serde_json drops, compares and prints its own `Value` recursively. Every
//! document this module consumes or overwrites is released with [`release`],
//! and JSON text is written from a variant walk instead of `Value`'s
//! `Display`.

use std::convert::Infallible;
use std::fmt::Write;
use std::mem;
use std::str::FromStr;

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::limits::{LimitExceeded, VariantLimits, check_tree};
use crate::traverse::{self, Builder, Scalar, Shape, Tree};
use crate::value::{Assemble, Variant, VariantRef};

/// Errors from parsing JSON text into a variant
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// The text is not valid JSON
    #[error("invalid JSON: {message}")]
    Parse { message: String },

    /// The document crossed a configured limit
    #[error(transparent)]
    Limit(#[from] LimitExceeded),
}

impl JsonError {
    /// Get error code for monitoring
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "VARIANT_JSON_PARSE",
            Self::Limit(exceeded) => exceeded.code(),
        }
    }
}

impl From<serde_json::Error> for JsonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

impl Tree for Value {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            Value::Null => Shape::Leaf(Scalar::Empty),
            Value::Bool(b) => Shape::Leaf(Scalar::Boolean(*b)),
            Value::Number(n) => Shape::Leaf(number_scalar(n)),
            Value::String(s) => Shape::Leaf(Scalar::Text(s)),
            Value::Array(items) => Shape::Sequence(items.iter()),
            Value::Object(members) => Shape::Mapping(Box::new(members.iter())),
        }
    }
}

fn number_scalar(n: &Number) -> Scalar<'static> {
    if let Some(i) = n.as_i64() {
        Scalar::Signed(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::Unsigned(u)
    } else {
        n.as_f64().map_or(Scalar::Empty, Scalar::Floating)
    }
}

fn finite_number(f: f64) -> Option<Number> {
    let number = Number::from_f64(f);
    if number.is_none() {
        tracing::debug!(value = %f, "non-finite float written as JSON null");
    }
    number
}

/// Drop a JSON document without recursing into it
///
/// Children are moved onto a heap worklist before each node is dropped, so
/// arbitrarily deep documents are released in constant stack space.
pub fn release(doc: Value) {
    let mut pending = vec![doc];
    while let Some(node) = pending.pop() {
        match node {
            Value::Array(items) => pending.extend(items),
            Value::Object(members) => pending.extend(members.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}

/// Builds a JSON document from a variant tree.
#[derive(Default)]
struct ToJson {
    nodes: usize,
}

impl Builder for ToJson {
    type Output = Value;
    type Error = Infallible;

    fn leaf(&mut self, scalar: Scalar<'_>) -> Result<Value, Infallible> {
        self.nodes += 1;
        Ok(match scalar {
            Scalar::Empty => Value::Null,
            Scalar::Boolean(b) => Value::Bool(b),
            Scalar::Signed(i) => Value::from(i),
            Scalar::Unsigned(u) => Value::from(u),
            Scalar::Floating(f) => finite_number(f).map_or(Value::Null, Value::Number),
            Scalar::Text(t) => Value::String(t.to_owned()),
        })
    }

    fn sequence(&mut self, items: Vec<Value>) -> Value {
        self.nodes += 1;
        Value::Array(items)
    }

    fn mapping(&mut self, entries: Vec<(String, Value)>) -> Value {
        self.nodes += 1;
        let mut members = Map::with_capacity(entries.len());
        members.extend(entries);
        Value::Object(members)
    }
}

impl Variant {
    /// Convert a JSON document into a variant
    ///
    /// Total: every JSON document has a variant form.
    pub fn from_json(doc: &Value) -> Self {
        match traverse::rebuild(doc, &mut Assemble) {
            Ok(variant) => variant,
            Err(never) => match never {},
        }
    }

    /// Convert a JSON document, rejecting it if it crosses `limits`
    ///
    /// ```
    /// use rvariant::{Variant, VariantLimits, json};
    ///
    /// let doc = json!({"tags": ["a", "b", "c"]});
    /// let limits = VariantLimits { max_sequence_length: 2, ..VariantLimits::default() };
    /// let err = Variant::from_json_with_limits(&doc, &limits).unwrap_err();
    /// assert_eq!(err.limit, "max_sequence_length");
    /// ```
    pub fn from_json_with_limits(doc: &Value, limits: &VariantLimits) -> Result<Self, LimitExceeded> {
        check_tree(doc, limits)?;
        Ok(Self::from_json(doc))
    }

    /// Convert into a JSON document
    pub fn to_json(&self) -> Value {
        let mut builder = ToJson::default();
        let doc = match traverse::rebuild(self, &mut builder) {
            Ok(doc) => doc,
            Err(never) => match never {},
        };
        tracing::trace!(nodes = builder.nodes, "variant converted to JSON");
        doc
    }

    /// Overwrite `target` with this variant's JSON form
    pub fn write_json(&self, target: &mut Value) {
        let previous = mem::replace(target, self.to_json());
        release(previous);
    }

    /// Parse JSON text, rejecting documents that cross `limits`
    pub fn parse_json_with_limits(text: &str, limits: &VariantLimits) -> Result<Self, JsonError> {
        let doc: Value = serde_json::from_str(text)?;
        Ok(Self::from_json_with_limits(&doc, limits)?)
    }

    /// Serialize to compact JSON text, mapping keys sorted
    pub fn to_json_string(&self) -> String {
        write_text(self, false)
    }

    /// Serialize to JSON text indented by two spaces, mapping keys sorted
    pub fn to_json_string_pretty(&self) -> String {
        write_text(self, true)
    }
}

enum TextStep<'a> {
    Node(&'a Variant, usize),
    Key(&'a str),
    Punct(&'static str),
    Indent(usize),
}

/// Write JSON text from an explicit stack of pending steps.
///
/// The output matches serde_json's compact and pretty formatters.
fn write_text(root: &Variant, pretty: bool) -> String {
    let mut out = String::new();
    let mut steps = vec![TextStep::Node(root, 0)];

    while let Some(step) = steps.pop() {
        let (value, depth) = match step {
            TextStep::Punct(text) => {
                out.push_str(text);
                continue;
            }
            TextStep::Indent(level) => {
                out.push('\n');
                for _ in 0..level {
                    out.push_str("  ");
                }
                continue;
            }
            TextStep::Key(key) => {
                push_string(&mut out, key);
                out.push_str(if pretty { ": " } else { ":" });
                continue;
            }
            TextStep::Node(value, depth) => (value, depth),
        };

        match value.view() {
            VariantRef::Sequence(items) if !items.is_empty() => {
                out.push('[');
                steps.push(TextStep::Punct("]"));
                if pretty {
                    steps.push(TextStep::Indent(depth));
                }
                for (index, item) in items.iter().enumerate().rev() {
                    steps.push(TextStep::Node(item, depth + 1));
                    if pretty {
                        steps.push(TextStep::Indent(depth + 1));
                    }
                    if index > 0 {
                        steps.push(TextStep::Punct(","));
                    }
                }
            }
            VariantRef::Mapping(entries) if !entries.is_empty() => {
                let mut sorted: Vec<_> = entries.iter().collect();
                sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));

                out.push('{');
                steps.push(TextStep::Punct("}"));
                if pretty {
                    steps.push(TextStep::Indent(depth));
                }
                for (index, (key, item)) in sorted.into_iter().enumerate().rev() {
                    steps.push(TextStep::Node(item, depth + 1));
                    steps.push(TextStep::Key(key));
                    if pretty {
                        steps.push(TextStep::Indent(depth + 1));
                    }
                    if index > 0 {
                        steps.push(TextStep::Punct(","));
                    }
                }
            }
            VariantRef::Sequence(_) => out.push_str("[]"),
            VariantRef::Mapping(_) => out.push_str("{}"),
            VariantRef::Empty => out.push_str("null"),
            VariantRef::Boolean(b) => out.push_str(if b { "true" } else { "false" }),
            // Writing into a String cannot fail.
            VariantRef::Signed(i) => {
                let _ = write!(out, "{i}");
            }
            VariantRef::Unsigned(u) => {
                let _ = write!(out, "{u}");
            }
            VariantRef::Floating(f) => match finite_number(f) {
                Some(n) => {
                    let _ = write!(out, "{n}");
                }
                None => out.push_str("null"),
            },
            VariantRef::Text(t) => push_string(&mut out, t),
        }
    }
    out
}

/// Append `text` as a quoted, escaped JSON string
fn push_string(out: &mut String, text: &str) {
    let _ = write!(out, "{}", Value::String(text.to_owned()));
}

impl From<Value> for Variant {
    fn from(doc: Value) -> Self {
        let variant = Self::from_json(&doc);
        release(doc);
        variant
    }
}

impl From<&Value> for Variant {
    fn from(doc: &Value) -> Self {
        Self::from_json(doc)
    }
}

impl From<&Variant> for Value {
    fn from(variant: &Variant) -> Self {
        variant.to_json()
    }
}

impl From<Variant> for Value {
    fn from(variant: Variant) -> Self {
        variant.to_json()
    }
}

/// Parse JSON text with the default limits
impl FromStr for Variant {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_json_with_limits(s, &VariantLimits::default())
    }
}
