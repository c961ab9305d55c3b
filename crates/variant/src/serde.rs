//! Serde serialization and deserialization for Variant
//!
//! The mapping is the same as the JSON bridge: unsigned values that fit
//! `i64` deserialize as `Signed`, unit and none as `Empty`. Non-finite floats
//! serialize as none.
//!
//! Serde drives nested values through the call stack, so these impls recurse
//! once per nesting level. The bridge in [`crate::json`] does not.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::{Mapping, Sequence, Variant, VariantRef};

impl Serialize for Variant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.view() {
            VariantRef::Empty => serializer.serialize_none(),
            VariantRef::Boolean(b) => serializer.serialize_bool(b),
            VariantRef::Signed(i) => serializer.serialize_i64(i),
            VariantRef::Unsigned(u) => serializer.serialize_u64(u),
            VariantRef::Floating(f) if f.is_finite() => serializer.serialize_f64(f),
            VariantRef::Floating(_) => serializer.serialize_none(),
            VariantRef::Text(t) => serializer.serialize_str(t),
            VariantRef::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            VariantRef::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(VariantVisitor)
    }
}

struct VariantVisitor;

impl<'de> Visitor<'de> for VariantVisitor {
    type Value = Variant;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any valid JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Variant, E> {
        Ok(Variant::boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Variant, E> {
        Ok(Variant::signed(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Variant, E> {
        Ok(i64::try_from(v).map_or(Variant::unsigned(v), Variant::signed))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Variant, E> {
        Ok(Variant::floating(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Variant, E> {
        Ok(Variant::text(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Variant, E> {
        Ok(Variant::text(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Variant, E> {
        Ok(Variant::empty())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Variant, E> {
        Ok(Variant::empty())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Variant, D::Error>
    where
        D: Deserializer<'de>,
    {
        Variant::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Variant, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Sequence::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element::<Variant>()? {
            items.push(item);
        }
        Ok(Variant::sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Variant, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Mapping::with_capacity(map.size_hint().unwrap_or(0).min(4096));
        while let Some((key, value)) = map.next_entry::<String, Variant>()? {
            entries.insert(key, value);
        }
        Ok(Variant::mapping(entries))
    }
}
