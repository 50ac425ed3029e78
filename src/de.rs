//! Serde deserialization out of [`Value`].
//!
//! Both [`Value`] and [`Key`] implement [`serde::Deserializer`], so a loaded
//! document can be fed to any `T: Deserialize`:
//!
//! - `null` deserializes as unit or `None`
//! - big integers are offered as `u64`, `u128` or `i128` when they fit, and
//!   as their decimal string otherwise
//! - tuples and frozen maps used as mapping keys deserialize like sequences
//!   and maps
//! - enums are read from a string (unit variants) or from a single-entry
//!   mapping `{variant: payload}`
//!
//! ```rust
//! use scdil::from_str;
//! use serde::Deserialize;
//! use std::collections::HashMap;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! enum Command {
//!     Stop,
//!     Go { speed: u32 },
//! }
//!
//! let commands: Vec<Command> = from_str("- \"Stop\"\n- Go:\n    speed: 3\n").unwrap();
//! assert_eq!(commands, vec![Command::Stop, Command::Go { speed: 3 }]);
//!
//! let grid: HashMap<(i32, i32), String> = from_str("{[0, 1]: \"a\"}").unwrap();
//! assert_eq!(grid[&(0, 1)], "a");
//! ```

use crate::{Error, Key, Result, Value};
use num_bigint::BigInt;
use serde::de::{self, DeserializeOwned, IntoDeserializer, Unexpected};
use serde::forward_to_deserialize_any;

fn visit_bigint<'de, V>(value: BigInt, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    if let Ok(unsigned) = u64::try_from(&value) {
        visitor.visit_u64(unsigned)
    } else if let Ok(unsigned) = u128::try_from(&value) {
        visitor.visit_u128(unsigned)
    } else if let Ok(signed) = i128::try_from(&value) {
        visitor.visit_i128(signed)
    } else {
        visitor.visit_string(value.to_string())
    }
}

impl Value {
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Value::Null => Unexpected::Unit,
            Value::Bool(b) => Unexpected::Bool(*b),
            Value::Int(i) => Unexpected::Signed(*i),
            Value::BigInt(_) => Unexpected::Other("big integer"),
            Value::Float(f) => Unexpected::Float(*f),
            Value::String(s) => Unexpected::Str(s),
            Value::Sequence(_) => Unexpected::Seq,
            Value::Mapping(_) => Unexpected::Map,
        }
    }
}

impl Key {
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Key::Null => Unexpected::Unit,
            Key::Bool(b) => Unexpected::Bool(*b),
            Key::Int(i) => Unexpected::Signed(*i),
            Key::BigInt(_) => Unexpected::Other("big integer"),
            Key::Float(f) => Unexpected::Float(*f),
            Key::String(s) => Unexpected::Str(s),
            Key::Tuple(_) => Unexpected::Seq,
            Key::Map(_) => Unexpected::Map,
        }
    }
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visitor.visit_i64(i),
            Value::BigInt(i) => visit_bigint(i, visitor),
            Value::Float(f) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Sequence(seq) => visitor.visit_seq(SeqDeserializer::new(seq)),
            Value::Mapping(map) => visitor.visit_map(MapDeserializer::new(map.into_iter())),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::String(variant) => visitor.visit_enum(EnumDeserializer::<Value>::unit(variant)),
            Value::Mapping(map) if map.len() == 1 => {
                let mut entries = map.into_iter();
                match entries.next() {
                    Some((Key::String(variant), payload)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, payload))
                    }
                    Some((key, _)) => Err(de::Error::invalid_type(key.unexpected(), &"variant name")),
                    None => Err(Error::custom("empty enum mapping")),
                }
            }
            other => Err(de::Error::invalid_type(
                other.unexpected(),
                &"string or single-entry mapping",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

impl<'de> de::Deserializer<'de> for Key {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Key::Null => visitor.visit_unit(),
            Key::Bool(b) => visitor.visit_bool(b),
            Key::Int(i) => visitor.visit_i64(i),
            Key::BigInt(i) => visit_bigint(i, visitor),
            Key::Float(f) => visitor.visit_f64(f),
            Key::String(s) => visitor.visit_string(s),
            Key::Tuple(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Key::Map(map) => visitor.visit_map(MapDeserializer::new(map.into_iter())),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Key::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Key::String(variant) => visitor.visit_enum(EnumDeserializer::<Key>::unit(variant)),
            Key::Map(map) if map.len() == 1 => match map.into_iter().next() {
                Some((Key::String(variant), payload)) => {
                    visitor.visit_enum(EnumDeserializer::new(variant, payload))
                }
                Some((key, _)) => Err(de::Error::invalid_type(key.unexpected(), &"variant name")),
                None => Err(Error::custom("empty enum mapping")),
            },
            other => Err(de::Error::invalid_type(
                other.unexpected(),
                &"string or single-entry mapping",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

impl<'de> IntoDeserializer<'de, Error> for Key {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

struct SeqDeserializer<T> {
    iter: std::vec::IntoIter<T>,
}

impl<T> SeqDeserializer<T> {
    fn new(vec: Vec<T>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de, T> de::SeqAccess<'de> for SeqDeserializer<T>
where
    T: IntoDeserializer<'de, Error>,
{
    type Error = Error;

    fn next_element_seed<S>(&mut self, seed: S) -> Result<Option<S::Value>>
    where
        S: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(value.into_deserializer()).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Walks the entries of a [`Mapping`](crate::Mapping) or a
/// [`FrozenMap`](crate::FrozenMap).
struct MapDeserializer<I, T> {
    iter: I,
    value: Option<T>,
}

impl<I, T> MapDeserializer<I, T>
where
    I: Iterator<Item = (Key, T)>,
{
    fn new(iter: I) -> Self {
        MapDeserializer { iter, value: None }
    }
}

impl<'de, I, T> de::MapAccess<'de> for MapDeserializer<I, T>
where
    I: Iterator<Item = (Key, T)>,
    T: IntoDeserializer<'de, Error>,
{
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(value.into_deserializer()),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer<T> {
    variant: String,
    value: Option<T>,
}

impl<T> EnumDeserializer<T> {
    fn new(variant: String, value: T) -> Self {
        EnumDeserializer {
            variant,
            value: Some(value),
        }
    }

    fn unit(variant: String) -> Self {
        EnumDeserializer {
            variant,
            value: None,
        }
    }
}

impl<'de, T> de::EnumAccess<'de> for EnumDeserializer<T>
where
    T: IntoDeserializer<'de, Error>,
{
    type Error = Error;
    type Variant = VariantDeserializer<T>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(Value::String(self.variant))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer<T> {
    value: Option<T>,
}

impl<'de, T> de::VariantAccess<'de> for VariantDeserializer<T>
where
    T: IntoDeserializer<'de, Error>,
{
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(value) => de::Deserialize::deserialize(value.into_deserializer()),
            None => Ok(()),
        }
    }

    fn newtype_variant_seed<S>(self, seed: S) -> Result<S::Value>
    where
        S: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(value.into_deserializer()),
            None => Err(de::Error::invalid_type(Unexpected::UnitVariant, &"newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(value) => de::Deserializer::deserialize_seq(value.into_deserializer(), visitor),
            None => Err(de::Error::invalid_type(Unexpected::UnitVariant, &"tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(value) => de::Deserializer::deserialize_map(value.into_deserializer(), visitor),
            None => Err(de::Error::invalid_type(Unexpected::UnitVariant, &"struct variant")),
        }
    }
}

/// Interprets a [`Value`] as an instance of type `T`.
///
/// # Examples
///
/// ```rust
/// use scdil::{from_value, scdil};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Config {
///     name: String,
///     retries: Option<u8>,
/// }
///
/// let config: Config = from_value(scdil!({"name": "svc", "retries": null})).unwrap();
/// assert_eq!(config, Config { name: "svc".to_string(), retries: None });
/// ```
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(value)
}
