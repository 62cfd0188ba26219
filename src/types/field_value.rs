use crate::error::{AmqpResult, ProtocolError};
use crate::types::require;
use crate::types::scalar::{self, Decimal};
use std::fmt;

/// A value carried inside a [`FieldTable`] or [`FieldArray`].
///
/// `ShortString` is deliberately absent: per the wire format, a short string
/// handed to a field table is promoted to a `LongString` before it is ever
/// tagged, so the promotion happens once, in [`FieldValue::from_short_string`],
/// rather than at every call site that builds one.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Boolean(bool),
    ShortShortInt(i8),
    ShortShortUint(u8),
    ShortInt(i16),
    ShortUint(u16),
    LongInt(i32),
    LongUint(u32),
    LongLongInt(i64),
    LongLongUint(u64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    LongString(String),
    FieldArray(FieldArray),
    FieldTable(FieldTable),
    Timestamp(u64),
    NoField,
}

impl FieldValue {
    /// Builds the `LongString` variant from a short string, mirroring the
    /// promotion the wire format performs whenever a `ShortString` is put
    /// into a field table or array.
    #[must_use]
    pub fn from_short_string(value: impl Into<String>) -> Self {
        Self::LongString(value.into())
    }

    /// The one-byte tag this value is written under.
    #[must_use]
    pub fn tag(&self) -> u8 {
        match self {
            Self::Boolean(_) => b't',
            Self::ShortShortInt(_) => b'b',
            Self::ShortShortUint(_) => b'B',
            Self::ShortInt(_) => b'U',
            Self::ShortUint(_) => b'u',
            Self::LongInt(_) => b'I',
            Self::LongUint(_) => b'i',
            Self::LongLongInt(_) => b'L',
            Self::LongLongUint(_) => b'l',
            Self::Float(_) => b'f',
            Self::Double(_) => b'd',
            Self::Decimal(_) => b'D',
            Self::LongString(_) => b'S',
            Self::FieldArray(_) => b'A',
            Self::FieldTable(_) => b'F',
            Self::Timestamp(_) => b'T',
            Self::NoField => b'V',
        }
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![self.tag()];
        match self {
            Self::Boolean(v) => buf.push(u8::from(*v)),
            Self::ShortShortInt(v) => buf.extend(scalar::encode_short_short_int(*v)),
            Self::ShortShortUint(v) => buf.extend(scalar::encode_short_short_uint(*v)),
            Self::ShortInt(v) => buf.extend(scalar::encode_short_int(*v)),
            Self::ShortUint(v) => buf.extend(scalar::encode_short_uint(*v)),
            Self::LongInt(v) => buf.extend(scalar::encode_long_int(*v)),
            Self::LongUint(v) => buf.extend(scalar::encode_long_uint(*v)),
            Self::LongLongInt(v) => buf.extend(scalar::encode_long_long_int(*v)),
            Self::LongLongUint(v) => buf.extend(scalar::encode_long_long_uint(*v)),
            Self::Float(v) => buf.extend(scalar::encode_float(*v)),
            Self::Double(v) => buf.extend(scalar::encode_double(*v)),
            Self::Decimal(v) => buf.extend(scalar::encode_decimal(*v)),
            Self::LongString(v) => buf.extend(scalar::encode_long_string(v)),
            Self::FieldArray(v) => buf.extend(v.encode()),
            Self::FieldTable(v) => buf.extend(v.encode()),
            Self::Timestamp(v) => buf.extend(scalar::encode_timestamp(*v)),
            Self::NoField => {}
        }
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        require(input, 1)?;
        let tag = input[0];
        let rest = &input[1..];
        Ok(match tag {
            b't' => {
                let (v, rest) = scalar::decode_octet(rest)?;
                (Self::Boolean(v != 0), rest)
            }
            b'b' => {
                let (v, rest) = scalar::decode_short_short_int(rest)?;
                (Self::ShortShortInt(v), rest)
            }
            b'B' => {
                let (v, rest) = scalar::decode_short_short_uint(rest)?;
                (Self::ShortShortUint(v), rest)
            }
            // 's' is the erratum alias for the short signed integer; it
            // shares `U`'s wire layout and decodes to the same variant.
            b'U' | b's' => {
                let (v, rest) = scalar::decode_short_int(rest)?;
                (Self::ShortInt(v), rest)
            }
            b'u' => {
                let (v, rest) = scalar::decode_short_uint(rest)?;
                (Self::ShortUint(v), rest)
            }
            b'I' => {
                let (v, rest) = scalar::decode_long_int(rest)?;
                (Self::LongInt(v), rest)
            }
            b'i' => {
                let (v, rest) = scalar::decode_long_uint(rest)?;
                (Self::LongUint(v), rest)
            }
            b'L' => {
                let (v, rest) = scalar::decode_long_long_int(rest)?;
                (Self::LongLongInt(v), rest)
            }
            b'l' => {
                let (v, rest) = scalar::decode_long_long_uint(rest)?;
                (Self::LongLongUint(v), rest)
            }
            b'f' => {
                let (v, rest) = scalar::decode_float(rest)?;
                (Self::Float(v), rest)
            }
            b'd' => {
                let (v, rest) = scalar::decode_double(rest)?;
                (Self::Double(v), rest)
            }
            b'D' => {
                let (v, rest) = scalar::decode_decimal(rest)?;
                (Self::Decimal(v), rest)
            }
            b'S' => {
                let (v, rest) = scalar::decode_long_string(rest)?;
                (Self::LongString(v), rest)
            }
            b'A' => {
                let (v, rest) = FieldArray::decode(rest)?;
                (Self::FieldArray(v), rest)
            }
            b'F' => {
                let (v, rest) = FieldTable::decode(rest)?;
                (Self::FieldTable(v), rest)
            }
            b'T' => {
                let (v, rest) = scalar::decode_timestamp(rest)?;
                (Self::Timestamp(v), rest)
            }
            b'V' => (Self::NoField, rest),
            other => return Err(ProtocolError::UnknownTag(other).into()),
        })
    }
}

/// An ordered `name -> value` collection with last-write-wins duplicate
/// handling, matching the source's dict-based field table (later entries
/// during decode overwrite earlier ones under the same name).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldTable {
    entries: Vec<(String, FieldValue)>,
}

impl FieldTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `name`, overwriting any existing entry in
    /// place so iteration order reflects first-seen position.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, FieldValue)> {
        self.entries.iter()
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for (name, value) in &self.entries {
            buf.extend(scalar::encode_short_string(name));
            buf.extend(value.encode());
        }
        buf
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let payload = self.encode_payload();
        let mut buf = scalar::encode_long_uint(payload.len() as u32);
        buf.extend(payload);
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (len, rest) = scalar::decode_long_uint(input)?;
        let len = len as usize;
        require(rest, len)?;
        let (mut body, tail) = (&rest[..len], &rest[len..]);
        let mut table = Self::new();
        while !body.is_empty() {
            let (name, after_name) = scalar::decode_short_string(body)?;
            let (value, after_value) = FieldValue::decode(after_name)?;
            table.insert(name, value);
            body = after_value;
        }
        Ok((table, tail))
    }
}

impl FromIterator<(String, FieldValue)> for FieldTable {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}

/// A sequence of [`FieldValue`]s, length-prefixed with a **signed** 32-bit
/// big-endian byte count on both encode and decode (see the Open Questions
/// decision on the source's signed/unsigned inconsistency).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldArray {
    values: Vec<FieldValue>,
}

impl FieldArray {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: FieldValue) {
        self.values.push(value);
    }

    #[must_use]
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for value in &self.values {
            buf.extend(value.encode());
        }
        buf
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let payload = self.encode_payload();
        let mut buf = scalar::encode_long_int(payload.len() as i32);
        buf.extend(payload);
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (len, rest) = scalar::decode_long_int(input)?;
        let len = len as usize;
        require(rest, len)?;
        let (mut body, tail) = (&rest[..len], &rest[len..]);
        let mut array = Self::new();
        while !body.is_empty() {
            let (value, after_value) = FieldValue::decode(body)?;
            array.push(value);
            body = after_value;
        }
        Ok((array, tail))
    }
}

impl FromIterator<FieldValue> for FieldArray {
    fn from_iter<I: IntoIterator<Item = FieldValue>>(iter: I) -> Self {
        let mut array = Self::new();
        for value in iter {
            array.push(value);
        }
        array
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::ShortShortInt(v) => write!(f, "{v}"),
            Self::ShortShortUint(v) => write!(f, "{v}"),
            Self::ShortInt(v) => write!(f, "{v}"),
            Self::ShortUint(v) => write!(f, "{v}"),
            Self::LongInt(v) => write!(f, "{v}"),
            Self::LongUint(v) => write!(f, "{v}"),
            Self::LongLongInt(v) => write!(f, "{v}"),
            Self::LongLongUint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{}e-{}", v.unscaled, v.scale),
            Self::LongString(v) => write!(f, "{v}"),
            Self::FieldArray(v) => write!(f, "<array of {} values>", v.len()),
            Self::FieldTable(v) => write!(f, "<table of {} entries>", v.len()),
            Self::Timestamp(v) => write!(f, "{v}"),
            Self::NoField => write!(f, "<none>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_field_round_trips() {
        let v = FieldValue::NoField;
        let bytes = v.encode();
        assert_eq!(bytes, b"V");
        let (decoded, rest) = FieldValue::decode(&bytes).unwrap();
        assert_eq!(decoded, v);
        assert!(rest.is_empty());
    }

    #[test]
    fn field_table_last_entry_wins_on_duplicate_name() {
        let mut table = FieldTable::new();
        table.insert("k", FieldValue::LongInt(1));
        table.insert("k", FieldValue::LongInt(2));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("k"), Some(&FieldValue::LongInt(2)));
    }

    #[test]
    fn field_table_round_trips() {
        let mut table = FieldTable::new();
        table.insert("a", FieldValue::Boolean(true));
        table.insert("b", FieldValue::from_short_string("hi"));
        let bytes = table.encode();
        let (decoded, rest) = FieldTable::decode(&bytes).unwrap();
        assert_eq!(decoded, table);
        assert!(rest.is_empty());
    }

    #[test]
    fn field_array_round_trips() {
        let mut arr = FieldArray::new();
        arr.push(FieldValue::LongInt(-7));
        arr.push(FieldValue::Boolean(false));
        let bytes = arr.encode();
        let (decoded, rest) = FieldArray::decode(&bytes).unwrap();
        assert_eq!(decoded, arr);
        assert!(rest.is_empty());
    }

    #[test]
    fn unknown_tag_is_an_error() {
        assert!(FieldValue::decode(b"?").is_err());
    }

    #[test]
    fn short_int_erratum_alias_decodes_same_as_canonical_tag() {
        let canonical = scalar::encode_short_int(42);
        let mut erratum = vec![b's'];
        erratum.extend(&canonical);
        let mut regular = vec![b'U'];
        regular.extend(&canonical);
        assert_eq!(
            FieldValue::decode(&erratum).unwrap().0,
            FieldValue::decode(&regular).unwrap().0
        );
    }
}
