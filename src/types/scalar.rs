use crate::error::{AmqpResult, ProtocolError};
use crate::types::require;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

/// An AMQP `DecimalValue`: `value = unscaled * 10^-scale`.
///
/// Kept as the raw `(scale, unscaled)` pair rather than converted to a
/// floating type, so that round-tripping through the wire never loses
/// precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decimal {
    pub scale: u8,
    pub unscaled: i32,
}

impl Decimal {
    #[must_use]
    pub fn new(scale: u8, unscaled: i32) -> Self {
        Self { scale, unscaled }
    }
}

macro_rules! scalar_codec {
    ($encode:ident, $decode:ident, $ty:ty, $write:ident, $read:ident, $size:expr) => {
        #[must_use]
        pub fn $encode(value: $ty) -> Vec<u8> {
            let mut buf = Vec::with_capacity($size);
            buf.$write::<BigEndian>(value).expect("Vec<u8> write is infallible");
            buf
        }

        pub fn $decode(input: &[u8]) -> AmqpResult<($ty, &[u8])> {
            require(input, $size)?;
            let mut cursor = &input[..$size];
            let value = cursor.$read::<BigEndian>()?;
            Ok((value, &input[$size..]))
        }
    };
}

#[must_use]
pub fn encode_octet(value: u8) -> Vec<u8> {
    vec![value]
}

pub fn decode_octet(input: &[u8]) -> AmqpResult<(u8, &[u8])> {
    require(input, 1)?;
    Ok((input[0], &input[1..]))
}

scalar_codec!(encode_short_int, decode_short_int, i16, write_i16, read_i16, 2);
scalar_codec!(encode_short_uint, decode_short_uint, u16, write_u16, read_u16, 2);
scalar_codec!(encode_long_int, decode_long_int, i32, write_i32, read_i32, 4);
scalar_codec!(encode_long_uint, decode_long_uint, u32, write_u32, read_u32, 4);
scalar_codec!(
    encode_long_long_int,
    decode_long_long_int,
    i64,
    write_i64,
    read_i64,
    8
);
scalar_codec!(
    encode_long_long_uint,
    decode_long_long_uint,
    u64,
    write_u64,
    read_u64,
    8
);
scalar_codec!(encode_float, decode_float, f32, write_f32, read_f32, 4);
scalar_codec!(encode_double, decode_double, f64, write_f64, read_f64, 8);

#[must_use]
pub fn encode_short_short_int(value: i8) -> Vec<u8> {
    vec![value as u8]
}

pub fn decode_short_short_int(input: &[u8]) -> AmqpResult<(i8, &[u8])> {
    require(input, 1)?;
    Ok((input[0] as i8, &input[1..]))
}

#[must_use]
pub fn encode_short_short_uint(value: u8) -> Vec<u8> {
    vec![value]
}

pub fn decode_short_short_uint(input: &[u8]) -> AmqpResult<(u8, &[u8])> {
    require(input, 1)?;
    Ok((input[0], &input[1..]))
}

/// A `Timestamp` is a bare POSIX-seconds `u64`; this codec never consults
/// the system clock, unlike the source's implicit `datetime.now` default
/// (see the Open Questions decision recorded in `SPEC_FULL.md`).
#[must_use]
pub fn encode_timestamp(posix_seconds: u64) -> Vec<u8> {
    encode_long_long_uint(posix_seconds)
}

pub fn decode_timestamp(input: &[u8]) -> AmqpResult<(u64, &[u8])> {
    decode_long_long_uint(input)
}

/// `DecimalValue`: one scale octet, then a signed 32-bit big-endian unscaled value.
#[must_use]
pub fn encode_decimal(value: Decimal) -> Vec<u8> {
    let mut buf = encode_octet(value.scale);
    buf.extend(encode_long_int(value.unscaled));
    buf
}

pub fn decode_decimal(input: &[u8]) -> AmqpResult<(Decimal, &[u8])> {
    let (scale, rest) = decode_octet(input)?;
    let (unscaled, rest) = decode_long_int(rest)?;
    Ok((Decimal::new(scale, unscaled), rest))
}

/// `ShortString`: one length octet (`n <= 255`) followed by UTF-8 bytes.
#[must_use]
pub fn encode_short_string(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    debug_assert!(bytes.len() <= u8::MAX as usize, "ShortString longer than 255 bytes");
    let mut buf = Vec::with_capacity(1 + bytes.len());
    buf.push(bytes.len() as u8);
    buf.extend_from_slice(bytes);
    buf
}

pub fn decode_short_string(input: &[u8]) -> AmqpResult<(String, &[u8])> {
    let (len, rest) = decode_octet(input)?;
    let len = len as usize;
    require(rest, len)?;
    let s = std::str::from_utf8(&rest[..len]).map_err(ProtocolError::InvalidString)?;
    Ok((s.to_string(), &rest[len..]))
}

/// `LongString`: a 32-bit big-endian length followed by UTF-8 bytes.
#[must_use]
pub fn encode_long_string(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut buf = Vec::with_capacity(4 + bytes.len());
    buf.extend(encode_long_uint(bytes.len() as u32));
    buf.extend_from_slice(bytes);
    buf
}

pub fn decode_long_string(input: &[u8]) -> AmqpResult<(String, &[u8])> {
    let (len, rest) = decode_long_uint(input)?;
    let len = len as usize;
    require(rest, len)?;
    let s = std::str::from_utf8(&rest[..len]).map_err(ProtocolError::InvalidString)?;
    Ok((s.to_string(), &rest[len..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octet_round_trips() {
        let bytes = encode_octet(5);
        assert_eq!(bytes, vec![5]);
        let (v, rest) = decode_octet(&bytes).unwrap();
        assert_eq!(v, 5);
        assert!(rest.is_empty());
    }

    #[test]
    fn octet_decode_literal_vector() {
        let (v, rest) = decode_octet(b"\x05\x09\xdc").unwrap();
        assert_eq!(v, 5);
        assert_eq!(rest, b"\x09\xdc");
    }

    #[test]
    fn short_string_round_trips() {
        let bytes = encode_short_string("hi");
        assert_eq!(bytes, b"\x02hi");
        let (v, rest) = decode_short_string(&bytes).unwrap();
        assert_eq!(v, "hi");
        assert!(rest.is_empty());
    }

    #[test]
    fn long_string_round_trips() {
        let bytes = encode_long_string("hello");
        let (v, rest) = decode_long_string(&bytes).unwrap();
        assert_eq!(v, "hello");
        assert!(rest.is_empty());
    }

    #[test]
    fn decimal_round_trips() {
        let d = Decimal::new(2, -1234);
        let bytes = encode_decimal(d);
        let (decoded, rest) = decode_decimal(&bytes).unwrap();
        assert_eq!(decoded, d);
        assert!(rest.is_empty());
    }

    #[test]
    fn truncated_input_is_an_error() {
        assert!(decode_long_uint(&[0, 0]).is_err());
    }
}
