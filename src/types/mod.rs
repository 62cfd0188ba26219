//! The AMQP 0-9-1 typed-value codec.
//!
//! Every wire type here is a pair of free functions, `encode_*`/`decode_*`,
//! rather than a type implementing a shared trait: the set is closed and the
//! wire formats are unrelated enough (fixed-size scalars, length-prefixed
//! strings, a decimal with its own layout) that a single `Codec` trait would
//! buy us nothing over naming the functions directly.

mod field_value;
mod scalar;

pub use field_value::{FieldArray, FieldTable, FieldValue};
pub use scalar::{
    decode_double, decode_float, decode_long_int, decode_long_long_int, decode_long_long_uint,
    decode_long_string, decode_long_uint, decode_octet, decode_short_int,
    decode_short_short_int, decode_short_short_uint, decode_short_string, decode_short_uint,
    decode_timestamp, encode_double, encode_float, encode_long_int, encode_long_long_int,
    encode_long_long_uint, encode_long_string, encode_long_uint, encode_octet, encode_short_int,
    encode_short_short_int, encode_short_short_uint, encode_short_string, encode_short_uint,
    encode_timestamp, Decimal,
};

/// Marker byte AMQP sends after every frame body.
pub const FRAME_END: u8 = 0xCE;

pub(crate) fn require(input: &[u8], needed: usize) -> crate::error::AmqpResult<()> {
    if input.len() < needed {
        Err(crate::error::ProtocolError::TruncatedInput {
            needed,
            available: input.len(),
        }
        .into())
    } else {
        Ok(())
    }
}
