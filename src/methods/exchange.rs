//! `Exchange` class (class-id 40) method arguments.
use crate::error::AmqpResult;
use crate::types::{self, FieldTable};

pub const CLASS_ID: u16 = 40;

/// `passive`/`durable` and the trailing `no_wait` are not bit-packed on the
/// wire here (every boolean occupies a full octet); brokers that expect
/// AMQP 0-9-1's consecutive-boolean packing for this method will
/// misinterpret the reserved octets that follow `durable`.
#[derive(Clone, Debug, PartialEq)]
pub struct Declare {
    pub exchange: String,
    pub exchange_type: String,
    pub passive: bool,
    pub durable: bool,
    pub no_wait: bool,
    pub arguments: FieldTable,
}

impl Declare {
    pub const METHOD_ID: u16 = 10;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(0); // reserved-1
        buf.extend(types::encode_short_string(&self.exchange));
        buf.extend(types::encode_short_string(&self.exchange_type));
        buf.extend(types::encode_octet(u8::from(self.passive)));
        buf.extend(types::encode_octet(u8::from(self.durable)));
        buf.extend(types::encode_octet(0)); // reserved-2
        buf.extend(types::encode_octet(0)); // reserved-3
        buf.extend(types::encode_octet(u8::from(self.no_wait)));
        buf.extend(self.arguments.encode());
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (_reserved_1, rest) = types::decode_short_uint(input)?;
        let (exchange, rest) = types::decode_short_string(rest)?;
        let (exchange_type, rest) = types::decode_short_string(rest)?;
        let (passive, rest) = types::decode_octet(rest)?;
        let (durable, rest) = types::decode_octet(rest)?;
        let (_reserved_2, rest) = types::decode_octet(rest)?;
        let (_reserved_3, rest) = types::decode_octet(rest)?;
        let (no_wait, rest) = types::decode_octet(rest)?;
        let (arguments, rest) = FieldTable::decode(rest)?;
        Ok((
            Self {
                exchange,
                exchange_type,
                passive: passive != 0,
                durable: durable != 0,
                no_wait: no_wait != 0,
                arguments,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DeclareOk;

impl DeclareOk {
    pub const METHOD_ID: u16 = 11;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok((Self, input))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delete {
    pub exchange: String,
    pub if_unused: bool,
    pub no_wait: bool,
}

impl Delete {
    pub const METHOD_ID: u16 = 20;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(0); // reserved-1
        buf.extend(types::encode_short_string(&self.exchange));
        buf.extend(types::encode_octet(u8::from(self.if_unused)));
        buf.extend(types::encode_octet(u8::from(self.no_wait)));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (_reserved_1, rest) = types::decode_short_uint(input)?;
        let (exchange, rest) = types::decode_short_string(rest)?;
        let (if_unused, rest) = types::decode_octet(rest)?;
        let (no_wait, rest) = types::decode_octet(rest)?;
        Ok((
            Self {
                exchange,
                if_unused: if_unused != 0,
                no_wait: no_wait != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DeleteOk;

impl DeleteOk {
    pub const METHOD_ID: u16 = 21;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok((Self, input))
    }
}
