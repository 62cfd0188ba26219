//! `Queue` class (class-id 50) method arguments.
use crate::error::AmqpResult;
use crate::types::{self, FieldTable};

pub const CLASS_ID: u16 = 50;

/// `passive`/`durable`/`exclusive`/`auto_delete`/`no_wait` are not
/// bit-packed on the wire here (every boolean occupies a full octet); a
/// broker expecting AMQP 0-9-1's consecutive-boolean packing for this
/// method will read this payload's tail at the wrong offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Declare {
    pub queue: String,
    pub passive: bool,
    pub durable: bool,
    pub exclusive: bool,
    pub auto_delete: bool,
    pub no_wait: bool,
    pub arguments: FieldTable,
}

impl Declare {
    pub const METHOD_ID: u16 = 10;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(0); // reserved-1
        buf.extend(types::encode_short_string(&self.queue));
        buf.extend(types::encode_octet(u8::from(self.passive)));
        buf.extend(types::encode_octet(u8::from(self.durable)));
        buf.extend(types::encode_octet(u8::from(self.exclusive)));
        buf.extend(types::encode_octet(u8::from(self.auto_delete)));
        buf.extend(types::encode_octet(u8::from(self.no_wait)));
        buf.extend(self.arguments.encode());
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (_reserved_1, rest) = types::decode_short_uint(input)?;
        let (queue, rest) = types::decode_short_string(rest)?;
        let (passive, rest) = types::decode_octet(rest)?;
        let (durable, rest) = types::decode_octet(rest)?;
        let (exclusive, rest) = types::decode_octet(rest)?;
        let (auto_delete, rest) = types::decode_octet(rest)?;
        let (no_wait, rest) = types::decode_octet(rest)?;
        let (arguments, rest) = FieldTable::decode(rest)?;
        Ok((
            Self {
                queue,
                passive: passive != 0,
                durable: durable != 0,
                exclusive: exclusive != 0,
                auto_delete: auto_delete != 0,
                no_wait: no_wait != 0,
                arguments,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclareOk {
    pub queue: String,
    pub message_count: u32,
    pub consumer_count: u32,
}

impl DeclareOk {
    pub const METHOD_ID: u16 = 11;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_string(&self.queue);
        buf.extend(types::encode_long_uint(self.message_count));
        buf.extend(types::encode_long_uint(self.consumer_count));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (queue, rest) = types::decode_short_string(input)?;
        let (message_count, rest) = types::decode_long_uint(rest)?;
        let (consumer_count, rest) = types::decode_long_uint(rest)?;
        Ok((
            Self {
                queue,
                message_count,
                consumer_count,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bind {
    pub queue: String,
    pub exchange: String,
    pub routing_key: String,
    pub no_wait: bool,
    pub arguments: FieldTable,
}

impl Bind {
    pub const METHOD_ID: u16 = 20;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(0); // reserved-1
        buf.extend(types::encode_short_string(&self.queue));
        buf.extend(types::encode_short_string(&self.exchange));
        buf.extend(types::encode_short_string(&self.routing_key));
        buf.extend(types::encode_octet(u8::from(self.no_wait)));
        buf.extend(self.arguments.encode());
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (_reserved_1, rest) = types::decode_short_uint(input)?;
        let (queue, rest) = types::decode_short_string(rest)?;
        let (exchange, rest) = types::decode_short_string(rest)?;
        let (routing_key, rest) = types::decode_short_string(rest)?;
        let (no_wait, rest) = types::decode_octet(rest)?;
        let (arguments, rest) = FieldTable::decode(rest)?;
        Ok((
            Self {
                queue,
                exchange,
                routing_key,
                no_wait: no_wait != 0,
                arguments,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BindOk;

impl BindOk {
    pub const METHOD_ID: u16 = 21;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok((Self, input))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Unbind {
    pub queue: String,
    pub exchange: String,
    pub routing_key: String,
    pub arguments: FieldTable,
}

impl Unbind {
    pub const METHOD_ID: u16 = 50;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(0); // reserved-1
        buf.extend(types::encode_short_string(&self.queue));
        buf.extend(types::encode_short_string(&self.exchange));
        buf.extend(types::encode_short_string(&self.routing_key));
        buf.extend(self.arguments.encode());
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (_reserved_1, rest) = types::decode_short_uint(input)?;
        let (queue, rest) = types::decode_short_string(rest)?;
        let (exchange, rest) = types::decode_short_string(rest)?;
        let (routing_key, rest) = types::decode_short_string(rest)?;
        let (arguments, rest) = FieldTable::decode(rest)?;
        Ok((
            Self {
                queue,
                exchange,
                routing_key,
                arguments,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct UnbindOk;

impl UnbindOk {
    pub const METHOD_ID: u16 = 51;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok((Self, input))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Purge {
    pub queue: String,
    pub no_wait: bool,
}

impl Purge {
    pub const METHOD_ID: u16 = 30;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(0); // reserved-1
        buf.extend(types::encode_short_string(&self.queue));
        buf.extend(types::encode_octet(u8::from(self.no_wait)));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (_reserved_1, rest) = types::decode_short_uint(input)?;
        let (queue, rest) = types::decode_short_string(rest)?;
        let (no_wait, rest) = types::decode_octet(rest)?;
        Ok((
            Self {
                queue,
                no_wait: no_wait != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurgeOk {
    pub message_count: u32,
}

impl PurgeOk {
    pub const METHOD_ID: u16 = 31;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        types::encode_long_uint(self.message_count)
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (message_count, rest) = types::decode_long_uint(input)?;
        Ok((Self { message_count }, rest))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delete {
    pub queue: String,
    pub if_unused: bool,
    pub if_empty: bool,
    pub no_wait: bool,
}

impl Delete {
    pub const METHOD_ID: u16 = 40;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(0); // reserved-1
        buf.extend(types::encode_short_string(&self.queue));
        buf.extend(types::encode_octet(u8::from(self.if_unused)));
        buf.extend(types::encode_octet(u8::from(self.if_empty)));
        buf.extend(types::encode_octet(u8::from(self.no_wait)));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (_reserved_1, rest) = types::decode_short_uint(input)?;
        let (queue, rest) = types::decode_short_string(rest)?;
        let (if_unused, rest) = types::decode_octet(rest)?;
        let (if_empty, rest) = types::decode_octet(rest)?;
        let (no_wait, rest) = types::decode_octet(rest)?;
        Ok((
            Self {
                queue,
                if_unused: if_unused != 0,
                if_empty: if_empty != 0,
                no_wait: no_wait != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeleteOk {
    pub message_count: u32,
}

impl DeleteOk {
    pub const METHOD_ID: u16 = 41;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        types::encode_long_uint(self.message_count)
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (message_count, rest) = types::decode_long_uint(input)?;
        Ok((Self { message_count }, rest))
    }
}
