//! `Basic` class (class-id 60) method arguments.
//!
//! These schemas are declared for completeness but, matching the reference
//! implementation this core is grounded on, are not wired into
//! [`crate::methods::MethodArguments`] or the frame router: nothing in this
//! crate's connection handshake or channel lifecycle ever sends or expects
//! a `Basic` method, so there is no selector arm for class 60.
use crate::error::AmqpResult;
use crate::types::{self, FieldTable};

pub const CLASS_ID: u16 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Qos {
    pub prefetch_size: u32,
    pub prefetch_count: u16,
    pub is_global: bool,
}

impl Qos {
    pub const METHOD_ID: u16 = 10;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_long_uint(self.prefetch_size);
        buf.extend(types::encode_short_uint(self.prefetch_count));
        buf.extend(types::encode_octet(u8::from(self.is_global)));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (prefetch_size, rest) = types::decode_long_uint(input)?;
        let (prefetch_count, rest) = types::decode_short_uint(rest)?;
        let (is_global, rest) = types::decode_octet(rest)?;
        Ok((
            Self {
                prefetch_size,
                prefetch_count,
                is_global: is_global != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct QosOk;

impl QosOk {
    pub const METHOD_ID: u16 = 11;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok((Self, input))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Consume {
    pub queue: String,
    pub consumer_tag: String,
    pub no_local: bool,
    pub no_ack: bool,
    pub exclusive: bool,
    pub no_wait: bool,
    pub arguments: FieldTable,
}

impl Consume {
    pub const METHOD_ID: u16 = 20;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(0); // reserved-1
        buf.extend(types::encode_short_string(&self.queue));
        buf.extend(types::encode_short_string(&self.consumer_tag));
        buf.extend(types::encode_octet(u8::from(self.no_local)));
        buf.extend(types::encode_octet(u8::from(self.no_ack)));
        buf.extend(types::encode_octet(u8::from(self.exclusive)));
        buf.extend(types::encode_octet(u8::from(self.no_wait)));
        buf.extend(self.arguments.encode());
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (_reserved_1, rest) = types::decode_short_uint(input)?;
        let (queue, rest) = types::decode_short_string(rest)?;
        let (consumer_tag, rest) = types::decode_short_string(rest)?;
        let (no_local, rest) = types::decode_octet(rest)?;
        let (no_ack, rest) = types::decode_octet(rest)?;
        let (exclusive, rest) = types::decode_octet(rest)?;
        let (no_wait, rest) = types::decode_octet(rest)?;
        let (arguments, rest) = FieldTable::decode(rest)?;
        Ok((
            Self {
                queue,
                consumer_tag,
                no_local: no_local != 0,
                no_ack: no_ack != 0,
                exclusive: exclusive != 0,
                no_wait: no_wait != 0,
                arguments,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumeOk {
    pub consumer_tag: String,
}

impl ConsumeOk {
    pub const METHOD_ID: u16 = 21;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        types::encode_short_string(&self.consumer_tag)
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (consumer_tag, rest) = types::decode_short_string(input)?;
        Ok((Self { consumer_tag }, rest))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cancel {
    pub consumer_tag: String,
    pub no_wait: bool,
}

impl Cancel {
    pub const METHOD_ID: u16 = 30;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_string(&self.consumer_tag);
        buf.extend(types::encode_octet(u8::from(self.no_wait)));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (consumer_tag, rest) = types::decode_short_string(input)?;
        let (no_wait, rest) = types::decode_octet(rest)?;
        Ok((
            Self {
                consumer_tag,
                no_wait: no_wait != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelOk {
    pub consumer_tag: String,
}

impl CancelOk {
    pub const METHOD_ID: u16 = 31;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        types::encode_short_string(&self.consumer_tag)
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (consumer_tag, rest) = types::decode_short_string(input)?;
        Ok((Self { consumer_tag }, rest))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Publish {
    pub exchange: String,
    pub routing_key: String,
    pub mandatory: bool,
    pub immediate: bool,
}

impl Publish {
    pub const METHOD_ID: u16 = 40;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(0); // reserved-1
        buf.extend(types::encode_short_string(&self.exchange));
        buf.extend(types::encode_short_string(&self.routing_key));
        buf.extend(types::encode_octet(u8::from(self.mandatory)));
        buf.extend(types::encode_octet(u8::from(self.immediate)));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (_reserved_1, rest) = types::decode_short_uint(input)?;
        let (exchange, rest) = types::decode_short_string(rest)?;
        let (routing_key, rest) = types::decode_short_string(rest)?;
        let (mandatory, rest) = types::decode_octet(rest)?;
        let (immediate, rest) = types::decode_octet(rest)?;
        Ok((
            Self {
                exchange,
                routing_key,
                mandatory: mandatory != 0,
                immediate: immediate != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Return {
    pub reply_code: u16,
    pub reply_text: String,
    pub exchange: String,
    pub routing_key: String,
}

impl Return {
    pub const METHOD_ID: u16 = 50;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(self.reply_code);
        buf.extend(types::encode_short_string(&self.reply_text));
        buf.extend(types::encode_short_string(&self.exchange));
        buf.extend(types::encode_short_string(&self.routing_key));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (reply_code, rest) = types::decode_short_uint(input)?;
        let (reply_text, rest) = types::decode_short_string(rest)?;
        let (exchange, rest) = types::decode_short_string(rest)?;
        let (routing_key, rest) = types::decode_short_string(rest)?;
        Ok((
            Self {
                reply_code,
                reply_text,
                exchange,
                routing_key,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Deliver {
    pub consumer_tag: String,
    pub delivery_tag: u64,
    pub redelivered: bool,
    pub exchange: String,
    pub routing_key: String,
}

impl Deliver {
    pub const METHOD_ID: u16 = 60;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_string(&self.consumer_tag);
        buf.extend(types::encode_long_long_uint(self.delivery_tag));
        buf.extend(types::encode_octet(u8::from(self.redelivered)));
        buf.extend(types::encode_short_string(&self.exchange));
        buf.extend(types::encode_short_string(&self.routing_key));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (consumer_tag, rest) = types::decode_short_string(input)?;
        let (delivery_tag, rest) = types::decode_long_long_uint(rest)?;
        let (redelivered, rest) = types::decode_octet(rest)?;
        let (exchange, rest) = types::decode_short_string(rest)?;
        let (routing_key, rest) = types::decode_short_string(rest)?;
        Ok((
            Self {
                consumer_tag,
                delivery_tag,
                redelivered: redelivered != 0,
                exchange,
                routing_key,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Get {
    pub queue: String,
    pub no_ack: bool,
}

impl Get {
    pub const METHOD_ID: u16 = 70;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(0); // reserved-1
        buf.extend(types::encode_short_string(&self.queue));
        buf.extend(types::encode_octet(u8::from(self.no_ack)));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (_reserved_1, rest) = types::decode_short_uint(input)?;
        let (queue, rest) = types::decode_short_string(rest)?;
        let (no_ack, rest) = types::decode_octet(rest)?;
        Ok((
            Self {
                queue,
                no_ack: no_ack != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GetOk {
    pub delivery_tag: u64,
    pub redelivered: bool,
    pub exchange: String,
    pub routing_key: String,
    pub message_count: u32,
}

impl GetOk {
    pub const METHOD_ID: u16 = 71;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_long_long_uint(self.delivery_tag);
        buf.extend(types::encode_octet(u8::from(self.redelivered)));
        buf.extend(types::encode_short_string(&self.exchange));
        buf.extend(types::encode_short_string(&self.routing_key));
        buf.extend(types::encode_long_uint(self.message_count));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (delivery_tag, rest) = types::decode_long_long_uint(input)?;
        let (redelivered, rest) = types::decode_octet(rest)?;
        let (exchange, rest) = types::decode_short_string(rest)?;
        let (routing_key, rest) = types::decode_short_string(rest)?;
        let (message_count, rest) = types::decode_long_uint(rest)?;
        Ok((
            Self {
                delivery_tag,
                redelivered: redelivered != 0,
                exchange,
                routing_key,
                message_count,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GetEmpty;

impl GetEmpty {
    pub const METHOD_ID: u16 = 72;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok((Self, input))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ack {
    pub delivery_tag: u64,
    pub multiple: bool,
}

impl Ack {
    pub const METHOD_ID: u16 = 80;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_long_long_uint(self.delivery_tag);
        buf.extend(types::encode_octet(u8::from(self.multiple)));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (delivery_tag, rest) = types::decode_long_long_uint(input)?;
        let (multiple, rest) = types::decode_octet(rest)?;
        Ok((
            Self {
                delivery_tag,
                multiple: multiple != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reject {
    pub delivery_tag: u64,
    pub requeue: bool,
}

impl Reject {
    pub const METHOD_ID: u16 = 90;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_long_long_uint(self.delivery_tag);
        buf.extend(types::encode_octet(u8::from(self.requeue)));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (delivery_tag, rest) = types::decode_long_long_uint(input)?;
        let (requeue, rest) = types::decode_octet(rest)?;
        Ok((
            Self {
                delivery_tag,
                requeue: requeue != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverAsync {
    pub requeue: bool,
}

impl RecoverAsync {
    pub const METHOD_ID: u16 = 100;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        types::encode_octet(u8::from(self.requeue))
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (requeue, rest) = types::decode_octet(input)?;
        Ok((
            Self {
                requeue: requeue != 0,
            },
            rest,
        ))
    }
}

/// Same payload as [`RecoverAsync`] but expects a `RecoverOk` reply;
/// kept as a distinct type since the two are distinct wire methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recover {
    pub requeue: bool,
}

impl Recover {
    pub const METHOD_ID: u16 = 110;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        types::encode_octet(u8::from(self.requeue))
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (requeue, rest) = types::decode_octet(input)?;
        Ok((
            Self {
                requeue: requeue != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RecoverOk;

impl RecoverOk {
    pub const METHOD_ID: u16 = 111;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok((Self, input))
    }
}
