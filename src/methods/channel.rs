//! `Channel` class (class-id 20) method arguments.
use crate::error::AmqpResult;
use crate::types;

pub const CLASS_ID: u16 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Open;

impl Open {
    pub const METHOD_ID: u16 = 10;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok((Self, input))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct OpenOk;

impl OpenOk {
    pub const METHOD_ID: u16 = 11;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok((Self, input))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flow {
    pub active: bool,
}

impl Flow {
    pub const METHOD_ID: u16 = 20;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        types::encode_octet(u8::from(self.active))
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (active, rest) = types::decode_octet(input)?;
        Ok((
            Self {
                active: active != 0,
            },
            rest,
        ))
    }
}

/// Same payload as [`Flow`]; the server's acknowledgement of a flow request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowOk {
    pub active: bool,
}

impl FlowOk {
    pub const METHOD_ID: u16 = 21;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        types::encode_octet(u8::from(self.active))
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (active, rest) = types::decode_octet(input)?;
        Ok((
            Self {
                active: active != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Close {
    pub reply_code: u16,
    pub reply_text: String,
    pub class_id: u16,
    pub method_id: u16,
}

impl Close {
    pub const METHOD_ID: u16 = 40;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(self.reply_code);
        buf.extend(types::encode_short_string(&self.reply_text));
        buf.extend(types::encode_short_uint(self.class_id));
        buf.extend(types::encode_short_uint(self.method_id));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (reply_code, rest) = types::decode_short_uint(input)?;
        let (reply_text, rest) = types::decode_short_string(rest)?;
        let (class_id, rest) = types::decode_short_uint(rest)?;
        let (method_id, rest) = types::decode_short_uint(rest)?;
        Ok((
            Self {
                reply_code,
                reply_text,
                class_id,
                method_id,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CloseOk;

impl CloseOk {
    pub const METHOD_ID: u16 = 41;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok((Self, input))
    }
}
