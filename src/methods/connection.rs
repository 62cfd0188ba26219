//! `Connection` class (class-id 10) method arguments.
use crate::error::AmqpResult;
use crate::types::{self, FieldTable};

pub const CLASS_ID: u16 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct Start {
    pub version_major: u8,
    pub version_minor: u8,
    pub server_properties: FieldTable,
    pub mechanisms: String,
    pub locales: String,
}

impl Start {
    pub const METHOD_ID: u16 = 10;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_octet(self.version_major);
        buf.extend(types::encode_octet(self.version_minor));
        buf.extend(self.server_properties.encode());
        buf.extend(types::encode_long_string(&self.mechanisms));
        buf.extend(types::encode_long_string(&self.locales));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (version_major, rest) = types::decode_octet(input)?;
        let (version_minor, rest) = types::decode_octet(rest)?;
        let (server_properties, rest) = FieldTable::decode(rest)?;
        let (mechanisms, rest) = types::decode_long_string(rest)?;
        let (locales, rest) = types::decode_long_string(rest)?;
        Ok((
            Self {
                version_major,
                version_minor,
                server_properties,
                mechanisms,
                locales,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StartOk {
    pub client_properties: FieldTable,
    pub mechanism: String,
    pub response: String,
    pub locale: String,
}

impl StartOk {
    pub const METHOD_ID: u16 = 11;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = self.client_properties.encode();
        buf.extend(types::encode_short_string(&self.mechanism));
        buf.extend(types::encode_long_string(&self.response));
        buf.extend(types::encode_short_string(&self.locale));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (client_properties, rest) = FieldTable::decode(input)?;
        let (mechanism, rest) = types::decode_short_string(rest)?;
        let (response, rest) = types::decode_long_string(rest)?;
        let (locale, rest) = types::decode_short_string(rest)?;
        Ok((
            Self {
                client_properties,
                mechanism,
                response,
                locale,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Secure {
    pub challenge: String,
}

impl Secure {
    pub const METHOD_ID: u16 = 20;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        types::encode_long_string(&self.challenge)
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (challenge, rest) = types::decode_long_string(input)?;
        Ok((Self { challenge }, rest))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SecureOk {
    pub response: String,
}

impl SecureOk {
    pub const METHOD_ID: u16 = 21;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        types::encode_long_string(&self.response)
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (response, rest) = types::decode_long_string(input)?;
        Ok((Self { response }, rest))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tune {
    pub channel_max: u16,
    pub frame_max: u32,
    pub heartbeat: u16,
}

impl Tune {
    pub const METHOD_ID: u16 = 30;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(self.channel_max);
        buf.extend(types::encode_long_uint(self.frame_max));
        buf.extend(types::encode_short_uint(self.heartbeat));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (channel_max, rest) = types::decode_short_uint(input)?;
        let (frame_max, rest) = types::decode_long_uint(rest)?;
        let (heartbeat, rest) = types::decode_short_uint(rest)?;
        Ok((
            Self {
                channel_max,
                frame_max,
                heartbeat,
            },
            rest,
        ))
    }
}

/// Same payload as [`Tune`]; kept as a distinct type since the two sides of
/// the handshake carry a different method id over the same three fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TuneOk {
    pub channel_max: u16,
    pub frame_max: u32,
    pub heartbeat: u16,
}

impl TuneOk {
    pub const METHOD_ID: u16 = 31;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(self.channel_max);
        buf.extend(types::encode_long_uint(self.frame_max));
        buf.extend(types::encode_short_uint(self.heartbeat));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (channel_max, rest) = types::decode_short_uint(input)?;
        let (frame_max, rest) = types::decode_long_uint(rest)?;
        let (heartbeat, rest) = types::decode_short_uint(rest)?;
        Ok((
            Self {
                channel_max,
                frame_max,
                heartbeat,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Open {
    pub virtual_host: String,
    pub capabilities: String,
    pub insist: bool,
}

impl Open {
    pub const METHOD_ID: u16 = 40;

    #[must_use]
    pub fn new(virtual_host: impl Into<String>) -> Self {
        Self {
            virtual_host: virtual_host.into(),
            capabilities: String::new(),
            insist: true,
        }
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_string(&self.virtual_host);
        buf.extend(types::encode_short_string(&self.capabilities));
        buf.extend(types::encode_octet(u8::from(self.insist)));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (virtual_host, rest) = types::decode_short_string(input)?;
        let (capabilities, rest) = types::decode_short_string(rest)?;
        let (insist, rest) = types::decode_octet(rest)?;
        Ok((
            Self {
                virtual_host,
                capabilities,
                insist: insist != 0,
            },
            rest,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct OpenOk {
    pub known_hosts: String,
}

impl OpenOk {
    pub const METHOD_ID: u16 = 41;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        types::encode_short_string(&self.known_hosts)
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (known_hosts, rest) = types::decode_short_string(input)?;
        Ok((Self { known_hosts }, rest))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Close {
    pub reply_code: u16,
    pub reply_text: String,
    pub class_id: u16,
    pub failure_method_id: u16,
}

impl Close {
    pub const METHOD_ID: u16 = 50;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(self.reply_code);
        buf.extend(types::encode_short_string(&self.reply_text));
        buf.extend(types::encode_short_uint(self.class_id));
        buf.extend(types::encode_short_uint(self.failure_method_id));
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (reply_code, rest) = types::decode_short_uint(input)?;
        let (reply_text, rest) = types::decode_short_string(rest)?;
        let (class_id, rest) = types::decode_short_uint(rest)?;
        let (failure_method_id, rest) = types::decode_short_uint(rest)?;
        Ok((
            Self {
                reply_code,
                reply_text,
                class_id,
                failure_method_id,
            },
            rest,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CloseOk;

impl CloseOk {
    pub const METHOD_ID: u16 = 51;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok((Self, input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_defaults_match_the_handshake_defaults() {
        let open = Open::new("/");
        assert_eq!(open.capabilities, "");
        assert!(open.insist);
    }

    #[test]
    fn close_round_trips() {
        let close = Close {
            reply_code: 404,
            reply_text: "NOT_FOUND".to_string(),
            class_id: 50,
            failure_method_id: 10,
        };
        let bytes = close.encode();
        let (decoded, rest) = Close::decode(&bytes).unwrap();
        assert_eq!(decoded, close);
        assert!(rest.is_empty());
    }
}
