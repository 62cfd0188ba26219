//! The generic frame layer: a 7-byte [`FrameHeader`] followed by a payload
//! chosen by `type`, with the trailing `FRAME_END` sentinel handled by the
//! transport/connection boundary rather than by `Frame` itself (mirroring
//! how the source keeps the sentinel out of the frame's own serialization
//! and instead appends/strips it at the socket-facing edge).
use crate::error::{AmqpResult, ProtocolError};
use crate::methods::MethodArguments;
use crate::types;

pub const METHOD_FRAME_TYPE: u8 = 1;
pub const CONTENT_HEADER_FRAME_TYPE: u8 = 2;
pub const CONTENT_BODY_FRAME_TYPE: u8 = 3;
pub const HEARTBEAT_FRAME_TYPE: u8 = 8;

/// Fixed 7-byte prefix of every frame: `(type, channel, size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    pub frame_type: u8,
    pub channel: u16,
    pub size: u32,
}

impl FrameHeader {
    pub const WIRE_SIZE: usize = 7;

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_octet(self.frame_type);
        buf.extend(types::encode_short_uint(self.channel));
        buf.extend(types::encode_long_uint(self.size));
        buf
    }

    /// Reads exactly the 7-byte prefix, independent of whether `size` bytes
    /// of payload have arrived yet; the caller uses the returned `size` to
    /// know how much more to read off the transport.
    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (frame_type, rest) = types::decode_octet(input)?;
        let (channel, rest) = types::decode_short_uint(rest)?;
        let (size, rest) = types::decode_long_uint(rest)?;
        Ok((
            Self {
                frame_type,
                channel,
                size,
            },
            rest,
        ))
    }
}

/// A method frame's payload: `(class-id, method-id)` followed by the
/// method-specific arguments the catalog selector resolves.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodFrame {
    pub arguments: MethodArguments,
}

impl MethodFrame {
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = types::encode_short_uint(self.arguments.class_id());
        buf.extend(types::encode_short_uint(self.arguments.method_id()));
        buf.extend(self.arguments.encode());
        buf
    }

    pub fn decode(input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        let (class_id, rest) = types::decode_short_uint(input)?;
        let (method_id, rest) = types::decode_short_uint(rest)?;
        let (arguments, rest) = MethodArguments::decode(class_id, method_id, rest)?;
        Ok((Self { arguments }, rest))
    }
}

/// The payload of a generic frame, chosen by the header's `type` field.
#[derive(Clone, Debug, PartialEq)]
pub enum FramePayload {
    Method(MethodFrame),
    Heartbeat,
}

/// A full frame: header plus the payload its `type` selects.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub channel: u16,
    pub payload: FramePayload,
}

impl Frame {
    #[must_use]
    pub fn method(channel: u16, arguments: MethodArguments) -> Self {
        Self {
            channel,
            payload: FramePayload::Method(MethodFrame { arguments }),
        }
    }

    #[must_use]
    pub fn heartbeat() -> Self {
        Self {
            channel: 0,
            payload: FramePayload::Heartbeat,
        }
    }

    /// Serializes header + payload. `size` is derived from the already-
    /// serialized payload bytes, computed before the header is written
    /// (the two-pass pattern this layer uses in place of reverse-order
    /// field emission): the payload is built first so its length is known,
    /// then the header is prefixed. `FRAME_END` is not appended here; the
    /// caller (the connection's send path) appends it after this call.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let (frame_type, body) = match &self.payload {
            FramePayload::Method(m) => (METHOD_FRAME_TYPE, m.encode()),
            FramePayload::Heartbeat => (HEARTBEAT_FRAME_TYPE, Vec::new()),
        };
        let header = FrameHeader {
            frame_type,
            channel: self.channel,
            size: body.len() as u32,
        };
        let mut buf = header.encode();
        buf.extend(body);
        buf
    }

    /// Decodes a full frame from `header` plus exactly `header.size` bytes
    /// of payload (the `FRAME_END` sentinel must already have been
    /// validated and stripped by the caller).
    pub fn decode_payload(header: &FrameHeader, body: &[u8]) -> AmqpResult<Self> {
        match header.frame_type {
            METHOD_FRAME_TYPE => {
                let (method_frame, rest) = MethodFrame::decode(body)?;
                if !rest.is_empty() {
                    return Err(ProtocolError::TrailingBytes(rest.len()).into());
                }
                Ok(Self {
                    channel: header.channel,
                    payload: FramePayload::Method(method_frame),
                })
            }
            HEARTBEAT_FRAME_TYPE => {
                if !body.is_empty() {
                    return Err(ProtocolError::TrailingBytes(body.len()).into());
                }
                Ok(Self {
                    channel: header.channel,
                    payload: FramePayload::Heartbeat,
                })
            }
            CONTENT_HEADER_FRAME_TYPE | CONTENT_BODY_FRAME_TYPE => {
                Err(ProtocolError::UnknownMethod {
                    class_id: 0,
                    method_id: u16::from(header.frame_type),
                }
                .into())
            }
            other => Err(ProtocolError::UnknownMethod {
                class_id: 0,
                method_id: u16::from(other),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::connection;

    #[test]
    fn heartbeat_frame_size_is_zero() {
        let frame = Frame::heartbeat();
        let bytes = frame.encode();
        assert_eq!(bytes, b"\x08\x00\x00\x00\x00\x00\x00");
    }

    #[test]
    fn method_frame_round_trips() {
        let frame = Frame::method(
            0,
            MethodArguments::ConnectionCloseOk(connection::CloseOk),
        );
        let bytes = frame.encode();
        let (header, body) = FrameHeader::decode(&bytes).unwrap();
        assert_eq!(header.frame_type, METHOD_FRAME_TYPE);
        assert_eq!(header.channel, 0);
        assert_eq!(header.size as usize, body.len());
        let decoded = Frame::decode_payload(&header, body).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn header_decode_does_not_require_the_payload_to_be_present() {
        let header_bytes = FrameHeader {
            frame_type: METHOD_FRAME_TYPE,
            channel: 3,
            size: 100,
        }
        .encode();
        let (header, rest) = FrameHeader::decode(&header_bytes).unwrap();
        assert_eq!(header.size, 100);
        assert!(rest.is_empty());
    }
}
