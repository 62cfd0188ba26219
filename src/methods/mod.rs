//! The method-argument catalog: one submodule per AMQP class, plus the
//! `(class-id, method-id) -> Variant` selector the frame layer consults.
//!
//! `basic` is deliberately not represented in [`MethodArguments`]: its
//! schemas are declared (see `basic.rs`) but never routed, matching the
//! reference implementation this core is grounded on.

pub mod basic;
pub mod channel;
pub mod connection;
pub mod exchange;
pub mod queue;

use crate::error::{AmqpResult, ProtocolError};

/// A decoded method frame's arguments, closed over the four classes this
/// core actually dispatches.
#[derive(Clone, Debug, PartialEq)]
pub enum MethodArguments {
    ConnectionStart(connection::Start),
    ConnectionStartOk(connection::StartOk),
    ConnectionSecure(connection::Secure),
    ConnectionSecureOk(connection::SecureOk),
    ConnectionTune(connection::Tune),
    ConnectionTuneOk(connection::TuneOk),
    ConnectionOpen(connection::Open),
    ConnectionOpenOk(connection::OpenOk),
    ConnectionClose(connection::Close),
    ConnectionCloseOk(connection::CloseOk),

    ChannelOpen(channel::Open),
    ChannelOpenOk(channel::OpenOk),
    ChannelFlow(channel::Flow),
    ChannelFlowOk(channel::FlowOk),
    ChannelClose(channel::Close),
    ChannelCloseOk(channel::CloseOk),

    ExchangeDeclare(exchange::Declare),
    ExchangeDeclareOk(exchange::DeclareOk),
    ExchangeDelete(exchange::Delete),
    ExchangeDeleteOk(exchange::DeleteOk),

    QueueDeclare(queue::Declare),
    QueueDeclareOk(queue::DeclareOk),
    QueueBind(queue::Bind),
    QueueBindOk(queue::BindOk),
    QueueUnbind(queue::Unbind),
    QueueUnbindOk(queue::UnbindOk),
    QueuePurge(queue::Purge),
    QueuePurgeOk(queue::PurgeOk),
    QueueDelete(queue::Delete),
    QueueDeleteOk(queue::DeleteOk),
}

impl MethodArguments {
    #[must_use]
    pub fn class_id(&self) -> u16 {
        match self {
            Self::ConnectionStart(_)
            | Self::ConnectionStartOk(_)
            | Self::ConnectionSecure(_)
            | Self::ConnectionSecureOk(_)
            | Self::ConnectionTune(_)
            | Self::ConnectionTuneOk(_)
            | Self::ConnectionOpen(_)
            | Self::ConnectionOpenOk(_)
            | Self::ConnectionClose(_)
            | Self::ConnectionCloseOk(_) => connection::CLASS_ID,
            Self::ChannelOpen(_)
            | Self::ChannelOpenOk(_)
            | Self::ChannelFlow(_)
            | Self::ChannelFlowOk(_)
            | Self::ChannelClose(_)
            | Self::ChannelCloseOk(_) => channel::CLASS_ID,
            Self::ExchangeDeclare(_)
            | Self::ExchangeDeclareOk(_)
            | Self::ExchangeDelete(_)
            | Self::ExchangeDeleteOk(_) => exchange::CLASS_ID,
            Self::QueueDeclare(_)
            | Self::QueueDeclareOk(_)
            | Self::QueueBind(_)
            | Self::QueueBindOk(_)
            | Self::QueueUnbind(_)
            | Self::QueueUnbindOk(_)
            | Self::QueuePurge(_)
            | Self::QueuePurgeOk(_)
            | Self::QueueDelete(_)
            | Self::QueueDeleteOk(_) => queue::CLASS_ID,
        }
    }

    #[must_use]
    pub fn method_id(&self) -> u16 {
        match self {
            Self::ConnectionStart(_) => connection::Start::METHOD_ID,
            Self::ConnectionStartOk(_) => connection::StartOk::METHOD_ID,
            Self::ConnectionSecure(_) => connection::Secure::METHOD_ID,
            Self::ConnectionSecureOk(_) => connection::SecureOk::METHOD_ID,
            Self::ConnectionTune(_) => connection::Tune::METHOD_ID,
            Self::ConnectionTuneOk(_) => connection::TuneOk::METHOD_ID,
            Self::ConnectionOpen(_) => connection::Open::METHOD_ID,
            Self::ConnectionOpenOk(_) => connection::OpenOk::METHOD_ID,
            Self::ConnectionClose(_) => connection::Close::METHOD_ID,
            Self::ConnectionCloseOk(_) => connection::CloseOk::METHOD_ID,
            Self::ChannelOpen(_) => channel::Open::METHOD_ID,
            Self::ChannelOpenOk(_) => channel::OpenOk::METHOD_ID,
            Self::ChannelFlow(_) => channel::Flow::METHOD_ID,
            Self::ChannelFlowOk(_) => channel::FlowOk::METHOD_ID,
            Self::ChannelClose(_) => channel::Close::METHOD_ID,
            Self::ChannelCloseOk(_) => channel::CloseOk::METHOD_ID,
            Self::ExchangeDeclare(_) => exchange::Declare::METHOD_ID,
            Self::ExchangeDeclareOk(_) => exchange::DeclareOk::METHOD_ID,
            Self::ExchangeDelete(_) => exchange::Delete::METHOD_ID,
            Self::ExchangeDeleteOk(_) => exchange::DeleteOk::METHOD_ID,
            Self::QueueDeclare(_) => queue::Declare::METHOD_ID,
            Self::QueueDeclareOk(_) => queue::DeclareOk::METHOD_ID,
            Self::QueueBind(_) => queue::Bind::METHOD_ID,
            Self::QueueBindOk(_) => queue::BindOk::METHOD_ID,
            Self::QueueUnbind(_) => queue::Unbind::METHOD_ID,
            Self::QueueUnbindOk(_) => queue::UnbindOk::METHOD_ID,
            Self::QueuePurge(_) => queue::Purge::METHOD_ID,
            Self::QueuePurgeOk(_) => queue::PurgeOk::METHOD_ID,
            Self::QueueDelete(_) => queue::Delete::METHOD_ID,
            Self::QueueDeleteOk(_) => queue::DeleteOk::METHOD_ID,
        }
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::ConnectionStart(a) => a.encode(),
            Self::ConnectionStartOk(a) => a.encode(),
            Self::ConnectionSecure(a) => a.encode(),
            Self::ConnectionSecureOk(a) => a.encode(),
            Self::ConnectionTune(a) => a.encode(),
            Self::ConnectionTuneOk(a) => a.encode(),
            Self::ConnectionOpen(a) => a.encode(),
            Self::ConnectionOpenOk(a) => a.encode(),
            Self::ConnectionClose(a) => a.encode(),
            Self::ConnectionCloseOk(a) => a.encode(),
            Self::ChannelOpen(a) => a.encode(),
            Self::ChannelOpenOk(a) => a.encode(),
            Self::ChannelFlow(a) => a.encode(),
            Self::ChannelFlowOk(a) => a.encode(),
            Self::ChannelClose(a) => a.encode(),
            Self::ChannelCloseOk(a) => a.encode(),
            Self::ExchangeDeclare(a) => a.encode(),
            Self::ExchangeDeclareOk(a) => a.encode(),
            Self::ExchangeDelete(a) => a.encode(),
            Self::ExchangeDeleteOk(a) => a.encode(),
            Self::QueueDeclare(a) => a.encode(),
            Self::QueueDeclareOk(a) => a.encode(),
            Self::QueueBind(a) => a.encode(),
            Self::QueueBindOk(a) => a.encode(),
            Self::QueueUnbind(a) => a.encode(),
            Self::QueueUnbindOk(a) => a.encode(),
            Self::QueuePurge(a) => a.encode(),
            Self::QueuePurgeOk(a) => a.encode(),
            Self::QueueDelete(a) => a.encode(),
            Self::QueueDeleteOk(a) => a.encode(),
        }
    }

    /// Resolves the arguments codec from `(class_id, method_id)`, the
    /// selector the frame layer feeds in after reading a method frame's
    /// header fields.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnknownMethod`] for any pair this core does
    /// not route, including every `Basic` (class 60) method.
    pub fn decode(class_id: u16, method_id: u16, input: &[u8]) -> AmqpResult<(Self, &[u8])> {
        Ok(match (class_id, method_id) {
            (c, m) if c == connection::CLASS_ID && m == connection::Start::METHOD_ID => {
                let (a, rest) = connection::Start::decode(input)?;
                (Self::ConnectionStart(a), rest)
            }
            (c, m) if c == connection::CLASS_ID && m == connection::StartOk::METHOD_ID => {
                let (a, rest) = connection::StartOk::decode(input)?;
                (Self::ConnectionStartOk(a), rest)
            }
            (c, m) if c == connection::CLASS_ID && m == connection::Secure::METHOD_ID => {
                let (a, rest) = connection::Secure::decode(input)?;
                (Self::ConnectionSecure(a), rest)
            }
            (c, m) if c == connection::CLASS_ID && m == connection::SecureOk::METHOD_ID => {
                let (a, rest) = connection::SecureOk::decode(input)?;
                (Self::ConnectionSecureOk(a), rest)
            }
            (c, m) if c == connection::CLASS_ID && m == connection::Tune::METHOD_ID => {
                let (a, rest) = connection::Tune::decode(input)?;
                (Self::ConnectionTune(a), rest)
            }
            (c, m) if c == connection::CLASS_ID && m == connection::TuneOk::METHOD_ID => {
                let (a, rest) = connection::TuneOk::decode(input)?;
                (Self::ConnectionTuneOk(a), rest)
            }
            (c, m) if c == connection::CLASS_ID && m == connection::Open::METHOD_ID => {
                let (a, rest) = connection::Open::decode(input)?;
                (Self::ConnectionOpen(a), rest)
            }
            (c, m) if c == connection::CLASS_ID && m == connection::OpenOk::METHOD_ID => {
                let (a, rest) = connection::OpenOk::decode(input)?;
                (Self::ConnectionOpenOk(a), rest)
            }
            (c, m) if c == connection::CLASS_ID && m == connection::Close::METHOD_ID => {
                let (a, rest) = connection::Close::decode(input)?;
                (Self::ConnectionClose(a), rest)
            }
            (c, m) if c == connection::CLASS_ID && m == connection::CloseOk::METHOD_ID => {
                let (a, rest) = connection::CloseOk::decode(input)?;
                (Self::ConnectionCloseOk(a), rest)
            }

            (c, m) if c == channel::CLASS_ID && m == channel::Open::METHOD_ID => {
                let (a, rest) = channel::Open::decode(input)?;
                (Self::ChannelOpen(a), rest)
            }
            (c, m) if c == channel::CLASS_ID && m == channel::OpenOk::METHOD_ID => {
                let (a, rest) = channel::OpenOk::decode(input)?;
                (Self::ChannelOpenOk(a), rest)
            }
            (c, m) if c == channel::CLASS_ID && m == channel::Flow::METHOD_ID => {
                let (a, rest) = channel::Flow::decode(input)?;
                (Self::ChannelFlow(a), rest)
            }
            (c, m) if c == channel::CLASS_ID && m == channel::FlowOk::METHOD_ID => {
                let (a, rest) = channel::FlowOk::decode(input)?;
                (Self::ChannelFlowOk(a), rest)
            }
            (c, m) if c == channel::CLASS_ID && m == channel::Close::METHOD_ID => {
                let (a, rest) = channel::Close::decode(input)?;
                (Self::ChannelClose(a), rest)
            }
            (c, m) if c == channel::CLASS_ID && m == channel::CloseOk::METHOD_ID => {
                let (a, rest) = channel::CloseOk::decode(input)?;
                (Self::ChannelCloseOk(a), rest)
            }

            (c, m) if c == exchange::CLASS_ID && m == exchange::Declare::METHOD_ID => {
                let (a, rest) = exchange::Declare::decode(input)?;
                (Self::ExchangeDeclare(a), rest)
            }
            (c, m) if c == exchange::CLASS_ID && m == exchange::DeclareOk::METHOD_ID => {
                let (a, rest) = exchange::DeclareOk::decode(input)?;
                (Self::ExchangeDeclareOk(a), rest)
            }
            (c, m) if c == exchange::CLASS_ID && m == exchange::Delete::METHOD_ID => {
                let (a, rest) = exchange::Delete::decode(input)?;
                (Self::ExchangeDelete(a), rest)
            }
            (c, m) if c == exchange::CLASS_ID && m == exchange::DeleteOk::METHOD_ID => {
                let (a, rest) = exchange::DeleteOk::decode(input)?;
                (Self::ExchangeDeleteOk(a), rest)
            }

            (c, m) if c == queue::CLASS_ID && m == queue::Declare::METHOD_ID => {
                let (a, rest) = queue::Declare::decode(input)?;
                (Self::QueueDeclare(a), rest)
            }
            (c, m) if c == queue::CLASS_ID && m == queue::DeclareOk::METHOD_ID => {
                let (a, rest) = queue::DeclareOk::decode(input)?;
                (Self::QueueDeclareOk(a), rest)
            }
            (c, m) if c == queue::CLASS_ID && m == queue::Bind::METHOD_ID => {
                let (a, rest) = queue::Bind::decode(input)?;
                (Self::QueueBind(a), rest)
            }
            (c, m) if c == queue::CLASS_ID && m == queue::BindOk::METHOD_ID => {
                let (a, rest) = queue::BindOk::decode(input)?;
                (Self::QueueBindOk(a), rest)
            }
            (c, m) if c == queue::CLASS_ID && m == queue::Unbind::METHOD_ID => {
                let (a, rest) = queue::Unbind::decode(input)?;
                (Self::QueueUnbind(a), rest)
            }
            (c, m) if c == queue::CLASS_ID && m == queue::UnbindOk::METHOD_ID => {
                let (a, rest) = queue::UnbindOk::decode(input)?;
                (Self::QueueUnbindOk(a), rest)
            }
            (c, m) if c == queue::CLASS_ID && m == queue::Purge::METHOD_ID => {
                let (a, rest) = queue::Purge::decode(input)?;
                (Self::QueuePurge(a), rest)
            }
            (c, m) if c == queue::CLASS_ID && m == queue::PurgeOk::METHOD_ID => {
                let (a, rest) = queue::PurgeOk::decode(input)?;
                (Self::QueuePurgeOk(a), rest)
            }
            (c, m) if c == queue::CLASS_ID && m == queue::Delete::METHOD_ID => {
                let (a, rest) = queue::Delete::decode(input)?;
                (Self::QueueDelete(a), rest)
            }
            (c, m) if c == queue::CLASS_ID && m == queue::DeleteOk::METHOD_ID => {
                let (a, rest) = queue::DeleteOk::decode(input)?;
                (Self::QueueDeleteOk(a), rest)
            }

            (class_id, method_id) => {
                return Err(ProtocolError::UnknownMethod { class_id, method_id }.into())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_close_ok_round_trips_through_the_selector() {
        let args = MethodArguments::ConnectionCloseOk(connection::CloseOk);
        assert_eq!(args.class_id(), 10);
        assert_eq!(args.method_id(), 51);
        let bytes = args.encode();
        let (decoded, rest) = MethodArguments::decode(10, 51, &bytes).unwrap();
        assert_eq!(decoded, args);
        assert!(rest.is_empty());
    }

    #[test]
    fn basic_class_is_not_wired_into_the_selector() {
        let publish = basic::Publish {
            exchange: String::new(),
            routing_key: "rk".to_string(),
            mandatory: false,
            immediate: false,
        };
        let bytes = publish.encode();
        assert!(MethodArguments::decode(basic::CLASS_ID, basic::Publish::METHOD_ID, &bytes).is_err());
    }

    #[test]
    fn unknown_method_is_an_error() {
        assert!(MethodArguments::decode(9999, 1, &[]).is_err());
    }
}
