//! An asynchronous client-side implementation of the AMQP 0-9-1 wire
//! protocol: the typed-value codec, frame layer, method-argument catalog,
//! frame router, protocol negotiator, and connection state machine needed
//! to open, maintain and close a connection to an AMQP 0-9-1 broker.
//!
//! This crate covers `Connection`, `Channel`, `Exchange` and `Queue`
//! handshake/topology methods. `Basic` (publish/consume/ack) argument
//! schemas are declared for completeness but are not wired into the router;
//! building a messaging layer on top is left to a higher-level crate.

#![deny(missing_debug_implementations)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate log;

pub mod connection;
pub mod error;
pub mod frame;
pub mod methods;
pub mod negotiator;
pub mod params;
pub mod router;
pub mod transport;
pub mod types;

pub use crate::connection::Connection;
pub use crate::error::{AmqpError, AmqpResult, ProtocolError, ReplyErrorKind};
pub use crate::params::{ConnectParams, ConnectParamsBuilder, Tls};
pub use crate::transport::{TcpTransport, Transport};

#[cfg(feature = "tls")]
pub use crate::transport::TlsTransport;
