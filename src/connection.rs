//! The connection state machine: drives a [`Transport`] through the AMQP
//! 0-9-1 handshake, then runs a read loop and a heartbeat loop concurrently
//! until the user closes the connection or the server does.
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, error, trace, warn};
use tokio::sync::{Mutex, Notify};

use crate::error::{reply_error, AmqpError, AmqpResult, ProtocolError};
use crate::frame::{Frame, FrameHeader, FramePayload, METHOD_FRAME_TYPE};
use crate::methods::{connection, MethodArguments};
use crate::negotiator::{negotiate_auth_mechanism, negotiate_numeric};
use crate::params::ConnectParams;
use crate::router::{FrameRouter, HeartbeatHandler, MethodHandler, RouteOutcome};
use crate::transport::Transport;
use crate::types::{FieldTable, FieldValue, FRAME_END};

const PROTOCOL_HEADER: [u8; 8] = *b"AMQP\x00\x00\x09\x01";
const MAX_MISSED_HEARTBEATS: u8 = 4;

/// The runtime fields the handshake and the running connection mutate.
#[derive(Debug)]
struct ConnectionState {
    mechanism: String,
    locale: String,
    server_properties: FieldTable,
    vhost: String,
    max_frame_length: u32,
    max_channels: u16,
    heartbeat_interval: u16,
    last_send_at: Instant,
    missed_heartbeats: u8,
    opened: bool,
    running: bool,
    close_error: Option<AmqpError>,
}

impl ConnectionState {
    fn new(vhost: String) -> Self {
        Self {
            mechanism: String::new(),
            locale: String::new(),
            server_properties: FieldTable::new(),
            vhost,
            max_frame_length: 0,
            max_channels: 0,
            heartbeat_interval: 0,
            last_send_at: Instant::now(),
            missed_heartbeats: 0,
            opened: false,
            running: false,
            close_error: None,
        }
    }
}

async fn send_frame(
    transport: &Mutex<Box<dyn Transport>>,
    state: &Mutex<ConnectionState>,
    frame: Frame,
) -> AmqpResult<()> {
    let mut bytes = frame.encode();
    bytes.push(FRAME_END);
    transport.lock().await.send(&bytes).await?;
    state.lock().await.last_send_at = Instant::now();
    Ok(())
}

fn client_properties() -> FieldTable {
    let mut capabilities = FieldTable::new();
    capabilities.insert("authentication_failure_close", FieldValue::Boolean(true));
    capabilities.insert("basic.nack", FieldValue::Boolean(true));
    capabilities.insert("connection.blocked", FieldValue::Boolean(true));
    capabilities.insert("consumer_cancel_notify", FieldValue::Boolean(true));
    capabilities.insert("publisher_confirms", FieldValue::Boolean(true));

    let mut properties = FieldTable::new();
    properties.insert("product", FieldValue::from_short_string(env!("CARGO_PKG_NAME")));
    properties.insert("version", FieldValue::from_short_string(env!("CARGO_PKG_VERSION")));
    properties.insert("platform", FieldValue::from_short_string("rust"));
    properties.insert(
        "information",
        FieldValue::from_short_string("https://www.rabbitmq.com"),
    );
    properties.insert("capabilities", FieldValue::FieldTable(capabilities));
    properties
}

struct StartHandler {
    transport: Arc<Mutex<Box<dyn Transport>>>,
    state: Arc<Mutex<ConnectionState>>,
    params: Arc<ConnectParams>,
}

#[async_trait]
impl MethodHandler for StartHandler {
    async fn handle(&self, arguments: MethodArguments) -> AmqpResult<()> {
        let MethodArguments::ConnectionStart(start) = arguments else {
            return Ok(());
        };
        let server_mechanisms: Vec<&str> = start.mechanisms.split(' ').collect();
        let mechanism = negotiate_auth_mechanism("PLAIN", &server_mechanisms)?;
        debug!("negotiated auth mechanism {mechanism}");

        {
            let mut state = self.state.lock().await;
            state.mechanism = mechanism.clone();
            state.locale = "en_US".to_string();
            state.server_properties = start.server_properties;
        }

        let response = format!("\0{}\0{}", self.params.username(), self.params.password());
        let start_ok = connection::StartOk {
            client_properties: client_properties(),
            mechanism,
            response,
            locale: "en_US".to_string(),
        };
        send_frame(
            &self.transport,
            &self.state,
            Frame::method(0, MethodArguments::ConnectionStartOk(start_ok)),
        )
        .await
    }
}

struct TuneHandler {
    transport: Arc<Mutex<Box<dyn Transport>>>,
    state: Arc<Mutex<ConnectionState>>,
    params: Arc<ConnectParams>,
}

#[async_trait]
impl MethodHandler for TuneHandler {
    async fn handle(&self, arguments: MethodArguments) -> AmqpResult<()> {
        let MethodArguments::ConnectionTune(tune) = arguments else {
            return Ok(());
        };
        // The client proposes 0 ("accept the server's value") for both size
        // limits, and its own configured preference for the heartbeat.
        let max_channels = negotiate_numeric(0, u32::from(tune.channel_max)) as u16;
        let frame_max = negotiate_numeric(0, tune.frame_max);
        let heartbeat = negotiate_numeric(u32::from(self.params.heartbeat()), u32::from(tune.heartbeat)) as u16;

        {
            let mut state = self.state.lock().await;
            state.max_channels = max_channels;
            state.max_frame_length = frame_max;
            state.heartbeat_interval = heartbeat;
        }

        let tune_ok = connection::TuneOk {
            channel_max: max_channels,
            frame_max,
            heartbeat,
        };
        send_frame(
            &self.transport,
            &self.state,
            Frame::method(0, MethodArguments::ConnectionTuneOk(tune_ok)),
        )
        .await?;

        let vhost = self.state.lock().await.vhost.clone();
        send_frame(
            &self.transport,
            &self.state,
            Frame::method(0, MethodArguments::ConnectionOpen(connection::Open::new(vhost))),
        )
        .await
    }
}

struct OpenOkHandler {
    state: Arc<Mutex<ConnectionState>>,
    opened: Arc<Notify>,
}

#[async_trait]
impl MethodHandler for OpenOkHandler {
    async fn handle(&self, _arguments: MethodArguments) -> AmqpResult<()> {
        self.state.lock().await.opened = true;
        self.opened.notify_waiters();
        Ok(())
    }
}

struct CloseHandler {
    transport: Arc<Mutex<Box<dyn Transport>>>,
    state: Arc<Mutex<ConnectionState>>,
}

#[async_trait]
impl MethodHandler for CloseHandler {
    async fn handle(&self, arguments: MethodArguments) -> AmqpResult<()> {
        let MethodArguments::ConnectionClose(close) = arguments else {
            return Ok(());
        };
        send_frame(
            &self.transport,
            &self.state,
            Frame::method(0, MethodArguments::ConnectionCloseOk(connection::CloseOk)),
        )
        .await?;
        let error = reply_error(close.reply_code, close.reply_text);
        let mut state = self.state.lock().await;
        state.running = false;
        state.close_error = Some(error);
        Ok(())
    }
}

struct HeartbeatResetHandler {
    state: Arc<Mutex<ConnectionState>>,
}

#[async_trait]
impl HeartbeatHandler for HeartbeatResetHandler {
    async fn handle(&self) -> AmqpResult<()> {
        self.state.lock().await.missed_heartbeats = 0;
        Ok(())
    }
}

/// A connected AMQP client, past the initial handshake.
pub struct Connection {
    transport: Arc<Mutex<Box<dyn Transport>>>,
    state: Arc<Mutex<ConnectionState>>,
    router: FrameRouter,
    opened: Arc<Notify>,
}

impl Connection {
    /// Builds a connection around an already-connected transport; call
    /// [`Connection::connect`] to run the handshake.
    #[must_use]
    pub fn new(transport: Box<dyn Transport>, params: ConnectParams) -> Self {
        let params = Arc::new(params);
        let state = Arc::new(Mutex::new(ConnectionState::new(params.vhost().to_string())));
        let transport = Arc::new(Mutex::new(transport));
        let opened = Arc::new(Notify::new());

        let mut router = FrameRouter::new();
        router.register_method_route(
            0,
            connection::CLASS_ID,
            connection::Start::METHOD_ID,
            Box::new(StartHandler {
                transport: transport.clone(),
                state: state.clone(),
                params: params.clone(),
            }),
        );
        router.register_method_route(
            0,
            connection::CLASS_ID,
            connection::Tune::METHOD_ID,
            Box::new(TuneHandler {
                transport: transport.clone(),
                state: state.clone(),
                params: params.clone(),
            }),
        );
        router.register_method_route(
            0,
            connection::CLASS_ID,
            connection::OpenOk::METHOD_ID,
            Box::new(OpenOkHandler {
                state: state.clone(),
                opened: opened.clone(),
            }),
        );
        router.register_method_route(
            0,
            connection::CLASS_ID,
            connection::Close::METHOD_ID,
            Box::new(CloseHandler {
                transport: transport.clone(),
                state: state.clone(),
            }),
        );
        router.register_heartbeat_route(Box::new(HeartbeatResetHandler { state: state.clone() }));

        Self {
            transport,
            state,
            router,
            opened,
        }
    }

    /// Registers an extra method route on top of the connection-class
    /// handlers wired up in [`Connection::new`]. Must be called before this
    /// connection is wrapped in `Arc`, since dispatch afterward only needs
    /// shared access.
    pub fn register_method_route(
        &mut self,
        channel: u16,
        class_id: u16,
        method_id: u16,
        handler: Box<dyn MethodHandler>,
    ) {
        self.router.register_method_route(channel, class_id, method_id, handler);
    }

    /// Sends the protocol header and drives the read loop inline until
    /// `Connection.OpenOk` arrives, a fatal error occurs, or the server
    /// closes the connection before the handshake completes. Once open,
    /// spawns the read loop and the heartbeat loop as background tasks so
    /// frames keep being serviced, and missed heartbeats keep being
    /// tracked, for the rest of the connection's life.
    ///
    /// # Errors
    /// Returns [`AmqpError`] on I/O failure, a protocol decode error, a
    /// version mismatch, or a server-initiated close before the handshake
    /// completed.
    pub async fn connect(self: &Arc<Self>) -> AmqpResult<()> {
        trace!("sending protocol header");
        self.transport.lock().await.send(&PROTOCOL_HEADER).await?;
        self.state.lock().await.running = true;

        loop {
            if self.state.lock().await.opened {
                break;
            }
            self.read_one_frame().await?;
            if let Some(error) = self.state.lock().await.close_error.take() {
                return Err(error);
            }
        }

        let connection = self.clone();
        tokio::spawn(async move {
            if let Err(error) = connection.run().await {
                warn!("read loop ended: {error}");
            }
        });

        let connection = self.clone();
        tokio::spawn(async move {
            if let Err(error) = connection.heartbeat_loop().await {
                warn!("heartbeat loop ended: {error}");
            }
        });

        Ok(())
    }

    /// Runs the read loop until the connection stops running. `connect`
    /// spawns this automatically once the handshake completes; a caller
    /// never needs to invoke it directly.
    ///
    /// # Errors
    /// Returns [`AmqpError`] on a fatal codec error or transport failure.
    pub async fn run(self: Arc<Self>) -> AmqpResult<()> {
        while self.state.lock().await.running {
            self.read_one_frame().await?;
            if let Some(error) = self.state.lock().await.close_error.take() {
                return Err(error);
            }
        }
        Ok(())
    }

    async fn read_one_frame(&self) -> AmqpResult<()> {
        let heartbeat_interval = self.state.lock().await.heartbeat_interval;
        let timeout = if heartbeat_interval == 0 {
            Duration::from_secs(60)
        } else {
            Duration::from_secs(u64::from(heartbeat_interval))
        };

        let header_bytes = self
            .transport
            .lock()
            .await
            .recv_exact(FrameHeader::WIRE_SIZE, timeout)
            .await?;
        let Some(header_bytes) = header_bytes else {
            let mut state = self.state.lock().await;
            state.missed_heartbeats += 1;
            if state.missed_heartbeats > MAX_MISSED_HEARTBEATS {
                state.running = false;
                error!("connection aborted: {MAX_MISSED_HEARTBEATS} consecutive heartbeats missed");
                return Err(AmqpError::ConnectionAborted);
            }
            return Ok(());
        };

        if header_bytes.starts_with(b"AMQP") {
            let error = version_mismatch(&header_bytes);
            error!("protocol version mismatch during handshake: {error}");
            return Err(error);
        }

        let (header, _) = FrameHeader::decode(&header_bytes)?;
        let body_and_end = self
            .transport
            .lock()
            .await
            .recv_exact(header.size as usize + 1, timeout)
            .await?
            .ok_or(AmqpError::ConnectionAborted)?;

        let (body, end) = body_and_end.split_at(header.size as usize);
        if end != [FRAME_END] {
            error!("frame on channel {} did not end with the FRAME_END sentinel", header.channel);
            return Err(ProtocolError::FrameEndError.into());
        }

        let frame = Frame::decode_payload(&header, body).map_err(|e| {
            error!("failed to decode frame on channel {}: {e}", header.channel);
            e
        })?;
        match self.router.route(frame).await? {
            RouteOutcome::Dispatched => {}
            RouteOutcome::NoRoute => {
                warn!(
                    "no route registered for frame type {} on channel {}",
                    header.frame_type, header.channel
                );
            }
        }
        Ok(())
    }

    async fn heartbeat_loop(self: Arc<Self>) -> AmqpResult<()> {
        loop {
            let heartbeat_interval = self.state.lock().await.heartbeat_interval;
            if heartbeat_interval == 0 || !self.state.lock().await.running {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_secs(u64::from(heartbeat_interval) / 2)).await;
            if !self.state.lock().await.running {
                return Ok(());
            }
            let since_send = self.state.lock().await.last_send_at.elapsed();
            if since_send > Duration::from_secs(u64::from(heartbeat_interval)) {
                send_frame(&self.transport, &self.state, Frame::heartbeat()).await?;
            }
        }
    }

    /// Initiates an orderly close: stops the read and heartbeat loops.
    /// Transport shutdown is left to the transport's own `Drop`.
    pub async fn close(&self) {
        self.state.lock().await.running = false;
    }

    #[must_use]
    pub async fn is_opened(&self) -> bool {
        self.state.lock().await.opened
    }
}

fn version_mismatch(header_bytes: &[u8]) -> AmqpError {
    if header_bytes.len() >= 7 {
        ProtocolError::VersionMismatch(header_bytes[4], header_bytes[5], header_bytes[6]).into()
    } else {
        ProtocolError::TruncatedInput {
            needed: 7,
            available: header_bytes.len(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::connection as conn_methods;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    struct ScriptedTransport {
        inbound: StdMutex<VecDeque<u8>>,
        sent: StdMutex<Vec<u8>>,
    }

    impl ScriptedTransport {
        fn new(inbound: Vec<u8>) -> Self {
            Self {
                inbound: StdMutex::new(inbound.into()),
                sent: StdMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&mut self, bytes: &[u8]) -> AmqpResult<()> {
            self.sent.lock().unwrap().extend_from_slice(bytes);
            Ok(())
        }

        async fn recv_exact(&mut self, len: usize, _timeout: Duration) -> AmqpResult<Option<Vec<u8>>> {
            let mut inbound = self.inbound.lock().unwrap();
            if inbound.len() < len {
                return Ok(None);
            }
            Ok(Some(inbound.drain(..len).collect()))
        }

        fn is_connected(&self) -> bool {
            true
        }
    }

    fn frame_bytes(frame: Frame) -> Vec<u8> {
        let mut bytes = frame.encode();
        bytes.push(FRAME_END);
        bytes
    }

    #[tokio::test]
    async fn full_handshake_reaches_opened_state() {
        let mut script = Vec::new();
        script.extend(frame_bytes(Frame::method(
            0,
            MethodArguments::ConnectionStart(conn_methods::Start {
                version_major: 0,
                version_minor: 9,
                server_properties: FieldTable::new(),
                mechanisms: "PLAIN".to_string(),
                locales: "en_US".to_string(),
            }),
        )));
        script.extend(frame_bytes(Frame::method(
            0,
            MethodArguments::ConnectionTune(conn_methods::Tune {
                channel_max: 2047,
                frame_max: 131_072,
                heartbeat: 60,
            }),
        )));
        script.extend(frame_bytes(Frame::method(
            0,
            MethodArguments::ConnectionOpenOk(conn_methods::OpenOk::default()),
        )));

        let transport: Box<dyn Transport> = Box::new(ScriptedTransport::new(script));
        let params = ConnectParams::builder().hostname("localhost").build().unwrap();
        let connection = Arc::new(Connection::new(transport, params));
        connection.connect().await.unwrap();
        assert!(connection.is_opened().await);
    }

    #[tokio::test]
    async fn server_close_before_open_surfaces_the_mapped_error() {
        let mut script = Vec::new();
        script.extend(frame_bytes(Frame::method(
            0,
            MethodArguments::ConnectionClose(conn_methods::Close {
                reply_code: 404,
                reply_text: "NOT_FOUND".to_string(),
                class_id: 10,
                failure_method_id: 40,
            }),
        )));

        let transport: Box<dyn Transport> = Box::new(ScriptedTransport::new(script));
        let params = ConnectParams::builder().hostname("localhost").build().unwrap();
        let connection = Arc::new(Connection::new(transport, params));
        let result = connection.connect().await;
        assert_eq!(result.unwrap_err().reply_code(), Some(404));
    }
}
