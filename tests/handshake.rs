//! End-to-end exercises of the connection state machine against a scripted
//! in-memory transport, standing in for a real broker's handshake traffic.
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use amqp_core::connection::Connection;
use amqp_core::error::AmqpResult;
use amqp_core::frame::Frame;
use amqp_core::methods::channel as channel_methods;
use amqp_core::methods::connection as conn_methods;
use amqp_core::methods::MethodArguments;
use amqp_core::params::ConnectParams;
use amqp_core::router::MethodHandler;
use amqp_core::transport::Transport;
use amqp_core::types::{FieldTable, FRAME_END};

struct ScriptedTransport {
    inbound: Mutex<VecDeque<u8>>,
    sent: Mutex<Vec<u8>>,
}

impl ScriptedTransport {
    fn new(inbound: Vec<u8>) -> Self {
        Self {
            inbound: Mutex::new(inbound.into()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&mut self, bytes: &[u8]) -> AmqpResult<()> {
        self.sent.lock().unwrap().extend_from_slice(bytes);
        Ok(())
    }

    async fn recv_exact(&mut self, len: usize, _read_timeout: Duration) -> AmqpResult<Option<Vec<u8>>> {
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
async fn full_handshake_opens_the_connection() {
    let mut script = Vec::new();
    script.extend(frame_bytes(Frame::method(
        0,
        MethodArguments::ConnectionStart(conn_methods::Start {
            version_major: 0,
            version_minor: 9,
            server_properties: FieldTable::new(),
            mechanisms: "PLAIN AMQPLAIN".to_string(),
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
    let params = ConnectParams::builder()
        .hostname("localhost")
        .vhost("/tests")
        .build()
        .unwrap();
    let connection = Arc::new(Connection::new(transport, params));
    connection.connect().await.unwrap();
    assert!(connection.is_opened().await);
}

#[tokio::test]
async fn server_initiated_close_surfaces_as_a_mapped_reply_error() {
    let mut script = Vec::new();
    script.extend(frame_bytes(Frame::method(
        0,
        MethodArguments::ConnectionClose(conn_methods::Close {
            reply_code: 403,
            reply_text: "ACCESS_REFUSED".to_string(),
            class_id: 10,
            failure_method_id: 40,
        }),
    )));

    let transport: Box<dyn Transport> = Box::new(ScriptedTransport::new(script));
    let params = ConnectParams::builder().hostname("localhost").build().unwrap();
    let connection = Arc::new(Connection::new(transport, params));
    let error = connection.connect().await.unwrap_err();
    assert_eq!(error.reply_code(), Some(403));
    assert!(!connection.is_opened().await);
}

struct CountingHandler(Arc<AtomicUsize>);

#[async_trait]
impl MethodHandler for CountingHandler {
    async fn handle(&self, _arguments: MethodArguments) -> AmqpResult<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn frames_after_the_handshake_keep_being_serviced() {
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
    // Arrives only after the handshake has already opened the connection.
    script.extend(frame_bytes(Frame::method(
        1,
        MethodArguments::ChannelOpenOk(channel_methods::OpenOk),
    )));

    let transport: Box<dyn Transport> = Box::new(ScriptedTransport::new(script));
    let params = ConnectParams::builder().hostname("localhost").build().unwrap();
    let mut connection = Connection::new(transport, params);
    let count = Arc::new(AtomicUsize::new(0));
    connection.register_method_route(
        1,
        channel_methods::CLASS_ID,
        channel_methods::OpenOk::METHOD_ID,
        Box::new(CountingHandler(count.clone())),
    );
    let connection = Arc::new(connection);

    connection.connect().await.unwrap();
    assert!(connection.is_opened().await);

    for _ in 0..50 {
        if count.load(Ordering::SeqCst) == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(
        count.load(Ordering::SeqCst),
        1,
        "channel.open-ok frame after the handshake was never serviced"
    );
}
