//! The `Transport` trait: the socket-facing boundary the connection state
//! machine reads/writes through. A plain TCP implementation is always
//! available; a TLS implementation is gated behind the `tls` feature.
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::{AmqpError, AmqpResult};

/// What the connection state machine needs from a socket: connect once,
/// then alternating `send`/`recv_exact` calls on the read/handshake loop.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, bytes: &[u8]) -> AmqpResult<()>;

    /// Reads exactly `len` bytes, or times out after `read_timeout` and
    /// returns `Ok(None)` (a timeout is not a transport error: the caller
    /// uses it to count missed heartbeats).
    async fn recv_exact(&mut self, len: usize, read_timeout: Duration) -> AmqpResult<Option<Vec<u8>>>;

    fn is_connected(&self) -> bool;
}

/// A plain, unencrypted TCP transport.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    connected: bool,
}

impl TcpTransport {
    pub async fn connect(addr: SocketAddr) -> AmqpResult<Self> {
        let stream = TcpStream::connect(addr).await.map_err(AmqpError::Io)?;
        stream.set_nodelay(true).map_err(AmqpError::Io)?;
        Ok(Self {
            stream,
            connected: true,
        })
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, bytes: &[u8]) -> AmqpResult<()> {
        self.stream.write_all(bytes).await.map_err(|e| {
            self.connected = false;
            AmqpError::Io(e)
        })
    }

    async fn recv_exact(&mut self, len: usize, read_timeout: Duration) -> AmqpResult<Option<Vec<u8>>> {
        let mut buf = vec![0u8; len];
        match timeout(read_timeout, self.stream.read_exact(&mut buf)).await {
            Ok(Ok(_)) => Ok(Some(buf)),
            Ok(Err(e)) => {
                self.connected = false;
                Err(AmqpError::Io(e))
            }
            Err(_elapsed) => Ok(None),
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(feature = "tls")]
mod tls {
    use super::{AmqpError, AmqpResult, Transport};
    use async_trait::async_trait;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::time::timeout;
    use tokio_rustls::client::TlsStream;
    use tokio_rustls::rustls::pki_types::ServerName;
    use tokio_rustls::rustls::ClientConfig;
    use tokio_rustls::TlsConnector;

    /// A TLS-wrapped TCP transport, for brokers configured with `amqps://`.
    pub struct TlsTransport {
        stream: TlsStream<TcpStream>,
        connected: bool,
    }

    impl TlsTransport {
        pub async fn connect(
            addr: SocketAddr,
            server_name: &str,
            config: Arc<ClientConfig>,
        ) -> AmqpResult<Self> {
            let tcp_stream = TcpStream::connect(addr).await.map_err(AmqpError::Io)?;
            tcp_stream.set_nodelay(true).map_err(AmqpError::Io)?;
            let connector = TlsConnector::from(config);
            let domain = ServerName::try_from(server_name.to_string())
                .map_err(|_| AmqpError::ConnParams(format!("invalid TLS server name: {server_name}")))?;
            let stream = connector
                .connect(domain, tcp_stream)
                .await
                .map_err(AmqpError::Io)?;
            Ok(Self {
                stream,
                connected: true,
            })
        }
    }

    #[async_trait]
    impl Transport for TlsTransport {
        async fn send(&mut self, bytes: &[u8]) -> AmqpResult<()> {
            self.stream.write_all(bytes).await.map_err(|e| {
                self.connected = false;
                AmqpError::Io(e)
            })
        }

        async fn recv_exact(
            &mut self,
            len: usize,
            read_timeout: Duration,
        ) -> AmqpResult<Option<Vec<u8>>> {
            let mut buf = vec![0u8; len];
            match timeout(read_timeout, self.stream.read_exact(&mut buf)).await {
                Ok(Ok(_)) => Ok(Some(buf)),
                Ok(Err(e)) => {
                    self.connected = false;
                    Err(AmqpError::Io(e))
                }
                Err(_elapsed) => Ok(None),
            }
        }

        fn is_connected(&self) -> bool {
            self.connected
        }
    }
}

#[cfg(feature = "tls")]
pub use tls::TlsTransport;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// An in-memory double used by connection-level tests; not how a real
    /// broker speaks, just enough of `Transport` to drive the handshake.
    pub struct MemoryTransport {
        pub sent: Mutex<Vec<u8>>,
        pub inbound: Mutex<VecDeque<u8>>,
        pub connected: bool,
    }

    impl MemoryTransport {
        pub fn new(inbound: Vec<u8>) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                inbound: Mutex::new(inbound.into()),
                connected: true,
            }
        }
    }

    #[async_trait]
    impl Transport for MemoryTransport {
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
            self.connected
        }
    }

    #[tokio::test]
    async fn memory_transport_reports_none_on_short_input() {
        let mut t = MemoryTransport::new(vec![1, 2, 3]);
        assert_eq!(
            t.recv_exact(7, Duration::from_millis(10)).await.unwrap(),
            None
        );
        assert_eq!(
            t.recv_exact(3, Duration::from_millis(10)).await.unwrap(),
            Some(vec![1, 2, 3])
        );
    }
}
