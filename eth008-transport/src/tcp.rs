//! TCP transport

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use crate::{error::*, Transport};

/// TCP transport for ETH008 modules
pub struct TcpTransport {
    addr: String,
    port: u16,
    socket_addr: Option<SocketAddr>,
    stream: Option<TcpStream>,
    connect_timeout: Duration,
}

impl TcpTransport {
    /// Create new TCP transport
    pub fn new(addr: impl Into<String>, port: u16) -> Self {
        Self {
            addr: addr.into(),
            port,
            socket_addr: None,
            stream: None,
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Resolve address to SocketAddr
    async fn resolve_addr(&mut self) -> Result<SocketAddr> {
        if let Some(addr) = self.socket_addr {
            return Ok(addr);
        }

        let addr_str = format!("{}:{}", self.addr, self.port);

        let addrs: Vec<SocketAddr> = tokio::net::lookup_host(&addr_str)
            .await
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", addr_str, e)))?
            .collect();

        let addr = addrs
            .first()
            .ok_or_else(|| Error::InvalidAddress(format!("No addresses found for {}", addr_str)))?;

        self.socket_addr = Some(*addr);
        Ok(*addr)
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        let addr = self.resolve_addr().await?;

        debug!("Connecting to {}...", addr);

        let stream = timeout(self.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| Error::ConnectionTimeout)?
            .map_err(Error::Io)?;

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        debug!("Connected to {}", addr);

        self.stream = Some(stream);
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            debug!("Disconnecting from {}...", self.remote_addr());

            // Graceful shutdown
            let _ = stream.shutdown().await;
        }

        self.socket_addr = None;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn send(&mut self, data: &[u8], wait: Duration) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        trace!("Sending {} bytes: {:02X?}", data.len(), &data[..data.len().min(16)]);

        // write_all either delivers the whole frame or fails; a partial
        // write never succeeds silently.
        timeout(wait, async {
            stream.write_all(data).await?;
            stream.flush().await?;
            Ok::<_, Error>(())
        })
        .await
        .map_err(|_| Error::SendTimeout)??;

        Ok(())
    }

    async fn receive_exact(&mut self, len: usize, wait: Duration) -> Result<BytesMut> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        let mut buf = vec![0u8; len];
        let mut count = 0;

        timeout(wait, async {
            while count < len {
                let n = stream.read(&mut buf[count..]).await?;

                if n == 0 {
                    // Peer closed the stream before the full response
                    return Err(Error::ShortRead {
                        expected: len,
                        actual: count,
                    });
                }

                count += n;
            }

            Ok::<_, Error>(())
        })
        .await
        .map_err(|_| Error::ReadTimeout)??;

        trace!("Received {} bytes: {:02X?}", len, &buf[..len.min(16)]);

        Ok(BytesMut::from(&buf[..]))
    }

    fn remote_addr(&self) -> String {
        self.socket_addr
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| format!("{}:{}", self.addr, self.port))
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("TCP transport dropped while still connected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    const WAIT: Duration = Duration::from_millis(200);

    async fn local_listener() -> (TcpListener, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    #[tokio::test]
    async fn test_tcp_transport_create() {
        let transport = TcpTransport::new("192.168.1.100", 17494);
        assert!(!transport.is_connected());
    }

    #[tokio::test]
    async fn test_tcp_transport_invalid_address() {
        let mut transport = TcpTransport::new("invalid..address", 17494)
            .with_connect_timeout(Duration::from_millis(100));

        let result = transport.connect().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_and_disconnect() {
        let (listener, addr) = local_listener().await;
        tokio::spawn(async move {
            let _ = listener.accept().await;
        });

        let mut transport = TcpTransport::new(addr.ip().to_string(), addr.port());
        transport.connect().await.unwrap();
        assert!(transport.is_connected());

        transport.disconnect().await.unwrap();
        assert!(!transport.is_connected());
    }

    #[tokio::test]
    async fn test_send_and_receive_exact() {
        let (listener, addr) = local_listener().await;
        tokio::spawn(async move {
            let (mut peer, _) = listener.accept().await.unwrap();
            let mut req = [0u8; 1];
            peer.read_exact(&mut req).await.unwrap();
            assert_eq!(req, [0x10]);
            peer.write_all(&[19, 4, 2]).await.unwrap();
        });

        let mut transport = TcpTransport::new(addr.ip().to_string(), addr.port());
        transport.connect().await.unwrap();

        transport.send(&[0x10], WAIT).await.unwrap();
        let response = transport.receive_exact(3, WAIT).await.unwrap();
        assert_eq!(response.as_ref(), &[19, 4, 2]);

        transport.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_receive_timeout_on_silent_peer() {
        let (listener, addr) = local_listener().await;
        tokio::spawn(async move {
            // Accept and hold the connection open without ever writing
            let (_peer, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let mut transport = TcpTransport::new(addr.ip().to_string(), addr.port());
        transport.connect().await.unwrap();

        let result = transport.receive_exact(1, WAIT).await;
        assert!(matches!(result, Err(Error::ReadTimeout)));

        transport.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_short_read_on_peer_close() {
        let (listener, addr) = local_listener().await;
        tokio::spawn(async move {
            let (mut peer, _) = listener.accept().await.unwrap();
            peer.write_all(&[19]).await.unwrap();
            // Drop closes the socket with two response bytes outstanding
        });

        let mut transport = TcpTransport::new(addr.ip().to_string(), addr.port());
        transport.connect().await.unwrap();

        let result = transport.receive_exact(3, WAIT).await;
        assert!(matches!(
            result,
            Err(Error::ShortRead {
                expected: 3,
                actual: 1
            })
        ));

        transport.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_send_when_not_connected() {
        let mut transport = TcpTransport::new("127.0.0.1", 17494);
        let result = transport.send(&[0x24], WAIT).await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }
}
