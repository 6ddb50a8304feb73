// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use log::info;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;

/// A duplex byte stream a [`Connector`] can produce.
pub trait Connection: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> Connection for T {}

/// User-supplied replacement for the plain TCP connection step, the hook
/// to route connections through proxies or tunnels of any kind.
pub trait Connector: Send + Sync {
    /// Open a duplex stream to the given server address.
    fn connect<'a>(
        &'a self,
        addr: SocketAddr,
    ) -> Pin<Box<dyn Future<Output = io::Result<Box<dyn Connection>>> + Send + 'a>>;
}

/// How to reach a server.
#[derive(Clone)]
pub enum ServerAddr {
    /// Direct TCP connection.
    Tcp { address: SocketAddr },
    /// Connection proxied over SOCKS5.
    #[cfg(feature = "proxy")]
    Proxied { address: SocketAddr, proxy: String },
    /// Connection opened by a user-supplied [`Connector`].
    Custom {
        address: SocketAddr,
        connector: Arc<dyn Connector>,
    },
}

impl fmt::Debug for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp { address } => f.debug_struct("Tcp").field("address", address).finish(),
            #[cfg(feature = "proxy")]
            Self::Proxied { address, proxy } => f
                .debug_struct("Proxied")
                .field("address", address)
                .field("proxy", proxy)
                .finish(),
            Self::Custom { address, .. } => f
                .debug_struct("Custom")
                .field("address", address)
                .finish_non_exhaustive(),
        }
    }
}

/// An established connection to a server.
pub enum NetStream {
    Tcp(TcpStream),
    #[cfg(feature = "proxy")]
    ProxySocks5(tokio_socks::tcp::Socks5Stream<TcpStream>),
    Custom(
        tokio::io::ReadHalf<Box<dyn Connection>>,
        tokio::io::WriteHalf<Box<dyn Connection>>,
    ),
}

impl NetStream {
    pub(crate) async fn connect(addr: &ServerAddr) -> io::Result<Self> {
        info!("connecting to {addr:?}...");
        match addr {
            ServerAddr::Tcp { address } => Ok(NetStream::Tcp(TcpStream::connect(address).await?)),
            #[cfg(feature = "proxy")]
            ServerAddr::Proxied { address, proxy } => {
                Self::connect_proxied(*address, proxy).await
            }
            ServerAddr::Custom { address, connector } => {
                let stream = connector.connect(*address).await?;
                let (reader, writer) = tokio::io::split(stream);
                Ok(NetStream::Custom(reader, writer))
            }
        }
    }

    #[cfg(feature = "proxy")]
    async fn connect_proxied(addr: SocketAddr, proxy_url: &str) -> io::Result<Self> {
        use std::io::ErrorKind;

        let proxy = url::Url::parse(proxy_url)
            .map_err(|err| io::Error::new(ErrorKind::InvalidData, err))?;
        if proxy.scheme() != "socks5" {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("proxy scheme not supported: {}", proxy.scheme()),
            ));
        }

        let host = proxy
            .host_str()
            .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "proxy host missing from url"))?;
        let port = proxy
            .port()
            .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "proxy port missing from url"))?;
        let username = proxy.username();
        let password = proxy.password().unwrap_or("");

        let stream = if username.is_empty() {
            tokio_socks::tcp::Socks5Stream::connect((host, port), addr).await
        } else {
            tokio_socks::tcp::Socks5Stream::connect_with_password(
                (host, port),
                addr,
                username,
                password,
            )
            .await
        }
        .map_err(|err| io::Error::new(ErrorKind::ConnectionAborted, err))?;

        Ok(NetStream::ProxySocks5(stream))
    }

    pub(crate) fn split(&mut self) -> (Reader<'_>, Writer<'_>) {
        match self {
            Self::Tcp(stream) => {
                let (reader, writer) = stream.split();
                (Reader::Tcp(reader), Writer::Tcp(writer))
            }
            #[cfg(feature = "proxy")]
            Self::ProxySocks5(stream) => {
                let (reader, writer) = stream.split();
                (Reader::Tcp(reader), Writer::Tcp(writer))
            }
            Self::Custom(reader, writer) => (Reader::Custom(reader), Writer::Custom(writer)),
        }
    }
}

/// The read half of a [`NetStream`].
pub(crate) enum Reader<'a> {
    Tcp(tokio::net::tcp::ReadHalf<'a>),
    Custom(&'a mut tokio::io::ReadHalf<Box<dyn Connection>>),
}

impl AsyncRead for Reader<'_> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match &mut *self {
            Reader::Tcp(reader) => Pin::new(reader).poll_read(cx, buf),
            Reader::Custom(reader) => Pin::new(&mut **reader).poll_read(cx, buf),
        }
    }
}

/// The write half of a [`NetStream`].
pub(crate) enum Writer<'a> {
    Tcp(tokio::net::tcp::WriteHalf<'a>),
    Custom(&'a mut tokio::io::WriteHalf<Box<dyn Connection>>),
}

impl AsyncWrite for Writer<'_> {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match &mut *self {
            Writer::Tcp(writer) => Pin::new(writer).poll_write(cx, buf),
            Writer::Custom(writer) => Pin::new(&mut **writer).poll_write(cx, buf),
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            Writer::Tcp(writer) => Pin::new(writer).poll_flush(cx),
            Writer::Custom(writer) => Pin::new(&mut **writer).poll_flush(cx),
        }
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            Writer::Tcp(writer) => Pin::new(writer).poll_shutdown(cx),
            Writer::Custom(writer) => Pin::new(&mut **writer).poll_shutdown(cx),
        }
    }
}
