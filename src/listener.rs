use std::net::{Ipv4Addr, Shutdown, SocketAddr};

use log::{debug, info};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use crate::query::{MediaSource, NowPlaying};
use crate::Result;

/// Wraps around [TcpListener], answering each connection with a single response
///
/// Examples
/// --------
///
/// ```rs
/// // Listen on every interface
/// let responder = Responder::bind_any(8080).await?;
///
/// // Or on a custom address
/// let responder = Responder::bind("127.0.0.1:8080".parse()?).await?;
///
/// // Answers connections one after another until something fails
/// responder.serve(&now_playing).await?;
/// ```
#[derive(Debug)]
pub struct Responder {
  listener: TcpListener,
}

impl Responder {
  /// Binds to 0.0.0.0 with a custom port
  pub async fn bind_any(port: u16) -> std::io::Result<Self> {
    Self::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await
  }

  /// Binds to the given address, same as calling [TcpListener::bind(addr)]
  pub async fn bind(addr: SocketAddr) -> std::io::Result<Self> {
    let listener = TcpListener::bind(addr).await?;

    info!("listening on {}", listener.local_addr()?);

    Ok(Self { listener })
  }

  pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
    self.listener.local_addr()
  }

  /// Waits for one client, writes `body` to it and closes the connection.
  ///
  /// `body` is only evaluated once a client is connected. Nothing is read from
  /// the client.
  pub async fn respond<F>(&self, body: F) -> Result<SocketAddr>
  where
    F: FnOnce() -> String,
  {
    let (mut stream, peer) = self.listener.accept().await?;
    debug!("accepted connection from {peer}");

    let body = body();
    stream.write_all(body.as_bytes()).await?;

    let stream = stream.into_std()?;

    if let Err(err) = stream.shutdown(Shutdown::Both) {
      debug!("shutdown of {peer} failed: {err}");
    }

    Ok(peer)
  }

  /// Answers connections strictly one after another, never returns `Ok`
  pub async fn serve<S: MediaSource>(&self, now_playing: &NowPlaying<S>) -> Result<()> {
    loop {
      self.respond(|| now_playing.query()).await?;
    }
  }
}

/// Binds every interface on `port` and serves [NowPlaying] until an error occurs
pub async fn listen<S: MediaSource>(port: u16, now_playing: &NowPlaying<S>) -> Result<()> {
  let responder = Responder::bind_any(port).await?;

  responder.serve(now_playing).await
}
