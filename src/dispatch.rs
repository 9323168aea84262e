use std::io::{self, Write};

use tokio::runtime::Builder;

use crate::config::Mode;
use crate::listener;
use crate::query::{MediaSource, NowPlaying};
use crate::Result;

/// Prints the query result once, or serves it over TCP when a port is configured.
///
/// Failures of the listener are written to `out` and are not an error of the
/// dispatch itself. Only a failing `out` is.
pub fn dispatch<S, W>(now_playing: &NowPlaying<S>, out: &mut W) -> io::Result<()>
where
  S: MediaSource,
  W: Write,
{
  match now_playing.config().mode() {
    Mode::Once => writeln!(out, "{}", now_playing.query()),
    Mode::Listen(port) => {
      writeln!(out, "Listening for requests on port: {port}")?;
      out.flush()?;

      if let Err(err) = serve_blocking(port, now_playing) {
        writeln!(out, "{err}")?;
      }

      Ok(())
    }
  }
}

fn serve_blocking<S: MediaSource>(port: u16, now_playing: &NowPlaying<S>) -> Result<()> {
  let runtime = Builder::new_current_thread().enable_io().build()?;

  runtime.block_on(listener::listen(port, now_playing))
}
