use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::config::{Config, DEFAULT_PROGRAM};
use crate::{PlaybackType, UnknownPlaybackType};

/// Outcome of a successful parse
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
  Help,
  Run(Config),
}

/// Malformed command lines, each one ends the process with a failure status
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ArgsError {
  #[error("Incomplete parameter: {0}")]
  Incomplete(String),
  #[error("Not a valid port: {0}")]
  InvalidPort(String),
  #[error("Unknown parameter: {0}")]
  Unknown(String),
}

/// Name shown in the usage text, derived from how the binary was invoked
pub fn program_name() -> String {
  let stem = std::env::args_os()
    .next()
    .and_then(|arg0| {
      Path::new(&arg0)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
    })
    .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

  format!("{stem}{}", std::env::consts::EXE_SUFFIX)
}

pub fn usage(program: &str) -> String {
  format!(
    "{program} [OPTIONS] [PROGRAMS...]
  Where OPTIONS may be any of the following
    -h,--help                 This text
    -t,--type <video|music>   Add playback type to list of types that is desired
    -m,--icon-music <ICON>    Use ICON as the icon for music playback
    -v,--icon-video <ICON>    Use ICON as the icon for video playback
    -d,--listen     <PORT>    Instead of printing to the console, listen
                              for TCP connections on <PORT>, printing media
                              information, then closing the connection

  And PROGRAMS is a list of executables to listen to media events from (defaults to {DEFAULT_PROGRAM})
"
  )
}

pub fn write_usage(program: &str, writer: &mut impl Write) -> io::Result<()> {
  writer.write_all(usage(program).as_bytes())
}

/// Parses everything after the program name.
///
/// `--help` wins as soon as it is reached, regardless of what follows it. An
/// unknown `--type` value is handed to `on_warning` and parsing carries on;
/// every other mistake stops with an [ArgsError].
pub fn parse<I, S, F>(args: I, mut on_warning: F) -> Result<Command, ArgsError>
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
  F: FnMut(UnknownPlaybackType),
{
  let mut args = args.into_iter().map(Into::into);
  let mut config = Config::new();
  let mut programs = Vec::new();
  let mut playback_types = Vec::new();

  while let Some(arg) = args.next() {
    if !arg.starts_with('-') {
      programs.push(arg);
      continue;
    }

    match arg.as_str() {
      "-h" | "--help" => return Ok(Command::Help),
      "-d" | "--listen" => {
        let value = value_of(arg, &mut args)?;

        match value.parse::<u16>() {
          Ok(port) => config = config.set_listen_port(port),
          Err(_) => return Err(ArgsError::InvalidPort(value)),
        }
      }
      "-m" | "--icon-music" => config = config.set_music_icon(value_of(arg, &mut args)?),
      "-v" | "--icon-video" => config = config.set_video_icon(value_of(arg, &mut args)?),
      "-t" | "--type" => match value_of(arg, &mut args)?.parse::<PlaybackType>() {
        Ok(playback_type) => playback_types.push(playback_type),
        Err(warning) => on_warning(warning),
      },
      _ => return Err(ArgsError::Unknown(arg)),
    }
  }

  let config = config
    .set_programs(programs)
    .set_playback_types(playback_types);

  Ok(Command::Run(config))
}

fn value_of(flag: String, args: &mut impl Iterator<Item = String>) -> Result<String, ArgsError> {
  args.next().ok_or(ArgsError::Incomplete(flag))
}
