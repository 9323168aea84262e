use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

pub mod args;
pub mod config;
pub mod dispatch;
pub mod listener;
pub mod platform;
pub mod query;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
#[error(transparent)]
pub enum Error {
  #[cfg(windows)]
  Platform(#[from] windows::core::Error),
  #[cfg(target_os = "linux")]
  Mpris(#[from] platform::MprisError),
  Io(#[from] std::io::Error),
  Other(#[from] anyhow::Error),
}

/// Kind of media a session reports as playing
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PlaybackType {
  #[default]
  Unknown,
  Music,
  Video,
  Image,
}

/// Returned when `--type` gets something other than `music` or `video`
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("Unknown playback type: {0}")]
pub struct UnknownPlaybackType(pub String);

impl FromStr for PlaybackType {
  type Err = UnknownPlaybackType;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "music" => Ok(Self::Music),
      "video" => Ok(Self::Video),
      _ => Err(UnknownPlaybackType(value.to_string())),
    }
  }
}

impl Display for PlaybackType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Unknown => write!(f, "unknown"),
      Self::Music => write!(f, "music"),
      Self::Video => write!(f, "video"),
      Self::Image => write!(f, "image"),
    }
  }
}

/// Media properties of the active session, fetched fresh for every query
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MediaSnapshot {
  /// What the session says it is playing, if it says anything
  pub playback_type: Option<PlaybackType>,
  /// Title of what is currently playing if available
  pub title: Option<String>,
  /// Artist of what is currently playing if available
  pub artist: Option<String>,
}

impl MediaSnapshot {
  pub fn music(title: impl Into<String>, artist: impl Into<String>) -> Self {
    Self {
      playback_type: Some(PlaybackType::Music),
      title: Some(title.into()),
      artist: Some(artist.into()),
    }
  }

  pub fn video(title: impl Into<String>) -> Self {
    Self {
      playback_type: Some(PlaybackType::Video),
      title: Some(title.into()),
      artist: None,
    }
  }
}
