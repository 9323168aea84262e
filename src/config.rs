use crate::PlaybackType;

pub const DEFAULT_MUSIC_ICON: &str = "🎵";
pub const DEFAULT_VIDEO_ICON: &str = "🎬";

/// Application identifier used when no programs are given
#[cfg(windows)]
pub const DEFAULT_PROGRAM: &str = "spotify.exe";

/// Application identifier used when no programs are given
#[cfg(not(windows))]
pub const DEFAULT_PROGRAM: &str = "spotify";

pub const DEFAULT_PLAYBACK_TYPES: [PlaybackType; 2] = [PlaybackType::Music, PlaybackType::Video];

/// What to do with the query result
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
  /// Print once and exit
  Once,
  /// Answer every TCP connection on this port
  Listen(u16),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
  /// Application identifiers whose sessions are reported, compared as given
  pub programs: Vec<String>,
  pub playback_types: Vec<PlaybackType>,
  pub music_icon: String,
  pub video_icon: String,
  pub listen_port: Option<u16>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      programs: vec![DEFAULT_PROGRAM.to_string()],
      playback_types: DEFAULT_PLAYBACK_TYPES.to_vec(),
      music_icon: DEFAULT_MUSIC_ICON.to_string(),
      video_icon: DEFAULT_VIDEO_ICON.to_string(),
      listen_port: None,
    }
  }
}

impl Config {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replaces the default programs, an empty list keeps them
  pub fn set_programs(self, programs: Vec<String>) -> Self {
    if programs.is_empty() {
      return self;
    }

    Self { programs, ..self }
  }

  /// Replaces the default playback types, an empty list keeps them
  pub fn set_playback_types(self, playback_types: Vec<PlaybackType>) -> Self {
    if playback_types.is_empty() {
      return self;
    }

    Self {
      playback_types,
      ..self
    }
  }

  pub fn set_music_icon(self, music_icon: impl Into<String>) -> Self {
    Self {
      music_icon: music_icon.into(),
      ..self
    }
  }

  pub fn set_video_icon(self, video_icon: impl Into<String>) -> Self {
    Self {
      video_icon: video_icon.into(),
      ..self
    }
  }

  pub fn set_listen_port(self, port: u16) -> Self {
    Self {
      listen_port: Some(port),
      ..self
    }
  }

  pub fn mode(&self) -> Mode {
    match self.listen_port {
      Some(port) => Mode::Listen(port),
      None => Mode::Once,
    }
  }

  /// `app_id` is expected to be lower-cased already
  pub fn is_target(&self, app_id: &str) -> bool {
    self.programs.iter().any(|program| program == app_id)
  }

  pub fn wants(&self, playback_type: PlaybackType) -> bool {
    self.playback_types.contains(&playback_type)
  }

  /// Configured programs that can never match a lower-cased identifier
  pub fn mixed_case_programs(&self) -> impl Iterator<Item = &str> {
    self
      .programs
      .iter()
      .filter(|program| program.chars().any(char::is_uppercase))
      .map(String::as_str)
  }
}
