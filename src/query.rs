use log::debug;

use crate::config::Config;
use crate::{MediaSnapshot, PlaybackType, Result};

/// Registry of media sessions kept by the operating system
pub trait MediaSource {
  type Session: MediaSession;

  /// The session the OS considers current, `None` when nothing is playing
  fn current_session(&self) -> Result<Option<Self::Session>>;
}

/// Handle to one application's playback context
pub trait MediaSession {
  /// Identifier of the application that owns this session
  fn source_app_id(&self) -> Result<String>;

  fn media_properties(&self) -> Result<Option<MediaSnapshot>>;
}

/// Filters the current session through [Config] and formats it
#[derive(Debug)]
pub struct NowPlaying<S> {
  source: S,
  config: Config,
}

impl<S: MediaSource> NowPlaying<S> {
  pub fn new(source: S, config: Config) -> Self {
    Self { source, config }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Runs a fresh query, failures of any kind come back as an empty string
  pub fn query(&self) -> String {
    match self.try_query() {
      Ok(Some(line)) => line,
      Ok(None) => String::new(),
      Err(err) => {
        debug!("media query failed: {err}");
        String::new()
      }
    }
  }

  fn try_query(&self) -> Result<Option<String>> {
    let Some(session) = self.source.current_session()? else {
      debug!("no active media session");
      return Ok(None);
    };

    let app_id = session.source_app_id()?.to_lowercase();

    if !self.config.is_target(&app_id) {
      debug!("skipping session owned by {app_id}");
      return Ok(None);
    }

    let Some(snapshot) = session.media_properties()? else {
      return Ok(None);
    };

    let Some(playback_type) = snapshot.playback_type else {
      debug!("{app_id} did not report a playback type");
      return Ok(None);
    };

    if !self.config.wants(playback_type) {
      debug!("skipping {playback_type} playback from {app_id}");
      return Ok(None);
    }

    Ok(Some(format_snapshot(&snapshot, &self.config)))
  }
}

/// Renders a snapshot the way it is printed, unknown playback types render as nothing
pub fn format_snapshot(snapshot: &MediaSnapshot, config: &Config) -> String {
  let title = snapshot.title.as_deref().unwrap_or_default();
  let artist = snapshot.artist.as_deref().unwrap_or_default();

  match snapshot.playback_type {
    Some(PlaybackType::Music) => format!("{} {title} by {artist}", config.music_icon),
    Some(PlaybackType::Video) => format!("{} {title}", config.video_icon),
    _ => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use anyhow::anyhow;

  use super::*;
  use crate::config::DEFAULT_PROGRAM;

  #[derive(Clone)]
  struct FakeSession {
    app_id: String,
    snapshot: Option<MediaSnapshot>,
    fetched: Cell<bool>,
  }

  impl FakeSession {
    fn new(app_id: &str, snapshot: Option<MediaSnapshot>) -> Self {
      Self {
        app_id: app_id.into(),
        snapshot,
        fetched: Cell::new(false),
      }
    }
  }

  impl MediaSession for &FakeSession {
    fn source_app_id(&self) -> Result<String> {
      Ok(self.app_id.clone())
    }

    fn media_properties(&self) -> Result<Option<MediaSnapshot>> {
      self.fetched.set(true);
      Ok(self.snapshot.clone())
    }
  }

  struct FakeSource<'a>(Option<&'a FakeSession>);

  impl<'a> MediaSource for FakeSource<'a> {
    type Session = &'a FakeSession;

    fn current_session(&self) -> Result<Option<Self::Session>> {
      Ok(self.0)
    }
  }

  struct FailingSource;

  impl MediaSource for FailingSource {
    type Session = &'static FakeSession;

    fn current_session(&self) -> Result<Option<Self::Session>> {
      Err(anyhow!("registry unavailable").into())
    }
  }

  fn query(session: Option<&FakeSession>, config: Config) -> String {
    NowPlaying::new(FakeSource(session), config).query()
  }

  #[test]
  fn formats_music() {
    let session = FakeSession::new(DEFAULT_PROGRAM, Some(MediaSnapshot::music("Song", "Artist")));

    assert_eq!(query(Some(&session), Config::default()), "🎵 Song by Artist");
  }

  #[test]
  fn formats_video() {
    let session = FakeSession::new(DEFAULT_PROGRAM, Some(MediaSnapshot::video("Clip")));

    assert_eq!(query(Some(&session), Config::default()), "🎬 Clip");
  }

  #[test]
  fn custom_icons() {
    let session = FakeSession::new(DEFAULT_PROGRAM, Some(MediaSnapshot::music("Song", "Artist")));
    let config = Config::new().set_music_icon("M").set_video_icon("V");

    assert_eq!(query(Some(&session), config), "M Song by Artist");
  }

  #[test]
  fn no_session_is_empty() {
    assert_eq!(query(None, Config::default()), "");
  }

  #[test]
  fn source_app_id_is_lowercased() {
    let session = FakeSession::new("VLC.EXE", Some(MediaSnapshot::video("Clip")));
    let config = Config::new().set_programs(vec!["vlc.exe".into()]);

    assert_eq!(query(Some(&session), config), "🎬 Clip");
  }

  #[test]
  fn other_application_is_empty_without_fetching() {
    let session = FakeSession::new("vlc.exe", Some(MediaSnapshot::video("Clip")));

    assert_eq!(query(Some(&session), Config::default()), "");
    assert!(!session.fetched.get());
  }

  #[test]
  fn mixed_case_program_never_matches() {
    let session = FakeSession::new("vlc.exe", Some(MediaSnapshot::video("Clip")));
    let config = Config::new().set_programs(vec!["VLC.exe".into()]);

    assert_eq!(query(Some(&session), config), "");
  }

  #[test]
  fn unwanted_playback_type_is_empty() {
    let session = FakeSession::new(DEFAULT_PROGRAM, Some(MediaSnapshot::video("Clip")));
    let config = Config::new().set_playback_types(vec![PlaybackType::Music]);

    assert_eq!(query(Some(&session), config), "");
  }

  #[test]
  fn missing_properties_or_type_is_empty() {
    let no_props = FakeSession::new(DEFAULT_PROGRAM, None);
    let no_type = FakeSession::new(
      DEFAULT_PROGRAM,
      Some(MediaSnapshot {
        playback_type: None,
        title: Some("Song".into()),
        artist: Some("Artist".into()),
      }),
    );

    assert_eq!(query(Some(&no_props), Config::default()), "");
    assert_eq!(query(Some(&no_type), Config::default()), "");
  }

  #[test]
  fn unknown_type_is_empty_even_when_wanted() {
    let snapshot = MediaSnapshot {
      playback_type: Some(PlaybackType::Image),
      title: Some("Picture".into()),
      artist: None,
    };
    let session = FakeSession::new(DEFAULT_PROGRAM, Some(snapshot));
    let config = Config::new().set_playback_types(vec![PlaybackType::Image]);

    assert_eq!(query(Some(&session), config), "");
  }

  #[test]
  fn missing_fields_render_empty() {
    let snapshot = MediaSnapshot {
      playback_type: Some(PlaybackType::Music),
      title: Some("Song".into()),
      artist: None,
    };

    assert_eq!(format_snapshot(&snapshot, &Config::default()), "🎵 Song by ");
  }

  #[test]
  fn source_errors_degrade_to_empty() {
    assert_eq!(NowPlaying::new(FailingSource, Config::default()).query(), "");
  }
}
