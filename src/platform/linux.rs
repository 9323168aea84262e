#![cfg(target_os = "linux")]

use mpris::{FindingError, Metadata, Player, PlayerFinder};

use crate::query::{MediaSession, MediaSource};
use crate::{MediaSnapshot, PlaybackType, Result};

const BUS_NAME_PREFIX: &str = "org.mpris.MediaPlayer2.";

#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum MprisError {
  FindingError(#[from] mpris::FindingError),
  DBusError(#[from] mpris::DBusError),
}

/// Reads the active MPRIS player over D-Bus
pub struct MprisMediaSource {
  finder: PlayerFinder,
}

impl std::fmt::Debug for MprisMediaSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MprisMediaSource").finish_non_exhaustive()
  }
}

impl MprisMediaSource {
  pub fn create() -> Result<Self> {
    let finder = PlayerFinder::new().map_err(MprisError::from)?;

    Ok(Self { finder })
  }
}

impl MediaSource for MprisMediaSource {
  type Session = Player;

  fn current_session(&self) -> Result<Option<Player>> {
    match self.finder.find_active() {
      Ok(player) => Ok(Some(player)),
      Err(FindingError::NoPlayerFound) => Ok(None),
      Err(err) => Err(MprisError::from(err).into()),
    }
  }
}

impl MediaSession for Player {
  fn source_app_id(&self) -> Result<String> {
    Ok(player_name(self.bus_name()).to_string())
  }

  fn media_properties(&self) -> Result<Option<MediaSnapshot>> {
    let metadata = self.get_metadata().map_err(MprisError::from)?;

    Ok(Some(snapshot(&metadata)))
  }
}

/// `org.mpris.MediaPlayer2.vlc.instance1234` -> `vlc`
fn player_name(bus_name: &str) -> &str {
  let name = bus_name.strip_prefix(BUS_NAME_PREFIX).unwrap_or(bus_name);

  name.split('.').next().unwrap_or(name)
}

fn snapshot(metadata: &Metadata) -> MediaSnapshot {
  let artists = metadata.artists().unwrap_or_default();

  track_snapshot(metadata.title(), &artists)
}

// MPRIS has no notion of playback type, tracks with artists count as music
fn track_snapshot(title: Option<&str>, artists: &[&str]) -> MediaSnapshot {
  let playback_type = match artists.is_empty() {
    true => PlaybackType::Video,
    false => PlaybackType::Music,
  };

  MediaSnapshot {
    playback_type: Some(playback_type),
    title: title.map(Into::into),
    artist: (!artists.is_empty()).then(|| artists.join(", ")),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn player_names() {
    assert_eq!(player_name("org.mpris.MediaPlayer2.spotify"), "spotify");
    assert_eq!(player_name("org.mpris.MediaPlayer2.vlc.instance1234"), "vlc");
    assert_eq!(player_name("spotify"), "spotify");
  }

  #[test]
  fn tracks_with_artists_are_music() {
    let snapshot = track_snapshot(Some("Song"), &["First", "Second"]);

    assert_eq!(
      snapshot,
      MediaSnapshot {
        playback_type: Some(PlaybackType::Music),
        title: Some("Song".into()),
        artist: Some("First, Second".into()),
      }
    );
  }

  #[test]
  fn tracks_without_artists_are_video() {
    let snapshot = track_snapshot(Some("Clip"), &[]);

    assert_eq!(snapshot, MediaSnapshot::video("Clip"));
  }

  #[test]
  fn missing_title_stays_missing() {
    let snapshot = track_snapshot(None, &["Artist"]);

    assert_eq!(snapshot.playback_type, Some(PlaybackType::Music));
    assert_eq!(snapshot.title, None);
    assert_eq!(snapshot.artist.as_deref(), Some("Artist"));
  }
}
