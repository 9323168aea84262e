#![cfg(windows)]

use log::{debug, warn};
use windows::Media::Control::{
  GlobalSystemMediaTransportControlsSession, GlobalSystemMediaTransportControlsSessionManager,
};
use windows::Media::MediaPlaybackType;
use windows::Win32::System::Console::{SetConsoleCP, SetConsoleOutputCP};

use crate::query::{MediaSession, MediaSource};
use crate::{MediaSnapshot, PlaybackType, Result};

const CP_UTF8: u32 = 65001;

/// Switches the console to UTF-8 so icons survive being printed
pub fn setup_console() {
  // SAFETY: both calls only change process-wide console settings
  unsafe {
    let _ = SetConsoleOutputCP(CP_UTF8);
    let _ = SetConsoleCP(CP_UTF8);
  }
}

/// Reads the current session from Global System Media Transport Controls
#[derive(Debug)]
pub struct WindowsMediaSource {
  manager: GlobalSystemMediaTransportControlsSessionManager,
}

impl WindowsMediaSource {
  /// Blocks until the session manager is available
  pub fn create() -> Result<Self> {
    let manager = GlobalSystemMediaTransportControlsSessionManager::RequestAsync()?.get()?;

    Ok(Self { manager })
  }
}

impl MediaSource for WindowsMediaSource {
  type Session = GlobalSystemMediaTransportControlsSession;

  fn current_session(&self) -> Result<Option<Self::Session>> {
    match self.manager.GetCurrentSession() {
      Ok(session) => Ok(Some(session)),
      Err(err) if is_null_result(&err) => {
        debug!("no current session");
        Ok(None)
      }
      Err(err) => {
        warn!("failed to read the current session: {err}");
        Ok(None)
      }
    }
  }
}

// the projection reports a null session as an error carrying a success code
fn is_null_result(err: &windows::core::Error) -> bool {
  err.code().is_ok()
}

impl MediaSession for GlobalSystemMediaTransportControlsSession {
  fn source_app_id(&self) -> Result<String> {
    Ok(self.SourceAppUserModelId()?.to_string_lossy())
  }

  fn media_properties(&self) -> Result<Option<MediaSnapshot>> {
    let props = self.TryGetMediaPropertiesAsync()?.get()?;

    let playback_type = props
      .PlaybackType()
      .and_then(|playback_type| playback_type.Value())
      .ok()
      .map(PlaybackType::from);

    Ok(Some(MediaSnapshot {
      playback_type,
      title: props.Title().ok().map(|s| s.to_string_lossy()),
      artist: props.Artist().ok().map(|s| s.to_string_lossy()),
    }))
  }
}

impl From<MediaPlaybackType> for PlaybackType {
  fn from(value: MediaPlaybackType) -> Self {
    match value {
      MediaPlaybackType::Music => Self::Music,
      MediaPlaybackType::Video => Self::Video,
      MediaPlaybackType::Image => Self::Image,
      _ => Self::Unknown,
    }
  }
}
