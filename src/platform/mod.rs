#[cfg(windows)]
pub use self::windows::*;

#[cfg(target_os = "linux")]
pub use self::linux::*;

#[cfg(not(any(windows, target_os = "linux")))]
pub use self::unsupported::*;

#[cfg(windows)]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub type SystemMediaSource = MprisMediaSource;

#[cfg(windows)]
pub type SystemMediaSource = WindowsMediaSource;

#[cfg(not(any(windows, target_os = "linux")))]
pub type SystemMediaSource = UnsupportedMediaSource;

/// Console output is already UTF-8 outside of Windows
#[cfg(not(windows))]
pub fn setup_console() {}

#[cfg(not(any(windows, target_os = "linux")))]
mod unsupported {
  use anyhow::anyhow;

  use crate::query::{MediaSession, MediaSource};
  use crate::{MediaSnapshot, Result};

  #[derive(Debug)]
  pub struct UnsupportedMediaSource;

  /// Never constructed
  #[derive(Debug)]
  pub enum NoSession {}

  impl UnsupportedMediaSource {
    pub fn create() -> Result<Self> {
      Err(anyhow!("media sessions are not supported on {}", std::env::consts::OS).into())
    }
  }

  impl MediaSource for UnsupportedMediaSource {
    type Session = NoSession;

    fn current_session(&self) -> Result<Option<NoSession>> {
      Ok(None)
    }
  }

  impl MediaSession for NoSession {
    fn source_app_id(&self) -> Result<String> {
      match *self {}
    }

    fn media_properties(&self) -> Result<Option<MediaSnapshot>> {
      match *self {}
    }
  }
}
