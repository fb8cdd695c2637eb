pub mod output_stream;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device available")]
    NoDevice,

    #[error("unable to query the output config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported sample format {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),

    #[error("unable to build the output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("unable to start the output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("unable to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },

    #[error("{0} contains no samples")]
    Empty(PathBuf),
}

/// A sound that can be fired and forgotten.
pub trait Sound {
    fn is_loaded(&self) -> bool;
    fn play(&self);
}

/// The pop effect. Stays empty when the sound is muted or failed to load,
/// in which case playing it does nothing.
pub struct PopSound(Option<Box<dyn Sound>>);

impl PopSound {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn new(sound: impl Sound + 'static) -> Self {
        Self(Some(Box::new(sound)))
    }

    /// Opens the default output device and decodes `path` for it.
    /// Every failure is logged and leaves the handle empty.
    pub fn load(path: &Path) -> Self {
        match output_stream::StreamSound::open(path) {
            Ok(sound) => {
                info!("Loaded pop sound from {}.", path.display());
                Self::new(sound)
            }
            Err(e) => {
                warn!("Playing without sound: {e}");
                Self::empty()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.0.as_ref().is_some_and(|s| s.is_loaded())
    }

    /// Plays the sound if there is one. Returns whether it was started.
    pub fn try_play(&self) -> bool {
        match &self.0 {
            Some(sound) if sound.is_loaded() => {
                sound.play();
                true
            }
            _ => false,
        }
    }
}
