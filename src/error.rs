//! Error types for color mapping and voice playback.

use thiserror::Error;

/// Result type for chroma_fm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while mapping colors or driving the audio host.
#[derive(Debug, Error)]
pub enum Error {
    /// Hue outside `[0, 360)`.
    #[error("hue {hue} is outside [0, 360)")]
    HueOutOfRange {
        /// The rejected hue.
        hue: f32,
    },

    /// Lightness outside `[50, 100]`.
    #[error("lightness {lightness} is outside [50, 100]")]
    LightnessOutOfRange {
        /// The rejected lightness.
        lightness: f32,
    },

    /// Model key not present in the registry.
    #[error("unknown model '{key}' (expected one of: messiaen, kandinsky)")]
    UnknownModel {
        /// The key that failed to resolve.
        key: String,
    },

    /// Swatch name not recognised.
    #[error("unknown swatch '{name}'")]
    UnknownSwatch {
        /// The name that failed to resolve.
        name: String,
    },

    /// The audio host cannot render (no device, stream died, ...).
    #[error("audio unavailable: {message}")]
    AudioUnavailable {
        /// Host-provided reason.
        message: String,
    },

    /// WAV encoding error.
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an audio-unavailable error.
    pub fn audio_unavailable(message: impl Into<String>) -> Self {
        Self::AudioUnavailable {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_messages_name_the_value() {
        let err = Error::HueOutOfRange { hue: 400.0 };
        assert!(err.to_string().contains("400"));

        let err = Error::LightnessOutOfRange { lightness: 12.5 };
        assert!(err.to_string().contains("12.5"));
    }

    #[test]
    fn audio_unavailable_helper() {
        let err = Error::audio_unavailable("no default output device");
        assert!(err.to_string().contains("no default output device"));
    }
}
