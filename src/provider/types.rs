//! Provider request/response types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::AudioError;

/// Errors that can occur when talking to a model server.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model load failed: {0}")]
    LoadFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Audio prompt file not found: {0}")]
    AudioPromptNotFound(PathBuf),

    #[error("Audio payload error: {0}")]
    Audio(#[from] AudioError),
}

/// Health check response from a model server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub cuda_available: bool,
    #[serde(default)]
    pub gpu: Option<String>,
    pub device: String,
}

/// Request to load the pretrained model onto an explicit device.
///
/// The device is passed through the loader's own configuration surface;
/// the server never has to guess or intercept deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRequest {
    pub device: String,
}

/// Parameters for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub text: String,
    /// Forwarded only to the multilingual model.
    pub language_id: Option<String>,
    /// Reference audio for voice cloning, uploaded alongside the text.
    pub audio_prompt: Option<PathBuf>,
}

impl GenerateRequest {
    /// Create a new generation request.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_id: None,
            audio_prompt: None,
        }
    }

    /// Set the language id (multilingual model only).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language_id = Some(language.into());
        self
    }

    /// Set the voice-prompt audio path.
    pub fn with_audio_prompt(mut self, path: PathBuf) -> Self {
        self.audio_prompt = Some(path);
        self
    }
}
