//! HTTP client for the Chatterbox model servers.

use std::path::Path;

use crate::audio::Waveform;

use super::types::{GenerateRequest, HealthResponse, LoadRequest, ProviderError};
use super::{Provider, ProviderKind};

/// HTTP-based provider client.
pub struct HttpProvider {
    base_url: String,
    client: reqwest::blocking::Client,
    kind: ProviderKind,
}

impl HttpProvider {
    /// Create a new HTTP provider client for the given model family.
    pub fn new(kind: ProviderKind, host: &str) -> Self {
        let port = kind.port();
        let base_url = format!("http://{host}:{port}");

        // No read timeout: model loading and generation routinely take
        // longer than any sensible default.
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .expect("Failed to construct HTTP client");

        Self {
            base_url,
            client,
            kind,
        }
    }

    /// Get the base URL for this provider's server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The model family this client talks to.
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Build the multipart form for a generation call: text and optional
    /// language id as fields, the audio prompt as an uploaded file part.
    fn generate_form(
        &self,
        request: &GenerateRequest,
    ) -> Result<reqwest::blocking::multipart::Form, ProviderError> {
        let mut form =
            reqwest::blocking::multipart::Form::new().text("text", request.text.clone());

        if let Some(language_id) = &request.language_id {
            form = form.text("language_id", language_id.clone());
        }

        if let Some(prompt_path) = &request.audio_prompt {
            form = form.part("audio_prompt", Self::audio_part(prompt_path)?);
        }

        Ok(form)
    }

    fn audio_part(path: &Path) -> Result<reqwest::blocking::multipart::Part, ProviderError> {
        let audio_data = std::fs::read(path)
            .map_err(|_| ProviderError::AudioPromptNotFound(path.to_path_buf()))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("prompt.wav");

        reqwest::blocking::multipart::Part::bytes(audio_data)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))
    }
}

impl Provider for HttpProvider {
    fn health(&self) -> Result<HealthResponse, ProviderError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ProviderError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::RequestFailed(format!(
                "Health check failed: {}",
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    fn load(&self, device: &str) -> Result<(), ProviderError> {
        let url = format!("{}/load", self.base_url);
        let body = LoadRequest {
            device: device.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| ProviderError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().unwrap_or_default();
            return Err(ProviderError::LoadFailed(format!("{status}: {detail}")));
        }

        Ok(())
    }

    fn generate(&self, request: &GenerateRequest) -> Result<Waveform, ProviderError> {
        let url = format!("{}/generate", self.base_url);
        let form = self.generate_form(request)?;

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| ProviderError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().unwrap_or_default();
            return Err(ProviderError::RequestFailed(format!(
                "Generation failed: {status}: {detail}"
            )));
        }

        let payload = response
            .bytes()
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(Waveform::from_wav_bytes(&payload)?)
    }
}
