//! TTS providers: opaque pretrained models behind a load-and-generate contract.
//!
//! Two Chatterbox model servers exist, one per model family. The standard
//! model handles English only; the multilingual model takes an explicit
//! language id. Both are consumed through the [`Provider`] trait so tests
//! can substitute a mock.

mod client;
mod types;

pub use client::HttpProvider;
pub use types::{GenerateRequest, HealthResponse, LoadRequest, ProviderError};

use crate::audio::Waveform;

/// The two pretrained model families.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    /// English-only Chatterbox model.
    Standard,
    /// Multilingual Chatterbox model; generation takes a language id.
    Multilingual,
}

impl ProviderKind {
    /// Select the provider for a language code: "en" maps to the standard
    /// model, everything else to the multilingual one.
    pub fn for_language(lang: &str) -> Self {
        if lang == "en" {
            ProviderKind::Standard
        } else {
            ProviderKind::Multilingual
        }
    }

    /// Returns the model-server port for this provider.
    pub fn port(&self) -> u16 {
        match self {
            ProviderKind::Standard => 4123,
            ProviderKind::Multilingual => 4124,
        }
    }

    /// Returns the human-readable name of the model.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Standard => "English TTS",
            ProviderKind::Multilingual => "Multilingual TTS",
        }
    }

    pub fn is_multilingual(&self) -> bool {
        matches!(self, ProviderKind::Multilingual)
    }
}

/// Trait for model-server communication.
///
/// Abstracts the HTTP calls to the Chatterbox servers so the dispatcher can
/// be tested against a mock implementation.
#[cfg_attr(test, mockall::automock)]
pub trait Provider: Send + Sync {
    /// Check server health; reports accelerator availability.
    fn health(&self) -> Result<HealthResponse, ProviderError>;

    /// Load the pretrained model onto the given device ("cuda" or "cpu").
    ///
    /// Expensive and fallible: missing weights, incompatible serialized
    /// tensors, or an unavailable device all surface here.
    fn load(&self, device: &str) -> Result<(), ProviderError>;

    /// Generate a waveform for the request.
    ///
    /// # Returns
    /// The waveform together with the model's native sample rate.
    fn generate(&self, request: &GenerateRequest) -> Result<Waveform, ProviderError>;
}

/// Create a provider client for the given model family.
pub fn create_provider(kind: ProviderKind, host: &str) -> HttpProvider {
    HttpProvider::new(kind, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Language-to-provider mapping tests
    // ===========================================

    #[test]
    fn test_english_selects_standard() {
        assert_eq!(ProviderKind::for_language("en"), ProviderKind::Standard);
    }

    #[test]
    fn test_other_languages_select_multilingual() {
        for lang in ["fr", "zh", "es", "de", "EN"] {
            assert_eq!(
                ProviderKind::for_language(lang),
                ProviderKind::Multilingual,
                "language {lang:?} should map to the multilingual model"
            );
        }
    }

    #[test]
    fn test_provider_ports() {
        assert_eq!(ProviderKind::Standard.port(), 4123);
        assert_eq!(ProviderKind::Multilingual.port(), 4124);
    }

    #[test]
    fn test_create_provider_standard() {
        let provider = create_provider(ProviderKind::Standard, "localhost");
        assert_eq!(provider.base_url(), "http://localhost:4123");
    }

    #[test]
    fn test_create_provider_multilingual() {
        let provider = create_provider(ProviderKind::Multilingual, "localhost");
        assert_eq!(provider.base_url(), "http://localhost:4124");
    }

    // ===========================================
    // Mock provider tests
    // ===========================================

    #[test]
    fn test_mock_provider_health() {
        let mut mock = MockProvider::new();

        mock.expect_health().times(1).returning(|| {
            Ok(HealthResponse {
                status: "healthy".to_string(),
                model: "chatterbox".to_string(),
                cuda_available: true,
                gpu: Some("NVIDIA RTX 4090".to_string()),
                device: "cuda:0".to_string(),
            })
        });

        let health = mock.health().unwrap();
        assert!(health.cuda_available);
    }

    #[test]
    fn test_mock_provider_load_failure() {
        let mut mock = MockProvider::new();

        mock.expect_load()
            .with(mockall::predicate::eq("cuda"))
            .times(1)
            .returning(|_| {
                Err(ProviderError::LoadFailed(
                    "incompatible serialized tensors".to_string(),
                ))
            });

        let result = mock.load("cuda");
        assert!(matches!(result, Err(ProviderError::LoadFailed(_))));
    }

    #[test]
    fn test_mock_provider_generate() {
        let mut mock = MockProvider::new();

        mock.expect_generate()
            .withf(|req| req.text == "Hello world" && req.language_id.is_none())
            .times(1)
            .returning(|_| Ok(Waveform::new(vec![0.0; 240], 24000)));

        let request = GenerateRequest::new("Hello world");
        let waveform = mock.generate(&request).unwrap();

        assert_eq!(waveform.sample_rate, 24000);
        assert_eq!(waveform.samples.len(), 240);
    }
}
