//! Synthesis dispatcher implementation.

use std::path::PathBuf;

use thiserror::Error;

use crate::audio::AudioError;
use crate::cli::Device;
use crate::provider::{GenerateRequest, Provider, ProviderError, ProviderKind};

/// Errors that can occur during synthesis.
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Audio prompt file not found: {0}")]
    AudioPromptNotFound(PathBuf),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Provider returned an empty waveform")]
    EmptyWaveform,

    #[error("Provider reported an invalid sample rate of 0 Hz")]
    InvalidSampleRate,

    #[error("Audio output error: {0}")]
    Audio(#[from] AudioError),
}

/// The compute backend a model is loaded onto. Chosen once per process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComputeBackend {
    /// Hardware-accelerated path (CUDA).
    Accelerated,
    /// General-purpose CPU path.
    Fallback,
}

impl ComputeBackend {
    /// The device string passed to the model loader.
    pub fn device_str(&self) -> &'static str {
        match self {
            ComputeBackend::Accelerated => "cuda",
            ComputeBackend::Fallback => "cpu",
        }
    }
}

/// A validated request for one synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Non-empty, trimmed text to synthesize.
    pub text: String,
    /// Language code; forwarded to the multilingual model only.
    pub language: String,
    /// Optional reference audio for voice cloning.
    pub audio_prompt: Option<PathBuf>,
    /// Destination audio file.
    pub output: PathBuf,
}

/// Summary of a completed synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisReport {
    pub output: PathBuf,
    pub sample_rate: u32,
    pub samples: usize,
    pub duration_seconds: f32,
    pub backend: ComputeBackend,
}

/// The synthesis dispatcher.
///
/// Owns the one load + one generate sequence: resolves the compute backend,
/// loads the model, invokes generation, and writes the waveform out. Every
/// failure is terminal; the caller reports it and exits.
pub struct Dispatcher<P: Provider> {
    provider: P,
    kind: ProviderKind,
}

impl<P: Provider> Dispatcher<P> {
    /// Create a new dispatcher for the given provider.
    pub fn new(provider: P, kind: ProviderKind) -> Self {
        Self { provider, kind }
    }

    /// Resolve the compute backend from the device policy.
    ///
    /// Explicit choices are honored as-is; `auto` probes the provider's
    /// health endpoint and uses the accelerated path iff the server reports
    /// CUDA available.
    pub fn resolve_backend(&self, device: Device) -> Result<ComputeBackend, SynthesisError> {
        let backend = match device {
            Device::Cuda => ComputeBackend::Accelerated,
            Device::Cpu => ComputeBackend::Fallback,
            Device::Auto => {
                let health = self.provider.health()?;
                if health.cuda_available {
                    ComputeBackend::Accelerated
                } else {
                    ComputeBackend::Fallback
                }
            }
        };

        Ok(backend)
    }

    /// Run one synthesis: load, generate, write.
    pub fn synthesize(
        &self,
        request: &SynthesisRequest,
        device: Device,
    ) -> Result<SynthesisReport, SynthesisError> {
        // Re-check the prompt at dispatch time; it must exist when the
        // provider goes to read it.
        if let Some(prompt) = &request.audio_prompt
            && !prompt.exists()
        {
            return Err(SynthesisError::AudioPromptNotFound(prompt.clone()));
        }

        let backend = self.resolve_backend(device)?;

        println!(
            "Loading {} model on {}...",
            self.kind.name(),
            backend.device_str()
        );
        self.provider.load(backend.device_str())?;

        let mut generate = GenerateRequest::new(&request.text);
        if self.kind.is_multilingual() {
            generate = generate.with_language(&request.language);
        }
        if let Some(prompt) = &request.audio_prompt {
            generate = generate.with_audio_prompt(prompt.clone());
        }

        println!("Generating speech...");
        let waveform = self.provider.generate(&generate)?;

        if waveform.is_empty() {
            return Err(SynthesisError::EmptyWaveform);
        }
        if waveform.sample_rate == 0 {
            return Err(SynthesisError::InvalidSampleRate);
        }

        waveform.write_wav(&request.output)?;

        Ok(SynthesisReport {
            output: request.output.clone(),
            sample_rate: waveform.sample_rate,
            samples: waveform.samples.len(),
            duration_seconds: waveform.duration_seconds(),
            backend,
        })
    }
}
