//! CLI argument definitions and input resolution.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use thiserror::Error;

/// Text-to-speech CLI for Chatterbox model servers.
#[derive(Parser, Debug)]
#[command(name = "chatterbox-cli")]
#[command(about = "Generate speech from text using Chatterbox TTS models")]
#[command(version)]
pub struct Args {
    /// Text to synthesize (use quotes for multi-word text)
    pub text: Option<String>,

    /// Read text from a file instead of the command line
    #[arg(short, long)]
    pub inputfile: Option<PathBuf>,

    /// Language code: "en" selects the standard model, anything else
    /// (e.g. "fr", "zh", "es") selects the multilingual model
    #[arg(short, long, default_value = "en")]
    pub lang: String,

    /// Output audio file path (e.g. output.wav)
    #[arg(short, long)]
    pub outputfile: PathBuf,

    /// Reference audio file used as a voice prompt for cloning
    #[arg(short = 'p', long)]
    pub audio_prompt: Option<PathBuf>,

    /// Compute device for the model server
    #[arg(long, value_enum, default_value = "auto")]
    pub device: Device,

    /// Model-server host address
    #[arg(long, default_value = "localhost")]
    pub host: String,
}

/// Compute device selection policy.
///
/// `Auto` probes the provider for accelerator availability and picks CUDA
/// when it is reported, CPU otherwise. The explicit values skip the probe;
/// `--device cpu` is the workaround for multilingual-model CUDA
/// deserialization problems seen on some systems.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Device {
    /// Use CUDA when the provider reports it available, CPU otherwise
    #[default]
    #[value(name = "auto")]
    Auto,

    /// Force CUDA
    #[value(name = "cuda")]
    Cuda,

    /// Force CPU
    #[value(name = "cpu")]
    Cpu,
}

/// Errors that can occur while resolving the text to synthesize.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("No text provided: pass text as an argument or use --inputfile/-i")]
    NoText,

    #[error("Cannot specify both a text argument and --inputfile/-i")]
    BothSources,

    #[error("No text provided for synthesis (input is empty)")]
    EmptyText,

    #[error("Input file not found: {0}")]
    InputFileNotFound(PathBuf),

    #[error("Failed to read input file {path}: {source}")]
    InputFileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Args {
    /// Resolve the text to synthesize from the positional argument or the
    /// input file. Exactly one source must be given; the result is trimmed
    /// and must be non-empty.
    pub fn resolve_text(&self) -> Result<String, InputError> {
        let raw = match (&self.text, &self.inputfile) {
            (Some(_), Some(_)) => return Err(InputError::BothSources),
            (None, None) => return Err(InputError::NoText),
            (Some(text), None) => text.clone(),
            (None, Some(path)) => {
                if !path.exists() {
                    return Err(InputError::InputFileNotFound(path.clone()));
                }
                std::fs::read_to_string(path).map_err(|source| {
                    InputError::InputFileUnreadable {
                        path: path.clone(),
                        source,
                    }
                })?
            }
        };

        let text = raw.trim();
        if text.is_empty() {
            return Err(InputError::EmptyText);
        }

        Ok(text.to_string())
    }
}
