//! chatterbox-cli: Text-to-speech CLI front-end.
//!
//! This crate provides a command-line interface for speech synthesis using
//! Chatterbox model servers (standard English and multilingual). Model
//! loading, generation, and voice-cloning conditioning all happen on the
//! server; this crate handles argument validation, provider and device
//! selection, and WAV output.

pub mod audio;
pub mod cli;
pub mod engine;
pub mod provider;
