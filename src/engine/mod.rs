//! Synthesis dispatcher.
//!
//! This module owns the one piece of conditional logic the tool has: pick a
//! provider by language, pick a compute backend, load, generate once, and
//! hand the waveform to the audio writer.

mod dispatch;

pub use dispatch::{
    ComputeBackend, Dispatcher, SynthesisError, SynthesisReport, SynthesisRequest,
};
