//! Waveform representation and WAV file I/O.

use std::io::Cursor;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while decoding or writing audio.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to decode WAV payload: {0}")]
    DecodeFailed(#[from] hound::Error),

    #[error("WAV payload contains no audio channels")]
    NoChannels,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// An in-memory mono waveform with its native sample rate.
///
/// Transient by design: decoded from a provider response, written to the
/// output file, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Mono samples in the range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz, as reported by the provider.
    pub sample_rate: u32,
}

impl Waveform {
    /// Create a waveform from raw samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Duration of the waveform in seconds.
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Decode a WAV payload as returned by a model server.
    ///
    /// Accepts 16-bit PCM and 32-bit float; multi-channel input is downmixed
    /// to mono by averaging.
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self, AudioError> {
        let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();

        if spec.channels == 0 {
            return Err(AudioError::NoChannels);
        }

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => {
                reader.samples::<f32>().collect::<Result<_, _>>()?
            }
            hound::SampleFormat::Int => {
                // Normalize by the full scale of the source bit depth.
                let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()?
            }
        };

        let channels = spec.channels as usize;
        let samples = if channels == 1 {
            interleaved
        } else {
            interleaved
                .chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
                .collect()
        };

        Ok(Self::new(samples, spec.sample_rate))
    }

    /// Write the waveform to `path` as 16-bit PCM mono WAV, creating parent
    /// directories if they do not exist.
    pub fn write_wav(&self, path: &Path) -> Result<(), AudioError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            // f32 [-1.0, 1.0] to i16 full scale.
            let s16 = (sample * i16::MAX as f32).clamp(i16::MIN as f32, i16::MAX as f32) as i16;
            writer.write_sample(s16)?;
        }
        writer.finalize()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn wav_bytes(samples: &[f32], sample_rate: u32, channels: u16) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_mono_float_payload() {
        let bytes = wav_bytes(&[0.0, 0.5, -0.5], 24000, 1);

        let waveform = Waveform::from_wav_bytes(&bytes).unwrap();

        assert_eq!(waveform.sample_rate, 24000);
        assert_eq!(waveform.samples.len(), 3);
        assert!((waveform.samples[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_decode_downmixes_stereo() {
        // One stereo frame: L=1.0, R=0.0 averages to 0.5.
        let bytes = wav_bytes(&[1.0, 0.0], 24000, 2);

        let waveform = Waveform::from_wav_bytes(&bytes).unwrap();

        assert_eq!(waveform.samples.len(), 1);
        assert!((waveform.samples[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = Waveform::from_wav_bytes(b"not a wav file");
        assert!(matches!(result, Err(AudioError::DecodeFailed(_))));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("out.wav");

        let waveform = Waveform::new(vec![0.0; 240], 24000);
        waveform.write_wav(&path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_written_file_is_valid_wav() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.wav");

        let waveform = Waveform::new(vec![0.25; 100], 22050);
        waveform.write_wav(&path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 22050);
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.len(), 100);
    }

    #[test]
    fn test_duration_seconds() {
        let waveform = Waveform::new(vec![0.0; 24000], 24000);
        assert!((waveform.duration_seconds() - 1.0).abs() < 1e-6);
    }
}
