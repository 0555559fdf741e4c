//! WAV serialization of the rendered sample stream.
//!
//! The output container is fixed by convention: mono, 16-bit signed PCM,
//! canonical 44-byte RIFF/WAVE/fmt/data header. Serialization goes through
//! `hound`, which produces exactly that layout for an integer mono spec.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::{ChiptoneError, Result};

/// Write `samples` to `path` as a mono 16-bit PCM WAV file.
///
/// Any I/O or encoding failure is surfaced as a terminal error carrying the
/// target path; the file is not silently left half-written without a report.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[i16], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let to_error = |source| ChiptoneError::wav_write(path.display().to_string(), source);

    let mut writer = WavWriter::create(path, spec).map_err(to_error)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(to_error)?;
    }
    writer.finalize().map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn test_header_fields_round_trip() {
        let path = std::env::temp_dir().join("chiptone_header_test.wav");
        let samples: Vec<i16> = vec![9830, -9830, 9830, -9830, 0];
        write_wav(&path, &samples, 44_100).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();

        // Canonical 44-byte header followed by the raw payload
        assert_eq!(bytes.len(), 44 + samples.len() * 2);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(&bytes[36..40], b"data");

        let file_size = u32_at(&bytes, 4);
        let data_size = u32_at(&bytes, 40);
        assert_eq!(data_size, samples.len() as u32 * 2);
        assert_eq!(file_size, 36 + data_size);

        assert_eq!(u32_at(&bytes, 16), 16); // fmt chunk size
        assert_eq!(u16_at(&bytes, 20), 1); // PCM
        assert_eq!(u16_at(&bytes, 22), 1); // mono
        assert_eq!(u32_at(&bytes, 24), 44_100); // sample rate
        assert_eq!(u32_at(&bytes, 28), 44_100 * 2); // byte rate
        assert_eq!(u16_at(&bytes, 32), 2); // block align
        assert_eq!(u16_at(&bytes, 34), 16); // bits per sample
    }

    #[test]
    fn test_payload_preserves_sample_order() {
        let path = std::env::temp_dir().join("chiptone_payload_test.wav");
        let samples: Vec<i16> = vec![1, -2, 3, i16::MAX, i16::MIN];
        write_wav(&path, &samples, 8_000).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let payload: Vec<i16> = bytes[44..]
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        assert_eq!(payload, samples);
    }

    #[test]
    fn test_write_to_invalid_path_reports_error() {
        let result = write_wav("/nonexistent-dir/out.wav", &[0i16], 44_100);
        assert!(matches!(result, Err(ChiptoneError::WavWrite { .. })));
    }
}
