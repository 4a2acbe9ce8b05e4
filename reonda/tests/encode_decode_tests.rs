#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use std::fs;
    use std::path::Path;

    use reonda::audio;

    /// Write a 16-bit PCM WAV with a 440 Hz sine, the same signal on every
    /// channel.
    fn write_test_wav(path: &Path, frames: usize, channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            let t = i as f64 / 44_100.0;
            let sample = (8000.0 * (2.0 * PI * 440.0 * t).sin()) as i16;
            for _ in 0..channels {
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_encode_then_decode_round_trips_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let wav_path = dir.path().join("input.wav");
        let onda_path = dir.path().join("encoded.onda");
        let out_path = dir.path().join("decoded.wav");

        write_test_wav(&wav_path, 3000, 2);

        let wav = audio::read_wav_file(&wav_path).unwrap();
        assert_eq!(wav.channels, 2);
        assert_eq!(wav.frames(), 3000);

        reonda::encode_to_file(&wav, &onda_path).unwrap();

        let decoded = reonda::decode_file(&onda_path).unwrap();
        assert_eq!(decoded.total_frames, 3000);
        assert_eq!(decoded.samples.len(), 3000);

        audio::write_wav_file(&out_path, &decoded.samples, decoded.sample_rate).unwrap();

        // The output is always mono 16-bit PCM at the source rate.
        let reader = hound::WavReader::open(&out_path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
        assert_eq!(reader.len(), 3000);

        // Both input channels carry the same sine, so the mono mix must
        // still carry it, not silence.
        let peak = decoded
            .samples
            .iter()
            .map(|&s| (s as i32).abs())
            .max()
            .unwrap();
        assert!(peak > 1000, "decoded signal is implausibly quiet: {}", peak);
    }

    #[test]
    fn test_info_reports_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let wav_path = dir.path().join("input.wav");
        let onda_path = dir.path().join("encoded.onda");

        write_test_wav(&wav_path, 44_100, 1);

        let wav = audio::read_wav_file(&wav_path).unwrap();
        reonda::encode_to_file(&wav, &onda_path).unwrap();

        let info = reonda::read_info(&onda_path).unwrap();
        assert_eq!(info.sample_rate, 44_100);
        assert_eq!(info.total_frames, 44_100);
        assert_eq!(info.block_size, 1024);
        assert!((info.duration_secs - 1.0).abs() < 1e-9);
        assert_eq!(info.file_size, fs::metadata(&onda_path).unwrap().len());
        assert!(info.avg_bitrate_kbps > 0.0);
    }

    #[test]
    fn test_encode_rejects_non_pcm16_wav() {
        let dir = tempfile::tempdir().unwrap();
        let wav_path = dir.path().join("float.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&wav_path, spec).unwrap();
        for i in 0..100 {
            writer.write_sample(i as f32 / 100.0).unwrap();
        }
        writer.finalize().unwrap();

        let err = audio::read_wav_file(&wav_path).unwrap_err();
        assert!(err.to_string().contains("16-bit"));
    }
}
