//! Example: Convert a WAV file to onda format and back
//!
//! Run with: cargo run --example convert_audio input.wav output.onda

use std::env;
use std::path::Path;

use reonda::audio;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <input-wav> <output-onda>", args[0]);
        std::process::exit(1);
    }

    let input_path = Path::new(&args[1]);
    let output_path = Path::new(&args[2]);

    println!("Reading {}...", input_path.display());
    let wav = audio::read_wav_file(input_path)?;
    println!("  Sample rate: {} Hz", wav.sample_rate);
    println!("  Channels: {}", wav.channels);
    println!("  Duration: {:.2}s", wav.duration_secs());

    println!("\nEncoding to onda...");
    let stats = reonda::encode_to_file(&wav, output_path)?;

    // Compare against the raw 16-bit PCM payload, not the WAV container.
    let pcm_size = wav.samples.len() * 2;
    let compressed_size = stats.encoded_bytes();
    let ratio = pcm_size as f64 / compressed_size as f64;

    println!("  Original PCM: {} bytes", pcm_size);
    println!("  Compressed: {} bytes", compressed_size);
    println!("  Ratio: {:.1}x", ratio);
    println!("\nWrote onda file to {}", output_path.display());

    let info = reonda::read_info(output_path)?;
    println!("\nonda Stream Info:");
    println!("  Sample rate: {} Hz", info.sample_rate);
    println!("  Block size:  {}", info.block_size);
    println!("  Frames:      {}", info.total_frames);
    println!("  Duration:    {:.2}s", info.duration_secs);
    println!("  Bitrate:     {:.1} kbps", info.avg_bitrate_kbps);

    // Decode back to WAV for verification.
    println!("\nDecoding back to WAV for verification...");
    let decoded = reonda::decode_file(output_path)?;
    let wav_out = args[2].replace(".onda", "_decoded.wav");
    audio::write_wav_file(Path::new(&wav_out), &decoded.samples, decoded.sample_rate)?;
    println!("Wrote decoded WAV to {}", wav_out);

    Ok(())
}
