use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reonda::audio;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reonda")]
#[command(version = "0.1.0")]
#[command(about = "onda audio format converter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a WAV file to onda format
    Encode {
        /// Input WAV file (16-bit PCM, mono or stereo)
        input: PathBuf,
        /// Output onda file
        output: PathBuf,
    },
    /// Decode an onda file to WAV
    Decode {
        /// Input onda file
        input: PathBuf,
        /// Output WAV file
        output: PathBuf,
    },
    /// Show information about an onda file
    Info {
        /// Input onda file
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { input, output } => {
            encode(&input, &output)?;
        }
        Commands::Decode { input, output } => {
            decode(&input, &output)?;
        }
        Commands::Info { input, json } => {
            info(&input, json)?;
        }
    }

    Ok(())
}

fn encode(input: &PathBuf, output: &PathBuf) -> Result<()> {
    println!("Reading {}...", input.display());

    let wav = audio::read_wav_file(input)?;

    println!("  Sample rate: {} Hz", wav.sample_rate);
    println!("  Channels: {}", wav.channels);
    println!("  Duration: {:.2}s", wav.duration_secs());

    println!("Encoding to onda...");

    let stats = reonda::encode_to_file(&wav, output)?;

    // Ratio against the raw 16-bit PCM payload, not the WAV container.
    let pcm_size = wav.samples.len() * 2;
    let compressed_size = stats.encoded_bytes();
    let ratio = pcm_size as f64 / compressed_size as f64;

    println!("Done!");
    println!("  Output: {}", output.display());
    println!(
        "  Size: {} bytes ({:.1}x compression)",
        compressed_size, ratio
    );

    Ok(())
}

fn decode(input: &PathBuf, output: &PathBuf) -> Result<()> {
    println!("Reading {}...", input.display());

    let stream_info = reonda::read_info(input)?;

    println!("  Sample rate: {} Hz", stream_info.sample_rate);
    println!("  Frames: {}", stream_info.total_frames);
    println!("  Duration: {:.2}s", stream_info.duration_secs);

    println!("Decoding...");

    let decoded = reonda::decode_file(input)?;
    if decoded.frames_decoded != decoded.total_frames as u64 {
        println!(
            "  Note: stream carried {} frames, header declared {}",
            decoded.frames_decoded, decoded.total_frames
        );
    }

    println!("Writing WAV...");

    audio::write_wav_file(output, &decoded.samples, decoded.sample_rate)?;

    println!("Done!");
    println!("  Output: {}", output.display());

    Ok(())
}

fn info(input: &PathBuf, json: bool) -> Result<()> {
    let stream_info = reonda::read_info(input)?;

    if json {
        let json_str = serde_json::to_string_pretty(&stream_info)
            .context("Failed to serialize stream info")?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("onda Audio Stream");
    println!("───────────────────────────────");
    println!("  Sample rate: {} Hz", stream_info.sample_rate);
    println!("  Block size:  {}", stream_info.block_size);
    println!("  Frames:      {}", stream_info.total_frames);
    println!("  Duration:    {:.2}s", stream_info.duration_secs);
    println!("  File size:   {} bytes", stream_info.file_size);
    println!("  Bitrate:     {:.1} kbps", stream_info.avg_bitrate_kbps);

    Ok(())
}
