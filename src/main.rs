use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info};

use bin2png::{encode_image, hexdump, output, FillMode};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Fill {
    /// Zero every pixel after the first one that runs out of input.
    Latched,
    /// Bounds-check each channel on its own.
    PerPixel,
}

impl From<Fill> for FillMode {
    fn from(fill: Fill) -> Self {
        match fill {
            Fill::Latched => FillMode::Latched,
            Fill::PerPixel => FillMode::PerPixel,
        }
    }
}

#[derive(Parser)]
#[command(about = "Store the raw bytes of any file as the RGB pixels of a square PNG.")]
struct Args {
    /// File whose bytes become pixels.
    #[arg(long)]
    file: PathBuf,

    /// Output base name; `.png` is appended.
    #[arg(long, default_value = "result")]
    output: String,

    /// How pixels past the end of the input are filled.
    #[arg(long, value_enum, default_value_t = Fill::Latched)]
    fill_mode: Fill,

    /// Print a hex dump of the produced PNG to stdout.
    #[arg(long)]
    hexdump: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // A missing or unreadable input is reported, not a crash.
    let input = match fs::read(&args.file) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("File not found or unreadable: {}: {err}", args.file.display());
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, input: &[u8]) -> Result<()> {
    let image = encode_image(input, args.fill_mode.into())
        .with_context(|| format!("failed to encode {}", args.file.display()))?;
    let bytes = image.to_bytes();

    let dest = output::png_path(&args.output);
    output::write_atomic(&dest, &bytes)
        .with_context(|| format!("failed to write {}", dest.display()))?;
    info!(
        "Saved {}x{} image ({} bytes) to {}",
        image.side(),
        image.side(),
        bytes.len(),
        dest.display()
    );

    if args.hexdump {
        println!("{}", hexdump::format(&bytes).trim_end());
    }
    Ok(())
}
