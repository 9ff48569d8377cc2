use crate::codec::Variant;
use crate::config::{FrameConfig, DEFAULT_PACKET_SIZE};
use crate::error::Error;
use crate::pipeline::{self, FrameStats};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = "Frame byte streams with Consistent Overhead Byte Stuffing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Splits input into packets and writes zero-delimited encoded frames
    Encode {
        /// Input file (default: stdin)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Stuffing variant [cobs, cobsr]
        #[arg(short, long, default_value = "cobs")]
        variant: Variant,

        /// Largest plain packet carried by one frame
        #[arg(short, long, default_value_t = DEFAULT_PACKET_SIZE)]
        packet_size: usize,

        /// Number of threads to use (default: all available cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Show a progress bar on stderr
        #[arg(long)]
        progress: bool,
    },
    /// Decodes zero-delimited frames back into the original bytes
    Decode {
        /// Input file (default: stdin)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Stuffing variant [cobs, cobsr]
        #[arg(short, long, default_value = "cobs")]
        variant: Variant,

        /// Number of threads to use (default: all available cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Show a progress bar on stderr
        #[arg(long)]
        progress: bool,
    },
}

pub fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Encode { input, output, variant, packet_size, threads, progress } => {
            let config = FrameConfig::default()
                .with_variant(*variant)
                .with_packet_size(*packet_size)
                .with_threads(threads.unwrap_or_else(num_cpus::get))
                .with_progress(*progress);

            let mut reader = open_input(input.as_ref())?;
            let mut writer = open_output(output.as_ref())?;

            let start = Instant::now();
            let stats = pipeline::encode_stream(&mut reader, &mut writer, &config)?;
            report("Encoding", &stats, start);
        }
        Commands::Decode { input, output, variant, threads, progress } => {
            let config = FrameConfig::default()
                .with_variant(*variant)
                .with_threads(threads.unwrap_or_else(num_cpus::get))
                .with_progress(*progress);

            let mut reader = open_input(input.as_ref())?;
            let mut writer = open_output(output.as_ref())?;

            let start = Instant::now();
            let stats = pipeline::decode_stream(&mut reader, &mut writer, &config)?;
            report("Decoding", &stats, start);
        }
    }

    Ok(())
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn Read>, Error> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    })
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>, Error> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}

// Data may be going to stdout, so the summary goes to stderr.
fn report(action: &str, stats: &FrameStats, start: Instant) {
    eprintln!("{} successful!", action);
    eprintln!("  Frames:        {}", stats.frames);
    eprintln!("  Plain Size:    {} bytes", stats.plain_size);
    eprintln!("  Encoded Size:  {} bytes", stats.encoded_size);
    eprintln!("  Overhead:      {} bytes", stats.overhead());
    eprintln!("  Elapsed Time:  {:.2?}", start.elapsed());
}
