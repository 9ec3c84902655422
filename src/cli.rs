use crate::config::{HuffConfig, ReportFormat};
use crate::error::HuffError;
use crate::pipeline;
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = "Huffman coding byte-stream compressor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compresses a file
    Compress {
        /// Input file to compress
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output file name
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Number of threads used for frequency counting (default: all available cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Statistics format [text, json]
        #[arg(short, long, default_value = "text")]
        report: ReportFormat,
    },
    /// Decompresses a file
    Decompress {
        /// Input file to decompress
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output file name
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Prints the code table of a file as CSV
    Codes {
        /// File to derive codes from
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Draws the code tree of a file
    Tree {
        /// File to derive the tree from
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Describes a compressed file without decoding it
    Inspect {
        /// Compressed file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output format [text, json]
        #[arg(short, long, default_value = "text")]
        report: ReportFormat,
    },
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, HuffError> {
    serde_json::to_string_pretty(value).map_err(|e| HuffError::Io(e.into()))
}

pub fn run() -> Result<(), HuffError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Compress { input, output, threads, report } => {
            let config = HuffConfig {
                threads: threads.unwrap_or_else(num_cpus::get),
                report: *report,
                ..Default::default()
            };

            let data = fs::read(input)?;
            let start = Instant::now();
            let (container, stats) = pipeline::compress_buffer(&data, &config)?;
            let duration = start.elapsed();
            fs::write(output, &container)?;

            match config.report {
                ReportFormat::Json => println!("{}", to_json(&stats)?),
                ReportFormat::Text => {
                    println!("Compressed {} to {}", input.display(), output.display());
                    println!("  Original Size:    {} bytes", stats.original_size);
                    println!("  Encoded Bits:     {}", stats.encoded_bits);
                    println!("  Compressed Size:  {} bytes", stats.compressed_size);
                    println!("  Space Saved:      {:.2}%", stats.space_saved);
                    println!("  Elapsed Time:     {:.2?}", duration);
                }
            }
        }
        Commands::Decompress { input, output } => {
            let compressed = fs::read(input)?;
            let start = Instant::now();
            let data = pipeline::decompress_buffer(&compressed)?;
            let duration = start.elapsed();
            fs::write(output, &data)?;

            println!("Decompressed {} to {}", input.display(), output.display());
            println!("  Recovered:    {} bytes", data.len());
            println!("  Elapsed Time: {:.2?}", duration);
        }
        Commands::Codes { input } => {
            let data = fs::read(input)?;
            let (_, tree) = pipeline::build_tree(&data, &HuffConfig::default())?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            tree.codes().write_csv(&mut out)?;
            out.flush()?;
        }
        Commands::Tree { input } => {
            let data = fs::read(input)?;
            let (_, tree) = pipeline::build_tree(&data, &HuffConfig::default())?;
            print!("{}", tree.render());
        }
        Commands::Inspect { input, report } => {
            let compressed = fs::read(input)?;
            let info = pipeline::inspect(&mut &compressed[..])?;

            match report {
                ReportFormat::Json => println!("{}", to_json(&info)?),
                ReportFormat::Text => {
                    println!("{}", input.display());
                    println!("  Distinct Symbols: {}", info.table_size);
                    println!("  Original Size:    {} bytes", info.original_size);
                    println!("  Encoded Bits:     {}", info.encoded_bits);
                    println!("  Padding Bits:     {}", info.padding_bits);
                    println!("  Compressed Size:  {} bytes", info.compressed_size);
                    println!("  Longest Code:     {} bits", info.max_code_length);
                    println!("  Space Saved:      {:.2}%", info.space_saved);
                }
            }
        }
    }

    Ok(())
}
