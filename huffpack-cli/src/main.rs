//! huffpack CLI - batch Huffman compression.
//!
//! Single-shot transforms: any failure aborts the whole operation and maps
//! to a distinct nonzero exit code.

use clap::{Parser, Subcommand};
use huffpack_codec::{CodeTable, MAGIC, header};
use huffpack_core::{BitReader, HuffPackError};
use log::{LevelFilter, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "huffpack")]
#[command(author, version, about = "Huffman byte-stream compressor")]
#[command(long_about = "
huffpack is a pure Rust Huffman compressor over a self-describing container
format: a 32-bit magic constant, the prefix tree serialized as a pre-order
bit grammar, and a payload terminated by a sentinel symbol.

Examples:
  huffpack compress notes.txt notes.hp
  huffpack decompress notes.hp notes.txt
  huffpack info notes.hp
")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Compressed output file
        output: PathBuf,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// Compressed input file
        input: PathBuf,

        /// Decompressed output file
        output: PathBuf,
    },

    /// Show container information without decoding the payload
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .expect("logger init");

    let result = match cli.command {
        Commands::Compress { input, output } => cmd_compress(&input, &output),
        Commands::Decompress { input, output } => cmd_decompress(&input, &output),
        Commands::Info { file } => cmd_info(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(exit_code(&e));
    }
}

/// One exit code per error kind, so scripts can tell failures apart.
fn exit_code(err: &HuffPackError) -> i32 {
    match err {
        HuffPackError::Io(_) => 1,
        HuffPackError::InvalidMagic { .. } => 2,
        HuffPackError::TruncatedStream { .. } | HuffPackError::CorruptedData { .. } => 3,
        HuffPackError::InvariantViolation { .. } => 4,
    }
}

fn cmd_compress(input: &PathBuf, output: &PathBuf) -> Result<(), HuffPackError> {
    let mut reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);

    let stats = huffpack_codec::compress(&mut reader, writer)?;
    info!(
        "header {} bits, payload {} bits",
        stats.header_bits, stats.payload_bits
    );

    let ratio = if stats.input_bytes > 0 {
        100.0 * stats.output_bytes as f64 / stats.input_bytes as f64
    } else {
        100.0
    };
    println!(
        "{} -> {} ({} -> {} bytes, {:.1}%)",
        input.display(),
        output.display(),
        stats.input_bytes,
        stats.output_bytes,
        ratio
    );
    Ok(())
}

fn cmd_decompress(input: &PathBuf, output: &PathBuf) -> Result<(), HuffPackError> {
    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(output)?);

    let stats = huffpack_codec::decompress(reader, &mut writer)?;
    println!(
        "{} -> {} ({} bytes)",
        input.display(),
        output.display(),
        stats.output_bytes
    );
    Ok(())
}

fn cmd_info(file: &PathBuf) -> Result<(), HuffPackError> {
    let metadata = std::fs::metadata(file)?;
    let reader = BufReader::new(File::open(file)?);
    let mut bits = BitReader::new(reader);

    let found = bits.read_bits(32)?;
    if found != MAGIC {
        return Err(HuffPackError::invalid_magic(MAGIC, found));
    }

    let root = header::deserialize(&mut bits)?;
    let codes = CodeTable::from_tree(&root);
    let lengths: Vec<u8> = codes.iter().map(|(_, code)| code.len()).collect();

    println!("File: {}", file.display());
    println!("Size: {} bytes", metadata.len());
    println!("Magic: {found:#010x}");
    println!("Header: {} bits", bits.bits_read() - 32);
    println!("Symbols: {}", root.leaf_count());
    if let (Some(min), Some(max)) = (lengths.iter().min(), lengths.iter().max()) {
        println!("Code lengths: {min}..={max} bits");
    }
    Ok(())
}
