//! zlibx-cli - Command-line interface for the ZLibX decompression engine
//!
//! A command-line tool for extracting raw block streams, chunked MSZIP
//! regions and LZSS-packed data, and for inspecting chunk layouts.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;
use zlibx::{inflate_bytes, lzss, ChunkHeader, InflateReader, MszipReader};

#[derive(Parser)]
#[command(name = "zlibx-cli")]
#[command(about = "A CLI tool for ZLibX, MSZIP and LZSS stream extraction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompress a raw DEFLATE-family block stream
    Inflate {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Stop after this many decompressed bytes instead of at the final
        /// block
        #[arg(short, long)]
        length: Option<u64>,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a chunked MSZIP region
    Mszip {
        /// Input archive file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Decompressed byte count to extract
        #[arg(short, long)]
        length: u64,

        /// Byte offset of the chunk region inside the input file
        #[arg(short, long, default_value_t = 0)]
        offset: u64,

        /// Decompressed bytes to discard before extraction starts
        #[arg(short, long, default_value_t = 0)]
        discard: u64,

        /// Per-chunk reserve byte count of the archive format
        #[arg(short, long, default_value_t = 0)]
        reserve: usize,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Compress a file with the LZSS codec
    LzssPack {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress an LZSS-packed file
    LzssUnpack {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Walk the chunk headers of an MSZIP region and print the layout
    Info {
        /// Input archive file
        input: PathBuf,

        /// Byte offset of the chunk region inside the input file
        #[arg(short, long, default_value_t = 0)]
        offset: u64,

        /// Per-chunk reserve byte count of the archive format
        #[arg(short, long, default_value_t = 0)]
        reserve: usize,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inflate {
            input,
            output,
            length,
            force,
        } => inflate_file(&input, &output, length, force, cli.verbose, cli.quiet),
        Commands::Mszip {
            input,
            output,
            length,
            offset,
            discard,
            reserve,
            force,
        } => mszip_file(
            &input,
            &output,
            length,
            offset,
            discard,
            reserve,
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::LzssPack {
            input,
            output,
            force,
        } => lzss_file(&input, &output, force, true, cli.quiet),
        Commands::LzssUnpack {
            input,
            output,
            force,
        } => lzss_file(&input, &output, force, false, cli.quiet),
        Commands::Info {
            input,
            offset,
            reserve,
        } => show_chunk_info(&input, offset, reserve),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn check_paths(
    input: &PathBuf,
    output: &PathBuf,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }
    Ok(())
}

fn extraction_progress(quiet: bool, input_size: usize) -> Option<ProgressBar> {
    if !quiet && input_size > 1024 * 1024 {
        let pb = ProgressBar::new(2);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Extracting...");
        Some(pb)
    } else {
        None
    }
}

fn report(quiet: bool, input_size: usize, output_size: usize, elapsed: std::time::Duration) {
    if !quiet {
        println!("✓ Extraction successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        println!("  Time:   {:.2?}", elapsed);
    }
}

fn inflate_file(
    input: &PathBuf,
    output: &PathBuf,
    length: Option<u64>,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;
    if verbose {
        println!("Inflating '{}' to '{}'", input.display(), output.display());
    }

    let start_time = Instant::now();
    let compressed = fs::read(input)?;
    let progress = extraction_progress(quiet, compressed.len());

    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let decompressed = match length {
        Some(length) => {
            let mut reader = InflateReader::new(std::io::Cursor::new(&compressed), length);
            let mut out = Vec::new();
            reader.read_to_end(&mut out)?;
            out
        }
        None => inflate_bytes(&compressed).map_err(|e| format!("Decompression failed: {}", e))?,
    };

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Extraction complete");
    }

    fs::write(output, &decompressed)?;
    report(quiet, compressed.len(), decompressed.len(), start_time.elapsed());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn mszip_file(
    input: &PathBuf,
    output: &PathBuf,
    length: u64,
    offset: u64,
    discard: u64,
    reserve: usize,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;
    if verbose {
        println!(
            "Extracting {} bytes from '{}' (region offset {}, discard {})",
            length,
            input.display(),
            offset,
            discard
        );
    }

    let start_time = Instant::now();
    let input_size = fs::metadata(input)?.len() as usize;
    let progress = extraction_progress(quiet, input_size);

    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let source = fs::File::open(input)?;
    let mut reader = MszipReader::positioned(source, length, reserve, offset, discard)?;
    let mut decompressed = Vec::new();
    reader.read_to_end(&mut decompressed)?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Extraction complete");
    }

    if decompressed.len() as u64 != length && !quiet {
        println!(
            "  Note: stream truncated at {} of {} requested bytes",
            decompressed.len(),
            length
        );
    }

    fs::write(output, &decompressed)?;
    report(quiet, input_size, decompressed.len(), start_time.elapsed());
    Ok(())
}

fn lzss_file(
    input: &PathBuf,
    output: &PathBuf,
    force: bool,
    pack: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    let start_time = Instant::now();
    let data = fs::read(input)?;
    let result = if pack {
        lzss::compress_bytes(&data)
    } else {
        lzss::decompress_bytes(&data)
    };

    fs::write(output, &result)?;
    report(quiet, data.len(), result.len(), start_time.elapsed());
    Ok(())
}

fn show_chunk_info(
    input: &PathBuf,
    offset: u64,
    reserve: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let mut cursor = std::io::Cursor::new(&data);
    std::io::Seek::seek(&mut cursor, std::io::SeekFrom::Start(offset))?;

    println!("Chunk layout of '{}':", input.display());
    let mut index = 0usize;
    let mut total_compressed = 0u64;
    let mut total_decompressed = 0u64;
    loop {
        let header = match ChunkHeader::read_from(&mut cursor, reserve) {
            Ok(header) => header,
            Err(_) => break,
        };
        let payload = match header.payload_len() {
            Ok(len) => len,
            Err(_) => break,
        };
        println!(
            "  #{:<4} checksum {:08x}  {:>6} compressed -> {:>6} decompressed",
            index, header.checksum, header.compressed_len, header.decompressed_len
        );
        index += 1;
        total_compressed += header.compressed_len as u64;
        total_decompressed += header.decompressed_len as u64;
        // Skip the magic and payload to reach the next header.
        let pos = std::io::Seek::seek(&mut cursor, std::io::SeekFrom::Current(payload as i64 + 2))?;
        if pos >= data.len() as u64 {
            break;
        }
    }

    if index == 0 {
        println!("  (no readable chunk headers)");
    } else {
        println!(
            "  {} chunks, {} compressed -> {} decompressed",
            index, total_compressed, total_decompressed
        );
    }
    Ok(())
}
