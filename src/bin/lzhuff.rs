use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Args as ClapArgs, Parser, Subcommand};
use lzhuff::huffman::{self, Codebook, HuffmanDecoder};
use lzhuff::lzss::{LzssDecoder, LzssEncoder};
use lzhuff::stats::StatsReport;
use lzhuff::{CompressConfig, LzssConfig, Method};

/// Default output of the raw `lzss` subcommand
const DEFAULT_LZSS_OUTPUT: &str = "./result.lzss";
/// Default output of the raw `unlzss` subcommand
const DEFAULT_UNLZSS_OUTPUT: &str = "./result.bin";

const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "lzhuff")]
#[command(about = "Compress files with LZSS and static Huffman coding")]
#[command(version)]
struct Cli {
    /// Show verbose statistics and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a framed file (use - for stdin/stdout)
    Compress {
        #[command(flatten)]
        io: IoArgs,

        /// Coding pipeline: lzss, huffman or lzss-huffman
        #[arg(short, long, default_value = "lzss-huffman", value_parser = parse_method)]
        method: Method,

        #[command(flatten)]
        lzss: LzssArgs,
    },
    /// Restore a framed file
    Decompress {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Write a raw LZSS stream
    Lzss {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_LZSS_OUTPUT)]
        output: PathBuf,

        #[command(flatten)]
        lzss: LzssArgs,
    },
    /// Decode a raw LZSS stream
    Unlzss {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_UNLZSS_OUTPUT)]
        output: PathBuf,

        #[command(flatten)]
        lzss: LzssArgs,
    },
    /// Write raw Huffman bits plus an OUTPUT.codebook sidecar
    Huffman {
        #[command(flatten)]
        io: IoArgs,

        /// Codebook sidecar (default: OUTPUT.codebook, required when OUTPUT is -)
        #[arg(long)]
        codebook: Option<PathBuf>,
    },
    /// Decode raw Huffman bits with a sidecar codebook
    Unhuffman {
        #[command(flatten)]
        io: IoArgs,

        /// Codebook sidecar (default: INPUT.codebook, required when INPUT is -)
        #[arg(long)]
        codebook: Option<PathBuf>,

        /// Number of symbols to decode; without it trailing padding may decode as symbols
        #[arg(long)]
        count: Option<usize>,
    },
    /// Print histogram, block entropy and average bit length
    Stats {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Compressed version of the input, for the average bit length
        #[arg(long)]
        compressed: Option<PathBuf>,

        /// Highest block entropy order
        #[arg(long, default_value = "3")]
        max_order: usize,
    },
}

#[derive(ClapArgs, Debug)]
struct IoArgs {
    /// Input file (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (use - for stdout)
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct LzssArgs {
    /// Sliding window size in bytes
    #[arg(long, default_value = "4096")]
    window_size: usize,

    /// Shortest repeat encoded as a match
    #[arg(long, default_value = "3")]
    min_match: usize,
}

impl LzssArgs {
    fn config(&self) -> LzssConfig {
        LzssConfig {
            window_size: self.window_size,
            min_match: self.min_match,
            ..Default::default()
        }
    }
}

fn parse_method(name: &str) -> Result<Method, String> {
    Method::from_name(name).ok_or_else(|| {
        format!("unknown method {:?} (expected lzss, huffman or lzss-huffman)", name)
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    env_logger::Builder::from_default_env().filter_level(level).format_timestamp(None).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let verbose = cli.verbose;

    match cli.command {
        Command::Compress { io, method, lzss } => {
            let config = CompressConfig { method, lzss: lzss.config() };
            let data = read_input(&io.input)?;

            let start = Instant::now();
            let (frame, stats) = lzhuff::compress(&data, &config)?;
            let elapsed = start.elapsed();
            write_output(&io.output, &frame)?;

            if verbose {
                eprintln!("Compression complete:");
                eprintln!("  Method:           {}", stats.method);
                eprintln!("  Input bytes:      {}", stats.input_bytes);
                eprintln!("  Output bytes:     {}", stats.output_bytes);
                eprintln!("  Ratio:            {:.3}", stats.ratio());
                if let Some(summary) = &stats.lzss {
                    eprintln!("  Literals:         {}", summary.literals);
                    eprintln!("  Matches:          {}", summary.matches);
                }
                if let Some(symbols) = stats.distinct_symbols {
                    eprintln!("  Huffman symbols:  {}", symbols);
                }
                report_timing(stats.input_bytes, elapsed);
            }
        }
        Command::Decompress { io } => {
            let frame = read_input(&io.input)?;

            let start = Instant::now();
            let data = lzhuff::decompress(&frame)?;
            let elapsed = start.elapsed();
            write_output(&io.output, &data)?;

            if verbose {
                eprintln!("Decompression complete:");
                eprintln!("  Input bytes:      {}", frame.len());
                eprintln!("  Output bytes:     {}", data.len());
                report_timing(data.len() as u64, elapsed);
            }
        }
        Command::Lzss { input, output, lzss } => {
            let data = read_input(&input)?;

            let start = Instant::now();
            let encoded = LzssEncoder::new(lzss.config())?.encode(&data)?;
            let elapsed = start.elapsed();
            write_output(&output, &encoded)?;

            if verbose {
                eprintln!("LZSS complete:");
                eprintln!("  Input bytes:      {}", data.len());
                eprintln!("  Output bytes:     {}", encoded.len());
                report_timing(data.len() as u64, elapsed);
            }
        }
        Command::Unlzss { input, output, lzss } => {
            let encoded = read_input(&input)?;

            let start = Instant::now();
            let data = LzssDecoder::new(lzss.config())?.decode(&encoded)?;
            let elapsed = start.elapsed();
            write_output(&output, &data)?;

            if verbose {
                eprintln!("LZSS decode complete:");
                eprintln!("  Input bytes:      {}", encoded.len());
                eprintln!("  Output bytes:     {}", data.len());
                report_timing(data.len() as u64, elapsed);
            }
        }
        Command::Huffman { io, codebook } => {
            let codebook_path = codebook_path(codebook, &io.output)?;
            let data = read_input(&io.input)?;

            let start = Instant::now();
            let encoded = huffman::encode(&data)?;
            let elapsed = start.elapsed();

            write_output(&io.output, &encoded.data)?;
            fs::write(&codebook_path, encoded.codebook.to_sidecar())?;

            if verbose {
                eprintln!("Huffman complete:");
                eprintln!("  Symbols:          {}", encoded.symbol_count);
                eprintln!("  Distinct symbols: {}", encoded.codebook.len());
                eprintln!("  Bits:             {}", encoded.bit_len);
                eprintln!("  Output bytes:     {}", encoded.data.len());
                report_timing(data.len() as u64, elapsed);
            }
        }
        Command::Unhuffman { io, codebook, count } => {
            let codebook_path = codebook_path(codebook, &io.input)?;
            let codebook = Codebook::parse_sidecar(&fs::read_to_string(&codebook_path)?)?;
            let encoded = read_input(&io.input)?;

            let start = Instant::now();
            let decoder = HuffmanDecoder::new(&codebook);
            let data = match count {
                Some(count) => decoder.decode_symbols(&encoded, count)?,
                None => decoder.decode_padded(&encoded)?,
            };
            let elapsed = start.elapsed();
            write_output(&io.output, &data)?;

            if verbose {
                eprintln!("Huffman decode complete:");
                eprintln!("  Input bytes:      {}", encoded.len());
                eprintln!("  Output bytes:     {}", data.len());
                report_timing(data.len() as u64, elapsed);
            }
        }
        Command::Stats { input, compressed, max_order } => {
            let data = read_input(&input)?;
            let compressed_len =
                compressed.map(|path| fs::metadata(path).map(|m| m.len())).transpose()?;
            print!("{}", StatsReport::new(&data, max_order, compressed_len));
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    if is_stdio(path) {
        io::stdin().lock().read_to_end(&mut data)?;
    } else {
        BufReader::new(File::open(path)?).read_to_end(&mut data)?;
    }
    Ok(data)
}

fn write_output(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut output: Box<dyn Write> = if is_stdio(path) {
        Box::new(io::stdout().lock())
    } else {
        Box::new(BufWriter::new(File::create(path)?))
    };
    output.write_all(data)?;
    output.flush()
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".codebook");
    PathBuf::from(name)
}

/// Codebook location for a raw Huffman stream; stdin/stdout streams have no sibling file
fn codebook_path(explicit: Option<PathBuf>, stream: &Path) -> io::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None if is_stdio(stream) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "--codebook is required when the Huffman stream is stdin/stdout",
        )),
        None => Ok(sidecar_path(stream)),
    }
}

fn report_timing(bytes: u64, elapsed: Duration) {
    eprintln!("  Time:             {:.2?}", elapsed);
    eprintln!(
        "  Throughput:       {:.1} MB/s",
        bytes as f64 / elapsed.as_secs_f64().max(f64::EPSILON) / 1_000_000.0
    );
}
