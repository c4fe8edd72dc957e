// Command-line interface for the YKCMP codec.
//
// Explicit subcommands over file paths. The codec itself never prints;
// all console output and logging setup happens here.

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use log::LevelFilter;

use crate::format::decoder::{DecodeError, DecodeOptions};
use crate::format::header::{HEADER_LEN, Header};
use crate::format::tiers::{LONG, MAX_LITERAL_RUN, MEDIUM, SHORT};
use crate::io::{self, IoError};

/// Extension appended to compressed outputs and stripped from inputs
/// when no explicit output path is given.
const YKCMP_EXT: &str = "ykcmp";

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// YKCMP_V1 texture payload compressor/decompressor.
#[derive(Parser, Debug)]
#[command(
    name = "ykcmp",
    version,
    about = "YKCMP_V1 texture payload compressor/decompressor",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compress a raw payload into a YKCMP_V1 stream.
    Compress(CompressArgs),
    /// Decompress a YKCMP_V1 stream back into the raw payload.
    Decompress(DecompressArgs),
    /// Print the parsed header of a YKCMP_V1 stream.
    Info(InfoArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct CompressArgs {
    /// Input file (raw payload).
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Output file [default: INPUT.ykcmp].
    #[arg(value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DecompressArgs {
    /// Input file (framed YKCMP stream).
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Output file [default: INPUT without .ykcmp, or INPUT.raw].
    #[arg(value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Copy inputs without the YKCMP magic unchanged instead of failing.
    #[arg(long)]
    passthrough: bool,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// Input file (framed YKCMP stream).
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Parse arguments, dispatch, exit.
pub fn run() {
    let cli = Cli::parse();
    init_logging(&cli);

    let code = match &cli.command {
        Cmd::Compress(args) => cmd_compress(&cli, args),
        Cmd::Decompress(args) => cmd_decompress(&cli, args),
        Cmd::Info(args) => cmd_info(args),
        Cmd::Config => cmd_config(),
    };
    process::exit(code);
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

// ---------------------------------------------------------------------------
// Default output paths
// ---------------------------------------------------------------------------

fn default_compressed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(YKCMP_EXT);
    PathBuf::from(name)
}

fn default_decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == YKCMP_EXT) {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_os_string();
        name.push(".raw");
        PathBuf::from(name)
    }
}

fn refuse_overwrite(path: &Path, force: bool) -> bool {
    if path.exists() && !force {
        eprintln!(
            "ykcmp: output file exists, use -f to overwrite: {}",
            path.display()
        );
        return true;
    }
    false
}

// ---------------------------------------------------------------------------
// Stats reporting
// ---------------------------------------------------------------------------

fn report(cli: &Cli, action: &str, input_size: u64, output_size: u64) {
    if cli.json_output {
        let stats = serde_json::json!({
            "action": action,
            "input_bytes": input_size,
            "output_bytes": output_size,
        });
        eprintln!("{stats}");
    } else if !cli.quiet {
        eprintln!("ykcmp: {action}: {input_size} -> {output_size} bytes");
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_compress(cli: &Cli, args: &CompressArgs) -> i32 {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_compressed_path(&args.input));
    if refuse_overwrite(&output, cli.force) {
        return 1;
    }

    match io::compress_file(&args.input, &output) {
        Ok(stats) => {
            report(cli, "compress", stats.input_size, stats.output_size);
            0
        }
        Err(e) => {
            eprintln!("ykcmp: {}: {e}", args.input.display());
            1
        }
    }
}

fn cmd_decompress(cli: &Cli, args: &DecompressArgs) -> i32 {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_decompressed_path(&args.input));
    if refuse_overwrite(&output, cli.force) {
        return 1;
    }

    let opts = DecodeOptions {
        passthrough: args.passthrough,
    };
    match io::decompress_file(&args.input, &output, &opts) {
        Ok(stats) => {
            report(cli, "decompress", stats.input_size, stats.output_size);
            0
        }
        Err(e) => {
            let hint = match e {
                IoError::Decode(DecodeError::UnsupportedFormat { .. }) => {
                    " (use --passthrough to copy non-YKCMP inputs unchanged)"
                }
                _ => "",
            };
            eprintln!("ykcmp: {}: {e}{hint}", args.input.display());
            1
        }
    }
}

fn cmd_info(args: &InfoArgs) -> i32 {
    let input = match std::fs::read(&args.input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("ykcmp: {}: {e}", args.input.display());
            return 1;
        }
    };

    match Header::parse(&input) {
        Ok(hdr) => {
            println!("magic:             YKCMP_V1");
            println!("reserved:          {}", hdr.reserved);
            println!("stream end:        {:#x}", hdr.stream_end);
            println!("uncompressed size: {}", hdr.uncompressed_size);
            println!(
                "token stream:      {} bytes",
                (hdr.stream_end as usize).saturating_sub(HEADER_LEN)
            );
            println!("file size:         {} bytes", input.len());
            0
        }
        Err(e) => {
            eprintln!("ykcmp: {}: {e}", args.input.display());
            1
        }
    }
}

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("ykcmp version {version} (Rust)");

    let file_io = cfg!(feature = "file-io") as u8;
    let ptr_size = std::mem::size_of::<*const ()>();

    eprintln!("FILE_IO={file_io}");
    eprintln!("HEADER_LEN={HEADER_LEN}");
    eprintln!("MAX_LITERAL_RUN={MAX_LITERAL_RUN}");
    eprintln!("SHORT_MAX_LEN={} SHORT_MAX_DIST={}", SHORT.max_len, SHORT.max_distance);
    eprintln!("MEDIUM_MAX_LEN={} MEDIUM_MAX_DIST={}", MEDIUM.max_len, MEDIUM.max_distance);
    eprintln!("LONG_MAX_LEN={} LONG_MAX_DIST={}", LONG.max_len, LONG.max_distance);
    eprintln!("sizeof(usize)={ptr_size}");

    0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_path_appends_extension() {
        let path = default_compressed_path(Path::new("tex/payload.bin"));
        assert_eq!(path, PathBuf::from("tex/payload.bin.ykcmp"));
    }

    #[test]
    fn decompressed_path_strips_extension() {
        let path = default_decompressed_path(Path::new("tex/payload.bin.ykcmp"));
        assert_eq!(path, PathBuf::from("tex/payload.bin"));
    }

    #[test]
    fn decompressed_path_without_extension_appends_raw() {
        let path = default_decompressed_path(Path::new("payload"));
        assert_eq!(path, PathBuf::from("payload.raw"));
    }

    #[test]
    fn cli_parses_all_subcommands() {
        Cli::try_parse_from(["ykcmp", "compress", "in.bin"]).unwrap();
        Cli::try_parse_from(["ykcmp", "decompress", "--passthrough", "in.ykcmp", "out.bin"])
            .unwrap();
        Cli::try_parse_from(["ykcmp", "info", "in.ykcmp"]).unwrap();
        Cli::try_parse_from(["ykcmp", "--json", "config"]).unwrap();
    }
}
