//! Command-line configuration for the huffpack tool.
//!
//! Every command works with only its positional arguments; flags tune output
//! and logging. Randomized inputs for `demo` are reproducible with `--seed`.

use clap::{Parser, Subcommand};
use huffpack_core::Layout;
use std::path::PathBuf;
use tracing::Level;

/// Huffman prefix-code compressor.
#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(version)]
#[command(about = "Huffman prefix-code compressor", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Don't print the statistics summary
    #[arg(long, global = true)]
    pub no_report: bool,

    /// Print the code table after building it
    #[arg(long, global = true)]
    pub print_codes: bool,

    /// Print resolved configuration before running
    #[arg(long, global = true)]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compress a file into an artifact
    Compress {
        /// File to compress
        input: PathBuf,
        /// Artifact to write
        output: PathBuf,
        /// Store payload bits packed eight per byte
        #[arg(long)]
        packed: bool,
    },

    /// Restore a file from an artifact
    Decompress {
        /// Artifact to read (text or packed layout)
        input: PathBuf,
        /// File to write
        output: PathBuf,
    },

    /// Show frequencies, codes and achievable ratio for a file
    Analyze {
        /// File to analyze
        input: PathBuf,
    },

    /// Encode a literal string, print its bits and verify the decode
    Encode {
        /// Text to encode
        text: String,
    },

    /// Run built-in round-trip checks over fixed and generated samples
    Demo {
        /// Random seed for generated samples (default: time-based)
        #[arg(long)]
        seed: Option<u64>,
        /// Size of each generated sample in bytes (at least 1)
        #[arg(long, default_value_t = 16 * 1024, value_parser = parse_sample_size)]
        size: usize,
    },
}

impl Cli {
    /// Tracing level from `--log-level`, falling back to INFO.
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    /// Artifact layout for `compress`.
    pub fn layout(&self) -> Layout {
        match self.command {
            Command::Compress { packed: true, .. } => Layout::Packed,
            _ => Layout::Text,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.command {
            Command::Compress { input, output, .. } => {
                println!("Command: compress");
                println!("Input file:  {}", input.display());
                println!("Output file: {}", output.display());
                println!("Layout: {:?}", self.layout());
            }
            Command::Decompress { input, output } => {
                println!("Command: decompress");
                println!("Input file:  {}", input.display());
                println!("Output file: {}", output.display());
            }
            Command::Analyze { input } => {
                println!("Command: analyze");
                println!("Input file:  {}", input.display());
            }
            Command::Encode { text } => {
                println!("Command: encode");
                println!("Text: {} bytes", text.len());
            }
            Command::Demo { seed, size } => {
                println!("Command: demo");
                match seed {
                    Some(seed) => println!("Seed: {}", seed),
                    None => println!("Seed: (time-based)"),
                }
                println!("Sample size: {} bytes", size);
            }
        }
        println!("Log level: {}", self.level());
        println!("Report: {}", if self.no_report { "off" } else { "on" });
        println!();
    }
}

/// Generated samples must be compressible, so zero bytes is refused.
fn parse_sample_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("sample size must be at least 1 byte".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}

/// Seed for generated samples: explicit or derived from the clock.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compress() {
        let cli = Cli::try_parse_from(["huffpack", "compress", "in.txt", "out.huf", "--packed"]).unwrap();
        assert_eq!(cli.layout(), Layout::Packed);
        assert!(matches!(cli.command, Command::Compress { .. }));
    }

    #[test]
    fn test_default_layout_is_text() {
        let cli = Cli::try_parse_from(["huffpack", "compress", "in.txt", "out.huf"]).unwrap();
        assert_eq!(cli.layout(), Layout::Text);

        let cli = Cli::try_parse_from(["huffpack", "decompress", "a.huf", "a.txt"]).unwrap();
        assert_eq!(cli.layout(), Layout::Text);
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::try_parse_from(["huffpack", "--log-level", "DEBUG", "encode", "hi"]).unwrap();
        assert_eq!(cli.level(), Level::DEBUG);

        let cli = Cli::try_parse_from(["huffpack", "encode", "hi", "--log-level", "bogus"]).unwrap();
        assert_eq!(cli.level(), Level::INFO);
    }

    #[test]
    fn test_demo_defaults() {
        let cli = Cli::try_parse_from(["huffpack", "demo"]).unwrap();
        match cli.command {
            Command::Demo { seed, size } => {
                assert_eq!(seed, None);
                assert_eq!(size, 16 * 1024);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_demo_size_must_be_positive() {
        assert!(Cli::try_parse_from(["huffpack", "demo", "--size", "0"]).is_err());
        assert!(Cli::try_parse_from(["huffpack", "demo", "--size", "-3"]).is_err());

        let cli = Cli::try_parse_from(["huffpack", "demo", "--size", "1"]).unwrap();
        assert!(matches!(cli.command, Command::Demo { size: 1, .. }));
    }

    #[test]
    fn test_missing_arguments() {
        assert!(Cli::try_parse_from(["huffpack", "compress", "only-input"]).is_err());
        assert!(Cli::try_parse_from(["huffpack"]).is_err());
    }

    #[test]
    fn test_resolve_seed() {
        assert_eq!(resolve_seed(Some(42)), 42);
    }
}
