//! huffpack: command-line front end for huffpack-core.

mod config;
mod input_gen;

use anyhow::{bail, Context, Result};
use clap::Parser;
use config::{resolve_seed, Cli, Command};
use huffpack_core::report::display_symbol;
use huffpack_core::{fileio, CodeTable, Session};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    if cli.print_config {
        cli.print();
    }

    let mut session = Session::with_layout(cli.layout());

    match &cli.command {
        Command::Compress { input, output, .. } => run_compress(&mut session, input, output)?,
        Command::Decompress { input, output } => run_decompress(&mut session, input, output)?,
        Command::Analyze { input } => run_analyze(&mut session, input)?,
        Command::Encode { text } => run_encode(&mut session, text)?,
        Command::Demo { seed, size } => run_demo(resolve_seed(*seed), *size)?,
    }

    // analyze and encode always print their codes.
    let file_command = matches!(cli.command, Command::Compress { .. } | Command::Decompress { .. });
    if cli.print_codes && file_command {
        if let Some(codes) = session.codes() {
            print_codes(codes);
        }
    }
    if !cli.no_report && !matches!(cli.command, Command::Demo { .. }) {
        session.report().print_summary();
    }

    Ok(())
}

fn run_compress(session: &mut Session, input: &Path, output: &Path) -> Result<()> {
    session
        .compress_file(input, output)
        .with_context(|| format!("compress {} -> {} failed", input.display(), output.display()))?;

    let original = fileio::file_size(input)?;
    let compressed = fileio::file_size(output)?;
    println!(
        "Compressed {} ({} bytes) -> {} ({} bytes)",
        input.display(),
        original,
        output.display(),
        compressed
    );
    Ok(())
}

fn run_decompress(session: &mut Session, input: &Path, output: &Path) -> Result<()> {
    session
        .decompress_file(input, output)
        .with_context(|| format!("decompress {} -> {} failed", input.display(), output.display()))?;

    println!(
        "Decompressed {} -> {} ({} bytes)",
        input.display(),
        output.display(),
        session.report().original_symbols
    );
    Ok(())
}

fn run_analyze(session: &mut Session, input: &Path) -> Result<()> {
    let data = fileio::read_bytes(input).with_context(|| format!("analyze {} failed", input.display()))?;

    if data.is_empty() {
        warn!(input = %input.display(), "file is empty, nothing to encode");
        session.analyze(&data);
        return Ok(());
    }

    session
        .encode(&data)
        .with_context(|| format!("analyze {} failed", input.display()))?;
    if let Some(codes) = session.codes() {
        print_codes(codes);
    }
    Ok(())
}

fn run_encode(session: &mut Session, text: &str) -> Result<()> {
    let bits = session.encode(text.as_bytes()).context("encode failed")?;
    println!("Encoded bits: {}", bits);

    if let Some(codes) = session.codes() {
        print_codes(codes);
    }

    let decoded = session.decode(session.encoded()).context("decode check failed")?;
    println!("Decoded: {}", String::from_utf8_lossy(&decoded));
    if decoded == text.as_bytes() {
        println!("Verification: PASSED ✓");
        Ok(())
    } else {
        bail!("decoded text does not match the input")
    }
}

/// Round-trip a fixed set of samples plus generated ones.
fn run_demo(seed: u64, size: usize) -> Result<()> {
    info!(seed, size, "running demo samples");

    let mut samples: Vec<(String, Vec<u8>)> = vec![
        ("abracadabra".into(), b"abracadabra".to_vec()),
        ("single symbol".into(), b"aaaa".to_vec()),
        ("hello world".into(), b"hello world".to_vec()),
        ("nul bytes".into(), vec![0, 0, 0, 1, 0, 255]),
        ("all bytes".into(), (0..=255).collect()),
    ];
    samples.push(("mixed".into(), input_gen::generate_sample_data(seed, size)));
    samples.push(("skewed".into(), input_gen::generate_skewed_data(seed, size, b'e')));
    samples.push(("uniform/16".into(), input_gen::generate_uniform_data(seed, size, 4)));

    println!("=== Demo (seed {}) ===", seed);
    let mut failures = 0;

    for (name, data) in &samples {
        let mut session = Session::new();
        let outcome = session
            .compress(data)
            .and_then(|artifact| session.decompress(&artifact).map(|out| (artifact, out)));

        match outcome {
            Ok((artifact, out)) if out == *data => {
                let ratio = session.report().ratio().unwrap_or(0.0);
                println!(
                    "✓ {:<14} {:>7} bytes  {:>7} bits  ratio {:.4}  artifact {} bytes",
                    name,
                    data.len(),
                    session.report().encoded_bits,
                    ratio,
                    artifact.len()
                );
            }
            Ok(_) => {
                failures += 1;
                println!("✗ {:<14} output does not match input", name);
            }
            Err(e) => {
                failures += 1;
                println!("✗ {:<14} {}", name, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} demo samples failed (seed {})", failures, samples.len(), seed);
    }
    println!("All {} samples passed", samples.len());
    Ok(())
}

fn print_codes(codes: &CodeTable) {
    println!("=== Code Table ===");
    for (symbol, code) in codes.iter() {
        println!("{:>6} -> {}", display_symbol(symbol), code);
    }
    println!();
}
