//! Integration tests for the full huffpack pipeline.
//!
//! These tests verify end-to-end behavior: input file -> analyze -> build ->
//! encode -> artifact file -> parse -> rebuild -> decode -> output file, with
//! verification that output matches input.

use huffpack_core::{
    analyze, decode_text, encode_text, fileio, serialize, CodeTree, Error, FormatError,
    FrequencyTable, Layout, Session,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tempfile::tempdir;

/// Compress a file, decompress the artifact, and compare bytes.
#[test]
fn test_file_roundtrip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let artifact = dir.path().join("input.huf");
    let output = dir.path().join("output.txt");

    let text = b"The quick brown fox jumps over the lazy dog. ".repeat(50);
    fileio::write_bytes(&input, &text).unwrap();

    let mut session = Session::new();
    session.compress_file(&input, &artifact).unwrap();
    session.decompress_file(&artifact, &output).unwrap();

    assert_eq!(fileio::read_bytes(&output).unwrap(), text);

    let report = session.report();
    assert_eq!(report.original_symbols, text.len() as u64);
    assert!(report.ratio().unwrap() < 1.0);
}

/// The packed layout stores eight bits per byte and is much smaller on disk.
#[test]
fn test_packed_file_roundtrip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.bin");
    let text_artifact = dir.path().join("text.huf");
    let packed_artifact = dir.path().join("packed.huf");
    let output = dir.path().join("output.bin");

    let data: Vec<u8> = (0..20_000u32).map(|i| (i % 7) as u8 * 31).collect();
    fileio::write_bytes(&input, &data).unwrap();

    Session::new().compress_file(&input, &text_artifact).unwrap();
    Session::with_layout(Layout::Packed)
        .compress_file(&input, &packed_artifact)
        .unwrap();

    let text_size = fileio::file_size(&text_artifact).unwrap();
    let packed_size = fileio::file_size(&packed_artifact).unwrap();
    assert!(packed_size * 4 < text_size);
    assert!(packed_size < fileio::file_size(&input).unwrap());

    Session::new()
        .decompress_file(&packed_artifact, &output)
        .unwrap();
    assert_eq!(fileio::read_bytes(&output).unwrap(), data);
}

/// An artifact written by the legacy tool must still decode.
#[test]
fn test_legacy_artifact() {
    // "aab": b=1 (left, '0'), a=2 (right, '1') -> "110"
    let artifact = b"2\n97 2\n98 1\n\n110";
    assert_eq!(huffpack_core::decompress(artifact).unwrap(), b"aab");
}

/// Empty input fails and leaves no artifact behind.
#[test]
fn test_empty_file_not_compressed() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    let artifact = dir.path().join("empty.huf");
    fileio::write_bytes(&input, b"").unwrap();

    let result = Session::new().compress_file(&input, &artifact);
    assert!(matches!(result, Err(Error::EmptyInput)));
    assert!(!artifact.exists());
}

/// A corrupt artifact fails and leaves no output behind.
#[test]
fn test_corrupt_artifact_not_decompressed() {
    let dir = tempdir().unwrap();
    let artifact = dir.path().join("bad.huf");
    let output = dir.path().join("out.txt");
    fileio::write_bytes(&artifact, b"3\n97 1\n98 1\n").unwrap();

    let result = Session::new().decompress_file(&artifact, &output);
    assert!(matches!(
        result,
        Err(Error::Format(FormatError::IncompleteRow { row: 3 }))
    ));
    assert!(!output.exists());
}

/// A truncated payload is detected rather than decoded to a shorter text.
#[test]
fn test_truncated_payload() {
    let mut artifact = huffpack_core::compress(b"abracadabra").unwrap();
    // Drop the final 'a' (one bit) and one bit of the preceding 'r'.
    artifact.truncate(artifact.len() - 2);

    let result = huffpack_core::decompress(&artifact);
    assert!(matches!(result, Err(Error::BitStringMismatch { .. })));
}

/// Missing input file surfaces as an I/O error naming the path.
#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.txt");

    match Session::new().compress_file(&missing, dir.path().join("out.huf")) {
        Err(Error::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected I/O error, got {:?}", other),
    }
}

/// Test with all symbols present (full 256-byte alphabet).
#[test]
fn test_all_symbols() {
    let data: Vec<u8> = (0..=255).collect();

    let artifact = huffpack_core::compress(&data).unwrap();
    assert!(artifact.starts_with(b"256\n0 1\n"));
    assert_eq!(huffpack_core::decompress(&artifact).unwrap(), data);
}

/// Test with large single-symbol data.
#[test]
fn test_large_single_symbol() {
    let data = vec![b'X'; 128 * 1024];

    let mut session = Session::new();
    let artifact = session.compress(&data).unwrap();
    assert_eq!(session.encoded().len(), data.len());
    assert!(session.encoded().bytes().all(|b| b == b'0'));

    assert_eq!(session.decompress(&artifact).unwrap(), data);
}

/// Mixed random data survives the round trip.
#[test]
fn test_random_data_roundtrip() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for size in [1usize, 2, 17, 1000, 10_000] {
        let data: Vec<u8> = (0..size).map(|_| rng.gen()).collect();
        let artifact = huffpack_core::compress(&data).unwrap();
        assert_eq!(huffpack_core::decompress(&artifact).unwrap(), data);
    }
}

/// Decoding with an incompatible tree must fail, never return wrong data.
#[test]
fn test_mismatched_tree() {
    let text = b"abracadabra";
    let bits = encode_text(text, &CodeTree::build(&analyze(text)).unwrap().code_table()).unwrap();

    // Same alphabet, very different weights: codeword boundaries shift.
    let other: FrequencyTable = [(b'a', 1), (b'b', 2), (b'c', 5), (b'd', 9), (b'r', 2)]
        .into_iter()
        .collect();
    let artifact = serialize(&other, &bits);
    match Session::new().decompress(&artifact) {
        Err(Error::TraversalFailure { .. }) | Err(Error::BitStringMismatch { .. }) => {}
        other => panic!("expected a decode failure, got {:?}", other),
    }

    let single = CodeTree::build(&analyze(b"q")).unwrap();
    assert!(matches!(
        decode_text(&bits, Some(&single)),
        Err(Error::TraversalFailure { .. })
    ));
}

/// A corrupted payload bit is reported, in both layouts, and no output file
/// appears.
#[test]
fn test_flipped_payload_bit() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("output.txt");
    let text = b"The quick brown fox jumps over the lazy dog.";

    for layout in [Layout::Text, Layout::Packed] {
        let mut session = Session::with_layout(layout);
        let mut artifact = session.compress(text).unwrap();
        let last = artifact.len() - 1;
        match layout {
            Layout::Text => artifact[last] ^= 1,
            Layout::Packed => artifact[last] ^= 0x80,
        }

        let corrupt = dir.path().join("corrupt.huf");
        fileio::write_bytes(&corrupt, &artifact).unwrap();

        let result = session.decompress_file(&corrupt, &output);
        assert!(
            matches!(
                result,
                Err(Error::TraversalFailure { .. }) | Err(Error::BitStringMismatch { .. })
            ),
            "{:?} layout gave {:?}",
            layout,
            result
        );
        assert!(!output.exists());
    }
}

/// Skewed input compresses below eight bits per symbol.
#[test]
fn test_skewed_ratio() {
    let mut data = vec![b'e'; 900];
    data.extend_from_slice(&[b'x'; 50]);
    data.extend_from_slice(&[b'y'; 50]);

    let mut session = Session::new();
    session.compress(&data).unwrap();
    let ratio = session.report().ratio().unwrap();

    assert!(ratio < 1.0);
    // 900*1 + 50*2 + 50*2 bits over 8000 bits
    assert_eq!(ratio, 1100.0 / 8000.0);
}

/// Uniform input over 2^k symbols costs k bits per symbol.
#[test]
fn test_uniform_ratio() {
    for k in 1..=8u32 {
        let alphabet = 1usize << k;
        let data: Vec<u8> = (0..alphabet * 16).map(|i| (i % alphabet) as u8).collect();

        let mut session = Session::new();
        session.compress(&data).unwrap();
        assert_eq!(session.report().ratio(), Some(k as f64 / 8.0));
    }

    // Random draws are only approximately uniform.
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let data: Vec<u8> = (0..50_000).map(|_| rng.gen_range(0..16u8)).collect();
    let mut session = Session::new();
    session.compress(&data).unwrap();
    let ratio = session.report().ratio().unwrap();
    assert!((ratio - 0.5).abs() < 0.01, "ratio {}", ratio);
}
