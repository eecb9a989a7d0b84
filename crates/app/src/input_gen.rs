//! Sample input generation for the demo run.
//!
//! Each generator is deterministic for a given seed, so a demo failure can be
//! replayed exactly by passing the printed seed back with `--seed`.
//!
//! # Design
//!
//! The samples cover the cases where prefix coding behaves differently:
//! - Mixed data: runs, text-like spans, repeating patterns and noise
//! - Skewed data: one dominant symbol, compresses well below 8 bits/symbol
//! - Uniform data over 2^k symbols: costs exactly k bits/symbol

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate a sample with mixed compressibility.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `size_bytes`: exact size of generated data
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let span = (size_bytes - data.len()).min(2048);

        match rng.gen_range(0..10u8) {
            // 30% runs of the same byte
            0..=2 => {
                let byte_value: u8 = rng.gen();
                data.extend(std::iter::repeat(byte_value).take(span));
            }

            // 30% limited alphabet, text-like
            3..=5 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,\n";
                data.extend((0..span).map(|_| alphabet[rng.gen_range(0..alphabet.len())]));
            }

            // 20% repeating patterns
            6..=7 => {
                let pattern = generate_pattern(&mut rng);
                data.extend(pattern.iter().cycle().take(span));
            }

            // 20% random bytes
            _ => data.extend((0..span).map(|_| rng.gen::<u8>())),
        }
    }

    data
}

/// Generate data where `dominant` makes up roughly 90% of the bytes.
pub fn generate_skewed_data(seed: u64, size_bytes: usize, dominant: u8) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..size_bytes)
        .map(|_| {
            if rng.gen_bool(0.9) {
                dominant
            } else {
                rng.gen()
            }
        })
        .collect()
}

/// Generate data cycling evenly through `2^alphabet_bits` symbols.
///
/// Every symbol occurs equally often when `size_bytes` is a multiple of the
/// alphabet size; the order is shuffled so the data is not a plain ramp.
pub fn generate_uniform_data(seed: u64, size_bytes: usize, alphabet_bits: u32) -> Vec<u8> {
    let alphabet = 1usize << alphabet_bits.min(8);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data: Vec<u8> = (0..size_bytes).map(|i| (i % alphabet) as u8).collect();

    // Fisher-Yates keeps the counts and scrambles the order.
    for i in (1..data.len()).rev() {
        let j = rng.gen_range(0..=i);
        data.swap(i, j);
    }
    data
}

/// Generate a small repeating pattern.
fn generate_pattern(rng: &mut ChaCha8Rng) -> Vec<u8> {
    let pattern_len = rng.gen_range(4..=32);
    (0..pattern_len).map(|_| rng.gen()).collect()
}
