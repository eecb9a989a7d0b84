use criterion::{criterion_group, criterion_main, Criterion};
use huffpack_core::{analyze, decode_text, encode_text, CodeTree, Session};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Text-like input: lowercase letters and spaces with a skewed distribution.
fn sample_input(len: usize) -> Vec<u8> {
    let alphabet = b"eeeeeeetttttaaaaooooiiinnnsshhrrdlu     ";
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree");
    let full: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
    let table = analyze(&full);

    group.bench_function("analyze_64k", |b| b.iter(|| analyze(&full)));
    group.bench_function("build_256", |b| b.iter(|| CodeTree::build(&table).unwrap()));
    group.bench_function("code_table_256", |b| {
        let tree = CodeTree::build(&table).unwrap();
        b.iter(|| tree.code_table())
    });
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let input = sample_input(64 * 1024);
    let tree = CodeTree::build(&analyze(&input)).unwrap();
    let codes = tree.code_table();
    let bits = encode_text(&input, &codes).unwrap();

    group.bench_function("encode_64k", |b| {
        b.iter(|| encode_text(&input, &codes).unwrap())
    });
    group.bench_function("decode_64k", |b| {
        b.iter(|| decode_text(&bits, Some(&tree)).unwrap())
    });
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    let input = sample_input(64 * 1024);
    let artifact = huffpack_core::compress(&input).unwrap();

    group.bench_function("compress_64k", |b| {
        b.iter(|| Session::new().compress(&input).unwrap())
    });
    group.bench_function("decompress_64k", |b| {
        b.iter(|| Session::new().decompress(&artifact).unwrap())
    });
}

criterion_group!(benches, bench_build, bench_codec, bench_session);
criterion_main!(benches);
