use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dgemm::{multiply, multiply_blocked, multiply_reference, selected_kernel_name};

const SQUARE_SIZES: &[usize] = &[32, 64, 128, 256, 512];

// (label, seq_len, head_dim): Q × K^T shaped products
const ATTENTION_SHAPES: &[(&str, usize, usize)] = &[
    ("BERT-128x64", 128, 64),
    ("BERT-256x64", 256, 64),
    ("GPT-512x64", 512, 64),
    ("GPT-1024x64", 1024, 64),
];

fn make_matrix(len: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state >> 12;
            state ^= state << 25;
            state ^= state >> 27;
            (state.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect()
}

fn bench_square(c: &mut Criterion) {
    let mut group = c.benchmark_group("square");
    for &size in SQUARE_SIZES {
        group.throughput(Throughput::Elements(2 * (size as u64).pow(3)));

        let a = make_matrix(size * size, 0xC0FF_EE42 ^ size as u64);
        let b = make_matrix(size * size, 0xBADC_0FFE ^ size as u64);
        let mut out = vec![0.0; size * size];

        group.bench_function(BenchmarkId::new("reference", size), |bench| {
            bench.iter(|| multiply_reference(black_box(&a), black_box(&b), &mut out, size, size, size));
        });
        group.bench_function(BenchmarkId::new("blocked32", size), |bench| {
            bench.iter(|| multiply_blocked(black_box(&a), black_box(&b), &mut out, size, size, size, 32));
        });
        group.bench_function(BenchmarkId::new(selected_kernel_name(), size), |bench| {
            bench.iter(|| multiply(black_box(&a), black_box(&b), &mut out, size, size, size));
        });
    }
    group.finish();
}

fn bench_attention(c: &mut Criterion) {
    let mut group = c.benchmark_group("attention");
    for &(label, seq_len, head_dim) in ATTENTION_SHAPES {
        group.throughput(Throughput::Elements(
            2 * (seq_len * seq_len * head_dim) as u64,
        ));

        let a = make_matrix(seq_len * head_dim, 42);
        let b = make_matrix(head_dim * seq_len, 43);
        let mut out = vec![0.0; seq_len * seq_len];

        group.bench_function(BenchmarkId::new("reference", label), |bench| {
            bench.iter(|| {
                multiply_reference(black_box(&a), black_box(&b), &mut out, seq_len, head_dim, seq_len)
            });
        });
        group.bench_function(BenchmarkId::new(selected_kernel_name(), label), |bench| {
            bench.iter(|| multiply(black_box(&a), black_box(&b), &mut out, seq_len, head_dim, seq_len));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_square, bench_attention);
criterion_main!(benches);
