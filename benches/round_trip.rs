use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use zlibx::lzss;

fn generate_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            let base = b"The quick brown fox jumps over the lazy dog. ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(base);
            }
            data.truncate(size);
            data
        }
        "repetitive" => vec![b'7'; size],
        "random" => (0..size)
            .map(|i| {
                let x = i as u32;
                ((x.wrapping_mul(22695477).wrapping_add(1)) >> 16) as u8
            })
            .collect(),
        _ => panic!("Unknown pattern: {}", pattern),
    }
}

fn lzss_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzss_round_trip");
    for size in [4096usize, 65536] {
        for pattern in ["text", "repetitive", "random"] {
            let data = generate_data(size, pattern);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(pattern.to_string(), size),
                &data,
                |b, data| {
                    b.iter(|| {
                        let packed = lzss::compress_bytes(black_box(data));
                        lzss::decompress_bytes(&packed)
                    })
                },
            );
        }
    }
    group.finish();
}

fn lzss_encode_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzss_encode");
    for pattern in ["text", "repetitive", "random"] {
        let data = generate_data(65536, pattern);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new(pattern.to_string(), 65536), &data, |b, data| {
            b.iter(|| lzss::compress_bytes(black_box(data)))
        });
    }
    group.finish();
}

criterion_group!(benches, lzss_round_trip, lzss_encode_only);
criterion_main!(benches);
