use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use zlibx::{inflate_bytes, mszip_bytes};

fn generate_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(base);
            }
            data.truncate(size);
            data
        }
        "repetitive" => {
            let pattern = b"ABCDEFGHIJ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(pattern);
            }
            data.truncate(size);
            data
        }
        "random" => (0..size)
            .map(|i| {
                let x = i as u32;
                ((x.wrapping_mul(1664525).wrapping_add(1013904223)) >> 8) as u8
            })
            .collect(),
        _ => panic!("Unknown pattern: {}", pattern),
    }
}

/// Frame `data` as a stream of stored blocks, one per 4KB.
fn stored_stream(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let chunks: Vec<&[u8]> = data.chunks(4096).collect();
    for (index, piece) in chunks.iter().enumerate() {
        let is_final = index == chunks.len() - 1;
        out.push(is_final as u8);
        let len = piece.len() as u16;
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&(!len).to_le_bytes());
        out.extend_from_slice(piece);
    }
    out
}

/// Frame `data` as a chunked MSZIP stream of stored blocks.
fn chunked_stream(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for piece in data.chunks(0x1000) {
        let len = piece.len() as u16;
        let mut payload = vec![0x01];
        payload.extend_from_slice(&len.to_le_bytes());
        payload.extend_from_slice(&(!len).to_le_bytes());
        payload.extend_from_slice(piece);

        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&((payload.len() + 2) as u16).to_le_bytes());
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(b"CK");
        out.extend_from_slice(&payload);
    }
    out
}

fn inflate_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("inflate_throughput");
    for size in [4096usize, 65536, 1048576] {
        for pattern in ["text", "repetitive", "random"] {
            let data = generate_data(size, pattern);
            let stream = stored_stream(&data);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(pattern.to_string(), size),
                &stream,
                |b, stream| b.iter(|| inflate_bytes(black_box(stream)).unwrap()),
            );
        }
    }
    group.finish();
}

fn mszip_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("mszip_throughput");
    for size in [65536usize, 1048576] {
        let data = generate_data(size, "text");
        let stream = chunked_stream(&data);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("text", size), &stream, |b, stream| {
            b.iter(|| mszip_bytes(black_box(stream), size as u64, 0).unwrap())
        });
    }
    group.finish();
}

fn lzss_decode_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzss_decode_throughput");
    for size in [4096usize, 65536] {
        for pattern in ["text", "repetitive", "random"] {
            let data = generate_data(size, pattern);
            let packed = zlibx::lzss::compress_bytes(&data);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(pattern.to_string(), size),
                &packed,
                |b, packed| b.iter(|| zlibx::lzss::decompress_bytes(black_box(packed))),
            );
        }
    }
    group.finish();
}

criterion_group!(
    benches,
    inflate_throughput,
    mszip_throughput,
    lzss_decode_throughput
);
criterion_main!(benches);
