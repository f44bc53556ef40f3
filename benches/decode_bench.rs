use criterion::{black_box, criterion_group, criterion_main, Criterion};
use icnsx::decode_archive;
use icnsx::extract::select_icons;

fn build_archive(payload_len: usize) -> Vec<u8> {
    let tags: [&[u8; 4]; 5] = [b"ic11", b"ic12", b"ic13", b"ic14", b"ic10"];
    let mut body = Vec::new();
    for tag in tags {
        let mut payload = vec![0x89, b'P', b'N', b'G'];
        payload.resize(payload_len, 0xAB);
        body.extend_from_slice(tag);
        body.extend_from_slice(&(8 + payload.len() as u32).to_be_bytes());
        body.extend_from_slice(&payload);
    }
    let mut out = b"icns".to_vec();
    out.extend_from_slice(&(8 + body.len() as u32).to_be_bytes());
    out.extend_from_slice(&body);
    out
}

fn bench_decode(c: &mut Criterion) {
    let small = build_archive(4 * 1024);
    let large = build_archive(512 * 1024);

    c.bench_function("decode_5x4kb", |b| b.iter(|| decode_archive(black_box(&small[..])).unwrap()));
    c.bench_function("decode_5x512kb", |b| b.iter(|| decode_archive(black_box(&large[..])).unwrap()));
}

fn bench_select(c: &mut Criterion) {
    let bytes = build_archive(4 * 1024);
    let decoded = decode_archive(&bytes[..]).unwrap();

    c.bench_function("select_min_128", |b| {
        b.iter(|| select_icons(black_box(&decoded.archive), 128).len())
    });
}

criterion_group!(benches, bench_decode, bench_select);
criterion_main!(benches);
