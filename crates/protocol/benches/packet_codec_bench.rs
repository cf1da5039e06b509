//! Benchmarks for packet framing.
//!
//! Measures the hot paths of a busy server: sizing and encoding DATA and NAME
//! replies, and decoding READ/WRITE requests.
//!
//! Run with: `cargo bench -p protocol -- packet`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use protocol::{
    DEFAULT_MAX_FRAME_LEN, DataPacket, FileAttributes, NamePacket, NamedFile, Packet,
    ReadRequest, WriteRequest,
};

fn listing(entries: usize) -> Packet {
    let files = (0..entries)
        .map(|i| {
            let name = format!("file_{i:05}.dat");
            let long = format!("-rw-r--r--    1 1000     1000         {i} Jan  1 00:00 {name}");
            let attrs = FileAttributes::default()
                .with_size(i as u64 * 512)
                .with_owner(1000, 1000)
                .with_permissions(0o100_644)
                .with_times(1_700_000_000, 1_700_000_000);
            NamedFile::new(name, long, attrs)
        })
        .collect();
    Packet::Name(NamePacket { id: 1, files })
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_encode");

    for size in [1024usize, 32 * 1024] {
        let packet = Packet::Data(DataPacket {
            id: 9,
            data: vec![0xA5; size],
        });
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("data", size), &packet, |b, packet| {
            b.iter(|| black_box(packet).to_frame_bytes());
        });
    }

    for entries in [10usize, 100] {
        let packet = listing(entries);
        group.throughput(Throughput::Elements(entries as u64));
        group.bench_with_input(BenchmarkId::new("name", entries), &packet, |b, packet| {
            b.iter(|| black_box(packet).to_frame_bytes());
        });
        group.bench_with_input(BenchmarkId::new("name_len", entries), &packet, |b, packet| {
            b.iter(|| black_box(packet).frame_len());
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_decode");

    let read = Packet::Read(ReadRequest {
        id: 3,
        handle: b"17".to_vec(),
        offset: 1 << 20,
        len: 32 * 1024,
    })
    .to_frame_bytes()
    .expect("frame fits");
    group.bench_function("read", |b| {
        b.iter(|| Packet::decode_frame(black_box(&read), DEFAULT_MAX_FRAME_LEN));
    });

    let write = Packet::Write(WriteRequest {
        id: 4,
        handle: b"17".to_vec(),
        offset: 0,
        data: vec![0x5A; 32 * 1024],
    })
    .to_frame_bytes()
    .expect("frame fits");
    group.throughput(Throughput::Bytes(write.len() as u64));
    group.bench_function("write_32k", |b| {
        b.iter(|| Packet::decode_frame(black_box(&write), DEFAULT_MAX_FRAME_LEN));
    });

    let name = listing(100).to_frame_bytes().expect("frame fits");
    group.throughput(Throughput::Elements(100));
    group.bench_function("name_100", |b| {
        b.iter(|| Packet::decode_frame(black_box(&name), DEFAULT_MAX_FRAME_LEN));
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
