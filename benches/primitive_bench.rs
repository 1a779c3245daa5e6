use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wire_buffer::{ByteView, ChunkedBytes, MutableBuffer};

const FIELDS: usize = 1024;

fn bench_fixed_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_width");
    group.throughput(Throughput::Bytes((FIELDS * 8) as u64));

    group.bench_function("buffer_write_u64", |b| {
        let mut storage = vec![0u8; FIELDS * 8];
        b.iter(|| {
            let mut buf = MutableBuffer::new(&mut storage);
            let mut offset = 0;
            for i in 0..FIELDS as u64 {
                buf.write(black_box(i), &mut offset);
            }
            offset
        })
    });

    let mut storage = vec![0u8; FIELDS * 8];
    let mut buf = MutableBuffer::new(&mut storage);
    let mut offset = 0;
    for i in 0..FIELDS as u64 {
        buf.write(i, &mut offset);
    }

    group.bench_function("view_read_u64_be", |b| {
        let view = ByteView::new(&storage);
        b.iter(|| {
            let mut offset = 0;
            let mut sum = 0u64;
            while let Ok(value) = view.read_be::<u64>(&mut offset) {
                sum = sum.wrapping_add(value);
            }
            sum
        })
    });

    group.bench_function("stream_read_u64_fragmented", |b| {
        let chunks: ChunkedBytes = storage.chunks(61).map(|c| c.to_vec()).collect();
        b.iter(|| {
            let mut cursor = chunks.cursor();
            let mut sum = 0u64;
            while let Some(value) = cursor.try_read_be::<u64>() {
                sum = sum.wrapping_add(value);
            }
            sum
        })
    });

    group.finish();
}

#[allow(clippy::unwrap_used)]
fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("strings");
    for len in [8usize, 256, 8192] {
        let text = "s".repeat(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_function(format!("measure_then_write_{len}b"), |b| {
            b.iter(|| {
                let size = MutableBuffer::measure(|buf, offset| {
                    buf.write_str(Some(text.as_str()), offset)
                })
                .unwrap();
                let mut storage = vec![0u8; size];
                let mut offset = 0;
                MutableBuffer::new(&mut storage)
                    .write_str(Some(text.as_str()), &mut offset)
                    .unwrap();
                storage
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fixed_width, bench_strings);
criterion_main!(benches);
