use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dotdb_serialize::Buffer;
use uuid::Uuid;

fn bench_put_get_int(c: &mut Criterion) {
    c.bench_function("put_int_1k", |b| {
        b.iter(|| {
            let mut buf = Buffer::with_capacity(16);
            for i in 0..1024 {
                buf.put_int(black_box(i));
            }
            buf
        })
    });

    let mut buf = Buffer::new();
    for i in 0..1024 {
        buf.put_int(i);
    }
    c.bench_function("get_int_1k", |b| {
        b.iter(|| {
            buf.set_position(0);
            let mut sum = 0i64;
            for _ in 0..1024 {
                sum += buf.get_int() as i64;
            }
            black_box(sum)
        })
    });
}

fn bench_record(c: &mut Criterion) {
    let id = Uuid::new_v4();
    c.bench_function("encode_record", |b| {
        b.iter(|| {
            let mut buf = Buffer::new();
            buf.put_uuid(black_box(id)).put_long(black_box(42)).put_double(black_box(1.5)).put_string_bounded(black_box("storage engine record"), 16);
            buf.to_vec()
        })
    });
}

criterion_group!(benches, bench_put_get_int, bench_record);
criterion_main!(benches);
