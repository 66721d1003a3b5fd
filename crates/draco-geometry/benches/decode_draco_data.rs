use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use draco_geometry::{decode_draco_data, AttributeMap};

/// Sequential mesh of a `grid x grid` vertex grid with float positions and
/// normals and raw u16 indices.
fn grid_mesh(grid: u32) -> Vec<u8> {
    let num_points = grid * grid;
    let mut faces = Vec::new();
    for y in 0..grid - 1 {
        for x in 0..grid - 1 {
            let i = y * grid + x;
            faces.push([i, i + 1, i + grid]);
            faces.push([i + 1, i + grid + 1, i + grid]);
        }
    }

    let mut out = b"DRACO".to_vec();
    out.extend_from_slice(&[2, 2, 1, 0, 0, 0]);
    varint(&mut out, faces.len() as u64);
    varint(&mut out, num_points as u64);
    out.push(1);
    for index in faces.iter().flatten() {
        out.extend_from_slice(&(*index as u16).to_le_bytes());
    }

    // One attributes decoder: float32 position (id 0) and normal (id 1), generic coding.
    out.extend_from_slice(&[1, 2, 0, 9, 3, 0, 0, 1, 9, 3, 0, 1, 0, 0]);
    for y in 0..grid {
        for x in 0..grid {
            for v in [x as f32, y as f32, 0.0] {
                out.extend_from_slice(&v.to_le_bytes());
            }
        }
    }
    for _ in 0..num_points {
        for v in [0.0f32, 0.0, 1.0] {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }
    out
}

fn varint(out: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        out.push((v as u8) | 0x80);
        v >>= 7;
    }
    out.push(v as u8);
}

fn bench_decode_draco_data(c: &mut Criterion) {
    let attributes = AttributeMap::from([("POSITION".to_string(), 0), ("NORMAL".to_string(), 1)]);
    let mut group = c.benchmark_group("decode_draco_data");
    for grid in [16u32, 64, 200] {
        let data = grid_mesh(grid);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(grid), &data, |b, data| {
            b.iter(|| decode_draco_data(black_box(data), &attributes))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode_draco_data);
criterion_main!(benches);
