use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};

use strata_blocks::BlockRegistry;
use strata_chunk::{ChunkBuf, ChunkNeighbors};
use strata_mesh_cpu::build_chunk_mesh;
use strata_world::{ChunkCoord, ChunkDims, NoiseDensity, TerrainConfig, WorldContext};

fn noise_context() -> WorldContext {
    let terrain = TerrainConfig::default();
    WorldContext::new(
        ChunkDims::default(),
        Arc::new(BlockRegistry::builtin()),
        Arc::new(NoiseDensity::new(&terrain)),
        terrain,
    )
    .unwrap()
}

fn bench_populate_default_dims(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate_default_dims");
    let ctx = noise_context();
    group.bench_function("generate_16x128x16", |b| {
        b.iter(|| {
            let buf = ChunkBuf::generate(&ctx, ChunkCoord::new(0, 0));
            black_box(buf);
        })
    });
    group.finish();
}

fn bench_mesh_default_dims(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_default_dims");
    let ctx = noise_context();
    let buf = ChunkBuf::generate(&ctx, ChunkCoord::new(0, 0));
    let east = ChunkBuf::generate(&ctx, ChunkCoord::new(1, 0));
    group.bench_function("build_unlinked_16x128x16", |b| {
        b.iter(|| {
            let mesh = build_chunk_mesh(&buf, &ChunkNeighbors::none(), &ctx.registry);
            black_box(mesh);
        })
    });
    group.bench_function("regenerate_linked_16x128x16", |b| {
        let nb = ChunkNeighbors::none().with(strata_blocks::Face::East, &east);
        let mut mesh = build_chunk_mesh(&buf, &nb, &ctx.registry);
        b.iter(|| {
            mesh.regenerate(&buf, &nb, &ctx.registry);
            black_box(mesh.face_count());
        })
    });
    group.finish();
}

criterion_group!(benches, bench_populate_default_dims, bench_mesh_default_dims);
criterion_main!(benches);
