//! Per-frame cost of the haze update and of a full tick.
//!
//! Run with: `cargo bench --bench particle_update`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lightcone::{App, Config, ParticleField, SpawnVolume};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_field_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("particle_update");
    for count in [3_000usize, 30_000, 300_000] {
        let mut field = ParticleField::new(
            count,
            15.0,
            SpawnVolume::default(),
            0.01,
            StdRng::seed_from_u64(1),
        );
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(field.update()))
        });
    }
    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut app = App::new(&Config::default().with_seed(1)).expect("default config is valid");
    c.bench_function("tick_default_scene", |b| b.iter(|| black_box(app.tick())));
}

criterion_group!(benches, bench_field_update, bench_tick);
criterion_main!(benches);
