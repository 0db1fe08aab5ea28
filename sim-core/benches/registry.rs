// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Benchmarks for registry operations
//!
//! These benchmarks measure:
//! - Entity allocation and component attachment throughput
//! - Component read/write access patterns
//! - Presence-filtered iteration at different population densities

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::Vec3;
use sim_core::ecs::components::{Physics, Transform};
use sim_core::ecs::{ComponentKind, Registry};

fn populate(capacity: usize, count: usize) -> Registry {
    let mut registry = Registry::new(capacity);
    for i in 0..count {
        let entity = registry.create_entity().unwrap();
        registry
            .add_component(entity, ComponentKind::Physics)
            .unwrap();
        let mut body = Physics::default();
        body.velocity = Vec3::new(i as f32, 0.0, 0.0);
        registry.set_component(entity, body).unwrap();
    }
    registry
}

fn bench_entity_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("entity_creation");

    for count in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("create_and_attach", count),
            &count,
            |b, &count| {
                b.iter(|| {
                    let mut registry = Registry::new(count);
                    for _ in 0..count {
                        let entity = registry.create_entity().unwrap();
                        registry
                            .add_component(entity, ComponentKind::Physics)
                            .unwrap();
                    }
                    black_box(registry.entity_count())
                })
            },
        );
    }

    group.finish();
}

fn bench_component_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("component_access");

    for count in [100, 1_000, 10_000] {
        let registry = populate(count, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("get_component", count),
            &registry,
            |b, registry| {
                b.iter(|| {
                    let mut sum = 0.0f32;
                    for entity in registry.entities_with(ComponentKind::Physics) {
                        sum += registry
                            .get_component::<Physics>(entity)
                            .unwrap()
                            .velocity
                            .x;
                    }
                    black_box(sum)
                })
            },
        );
    }

    group.finish();
}

fn bench_component_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("component_write");

    for count in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("set_component", count),
            &count,
            |b, &count| {
                let mut registry = populate(count, count);
                let entities: Vec<_> = registry.entities_with(ComponentKind::Physics).collect();
                b.iter(|| {
                    for &entity in &entities {
                        registry
                            .set_component(entity, Transform::from_translation(Vec3::ONE))
                            .unwrap();
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_filtered_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_iteration");

    // Sparse population: capacity far above the live count, the worst case
    // for a capacity-bounded scan
    for (capacity, count) in [(1_000, 100), (10_000, 100), (10_000, 10_000)] {
        let registry = populate(capacity, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("entities_with", format!("{count}_of_{capacity}")),
            &registry,
            |b, registry| {
                b.iter(|| {
                    black_box(
                        registry
                            .entities_with(ComponentKind::Physics)
                            .map(|entity| entity.raw() as u64)
                            .sum::<u64>(),
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_entity_creation,
    bench_component_access,
    bench_component_write,
    bench_filtered_iteration
);
criterion_main!(benches);
