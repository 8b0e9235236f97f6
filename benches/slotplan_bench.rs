//! Criterion benchmarks for u-slotplan.
//!
//! Uses seeded random instances: a contiguous day of slots with random
//! lengths and a handful of consumers with random needs and priorities.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_slotplan::csp::{ArcConsistency, BacktrackingSolver, Domains, SlotSolver};
use u_slotplan::model::{Consumer, PriorityMap, SlotCatalog, SlotProblem, TimeSlot};

// ===========================================================================
// Instance generation
// ===========================================================================

fn random_problem(slots: usize, consumers: usize, seed: u64) -> SlotProblem {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut start = 6;
    let catalog = SlotCatalog::new((0..slots).map(|_| {
        let len = rng.random_range(1..=3);
        let slot = TimeSlot::new(format!("{start}-{}", start + len), start, start + len);
        start += len;
        slot
    }));

    let labels = ["high", "medium", "low"];
    let priorities = PriorityMap::default();
    let consumers = (0..consumers)
        .map(|i| {
            let need = rng.random_range(1..=4);
            let label = labels[rng.random_range(0..labels.len())];
            Consumer::new(format!("P{i}"), need, label, &priorities)
        })
        .collect();

    let budget = catalog.total_duration();
    SlotProblem::new(catalog, consumers, budget).expect("generated instance is valid")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_domain_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain_generation");
    group.sample_size(20);

    for slots in [6usize, 10, 14] {
        let problem = random_problem(slots, 4, 42);
        group.bench_with_input(BenchmarkId::from_parameter(slots), &problem, |b, p| {
            b.iter(|| black_box(Domains::generate(black_box(p))))
        });
    }
    group.finish();
}

fn bench_ac3(c: &mut Criterion) {
    let mut group = c.benchmark_group("ac3");
    group.sample_size(10);

    for (slots, consumers) in [(6usize, 3usize), (8, 4), (10, 5)] {
        let problem = random_problem(slots, consumers, 7);
        let domains = Domains::generate(&problem);
        group.bench_with_input(
            BenchmarkId::new(format!("s{slots}_c{consumers}"), slots),
            &(problem, domains),
            |b, (p, d)| {
                b.iter(|| {
                    let mut local = d.clone();
                    black_box(ArcConsistency::run(p, &mut local))
                })
            },
        );
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    for (slots, consumers) in [(6usize, 3usize), (8, 4), (10, 5)] {
        let problem = random_problem(slots, consumers, 3);
        let solver = BacktrackingSolver::default();
        group.bench_with_input(
            BenchmarkId::new(format!("s{slots}_c{consumers}"), slots),
            &problem,
            |b, p| b.iter(|| black_box(solver.solve(black_box(p)))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_domain_generation, bench_ac3, bench_solve);
criterion_main!(benches);
