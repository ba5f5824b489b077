use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use relist_core::animation::FactorAnimator;
use relist_core::capability::{ListItem, Measurable};
use relist_core::engine::ListAnimator;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    key: u32,
    width: f32,
}

impl Measurable for Cell {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        16.0
    }

    fn spacing_end(&self, is_last: bool) -> f32 {
        if is_last { 0.0 } else { 4.0 }
    }
}

impl ListItem for Cell {
    fn as_measurable(&self) -> Option<&dyn Measurable> {
        Some(self)
    }
}

fn cells(keys: impl Iterator<Item = u32>) -> Vec<Cell> {
    keys.map(|key| Cell {
        key,
        width: 8.0 + (key % 5) as f32,
    })
    .collect()
}

/// Drop every third key and append as many new ones.
fn churned(len: u32) -> Vec<Cell> {
    cells((0..len).filter(|k| k % 3 != 0).chain(len..len + len / 3))
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    for len in [16u32, 128, 1024] {
        group.throughput(Throughput::Elements(u64::from(len)));

        group.bench_with_input(BenchmarkId::new("rebuild", len), &len, |b, &len| {
            let mut animator: ListAnimator<Cell> = ListAnimator::new(|| {});
            b.iter(|| {
                animator.reconcile(black_box(cells(0..len)), false);
            });
        });

        group.bench_with_input(BenchmarkId::new("churn_and_settle", len), &len, |b, &len| {
            let mut animator: ListAnimator<Cell> =
                ListAnimator::with_driver(|| {}, FactorAnimator::new(Duration::from_millis(100)));
            b.iter(|| {
                animator.reconcile(cells(0..len), false);
                animator.reconcile(black_box(churned(len)), true);
                for _ in 0..6 {
                    animator.tick(Duration::from_millis(20));
                }
                black_box(animator.metadata().total_width())
            });
        });

        group.bench_with_input(BenchmarkId::new("reorder", len), &len, |b, &len| {
            let mut animator: ListAnimator<Cell> = ListAnimator::new(|| {});
            let forward = cells(0..len);
            let reversed = cells((0..len).rev());
            b.iter(|| {
                animator.reconcile(forward.clone(), true);
                animator.apply_animation(1.0.into());
                animator.reconcile(black_box(reversed.clone()), true);
                animator.apply_animation(1.0.into());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
