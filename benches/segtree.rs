use criterion::{black_box, criterion_group, criterion_main, Criterion};
use monoid_segtree::algebra::{RangeAddSum, Sum};
use monoid_segtree::{LazySegmentTree, SegmentTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZE: usize = 10000;

fn ranges(rng: &mut StdRng) -> Vec<(usize, usize, u64)> {
    (0..1000)
        .map(|_| {
            let a = rng.gen_range(0..=SIZE);
            let b = rng.gen_range(0..=SIZE);
            (a.min(b), a.max(b), rng.gen_range(0..256))
        })
        .collect()
}

fn bench_segment_tree(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let seg = SegmentTree::from_vec(
        Sum::<u64>::default(),
        (0..SIZE).map(|_| rng.gen_range(0..256)).collect(),
    );
    let cases = ranges(&mut rng);

    c.bench_function("segtree_prod", |b| {
        b.iter(|| {
            for &(l, r, _) in &cases {
                black_box(seg.prod(l..r));
            }
        })
    });
}

fn bench_lazy_segment_tree(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let mut seg = LazySegmentTree::from_vec(
        RangeAddSum::<u64>::default(),
        (0..SIZE)
            .map(|_| RangeAddSum::leaf(rng.gen_range(0..256)))
            .collect(),
    );
    let cases = ranges(&mut rng);

    c.bench_function("lazy_segtree_range_add", |b| {
        b.iter(|| {
            for &(l, r, x) in &cases {
                seg.apply(l..r, &x);
            }
        })
    });

    c.bench_function("lazy_segtree_prod", |b| {
        b.iter(|| {
            for &(l, r, _) in &cases {
                black_box(seg.prod(l..r));
            }
        })
    });
}

criterion_group!(benches, bench_segment_tree, bench_lazy_segment_tree);
criterion_main!(benches);
