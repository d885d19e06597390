use monoid_segtree::algebra::{Max, RangeAddMin, RangeAssignSum};
use monoid_segtree::{LazySegmentTree, SegmentTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_range(rng: &mut StdRng, n: usize) -> std::ops::Range<usize> {
    let a = rng.gen_range(0..=n);
    let b = rng.gen_range(0..=n);
    a.min(b)..a.max(b)
}

#[test]
fn segment_tree_max() {
    let mut rng = StdRng::seed_from_u64(12345);
    let size = 1000;
    let mut v: Vec<i32> = (0..size).map(|_| rng.gen_range(-1000..1000)).collect();
    let mut seg = SegmentTree::from_vec(Max::<i32>::default(), v.clone());

    for _ in 0..1000 {
        let i = rng.gen_range(0..size);
        let x = rng.gen_range(-1000..1000);
        seg.set(i, x);
        v[i] = x;

        let r = random_range(&mut rng, size);
        let expected = v[r.clone()].iter().copied().max().unwrap_or(i32::MIN);
        assert_eq!(seg.prod(r.clone()), expected);

        let threshold = rng.gen_range(-1000..1000);
        let x = seg.max_right(r.start, |&m| m < threshold);
        assert!(v[r.start..x].iter().all(|&e| e < threshold));
        assert!(x == size || v[x] >= threshold);
    }
}

#[test]
fn lazy_segment_tree_add_min() {
    let mut rng = StdRng::seed_from_u64(67890);
    let size = 1000;
    let mut v: Vec<i64> = (0..size).map(|_| rng.gen_range(0..256)).collect();
    let mut seg = LazySegmentTree::from_vec(RangeAddMin::<i64>::default(), v.clone());

    for _ in 0..1000 {
        let x = rng.gen_range(-128..128);
        let r = random_range(&mut rng, size);
        seg.apply(r.clone(), &x);
        for e in &mut v[r] {
            *e += x;
        }

        let r = random_range(&mut rng, size);
        let expected = v[r.clone()].iter().copied().min().unwrap_or(i64::MAX);
        assert_eq!(seg.prod(r), expected);
        assert_eq!(*seg.all_prod(), *v.iter().min().unwrap());
    }
}

#[test]
fn lazy_segment_tree_assign_sum() {
    let mut rng = StdRng::seed_from_u64(24680);
    let size = 300;
    let mut v = vec![0i64; size];
    let mut seg = LazySegmentTree::new(RangeAssignSum::<i64>::default(), size);
    for i in 0..size {
        seg.set(i, RangeAssignSum::leaf(0));
    }

    for _ in 0..1000 {
        let r = random_range(&mut rng, size);
        let x = rng.gen_range(-50..50);
        seg.apply(r.clone(), &Some(x));
        for e in &mut v[r] {
            *e = x;
        }

        let i = rng.gen_range(0..size);
        assert_eq!(seg.get_imu(i).0, v[i]);

        let r = random_range(&mut rng, size);
        assert_eq!(seg.prod(r.clone()).0, v[r].iter().sum::<i64>());
    }
}
