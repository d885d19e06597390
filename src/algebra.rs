//! よく使うモノイドと作用素モノイドの実装

use super::lazysegtree::LazyMonoid;
use super::util::{Associativity, HasMax, HasMin, HasOne, HasZero, Identity, Magma};
use std::marker::PhantomData;
use std::ops::{Add, Mul};

/// 加法と乗法を持つ整数のような型
pub trait Num:
    Copy + Eq + HasZero + HasOne + Add<Output = Self> + Mul<Output = Self>
{
}
impl<T: Copy + Eq + HasZero + HasOne + Add<Output = T> + Mul<Output = T>> Num for T {}

/// 和のモノイド
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum<T>(PhantomData<T>);

impl<T: Num> Magma for Sum<T> {
    type T = T;
    fn op(&self, &a: &T, &b: &T) -> T {
        a + b
    }
}
impl<T: Num> Identity for Sum<T> {
    fn e(&self) -> T {
        T::zero()
    }
}
impl<T: Num> Associativity for Sum<T> {}

/// 最小値のモノイド
#[derive(Clone, Copy, Debug, Default)]
pub struct Min<T>(PhantomData<T>);

impl<T: Copy + Ord> Magma for Min<T> {
    type T = T;
    fn op(&self, &a: &T, &b: &T) -> T {
        a.min(b)
    }
}
impl<T: Copy + Ord + HasMax> Identity for Min<T> {
    fn e(&self) -> T {
        T::max_value()
    }
}
impl<T: Copy + Ord> Associativity for Min<T> {}

/// 最大値のモノイド
#[derive(Clone, Copy, Debug, Default)]
pub struct Max<T>(PhantomData<T>);

impl<T: Copy + Ord> Magma for Max<T> {
    type T = T;
    fn op(&self, &a: &T, &b: &T) -> T {
        a.max(b)
    }
}
impl<T: Copy + Ord + HasMin> Identity for Max<T> {
    fn e(&self) -> T {
        T::min_value()
    }
}
impl<T: Copy + Ord> Associativity for Max<T> {}

/// 単位元と二項演算のクロージャから作るモノイド
///
/// `op`が結合的で`e`がその単位元であることは呼び出し側が保証する.
#[derive(Clone)]
pub struct FnMonoid<T, Op> {
    e: T,
    op: Op,
}

impl<T: Eq + Clone, Op: Fn(&T, &T) -> T> FnMonoid<T, Op> {
    pub fn new(e: T, op: Op) -> Self {
        Self { e, op }
    }
}

impl<T: Eq, Op: Fn(&T, &T) -> T> Magma for FnMonoid<T, Op> {
    type T = T;
    fn op(&self, a: &T, b: &T) -> T {
        (self.op)(a, b)
    }
}
impl<T: Eq + Clone, Op: Fn(&T, &T) -> T> Identity for FnMonoid<T, Op> {
    fn e(&self) -> T {
        self.e.clone()
    }
}
impl<T: Eq, Op: Fn(&T, &T) -> T> Associativity for FnMonoid<T, Op> {}

/// 和と長さの組`(sum, len)`に対する総和のモノイド
///
/// 区間の長さに比例する作用素のための共通部分
fn sum_with_len<T: Num>(a: &(T, T), b: &(T, T)) -> (T, T) {
    (a.0 + b.0, a.1 + b.1)
}

macro_rules! impl_sum_with_len {
    ($($name: ident),*) => {$(
        impl<T: Num> Magma for $name<T> {
            type T = (T, T);
            fn op(&self, a: &(T, T), b: &(T, T)) -> (T, T) {
                sum_with_len(a, b)
            }
        }
        impl<T: Num> Identity for $name<T> {
            fn e(&self) -> (T, T) {
                (T::zero(), T::zero())
            }
        }
        impl<T: Num> Associativity for $name<T> {}
        impl<T: Num> $name<T> {
            /// 値`v`の葉`(v, 1)`を作る
            pub fn leaf(v: T) -> (T, T) {
                (v, T::one())
            }
        }
    )*};
}

impl_sum_with_len! { RangeAddSum, RangeAssignSum, RangeAffineSum }

/// 区間加算・区間和
///
/// 要素は`(sum, len)`で持ち, 作用素`x`は区間の全ての要素に`x`を足す.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeAddSum<T>(PhantomData<T>);

impl<T: Num> LazyMonoid for RangeAddSum<T> {
    type F = T;
    fn id(&self) -> T {
        T::zero()
    }
    fn comp(&self, &g: &T, &f: &T) -> T {
        g + f
    }
    fn map(&self, &f: &T, &(sum, len): &(T, T)) -> (T, T) {
        (sum + f * len, len)
    }
}

/// 区間代入・区間和
///
/// 作用素`Some(x)`は区間の全ての要素を`x`にし, `None`は何もしない.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeAssignSum<T>(PhantomData<T>);

impl<T: Num> LazyMonoid for RangeAssignSum<T> {
    type F = Option<T>;
    fn id(&self) -> Option<T> {
        None
    }
    fn comp(&self, g: &Option<T>, f: &Option<T>) -> Option<T> {
        g.or(*f)
    }
    fn map(&self, f: &Option<T>, &(sum, len): &(T, T)) -> (T, T) {
        match *f {
            Some(v) => (v * len, len),
            None => (sum, len),
        }
    }
}

/// 区間アフィン変換・区間和
///
/// 作用素`(a, b)`は区間の全ての要素`x`を`a * x + b`にする. 作用素の合成は可換でない.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeAffineSum<T>(PhantomData<T>);

impl<T: Num> LazyMonoid for RangeAffineSum<T> {
    type F = (T, T);
    fn id(&self) -> (T, T) {
        (T::one(), T::zero())
    }
    fn comp(&self, &(ga, gb): &(T, T), &(fa, fb): &(T, T)) -> (T, T) {
        (ga * fa, ga * fb + gb)
    }
    fn map(&self, &(a, b): &(T, T), &(sum, len): &(T, T)) -> (T, T) {
        (a * sum + b * len, len)
    }
}

/// 区間加算・区間最小値
///
/// 単位元(`T::max_value()`)には加算しない.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeAddMin<T>(PhantomData<T>);

impl<T: Num + Ord + HasMax> Magma for RangeAddMin<T> {
    type T = T;
    fn op(&self, &a: &T, &b: &T) -> T {
        a.min(b)
    }
}
impl<T: Num + Ord + HasMax> Identity for RangeAddMin<T> {
    fn e(&self) -> T {
        T::max_value()
    }
}
impl<T: Num + Ord + HasMax> Associativity for RangeAddMin<T> {}
impl<T: Num + Ord + HasMax> LazyMonoid for RangeAddMin<T> {
    type F = T;
    fn id(&self) -> T {
        T::zero()
    }
    fn comp(&self, &g: &T, &f: &T) -> T {
        g + f
    }
    fn map(&self, &f: &T, &x: &T) -> T {
        if x == T::max_value() {
            x
        } else {
            x + f
        }
    }
}

/// 区間加算・区間最大値
///
/// 単位元(`T::min_value()`)には加算しない.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeAddMax<T>(PhantomData<T>);

impl<T: Num + Ord + HasMin> Magma for RangeAddMax<T> {
    type T = T;
    fn op(&self, &a: &T, &b: &T) -> T {
        a.max(b)
    }
}
impl<T: Num + Ord + HasMin> Identity for RangeAddMax<T> {
    fn e(&self) -> T {
        T::min_value()
    }
}
impl<T: Num + Ord + HasMin> Associativity for RangeAddMax<T> {}
impl<T: Num + Ord + HasMin> LazyMonoid for RangeAddMax<T> {
    type F = T;
    fn id(&self) -> T {
        T::zero()
    }
    fn comp(&self, &g: &T, &f: &T) -> T {
        g + f
    }
    fn map(&self, &f: &T, &x: &T) -> T {
        if x == T::min_value() {
            x
        } else {
            x + f
        }
    }
}
