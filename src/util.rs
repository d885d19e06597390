/// 「0」に相当する値が存在することを表すトレイト
pub trait HasZero {
    /// 0の値を返す
    fn zero() -> Self;
}
/// 「1」に相当する値が存在することを表すトレイト
pub trait HasOne {
    /// 1の値を返す
    fn one() -> Self;
}
/// その型に最小値が存在することを表すトレイト
pub trait HasMin {
    /// その型が取り得る最も小さい値を返す
    fn min_value() -> Self;
}
/// その型に最大値が存在することを表すトレイト
pub trait HasMax {
    /// その型が取り得る最も大きい値を返す
    fn max_value() -> Self;
}

/// 整数型にHasZero, HasOne, HasMin, HasMaxを実装するマクロ
macro_rules! impl_zero {
    ($($t: ty),*) => {$(
        impl HasZero for $t {
            fn zero() -> $t { 0 }
        }
        impl HasOne for $t {
            fn one() -> $t { 1 }
        }
        impl HasMin for $t {
            fn min_value() -> $t { Self::MIN }
        }
        impl HasMax for $t {
            fn max_value() -> $t { Self::MAX }
        }
    )*};
}

impl_zero! { u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize }

/// マグマ. 二項演算で閉じている代数構造
pub trait Magma {
    /// マグマの元の型
    type T: Eq;
    /// 二項演算
    fn op(&self, lhs: &Self::T, rhs: &Self::T) -> Self::T;
}

/// マグマに単位元があることを表すトレイト
pub trait Identity: Magma<T: Clone> {
    /// 単位元を構築して返す
    fn e(&self) -> Self::T;
}

/// マグマが結合律が成り立つことを表すトレイト
pub trait Associativity: Magma {}

/// `RangeBounds`を長さ`len`の列の上の半開区間`(start, end)`に直す.
///
/// 区間が`0..len`に収まるかはここでは調べない.
pub(crate) fn to_half_open(range: &impl std::ops::RangeBounds<usize>, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        std::ops::Bound::Included(&i) => i,
        std::ops::Bound::Excluded(&i) => i.saturating_add(1),
        std::ops::Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        std::ops::Bound::Included(&i) => i.saturating_add(1),
        std::ops::Bound::Excluded(&i) => i,
        std::ops::Bound::Unbounded => len,
    };
    (start, end)
}
