use super::error::{check_boundary, check_identity, check_index, check_range, OrPanic, SegmentTreeError};
use super::segmenttree::Monoid;

/// 作用素モノイド`F`が作用するモノイド
///
/// 次を満たす必要がある. (検査はしない)
///
/// - `self.map(&self.id(), x) == x`
/// - `self.map(&self.comp(g, f), x) == self.map(g, &self.map(f, x))`
/// - `self.map(f, &self.op(x, y)) == self.op(&self.map(f, x), &self.map(f, y))`
pub trait LazyMonoid: Monoid {
    /// 作用素の型
    type F;

    /// 何もしない作用素を返す
    fn id(&self) -> Self::F;
    /// `f`を作用させた後に`g`を作用させる作用素を返す
    fn comp(&self, g: &Self::F, f: &Self::F) -> Self::F;
    /// `x`に`f`を作用させる
    fn map(&self, f: &Self::F, x: &Self::T) -> Self::T;
}

/// 遅延伝搬セグメントツリー
///
/// 特定の条件を満たすクエリの区間更新・区間取得が可能である.
///
/// ノードの値は常にそのノード自身の作用素まで反映済みで,
/// 作用素は子に伝搬されるまでの間だけ保留される. よって根の値は常に列全体の総積に等しい.
pub struct LazySegmentTree<M: LazyMonoid>(Box<[M::T]>, Box<[M::F]>, usize, M);

impl<M: LazyMonoid> LazySegmentTree<M> {
    /// 全ての要素が`monoid.e()`で初期化された長さ`n`のLazySegmentTreeを構築する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn new(monoid: M, n: usize) -> Self {
        let size = n.max(1).next_power_of_two();
        #[cfg(feature = "tracing")]
        tracing::trace!(n, size, "building lazy segment tree");
        Self(
            (0..size * 2).map(|_| monoid.e()).collect(),
            (0..size).map(|_| monoid.id()).collect(),
            n,
            monoid,
        )
    }

    /// 配列`vec`からLazySegmentTreeを構築する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn from_vec(monoid: M, vec: Vec<M::T>) -> Self {
        let n = vec.len();
        let size = n.max(1).next_power_of_two();
        #[cfg(feature = "tracing")]
        tracing::trace!(n, size, "building lazy segment tree");
        let mut data: Vec<M::T> = Vec::with_capacity(size * 2);
        data.extend((0..size).map(|_| monoid.e()));
        data.extend(vec);
        data.extend((n..size).map(|_| monoid.e()));
        for i in (1..size).rev() {
            data[i] = monoid.op(&data[i * 2], &data[i * 2 + 1]);
        }
        Self(
            data.into_boxed_slice(),
            (0..size).map(|_| monoid.id()).collect(),
            n,
            monoid,
        )
    }

    /// 列の長さを返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.2
    }

    /// 列が空かどうか判定する
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn size(&self) -> usize {
        self.1.len()
    }

    fn log(&self) -> u32 {
        self.size().trailing_zeros()
    }

    /// ノード`k`に`f`を作用させ, 内部ノードなら作用素を保留する
    fn all_apply(&mut self, k: usize, f: &M::F) {
        self.0[k] = self.3.map(f, &self.0[k]);
        if k < self.size() {
            self.1[k] = self.3.comp(f, &self.1[k]);
        }
    }

    /// 内部ノード`k`に保留された作用素を子に伝搬する
    fn push(&mut self, k: usize) {
        let f = std::mem::replace(&mut self.1[k], self.3.id());
        self.all_apply(k * 2, &f);
        self.all_apply(k * 2 + 1, &f);
    }

    /// 根から葉`k`の親までの作用素を伝搬する
    fn push_path(&mut self, k: usize) {
        for i in (1..=self.log()).rev() {
            self.push(k >> i);
        }
    }

    fn update(&mut self, k: usize) {
        self.0[k] = self.3.op(&self.0[k * 2], &self.0[k * 2 + 1]);
    }

    fn update_path(&mut self, k: usize) {
        for i in 1..=self.log() {
            self.update(k >> i);
        }
    }

    /// 指定した位置の値を変更する
    ///
    /// # Constraints
    ///
    /// - `index < self.len()` (満たさない場合はpanicする)
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[track_caller]
    pub fn set(&mut self, index: usize, item: M::T) {
        self.try_set(index, item).or_panic()
    }

    /// [`LazySegmentTree::set`]の検査付き版.
    pub fn try_set(&mut self, index: usize, item: M::T) -> Result<(), SegmentTreeError> {
        check_index(index, self.len())?;
        let k = index + self.size();
        self.push_path(k);
        self.0[k] = item;
        self.update_path(k);
        Ok(())
    }

    /// 指定した位置の要素の可変参照のラッパーを返す
    ///
    /// # Constraints
    ///
    /// - `index < self.len()`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    /// - *O*(log *n*) (デストラクタ)
    #[must_use]
    #[track_caller]
    pub fn setter(&mut self, index: usize) -> impl std::ops::DerefMut<Target = M::T> + use<'_, M> {
        check_index(index, self.len()).or_panic();

        struct Wrapper<'a, M: LazyMonoid>(&'a mut LazySegmentTree<M>, usize);
        impl<M: LazyMonoid> std::ops::Deref for Wrapper<'_, M> {
            type Target = M::T;
            fn deref(&self) -> &M::T {
                &self.0 .0[self.1]
            }
        }
        impl<M: LazyMonoid> std::ops::DerefMut for Wrapper<'_, M> {
            fn deref_mut(&mut self) -> &mut M::T {
                &mut self.0 .0[self.1]
            }
        }
        impl<M: LazyMonoid> Drop for Wrapper<'_, M> {
            fn drop(&mut self) {
                self.0.update_path(self.1);
            }
        }

        let k = index + self.size();
        self.push_path(k);
        Wrapper(self, k)
    }

    /// 指定した位置の値を取得する
    ///
    /// # Constraints
    ///
    /// - `index < self.len()` (満たさない場合はpanicする)
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    #[track_caller]
    pub fn get(&mut self, index: usize) -> &M::T {
        self.try_get(index).or_panic()
    }

    /// [`LazySegmentTree::get`]の検査付き版.
    pub fn try_get(&mut self, index: usize) -> Result<&M::T, SegmentTreeError> {
        check_index(index, self.len())?;
        let k = index + self.size();
        self.push_path(k);
        Ok(&self.0[k])
    }

    /// 指定した位置の値を取得する
    ///
    /// 木を書き換えずに, 経路上で保留されている作用素を合成して求める.
    ///
    /// # Constraints
    ///
    /// - `index < self.len()`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    #[track_caller]
    pub fn get_imu(&self, index: usize) -> M::T {
        check_index(index, self.len()).or_panic();
        let k = index + self.size();
        let mut f = self.3.id();
        for i in 1..=self.log() {
            f = self.3.comp(&self.1[k >> i], &f);
        }
        self.3.map(&f, &self.0[k])
    }

    /// 指定した位置の要素に作用素`f`を適用する
    ///
    /// # Constraints
    ///
    /// - `index < self.len()` (満たさない場合はpanicする)
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[track_caller]
    pub fn apply_at(&mut self, index: usize, f: &M::F) {
        self.try_apply_at(index, f).or_panic()
    }

    /// [`LazySegmentTree::apply_at`]の検査付き版.
    pub fn try_apply_at(&mut self, index: usize, f: &M::F) -> Result<(), SegmentTreeError> {
        check_index(index, self.len())?;
        let k = index + self.size();
        self.push_path(k);
        self.0[k] = self.3.map(f, &self.0[k]);
        self.update_path(k);
        Ok(())
    }

    /// 指定した区間の値の総積を計算する
    ///
    /// # Constraints
    ///
    /// - `range`は`0..self.len()`に含まれる区間である. (満たさない場合はpanicする)
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[track_caller]
    pub fn prod(&mut self, range: impl std::ops::RangeBounds<usize>) -> M::T {
        self.try_prod(range).or_panic()
    }

    /// [`LazySegmentTree::prod`]の検査付き版.
    pub fn try_prod(
        &mut self,
        range: impl std::ops::RangeBounds<usize>,
    ) -> Result<M::T, SegmentTreeError> {
        let (left, right) = check_range(&range, self.len())?;
        if left == right {
            return Ok(self.3.e());
        }
        let size = self.size();
        let mut left_index = left + size;
        let mut right_index = right + size;
        for i in (1..=self.log()).rev() {
            if (left_index >> i) << i != left_index {
                self.push(left_index >> i);
            }
            if (right_index >> i) << i != right_index {
                self.push((right_index - 1) >> i);
            }
        }
        let mut left_val = self.3.e();
        let mut right_val = self.3.e();
        while left_index < right_index {
            if left_index & 1 == 1 {
                left_val = self.3.op(&left_val, &self.0[left_index]);
                left_index += 1;
            }
            if right_index & 1 == 1 {
                right_index -= 1;
                right_val = self.3.op(&self.0[right_index], &right_val);
            }
            left_index >>= 1;
            right_index >>= 1;
        }
        Ok(self.3.op(&left_val, &right_val))
    }

    /// 全要素の総積を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn all_prod(&self) -> &M::T {
        &self.0[1]
    }

    /// 指定した区間に作用素`f`を適用する
    ///
    /// # Constraints
    ///
    /// - `range`は`0..self.len()`に含まれる区間である. (満たさない場合はpanicする)
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[track_caller]
    pub fn apply(&mut self, range: impl std::ops::RangeBounds<usize>, f: &M::F) {
        self.try_apply(range, f).or_panic()
    }

    /// [`LazySegmentTree::apply`]の検査付き版.
    pub fn try_apply(
        &mut self,
        range: impl std::ops::RangeBounds<usize>,
        f: &M::F,
    ) -> Result<(), SegmentTreeError> {
        let (left, right) = check_range(&range, self.len())?;
        if left == right {
            return Ok(());
        }
        let size = self.size();
        let log = self.log();
        let left = left + size;
        let right = right + size;
        for i in (1..=log).rev() {
            if (left >> i) << i != left {
                self.push(left >> i);
            }
            if (right >> i) << i != right {
                self.push((right - 1) >> i);
            }
        }
        {
            let mut left = left;
            let mut right = right;
            while left < right {
                if left & 1 == 1 {
                    self.all_apply(left, f);
                    left += 1;
                }
                if right & 1 == 1 {
                    right -= 1;
                    self.all_apply(right, f);
                }
                left >>= 1;
                right >>= 1;
            }
        }
        for i in 1..=log {
            if (left >> i) << i != left {
                self.update(left >> i);
            }
            if (right >> i) << i != right {
                self.update((right - 1) >> i);
            }
        }
        Ok(())
    }

    /// `f(self.prod(index..x))`だが`!f(self.prod(index..=x))`な`x`を見つけるような二分探索を行う.
    ///
    /// 見つからなかった場合は`self.len()`を返す.
    ///
    /// # Constraints
    ///
    /// - `index <= self.len()`
    /// - `f(monoid.e())`は`true`である.
    /// - `f`は単調である.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[track_caller]
    pub fn max_right(&mut self, index: usize, f: impl FnMut(&M::T) -> bool) -> usize {
        self.try_max_right(index, f).or_panic()
    }

    /// [`LazySegmentTree::max_right`]の検査付き版.
    pub fn try_max_right(
        &mut self,
        index: usize,
        mut f: impl FnMut(&M::T) -> bool,
    ) -> Result<usize, SegmentTreeError> {
        check_boundary(index, self.len())?;
        let mut acc = self.3.e();
        check_identity(f(&acc))?;
        if index == self.len() {
            return Ok(index);
        }
        let size = self.size();
        let mut k = index + size;
        self.push_path(k);
        loop {
            while k & 1 == 0 {
                k >>= 1;
            }
            let temp = self.3.op(&acc, &self.0[k]);
            if !f(&temp) {
                while k < size {
                    self.push(k);
                    k <<= 1;
                    let temp = self.3.op(&acc, &self.0[k]);
                    if f(&temp) {
                        acc = temp;
                        k += 1;
                    }
                }
                return Ok(k - size);
            }
            acc = temp;
            k += 1;
            if k.is_power_of_two() {
                break;
            }
        }
        Ok(self.len())
    }

    /// `f(self.prod(x..index))`だが`!f(self.prod(x - 1..index))`な`x`を見つけるような二分探索を行う.
    ///
    /// 見つからなかった場合は`0`を返す.
    ///
    /// # Constraints
    ///
    /// - `index <= self.len()`
    /// - `f(monoid.e())`は`true`である.
    /// - `f`は単調である.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[track_caller]
    pub fn min_left(&mut self, index: usize, f: impl FnMut(&M::T) -> bool) -> usize {
        self.try_min_left(index, f).or_panic()
    }

    /// [`LazySegmentTree::min_left`]の検査付き版.
    pub fn try_min_left(
        &mut self,
        index: usize,
        mut f: impl FnMut(&M::T) -> bool,
    ) -> Result<usize, SegmentTreeError> {
        check_boundary(index, self.len())?;
        let mut acc = self.3.e();
        check_identity(f(&acc))?;
        if index == 0 {
            return Ok(0);
        }
        let size = self.size();
        let mut k = index + size;
        self.push_path(k - 1);
        loop {
            k -= 1;
            while k > 1 && k & 1 == 1 {
                k >>= 1;
            }
            let temp = self.3.op(&self.0[k], &acc);
            if !f(&temp) {
                while k < size {
                    self.push(k);
                    k = k * 2 + 1;
                    let temp = self.3.op(&self.0[k], &acc);
                    if f(&temp) {
                        acc = temp;
                        k -= 1;
                    }
                }
                return Ok(k + 1 - size);
            }
            acc = temp;
            if k.is_power_of_two() {
                break;
            }
        }
        Ok(0)
    }
}

impl<M: LazyMonoid + Default> From<Vec<M::T>> for LazySegmentTree<M> {
    fn from(value: Vec<M::T>) -> Self {
        Self::from_vec(M::default(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{RangeAddMin, RangeAddSum};

    #[test]
    fn minmax_add() {
        struct TestMonoid;
        impl super::super::util::Magma for TestMonoid {
            type T = (i32, i32);
            fn op(&self, &a: &(i32, i32), &b: &(i32, i32)) -> (i32, i32) {
                (a.0.min(b.0), a.1.max(b.1))
            }
        }
        impl super::super::util::Identity for TestMonoid {
            fn e(&self) -> (i32, i32) {
                (i32::MAX, i32::MIN)
            }
        }
        impl super::super::util::Associativity for TestMonoid {}
        impl LazyMonoid for TestMonoid {
            type F = i32;
            fn id(&self) -> i32 {
                0
            }
            fn comp(&self, &g: &i32, &f: &i32) -> i32 {
                g + f
            }
            fn map(&self, &f: &i32, &x: &(i32, i32)) -> (i32, i32) {
                (
                    if x.0 == i32::MAX { i32::MAX } else { x.0 + f },
                    if x.1 == i32::MIN { i32::MIN } else { x.1 + f },
                )
            }
        }

        let mut seg = LazySegmentTree::from_vec(TestMonoid, (0..10).map(|i| (i, i)).collect());
        assert_eq!(seg.prod(2..7), (2, 6));
        assert_eq!(seg.prod(5..), (5, 9));
        seg.apply(1..4, &12);
        assert_eq!(seg.prod(2..7), (4, 15));
        assert_eq!(seg.prod(5..), (5, 9));
        seg.apply(3..8, &-20);
        assert_eq!(seg.prod(2..7), (-16, 14));
        assert_eq!(seg.prod(5..), (-15, 9));
        assert_eq!(*seg.all_prod(), (-16, 14));
    }

    #[test]
    fn range_add_sum() {
        let mut seg = LazySegmentTree::from_vec(
            RangeAddSum::<i64>::default(),
            [1, 2, 3, 4, 5].into_iter().map(RangeAddSum::leaf).collect(),
        );
        seg.apply(1..4, &10);
        assert_eq!(seg.prod(0..5).0, 45);
        assert_eq!(seg.prod(1..3).0, 25);
        assert_eq!(seg.get_imu(2).0, 13);
        assert_eq!(*seg.get(3), (14, 1));
        assert_eq!(seg.all_prod().0, 45);

        seg.set(0, RangeAddSum::leaf(-1));
        seg.apply_at(4, &100);
        assert_eq!(seg.prod(..).0, 143);
        assert_eq!(seg.get_imu(4).0, 105);

        *seg.setter(1) = RangeAddSum::leaf(0);
        assert_eq!(seg.prod(0..2).0, -1);
        assert_eq!(seg.all_prod().0, 131);
    }

    #[test]
    fn root_is_always_evaluated() {
        let mut seg: LazySegmentTree<RangeAddSum<i64>> =
            (0..8i64).map(RangeAddSum::leaf).collect::<Vec<_>>().into();
        seg.apply(.., &3);
        assert_eq!(seg.all_prod().0, 28 + 24);
        seg.apply(0..8, &-1);
        assert_eq!(seg.all_prod().0, 28 + 16);
        assert_eq!(seg.get_imu(7).0, 9);
    }

    #[test]
    fn identity_tag_changes_nothing() {
        let mut seg = LazySegmentTree::from_vec(RangeAddMin::<i32>::default(), vec![4, 1, 7, 3, 9, 2]);
        let before: Vec<_> = (0..6).map(|i| seg.get_imu(i)).collect();
        seg.apply(1..5, &0);
        seg.apply(.., &0);
        let after: Vec<_> = (0..6).map(|i| *seg.get(i)).collect();
        assert_eq!(before, after);
        assert_eq!(seg.prod(2..6), 2);
    }

    #[test]
    fn binary_search() {
        let mut seg = LazySegmentTree::from_vec(
            RangeAddSum::<i64>::default(),
            vec![RangeAddSum::leaf(1); 10],
        );
        seg.apply(3..6, &4);
        // [1, 1, 1, 5, 5, 5, 1, 1, 1, 1]
        assert_eq!(seg.max_right(0, |&(s, _)| s <= 8), 4);
        assert_eq!(seg.max_right(4, |&(s, _)| s <= 100), 10);
        assert_eq!(seg.max_right(10, |_| true), 10);
        assert_eq!(seg.min_left(10, |&(s, _)| s < 9), 6);
        assert_eq!(seg.min_left(3, |&(s, _)| s < 9), 0);
        assert_eq!(seg.min_left(0, |_| true), 0);
    }

    #[test]
    fn empty() {
        let mut seg = LazySegmentTree::new(RangeAddMin::<i64>::default(), 0);
        assert!(seg.is_empty());
        seg.apply(0..0, &5);
        assert_eq!(seg.prod(0..0), i64::MAX);
        assert_eq!(*seg.all_prod(), i64::MAX);
        assert_eq!(seg.max_right(0, |_| true), 0);
    }

    #[test]
    fn checked() {
        let mut seg = LazySegmentTree::from_vec(RangeAddMin::<i32>::default(), vec![1, 2, 3]);
        assert_eq!(
            seg.try_apply(2..5, &1),
            Err(SegmentTreeError::InvalidRange { start: 2, end: 5, len: 3 })
        );
        assert_eq!(seg.try_apply_at(3, &1), Err(SegmentTreeError::IndexOutOfBounds { index: 3, len: 3 }));
        assert!(seg.try_get(3).is_err());
        assert!(seg.try_set(3, 0).is_err());
        assert!(seg.try_prod(..4).is_err());
        assert_eq!(seg.try_max_right(0, |&v| v < 0), Err(SegmentTreeError::IdentityRejected));
        assert!(seg.try_min_left(4, |_| true).is_err());
        assert_eq!(seg.prod(..), 1);
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn inverted_range() {
        let mut seg = LazySegmentTree::new(RangeAddMin::<i32>::default(), 4);
        let (start, end) = (3, 1);
        seg.apply(start..end, &1);
    }
}
