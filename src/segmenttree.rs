use super::error::{check_boundary, check_identity, check_index, check_range, OrPanic, SegmentTreeError};
use super::util::{Associativity, Identity};

pub trait Monoid: Associativity + Identity {}
impl<T: Associativity + Identity> Monoid for T {}

/// セグメント木
///
/// 長さ`2 * size`の配列上の完全二分木で, 根が`1`, ノード`k`の子が`2k`と`2k + 1`,
/// `index`番目の要素が葉`index + size`に置かれる. `size`は`n`以上の最小の2冪.
#[derive(Clone)]
pub struct SegmentTree<M: Monoid>(Box<[M::T]>, usize, M);

impl<M: Monoid> SegmentTree<M> {
    /// 全ての要素が`monoid.e()`で初期化された長さ`n`のSegmentTreeを構築する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn new(monoid: M, n: usize) -> Self {
        let size = n.max(1).next_power_of_two();
        #[cfg(feature = "tracing")]
        tracing::trace!(n, size, "building segment tree");
        Self((0..size * 2).map(|_| monoid.e()).collect(), n, monoid)
    }

    /// 配列`vec`からSegmentTreeを構築する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn from_vec(monoid: M, vec: Vec<M::T>) -> Self {
        let n = vec.len();
        let size = n.max(1).next_power_of_two();
        #[cfg(feature = "tracing")]
        tracing::trace!(n, size, "building segment tree");
        let mut data: Vec<M::T> = Vec::with_capacity(size * 2);
        data.extend((0..size).map(|_| monoid.e()));
        data.extend(vec);
        data.extend((n..size).map(|_| monoid.e()));
        for i in (1..size).rev() {
            data[i] = monoid.op(&data[i * 2], &data[i * 2 + 1]);
        }
        Self(data.into_boxed_slice(), n, monoid)
    }

    /// SegmentTreeの長さを返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(*1*)
    #[must_use]
    pub fn len(&self) -> usize {
        self.1
    }

    /// SegmentTreeが空かどうか調べる
    ///
    /// # Time complexity
    ///
    /// - *O*(*1*)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.1 == 0
    }

    fn size(&self) -> usize {
        self.0.len() >> 1
    }

    /// SegmentTreeの`index`番目の値を`value`に設定する.
    ///
    /// # Constraints
    ///
    /// - `index < self.len()` (満たさない場合はpanicする)
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[track_caller]
    pub fn set(&mut self, index: usize, value: M::T) {
        self.try_set(index, value).or_panic()
    }

    /// [`SegmentTree::set`]の検査付き版. 範囲外なら何もせずにエラーを返す.
    pub fn try_set(&mut self, index: usize, value: M::T) -> Result<(), SegmentTreeError> {
        check_index(index, self.len())?;
        let k = index + self.size();
        self.0[k] = value;
        self.update(k);
        Ok(())
    }

    /// SegmentTreeの`index`番目の値を取得する.
    ///
    /// # Constraints
    ///
    /// - `index < self.len()` (満たさない場合はpanicする)
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    #[track_caller]
    pub fn get(&self, index: usize) -> &M::T {
        self.try_get(index).or_panic()
    }

    /// [`SegmentTree::get`]の検査付き版.
    pub fn try_get(&self, index: usize) -> Result<&M::T, SegmentTreeError> {
        check_index(index, self.len())?;
        Ok(&self.0[index + self.size()])
    }

    /// SegmentTreeの`index`番目の値の可変参照(のラッパー)を取得する.
    ///
    /// # Constraints
    ///
    /// - `index < self.len()`
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    /// - *O*(log *n*)  (ラッパーのデストラクタ)
    #[must_use]
    #[track_caller]
    pub fn setter(&mut self, index: usize) -> impl std::ops::DerefMut<Target = M::T> + use<'_, M> {
        check_index(index, self.len()).or_panic();

        struct Wrapper<'a, M: Monoid>(&'a mut SegmentTree<M>, usize);
        impl<M: Monoid> std::ops::Deref for Wrapper<'_, M> {
            type Target = M::T;
            fn deref(&self) -> &M::T {
                &self.0 .0[self.1]
            }
        }
        impl<M: Monoid> std::ops::DerefMut for Wrapper<'_, M> {
            fn deref_mut(&mut self) -> &mut M::T {
                &mut self.0 .0[self.1]
            }
        }
        impl<M: Monoid> Drop for Wrapper<'_, M> {
            fn drop(&mut self) {
                self.0.update(self.1);
            }
        }

        let k = index + self.size();
        Wrapper(self, k)
    }

    /// 葉`k`の祖先を全て計算し直す
    fn update(&mut self, mut k: usize) {
        while k > 1 {
            k >>= 1;
            self.0[k] = self.2.op(&self.0[k * 2], &self.0[k * 2 + 1]);
        }
    }

    /// SegmentTreeの`range`の範囲の要素の総積を計算する.
    ///
    /// 空区間に対しては`monoid.e()`を返す.
    ///
    /// # Constraints
    ///
    /// - `range`は`0..self.len()`に含まれる区間である. (満たさない場合はpanicする)
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    #[track_caller]
    pub fn prod(&self, range: impl std::ops::RangeBounds<usize>) -> M::T {
        self.try_prod(range).or_panic()
    }

    /// [`SegmentTree::prod`]の検査付き版.
    pub fn try_prod(
        &self,
        range: impl std::ops::RangeBounds<usize>,
    ) -> Result<M::T, SegmentTreeError> {
        let (left, right) = check_range(&range, self.len())?;
        let size = self.size();
        let mut left_index = left + size;
        let mut right_index = right + size;
        let mut left_val = self.2.e();
        let mut right_val = self.2.e();
        while left_index < right_index {
            if left_index & 1 == 1 {
                left_val = self.2.op(&left_val, &self.0[left_index]);
                left_index += 1;
            }
            if right_index & 1 == 1 {
                right_index -= 1;
                right_val = self.2.op(&self.0[right_index], &right_val);
            }
            left_index >>= 1;
            right_index >>= 1;
        }
        Ok(self.2.op(&left_val, &right_val))
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

    /// `f(self.prod(index..x))`だが`!f(self.prod(index..=x))`な`x`を見つけるような二分探索を行う.
    ///
    /// 見つからなかった場合は`self.len()`を返す.
    ///
    /// # Constraints
    ///
    /// - `index <= self.len()`
    /// - `f(monoid.e())`は`true`である.
    /// - `f`は単調である. (そうでない場合の戻り値は不定)
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    #[track_caller]
    pub fn max_right(&self, index: usize, f: impl FnMut(&M::T) -> bool) -> usize {
        self.try_max_right(index, f).or_panic()
    }

    /// [`SegmentTree::max_right`]の検査付き版.
    pub fn try_max_right(
        &self,
        index: usize,
        mut f: impl FnMut(&M::T) -> bool,
    ) -> Result<usize, SegmentTreeError> {
        check_boundary(index, self.len())?;
        let mut acc = self.2.e();
        check_identity(f(&acc))?;
        if index == self.len() {
            return Ok(index);
        }
        let size = self.size();
        let mut k = index + size;
        loop {
            while k & 1 == 0 {
                k >>= 1;
            }
            let temp = self.2.op(&acc, &self.0[k]);
            if !f(&temp) {
                while k < size {
                    k <<= 1;
                    let temp = self.2.op(&acc, &self.0[k]);
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

    /// 右端を`right`で打ち切った[`SegmentTree::max_right`].
    ///
    /// `index..right`全体で`f`が成り立つなら`right`を返す.
    ///
    /// # Constraints
    ///
    /// - `index <= right <= self.len()`
    /// - `f(monoid.e())`は`true`である.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    #[track_caller]
    pub fn max_right_within(
        &self,
        index: usize,
        right: usize,
        f: impl FnMut(&M::T) -> bool,
    ) -> usize {
        check_range(&(index..right), self.len()).or_panic();
        self.max_right(index, f).min(right)
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
    #[must_use]
    #[track_caller]
    pub fn min_left(&self, index: usize, f: impl FnMut(&M::T) -> bool) -> usize {
        self.try_min_left(index, f).or_panic()
    }

    /// [`SegmentTree::min_left`]の検査付き版.
    pub fn try_min_left(
        &self,
        index: usize,
        mut f: impl FnMut(&M::T) -> bool,
    ) -> Result<usize, SegmentTreeError> {
        check_boundary(index, self.len())?;
        let mut acc = self.2.e();
        check_identity(f(&acc))?;
        if index == 0 {
            return Ok(0);
        }
        let size = self.size();
        let mut k = index + size;
        loop {
            k -= 1;
            while k > 1 && k & 1 == 1 {
                k >>= 1;
            }
            let temp = self.2.op(&self.0[k], &acc);
            if !f(&temp) {
                while k < size {
                    k = k * 2 + 1;
                    let temp = self.2.op(&self.0[k], &acc);
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

impl<M: Monoid + Default> From<Vec<M::T>> for SegmentTree<M> {
    fn from(value: Vec<M::T>) -> Self {
        Self::from_vec(M::default(), value)
    }
}

impl<M: Monoid> AsRef<[M::T]> for SegmentTree<M> {
    fn as_ref(&self) -> &[M::T] {
        let size = self.size();
        &self.0[size..size + self.len()]
    }
}

impl<M: Monoid> std::ops::Index<usize> for SegmentTree<M> {
    type Output = M::T;

    fn index(&self, index: usize) -> &M::T {
        self.get(index)
    }
}
