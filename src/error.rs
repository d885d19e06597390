use thiserror::Error;

/// セグメント木の操作に渡された引数が前提条件を満たさないときのエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentTreeError {
    /// 添字が列の範囲外
    #[error("index out of bounds: the len is {len} but the index is {index}")]
    IndexOutOfBounds {
        /// 渡された添字
        index: usize,
        /// 列の長さ
        len: usize,
    },

    /// 区間が逆転しているか列の範囲をはみ出している
    #[error("invalid range {start}..{end} for a sequence of length {len}")]
    InvalidRange {
        /// 区間の左端(含む)
        start: usize,
        /// 区間の右端(含まない)
        end: usize,
        /// 列の長さ
        len: usize,
    },

    /// 二分探索の述語が単位元に対して`false`を返した
    #[error("the predicate must return `true` for the identity")]
    IdentityRejected,
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<(), SegmentTreeError> {
    if index < len {
        Ok(())
    } else {
        reject(SegmentTreeError::IndexOutOfBounds { index, len })
    }
}

/// 閉区間`0..=len`に収まる位置(境界)かを調べる
pub(crate) fn check_boundary(index: usize, len: usize) -> Result<(), SegmentTreeError> {
    if index <= len {
        Ok(())
    } else {
        reject(SegmentTreeError::IndexOutOfBounds { index, len })
    }
}

pub(crate) fn check_range(
    range: &impl std::ops::RangeBounds<usize>,
    len: usize,
) -> Result<(usize, usize), SegmentTreeError> {
    let (start, end) = crate::util::to_half_open(range, len);
    if start <= end && end <= len {
        Ok((start, end))
    } else {
        reject(SegmentTreeError::InvalidRange { start, end, len })
    }
}

pub(crate) fn check_identity(accepted: bool) -> Result<(), SegmentTreeError> {
    if accepted {
        Ok(())
    } else {
        reject(SegmentTreeError::IdentityRejected)
    }
}

fn reject<T>(err: SegmentTreeError) -> Result<T, SegmentTreeError> {
    #[cfg(feature = "tracing")]
    tracing::debug!(error = %err, "rejected segment tree operation");
    Err(err)
}

/// 検査付きの操作の結果を取り出し, エラーなら即座にpanicする
pub(crate) trait OrPanic<T> {
    fn or_panic(self) -> T;
}

impl<T> OrPanic<T> for Result<T, SegmentTreeError> {
    #[track_caller]
    fn or_panic(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}
