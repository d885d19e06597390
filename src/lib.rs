//! モノイドを載せるセグメント木と遅延伝搬セグメント木
//!
//! 載せる代数構造は[`util::Magma`]などのトレイトで表し, 木の構築時に値として渡す.
//!
//! ```
//! use monoid_segtree::algebra::RangeAddSum;
//! use monoid_segtree::LazySegmentTree;
//!
//! let mut seg = LazySegmentTree::from_vec(
//!     RangeAddSum::<i64>::default(),
//!     [1, 2, 3, 4, 5].into_iter().map(RangeAddSum::leaf).collect(),
//! );
//! seg.apply(1..4, &10);
//! assert_eq!(seg.prod(..).0, 45);
//! assert_eq!(seg.prod(1..3).0, 25);
//! ```

pub mod algebra;
pub mod error;
pub mod lazysegtree;
pub mod segmenttree;
pub mod util;

pub use error::SegmentTreeError;
pub use lazysegtree::{LazyMonoid, LazySegmentTree};
pub use segmenttree::{Monoid, SegmentTree};
