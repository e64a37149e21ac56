/*!

Traversal of sparse matrices independent of how they are stored.

Two storage formats are provided in [`storage`]:
- [`CscMatrix`](storage::CscMatrix), compressed sparse column arrays
- [`MapMatrix`](storage::MapMatrix), an ordered map keyed by column-major [`LinearIndex`](index::LinearIndex)

Compressed-column storage is column-major by construction, yet [`RowMajorIter`](iterators::RowMajorIter)
walks it row by row, can be placed on the k-th nonzero in row-major order, and can seek to a coordinate,
all without any per-row index. [`MapOrderIter`](iterators::MapOrderIter) walks map-backed storage in its
natural column-major order.

Every iterator implements [`CoordinateProvider`](iterators::CoordinateProvider), so iterators over
different storage compare with `==`: by storage position when they share a matrix, by `(row, col)` otherwise.

Mutable iterators hand out write-through proxies from [`proxy`].

*/
extern crate self as spmat;

pub mod algebra;
pub mod index;
pub mod iterators;
pub mod proxy;
pub mod storage;
