//! Rectangular, square, symmetrical, and 3-D views over a `BitStore`.
//!
//! These wrap a flat `BitStore` with row/column (or triangular) index
//! arithmetic. They're used throughout the scoring crate to hold
//! precomputed pairwise conflict tables (shift-shift overlap, employee-pair
//! cohabitation, skill compatibility) without allocating an `N*N`-sized
//! `Vec<bool>`.

use super::store::BitStore;

/// Dense `rows x cols` bit matrix, row-major.
#[derive(Debug, Clone)]
pub struct BitMatrix {
    store: BitStore,
    rows: usize,
    cols: usize,
}

impl BitMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            store: BitStore::new(rows * cols),
            rows,
            cols,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, r: usize, c: usize) -> usize {
        debug_assert!(r < self.rows && c < self.cols);
        r * self.cols + c
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> bool {
        self.store.get(self.index(r, c)) == 1
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize) {
        let i = self.index(r, c);
        self.store.set(i);
    }

    #[inline]
    pub fn clear(&mut self, r: usize, c: usize) {
        let i = self.index(r, c);
        self.store.clear(i);
    }

    #[inline]
    pub fn assign(&mut self, r: usize, c: usize, v: bool) {
        if v {
            self.set(r, c);
        } else {
            self.clear(r, c);
        }
    }

    /// True iff any bit in row `r` is set.
    pub fn row_any(&self, r: usize) -> bool {
        self.store.test(r * self.cols, self.cols)
    }

    pub fn count(&self) -> usize {
        self.store.count()
    }
}

/// Square specialization of [`BitMatrix`].
#[derive(Debug, Clone)]
pub struct BitSquareMatrix {
    inner: BitMatrix,
}

impl BitSquareMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            inner: BitMatrix::new(n, n),
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.inner.rows()
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> bool {
        self.inner.get(r, c)
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize) {
        self.inner.set(r, c);
    }

    #[inline]
    pub fn clear(&mut self, r: usize, c: usize) {
        self.inner.clear(r, c);
    }

    #[inline]
    pub fn assign(&mut self, r: usize, c: usize, v: bool) {
        self.inner.assign(r, c, v);
    }

    pub fn count(&self) -> usize {
        self.inner.count()
    }
}

/// Symmetrical `n x n` matrix packed into the upper triangle, including the
/// diagonal: `n*(n+1)/2` bits instead of `n*n`.
///
/// `index(r, c)` orders `(min, max)` and applies the standard triangular
/// packing formula `min*(2n - min + 1)/2 + (max - min)`.
#[derive(Debug, Clone)]
pub struct BitSymmetricalMatrix {
    store: BitStore,
    n: usize,
}

impl BitSymmetricalMatrix {
    pub fn new(n: usize) -> Self {
        let bits = n * (n + 1) / 2;
        Self {
            store: BitStore::new(bits.max(1)),
            n,
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    fn index(&self, r: usize, c: usize) -> usize {
        debug_assert!(r < self.n && c < self.n);
        let (lo, hi) = if r <= c { (r, c) } else { (c, r) };
        lo * (2 * self.n - lo + 1) / 2 + (hi - lo)
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> bool {
        self.store.get(self.index(r, c)) == 1
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize) {
        let i = self.index(r, c);
        self.store.set(i);
    }

    #[inline]
    pub fn clear(&mut self, r: usize, c: usize) {
        let i = self.index(r, c);
        self.store.clear(i);
    }

    #[inline]
    pub fn assign(&mut self, r: usize, c: usize, v: bool) {
        if v {
            self.set(r, c);
        } else {
            self.clear(r, c);
        }
    }

    pub fn count(&self) -> usize {
        self.store.count()
    }
}

/// Dense `x * y * z` bit cube, row-major with `z` fastest-varying.
#[derive(Debug, Clone)]
pub struct BitMatrix3D {
    store: BitStore,
    x: usize,
    y: usize,
    z: usize,
}

impl BitMatrix3D {
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self {
            store: BitStore::new(x * y * z),
            x,
            y,
            z,
        }
    }

    #[inline]
    fn index(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(i < self.x && j < self.y && k < self.z);
        (i * self.y + j) * self.z + k
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> bool {
        self.store.get(self.index(i, j, k)) == 1
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize) {
        let idx = self.index(i, j, k);
        self.store.set(idx);
    }

    #[inline]
    pub fn clear(&mut self, i: usize, j: usize, k: usize) {
        let idx = self.index(i, j, k);
        self.store.clear(idx);
    }

    #[inline]
    pub fn assign(&mut self, i: usize, j: usize, k: usize, v: bool) {
        if v {
            self.set(i, j, k);
        } else {
            self.clear(i, j, k);
        }
    }

    pub fn count(&self) -> usize {
        self.store.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_matrix_roundtrip() {
        let mut m = BitSquareMatrix::new(5);
        m.set(2, 3);
        assert!(m.get(2, 3));
        assert!(!m.get(3, 2));
        m.clear(2, 3);
        assert!(!m.get(2, 3));
    }

    #[test]
    fn symmetrical_matrix_shares_storage_across_transpose() {
        let mut m = BitSymmetricalMatrix::new(6);
        m.set(1, 4);
        assert!(m.get(1, 4));
        assert!(m.get(4, 1));
        m.clear(4, 1);
        assert!(!m.get(1, 4));
    }

    #[test]
    fn symmetrical_matrix_diagonal_and_full_coverage() {
        let n = 8;
        let mut m = BitSymmetricalMatrix::new(n);
        for r in 0..n {
            for c in r..n {
                m.set(r, c);
            }
        }
        assert_eq!(m.count(), n * (n + 1) / 2);
        for r in 0..n {
            for c in 0..n {
                assert!(m.get(r, c));
            }
        }
    }

    #[test]
    fn matrix3d_roundtrip() {
        let mut cube = BitMatrix3D::new(3, 4, 5);
        cube.set(2, 1, 4);
        assert!(cube.get(2, 1, 4));
        assert!(!cube.get(2, 1, 3));
    }

    #[test]
    fn row_any_detects_set_bit_in_row() {
        let mut m = BitMatrix::new(4, 4);
        assert!(!m.row_any(1));
        m.set(1, 3);
        assert!(m.row_any(1));
        assert!(!m.row_any(0));
    }
}
