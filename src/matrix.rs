//! Small dense matrices over GF(pp).

use std::ops::{Index, IndexMut};

use crate::field::PrimeField;

/// Row-major `rows × cols` matrix with entries in `[0, pp)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModMatrix {
    field: PrimeField,
    rows: usize,
    cols: usize,
    data: Vec<u64>,
}

impl ModMatrix {
    pub fn zeros(field: PrimeField, rows: usize, cols: usize) -> Self {
        ModMatrix {
            field,
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    pub fn identity(field: PrimeField, n: usize) -> Self {
        Self::projector(field, n, n)
    }

    /// Row `i`, column `j` holds `xs[i]^j`, for `j` in `0..cols`.
    pub fn vandermonde(field: PrimeField, xs: &[u64], cols: usize) -> Self {
        let mut m = Self::zeros(field, xs.len(), cols);
        for (i, &x) in xs.iter().enumerate() {
            let mut power = field.reduce(1);
            for j in 0..cols {
                m[(i, j)] = power;
                power = field.mul(power, x);
            }
        }
        m
    }

    /// `n × n` diagonal matrix keeping the first `keep` coordinates.
    pub fn projector(field: PrimeField, n: usize, keep: usize) -> Self {
        let mut m = Self::zeros(field, n, n);
        for i in 0..keep.min(n) {
            m[(i, i)] = field.reduce(1);
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[u64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Matrix product.
    ///
    /// # Panics
    /// If the inner dimensions differ.
    pub fn mul(&self, rhs: &ModMatrix) -> ModMatrix {
        assert_eq!(self.cols, rhs.rows, "matrix dimensions do not agree");
        debug_assert_eq!(self.field, rhs.field);
        let f = self.field;
        let mut out = Self::zeros(f, self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self[(i, k)];
                if a == 0 {
                    continue;
                }
                for j in 0..rhs.cols {
                    out[(i, j)] = f.add(out[(i, j)], f.mul(a, rhs[(k, j)]));
                }
            }
        }
        out
    }

    /// Matrix-vector product.
    ///
    /// # Panics
    /// If `v.len() != cols`.
    pub fn mul_vec(&self, v: &[u64]) -> Vec<u64> {
        assert_eq!(self.cols, v.len(), "vector length does not match matrix");
        let f = self.field;
        (0..self.rows)
            .map(|i| {
                self.row(i)
                    .iter()
                    .zip(v)
                    .fold(0, |acc, (&a, &b)| f.add(acc, f.mul(a, b)))
            })
            .collect()
    }

    /// Inverse by Gauss-Jordan elimination, or `None` if the matrix is
    /// singular modulo pp or not square.
    pub fn inverse(&self) -> Option<ModMatrix> {
        if self.rows != self.cols {
            return None;
        }
        let n = self.rows;
        let f = self.field;
        let mut a = self.clone();
        let mut inv = Self::identity(f, n);

        for col in 0..n {
            let pivot = (col..n).find(|&r| a[(r, col)] != 0)?;
            a.swap_rows(pivot, col);
            inv.swap_rows(pivot, col);

            let scale = f.inverse(a[(col, col)]).ok()?;
            a.scale_row(col, scale);
            inv.scale_row(col, scale);

            for r in 0..n {
                let factor = a[(r, col)];
                if r == col || factor == 0 {
                    continue;
                }
                a.sub_scaled_row(r, col, factor);
                inv.sub_scaled_row(r, col, factor);
            }
        }
        Some(inv)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    fn scale_row(&mut self, r: usize, c: u64) {
        for j in 0..self.cols {
            self[(r, j)] = self.field.mul(self[(r, j)], c);
        }
    }

    // row[target] -= factor * row[source]
    fn sub_scaled_row(&mut self, target: usize, source: usize, factor: u64) {
        for j in 0..self.cols {
            let delta = self.field.mul(factor, self[(source, j)]);
            self[(target, j)] = self.field.sub(self[(target, j)], delta);
        }
    }
}

impl Index<(usize, usize)> for ModMatrix {
    type Output = u64;

    fn index(&self, (i, j): (usize, usize)) -> &u64 {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for ModMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut u64 {
        &mut self.data[i * self.cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf(p: u64) -> PrimeField {
        PrimeField::new(p).unwrap()
    }

    #[test]
    fn vandermonde_rows_are_powers() {
        let m = ModMatrix::vandermonde(gf(67), &[1, 2, 3], 3);
        assert_eq!(m.row(0), &[1, 1, 1]);
        assert_eq!(m.row(1), &[1, 2, 4]);
        assert_eq!(m.row(2), &[1, 3, 9]);
    }

    #[test]
    fn projector_keeps_leading_diagonal() {
        let p = ModMatrix::projector(gf(5), 3, 2);
        assert_eq!(p.row(0), &[1, 0, 0]);
        assert_eq!(p.row(1), &[0, 1, 0]);
        assert_eq!(p.row(2), &[0, 0, 0]);
    }

    #[test]
    fn vandermonde_inverse_is_two_sided() {
        let f = gf(103);
        let b = ModMatrix::vandermonde(f, &[1, 2, 3, 4, 5], 5);
        let b_inv = b.inverse().unwrap();
        assert_eq!(b.mul(&b_inv), ModMatrix::identity(f, 5));
        assert_eq!(b_inv.mul(&b), ModMatrix::identity(f, 5));
    }

    #[test]
    fn inverse_needs_row_swaps() {
        let f = gf(7);
        let mut m = ModMatrix::zeros(f, 2, 2);
        m[(0, 1)] = 3;
        m[(1, 0)] = 2;
        let inv = m.inverse().unwrap();
        assert_eq!(m.mul(&inv), ModMatrix::identity(f, 2));
    }

    #[test]
    fn repeated_points_are_singular() {
        let f = gf(67);
        assert!(ModMatrix::vandermonde(f, &[1, 2, 2], 3).inverse().is_none());
        // 68 = 1 mod 67
        assert!(ModMatrix::vandermonde(f, &[1, 68], 2).inverse().is_none());
        assert!(ModMatrix::zeros(f, 2, 3).inverse().is_none());
    }

    #[test]
    #[should_panic(expected = "matrix dimensions do not agree")]
    fn mul_rejects_mismatched_dimensions() {
        let f = gf(5);
        let _ = ModMatrix::zeros(f, 2, 3).mul(&ModMatrix::zeros(f, 2, 3));
    }

    #[test]
    #[should_panic(expected = "vector length does not match matrix")]
    fn mul_vec_rejects_mismatched_length() {
        let _ = ModMatrix::identity(gf(5), 3).mul_vec(&[1, 2]);
    }

    #[test]
    fn mul_vec_evaluates_polynomial() {
        // coefficient vector of 3 + 5x + 7x^2
        let f = gf(101);
        let b = ModMatrix::vandermonde(f, &[0, 1, 2], 3);
        assert_eq!(b.mul_vec(&[3, 5, 7]), vec![3, 15, 41]);
    }
}
