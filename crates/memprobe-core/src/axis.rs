//! Axis reduction over a square row-major matrix.
//!
//! Row sums walk memory contiguously; column sums jump a full row between
//! consecutive addends.

use std::hint::black_box;

/// Square row-major matrix of `i64`.
#[derive(Debug, Clone)]
pub struct SquareMatrix {
    side: usize,
    cells: Vec<i64>,
}

impl SquareMatrix {
    /// `side x side` matrix holding `0..side*side` in row-major order.
    #[must_use]
    pub fn arange(side: usize) -> Self {
        let cells = (0..(side * side) as i64).collect();
        Self { side, cells }
    }

    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.cells[row * self.side + col]
    }

    /// Per-row sums; the inner loop is contiguous.
    #[must_use]
    pub fn row_sums(&self) -> Vec<i64> {
        if self.side == 0 {
            return Vec::new();
        }
        self.cells
            .chunks_exact(self.side)
            .map(|row| row.iter().fold(0i64, |acc, v| acc.wrapping_add(*v)))
            .collect()
    }

    /// Per-column sums; the inner loop strides by `side`.
    #[must_use]
    pub fn column_sums(&self) -> Vec<i64> {
        (0..self.side)
            .map(|col| {
                let mut acc = 0i64;
                let mut ix = col;
                while ix < self.cells.len() {
                    acc = acc.wrapping_add(self.cells[ix]);
                    ix += self.side;
                }
                acc
            })
            .collect()
    }

    /// Sum of every cell in storage order.
    #[must_use]
    pub fn total(&self) -> i64 {
        flat_sum(&self.cells)
    }

    pub fn measure_rows(&self) {
        black_box(self.row_sums());
    }

    pub fn measure_columns(&self) {
        black_box(self.column_sums());
    }
}

/// Wrapping sum of a flat slice.
#[must_use]
pub fn flat_sum(values: &[i64]) -> i64 {
    values.iter().fold(0i64, |acc, v| acc.wrapping_add(*v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_by_three_sums() {
        let m = SquareMatrix::arange(3);
        // 0 1 2 / 3 4 5 / 6 7 8
        assert_eq!(m.get(1, 2), 5);
        assert_eq!(m.row_sums(), vec![3, 12, 21]);
        assert_eq!(m.column_sums(), vec![9, 12, 15]);
        assert_eq!(m.total(), 36);
    }

    #[test]
    fn empty_matrix() {
        let m = SquareMatrix::arange(0);
        assert!(m.row_sums().is_empty());
        assert!(m.column_sums().is_empty());
        assert_eq!(m.total(), 0);
    }

    #[test]
    fn flat_sum_of_arange() {
        let values: Vec<i64> = (0..10_000).collect();
        assert_eq!(flat_sum(&values), 9_999 * 10_000 / 2);
    }
}
