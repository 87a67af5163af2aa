//! Fixed-size 5x5 matrix arithmetic for the CTRV filter.
//!
//! Row-major `[[f64; 5]; 5]` storage, no heap allocation.

/// State dimension.
pub const DIM: usize = 5;

/// A 5-element column vector.
pub type Vector5 = [f64; DIM];

/// Row-major 5x5 matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix5 {
    data: [[f64; DIM]; DIM],
}

impl Matrix5 {
    /// All-zero matrix.
    #[inline]
    pub fn zero() -> Self {
        Self {
            data: [[0.0; DIM]; DIM],
        }
    }

    /// Identity matrix.
    #[inline]
    pub fn identity() -> Self {
        Self::diagonal([1.0; DIM])
    }

    /// Diagonal matrix from its diagonal entries.
    pub fn diagonal(diag: Vector5) -> Self {
        let mut m = Self::zero();
        for (i, value) in diag.iter().enumerate() {
            m.data[i][i] = *value;
        }
        m
    }

    /// Create from row-major rows.
    #[inline]
    pub fn from_rows(data: [[f64; DIM]; DIM]) -> Self {
        Self { data }
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    /// Set element at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    /// Diagonal entries.
    pub fn diag(&self) -> Vector5 {
        let mut d = [0.0; DIM];
        for (i, value) in d.iter_mut().enumerate() {
            *value = self.data[i][i];
        }
        d
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        let mut t = Self::zero();
        for i in 0..DIM {
            for j in 0..DIM {
                t.data[j][i] = self.data[i][j];
            }
        }
        t
    }

    /// Matrix product `self * other`.
    pub fn mul(&self, other: &Matrix5) -> Self {
        let mut out = Self::zero();
        for i in 0..DIM {
            for k in 0..DIM {
                let a = self.data[i][k];
                if a == 0.0 {
                    continue;
                }
                for j in 0..DIM {
                    out.data[i][j] += a * other.data[k][j];
                }
            }
        }
        out
    }

    /// Matrix-vector product `self * v`.
    pub fn mul_vec(&self, v: &Vector5) -> Vector5 {
        let mut out = [0.0; DIM];
        for (i, value) in out.iter_mut().enumerate() {
            *value = self.data[i].iter().zip(v).map(|(a, b)| a * b).sum();
        }
        out
    }

    /// Element-wise sum.
    pub fn add(&self, other: &Matrix5) -> Self {
        let mut out = *self;
        for i in 0..DIM {
            for j in 0..DIM {
                out.data[i][j] += other.data[i][j];
            }
        }
        out
    }

    /// Element-wise difference.
    pub fn sub(&self, other: &Matrix5) -> Self {
        let mut out = *self;
        for i in 0..DIM {
            for j in 0..DIM {
                out.data[i][j] -= other.data[i][j];
            }
        }
        out
    }

    /// Average with the transpose, removing round-off asymmetry.
    pub fn symmetrized(&self) -> Self {
        let mut out = *self;
        for i in 0..DIM {
            for j in (i + 1)..DIM {
                let avg = 0.5 * (self.data[i][j] + self.data[j][i]);
                out.data[i][j] = avg;
                out.data[j][i] = avg;
            }
        }
        out
    }

    /// Inverse by Gauss-Jordan elimination with partial pivoting.
    ///
    /// Returns `None` when a pivot falls below `1e-12` (singular matrix).
    pub fn inverse(&self) -> Option<Self> {
        let mut a = self.data;
        let mut inv = Self::identity().data;

        for col in 0..DIM {
            let pivot_row = (col..DIM)
                .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))
                .unwrap_or(col);

            if a[pivot_row][col].abs() < 1e-12 {
                return None;
            }

            a.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            let pivot = a[col][col];
            for j in 0..DIM {
                a[col][j] /= pivot;
                inv[col][j] /= pivot;
            }

            for row in 0..DIM {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor == 0.0 {
                    continue;
                }
                for j in 0..DIM {
                    a[row][j] -= factor * a[col][j];
                    inv[row][j] -= factor * inv[col][j];
                }
            }
        }

        Some(Self { data: inv })
    }
}

impl Default for Matrix5 {
    fn default() -> Self {
        Self::zero()
    }
}
