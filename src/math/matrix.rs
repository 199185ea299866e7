use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

/// Dense row-major matrix of `f64`.
///
/// The buffer is flat; `n` is the row stride (number of columns) and the
/// row count is derived as `len / n`. An empty matrix always has `n == 0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    data: Vec<f64>,
    n: usize,
}

/// Unchecked serialized form; goes through [`Matrix::try_from_vec`].
#[derive(Deserialize)]
struct RawMatrix {
    data: Vec<f64>,
    n: usize,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = NetworkError;

    fn try_from(raw: RawMatrix) -> Result<Matrix> {
        Matrix::try_from_vec(raw.data, raw.n)
    }
}

impl Matrix {
    /// `m x n` matrix of zeros. Either dimension being zero yields the empty matrix.
    pub fn new(m: usize, n: usize) -> Matrix {
        if m == 0 || n == 0 {
            return Matrix::default();
        }
        Matrix { data: vec![0.0; m * n], n }
    }

    pub fn zeros(m: usize, n: usize) -> Matrix {
        Matrix::new(m, n)
    }

    /// Builds a matrix from a flat row-major buffer and a row stride.
    ///
    /// # Panics
    /// Panics if `data.len()` is not a multiple of `n`, or if `n == 0` while
    /// `data` is non-empty.
    pub fn from_vec(data: Vec<f64>, n: usize) -> Matrix {
        match Matrix::try_from_vec(data, n) {
            Ok(matrix) => matrix,
            Err(err) => panic!("{}", err),
        }
    }

    /// Fallible [`from_vec`](Self::from_vec), used when the buffer comes from
    /// outside the crate.
    pub fn try_from_vec(data: Vec<f64>, n: usize) -> Result<Matrix> {
        if n == 0 {
            if !data.is_empty() {
                return Err(NetworkError::InvalidShape(format!(
                    "matrix with zero columns holds {} values",
                    data.len()
                )));
            }
            return Ok(Matrix::default());
        }
        if data.len() % n != 0 {
            return Err(NetworkError::InvalidShape(format!(
                "buffer of length {} is not divisible by stride {}",
                data.len(),
                n
            )));
        }
        if data.is_empty() {
            return Ok(Matrix::default());
        }
        Ok(Matrix { data, n })
    }

    /// Builds a matrix from nested rows; all rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Matrix {
        let n = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == n),
            "Matrix rows must all have the same length"
        );
        Matrix::from_vec(rows.into_iter().flatten().collect(), n)
    }

    /// Number of rows.
    pub fn m(&self) -> usize {
        if self.n == 0 { 0 } else { self.data.len() / self.n }
    }

    /// Number of columns (row stride).
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total element count.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_column_vector(&self) -> bool {
        self.n == 1 && !self.data.is_empty()
    }

    pub fn is_row_vector(&self) -> bool {
        self.m() == 1
    }

    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.data[self.offset(i, j)]
    }

    pub fn value_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        let offset = self.offset(i, j);
        &mut self.data[offset]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        *self.value_mut(i, j) = value;
    }

    /// Flat row-major view of the buffer.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_values(self) -> Vec<f64> {
        self.data
    }

    /// Applies `functor` to every element, keeping the shape.
    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&x| functor(x)).collect(),
            n: self.n,
        }
    }

    /// Combines two equal-shaped matrices element by element.
    ///
    /// # Panics
    /// Panics when the shapes differ.
    pub fn zip_map<F>(&self, rhs: &Matrix, functor: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        assert!(
            self.same_shape(rhs),
            "Matrices are of incorrect sizes: {}x{} vs {}x{}",
            self.m(),
            self.n(),
            rhs.m(),
            rhs.n()
        );
        Matrix {
            data: self.data.iter().zip(rhs.data.iter()).map(|(&a, &b)| functor(a, b)).collect(),
            n: self.n,
        }
    }

    pub fn same_shape(&self, rhs: &Matrix) -> bool {
        self.n == rhs.n && self.data.len() == rhs.data.len()
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.m() && j < self.n,
            "Matrix index ({}, {}) out of bounds for {}x{}",
            i,
            j,
            self.m(),
            self.n
        );
        i * self.n + j
    }
}
