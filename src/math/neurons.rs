use std::ops::{Deref, Index, IndexMut};

use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;

/// A column vector of neuron values.
///
/// Dereferences to [`Matrix`] so every kernel in [`crate::math::ops`] applies
/// directly; the extra accessors index by neuron.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Matrix")]
pub struct Neurons(Matrix);

impl TryFrom<Matrix> for Neurons {
    type Error = NetworkError;

    /// Accepts only a column (or the empty matrix).
    fn try_from(matrix: Matrix) -> Result<Neurons> {
        if !matrix.is_empty() && !matrix.is_column_vector() {
            return Err(NetworkError::InvalidShape(format!(
                "neurons must form a column, got {}x{}",
                matrix.m(),
                matrix.n()
            )));
        }
        Ok(Neurons(matrix))
    }
}

impl Neurons {
    /// `size` neurons, all zero.
    pub fn new(size: usize) -> Neurons {
        Neurons(Matrix::new(size, 1))
    }

    /// One-hot vector of length `size` with `class` set to 1.0.
    ///
    /// # Panics
    /// Panics if `class >= size`.
    pub fn one_hot(class: usize, size: usize) -> Neurons {
        assert!(class < size, "one-hot class {} out of range for {} neurons", class, size);
        let mut neurons = Neurons::new(size);
        neurons[class] = 1.0;
        neurons
    }

    /// Reinterprets a matrix as a column of neurons, whatever its shape.
    pub fn from_matrix(matrix: Matrix) -> Neurons {
        Neurons::from(matrix.into_values())
    }

    pub fn value(&self, i: usize) -> f64 {
        self.0.value(i, 0)
    }

    pub fn value_mut(&mut self, i: usize) -> &mut f64 {
        self.0.value_mut(i, 0)
    }

    pub fn len(&self) -> usize {
        self.0.size()
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.0
    }

    pub fn into_matrix(self) -> Matrix {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.values().iter()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.values().to_vec()
    }

    /// Element-wise map that stays a column of neurons.
    pub fn map<F>(&self, functor: F) -> Neurons
    where
        F: Fn(f64) -> f64,
    {
        Neurons(self.0.map(functor))
    }
}

impl From<Vec<f64>> for Neurons {
    fn from(values: Vec<f64>) -> Self {
        let stride = if values.is_empty() { 0 } else { 1 };
        Neurons(Matrix::from_vec(values, stride))
    }
}

impl From<&[f64]> for Neurons {
    fn from(values: &[f64]) -> Self {
        Neurons::from(values.to_vec())
    }
}

impl AsRef<Neurons> for Neurons {
    fn as_ref(&self) -> &Neurons {
        self
    }
}

impl Deref for Neurons {
    type Target = Matrix;

    fn deref(&self) -> &Matrix {
        &self.0
    }
}

impl Index<usize> for Neurons {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0.values()[i]
    }
}

impl IndexMut<usize> for Neurons {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0.values_mut()[i]
    }
}
