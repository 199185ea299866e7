//! Reference kernels over [`Matrix`].
//!
//! Plain loops with no blocking or vectorisation.

use std::ops::{Add, Mul, Sub};

use crate::math::matrix::Matrix;

/// Returns `a` transposed. Empty matrices transpose to the empty matrix.
pub fn transpose(a: &Matrix) -> Matrix {
    let (m, n) = (a.m(), a.n());
    let mut res = Matrix::zeros(n, m);

    for i in 0..n {
        for j in 0..m {
            res.set(i, j, a.value(j, i));
        }
    }

    res
}

/// Matrix product `a · b`.
///
/// # Panics
/// Panics if `a.n() != b.m()`.
pub fn product(a: &Matrix, b: &Matrix) -> Matrix {
    if a.n() != b.m() {
        panic!(
            "Matrices are of incorrect sizes for product: {}x{} · {}x{}",
            a.m(),
            a.n(),
            b.m(),
            b.n()
        )
    }

    let mut res = Matrix::zeros(a.m(), b.n());

    for i in 0..a.m() {
        for j in 0..b.n() {
            let mut sum = 0.0;

            for k in 0..a.n() {
                sum += a.value(i, k) * b.value(k, j);
            }

            res.set(i, j, sum);
        }
    }

    res
}

pub fn add(a: &Matrix, b: &Matrix) -> Matrix {
    a.zip_map(b, |x, y| x + y)
}

/// Adds `s` to every element.
pub fn add_scalar(a: &Matrix, s: f64) -> Matrix {
    a.map(|x| x + s)
}

pub fn subtract(a: &Matrix, b: &Matrix) -> Matrix {
    a.zip_map(b, |x, y| x - y)
}

/// Element-wise (Hadamard) product of two same-shape matrices.
pub fn hadamard(a: &Matrix, b: &Matrix) -> Matrix {
    a.zip_map(b, |x, y| x * y)
}

pub fn scale(a: &Matrix, s: f64) -> Matrix {
    a.map(|x| x * s)
}

pub fn sum(a: &Matrix) -> f64 {
    a.values().iter().sum()
}

/// Arithmetic mean of all elements; the empty matrix has mean `0.0`.
pub fn mean(a: &Matrix) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    sum(a) / a.size() as f64
}

/// Flat index of the largest element.
///
/// Ties go to the first occurrence and NaN entries never win. The empty
/// matrix, or one holding only NaN, returns `0`.
pub fn largest(a: &Matrix) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in a.values().iter().enumerate() {
        if x.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| x > b) {
            best = Some((i, x));
        }
    }
    best.map_or(0, |(i, _)| i)
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        add(self, rhs)
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        subtract(self, rhs)
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        product(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn m(values: &[f64], n: usize) -> Matrix {
        Matrix::from_vec(values.to_vec(), n)
    }

    const SYMMETRIC: [f64; 9] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.4, 0.3, 0.2, 0.1];
    const BALANCED: [f64; 11] = [-0.5, -0.4, -0.3, -0.2, -0.1, 0.0, 0.1, 0.2, 0.3, 0.4, 0.5];

    #[test]
    fn sum_of_zero_matrices_is_zero() {
        for size in [0, 1, 2, 4] {
            assert_eq!(sum(&Matrix::new(size, size)), 0.0);
        }
    }

    #[test]
    fn sum_ignores_stride() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        for n in [1, 2, 3] {
            assert_eq!(sum(&m(&values, n)), 21.0);
        }
        assert_relative_eq!(sum(&m(&SYMMETRIC, 1)), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sum(&m(&BALANCED, 1)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn mean_of_empty_and_zero_matrices_is_zero() {
        for size in [0, 1, 2, 4] {
            assert_eq!(mean(&Matrix::new(size, size)), 0.0);
        }
    }

    #[test]
    fn mean_values() {
        assert_eq!(mean(&m(&[1.0], 1)), 1.0);
        assert_relative_eq!(mean(&m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3)), 3.5);
        assert_relative_eq!(mean(&m(&SYMMETRIC, 1)), 2.5 / 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mean(&m(&BALANCED, 1)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn largest_returns_first_maximum() {
        assert_eq!(largest(&Matrix::new(0, 0)), 0);
        assert_eq!(largest(&Matrix::new(4, 4)), 0);
        assert_eq!(largest(&m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 1)), 5);
        assert_eq!(largest(&m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2)), 5);
        assert_eq!(largest(&m(&SYMMETRIC, 1)), 4);
        assert_eq!(largest(&m(&BALANCED, 1)), 10);
        assert_eq!(largest(&m(&[0.3, 0.9, 0.9, 0.1], 1)), 1);
    }

    #[test]
    fn largest_ignores_nan() {
        assert_eq!(largest(&m(&[f64::NAN, 1.0, 5.0], 1)), 2);
        assert_eq!(largest(&m(&[2.0, f64::NAN, 1.0], 1)), 0);
        assert_eq!(largest(&m(&[f64::NAN, f64::NAN], 1)), 0);
    }

    #[test]
    fn transpose_square() {
        let a = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0], 3);
        assert_eq!(transpose(&a), m(&[1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0], 3));
    }

    #[test]
    fn transpose_rectangular() {
        let a = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2);
        let t = transpose(&a);
        assert_eq!(t.m(), 2);
        assert_eq!(t.n(), 3);
        assert_eq!(t.values(), &[1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);

        let column = m(&[1.0, 2.0], 1);
        let row = transpose(&column);
        assert!(row.is_row_vector());
        assert_eq!(row.value(0, 1), 2.0);
    }

    #[test]
    fn transpose_is_an_involution() {
        let shapes = [(0, 0), (1, 1), (1, 5), (5, 1), (3, 4)];
        for (rows, cols) in shapes {
            let values = (0..rows * cols).map(|x| x as f64 * 0.5 - 1.0).collect();
            let a = Matrix::from_vec(values, cols);
            assert_eq!(transpose(&transpose(&a)), a);
        }
    }

    #[test]
    fn product_values() {
        let dot = product(&m(&[1.0, 2.0, 3.0], 3), &m(&[1.0, 2.0, 3.0], 1));
        assert_eq!(dot.size(), 1);
        assert_eq!(dot.value(0, 0), 14.0);

        let outer = product(&m(&[1.0, 2.0, 3.0], 1), &m(&[1.0, 2.0, 3.0], 3));
        assert_eq!(outer.values(), &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 3.0, 6.0, 9.0]);

        let square = m(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(&square * &square, m(&[7.0, 10.0, 15.0, 22.0], 2));
    }

    #[test]
    fn product_is_associative() {
        let a = m(&[0.5, -1.0, 2.0, 0.25, 3.0, -0.75], 3);
        let b = m(&[1.5, 0.1, -2.0, 0.3, 0.7, 1.1], 2);
        let c = m(&[0.2, -0.4, 1.6, 0.9], 2);

        let left = product(&product(&a, &b), &c);
        let right = product(&a, &product(&b, &c));
        for (x, y) in left.values().iter().zip(right.values()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    #[should_panic]
    fn product_rejects_incompatible_shapes() {
        product(&Matrix::new(2, 3), &Matrix::new(2, 3));
    }

    #[test]
    fn elementwise_kernels() {
        let a = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2);
        let b = m(&[6.0, 5.0, 4.0, 3.0, 2.0, 1.0], 2);

        assert_eq!(add_scalar(&a, 1.0).values(), &[2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!((&a + &b).values(), &[7.0; 6]);
        assert_eq!((&a - &b).values(), &[-5.0, -3.0, -1.0, 1.0, 3.0, 5.0]);
        assert_eq!(hadamard(&a, &b).values(), &[6.0, 10.0, 12.0, 12.0, 10.0, 6.0]);
        assert_eq!(scale(&a, 0.5).values(), &[0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
    }

    #[test]
    #[should_panic]
    fn hadamard_rejects_mismatched_shapes() {
        hadamard(&Matrix::new(2, 3), &Matrix::new(3, 2));
    }
}
