use proximity_core::{ProximityError, Result};

/// Dense row-major square matrix.
pub type Matrix = Vec<Vec<f64>>;

/// Pivots with absolute value below this are treated as zero.
pub const SINGULAR_TOLERANCE: f64 = 1e-15;

/// N×N identity matrix.
pub fn identity(size: usize) -> Matrix {
    (0..size)
        .map(|i| (0..size).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

/// Invert a square matrix with Gauss-Jordan elimination.
///
/// Uses partial pivoting: for each column the row with the largest absolute
/// value at or below the diagonal becomes the pivot row. A pivot smaller than
/// [`SINGULAR_TOLERANCE`] means the matrix is singular.
///
/// # Errors
/// * `InvalidInput` if the matrix is empty or not square
/// * `SingularMatrix` if elimination hits a zero pivot
pub fn invert(matrix: &[Vec<f64>]) -> Result<Matrix> {
    let n = matrix.len();
    if n == 0 {
        return Err(ProximityError::InvalidInput(
            "cannot invert an empty matrix".to_string(),
        ));
    }
    if matrix.iter().any(|row| row.len() != n) {
        return Err(ProximityError::InvalidInput(format!(
            "matrix must be square ({n} rows)"
        )));
    }

    // Augmented matrix [A | I].
    let mut aug: Matrix = matrix
        .iter()
        .zip(identity(n))
        .map(|(row, ident)| row.iter().copied().chain(ident).collect())
        .collect();

    for col in 0..n {
        let mut pivot_row = col;
        for row in (col + 1)..n {
            if aug[row][col].abs() > aug[pivot_row][col].abs() {
                pivot_row = row;
            }
        }

        if aug[pivot_row][col].abs() < SINGULAR_TOLERANCE {
            return Err(ProximityError::SingularMatrix);
        }

        if pivot_row != col {
            aug.swap(col, pivot_row);
        }

        let scale = 1.0 / aug[col][col];
        for value in aug[col].iter_mut() {
            *value *= scale;
        }

        let pivot = aug[col].clone();
        for (row, values) in aug.iter_mut().enumerate() {
            if row == col {
                continue;
            }
            let factor = values[col];
            if factor.abs() < SINGULAR_TOLERANCE {
                continue;
            }
            for (value, &p) in values.iter_mut().zip(pivot.iter()) {
                *value -= factor * p;
            }
        }
    }

    // Right half is the inverse.
    Ok(aug.into_iter().map(|row| row[n..].to_vec()).collect())
}

/// Row-vector product `m · v`.
pub(crate) fn mat_vec(m: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    m.iter()
        .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum())
        .collect()
}
