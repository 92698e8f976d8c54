//! Least-squares utilities for the autoregressive and seasonal models.

/// Solve `a · x = b` for a symmetric positive definite matrix `a`.
///
/// Factors the matrix as `L · L'` and substitutes through both triangles.
/// Returns `None` on a non-positive pivot, which callers treat as a
/// singular or ill-conditioned system.
pub fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    let mut chol = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let dot: f64 = (0..j).map(|k| chol[i][k] * chol[j][k]).sum();
            let rem = a[i][j] - dot;
            if i == j {
                if rem <= 0.0 {
                    return None;
                }
                chol[i][j] = rem.sqrt();
            } else {
                chol[i][j] = rem / chol[j][j];
            }
        }
    }

    // L · y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let dot: f64 = (0..i).map(|j| chol[i][j] * y[j]).sum();
        y[i] = (b[i] - dot) / chol[i][i];
    }

    // L' · x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let dot: f64 = ((i + 1)..n).map(|j| chol[j][i] * x[j]).sum();
        x[i] = (y[i] - dot) / chol[i][i];
    }

    Some(x)
}

/// Ordinary-least-squares slope of `values` regressed on their index
/// `0..n-1`. Zero for series shorter than two points.
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }

    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}
