//! Least squares solver and straight-line fits.
//!
//! The dashboard needs two linear regressions:
//!
//! ```text
//! anomaly ≈ a + b * month_index   (recent warming trend)
//! anomaly ≈ a + b * year          (long-run projection)
//! ```
//!
//! Implementation choices:
//! - We build a tall `[1, x]` design matrix and solve it with SVD, which stays
//!   well-behaved when the system is tall (many more rows than columns).
//! - `x` is centered before solving. Raw calendar years (~2000) next to a
//!   column of ones make the matrix badly conditioned.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// A fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LineFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Ordinary least squares line through `(xs[i], ys[i])`.
///
/// Returns `None` for fewer than two points, mismatched lengths, non-finite
/// inputs, or when all `x` values coincide.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Option<LineFit> {
    let n = xs.len();
    if n < 2 || ys.len() != n {
        return None;
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return None;
    }

    let x_mean = xs.iter().sum::<f64>() / n as f64;
    if xs.iter().all(|&x| (x - x_mean).abs() < 1e-12) {
        return None;
    }

    let mut design = DMatrix::<f64>::zeros(n, 2);
    for (i, &x) in xs.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = x - x_mean;
    }
    let y = DVector::from_column_slice(ys);

    let beta = solve_least_squares(&design, &y)?;
    let slope = beta[1];
    let intercept = beta[0] - slope * x_mean;

    Some(LineFit { intercept, slope })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn fit_line_recovers_calendar_year_trend() {
        // 0.02 °C/yr through 0.0 at 1950, sampled on raw years.
        let xs: Vec<f64> = (1950..=2020).map(|y| y as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 0.02 * (x - 1950.0)).collect();

        let fit = fit_line(&xs, &ys).unwrap();
        assert!((fit.slope - 0.02).abs() < 1e-9, "slope {}", fit.slope);
        assert!(fit.predict(1950.0).abs() < 1e-8);
        assert!((fit.predict(2050.0) - 2.0).abs() < 1e-8);
    }

    #[test]
    fn fit_line_matches_closed_form_on_noisy_points() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 2.0, 5.0];
        // slope = sxy / sxx = 5.5 / 5.0
        let fit = fit_line(&xs, &ys).unwrap();
        assert!((fit.slope - 1.1).abs() < 1e-9);
        assert!((fit.intercept - 1.1).abs() < 1e-9);
    }

    #[test]
    fn fit_line_rejects_degenerate_input() {
        assert!(fit_line(&[1.0], &[1.0]).is_none());
        assert!(fit_line(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(fit_line(&[1.0, 2.0], &[1.0]).is_none());
        assert!(fit_line(&[1.0, 2.0], &[1.0, f64::NAN]).is_none());
    }
}
