//! Matrix exponential via scaling-and-squaring with a degree-13 Padé
//! approximant.
//!
//! `exp(A) = (r13(A / 2^s))^{2^s}`, where `r13 = q13(A)^{-1} p13(A)` and `s`
//! is the smallest power that brings `‖A‖₁ / 2^s` below `θ13`. With that
//! bound the truncation error is below double-precision unit roundoff.
//!
//! Reference: Higham (2005), "The Scaling and Squaring Method for the Matrix
//! Exponential Revisited", SIAM J. Matrix Anal. Appl. 26(4), 1179.

use ndarray::{Array1, Axis};
use num_complex::Complex64;
use tracing::trace;

use crate::error::{SimError, SimResult};
use crate::operator::{Operator, identity};

/// Padé(13) numerator coefficients `b_0 … b_13`.
const PADE_13: [f64; 14] = [
    64_764_752_532_480_000.0,
    32_382_376_266_240_000.0,
    7_771_770_303_897_600.0,
    1_187_353_796_428_800.0,
    129_060_195_264_000.0,
    10_559_470_521_600.0,
    670_442_572_800.0,
    33_522_128_640.0,
    1_323_241_920.0,
    40_840_800.0,
    960_960.0,
    16_380.0,
    182.0,
    1.0,
];

/// Largest 1-norm for which Padé(13) needs no scaling.
const THETA_13: f64 = 5.371_920_351_148_152;

/// Compute `exp(a)` for a general complex square matrix.
pub fn matrix_exp(a: &Operator) -> SimResult<Operator> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(SimError::NotSquare { rows, cols });
    }

    let norm = one_norm(a);
    if !norm.is_finite() || a.iter().any(|z| !z.is_finite()) {
        return Err(SimError::NonFiniteMatrix);
    }
    let squarings = if norm > THETA_13 {
        (norm / THETA_13).log2().ceil() as i32
    } else {
        0
    };
    trace!(dim = rows, norm, squarings, "matrix exponential");

    let scaled = a * Complex64::new(0.5f64.powi(squarings), 0.0);
    let (u, v) = pade13(&scaled);
    let mut result = solve(&v - &u, &v + &u)?;
    for _ in 0..squarings {
        result = result.dot(&result);
    }
    Ok(result)
}

/// Maximum absolute column sum.
pub fn one_norm(a: &Operator) -> f64 {
    a.axis_iter(Axis(1))
        .map(|col| col.iter().map(|z| z.norm()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Odd (`u`) and even (`v`) parts of the Padé(13) numerator.
fn pade13(a: &Operator) -> (Operator, Operator) {
    let b = |k: usize| Complex64::new(PADE_13[k], 0.0);
    let id = identity(a.nrows());
    let a2 = a.dot(a);
    let a4 = a2.dot(&a2);
    let a6 = a4.dot(&a2);

    let u_high = &a6 * b(13) + &a4 * b(11) + &a2 * b(9);
    let u_poly = a6.dot(&u_high) + &a6 * b(7) + &a4 * b(5) + &a2 * b(3) + &id * b(1);
    let u = a.dot(&u_poly);

    let v_high = &a6 * b(12) + &a4 * b(10) + &a2 * b(8);
    let v = a6.dot(&v_high) + &a6 * b(6) + &a4 * b(4) + &a2 * b(2) + &id * b(0);

    (u, v)
}

/// Solve `lhs · X = rhs` by Gaussian elimination with partial pivoting.
fn solve(mut lhs: Operator, mut rhs: Operator) -> SimResult<Operator> {
    let n = lhs.nrows();
    let m = rhs.ncols();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| lhs[(i, col)].norm().total_cmp(&lhs[(j, col)].norm()))
            .unwrap_or(col);
        let pivot_value = lhs[(pivot, col)];
        if pivot_value.norm() <= f64::MIN_POSITIVE || !pivot_value.is_finite() {
            return Err(SimError::SingularMatrix);
        }
        if pivot != col {
            for k in 0..n {
                lhs.swap((col, k), (pivot, k));
            }
            for k in 0..m {
                rhs.swap((col, k), (pivot, k));
            }
        }

        let lhs_pivot_row = lhs.row(col).to_owned();
        let rhs_pivot_row = rhs.row(col).to_owned();
        for row in (col + 1)..n {
            let factor = lhs[(row, col)] / pivot_value;
            if factor.norm() == 0.0 {
                continue;
            }
            lhs.row_mut(row).scaled_add(-factor, &lhs_pivot_row);
            rhs.row_mut(row).scaled_add(-factor, &rhs_pivot_row);
        }
    }

    for row in (0..n).rev() {
        let mut acc: Array1<Complex64> = rhs.row(row).to_owned();
        for j in (row + 1)..n {
            acc.scaled_add(-lhs[(row, j)], &rhs.row(j));
        }
        let diag = lhs[(row, row)];
        acc.mapv_inplace(|z| z / diag);
        rhs.row_mut(row).assign(&acc);
    }

    Ok(rhs)
}
