//! Nelder-Mead downhill simplex optimizer.
//!
//! Derivative-free local minimization. Each iteration replaces the worst
//! vertex of an `n + 1` point simplex by reflection, expansion or
//! contraction, and shrinks the simplex toward the best vertex when none of
//! those improve.

use super::{OptimizationResult, Optimizer};

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Nelder-Mead optimizer configuration.
#[derive(Debug, Clone)]
pub struct NelderMead {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Maximum number of objective evaluations.
    pub maxfev: usize,
    /// Absolute spread of the simplex vertices accepted as converged.
    pub xatol: f64,
    /// Absolute spread of the vertex values accepted as converged.
    pub fatol: f64,
    /// Offset added to each coordinate to build the initial simplex.
    pub initial_step: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            maxiter: 1000,
            maxfev: 2000,
            xatol: 1e-6,
            fatol: 1e-8,
            initial_step: 0.5,
        }
    }
}

impl NelderMead {
    /// Create a new Nelder-Mead optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set maximum objective evaluations.
    pub fn with_maxfev(mut self, maxfev: usize) -> Self {
        self.maxfev = maxfev;
        self
    }

    /// Set the parameter and value convergence tolerances.
    pub fn with_tolerances(mut self, xatol: f64, fatol: f64) -> Self {
        self.xatol = xatol;
        self.fatol = fatol;
        self
    }

    /// Set the initial simplex offset.
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }

    fn has_converged(&self, simplex: &[Vertex]) -> bool {
        let Some((best, rest)) = simplex.split_first() else {
            return true;
        };
        let x_spread = rest
            .iter()
            .flat_map(|v| v.point.iter().zip(&best.point).map(|(a, b)| (a - b).abs()))
            .fold(0.0, f64::max);
        let f_spread = rest
            .iter()
            .map(|v| (v.value - best.value).abs())
            .fold(0.0, f64::max);
        x_spread <= self.xatol && f_spread <= self.fatol
    }
}

#[derive(Debug, Clone)]
struct Vertex {
    point: Vec<f64>,
    value: f64,
}

/// `from + t · (toward − from)`.
fn step_from(from: &[f64], toward: &[f64], t: f64) -> Vec<f64> {
    from.iter().zip(toward).map(|(f, w)| f + t * (w - f)).collect()
}

fn centroid(vertices: &[Vertex], n: usize) -> Vec<f64> {
    let mut c = vec![0.0; n];
    for v in vertices {
        for (ci, xi) in c.iter_mut().zip(&v.point) {
            *ci += xi;
        }
    }
    for ci in &mut c {
        *ci /= vertices.len() as f64;
    }
    c
}

impl Optimizer for NelderMead {
    fn minimize<F, E>(
        &self,
        mut objective: F,
        initial_params: Vec<f64>,
    ) -> Result<OptimizationResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let n = initial_params.len();
        let mut num_evaluations = 0;

        // Initialize simplex
        let mut simplex = Vec::with_capacity(n + 1);
        for i in 0..=n {
            let mut point = initial_params.clone();
            if i > 0 {
                point[i - 1] += self.initial_step;
            }
            let value = objective(&point)?;
            num_evaluations += 1;
            simplex.push(Vertex { point, value });
        }

        let mut best_value = simplex[0].value;
        let mut history = vec![best_value];
        let mut num_iterations = 0;
        let mut converged = false;

        loop {
            // Stable: ties keep their earlier position
            simplex.sort_by(|a, b| a.value.total_cmp(&b.value));

            if self.has_converged(&simplex) {
                converged = true;
                break;
            }
            if num_iterations >= self.maxiter || num_evaluations >= self.maxfev {
                break;
            }
            num_iterations += 1;

            let c = centroid(&simplex[..n], n);
            let worst = simplex[n].clone();

            let reflected = step_from(&c, &worst.point, -REFLECTION);
            let f_reflected = objective(&reflected)?;
            num_evaluations += 1;

            let mut shrink = false;
            if f_reflected < simplex[0].value {
                let expanded = step_from(&c, &reflected, EXPANSION);
                let f_expanded = objective(&expanded)?;
                num_evaluations += 1;

                simplex[n] = if f_expanded < f_reflected {
                    Vertex {
                        point: expanded,
                        value: f_expanded,
                    }
                } else {
                    Vertex {
                        point: reflected,
                        value: f_reflected,
                    }
                };
            } else if f_reflected < simplex[n - 1].value {
                simplex[n] = Vertex {
                    point: reflected,
                    value: f_reflected,
                };
            } else if f_reflected < worst.value {
                // Outside contraction
                let contracted = step_from(&c, &reflected, CONTRACTION);
                let f_contracted = objective(&contracted)?;
                num_evaluations += 1;

                if f_contracted <= f_reflected {
                    simplex[n] = Vertex {
                        point: contracted,
                        value: f_contracted,
                    };
                } else {
                    shrink = true;
                }
            } else {
                // Inside contraction
                let contracted = step_from(&c, &worst.point, CONTRACTION);
                let f_contracted = objective(&contracted)?;
                num_evaluations += 1;

                if f_contracted < worst.value {
                    simplex[n] = Vertex {
                        point: contracted,
                        value: f_contracted,
                    };
                } else {
                    shrink = true;
                }
            }

            if shrink {
                let best = simplex[0].point.clone();
                for vertex in &mut simplex[1..] {
                    vertex.point = step_from(&best, &vertex.point, SHRINK);
                    vertex.value = objective(&vertex.point)?;
                    num_evaluations += 1;
                }
            }

            let iteration_best = simplex
                .iter()
                .map(|v| v.value)
                .fold(f64::INFINITY, f64::min);
            if iteration_best < best_value {
                best_value = iteration_best;
                history.push(best_value);
            }
        }

        let best = simplex.swap_remove(0);
        Ok(OptimizationResult {
            optimal_params: best.point,
            optimal_value: best.value,
            num_evaluations,
            num_iterations,
            history,
            converged,
        })
    }
}
