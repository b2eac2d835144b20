//! Initial value problem driver.

use nalgebra::DVector;
use pf_core::Tolerances;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OdeError, OdeResult};
use crate::integrator::{DormandPrince45, Integrator, Rk4};
use crate::system::OdeSystem;

/// Integration method selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum IvpMethod {
    /// Adaptive Dormand-Prince 5(4) (default).
    Rk45,
    /// Classical RK4 with a fixed step (seconds or x-units).
    Rk4 { step: f64 },
}

impl Default for IvpMethod {
    fn default() -> Self {
        IvpMethod::Rk45
    }
}

/// Options for `solve_ivp`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IvpOptions {
    pub method: IvpMethod,
    /// Error tolerances for adaptive methods
    pub tol: Tolerances,
    /// Upper bound on the step size
    pub max_step: f64,
    /// Initial step; chosen automatically when `None`
    pub first_step: Option<f64>,
    /// Safety limit on accepted + rejected steps
    pub max_steps: usize,
}

impl Default for IvpOptions {
    fn default() -> Self {
        Self {
            method: IvpMethod::default(),
            tol: Tolerances {
                abs: 1e-6,
                rel: 1e-3,
            },
            max_step: f64::INFINITY,
            first_step: None,
            max_steps: 1_000_000,
        }
    }
}

/// Sampled solution of an IVP.
#[derive(Clone, Debug)]
pub struct IvpSolution {
    /// Sample times
    pub t: Vec<f64>,
    /// State at each sample time
    pub y: Vec<DVector<f64>>,
    /// Right-hand side evaluations
    pub nfev: usize,
    /// Accepted steps
    pub accepted: usize,
    /// Rejected steps
    pub rejected: usize,
}

impl IvpSolution {
    /// Time series of one state component.
    pub fn component(&self, i: usize) -> Vec<f64> {
        self.y.iter().map(|y| y[i]).collect()
    }
}

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;

/// Integrate `system` from `span.0` to `span.1` starting at `y0`.
///
/// With a non-empty `t_eval`, the solution is reported exactly at those
/// times (steps are shortened to land on them). With an empty `t_eval`,
/// every accepted step is reported, including the initial point.
pub fn solve_ivp<S: OdeSystem + ?Sized>(
    system: &S,
    span: (f64, f64),
    y0: &DVector<f64>,
    t_eval: &[f64],
    opts: &IvpOptions,
) -> OdeResult<IvpSolution> {
    let (t0, t1) = span;
    validate(system, span, y0, t_eval, opts)?;

    let mut driver = Driver {
        system,
        opts,
        t_eval,
        next_eval: 0,
        out_t: Vec::with_capacity(t_eval.len()),
        out_y: Vec::with_capacity(t_eval.len()),
        nfev: 0,
        accepted: 0,
        rejected: 0,
    };

    let mut t = t0;
    let mut y = y0.clone();
    let mut f = driver.rhs(t, &y)?;
    driver.record(t, &y);

    let mut h = match (opts.method, opts.first_step) {
        (IvpMethod::Rk4 { step }, _) => step,
        (IvpMethod::Rk45, Some(h)) => h,
        (IvpMethod::Rk45, None) => driver.initial_step(t0, &y, &f, t1, 4)?,
    }
    .min(opts.max_step);
    let mut after_rejection = false;

    while t < t1 {
        if driver.accepted + driver.rejected >= opts.max_steps {
            return Err(OdeError::MaxSteps {
                max_steps: opts.max_steps,
                t,
            });
        }

        let target = driver.next_stop(t, t1);
        let clipped = t + h >= target;
        let h_try = if clipped { target - t } else { h };

        let min_step = 10.0 * f64::EPSILON * t.abs().max(1.0);
        if h_try < min_step && !clipped {
            return Err(OdeError::StepUnderflow { t, h: h_try });
        }

        let outcome = match opts.method {
            IvpMethod::Rk4 { .. } => Rk4.step(system, t, &y, &f, h_try)?,
            IvpMethod::Rk45 => DormandPrince45.step(system, t, &y, &f, h_try)?,
        };
        driver.nfev += outcome.nfev;

        if let Some(err) = &outcome.error {
            let err_norm = driver.error_norm(err, &y, &outcome.y);
            let exponent = -1.0 / (DormandPrince45.error_order().unwrap_or(4) as f64 + 1.0);

            if err_norm > 1.0 || !err_norm.is_finite() {
                driver.rejected += 1;
                let factor = if err_norm.is_finite() {
                    (SAFETY * err_norm.powf(exponent)).max(MIN_FACTOR)
                } else {
                    MIN_FACTOR
                };
                h = h_try * factor;
                after_rejection = true;
                if h < min_step {
                    return Err(OdeError::StepUnderflow { t, h });
                }
                continue;
            }

            let factor = accepted_step_factor(err_norm, exponent, after_rejection);
            after_rejection = false;
            // A clipped step says nothing about how large the next one may be.
            if !clipped || factor < 1.0 {
                h = (h_try * factor).min(opts.max_step);
            }
        }

        t = if clipped { target } else { t + h_try };
        y = outcome.y;
        if y.iter().any(|v| !v.is_finite()) {
            return Err(OdeError::NonFinite { what: "state", t });
        }
        f = match outcome.f_end {
            Some(f_end) => f_end,
            None => driver.rhs(t, &y)?,
        };
        driver.accepted += 1;
        driver.record(t, &y);
    }

    debug!(
        nfev = driver.nfev,
        accepted = driver.accepted,
        rejected = driver.rejected,
        samples = driver.out_t.len(),
        "IVP integration finished"
    );

    Ok(IvpSolution {
        t: driver.out_t,
        y: driver.out_y,
        nfev: driver.nfev,
        accepted: driver.accepted,
        rejected: driver.rejected,
    })
}

/// Step growth after an accepted step. The step may not grow on the
/// attempt that follows a rejection.
fn accepted_step_factor(err_norm: f64, exponent: f64, after_rejection: bool) -> f64 {
    let factor = if err_norm == 0.0 {
        MAX_FACTOR
    } else {
        (SAFETY * err_norm.powf(exponent)).min(MAX_FACTOR)
    };
    if after_rejection { factor.min(1.0) } else { factor }
}

fn validate<S: OdeSystem + ?Sized>(
    system: &S,
    (t0, t1): (f64, f64),
    y0: &DVector<f64>,
    t_eval: &[f64],
    opts: &IvpOptions,
) -> OdeResult<()> {
    if !t0.is_finite() || !t1.is_finite() || t1 <= t0 {
        return Err(OdeError::InvalidArg {
            what: "span must be finite with t_end > t_start",
        });
    }
    if y0.len() != system.dim() {
        return Err(OdeError::Dimension {
            expected: system.dim(),
            actual: y0.len(),
        });
    }
    if y0.iter().any(|v| !v.is_finite()) {
        return Err(OdeError::NonFinite {
            what: "initial state",
            t: t0,
        });
    }
    if t_eval.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(OdeError::InvalidArg {
            what: "t_eval must be strictly increasing",
        });
    }
    if t_eval.iter().any(|&t| !(t >= t0 && t <= t1)) {
        return Err(OdeError::InvalidArg {
            what: "t_eval must lie within the span",
        });
    }
    if !(opts.max_step > 0.0) {
        return Err(OdeError::InvalidArg {
            what: "max_step must be positive",
        });
    }
    if opts.first_step.is_some_and(|h| !(h > 0.0 && h.is_finite())) {
        return Err(OdeError::InvalidArg {
            what: "first_step must be positive and finite",
        });
    }
    if let IvpMethod::Rk4 { step } = opts.method {
        if !(step > 0.0 && step.is_finite()) {
            return Err(OdeError::InvalidArg {
                what: "RK4 step must be positive and finite",
            });
        }
    }
    if !(opts.tol.abs > 0.0 || opts.tol.rel > 0.0) {
        return Err(OdeError::InvalidArg {
            what: "tolerances must not both be zero",
        });
    }
    Ok(())
}

struct Driver<'a, S: ?Sized> {
    system: &'a S,
    opts: &'a IvpOptions,
    t_eval: &'a [f64],
    next_eval: usize,
    out_t: Vec<f64>,
    out_y: Vec<DVector<f64>>,
    nfev: usize,
    accepted: usize,
    rejected: usize,
}

impl<S: OdeSystem + ?Sized> Driver<'_, S> {
    fn rhs(&mut self, t: f64, y: &DVector<f64>) -> OdeResult<DVector<f64>> {
        self.nfev += 1;
        let f = self.system.rhs(t, y)?;
        if f.len() != y.len() {
            return Err(OdeError::Dimension {
                expected: y.len(),
                actual: f.len(),
            });
        }
        Ok(f)
    }

    /// Next time the integrator must land on exactly.
    fn next_stop(&self, t: f64, t1: f64) -> f64 {
        self.t_eval
            .get(self.next_eval)
            .copied()
            .filter(|&te| te > t)
            .unwrap_or(t1)
    }

    fn record(&mut self, t: f64, y: &DVector<f64>) {
        if self.t_eval.is_empty() {
            self.out_t.push(t);
            self.out_y.push(y.clone());
            return;
        }
        while let Some(&te) = self.t_eval.get(self.next_eval) {
            if te > t {
                break;
            }
            self.out_t.push(te);
            self.out_y.push(y.clone());
            self.next_eval += 1;
        }
    }

    /// RMS of the error scaled by atol + rtol·max(|y|, |y_new|).
    fn error_norm(&self, err: &DVector<f64>, y: &DVector<f64>, y_new: &DVector<f64>) -> f64 {
        let n = err.len().max(1) as f64;
        let sum: f64 = err
            .iter()
            .zip(y.iter().zip(y_new.iter()))
            .map(|(e, (a, b))| {
                let scale = self.opts.tol.bound(a.abs().max(b.abs()));
                (e / scale).powi(2)
            })
            .sum();
        (sum / n).sqrt()
    }

    /// Starting step heuristic (Hairer, Nørsett & Wanner, II.4).
    fn initial_step(
        &mut self,
        t0: f64,
        y0: &DVector<f64>,
        f0: &DVector<f64>,
        t1: f64,
        order: u32,
    ) -> OdeResult<f64> {
        let tol = self.opts.tol;
        let rms = |v: &DVector<f64>, base: &DVector<f64>| -> f64 {
            let n = v.len().max(1) as f64;
            let s: f64 = v
                .iter()
                .zip(base.iter())
                .map(|(x, b)| (x / tol.bound(*b)).powi(2))
                .sum();
            (s / n).sqrt()
        };

        let d0 = rms(y0, y0);
        let d1 = rms(f0, y0);
        let h0 = if d0 < 1e-5 || d1 < 1e-5 {
            1e-6
        } else {
            0.01 * d0 / d1
        }
        .min(t1 - t0);

        let y1 = y0 + f0 * h0;
        let f1 = self.rhs(t0 + h0, &y1)?;
        let d2 = rms(&(f1 - f0), y0) / h0;

        let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(1.0 / (order as f64 + 1.0))
        };

        Ok((100.0 * h0).min(h1).min(t1 - t0))
    }
}
