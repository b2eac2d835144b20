//! Scalar IVP compared against its closed-form solution.
//!
//! y' = (y - 0.01x²)² sin(x²) + 0.02x with y(x₀) = y₀ has the exact solution
//! y = 1 / (K - S(x)) + 0.01x², K = 1 / (y₀ - 0.01x₀²) + S(x₀), with S the
//! Fresnel-type integral S(x) = ∫₀ˣ sin(t²) dt. For y(0) = 0.4, K = 2.5.

use std::fmt;

use pf_ode::{DVector, OdeError, OdeResult, OdeSystem, QuadOptions, arange, quad, solve_ivp};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::IvpCaseConfig;
use crate::error::{AppError, AppResult};

/// The scalar problem together with its starting point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarIvp {
    pub x0: f64,
    pub y0: f64,
}

impl Default for ScalarIvp {
    fn default() -> Self {
        Self { x0: 0.0, y0: 0.4 }
    }
}

impl ScalarIvp {
    pub fn new(x0: f64, y0: f64) -> Self {
        Self { x0, y0 }
    }

    pub fn slope(x: f64, y: f64) -> f64 {
        let u = y - 0.01 * x * x;
        u * u * (x * x).sin() + 0.02 * x
    }

    /// S(x) = ∫₀ˣ sin(t²) dt by adaptive quadrature.
    pub fn fresnel_s(x: f64, opts: &QuadOptions) -> OdeResult<f64> {
        Ok(quad(|t| (t * t).sin(), 0.0, x, opts)?.value)
    }

    /// Closed-form solution through (x0, y0).
    pub fn exact(&self, x: f64, opts: &QuadOptions) -> OdeResult<f64> {
        let u0 = self.y0 - 0.01 * self.x0 * self.x0;
        if u0 == 0.0 {
            // u = y - 0.01x² stays at zero
            return Ok(0.01 * x * x);
        }
        let k = 1.0 / u0 + Self::fresnel_s(self.x0, opts)?;
        let y = 1.0 / (k - Self::fresnel_s(x, opts)?) + 0.01 * x * x;
        if y.is_finite() {
            Ok(y)
        } else {
            Err(OdeError::NonFinite {
                what: "exact solution",
                t: x,
            })
        }
    }
}

impl OdeSystem for ScalarIvp {
    fn dim(&self) -> usize {
        1
    }

    fn rhs(&self, t: f64, y: &DVector<f64>) -> OdeResult<DVector<f64>> {
        Ok(DVector::from_element(1, Self::slope(t, y[0])))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IvpRow {
    pub x: f64,
    pub exact: f64,
    pub numerical: f64,
    pub abs_error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IvpComparison {
    pub x_start: f64,
    pub y0: f64,
    pub rows: Vec<IvpRow>,
    pub max_abs_error: f64,
    pub nfev: usize,
}

pub fn run_ivp_case(config: &IvpCaseConfig) -> AppResult<IvpComparison> {
    if !(config.sample_step > 0.0) {
        return Err(AppError::InvalidInput(format!(
            "sample_step must be positive, got {}",
            config.sample_step
        )));
    }

    let mut samples = arange(config.x_start, config.sample_stop, config.sample_step);
    let before = samples.len();
    samples.retain(|&x| x <= config.x_end);
    if samples.len() < before {
        warn!(
            dropped = before - samples.len(),
            x_end = config.x_end,
            "Dropped sample points past the integration span"
        );
    }

    let problem = ScalarIvp::new(config.x_start, config.y0);
    let y0 = DVector::from_element(1, config.y0);
    let solution = solve_ivp(
        &problem,
        (config.x_start, config.x_end),
        &y0,
        &samples,
        &config.solver,
    )?;

    let rows = solution
        .t
        .iter()
        .zip(&solution.y)
        .map(|(&x, y)| {
            let exact = problem.exact(x, &config.quadrature)?;
            Ok(IvpRow {
                x,
                exact,
                numerical: y[0],
                abs_error: (exact - y[0]).abs(),
            })
        })
        .collect::<OdeResult<Vec<_>>>()?;

    let max_abs_error = rows.iter().map(|r| r.abs_error).fold(0.0, f64::max);
    info!(
        samples = rows.len(),
        max_abs_error,
        nfev = solution.nfev,
        "Scalar IVP case finished"
    );

    Ok(IvpComparison {
        x_start: config.x_start,
        y0: config.y0,
        rows,
        max_abs_error,
        nfev: solution.nfev,
    })
}

impl fmt::Display for IvpComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "IVP: y'=(y-0.01x^2)^2 sin(x^2)+0.02x, y({})={}",
            self.x_start, self.y0
        )?;
        writeln!(
            f,
            "{:>6}  {:>12}  {:>12}  {:>10}",
            "x", "exact", "numerical", "|error|"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>6.2}  {:>12.6}  {:>12.6}  {:>10.2e}",
                row.x, row.exact, row.numerical, row.abs_error
            )?;
        }
        writeln!(
            f,
            "max |error| = {:.3e} ({} rhs evaluations)",
            self.max_abs_error, self.nfev
        )
    }
}
