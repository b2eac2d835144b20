//! Adaptive Simpson quadrature.

use pf_core::Tolerances;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{OdeError, OdeResult};

/// Options for `quad`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadOptions {
    /// Requested absolute/relative accuracy
    pub tol: Tolerances,
    /// Maximum bisection depth
    pub max_depth: u32,
}

impl Default for QuadOptions {
    fn default() -> Self {
        Self {
            tol: Tolerances {
                abs: 1.49e-8,
                rel: 1.49e-8,
            },
            max_depth: 50,
        }
    }
}

/// Integral value with its error estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadResult {
    pub value: f64,
    pub abs_error: f64,
    pub evaluations: usize,
    /// False if some interval hit `max_depth` before meeting the tolerance
    pub converged: bool,
}

struct Panel {
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
}

struct Simpson<'f, F> {
    f: &'f F,
    evaluations: usize,
    converged: bool,
}

impl<F: Fn(f64) -> f64> Simpson<'_, F> {
    fn eval(&mut self, x: f64) -> OdeResult<f64> {
        self.evaluations += 1;
        let v = (self.f)(x);
        if v.is_finite() {
            Ok(v)
        } else {
            Err(OdeError::NonFinite {
                what: "integrand",
                t: x,
            })
        }
    }

    /// Returns (value, error estimate) for a panel.
    fn refine(&mut self, p: Panel, eps: f64, depth: u32) -> OdeResult<(f64, f64)> {
        let m = 0.5 * (p.a + p.b);
        let lm = 0.5 * (p.a + m);
        let rm = 0.5 * (m + p.b);
        let flm = self.eval(lm)?;
        let frm = self.eval(rm)?;

        let left = (m - p.a) / 6.0 * (p.fa + 4.0 * flm + p.fm);
        let right = (p.b - m) / 6.0 * (p.fm + 4.0 * frm + p.fb);
        let delta = left + right - p.whole;

        if delta.abs() <= 15.0 * eps {
            return Ok((left + right + delta / 15.0, delta.abs() / 15.0));
        }
        if depth == 0 {
            self.converged = false;
            return Ok((left + right + delta / 15.0, delta.abs() / 15.0));
        }

        let (lv, le) = self.refine(
            Panel {
                a: p.a,
                b: m,
                fa: p.fa,
                fm: flm,
                fb: p.fm,
                whole: left,
            },
            0.5 * eps,
            depth - 1,
        )?;
        let (rv, re) = self.refine(
            Panel {
                a: m,
                b: p.b,
                fa: p.fm,
                fm: frm,
                fb: p.fb,
                whole: right,
            },
            0.5 * eps,
            depth - 1,
        )?;
        Ok((lv + rv, le + re))
    }
}

/// Integrate `f` over `[a, b]`.
///
/// `b < a` gives the negated integral over `[b, a]`; `a == b` gives 0.
pub fn quad<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, opts: &QuadOptions) -> OdeResult<QuadResult> {
    if !a.is_finite() || !b.is_finite() {
        return Err(OdeError::InvalidArg {
            what: "integration limits must be finite",
        });
    }
    if a == b {
        return Ok(QuadResult {
            value: 0.0,
            abs_error: 0.0,
            evaluations: 0,
            converged: true,
        });
    }
    let (lo, hi, sign) = if a < b { (a, b, 1.0) } else { (b, a, -1.0) };

    let mut simpson = Simpson {
        f: &f,
        evaluations: 0,
        converged: true,
    };
    let fa = simpson.eval(lo)?;
    let fb = simpson.eval(hi)?;
    let fm = simpson.eval(0.5 * (lo + hi))?;
    let whole = (hi - lo) / 6.0 * (fa + 4.0 * fm + fb);

    let eps = opts.tol.bound(whole);
    let (value, abs_error) = simpson.refine(
        Panel {
            a: lo,
            b: hi,
            fa,
            fm,
            fb,
            whole,
        },
        eps,
        opts.max_depth,
    )?;

    if !simpson.converged {
        warn!(
            a,
            b,
            abs_error,
            "quadrature hit maximum subdivision depth before meeting tolerance"
        );
    }

    Ok(QuadResult {
        value: sign * value,
        abs_error,
        evaluations: simpson.evaluations,
        converged: simpson.converged,
    })
}
