//! Series RLC circuit driven by a sinusoidal source.

use std::fmt;

use pf_ode::{DVector, OdeResult, OdeSystem, linspace, solve_ivp};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::RlcCaseConfig;
use crate::error::{AppError, AppResult};

/// State is `[i1, v_c]`:
/// di1/dt = (v(t) - R·i1 - v_c) / L, dv_c/dt = i1 / C, v(t) = A·sin(ωt).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RlcCircuit {
    /// Ohms
    pub resistance: f64,
    /// Henrys
    pub inductance: f64,
    /// Farads
    pub capacitance: f64,
    /// Source amplitude (V)
    pub amplitude: f64,
    /// Source angular frequency (rad/s)
    pub omega: f64,
}

impl Default for RlcCircuit {
    fn default() -> Self {
        Self {
            resistance: 10.0,
            inductance: 20.0,
            capacitance: 0.05,
            amplitude: 20.0,
            omega: 20.0,
        }
    }
}

impl RlcCircuit {
    pub fn source_voltage(&self, t: f64) -> f64 {
        self.amplitude * (self.omega * t).sin()
    }

    fn validate(&self) -> AppResult<()> {
        let positive = [
            ("resistance", self.resistance, false),
            ("inductance", self.inductance, true),
            ("capacitance", self.capacitance, true),
        ];
        for (name, value, strict) in positive {
            let ok = value.is_finite() && if strict { value > 0.0 } else { value >= 0.0 };
            if !ok {
                return Err(AppError::InvalidInput(format!("{name} = {value}")));
            }
        }
        if !(self.amplitude.is_finite() && self.omega.is_finite()) {
            return Err(AppError::InvalidInput("source must be finite".to_string()));
        }
        Ok(())
    }
}

impl OdeSystem for RlcCircuit {
    fn dim(&self) -> usize {
        2
    }

    fn rhs(&self, t: f64, y: &DVector<f64>) -> OdeResult<DVector<f64>> {
        let (i1, vc) = (y[0], y[1]);
        let di1 = (self.source_voltage(t) - self.resistance * i1 - vc) / self.inductance;
        let dvc = i1 / self.capacitance;
        Ok(DVector::from_vec(vec![di1, dvc]))
    }
}

/// Sampled circuit response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RlcSeries {
    pub t: Vec<f64>,
    pub i1: Vec<f64>,
    pub v_c: Vec<f64>,
    pub nfev: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RlcSummary {
    pub peak_i1: f64,
    pub peak_v_c: f64,
    pub final_i1: f64,
    pub final_v_c: f64,
}

impl RlcSeries {
    /// Current in the second branch; the loop is in series so it equals i1.
    pub fn i2(&self) -> &[f64] {
        &self.i1
    }

    pub fn summary(&self) -> RlcSummary {
        let peak = |v: &[f64]| v.iter().map(|x| x.abs()).fold(0.0, f64::max);
        RlcSummary {
            peak_i1: peak(&self.i1),
            peak_v_c: peak(&self.v_c),
            final_i1: self.i1.last().copied().unwrap_or(0.0),
            final_v_c: self.v_c.last().copied().unwrap_or(0.0),
        }
    }
}

pub fn run_rlc_case(config: &RlcCaseConfig) -> AppResult<RlcSeries> {
    config.circuit.validate()?;
    if config.points < 2 {
        return Err(AppError::InvalidInput(format!(
            "need at least 2 sample points, got {}",
            config.points
        )));
    }

    let t_eval = linspace(0.0, config.t_end, config.points);
    let y0 = DVector::from_vec(vec![config.i1_0, config.vc_0]);
    let solution = solve_ivp(&config.circuit, (0.0, config.t_end), &y0, &t_eval, &config.solver)?;

    let series = RlcSeries {
        i1: solution.component(0),
        v_c: solution.component(1),
        t: solution.t,
        nfev: solution.nfev,
    };
    let summary = series.summary();
    info!(
        samples = series.t.len(),
        peak_i1 = summary.peak_i1,
        peak_v_c = summary.peak_v_c,
        "RLC case finished"
    );
    Ok(series)
}

impl fmt::Display for RlcSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "peak |i1(t)| = |i2(t)| = {:.4} A", self.peak_i1)?;
        writeln!(f, "peak |vC(t)| = {:.4} V", self.peak_v_c)?;
        write!(
            f,
            "final i1 = {:.4} A, final vC = {:.4} V",
            self.final_i1, self.final_v_c
        )
    }
}

impl fmt::Display for RlcSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Currents and Voltage in RLC Circuit")?;
        if let (Some(t0), Some(t1)) = (self.t.first(), self.t.last()) {
            writeln!(f, "{} samples on [{t0}, {t1}] s", self.t.len())?;
        }
        writeln!(f, "{}", self.summary())
    }
}
