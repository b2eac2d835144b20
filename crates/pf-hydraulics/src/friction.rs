//! Darcy friction factor models.

use serde::{Deserialize, Serialize};

use crate::common::check_finite;
use crate::error::{HydraulicsError, HydraulicsResult};

/// Reynolds numbers below this are treated as laminar (f = 64/Re).
pub const LAMINAR_REYNOLDS_LIMIT: f64 = 2000.0;

/// Flow regime of a pipe at a given flow rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRegime {
    /// No flow; friction factor undefined.
    Stagnant,
    Laminar,
    Turbulent,
}

impl FlowRegime {
    pub fn classify(reynolds: f64) -> Self {
        if reynolds == 0.0 {
            FlowRegime::Stagnant
        } else if reynolds < LAMINAR_REYNOLDS_LIMIT {
            FlowRegime::Laminar
        } else {
            FlowRegime::Turbulent
        }
    }
}

/// How the turbulent friction factor is obtained. Laminar flow always uses 64/Re.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum FrictionModel {
    /// Constant turbulent friction factor.
    Fixed { turbulent: f64 },
    /// Colebrook-White, iterated on 1/sqrt(f) from a Swamee-Jain start.
    Colebrook { max_iter: usize, tol: f64 },
}

impl Default for FrictionModel {
    fn default() -> Self {
        FrictionModel::Fixed { turbulent: 0.02 }
    }
}

impl FrictionModel {
    /// Default Colebrook settings.
    pub fn colebrook() -> Self {
        FrictionModel::Colebrook {
            max_iter: 50,
            tol: 1e-10,
        }
    }

    /// Fixed factors must be finite and positive; Colebrook needs at least
    /// one iteration and a finite positive tolerance.
    pub fn validate(&self) -> HydraulicsResult<()> {
        match *self {
            FrictionModel::Fixed { turbulent } if !(turbulent.is_finite() && turbulent > 0.0) => {
                Err(HydraulicsError::InvalidArg {
                    what: "fixed turbulent friction factor must be finite and positive",
                })
            }
            FrictionModel::Colebrook { max_iter: 0, .. } => Err(HydraulicsError::InvalidArg {
                what: "colebrook needs at least one iteration",
            }),
            FrictionModel::Colebrook { tol, .. } if !(tol.is_finite() && tol > 0.0) => {
                Err(HydraulicsError::InvalidArg {
                    what: "colebrook tolerance must be finite and positive",
                })
            }
            _ => Ok(()),
        }
    }

    /// Darcy friction factor for a (non-negative) Reynolds number and
    /// relative roughness ε/D.
    pub fn friction_factor(&self, reynolds: f64, rel_roughness: f64) -> HydraulicsResult<f64> {
        self.validate()?;
        match FlowRegime::classify(reynolds) {
            FlowRegime::Stagnant => Err(HydraulicsError::InvalidArg {
                what: "friction factor undefined at zero Reynolds number",
            }),
            FlowRegime::Laminar => check_finite(64.0 / reynolds, "laminar friction factor"),
            FlowRegime::Turbulent => match *self {
                FrictionModel::Fixed { turbulent } => Ok(turbulent),
                FrictionModel::Colebrook { max_iter, tol } => {
                    colebrook(reynolds, rel_roughness, max_iter, tol)
                }
            },
        }
    }
}

/// Swamee-Jain explicit approximation of Colebrook-White.
pub fn swamee_jain(reynolds: f64, rel_roughness: f64) -> f64 {
    let a = rel_roughness / 3.7;
    let b = 5.74 / reynolds.powf(0.9);
    0.25 / (a + b).log10().powi(2)
}

/// Solve Colebrook-White by fixed-point iteration on x = 1/sqrt(f):
///
/// x = -2 log10(ε/(3.7 D) + 2.51 x / Re)
pub fn colebrook(
    reynolds: f64,
    rel_roughness: f64,
    max_iter: usize,
    tol: f64,
) -> HydraulicsResult<f64> {
    if !(reynolds > 0.0) || rel_roughness < 0.0 {
        return Err(HydraulicsError::InvalidArg {
            what: "colebrook needs Re > 0 and non-negative roughness",
        });
    }

    let mut x = 1.0 / swamee_jain(reynolds, rel_roughness).sqrt();
    for _ in 0..max_iter {
        let next = -2.0 * (rel_roughness / 3.7 + 2.51 * x / reynolds).log10();
        check_finite(next, "colebrook iterate")?;
        if (next - x).abs() <= tol * next.abs() {
            return Ok(1.0 / (next * next));
        }
        x = next;
    }

    Err(HydraulicsError::ConvergenceFailed {
        what: "colebrook",
        iterations: max_iter,
    })
}
