//! Explicit Runge-Kutta steppers.

use nalgebra::DVector;

use crate::error::OdeResult;
use crate::system::OdeSystem;

/// Result of a single step attempt.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// State at t + h
    pub y: DVector<f64>,
    /// Derivative at (t + h, y), when the method produces it for free
    pub f_end: Option<DVector<f64>>,
    /// Local error estimate (embedded pairs only)
    pub error: Option<DVector<f64>>,
    /// Right-hand side evaluations spent
    pub nfev: usize,
}

/// Trait for one-step integrators.
pub trait Integrator {
    /// Order used for step-size control (the lower order of an embedded pair).
    fn error_order(&self) -> Option<u32>;

    /// Advance from (t, y) by h. `f0` is dy/dt at (t, y).
    fn step<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        t: f64,
        y: &DVector<f64>,
        f0: &DVector<f64>,
        h: f64,
    ) -> OdeResult<StepOutcome>;
}

/// Classical RK4 (Runge-Kutta 4th order).
#[derive(Clone, Copy, Debug, Default)]
pub struct Rk4;

impl Integrator for Rk4 {
    fn error_order(&self) -> Option<u32> {
        None
    }

    fn step<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        t: f64,
        y: &DVector<f64>,
        f0: &DVector<f64>,
        h: f64,
    ) -> OdeResult<StepOutcome> {
        let k1 = f0;
        let k2 = system.rhs(t + 0.5 * h, &(y + k1 * (0.5 * h)))?;
        let k3 = system.rhs(t + 0.5 * h, &(y + &k2 * (0.5 * h)))?;
        let k4 = system.rhs(t + h, &(y + &k3 * h))?;

        // y_new = y + (h/6) * (k1 + 2*k2 + 2*k3 + k4)
        let y_new = y + (k1 + &k2 * 2.0 + &k3 * 2.0 + &k4) * (h / 6.0);

        Ok(StepOutcome {
            y: y_new,
            f_end: None,
            error: None,
            nfev: 3,
        })
    }
}

/// Dormand-Prince 5(4) embedded pair with first-same-as-last.
#[derive(Clone, Copy, Debug, Default)]
pub struct DormandPrince45;

impl DormandPrince45 {
    const C: [f64; 6] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0];

    const A: [[f64; 5]; 6] = [
        [0.0, 0.0, 0.0, 0.0, 0.0],
        [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
        [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
        [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0],
        [
            19372.0 / 6561.0,
            -25360.0 / 2187.0,
            64448.0 / 6561.0,
            -212.0 / 729.0,
            0.0,
        ],
        [
            9017.0 / 3168.0,
            -355.0 / 33.0,
            46732.0 / 5247.0,
            49.0 / 176.0,
            -5103.0 / 18656.0,
        ],
    ];

    /// 5th-order weights.
    const B: [f64; 6] = [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ];

    /// Difference between 5th- and 4th-order weights; the last entry
    /// multiplies the FSAL stage f(t + h, y_new).
    const E: [f64; 7] = [
        71.0 / 57600.0,
        0.0,
        -71.0 / 16695.0,
        71.0 / 1920.0,
        -17253.0 / 339200.0,
        22.0 / 525.0,
        -1.0 / 40.0,
    ];
}

impl Integrator for DormandPrince45 {
    fn error_order(&self) -> Option<u32> {
        Some(4)
    }

    fn step<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        t: f64,
        y: &DVector<f64>,
        f0: &DVector<f64>,
        h: f64,
    ) -> OdeResult<StepOutcome> {
        let mut k: Vec<DVector<f64>> = Vec::with_capacity(7);
        k.push(f0.clone());

        for s in 1..6 {
            let mut dy = DVector::zeros(y.len());
            for (j, kj) in k.iter().enumerate().take(s) {
                let a = Self::A[s][j];
                if a != 0.0 {
                    dy.axpy(a * h, kj, 1.0);
                }
            }
            k.push(system.rhs(t + Self::C[s] * h, &(y + dy))?);
        }

        let mut y_new = y.clone();
        for (b, ki) in Self::B.iter().zip(&k) {
            if *b != 0.0 {
                y_new.axpy(b * h, ki, 1.0);
            }
        }

        let f_new = system.rhs(t + h, &y_new)?;
        k.push(f_new.clone());

        let mut error = DVector::zeros(y.len());
        for (e, ki) in Self::E.iter().zip(&k) {
            if *e != 0.0 {
                error.axpy(e * h, ki, 1.0);
            }
        }

        Ok(StepOutcome {
            y: y_new,
            f_end: Some(f_new),
            error: Some(error),
            nfev: 6,
        })
    }
}
