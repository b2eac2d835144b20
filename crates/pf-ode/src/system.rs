//! OdeSystem trait for pluggable right-hand sides.

use nalgebra::DVector;

use crate::error::OdeResult;

/// A first-order system y' = f(t, y).
pub trait OdeSystem {
    /// Number of state components.
    fn dim(&self) -> usize;

    /// Compute dy/dt at (t, y).
    fn rhs(&self, t: f64, y: &DVector<f64>) -> OdeResult<DVector<f64>>;
}

/// Adapter turning a closure into an `OdeSystem`.
pub struct FnSystem<F> {
    dim: usize,
    f: F,
}

impl<F> FnSystem<F>
where
    F: Fn(f64, &DVector<f64>) -> DVector<f64>,
{
    pub fn new(dim: usize, f: F) -> Self {
        Self { dim, f }
    }
}

impl<F> OdeSystem for FnSystem<F>
where
    F: Fn(f64, &DVector<f64>) -> DVector<f64>,
{
    fn dim(&self) -> usize {
        self.dim
    }

    fn rhs(&self, t: f64, y: &DVector<f64>) -> OdeResult<DVector<f64>> {
        Ok((self.f)(t, y))
    }
}
