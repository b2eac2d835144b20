//! Explicit ODE integration and 1-D quadrature.
//!
//! Provides:
//! - `OdeSystem` trait for right-hand sides y' = f(t, y)
//! - Fixed-step RK4 and adaptive Dormand-Prince 5(4) steppers
//! - `solve_ivp` driver that samples the solution at requested times
//! - Adaptive Simpson quadrature (`quad`)
//! - `linspace` / `arange` sample grids
//!
//! Only explicit methods for non-stiff problems are provided.

pub mod error;
pub mod grid;
pub mod integrator;
pub mod quadrature;
pub mod solve;
pub mod system;

pub use error::{OdeError, OdeResult};
pub use grid::{arange, linspace};
pub use integrator::{DormandPrince45, Integrator, Rk4, StepOutcome};
pub use quadrature::{QuadOptions, QuadResult, quad};
pub use solve::{IvpMethod, IvpOptions, IvpSolution, solve_ivp};
pub use system::{FnSystem, OdeSystem};

pub use nalgebra::DVector;
