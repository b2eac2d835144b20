//! Common utilities for hydraulic calculations.

use crate::error::HydraulicsResult;
use pf_core::numeric::ensure_finite;

/// Flow rates below this magnitude (cfs) are treated as no flow.
pub const EPSILON_FLOW: f64 = 1e-12;

/// Ensure a value is finite, returning `NonPhysical` if not.
pub fn check_finite(value: f64, what: &'static str) -> HydraulicsResult<f64> {
    Ok(ensure_finite(value, what)?)
}

/// Direction of flow along a pipe: 1.0 start→end, -1.0 end→start, 0.0 none.
pub fn flow_direction(q: f64) -> f64 {
    if q.abs() < EPSILON_FLOW {
        0.0
    } else {
        q.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_direction() {
        assert_eq!(flow_direction(2.5), 1.0);
        assert_eq!(flow_direction(-0.1), -1.0);
        assert_eq!(flow_direction(0.0), 0.0);
        assert_eq!(flow_direction(-0.0), 0.0);
    }

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }
}
