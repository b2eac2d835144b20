//! Flow assignment strategies.
//!
//! No network solve exists; a strategy decides the flow placed in each
//! segment before the report is evaluated.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;

use crate::error::{NetworkError, NetworkResult};

/// Produces one flow rate (cfs) per segment, in segment order.
pub trait FlowAssignment {
    fn assign(&mut self, segments: &[&str]) -> NetworkResult<Vec<f64>>;
}

/// Independent uniform draws on `[low, high)`.
#[derive(Debug, Clone)]
pub struct UniformRandomFlows {
    dist: Uniform<f64>,
    rng: StdRng,
}

impl UniformRandomFlows {
    pub const DEFAULT_LOW: f64 = -5.0;
    pub const DEFAULT_HIGH: f64 = 5.0;

    /// Seeded generators are reproducible; `None` draws a seed from the OS.
    /// The width `high - low` must itself be finite.
    pub fn new(low: f64, high: f64, seed: Option<u64>) -> NetworkResult<Self> {
        let invalid = || NetworkError::InvalidValue {
            what: format!("uniform flow range [{low}, {high})"),
            value: high - low,
        };
        if !(low.is_finite() && high.is_finite() && (high - low).is_finite() && low < high) {
            return Err(invalid());
        }
        let dist = Uniform::new(low, high).map_err(|_| invalid())?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { dist, rng })
    }

    /// [-5, 5) cfs.
    pub fn standard(seed: Option<u64>) -> NetworkResult<Self> {
        Self::new(Self::DEFAULT_LOW, Self::DEFAULT_HIGH, seed)
    }
}

impl FlowAssignment for UniformRandomFlows {
    fn assign(&mut self, segments: &[&str]) -> NetworkResult<Vec<f64>> {
        Ok(segments
            .iter()
            .map(|_| self.dist.sample(&mut self.rng))
            .collect())
    }
}

/// Explicit per-segment flows. Segments not listed carry no flow.
#[derive(Debug, Clone, Default)]
pub struct FixedFlows {
    flows: BTreeMap<String, f64>,
}

impl FixedFlows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, segment: impl Into<String>, flow: f64) -> Self {
        self.flows.insert(segment.into(), flow);
        self
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FixedFlows {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            flows: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl FlowAssignment for FixedFlows {
    fn assign(&mut self, segments: &[&str]) -> NetworkResult<Vec<f64>> {
        if let Some(unknown) = self.flows.keys().find(|k| !segments.contains(&k.as_str())) {
            return Err(NetworkError::UnknownPipe(unknown.clone()));
        }
        if let Some((name, &q)) = self.flows.iter().find(|(_, q)| !q.is_finite()) {
            return Err(NetworkError::InvalidValue {
                what: format!("flow in segment {name}"),
                value: q,
            });
        }
        Ok(segments
            .iter()
            .map(|name| self.flows.get(*name).copied().unwrap_or(0.0))
            .collect())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroFlows;

impl FlowAssignment for ZeroFlows {
    fn assign(&mut self, segments: &[&str]) -> NetworkResult<Vec<f64>> {
        Ok(vec![0.0; segments.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 3] = ["a-b", "b-c", "c-a"];

    #[test]
    fn uniform_flows_stay_in_range() {
        let mut flows = UniformRandomFlows::standard(Some(7)).unwrap();
        for _ in 0..50 {
            for q in flows.assign(&NAMES).unwrap() {
                assert!((-5.0..5.0).contains(&q));
            }
        }
    }

    #[test]
    fn same_seed_same_flows() {
        let a = UniformRandomFlows::standard(Some(42)).unwrap().assign(&NAMES).unwrap();
        let b = UniformRandomFlows::standard(Some(42)).unwrap().assign(&NAMES).unwrap();
        let c = UniformRandomFlows::standard(Some(43)).unwrap().assign(&NAMES).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn uniform_rejects_empty_range() {
        assert!(UniformRandomFlows::new(1.0, 1.0, None).is_err());
        assert!(UniformRandomFlows::new(2.0, -2.0, Some(1)).is_err());
        assert!(UniformRandomFlows::new(f64::NEG_INFINITY, 0.0, Some(1)).is_err());
    }

    #[test]
    fn uniform_rejects_range_wider_than_f64() {
        let err = UniformRandomFlows::new(-1e308, 1e308, Some(1)).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidValue { value, .. } if value.is_infinite()));
        assert!(UniformRandomFlows::new(-1e300, 1e300, Some(1)).is_ok());
    }

    #[test]
    fn fixed_flows_fill_missing_with_zero() {
        let mut flows = FixedFlows::new().with("b-c", 2.5);
        assert_eq!(flows.assign(&NAMES).unwrap(), vec![0.0, 2.5, 0.0]);
    }

    #[test]
    fn fixed_flows_reject_unknown_segment() {
        let mut flows: FixedFlows = [("a-b", 1.0), ("x-y", 3.0)].into_iter().collect();
        assert!(matches!(
            flows.assign(&NAMES),
            Err(NetworkError::UnknownPipe(ref name)) if name == "x-y"
        ));
    }

    #[test]
    fn fixed_flows_reject_nan() {
        let mut flows = FixedFlows::new().with("a-b", f64::NAN);
        assert!(flows.assign(&NAMES).is_err());
    }

    #[test]
    fn zero_flows() {
        assert_eq!(ZeroFlows.assign(&NAMES).unwrap(), vec![0.0; 3]);
    }
}
