//! Pipe segment with Darcy-Weisbach head loss.

use std::f64::consts::PI;

use pf_core::constants::{G_FTPS2, MU_WATER_LB_FT_S, RHO_WATER_LB_FT3};
use pf_core::numeric::ensure_positive;
use pf_core::units::{Length, in_feet, in_inches};
use serde::Serialize;

use crate::common::{EPSILON_FLOW, check_finite, flow_direction};
use crate::error::{HydraulicsError, HydraulicsResult};
use crate::friction::{FlowRegime, FrictionModel};

/// A pipe segment with nominal, static geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    name: String,
    /// Inner diameter
    pub diameter: Length,
    /// Length
    pub length: Length,
    /// Absolute surface roughness
    pub roughness: Length,
}

/// Hydraulic state of a pipe at one flow rate.
///
/// Signed quantities are positive along the pipe's start→end direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowState {
    /// Volumetric flow (cfs)
    pub flow: f64,
    /// Mean velocity (ft/s)
    pub velocity: f64,
    /// Reynolds number (magnitude)
    pub reynolds: f64,
    pub regime: FlowRegime,
    /// Darcy friction factor; `None` when stagnant
    pub friction_factor: Option<f64>,
    /// Head loss, reported in inches of water
    pub head_loss: f64,
}

impl Pipe {
    /// Create a pipe, rejecting non-positive diameter/length and negative roughness.
    pub fn new(
        name: impl Into<String>,
        diameter: Length,
        length: Length,
        roughness: Length,
    ) -> HydraulicsResult<Self> {
        ensure_positive(diameter.value, "pipe diameter")?;
        ensure_positive(length.value, "pipe length")?;
        check_finite(roughness.value, "pipe roughness")?;
        if roughness.value < 0.0 {
            return Err(HydraulicsError::InvalidArg {
                what: "pipe roughness must be non-negative",
            });
        }

        Ok(Self {
            name: name.into(),
            diameter,
            length,
            roughness,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn diameter_in(&self) -> f64 {
        in_inches(self.diameter)
    }

    pub fn length_in(&self) -> f64 {
        in_inches(self.length)
    }

    pub fn roughness_ft(&self) -> f64 {
        in_feet(self.roughness)
    }

    /// Flow area (ft²).
    pub fn area_ft2(&self) -> f64 {
        let r = in_feet(self.diameter) / 2.0;
        PI * r * r
    }

    /// ε/D, both in feet.
    pub fn relative_roughness(&self) -> f64 {
        self.roughness_ft() / in_feet(self.diameter)
    }

    /// Mean velocity (ft/s) for flow `q` (cfs).
    pub fn velocity(&self, q: f64) -> f64 {
        q / self.area_ft2()
    }

    /// Reynolds number magnitude, v·D/μ with the water viscosity constant.
    pub fn reynolds(&self, q: f64) -> f64 {
        self.velocity(q).abs() * in_feet(self.diameter) / MU_WATER_LB_FT_S
    }

    /// Full hydraulic state at flow `q` (cfs).
    pub fn flow_state(&self, q: f64, friction: &FrictionModel) -> HydraulicsResult<FlowState> {
        check_finite(q, "flow rate")?;

        if q.abs() < EPSILON_FLOW {
            return Ok(FlowState {
                flow: q,
                velocity: 0.0,
                reynolds: 0.0,
                regime: FlowRegime::Stagnant,
                friction_factor: None,
                head_loss: 0.0,
            });
        }

        let velocity = check_finite(self.velocity(q), "velocity")?;
        let reynolds = check_finite(self.reynolds(q), "Reynolds number")?;
        let regime = FlowRegime::classify(reynolds);
        let f = friction.friction_factor(reynolds, self.relative_roughness())?;

        // h = f · (L/D) · ρ v² / (2 g)
        let d_ft = in_feet(self.diameter);
        let l_ft = in_feet(self.length);
        let magnitude = f * (l_ft / d_ft) * (RHO_WATER_LB_FT3 * velocity * velocity) / (2.0 * G_FTPS2);
        let head_loss = check_finite(flow_direction(q) * magnitude, "head loss")?;

        Ok(FlowState {
            flow: q,
            velocity,
            reynolds,
            regime,
            friction_factor: Some(f),
            head_loss,
        })
    }

    /// Signed head loss at flow `q` (cfs).
    pub fn head_loss(&self, q: f64, friction: &FrictionModel) -> HydraulicsResult<f64> {
        Ok(self.flow_state(q, friction)?.head_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::{ft, inch};

    fn ab() -> Pipe {
        Pipe::new("a-b", inch(18.0), inch(1000.0), ft(0.00085)).unwrap()
    }

    #[test]
    fn geometry_in_feet() {
        let pipe = ab();
        assert!((pipe.area_ft2() - PI * 0.75 * 0.75).abs() < 1e-12);
        assert!((pipe.diameter_in() - 18.0).abs() < 1e-9);
        assert!((pipe.length_in() - 1000.0).abs() < 1e-9);
        assert!((pipe.relative_roughness() - 0.00085 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn turbulent_head_loss_matches_hand_calc() {
        let pipe = ab();
        let q = 3.0;
        let v = q / (PI * 0.75 * 0.75);
        let expected = 0.02 * (1000.0 / 12.0) / 1.5 * (62.3 * v * v) / (2.0 * 32.2);

        let state = pipe.flow_state(q, &FrictionModel::default()).unwrap();
        assert_eq!(state.regime, FlowRegime::Turbulent);
        assert_eq!(state.friction_factor, Some(0.02));
        assert!((state.head_loss - expected).abs() < 1e-9);
        assert!((state.reynolds - v * 1.5 / 20.50e-6).abs() < 1e-6);
    }

    #[test]
    fn laminar_at_tiny_flow() {
        let pipe = ab();
        let state = pipe.flow_state(1e-3, &FrictionModel::default()).unwrap();
        assert_eq!(state.regime, FlowRegime::Laminar);
        let f = state.friction_factor.unwrap();
        assert!((f - 64.0 / state.reynolds).abs() < 1e-12);
    }

    #[test]
    fn zero_flow_is_stagnant() {
        let state = ab().flow_state(0.0, &FrictionModel::default()).unwrap();
        assert_eq!(state.regime, FlowRegime::Stagnant);
        assert_eq!(state.friction_factor, None);
        assert_eq!(state.head_loss, 0.0);
    }

    #[test]
    fn reverse_flow_reverses_head_loss() {
        let pipe = ab();
        let model = FrictionModel::default();
        let fwd = pipe.head_loss(2.0, &model).unwrap();
        let rev = pipe.head_loss(-2.0, &model).unwrap();
        assert!(fwd > 0.0);
        assert_eq!(fwd, -rev);
    }

    #[test]
    fn rejects_bad_geometry() {
        assert!(Pipe::new("x", inch(0.0), inch(10.0), ft(0.0)).is_err());
        assert!(Pipe::new("x", inch(12.0), inch(-1.0), ft(0.0)).is_err());
        assert!(Pipe::new("x", inch(12.0), inch(10.0), ft(-1e-4)).is_err());
        assert!(Pipe::new("x", inch(f64::NAN), inch(10.0), ft(0.0)).is_err());
    }

    #[test]
    fn rejects_non_finite_flow() {
        assert!(ab().flow_state(f64::NAN, &FrictionModel::default()).is_err());
    }
}
