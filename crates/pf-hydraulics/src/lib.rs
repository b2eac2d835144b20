//! pf-hydraulics: single-pipe hydraulics for water networks.
//!
//! Provides:
//! - `Pipe` with nominal geometry (diameter, length, roughness)
//! - Reynolds number and flow regime classification
//! - Friction factor models: fixed turbulent value or Colebrook-White
//! - Darcy-Weisbach head loss
//!
//! All formulas work in US customary units (ft, s, lb) with the water
//! constants from `pf_core::constants`.
//!
//! # Example
//!
//! ```
//! use pf_core::units::{ft, inch};
//! use pf_hydraulics::{FrictionModel, Pipe};
//!
//! let pipe = Pipe::new("a-b", inch(18.0), inch(1000.0), ft(0.00085)).unwrap();
//! let state = pipe.flow_state(2.0, &FrictionModel::default()).unwrap();
//! assert!(state.head_loss > 0.0);
//! ```

pub mod common;
pub mod error;
pub mod friction;
pub mod pipe;

pub use error::{HydraulicsError, HydraulicsResult};
pub use friction::{FlowRegime, FrictionModel, LAMINAR_REYNOLDS_LIMIT};
pub use pipe::{FlowState, Pipe};
