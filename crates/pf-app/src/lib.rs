//! Application service layer for pipeflow.
//!
//! Runs the three worked cases (scalar IVP against its closed form, the
//! series RLC circuit, and the static pipe network), loads their
//! configuration and exports results, so the CLI stays a thin wrapper.

pub mod config;
pub mod error;
pub mod export;
pub mod ivp;
pub mod network;
pub mod rlc;

pub use config::{AppConfig, IvpCaseConfig, NetworkCaseConfig, RlcCaseConfig, load_config};
pub use error::{AppError, AppResult};
pub use export::{ivp_csv, rlc_csv, write_ivp_csv, write_rlc_csv};
pub use ivp::{IvpComparison, IvpRow, ScalarIvp, run_ivp_case};
pub use network::{FlowSource, load_layout, run_network_case};
pub use rlc::{RlcCircuit, RlcSeries, RlcSummary, run_rlc_case};
