//! pf-core: shared foundation for pipeflow.
//!
//! Contains:
//! - units (uom SI types + US customary constructors, water constants)
//! - numeric (tolerances + float checks)
//! - ids (compact IDs for graph objects)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
