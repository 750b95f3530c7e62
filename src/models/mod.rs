//! Data models for the FactFusion client core.
//!
//! These models match the detection service wire format and the persisted
//! session layout exactly.

mod analysis;
mod route;
mod session;

pub use analysis::*;
pub use route::*;
pub use session::*;
