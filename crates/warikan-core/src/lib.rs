//! warikan-core — Inclined cost allocation engine.
//!
//! Splits a bill across ranked roles: higher ranks pay a larger share, shares
//! are rounded to whole thousands, and the tilt that best reproduces the
//! total is chosen. Any rounding residue can be settled onto a payer role.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod rounding;
pub mod search;
pub mod settlement;
pub mod weight;

pub use engine::allocate;
pub use error::AllocationError;
pub use model::{AllocationRequest, AllocationResult, Role};
