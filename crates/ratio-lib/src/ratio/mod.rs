//! Scaling ratio calculators
//!
//! Two independent, stateless calculators turn per-pod metric values into
//! a dimensionless ratio against a target. A ratio above 1 asks for more
//! replicas, below 1 for fewer, and exactly 1 for no change.
//!
//! All intermediate integer divisions truncate toward zero.

mod range;
mod request;


pub use range::compute_range_ratio;
pub use request::compute_request_ratio;
