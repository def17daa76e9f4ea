//! Rent suggestion engine for property operators.
//!
//! [`workflows::pricing::PricingEngine`] turns an immutable pricing snapshot
//! into ranked suggestions per lease term; [`workflows::comps`] loads market
//! comp surveys; the remaining modules carry configuration, logging and the
//! application error type shared with the HTTP service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
