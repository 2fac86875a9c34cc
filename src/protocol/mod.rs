//! Protocol module for the MEATER Cloud wire format.
//!
//! This module contains:
//! - Endpoint URL construction and device scoping
//! - The serde schema of every request and response body
//! - Coercion of numeric fields that may arrive quoted

pub mod endpoints;
pub mod numeric;
pub mod payload;

pub use endpoints::DeviceScope;
pub use numeric::NumericField;
pub use payload::{CookPayload, DevicePayload};
