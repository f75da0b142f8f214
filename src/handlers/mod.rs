//! HTTP handlers for the campaign resource.

pub mod campaign;
pub use campaign::*;
