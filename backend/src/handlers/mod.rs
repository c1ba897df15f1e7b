//! HTTP handlers for the Crop Management Portal

pub mod crops;
pub mod health;

pub use crops::*;
pub use health::*;
