//! Domain models for the Crop Management Portal

mod crop;

pub use crop::*;
