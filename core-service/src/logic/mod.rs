//! Logic Module - alignment, inference and artifact loading

pub mod artifacts;
pub mod features;
pub mod model;
