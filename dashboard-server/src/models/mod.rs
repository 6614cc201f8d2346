//! Data models

pub mod chart;
pub mod content;
pub mod prediction;

pub use chart::*;
pub use content::*;
pub use prediction::*;
