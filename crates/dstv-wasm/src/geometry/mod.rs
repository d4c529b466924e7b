//! Face geometry: reference envelopes, cut regions, and contour analysis.

pub mod classify;
pub mod cut;
pub mod reconstruct;
pub mod types;

pub use classify::*;
pub use cut::*;
pub use reconstruct::*;
pub use types::*;
