//! Individual CLI command implementations

pub mod close;
pub mod positions;
pub mod version;
