//! Byte-destination implementations

pub mod rotating;

pub use rotating::RollingWriter;
