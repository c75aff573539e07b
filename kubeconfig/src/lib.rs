pub mod clean;
pub mod direct;

pub use clean::*;
