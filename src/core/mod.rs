pub mod constants;
pub mod noise;

pub use constants::*;
pub use noise::*;
