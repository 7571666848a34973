pub mod constants;
pub mod errors;
pub mod label;

pub use constants::*;
pub use errors::*;
pub use label::*;
