pub mod climate;
pub mod date;

pub use climate::*;
pub use date::*;
