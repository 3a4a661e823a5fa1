pub mod common;
pub mod filter;
pub mod movie;

pub use filter::*;
pub use movie::*;
