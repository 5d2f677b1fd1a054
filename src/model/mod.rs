pub mod candidate;
pub mod config;
pub mod token;

pub use candidate::*;
pub use config::*;
pub use token::*;
