pub mod config;
pub mod error;
pub mod profile;

pub use config::Config;
pub use error::*;
pub use profile::*;
