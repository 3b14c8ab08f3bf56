pub mod config;
pub mod error;
pub mod listing;
pub mod logging;
pub mod validation;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use validation::*;
