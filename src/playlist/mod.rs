pub mod config;
pub mod filters;
pub mod generator;
pub mod metadata;
pub mod sampler;
pub mod utils;

pub use config::*;
pub use generator::*;
pub use metadata::*;
