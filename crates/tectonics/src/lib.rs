pub mod assign;
pub mod boundaries;
pub mod config;
pub mod constants;
pub mod coverage;
pub mod distance;
pub mod error;
pub mod fields;
pub mod generator;
pub mod grid;
pub mod plate;
pub mod prelude;
pub mod rng;
pub mod seed;
pub mod sites;

pub use error::{ConfigError, GenerationError};
pub use generator::{PlateGeneration, generate};
