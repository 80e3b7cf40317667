pub mod engine;
pub mod report;
pub mod strategy;
pub mod types;
pub mod utils;

pub use crate::types::*;
