pub mod caption;
pub mod config;
pub mod enhancer;
pub mod error;
pub mod pipeline;
pub mod server;
pub mod vision;

pub use error::{Error, Result};
