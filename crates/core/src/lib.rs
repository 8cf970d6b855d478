pub mod comments;
pub mod config;
pub mod error;
pub mod text;
pub mod types;

pub use config::{Config, load_config, parse_config};
pub use error::{Error, Result};
pub use types::*;
