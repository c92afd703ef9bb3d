//! Configuration loading for the redirects parser.
//!
//! The config file is optional; every key has a default.

pub mod parser;
pub mod types;

pub use parser::{parse_config_file, parse_config_str};
pub use types::ParserConfig;
