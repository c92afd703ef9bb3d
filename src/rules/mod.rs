//! Rule model and line parser for `_redirects` files.
//!
//! This module handles:
//! - The `Rule` record and its parameter map
//! - Tokenizing and classifying each rule line

pub mod parser;
pub mod types;

pub use parser::{RuleParser, must, parse, parse_str};
pub use types::{DEFAULT_STATUS, ParamValue, Params, Rule};
