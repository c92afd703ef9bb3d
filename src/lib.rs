//! Redirects - parser and CLI for Netlify-style `_redirects` files.
//!
//! This library provides the core functionality, including:
//! - Line-oriented parsing of redirect, rewrite and proxy rules
//! - The `Rule` record with rewrite/proxy queries and serde serialization
//! - Optional TOML configuration of parser strictness
//!
//! # Example
//!
//! ```
//! use redirects_cli::rules::parse_str;
//!
//! let rules = parse_str(
//!     "# Single page app\n/app/*  /app/index.html  200!\n/api/*  https://api.example.com/:splat  200\n",
//! )
//! .unwrap();
//!
//! assert_eq!(rules.len(), 2);
//! assert!(rules[0].force);
//! assert!(rules[1].is_proxy());
//! ```

pub mod config;
pub mod error;
pub mod rules;

pub use error::{GRAMMAR, PathFault, RedirectsError, Result};
pub use rules::{ParamValue, Params, Rule, RuleParser, must, parse, parse_str};
