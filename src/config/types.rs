use serde::{Deserialize, Serialize};

/// Parser settings from an optional `redirects.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserConfig {
	/// Reject `from`/`to` tokens that don't start with `/`, `http://` or `https://`.
	pub strict_paths: bool,

	/// Skip `Key=value` options other than `Country` and `Language` instead of failing.
	pub ignore_unknown_options: bool,
}

impl Default for ParserConfig {
	fn default() -> Self {
		ParserConfig {
			strict_paths: true,
			ignore_unknown_options: false,
		}
	}
}
