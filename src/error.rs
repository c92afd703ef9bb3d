use std::path::PathBuf;

/// Grammar every rule line must follow, quoted in parse errors.
pub const GRAMMAR: &str =
	"`from [a=:save1 b=value] to [code][!] [Country=x,y,z] [Language=x,y,z]`";

/// Why a `from` or `to` token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFault {
	Numeric,
	ContainsEquals,
	TrailingBang,
	BadPrefix,
}

impl std::fmt::Display for PathFault {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let msg = match self {
			PathFault::Numeric => "numbers not allowed",
			PathFault::ContainsEquals => "`=` not allowed",
			PathFault::TrailingBang => "`!` not allowed",
			PathFault::BadPrefix => "path must start with `/`, `http://`, or `https://`",
		};
		f.write_str(msg)
	}
}

/// Library-level structured errors for redirects parsing.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RedirectsError {
	#[error("line {line}: missing destination path: {text:?}")]
	MissingDestination { line: usize, text: String },

	#[error("line {line}: missing `to` field, was expecting format {expected}", expected = GRAMMAR)]
	MissingTo { line: usize },

	#[error("line {line}: {fault}. Got: {token}, was expecting format {expected}", expected = GRAMMAR)]
	InvalidPath {
		line: usize,
		token: String,
		fault: PathFault,
	},

	#[error("line {line}: got: {token}, was expecting format {expected}", expected = GRAMMAR)]
	UnexpectedToken { line: usize, token: String },

	#[error("line {line}: unknown option `{key}`, expected `Country` or `Language`")]
	UnknownOption { line: usize, key: String },

	#[error("Failed to read redirects input at line {line}")]
	ReadError {
		line: usize,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to open redirects file: {path}")]
	InputReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
}

impl RedirectsError {
	/// The 1-based input line the error refers to, if any.
	pub fn line(&self) -> Option<usize> {
		match self {
			RedirectsError::MissingDestination { line, .. }
			| RedirectsError::MissingTo { line }
			| RedirectsError::InvalidPath { line, .. }
			| RedirectsError::UnexpectedToken { line, .. }
			| RedirectsError::UnknownOption { line, .. }
			| RedirectsError::ReadError { line, .. } => Some(*line),
			_ => None,
		}
	}
}

/// Result type alias using RedirectsError.
pub type Result<T> = std::result::Result<T, RedirectsError>;
