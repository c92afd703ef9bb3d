use crate::config::types::ParserConfig;
use crate::error::{PathFault, RedirectsError, Result};
use crate::rules::types::{ParamValue, Params, Rule};
use std::io::{BufRead, BufReader, Read};
use std::iter::Peekable;
use std::slice::Iter;
use tracing::{debug, trace, warn};

/// Where the cursor is within a rule line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
	From,
	Params,
	To,
	Status,
	Options,
}

/// Parser for `_redirects` rule files.
#[derive(Debug, Clone, Default)]
pub struct RuleParser {
	config: ParserConfig,
}

impl RuleParser {
	/// Creates a parser with the given configuration.
	pub fn new(config: ParserConfig) -> Self {
		RuleParser { config }
	}

	/// The configuration this parser applies.
	pub fn config(&self) -> &ParserConfig {
		&self.config
	}

	/// Parse every rule from the given reader.
	///
	/// The first malformed line aborts the whole parse. Bytes that are not
	/// valid UTF-8 are replaced rather than rejected.
	pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<Rule>> {
		let mut reader = BufReader::new(reader);
		let mut buf = Vec::new();
		let mut rules = Vec::new();
		let mut line_no = 0;

		loop {
			buf.clear();
			let read = reader
				.read_until(b'\n', &mut buf)
				.map_err(|source| RedirectsError::ReadError {
					line: line_no + 1,
					source,
				})?;
			if read == 0 {
				break;
			}
			line_no += 1;

			let line = String::from_utf8_lossy(&buf);
			if let Some(rule) = self.parse_line(&line, line_no)? {
				debug!(
					line = line_no,
					from = %rule.from,
					to = %rule.to,
					status = rule.status,
					force = rule.force,
					"parsed rule"
				);
				rules.push(rule);
			}
		}

		debug!(count = rules.len(), "parsed redirects");
		Ok(rules)
	}

	/// Parse the given string.
	pub fn parse_str(&self, input: &str) -> Result<Vec<Rule>> {
		self.parse(input.as_bytes())
	}

	/// Parse a single line. Blank and comment lines yield `None`.
	pub fn parse_line(&self, line: &str, line_no: usize) -> Result<Option<Rule>> {
		let line = line.trim();

		if line.is_empty() || line.starts_with('#') {
			trace!(line = line_no, "skipping blank or comment line");
			return Ok(None);
		}

		let fields: Vec<&str> = line.split_whitespace().collect();
		if fields.len() < 2 {
			return Err(RedirectsError::MissingDestination {
				line: line_no,
				text: line.to_string(),
			});
		}

		let mut tokens = fields.iter().peekable();
		let mut rule = Rule::new(String::new(), String::new());
		let mut params = Params::default();
		let mut phase = Phase::From;

		loop {
			match phase {
				Phase::From => {
					// fields has at least two entries
					let token = next_token(&mut tokens, line_no)?;
					rule.from = self.check_path(token, line_no)?;
					phase = Phase::Params;
				}
				Phase::Params => match tokens.peek() {
					Some(&&token) if token.contains('=') => {
						let (key, value) = parse_param(token);
						params.insert(key.to_string(), value);
						tokens.next();
					}
					_ => phase = Phase::To,
				},
				Phase::To => {
					let token = next_token(&mut tokens, line_no)?;
					rule.to = self.check_path(token, line_no)?;
					phase = Phase::Status;
				}
				Phase::Status => {
					let Some(&&token) = tokens.peek() else {
						break;
					};
					if let Some((status, force)) = parse_status(token) {
						rule.status = status;
						rule.force = force;
						tokens.next();
					} else if !token.contains('=') {
						return Err(unexpected(token, line_no));
					}
					// an option in the status slot keeps the default status
					phase = Phase::Options;
				}
				Phase::Options => {
					let Some(token) = tokens.next() else {
						break;
					};
					self.apply_option(&mut rule, token, line_no)?;
				}
			}
		}

		if !params.is_empty() {
			rule.params = Some(params);
		}

		Ok(Some(rule))
	}

	/// Validate a `from` or `to` token.
	fn check_path(&self, token: &str, line_no: usize) -> Result<String> {
		let fault = if token.parse::<i64>().is_ok() {
			Some(PathFault::Numeric)
		} else if token.contains('=') {
			Some(PathFault::ContainsEquals)
		} else if token.ends_with('!') {
			Some(PathFault::TrailingBang)
		} else if self.config.strict_paths && !has_path_prefix(token) {
			Some(PathFault::BadPrefix)
		} else {
			None
		};

		match fault {
			Some(fault) => Err(RedirectsError::InvalidPath {
				line: line_no,
				token: token.to_string(),
				fault,
			}),
			None => Ok(token.to_string()),
		}
	}

	/// Apply a `Country=..` or `Language=..` token to the rule.
	fn apply_option(&self, rule: &mut Rule, token: &str, line_no: usize) -> Result<()> {
		let Some((key, value)) = token.split_once('=') else {
			return Err(unexpected(token, line_no));
		};
		let values: Vec<String> = value.split(',').map(str::to_string).collect();

		match key {
			"Country" => rule.country = Some(values),
			"Language" => rule.language = Some(values),
			_ if self.config.ignore_unknown_options => {
				warn!(line = line_no, key, "ignoring unknown option");
			}
			_ => {
				return Err(RedirectsError::UnknownOption {
					line: line_no,
					key: key.to_string(),
				});
			}
		}

		Ok(())
	}
}

fn next_token<'a>(tokens: &mut Peekable<Iter<'_, &'a str>>, line_no: usize) -> Result<&'a str> {
	tokens
		.next()
		.copied()
		.ok_or(RedirectsError::MissingTo { line: line_no })
}

fn unexpected(token: &str, line_no: usize) -> RedirectsError {
	RedirectsError::UnexpectedToken {
		line: line_no,
		token: token.to_string(),
	}
}

fn has_path_prefix(token: &str) -> bool {
	["/", "http://", "https://"]
		.iter()
		.any(|prefix| token.starts_with(prefix))
}

/// Split a parameter token on its first `=`; a bare key becomes a `true` flag.
fn parse_param(token: &str) -> (&str, ParamValue) {
	match token.split_once('=') {
		Some((key, value)) => (key, ParamValue::Text(value.to_string())),
		None => (token, ParamValue::Flag(true)),
	}
}

/// Parse `301` or `200!` into the status code and force flag.
fn parse_status(token: &str) -> Option<(i64, bool)> {
	match token.strip_suffix('!') {
		Some(code) => code.parse().ok().map(|status| (status, true)),
		None => token.parse().ok().map(|status| (status, false)),
	}
}

/// Parse the given reader with the default configuration.
pub fn parse<R: Read>(reader: R) -> Result<Vec<Rule>> {
	RuleParser::default().parse(reader)
}

/// Parse the given string with the default configuration.
pub fn parse_str(input: &str) -> Result<Vec<Rule>> {
	RuleParser::default().parse_str(input)
}

/// Unwrap a parse result, panicking on error.
///
/// Intended for rule sets embedded at build time that must be valid.
#[track_caller]
pub fn must(result: Result<Vec<Rule>>) -> Vec<Rule> {
	match result {
		Ok(rules) => rules,
		Err(e) => panic!("invalid redirects: {e}"),
	}
}
