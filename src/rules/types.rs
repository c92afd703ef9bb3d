use serde::Serialize;
use std::collections::HashMap;
use url::Url;

/// Status used when a rule line carries no status token.
pub const DEFAULT_STATUS: i64 = 301;

/// Value of a single rule parameter.
///
/// Serializes as a JSON string for `key=value` and as `true` for a bare key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
	Text(String),
	Flag(bool),
}

impl ParamValue {
	/// The string value, or `None` for a bare-key flag.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			ParamValue::Text(s) => Some(s),
			ParamValue::Flag(_) => None,
		}
	}
}

impl From<&str> for ParamValue {
	fn from(s: &str) -> Self {
		ParamValue::Text(s.to_string())
	}
}

impl From<bool> for ParamValue {
	fn from(b: bool) -> Self {
		ParamValue::Flag(b)
	}
}

/// Key/value annotations placed between `from` and `to`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(HashMap<String, ParamValue>);

impl Params {
	/// Returns true if the param is present.
	pub fn has(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Returns the param value.
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.0.get(key)
	}

	/// Number of params.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub(crate) fn insert(&mut self, key: String, value: ParamValue) {
		self.0.insert(key, value);
	}
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Params(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

/// A single redirection, rewrite or proxy rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rule {
	/// The path which is matched to perform the rule.
	pub from: String,

	/// The destination, which may be relative, or absolute
	/// in order to proxy the request to another URL.
	pub to: String,

	/// One of:
	///
	/// - 3xx a redirect
	/// - 200 a rewrite
	/// - defaults to 301 redirect
	///
	/// When proxying this field is ignored.
	pub status: i64,

	/// Apply the rule even when a response (or static file) is present.
	pub force: bool,

	/// Optional arbitrary key/value pairs.
	pub params: Option<Params>,

	/// ISO 3166-1 alpha-2 country codes the rule is restricted to.
	pub country: Option<Vec<String>>,

	/// ISO 639-1 language codes the rule is restricted to.
	pub language: Option<Vec<String>>,
}

impl Rule {
	/// A plain 301 redirect with no parameters or options.
	pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
		Rule {
			from: from.into(),
			to: to.into(),
			status: DEFAULT_STATUS,
			force: false,
			params: None,
			country: None,
			language: None,
		}
	}

	/// Returns true if the rule represents a rewrite (status 200).
	pub fn is_rewrite(&self) -> bool {
		self.status == 200
	}

	/// Returns true if it's a proxy rule (the destination has a hostname).
	///
	/// Scheme-relative destinations (`//host/path`) count as proxies too.
	pub fn is_proxy(&self) -> bool {
		let parsed = if self.to.starts_with("//") {
			Url::parse(&format!("http:{}", self.to))
		} else {
			Url::parse(&self.to)
		};

		parsed
			.ok()
			.and_then(|u| u.host_str().map(|h| !h.is_empty()))
			.unwrap_or(false)
	}

	/// Returns true if the rule has the param; false when it has no params at all.
	pub fn has_param(&self, key: &str) -> bool {
		self.params.as_ref().is_some_and(|p| p.has(key))
	}

	/// Returns the param value, or `None` when absent.
	pub fn param(&self, key: &str) -> Option<&ParamValue> {
		self.params.as_ref().and_then(|p| p.get(key))
	}
}
