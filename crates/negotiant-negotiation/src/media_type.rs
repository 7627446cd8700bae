//! Media type parsing and matching

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Reserved quality parameter, ignored by matching, equality and precedence.
pub const QUALITY_PARAM: &str = "q";

/// Specificity of a media type, used to order negotiation candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Precedence {
	/// `*/*`
	Any = 0,
	/// `type/*`
	MainType = 1,
	/// `type/subtype`, optionally with a `q` parameter
	FullType = 2,
	/// `type/subtype; param=val`
	Parameterized = 3,
}

impl From<Precedence> for u8 {
	fn from(precedence: Precedence) -> Self {
		precedence as u8
	}
}

/// A single media type expression such as `application/json; indent=4`.
///
/// Parameters are kept sorted by key so the string form is canonical.
/// Equality and hashing ignore the `q` parameter.
#[derive(Debug, Clone, Eq)]
pub struct MediaType {
	pub main_type: String,
	pub sub_type: String,
	pub params: BTreeMap<String, String>,
}

impl MediaType {
	/// Creates a media type without parameters
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_negotiation::MediaType;
	///
	/// let media_type = MediaType::new("application", "json");
	/// assert_eq!(media_type.full_type(), "application/json");
	/// assert!(media_type.params.is_empty());
	/// ```
	pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
		Self {
			main_type: main_type.into(),
			sub_type: sub_type.into(),
			params: BTreeMap::new(),
		}
	}

	/// Adds a parameter
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_negotiation::MediaType;
	///
	/// let media_type = MediaType::new("application", "json").with_param("indent", "4");
	/// assert_eq!(media_type.to_string(), r#"application/json; indent="4""#);
	/// ```
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(key.into(), value.into());
		self
	}

	/// Parses a media type string.
	///
	/// Parsing never fails: whatever is found before the first `;` is the
	/// type, the remainder is a `,` separated list of `key=value` pairs.
	/// One layer of double quotes is stripped from values and tokens with an
	/// empty key are ignored.
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_negotiation::MediaType;
	///
	/// let media_type = MediaType::parse("application/xml; schema=foobar, q=0.5");
	/// assert_eq!(media_type.main_type, "application");
	/// assert_eq!(media_type.sub_type, "xml");
	/// assert_eq!(media_type.param("schema"), Some("foobar"));
	/// assert_eq!(media_type.param("q"), Some("0.5"));
	/// assert_eq!(media_type.to_string(), r#"application/xml; q="0.5", schema="foobar""#);
	/// ```
	pub fn parse(media_type: &str) -> Self {
		let (full_type, param_string) = media_type.split_once(';').unwrap_or((media_type, ""));

		let mut params = BTreeMap::new();
		for token in param_string.trim().split(',') {
			let (key, value) = token.split_once('=').unwrap_or((token, ""));
			let key = key.trim();
			if key.is_empty() {
				continue;
			}
			params.insert(key.to_string(), unquote(value.trim()).to_string());
		}

		let (main_type, sub_type) = full_type.split_once('/').unwrap_or((full_type, ""));

		Self {
			main_type: main_type.trim().to_string(),
			sub_type: sub_type.trim().to_string(),
			params,
		}
	}

	/// `main_type/sub_type` without parameters
	pub fn full_type(&self) -> String {
		format!("{}/{}", self.main_type, self.sub_type)
	}

	/// Looks up a parameter value
	pub fn param(&self, key: &str) -> Option<&str> {
		self.params.get(key).map(String::as_str)
	}

	/// Specificity of this media type
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_negotiation::{MediaType, Precedence};
	///
	/// assert_eq!(MediaType::parse("*/*").precedence(), Precedence::Any);
	/// assert_eq!(MediaType::parse("text/*").precedence(), Precedence::MainType);
	/// assert_eq!(MediaType::parse("text/html; q=0.5").precedence(), Precedence::FullType);
	/// assert_eq!(MediaType::parse("text/html; level=1").precedence(), Precedence::Parameterized);
	/// ```
	pub fn precedence(&self) -> Precedence {
		if self.main_type == "*" {
			Precedence::Any
		} else if self.sub_type == "*" {
			Precedence::MainType
		} else if self.identity_params().next().is_none() {
			Precedence::FullType
		} else {
			Precedence::Parameterized
		}
	}

	/// Returns `true` if this media type is a superset of `other`.
	///
	/// ```text
	/// 'application/json; version=1.0' >= 'application/json; version=1.0'
	/// 'application/json'              >= 'application/json; indent=4'
	/// 'text/*'                        >= 'text/plain'
	/// '*/*'                           >= 'text/plain'
	/// ```
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_negotiation::MediaType;
	///
	/// let json = MediaType::parse("application/json");
	/// let versioned = MediaType::parse("application/json; version=1.0");
	/// assert!(json.satisfies(&versioned));
	/// assert!(!versioned.satisfies(&json));
	/// ```
	pub fn satisfies(&self, other: &MediaType) -> bool {
		for (key, value) in self.identity_params() {
			if other.params.get(key) != Some(value) {
				return false;
			}
		}

		self.types_match(other)
	}

	/// Returns `true` if an Accept entry and a renderer's media type can be
	/// served together.
	///
	/// Main and sub types must match, with `*` on either side matching
	/// anything. Parameters declared by both sides must agree; a parameter
	/// only one side declares, such as a client's `indent`, is passed
	/// through.
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_negotiation::MediaType;
	///
	/// let renderer = MediaType::parse("application/json");
	/// assert!(MediaType::parse("application/json; indent=4").is_compatible_with(&renderer));
	///
	/// let v2 = MediaType::parse("application/json; version=2.0");
	/// assert!(!MediaType::parse("application/json; version=1.0").is_compatible_with(&v2));
	/// assert!(MediaType::parse("application/json").is_compatible_with(&v2));
	/// ```
	pub fn is_compatible_with(&self, other: &MediaType) -> bool {
		let shared_agree = self.identity_params().all(|(key, value)| {
			other
				.params
				.get(key)
				.is_none_or(|other_value| other_value == value)
		});

		shared_agree && self.types_match(other)
	}

	fn types_match(&self, other: &MediaType) -> bool {
		if self.sub_type != "*" && other.sub_type != "*" && other.sub_type != self.sub_type {
			return false;
		}

		self.main_type == "*" || other.main_type == "*" || other.main_type == self.main_type
	}

	/// Parameters other than `q`
	fn identity_params(&self) -> impl Iterator<Item = (&String, &String)> {
		self.params.iter().filter(|(key, _)| key.as_str() != QUALITY_PARAM)
	}
}

fn unquote(value: &str) -> &str {
	if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
		&value[1..value.len() - 1]
	} else {
		value
	}
}

impl PartialEq for MediaType {
	fn eq(&self, other: &Self) -> bool {
		self.main_type == other.main_type
			&& self.sub_type == other.sub_type
			&& self.identity_params().eq(other.identity_params())
	}
}

impl Hash for MediaType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.main_type.hash(state);
		self.sub_type.hash(state);
		for (key, value) in self.identity_params() {
			key.hash(state);
			value.hash(state);
		}
	}
}

impl fmt::Display for MediaType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.main_type, self.sub_type)?;
		for (index, (key, value)) in self.params.iter().enumerate() {
			let separator = if index == 0 { "; " } else { ", " };
			write!(f, "{}{}=\"{}\"", separator, key, value)?;
		}
		Ok(())
	}
}

impl FromStr for MediaType {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::parse(s))
	}
}

impl From<&str> for MediaType {
	fn from(s: &str) -> Self {
		Self::parse(s)
	}
}
