use async_trait::async_trait;
use bytes::Bytes;

use crate::parser::{
	FormData, MediaType, ParseError, ParseResult, ParsedData, Parser, ParserOptions, decode_utf8,
};

/// Form parser for `application/x-www-form-urlencoded` bodies
///
/// Produces a flat mapping; when a key repeats, the last value wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormParser;

impl FormParser {
	/// Create a new FormParser.
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_parsers::{FormParser, Parser};
	///
	/// let parser = FormParser::new();
	/// assert_eq!(parser.media_type().to_string(), "application/x-www-form-urlencoded");
	/// assert!(parser.handles_form_data());
	/// ```
	pub fn new() -> Self {
		Self
	}

	/// Decodes a URL-encoded string into form fields
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_parsers::FormParser;
	///
	/// let fields = FormParser::decode("name=J%C3%BCrgen&tag=a&tag=b+c").unwrap();
	/// assert_eq!(fields["name"], "Jürgen");
	/// assert_eq!(fields["tag"], "b c");
	/// ```
	pub fn decode(text: &str) -> ParseResult<FormData> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(text)
			.map_err(|e| ParseError::ParseError(format!("Form parse error - {}", e)))?;

		let mut fields = FormData::with_capacity(pairs.len());
		for (key, value) in pairs {
			fields.insert(key, value);
		}
		Ok(fields)
	}
}

#[async_trait]
impl Parser for FormParser {
	fn media_type(&self) -> MediaType {
		MediaType::new("application", "x-www-form-urlencoded")
	}

	fn handles_form_data(&self) -> bool {
		true
	}

	async fn parse(
		&self,
		body: Bytes,
		_media_type: &MediaType,
		_options: &ParserOptions,
	) -> ParseResult<ParsedData> {
		let text = decode_utf8(&body, "Form")?;
		Self::decode(text).map(ParsedData::Form)
	}
}
