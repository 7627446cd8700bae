use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::parser::{
	MediaType, ParseError, ParseResult, ParsedData, Parser, ParserOptions, decode_utf8,
};

/// JSON parser for the `application/json` content type
#[derive(Debug, Clone, Copy, Default)]
pub struct JSONParser;

impl JSONParser {
	/// Create a new JSONParser.
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_parsers::{JSONParser, Parser};
	///
	/// let parser = JSONParser::new();
	/// assert_eq!(parser.media_type().to_string(), "application/json");
	/// assert!(!parser.handles_form_data());
	/// ```
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl Parser for JSONParser {
	fn media_type(&self) -> MediaType {
		MediaType::new("application", "json")
	}

	async fn parse(
		&self,
		body: Bytes,
		_media_type: &MediaType,
		_options: &ParserOptions,
	) -> ParseResult<ParsedData> {
		let text = decode_utf8(&body, "JSON")?;

		serde_json::from_str::<Value>(text)
			.map(ParsedData::Json)
			.map_err(|e| ParseError::ParseError(format!("JSON parse error - {}", e)))
	}
}
