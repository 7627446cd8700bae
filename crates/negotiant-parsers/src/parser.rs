use async_trait::async_trait;
use bytes::Bytes;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

pub use negotiant_exception::Error as ParseError;
pub use negotiant_negotiation::MediaType;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Flat form fields, last value wins on duplicate keys
pub type FormData = IndexMap<String, String>;

/// Uploaded files keyed by form field name
pub type Files = IndexMap<String, UploadedFile>;

/// A file received in a `multipart/form-data` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
	/// Client-supplied file name
	pub filename: String,
	/// Content type declared for the part, if any
	pub content_type: Option<String>,
	/// Raw file contents
	#[serde(skip)]
	pub content: Bytes,
}

impl UploadedFile {
	pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
		Self {
			filename: filename.into(),
			content_type: None,
			content: content.into(),
		}
	}

	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	pub fn len(&self) -> usize {
		self.content.len()
	}

	pub fn is_empty(&self) -> bool {
		self.content.is_empty()
	}
}

/// Decoded request body
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedData {
	/// Structured value (JSON, or anything a custom parser produces)
	Json(Value),
	/// URL-encoded form fields
	Form(FormData),
	/// Multipart form fields and uploaded files
	MultiPart { fields: FormData, files: Files },
}

impl ParsedData {
	/// Converts the decoded body into a structured value.
	///
	/// Form fields become a mapping of strings; uploaded files are not part
	/// of the value.
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_parsers::{FormData, ParsedData};
	/// use serde_json::json;
	///
	/// let mut form = FormData::new();
	/// form.insert("example".to_string(), "example".to_string());
	/// assert_eq!(ParsedData::Form(form).to_value(), json!({"example": "example"}));
	/// ```
	pub fn to_value(&self) -> Value {
		match self {
			Self::Json(value) => value.clone(),
			Self::Form(fields) | Self::MultiPart { fields, .. } => form_to_value(fields),
		}
	}
}

/// Converts form fields into a mapping of string values
pub fn form_to_value(fields: &FormData) -> Value {
	Value::Object(
		fields
			.iter()
			.map(|(key, value)| (key.clone(), Value::String(value.clone())))
			.collect::<Map<String, Value>>(),
	)
}

/// Extra information about the request handed to parsers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
	/// Declared `Content-Length` of the request body
	pub content_length: Option<u64>,
}

impl ParserOptions {
	pub fn new(content_length: Option<u64>) -> Self {
		Self { content_length }
	}
}

/// Decodes a request body into structured data.
///
/// Implementations declare the media type they accept; the negotiator picks
/// the first registered parser whose media type is satisfied by the
/// request's Content-Type.
#[async_trait]
pub trait Parser: Send + Sync {
	/// Media type this parser handles
	fn media_type(&self) -> MediaType;

	/// If set, the parser returns [`ParsedData::MultiPart`] and the request's
	/// files are populated.
	fn handles_file_uploads(&self) -> bool {
		false
	}

	/// If set, the request's form is populated from the parsed fields.
	fn handles_form_data(&self) -> bool {
		false
	}

	/// Parse the request body
	async fn parse(
		&self,
		body: Bytes,
		media_type: &MediaType,
		options: &ParserOptions,
	) -> ParseResult<ParsedData>;
}

/// Decodes a body as UTF-8, reporting failures as parse errors
pub(crate) fn decode_utf8<'a>(body: &'a [u8], what: &str) -> ParseResult<&'a str> {
	std::str::from_utf8(body)
		.map_err(|e| ParseError::ParseError(format!("{} parse error - {}", what, e)))
}
