//! `multipart/form-data` parsing backed by multer

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream;
use multer::Multipart;

use crate::parser::{
	Files, FormData, MediaType, ParseError, ParseResult, ParsedData, Parser, ParserOptions,
	UploadedFile,
};

const MIN_BUFFER_SIZE: usize = 1024;

/// Chunk size used when streaming a body of `content_length` bytes into the
/// multipart reader.
///
/// Rounds up to the next multiple of 4, never below 1024.
///
/// # Examples
///
/// ```
/// use negotiant_parsers::multipart::buffer_size;
///
/// assert_eq!(buffer_size(0), 1024);
/// assert_eq!(buffer_size(1023), 1024);
/// assert_eq!(buffer_size(1025), 1028);
/// assert_eq!(buffer_size(4096), 4096);
/// ```
pub fn buffer_size(content_length: u64) -> usize {
	let length = usize::try_from(content_length).unwrap_or(usize::MAX);
	let rounded = length.div_ceil(4).saturating_mul(4);
	rounded.max(MIN_BUFFER_SIZE)
}

/// Multipart parser for `multipart/form-data` bodies
///
/// Parts carrying a filename become uploaded files, every other part becomes
/// a form field.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiPartParser;

impl MultiPartParser {
	/// Create a new MultiPartParser.
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_parsers::{MultiPartParser, Parser};
	///
	/// let parser = MultiPartParser::new();
	/// assert_eq!(parser.media_type().to_string(), "multipart/form-data");
	/// assert!(parser.handles_file_uploads());
	/// assert!(parser.handles_form_data());
	/// ```
	pub fn new() -> Self {
		Self
	}
}

fn parse_error(e: impl std::fmt::Display) -> ParseError {
	ParseError::ParseError(format!("Multipart parse error - {}", e))
}

#[async_trait]
impl Parser for MultiPartParser {
	fn media_type(&self) -> MediaType {
		MediaType::new("multipart", "form-data")
	}

	fn handles_file_uploads(&self) -> bool {
		true
	}

	fn handles_form_data(&self) -> bool {
		true
	}

	async fn parse(
		&self,
		body: Bytes,
		media_type: &MediaType,
		options: &ParserOptions,
	) -> ParseResult<ParsedData> {
		let boundary = media_type
			.param("boundary")
			.filter(|boundary| !boundary.is_empty())
			.ok_or_else(|| {
				ParseError::ParseError(
					"Multipart message missing boundary in Content-Type header".to_string(),
				)
			})?
			.to_string();

		let content_length = options.content_length.ok_or_else(|| {
			ParseError::ParseError("Multipart message missing Content-Length".to_string())
		})?;

		let length = usize::try_from(content_length)
			.unwrap_or(usize::MAX)
			.min(body.len());
		let body = body.slice(..length);

		let chunk_size = buffer_size(content_length);
		let chunks: Vec<Result<Bytes, std::io::Error>> = (0..body.len())
			.step_by(chunk_size)
			.map(|start| Ok(body.slice(start..(start + chunk_size).min(body.len()))))
			.collect();

		let mut multipart = Multipart::new(stream::iter(chunks), boundary);
		let mut fields = FormData::new();
		let mut files = Files::new();

		while let Some(field) = multipart.next_field().await.map_err(parse_error)? {
			let Some(name) = field.name().map(str::to_string) else {
				tracing::debug!("skipping multipart part without a field name");
				continue;
			};

			match field.file_name().map(str::to_string) {
				Some(filename) => {
					let content_type = field.content_type().map(|mime| mime.to_string());
					let content = field.bytes().await.map_err(parse_error)?;
					let mut file = UploadedFile::new(filename, content);
					file.content_type = content_type;
					files.insert(name, file);
				}
				None => {
					let value = field.text().await.map_err(parse_error)?;
					fields.insert(name, value);
				}
			}
		}

		tracing::debug!(
			fields = fields.len(),
			files = files.len(),
			"parsed multipart body"
		);
		Ok(ParsedData::MultiPart { fields, files })
	}
}
