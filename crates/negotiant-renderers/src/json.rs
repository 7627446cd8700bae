use std::io;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};

use crate::renderer::{MediaType, RenderError, RenderResult, Renderer, RendererContext};

/// Largest indentation honoured from the `indent` media type parameter
pub const MAX_INDENT: usize = 8;

/// Single-line output with a space after each `,` and `:`
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
	fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		if first {
			Ok(())
		} else {
			writer.write_all(b", ")
		}
	}

	fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		if first {
			Ok(())
		} else {
			writer.write_all(b", ")
		}
	}

	fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		writer.write_all(b": ")
	}
}

/// JSON renderer
///
/// Output is compact unless the negotiated media type carries an `indent`
/// parameter (clamped to `0..=8`) or the render context forces one.
#[derive(Debug, Clone, Copy, Default)]
pub struct JSONRenderer;

impl JSONRenderer {
	/// Creates a new JSON renderer
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_renderers::{JSONRenderer, Renderer};
	///
	/// let renderer = JSONRenderer::new();
	/// assert_eq!(renderer.media_type().to_string(), "application/json");
	/// assert_eq!(renderer.format(), Some("json"));
	/// ```
	pub fn new() -> Self {
		Self
	}

	/// Indentation requested through the media type, if any
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_negotiation::MediaType;
	/// use negotiant_renderers::JSONRenderer;
	///
	/// assert_eq!(JSONRenderer::requested_indent(&MediaType::parse("application/json; indent=4")), Some(4));
	/// assert_eq!(JSONRenderer::requested_indent(&MediaType::parse("application/json; indent=20")), Some(8));
	/// assert_eq!(JSONRenderer::requested_indent(&MediaType::parse("application/json; indent=-1")), Some(0));
	/// assert_eq!(JSONRenderer::requested_indent(&MediaType::parse("application/json; indent=abc")), None);
	/// assert_eq!(JSONRenderer::requested_indent(&MediaType::parse("application/json")), None);
	/// ```
	pub fn requested_indent(media_type: &MediaType) -> Option<usize> {
		let indent = media_type.param("indent")?.trim().parse::<i64>().ok()?;
		Some(indent.clamp(0, MAX_INDENT as i64) as usize)
	}

	/// Serializes a value, compact when `indent` is `None`
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_renderers::JSONRenderer;
	/// use serde_json::json;
	///
	/// let compact = JSONRenderer::to_vec(&json!({"example": "example"}), None).unwrap();
	/// assert_eq!(compact, br#"{"example": "example"}"#);
	///
	/// let indented = JSONRenderer::to_vec(&json!({"example": "example"}), Some(4)).unwrap();
	/// assert_eq!(indented, b"{\n    \"example\": \"example\"\n}");
	/// ```
	pub fn to_vec<T>(value: &T, indent: Option<usize>) -> RenderResult<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let mut buffer = Vec::with_capacity(128);

		let result = match indent {
			None => {
				let mut serializer = Serializer::with_formatter(&mut buffer, SpacedFormatter);
				value.serialize(&mut serializer)
			}
			Some(width) => {
				let spaces = vec![b' '; width];
				let formatter = PrettyFormatter::with_indent(&spaces);
				let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
				value.serialize(&mut serializer)
			}
		};
		result.map_err(|e| RenderError::Serialization(e.to_string()))?;

		Ok(buffer)
	}
}

#[async_trait]
impl Renderer for JSONRenderer {
	fn media_type(&self) -> MediaType {
		MediaType::new("application", "json")
	}

	fn format(&self) -> Option<&str> {
		Some("json")
	}

	async fn render(
		&self,
		data: &Value,
		media_type: &MediaType,
		context: &RendererContext,
	) -> RenderResult<Bytes> {
		let indent = context.indent.or_else(|| Self::requested_indent(media_type));
		Self::to_vec(data, indent).map(Bytes::from)
	}
}
