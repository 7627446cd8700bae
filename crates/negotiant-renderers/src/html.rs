use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::renderer::{MediaType, RenderError, RenderResult, Renderer, RendererContext};

/// HTML renderer
///
/// Passes through pre-rendered markup. The payload must be a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct HTMLRenderer;

impl HTMLRenderer {
	/// Creates a new HTML renderer
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_renderers::{HTMLRenderer, Renderer};
	///
	/// let renderer = HTMLRenderer::new();
	/// assert_eq!(renderer.media_type().to_string(), "text/html");
	/// assert!(renderer.handles_empty_responses());
	/// ```
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl Renderer for HTMLRenderer {
	fn media_type(&self) -> MediaType {
		MediaType::new("text", "html")
	}

	fn format(&self) -> Option<&str> {
		Some("html")
	}

	fn handles_empty_responses(&self) -> bool {
		true
	}

	async fn render(
		&self,
		data: &Value,
		_media_type: &MediaType,
		_context: &RendererContext,
	) -> RenderResult<Bytes> {
		match data {
			Value::String(markup) => Ok(Bytes::from(markup.clone())),
			other => Err(RenderError::Serialization(format!(
				"HTMLRenderer expects pre-rendered markup, got {}",
				value_kind(other)
			))),
		}
	}
}

fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "a list",
		Value::Object(_) => "a mapping",
	}
}
