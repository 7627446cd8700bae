//! Browsable API renderer

use std::fmt::Write as _;

use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderValue;
use http::header::{ALLOW, CONTENT_TYPE};
use serde_json::Value;

use crate::renderer::{
	MediaType, RenderError, RenderResult, Renderer, RendererContext, is_empty_content,
};
use crate::utils::{convert_to_title, dedent, escape_html, urlize_quoted_links};

/// Indentation used for the embedded response
const BROWSABLE_INDENT: usize = 4;

const DEFAULT_TITLE: &str = "Browsable API";

/// Human-readable HTML view of an API response
///
/// Renders the data with the first other active renderer, as a client
/// accepting `*/*` would have received it, and wraps it in a page showing
/// the request, the response status and headers, and the view's
/// documentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowsableAPIRenderer;

impl BrowsableAPIRenderer {
	/// Creates a new browsable API renderer
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_renderers::{BrowsableAPIRenderer, Renderer};
	///
	/// let renderer = BrowsableAPIRenderer::new();
	/// assert_eq!(renderer.media_type().to_string(), "text/html");
	/// assert_eq!(renderer.format(), Some("api"));
	/// ```
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl Renderer for BrowsableAPIRenderer {
	fn media_type(&self) -> MediaType {
		MediaType::new("text", "html")
	}

	fn format(&self) -> Option<&str> {
		Some("api")
	}

	fn handles_empty_responses(&self) -> bool {
		true
	}

	async fn render(
		&self,
		data: &Value,
		_media_type: &MediaType,
		context: &RendererContext,
	) -> RenderResult<Bytes> {
		let mock_renderer = context
			.renderers
			.iter()
			.find(|renderer| renderer.format() != Some("api"))
			.unwrap_or_else(|| panic!("BrowsableAPIRenderer cannot be the only renderer"));
		let mock_media_type = mock_renderer.media_type();

		let mock_content = if is_empty_content(data) && !mock_renderer.handles_empty_responses() {
			None
		} else {
			let mock_context = context.clone().with_indent(Some(BROWSABLE_INDENT));
			let rendered = mock_renderer
				.render(data, &mock_media_type, &mock_context)
				.await?;
			Some(String::from_utf8_lossy(&rendered).into_owned())
		};

		let mut headers = context.headers.clone();
		let content_type = HeaderValue::from_str(&mock_media_type.to_string())
			.map_err(|e| RenderError::Serialization(e.to_string()))?;
		headers.insert(CONTENT_TYPE, content_type);

		let page = BrowsablePage {
			title: context
				.view
				.as_ref()
				.map(|view| convert_to_title(&view.endpoint).trim().to_string())
				.filter(|title| !title.is_empty())
				.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
			description: context
				.view
				.as_ref()
				.and_then(|view| view.description.as_deref())
				.map(dedent)
				.filter(|description| !description.is_empty()),
			allowed_methods: context
				.view
				.as_ref()
				.map(|view| {
					view.allowed_methods
						.iter()
						.map(|method| method.as_str())
						.collect::<Vec<_>>()
						.join(", ")
				})
				.unwrap_or_default(),
			context,
			headers: &headers,
			content: mock_content.as_deref(),
		};

		tracing::trace!(
			renderer = %mock_media_type,
			path = %context.path,
			"rendering browsable API page"
		);
		Ok(Bytes::from(page.to_html()))
	}
}

struct BrowsablePage<'a> {
	title: String,
	description: Option<String>,
	allowed_methods: String,
	context: &'a RendererContext,
	headers: &'a http::HeaderMap,
	content: Option<&'a str>,
}

impl BrowsablePage<'_> {
	fn to_html(&self) -> String {
		let title = escape_html(&self.title);
		let description = self
			.description
			.as_deref()
			.map(render_description)
			.unwrap_or_default();

		let status = self.context.status;
		let mut response = format!(
			"<b>HTTP {} {}</b>\n",
			status.as_str(),
			escape_html(status.canonical_reason().unwrap_or(""))
		);
		if !self.allowed_methods.is_empty() && !self.headers.contains_key(ALLOW) {
			let _ = writeln!(
				response,
				"<b>Allow:</b> <span class=\"lit\">{}</span>",
				escape_html(&self.allowed_methods)
			);
		}
		for (name, value) in self.headers {
			let _ = writeln!(
				response,
				"<b>{}:</b> <span class=\"lit\">{}</span>",
				escape_html(&title_case_header(name.as_str())),
				escape_html(&String::from_utf8_lossy(value.as_bytes()))
			);
		}
		if let Some(content) = self.content {
			response.push('\n');
			response.push_str(&urlize_quoted_links(&escape_html(content)));
		}

		format!(
			r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="robots" content="NONE,NOARCHIVE" />
    <title>{title}</title>
    <style>
      body {{ font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 0; color: #333; }}
      .navbar {{ background: #2c3e50; color: #fff; padding: 12px 24px; font-weight: bold; }}
      .container {{ max-width: 960px; margin: 0 auto; padding: 24px; }}
      .page-header h1 {{ margin: 0 0 12px 0; }}
      .description {{ margin-bottom: 16px; }}
      pre {{ background: #f7f7f9; border: 1px solid #e1e1e8; border-radius: 4px; padding: 12px; white-space: pre-wrap; word-wrap: break-word; }}
      .request-info pre {{ background: #fff; }}
      .lit {{ color: #195f91; }}
    </style>
  </head>
  <body>
    <div class="navbar">negotiant</div>
    <div class="container">
      <div class="content-main">
        <div class="page-header"><h1>{title}</h1></div>
        <div class="description">{description}</div>
        <div class="request-info"><pre><b>{method}</b> {path}</pre></div>
        <div class="response-info"><pre>{response}</pre></div>
      </div>
    </div>
  </body>
</html>
"#,
			title = title,
			description = description,
			method = escape_html(self.context.method.as_str()),
			path = escape_html(&self.context.path),
			response = response,
		)
	}
}

#[cfg(feature = "markdown")]
fn render_description(description: &str) -> String {
	let parser = pulldown_cmark::Parser::new(description);
	let mut html = String::with_capacity(description.len() * 2);
	pulldown_cmark::html::push_html(&mut html, parser);
	html
}

#[cfg(not(feature = "markdown"))]
fn render_description(description: &str) -> String {
	format!("<pre>{}</pre>", escape_html(description))
}

/// `content-type` -> `Content-Type`
fn title_case_header(name: &str) -> String {
	name.split('-')
		.map(|part| {
			let mut chars = part.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join("-")
}
