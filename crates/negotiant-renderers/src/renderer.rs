use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use serde_json::Value;

pub use negotiant_exception::Error as RenderError;
pub use negotiant_negotiation::MediaType;

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Route metadata shown by the browsable API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewInfo {
	/// Endpoint identifier of the matched route
	pub endpoint: String,
	/// Handler documentation, if any
	pub description: Option<String>,
	/// Methods the route accepts
	pub allowed_methods: Vec<Method>,
}

impl ViewInfo {
	/// Creates view metadata for an endpoint
	///
	/// # Examples
	///
	/// ```
	/// use http::Method;
	/// use negotiant_renderers::ViewInfo;
	///
	/// let view = ViewInfo::new("user-list")
	///     .with_description("List all users.")
	///     .with_allowed_methods(vec![Method::GET, Method::POST]);
	/// assert_eq!(view.endpoint, "user-list");
	/// assert_eq!(view.allowed_methods.len(), 2);
	/// ```
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
			description: None,
			allowed_methods: Vec::new(),
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn with_allowed_methods(mut self, methods: Vec<Method>) -> Self {
		self.allowed_methods = methods;
		self
	}
}

/// Response and request details handed to a renderer
#[derive(Clone)]
pub struct RendererContext {
	/// Status code of the response being rendered
	pub status: StatusCode,
	/// Headers of the response being rendered
	pub headers: HeaderMap,
	/// Forced indentation, overriding any `indent` media type parameter
	pub indent: Option<usize>,
	/// Renderers active for the request, in registration order
	pub renderers: Vec<Arc<dyn Renderer>>,
	/// Request path including the query string
	pub path: String,
	/// Request method
	pub method: Method,
	/// Metadata of the matched route
	pub view: Option<ViewInfo>,
}

impl Default for RendererContext {
	fn default() -> Self {
		Self {
			status: StatusCode::OK,
			headers: HeaderMap::new(),
			indent: None,
			renderers: Vec::new(),
			path: "/".to_string(),
			method: Method::GET,
			view: None,
		}
	}
}

impl fmt::Debug for RendererContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let renderers: Vec<String> = self
			.renderers
			.iter()
			.map(|renderer| renderer.media_type().to_string())
			.collect();

		f.debug_struct("RendererContext")
			.field("status", &self.status)
			.field("headers", &self.headers)
			.field("indent", &self.indent)
			.field("renderers", &renderers)
			.field("path", &self.path)
			.field("method", &self.method)
			.field("view", &self.view)
			.finish()
	}
}

impl RendererContext {
	/// Creates a context for a `200 OK` response to `GET /`
	///
	/// # Examples
	///
	/// ```
	/// use http::StatusCode;
	/// use negotiant_renderers::RendererContext;
	///
	/// let context = RendererContext::new()
	///     .with_status(StatusCode::CREATED)
	///     .with_indent(Some(2))
	///     .with_path("/users/?page=2");
	/// assert_eq!(context.status, StatusCode::CREATED);
	/// assert_eq!(context.indent, Some(2));
	/// assert_eq!(context.path, "/users/?page=2");
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_status(mut self, status: StatusCode) -> Self {
		self.status = status;
		self
	}

	pub fn with_headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	pub fn with_indent(mut self, indent: Option<usize>) -> Self {
		self.indent = indent;
		self
	}

	pub fn with_renderers(mut self, renderers: Vec<Arc<dyn Renderer>>) -> Self {
		self.renderers = renderers;
		self
	}

	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	pub fn with_method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn with_view(mut self, view: Option<ViewInfo>) -> Self {
		self.view = view;
		self
	}
}

/// Encodes structured data into a response body.
///
/// The negotiator matches the client's Accept header against
/// [`Renderer::media_type`] of every active renderer, in registration order.
#[async_trait]
pub trait Renderer: Send + Sync {
	/// Media type this renderer produces
	fn media_type(&self) -> MediaType;

	/// Short format name, e.g. `json`
	fn format(&self) -> Option<&str> {
		None
	}

	/// Whether an empty-string payload should still be rendered
	fn handles_empty_responses(&self) -> bool {
		false
	}

	/// Render data with the negotiated media type
	async fn render(
		&self,
		data: &Value,
		media_type: &MediaType,
		context: &RendererContext,
	) -> RenderResult<Bytes>;
}

/// Returns true for the empty-string payload handlers return for "no content"
pub fn is_empty_content(data: &Value) -> bool {
	matches!(data, Value::String(s) if s.is_empty())
}
