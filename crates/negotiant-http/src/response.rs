use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use negotiant_exception::{Error, Result};
use negotiant_renderers::{JSONRenderer, is_empty_content};
use serde::Serialize;
use serde_json::{Value, json};

use crate::request::Request;

/// Rendered API response
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use http::StatusCode;
	/// use negotiant_http::Response;
	///
	/// let response = Response::new(StatusCode::ACCEPTED);
	/// assert_eq!(response.status, StatusCode::ACCEPTED);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	/// Renders content for a `200 OK` response with the renderer negotiated
	/// for the request.
	///
	/// # Examples
	///
	/// ```
	/// use http::header::{ACCEPT, CONTENT_TYPE};
	/// use negotiant_http::{Request, Response};
	/// use serde_json::json;
	///
	/// # #[tokio::main]
	/// # async fn main() {
	/// let mut request = Request::builder()
	///     .header(ACCEPT, "application/json")
	///     .build()
	///     .unwrap();
	/// let response = Response::from_content(&mut request, &json!({"example": "example"}))
	///     .await
	///     .unwrap();
	///
	/// assert_eq!(&response.body[..], br#"{"example": "example"}"#);
	/// assert_eq!(response.headers[CONTENT_TYPE], "application/json");
	/// # }
	/// ```
	pub async fn from_content<T>(request: &mut Request, content: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		Self::from_content_with(request, content, StatusCode::OK, HeaderMap::new()).await
	}

	/// Renders content with an explicit status and extra headers.
	///
	/// An empty string is left unrendered, without a Content-Type, unless
	/// the negotiated renderer handles empty responses. When a body is
	/// rendered for a `204 No Content` status, the status becomes `200 OK`.
	pub async fn from_content_with<T>(
		request: &mut Request,
		content: &T,
		status: StatusCode,
		headers: HeaderMap,
	) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		let data =
			serde_json::to_value(content).map_err(|e| Error::Serialization(e.to_string()))?;
		Self::render(request, data, status, headers).await
	}

	async fn render(
		request: &mut Request,
		data: Value,
		status: StatusCode,
		headers: HeaderMap,
	) -> Result<Self> {
		let (renderer, media_type) = request.negotiate()?;
		let mut response = Self {
			status,
			headers,
			body: Bytes::new(),
		};

		if is_empty_content(&data) && !renderer.handles_empty_responses() {
			tracing::trace!(renderer = %renderer.media_type(), "leaving empty response unrendered");
			return Ok(response);
		}

		let context = request.renderer_context(response.status, response.headers.clone());
		response.body = renderer.render(&data, &media_type, &context).await?;

		let content_type = HeaderValue::from_str(&media_type.to_string())
			.map_err(|e| Error::Serialization(e.to_string()))?;
		response.headers.insert(CONTENT_TYPE, content_type);

		if response.status == StatusCode::NO_CONTENT {
			response.status = StatusCode::OK;
		}

		tracing::debug!(
			status = response.status.as_u16(),
			media_type = %media_type,
			"rendered response"
		);
		Ok(response)
	}

	/// Translates an error into a `{"message": detail}` response.
	///
	/// Uses the negotiated renderer; when negotiation or rendering fails the
	/// message is rendered as JSON.
	///
	/// # Examples
	///
	/// ```
	/// use http::StatusCode;
	/// use negotiant_exception::Error;
	/// use negotiant_http::{Request, Response};
	///
	/// # #[tokio::main]
	/// # async fn main() {
	/// let mut request = Request::builder().header("accept", "image/png").build().unwrap();
	/// let response = Response::from_error(&mut request, &Error::not_found()).await;
	///
	/// assert_eq!(response.status, StatusCode::NOT_FOUND);
	/// assert_eq!(&response.body[..], br#"{"message": "This resource does not exist."}"#);
	/// # }
	/// ```
	pub async fn from_error(request: &mut Request, error: &Error) -> Self {
		let status = error.status_code();
		let content = json!({ "message": error.detail() });

		match Self::render(request, content.clone(), status, HeaderMap::new()).await {
			Ok(response) => response,
			Err(render_error) => {
				tracing::debug!(
					error = %render_error,
					"rendering error response as JSON"
				);
				let body = JSONRenderer::to_vec(&content, None).unwrap_or_default();
				Self::new(status)
					.with_body(body)
					.with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
			}
		}
	}

	/// Converts into an `http::Response`
	pub fn into_http(self) -> http::Response<Bytes> {
		let mut response = http::Response::new(self.body);
		*response.status_mut() = self.status;
		*response.headers_mut() = self.headers;
		response
	}
}

impl From<Response> for http::Response<Bytes> {
	fn from(response: Response) -> Self {
		response.into_http()
	}
}
