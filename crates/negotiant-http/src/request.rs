//! Request with lazily parsed body and negotiated renderer

use std::fmt;
use std::sync::{Arc, LazyLock};

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method, StatusCode, Uri};
use negotiant_exception::{Error, Result};
use negotiant_negotiation::MediaType;
use negotiant_parsers::{
	Files, FormData, FormParser, ParsedData, Parser, ParserOptions, form_to_value,
};
use negotiant_renderers::{Renderer, RendererContext, ViewInfo};
use serde_json::{Map, Value};

use crate::config::ApiConfig;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const METHOD_FIELD: &str = "_method";
const CONTENT_FIELD: &str = "_content";
const CONTENT_TYPE_FIELD: &str = "_content_type";

static EMPTY_BODY: LazyLock<ParsedBody> = LazyLock::new(ParsedBody::empty);

/// Decoded request body
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBody {
	/// Structured data; an empty mapping when there is no body
	pub data: Value,
	/// Form fields, populated only by parsers handling form data
	pub form: FormData,
	/// Uploaded files, populated only by parsers handling file uploads
	pub files: Files,
}

impl ParsedBody {
	/// A body with no data, form fields or files
	pub fn empty() -> Self {
		Self {
			data: Value::Object(Map::new()),
			form: FormData::new(),
			files: Files::new(),
		}
	}

	/// Splits parser output into data, form and files.
	///
	/// A parser declaring file upload support must produce multipart data.
	pub fn from_parsed(parsed: ParsedData, parser: &dyn Parser) -> Result<Self> {
		if parser.handles_file_uploads() && !matches!(parsed, ParsedData::MultiPart { .. }) {
			return Err(Error::Internal(format!(
				"parser for {} handles file uploads but did not return multipart data",
				parser.media_type()
			)));
		}

		let (data, fields, files) = match parsed {
			ParsedData::Json(value) => {
				let fields = string_fields(&value);
				(value, fields, Files::new())
			}
			ParsedData::Form(fields) => (form_to_value(&fields), fields, Files::new()),
			ParsedData::MultiPart { fields, files } => (form_to_value(&fields), fields, files),
		};

		let form = if parser.handles_form_data() {
			fields
		} else {
			FormData::new()
		};

		Ok(Self { data, form, files })
	}
}

impl Default for ParsedBody {
	fn default() -> Self {
		Self::empty()
	}
}

fn string_fields(value: &Value) -> FormData {
	let Value::Object(map) = value else {
		return FormData::new();
	};
	map.iter()
		.filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_string())))
		.collect()
}

enum BodyState {
	Uncomputed,
	Computed(ParsedBody),
	/// Parsing failed once; later reads see an empty body
	Failed,
}

enum RendererState {
	Uncomputed,
	Computed {
		renderer: Arc<dyn Renderer>,
		media_type: MediaType,
	},
}

/// An inbound API request.
///
/// The body is parsed on first access to [`Request::data`],
/// [`Request::form`] or [`Request::files`], with the parser matching the
/// Content-Type header. The response renderer is negotiated on first access
/// from the Accept header. Both results are cached for the request's
/// lifetime.
pub struct Request {
	method: Method,
	uri: Uri,
	headers: HeaderMap,
	body: Bytes,
	content_type: Option<String>,
	content_length: Option<u64>,
	config: ApiConfig,
	view: Option<ViewInfo>,
	body_state: BodyState,
	renderer_state: RendererState,
}

impl Request {
	/// Creates a new RequestBuilder
	///
	/// # Examples
	///
	/// ```
	/// use http::Method;
	/// use negotiant_http::Request;
	///
	/// let request = Request::builder()
	///     .method(Method::POST)
	///     .uri("/items/?page=2")
	///     .header("content-type", "application/json")
	///     .body(r#"{"name": "widget"}"#)
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.method(), &Method::POST);
	/// assert_eq!(request.full_path(), "/items/?page=2");
	/// assert_eq!(request.content_type(), Some("application/json"));
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::new()
	}

	/// Wraps an `http::Request` whose body has already been read.
	///
	/// The body is fully buffered, so a missing Content-Length header (for
	/// instance after a chunked upload) is filled in from the body length.
	pub fn from_http(request: http::Request<Bytes>, config: ApiConfig) -> Self {
		let (parts, body) = request.into_parts();
		let mut headers = parts.headers;
		if !headers.contains_key(CONTENT_LENGTH) && !body.is_empty() {
			headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len() as u64));
		}
		Self::new(parts.method, parts.uri, headers, body, config, None)
	}

	fn new(
		method: Method,
		uri: Uri,
		headers: HeaderMap,
		body: Bytes,
		config: ApiConfig,
		view: Option<ViewInfo>,
	) -> Self {
		let content_type = headers
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.map(str::to_string);
		let content_length = headers
			.get(CONTENT_LENGTH)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| value.trim().parse::<u64>().ok());

		let mut request = Self {
			method,
			uri,
			headers,
			body,
			content_type,
			content_length,
			config,
			view,
			body_state: BodyState::Uncomputed,
			renderer_state: RendererState::Uncomputed,
		};
		if request.config.method_overloading {
			request.perform_method_overloading();
		}
		request
	}

	/// Lets browser forms tunnel other methods and content types through a
	/// URL-encoded POST.
	fn perform_method_overloading(&mut self) {
		if self.method != Method::POST || self.content_type.as_deref() != Some(FORM_CONTENT_TYPE) {
			return;
		}

		let Some(mut fields) = std::str::from_utf8(&self.body)
			.ok()
			.and_then(|text| FormParser::decode(text).ok())
		else {
			tracing::trace!("form body is not decodable, skipping method overloading");
			return;
		};

		if let Some(method) = fields.get(METHOD_FIELD) {
			match Method::from_bytes(method.to_ascii_uppercase().as_bytes()) {
				Ok(method) => {
					tracing::debug!(%method, "overriding request method from form field");
					self.method = method;
				}
				Err(_) => tracing::debug!(method, "ignoring invalid overriding method"),
			}
		}

		if fields.contains_key(CONTENT_FIELD) && fields.contains_key(CONTENT_TYPE_FIELD) {
			let content = fields.swap_remove(CONTENT_FIELD).unwrap_or_default();
			let content_type = fields.swap_remove(CONTENT_TYPE_FIELD).unwrap_or_default();
			tracing::debug!(content_type, "overriding request content from form fields");

			self.body = Bytes::from(content);
			self.content_length = Some(self.body.len() as u64);
			self.content_type = Some(content_type);
		}
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	pub fn uri(&self) -> &Uri {
		&self.uri
	}

	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Path followed by `?query`, the query only when non-empty
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_http::Request;
	///
	/// let request = Request::builder().uri("/search?").build().unwrap();
	/// assert_eq!(request.full_path(), "/search");
	///
	/// let request = Request::builder().uri("/search?q=rust").build().unwrap();
	/// assert_eq!(request.full_path(), "/search?q=rust");
	/// ```
	pub fn full_path(&self) -> String {
		match self.uri.query().filter(|query| !query.is_empty()) {
			Some(query) => format!("{}?{}", self.uri.path(), query),
			None => self.uri.path().to_string(),
		}
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// Raw body, after any content overloading
	pub fn body(&self) -> &Bytes {
		&self.body
	}

	/// Declared Content-Type, after any content overloading
	pub fn content_type(&self) -> Option<&str> {
		self.content_type.as_deref()
	}

	/// Declared Content-Length, after any content overloading
	pub fn content_length(&self) -> Option<u64> {
		self.content_length
	}

	pub fn config(&self) -> &ApiConfig {
		&self.config
	}

	pub fn view(&self) -> Option<&ViewInfo> {
		self.view.as_ref()
	}

	pub fn set_view(&mut self, view: ViewInfo) {
		self.view = Some(view);
	}

	/// Replaces the parsers for this request only.
	///
	/// A body that was already parsed is parsed again on next access.
	pub fn set_parsers(&mut self, parsers: Vec<Arc<dyn Parser>>) {
		self.config.parsers = parsers;
		self.body_state = BodyState::Uncomputed;
	}

	/// Replaces the renderers for this request only.
	pub fn set_renderers(&mut self, renderers: Vec<Arc<dyn Renderer>>) {
		self.config.renderers = renderers;
		self.renderer_state = RendererState::Uncomputed;
	}

	/// Decoded body data
	pub async fn data(&mut self) -> Result<&Value> {
		Ok(&self.parsed_body().await?.data)
	}

	/// Decoded form fields
	pub async fn form(&mut self) -> Result<&FormData> {
		Ok(&self.parsed_body().await?.form)
	}

	/// Uploaded files
	pub async fn files(&mut self) -> Result<&Files> {
		Ok(&self.parsed_body().await?.files)
	}

	/// Parses the body on first call.
	///
	/// A parse error is returned once; afterwards the body reads as empty.
	pub async fn parsed_body(&mut self) -> Result<&ParsedBody> {
		if matches!(self.body_state, BodyState::Uncomputed) {
			let result = self.parse().await;
			match result {
				Ok(body) => self.body_state = BodyState::Computed(body),
				Err(e) => {
					tracing::debug!(error = %e, path = self.uri.path(), "request body parsing failed");
					self.body_state = BodyState::Failed;
					return Err(e);
				}
			}
		}

		Ok(match &self.body_state {
			BodyState::Computed(body) => body,
			BodyState::Uncomputed | BodyState::Failed => &*EMPTY_BODY,
		})
	}

	async fn parse(&self) -> Result<ParsedBody> {
		let content_type = self
			.content_type
			.as_deref()
			.filter(|content_type| !content_type.trim().is_empty());
		let content_length = self.content_length.filter(|length| *length > 0);
		let (Some(content_type), Some(content_length)) = (content_type, content_length) else {
			tracing::trace!("request has no body to parse");
			return Ok(ParsedBody::empty());
		};

		let available = self.config.parser_media_types();
		let selection = self
			.config
			.negotiator
			.select_parser(&available, content_type)?;
		let parser = self
			.config
			.parsers
			.get(selection.index)
			.cloned()
			.ok_or_else(|| {
				Error::Internal(format!(
					"negotiator selected parser {} of {}",
					selection.index,
					available.len()
				))
			})?;

		let options = ParserOptions::new(Some(content_length));
		let parsed = parser
			.parse(self.body.clone(), &selection.media_type, &options)
			.await?;
		ParsedBody::from_parsed(parsed, parser.as_ref())
	}

	/// Renderer negotiated from the Accept header
	pub fn accepted_renderer(&mut self) -> Result<Arc<dyn Renderer>> {
		self.negotiate().map(|(renderer, _)| renderer)
	}

	/// Media type the response will be rendered with
	pub fn accepted_media_type(&mut self) -> Result<MediaType> {
		self.negotiate().map(|(_, media_type)| media_type)
	}

	/// Negotiates the renderer on first call and caches the outcome.
	///
	/// Failures are not cached.
	pub fn negotiate(&mut self) -> Result<(Arc<dyn Renderer>, MediaType)> {
		if let RendererState::Computed {
			renderer,
			media_type,
		} = &self.renderer_state
		{
			return Ok((Arc::clone(renderer), media_type.clone()));
		}

		let accept = self
			.headers
			.get(ACCEPT)
			.and_then(|value| value.to_str().ok());
		let available = self.config.renderer_media_types();
		let selection = self.config.negotiator.select_renderer(&available, accept)?;
		let renderer = self
			.config
			.renderers
			.get(selection.index)
			.cloned()
			.ok_or_else(|| {
				Error::Internal(format!(
					"negotiator selected renderer {} of {}",
					selection.index,
					available.len()
				))
			})?;

		self.renderer_state = RendererState::Computed {
			renderer: Arc::clone(&renderer),
			media_type: selection.media_type.clone(),
		};
		Ok((renderer, selection.media_type))
	}

	/// Context handed to renderers for a response to this request
	pub fn renderer_context(&self, status: StatusCode, headers: HeaderMap) -> RendererContext {
		RendererContext::new()
			.with_status(status)
			.with_headers(headers)
			.with_renderers(self.config.renderers.clone())
			.with_path(self.full_path())
			.with_method(self.method.clone())
			.with_view(self.view.clone())
	}
}

impl fmt::Debug for Request {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let body_state = match &self.body_state {
			BodyState::Uncomputed => "uncomputed",
			BodyState::Computed(_) => "computed",
			BodyState::Failed => "failed",
		};
		let accepted = match &self.renderer_state {
			RendererState::Uncomputed => None,
			RendererState::Computed { media_type, .. } => Some(media_type.to_string()),
		};

		f.debug_struct("Request")
			.field("method", &self.method)
			.field("uri", &self.uri)
			.field("headers", &self.headers)
			.field("content_type", &self.content_type)
			.field("content_length", &self.content_length)
			.field("body_len", &self.body.len())
			.field("body_state", &body_state)
			.field("accepted_media_type", &accepted)
			.field("config", &self.config)
			.field("view", &self.view)
			.finish()
	}
}

/// Builder for [`Request`]
#[derive(Debug)]
pub struct RequestBuilder {
	method: Method,
	uri: Uri,
	headers: HeaderMap,
	body: Bytes,
	config: ApiConfig,
	view: Option<ViewInfo>,
	error: Option<http::Error>,
}

impl RequestBuilder {
	/// Defaults to `GET /` with no headers or body and the default config
	pub fn new() -> Self {
		Self {
			method: Method::GET,
			uri: Uri::from_static("/"),
			headers: HeaderMap::new(),
			body: Bytes::new(),
			config: ApiConfig::default(),
			view: None,
			error: None,
		}
	}

	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri<T>(mut self, uri: T) -> Self
	where
		Uri: TryFrom<T>,
		<Uri as TryFrom<T>>::Error: Into<http::Error>,
	{
		match Uri::try_from(uri) {
			Ok(uri) => self.uri = uri,
			Err(e) => self.record_error(e.into()),
		}
		self
	}

	pub fn header<K, V>(mut self, key: K, value: V) -> Self
	where
		HeaderName: TryFrom<K>,
		<HeaderName as TryFrom<K>>::Error: Into<http::Error>,
		HeaderValue: TryFrom<V>,
		<HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
	{
		let name = HeaderName::try_from(key).map_err(Into::into);
		let value = HeaderValue::try_from(value).map_err(Into::into);
		match (name, value) {
			(Ok(name), Ok(value)) => {
				self.headers.append(name, value);
			}
			(Err(e), _) | (_, Err(e)) => self.record_error(e),
		}
		self
	}

	/// Replaces all headers
	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	/// Sets the body, and a matching Content-Length header when none is set
	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		if !self.headers.contains_key(CONTENT_LENGTH) {
			self.headers
				.insert(CONTENT_LENGTH, HeaderValue::from(self.body.len() as u64));
		}
		self
	}

	pub fn config(mut self, config: ApiConfig) -> Self {
		self.config = config;
		self
	}

	pub fn view(mut self, view: ViewInfo) -> Self {
		self.view = Some(view);
		self
	}

	fn record_error(&mut self, error: http::Error) {
		if self.error.is_none() {
			self.error = Some(error);
		}
	}

	/// Fails with the first invalid URI or header given to the builder
	pub fn build(self) -> std::result::Result<Request, http::Error> {
		if let Some(error) = self.error {
			return Err(error);
		}
		Ok(Request::new(
			self.method,
			self.uri,
			self.headers,
			self.body,
			self.config,
			self.view,
		))
	}
}

impl Default for RequestBuilder {
	fn default() -> Self {
		Self::new()
	}
}
