use std::fmt;
use std::sync::Arc;

use negotiant_negotiation::{ContentNegotiation, DefaultNegotiation, MediaType};
use negotiant_parsers::{FormParser, JSONParser, MultiPartParser, Parser};
use negotiant_renderers::{BrowsableAPIRenderer, JSONRenderer, Renderer};

/// Parsers, renderers and negotiation strategy shared by requests
///
/// Cloning is cheap; every component sits behind an `Arc`.
#[derive(Clone)]
pub struct ApiConfig {
	/// Parsers in registration order
	pub parsers: Vec<Arc<dyn Parser>>,
	/// Renderers in registration order
	pub renderers: Vec<Arc<dyn Renderer>>,
	/// Strategy choosing a parser and a renderer
	pub negotiator: Arc<dyn ContentNegotiation>,
	/// Honour `_method`, `_content` and `_content_type` fields in POSTed forms
	pub method_overloading: bool,
}

impl ApiConfig {
	/// Default parsers (JSON, form, multipart), renderers (JSON, browsable
	/// API) and negotiation.
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_http::ApiConfig;
	///
	/// let config = ApiConfig::new();
	/// assert_eq!(config.parsers.len(), 3);
	/// assert_eq!(config.renderers.len(), 2);
	/// assert!(config.method_overloading);
	/// ```
	pub fn new() -> Self {
		Self {
			parsers: default_parsers(),
			renderers: default_renderers(),
			negotiator: Arc::new(DefaultNegotiation),
			method_overloading: true,
		}
	}

	/// Replaces the parser list
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use negotiant_http::ApiConfig;
	/// use negotiant_parsers::{JSONParser, Parser};
	///
	/// let parsers: Vec<Arc<dyn Parser>> = vec![Arc::new(JSONParser::new())];
	/// let config = ApiConfig::new().with_parsers(parsers);
	/// assert_eq!(config.parser_media_types()[0].to_string(), "application/json");
	/// ```
	pub fn with_parsers(mut self, parsers: Vec<Arc<dyn Parser>>) -> Self {
		self.parsers = parsers;
		self
	}

	pub fn with_renderers(mut self, renderers: Vec<Arc<dyn Renderer>>) -> Self {
		self.renderers = renderers;
		self
	}

	pub fn with_negotiator(mut self, negotiator: Arc<dyn ContentNegotiation>) -> Self {
		self.negotiator = negotiator;
		self
	}

	pub fn with_method_overloading(mut self, enabled: bool) -> Self {
		self.method_overloading = enabled;
		self
	}

	/// Declared media types of the parsers, in order
	pub fn parser_media_types(&self) -> Vec<MediaType> {
		self.parsers.iter().map(|parser| parser.media_type()).collect()
	}

	/// Declared media types of the renderers, in order
	pub fn renderer_media_types(&self) -> Vec<MediaType> {
		self.renderers
			.iter()
			.map(|renderer| renderer.media_type())
			.collect()
	}
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for ApiConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parsers: Vec<String> = self
			.parser_media_types()
			.iter()
			.map(ToString::to_string)
			.collect();
		let renderers: Vec<String> = self
			.renderer_media_types()
			.iter()
			.map(ToString::to_string)
			.collect();

		f.debug_struct("ApiConfig")
			.field("parsers", &parsers)
			.field("renderers", &renderers)
			.field("method_overloading", &self.method_overloading)
			.finish_non_exhaustive()
	}
}

fn default_parsers() -> Vec<Arc<dyn Parser>> {
	vec![
		Arc::new(JSONParser::new()),
		Arc::new(FormParser::new()),
		Arc::new(MultiPartParser::new()),
	]
}

fn default_renderers() -> Vec<Arc<dyn Renderer>> {
	vec![
		Arc::new(JSONRenderer::new()),
		Arc::new(BrowsableAPIRenderer::new()),
	]
}
