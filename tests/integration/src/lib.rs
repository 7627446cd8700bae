//! Integration test utilities for negotiant
//!
//! Shared requests and parsers for the end-to-end tests across the
//! negotiation, parser, renderer and request crates.

use std::sync::atomic::{AtomicUsize, Ordering};

use negotiant::http::header::{ACCEPT, CONTENT_TYPE};
use negotiant::parsers::ParseResult;
use negotiant::prelude::*;
use serde_json::json;

/// Accept header a desktop browser sends for a page load
pub const BROWSER_ACCEPT: &str =
	"text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Accepts any content type and counts how often it is asked to parse
#[derive(Debug, Default)]
pub struct CountingParser {
	calls: AtomicUsize,
}

impl CountingParser {
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Parser for CountingParser {
	fn media_type(&self) -> MediaType {
		MediaType::parse("*/*")
	}

	async fn parse(
		&self,
		_body: Bytes,
		_media_type: &MediaType,
		_options: &ParserOptions,
	) -> ParseResult<ParsedData> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(ParsedData::Json(json!({"parsed": true})))
	}
}

/// JSON POST to `/echo/` that also accepts JSON back
pub fn json_request(body: impl Into<Bytes>) -> Request {
	Request::builder()
		.method(Method::POST)
		.uri("/echo/")
		.header(CONTENT_TYPE, "application/json")
		.header(ACCEPT, "application/json")
		.body(body)
		.build()
		.expect("Failed to build JSON request")
}

/// Renders `content` for `request` and returns the body as text
pub async fn render_text<T: Serialize + ?Sized>(request: &mut Request, content: &T) -> String {
	let response = Response::from_content(request, content)
		.await
		.expect("Failed to render response");
	String::from_utf8(response.body.to_vec()).expect("Response body is not UTF-8")
}
