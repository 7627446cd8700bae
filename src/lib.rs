//! # Negotiant
//!
//! Content negotiation, request body parsing and response rendering for
//! HTTP APIs.
//!
//! Negotiant sits between a host framework and its handlers. The host hands
//! over the method, URI, headers and buffered body of a request; handlers
//! read decoded data and return serializable values; negotiant picks the
//! parser from the Content-Type header and the renderer from the Accept
//! header.
//!
//! ## Crates
//!
//! - [`exception`]: error kinds and their HTTP status codes
//! - [`negotiation`]: media types, Accept header grouping, negotiation
//! - [`parsers`]: JSON, URL-encoded form and multipart parsers
//! - [`renderers`]: JSON, HTML and browsable API renderers
//! - [`http`]: the lazy [`Request`] and the rendered [`Response`]
//! - `conf`: TOML settings (feature `conf`, on by default)
//!
//! ## Feature Flags
//!
//! - `conf` (default) - load parser and renderer lists from TOML
//! - `markdown` - render view descriptions in the browsable API as markdown
//! - `full` - all of the above
//!
//! ## Quick Example
//!
//! ```
//! use negotiant::prelude::*;
//! use negotiant::http::header::{ACCEPT, CONTENT_TYPE};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let mut request = Request::builder()
//!     .method(Method::POST)
//!     .uri("/items/")
//!     .header(CONTENT_TYPE, "application/json")
//!     .header(ACCEPT, "application/json; indent=2")
//!     .body(r#"{"name": "widget"}"#)
//!     .build()
//!     .expect("valid request");
//!
//! let name = request.data().await?["name"].clone();
//! let response = Response::from_content_with(
//!     &mut request,
//!     &serde_json::json!({"created": name}),
//!     StatusCode::CREATED,
//!     HeaderMap::new(),
//! )
//! .await?;
//!
//! assert_eq!(response.status, StatusCode::CREATED);
//! assert_eq!(&response.body[..], b"{\n  \"created\": \"widget\"\n}");
//! # Ok(())
//! # }
//! ```

pub use negotiant_exception as exception;
pub use negotiant_negotiation as negotiation;
pub use negotiant_parsers as parsers;
pub use negotiant_renderers as renderers;

#[cfg(feature = "conf")]
pub use negotiant_conf as conf;

/// Request and response types, plus the `http` crate's primitives
pub mod http {
	pub use ::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header};
	pub use negotiant_http::*;
}

pub use negotiant_exception::{Error, Result};
pub use negotiant_http::{ApiConfig, ParsedBody, Request, RequestBuilder, Response};
pub use negotiant_negotiation::{
	AcceptHeader, ContentNegotiation, DefaultNegotiation, MediaType, Precedence, Selection,
	parse_accept_header,
};
pub use negotiant_parsers::{
	FormParser, JSONParser, MultiPartParser, ParsedData, Parser, ParserOptions,
};
pub use negotiant_renderers::{
	BrowsableAPIRenderer, HTMLRenderer, JSONRenderer, Renderer, RendererContext, ViewInfo,
};

#[cfg(feature = "conf")]
pub use negotiant_conf::{ApiSettings, ParserKind, RendererKind, SettingsError};

/// Commonly used types
pub mod prelude {
	pub use crate::{
		ApiConfig, BrowsableAPIRenderer, ContentNegotiation, DefaultNegotiation, Error,
		FormParser, HTMLRenderer, JSONParser, JSONRenderer, MediaType, MultiPartParser,
		ParsedData, Parser, ParserOptions, Renderer, RendererContext, Request, Response,
		Result, ViewInfo,
	};

	#[cfg(feature = "conf")]
	pub use crate::ApiSettings;

	pub use crate::http::{HeaderMap, Method, StatusCode};

	// External
	pub use async_trait::async_trait;
	pub use bytes::Bytes;
	pub use serde::Serialize;
}
