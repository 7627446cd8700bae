//! # Negotiant Renderers
//!
//! Response renderers.
//!
//! ## Renderers
//!
//! - **JSONRenderer**: `application/json`, honours an `indent` media type parameter
//! - **HTMLRenderer**: `text/html`, passes pre-rendered markup through
//! - **BrowsableAPIRenderer**: `text/html`, a human-readable debug page
//!
//! ## Example
//!
//! ```
//! use negotiant_renderers::{JSONRenderer, MediaType, Renderer, RendererContext};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let renderer = JSONRenderer::new();
//! let body = renderer
//!     .render(
//!         &json!({"example": "example"}),
//!         &MediaType::parse("application/json; indent=2"),
//!         &RendererContext::new(),
//!     )
//!     .await
//!     .unwrap();
//! assert_eq!(&body[..], b"{\n  \"example\": \"example\"\n}");
//! # }
//! ```

pub mod browsable;
pub mod html;
pub mod json;
pub mod renderer;
pub mod utils;

pub use browsable::BrowsableAPIRenderer;
pub use html::HTMLRenderer;
pub use json::JSONRenderer;
pub use renderer::{
	MediaType, RenderError, RenderResult, Renderer, RendererContext, ViewInfo, is_empty_content,
};
