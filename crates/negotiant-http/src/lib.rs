//! # Negotiant HTTP
//!
//! Request and response types tying parsers, renderers and negotiation
//! together.
//!
//! - [`Request`] parses its body lazily with the parser matching the
//!   Content-Type header and negotiates a renderer from the Accept header.
//! - [`Response`] renders handler output with the negotiated renderer and
//!   translates errors into `{"message": detail}` bodies.
//! - [`ApiConfig`] holds the parsers, renderers and negotiation strategy
//!   shared by requests.
//!
//! ## Example
//!
//! ```
//! use http::{Method, StatusCode};
//! use http::header::{ACCEPT, CONTENT_TYPE};
//! use negotiant_http::{Request, Response};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut request = Request::builder()
//!     .method(Method::POST)
//!     .uri("/echo/")
//!     .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
//!     .header(ACCEPT, "application/json")
//!     .body("name=widget")
//!     .build()
//!     .unwrap();
//!
//! let data = request.data().await.unwrap().clone();
//! let response = Response::from_content(&mut request, &data).await.unwrap();
//!
//! assert_eq!(response.status, StatusCode::OK);
//! assert_eq!(&response.body[..], br#"{"name": "widget"}"#);
//! # }
//! ```

pub mod config;
pub mod request;
pub mod response;

pub use config::ApiConfig;
pub use request::{ParsedBody, Request, RequestBuilder};
pub use response::Response;
