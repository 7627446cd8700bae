//! # Negotiant Parsers
//!
//! Request body parsers.
//!
//! ## Parsers
//!
//! - **JSONParser**: `application/json`
//! - **FormParser**: `application/x-www-form-urlencoded`
//! - **MultiPartParser**: `multipart/form-data`, including file uploads
//!
//! ## Example
//!
//! ```
//! use bytes::Bytes;
//! use negotiant_parsers::{JSONParser, MediaType, ParsedData, Parser, ParserOptions};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let parser = JSONParser::new();
//! let data = parser
//!     .parse(
//!         Bytes::from_static(br#"{"example": "example"}"#),
//!         &MediaType::parse("application/json"),
//!         &ParserOptions::default(),
//!     )
//!     .await
//!     .unwrap();
//! assert_eq!(data, ParsedData::Json(json!({"example": "example"})));
//! # }
//! ```

pub mod form;
pub mod json;
pub mod multipart;
pub mod parser;

pub use form::FormParser;
pub use json::JSONParser;
pub use multipart::MultiPartParser;
pub use parser::{
	Files, FormData, MediaType, ParseError, ParseResult, ParsedData, Parser, ParserOptions,
	UploadedFile, form_to_value,
};
