//! # Negotiant Exception
//!
//! Error taxonomy shared by the negotiation, parsing and rendering crates.
//!
//! Every request-facing variant maps to an HTTP status code and carries a
//! human-readable detail message. The host framework turns these into error
//! responses (see `negotiant_http::Response::from_error`).
//!
//! ## Example
//!
//! ```
//! use negotiant_exception::Error;
//! use http::StatusCode;
//!
//! let err = Error::not_acceptable();
//! assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
//! assert_eq!(err.to_string(), "Could not satisfy the request Accept header.");
//! ```

use http::StatusCode;
use thiserror::Error;

/// Default detail for [`Error::ParseError`].
pub const PARSE_ERROR_DETAIL: &str = "Malformed request.";
/// Default detail for [`Error::AuthenticationFailed`].
pub const AUTHENTICATION_FAILED_DETAIL: &str = "Incorrect authentication credentials.";
/// Default detail for [`Error::NotAuthenticated`].
pub const NOT_AUTHENTICATED_DETAIL: &str = "Authentication credentials were not provided.";
/// Default detail for [`Error::PermissionDenied`].
pub const PERMISSION_DENIED_DETAIL: &str = "You do not have permission to perform this action.";
/// Default detail for [`Error::NotFound`].
pub const NOT_FOUND_DETAIL: &str = "This resource does not exist.";
/// Default detail for [`Error::NotAcceptable`].
pub const NOT_ACCEPTABLE_DETAIL: &str = "Could not satisfy the request Accept header.";
/// Default detail for [`Error::UnsupportedMediaType`].
pub const UNSUPPORTED_MEDIA_TYPE_DETAIL: &str =
	"Unsupported media type in the request Content-Type header.";
/// Default detail for [`Error::Throttled`].
pub const THROTTLED_DETAIL: &str = "Request was throttled.";

/// Errors raised while negotiating, parsing or rendering a request.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// Malformed request body for the selected parser (400).
	#[error("{0}")]
	ParseError(String),

	/// Incorrect credentials (401).
	#[error("{0}")]
	AuthenticationFailed(String),

	/// Credentials missing (401).
	#[error("{0}")]
	NotAuthenticated(String),

	/// Authenticated but not allowed (403).
	#[error("{0}")]
	PermissionDenied(String),

	/// Resource does not exist (404).
	#[error("{0}")]
	NotFound(String),

	/// No registered renderer satisfies the Accept header (406).
	#[error("{0}")]
	NotAcceptable(String),

	/// No registered parser is satisfied by the Content-Type header (415).
	#[error("{0}")]
	UnsupportedMediaType(String),

	/// Request was rate limited (429).
	#[error("{0}")]
	Throttled(String),

	/// Host-defined API error with an arbitrary status code.
	#[error("{detail}")]
	Api {
		/// Status code of the error response
		status: StatusCode,
		/// Human-readable detail
		detail: String,
	},

	/// Response data could not be rendered (500).
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// A component broke its contract at runtime (500).
	#[error("Internal error: {0}")]
	Internal(String),
}

/// Result type alias used across negotiant crates.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	/// `ParseError` with the default detail.
	pub fn parse_error() -> Self {
		Self::ParseError(PARSE_ERROR_DETAIL.to_string())
	}

	/// `AuthenticationFailed` with the default detail.
	pub fn authentication_failed() -> Self {
		Self::AuthenticationFailed(AUTHENTICATION_FAILED_DETAIL.to_string())
	}

	/// `NotAuthenticated` with the default detail.
	pub fn not_authenticated() -> Self {
		Self::NotAuthenticated(NOT_AUTHENTICATED_DETAIL.to_string())
	}

	/// `PermissionDenied` with the default detail.
	pub fn permission_denied() -> Self {
		Self::PermissionDenied(PERMISSION_DENIED_DETAIL.to_string())
	}

	/// `NotFound` with the default detail.
	pub fn not_found() -> Self {
		Self::NotFound(NOT_FOUND_DETAIL.to_string())
	}

	/// `NotAcceptable` with the default detail.
	pub fn not_acceptable() -> Self {
		Self::NotAcceptable(NOT_ACCEPTABLE_DETAIL.to_string())
	}

	/// `UnsupportedMediaType` with the default detail.
	pub fn unsupported_media_type() -> Self {
		Self::UnsupportedMediaType(UNSUPPORTED_MEDIA_TYPE_DETAIL.to_string())
	}

	/// `Throttled` with the default detail.
	pub fn throttled() -> Self {
		Self::Throttled(THROTTLED_DETAIL.to_string())
	}

	/// Host-defined error with a custom status code.
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_exception::Error;
	/// use http::StatusCode;
	///
	/// let err = Error::api(StatusCode::CONFLICT, "Could not update the resource");
	/// assert_eq!(err.status_code(), StatusCode::CONFLICT);
	/// assert_eq!(err.detail(), "Could not update the resource");
	/// ```
	pub fn api(status: StatusCode, detail: impl Into<String>) -> Self {
		Self::Api {
			status,
			detail: detail.into(),
		}
	}

	/// HTTP status code the host should respond with.
	pub fn status_code(&self) -> StatusCode {
		match self {
			Self::ParseError(_) => StatusCode::BAD_REQUEST,
			Self::AuthenticationFailed(_) | Self::NotAuthenticated(_) => StatusCode::UNAUTHORIZED,
			Self::PermissionDenied(_) => StatusCode::FORBIDDEN,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
			Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
			Self::Throttled(_) => StatusCode::TOO_MANY_REQUESTS,
			Self::Api { status, .. } => *status,
			Self::Serialization(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Detail message exposed to clients.
	pub fn detail(&self) -> String {
		match self {
			Self::ParseError(detail)
			| Self::AuthenticationFailed(detail)
			| Self::NotAuthenticated(detail)
			| Self::PermissionDenied(detail)
			| Self::NotFound(detail)
			| Self::NotAcceptable(detail)
			| Self::UnsupportedMediaType(detail)
			| Self::Throttled(detail)
			| Self::Api { detail, .. } => detail.clone(),
			Self::Serialization(_) | Self::Internal(_) => self.to_string(),
		}
	}

	/// Whether the error was caused by the client rather than the server.
	pub fn is_client_error(&self) -> bool {
		self.status_code().is_client_error()
	}
}
