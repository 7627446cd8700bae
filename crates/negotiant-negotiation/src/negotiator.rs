//! Parser and renderer selection

use negotiant_exception::{Error, Result};

use super::accept::AcceptHeader;
use super::media_type::MediaType;

/// Accept value assumed when the client sends none
pub const DEFAULT_ACCEPT: &str = "*/*";

/// Outcome of a negotiation: which candidate won and with which media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
	/// Index into the candidate list passed to the negotiator
	pub index: usize,
	/// Media type the request should be parsed or rendered with
	pub media_type: MediaType,
}

impl Selection {
	pub fn new(index: usize, media_type: MediaType) -> Self {
		Self { index, media_type }
	}
}

/// Strategy for choosing a parser and a renderer.
///
/// Candidates are given by their declared media types in registration order;
/// the returned [`Selection`] indexes into that list.
pub trait ContentNegotiation: Send + Sync {
	/// Picks the parser for the request body from the client's Content-Type.
	fn select_parser(&self, available: &[MediaType], content_type: &str) -> Result<Selection>;

	/// Picks the renderer for the response from the client's Accept header.
	fn select_renderer(&self, available: &[MediaType], accept: Option<&str>) -> Result<Selection>;
}

/// Precedence-aware negotiation.
///
/// Client precedence groups dominate, server registration order breaks ties
/// inside a group.
///
/// # Examples
///
/// ```
/// use negotiant_negotiation::{ContentNegotiation, DefaultNegotiation, MediaType};
///
/// let negotiation = DefaultNegotiation;
/// let renderers = [MediaType::parse("application/json"), MediaType::parse("text/html")];
///
/// let selection = negotiation.select_renderer(&renderers, Some("text/html")).unwrap();
/// assert_eq!(selection.index, 1);
///
/// let selection = negotiation.select_renderer(&renderers, None).unwrap();
/// assert_eq!(selection.index, 0);
/// assert_eq!(selection.media_type.to_string(), "application/json");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNegotiation;

impl ContentNegotiation for DefaultNegotiation {
	fn select_parser(&self, available: &[MediaType], content_type: &str) -> Result<Selection> {
		let client_media_type = MediaType::parse(content_type);

		for (index, server_media_type) in available.iter().enumerate() {
			if server_media_type.satisfies(&client_media_type) {
				tracing::debug!(
					parser = %server_media_type,
					content_type = %client_media_type,
					"selected parser"
				);
				return Ok(Selection::new(index, client_media_type));
			}
		}

		tracing::debug!(content_type, "no parser satisfies the request Content-Type");
		Err(Error::unsupported_media_type())
	}

	fn select_renderer(&self, available: &[MediaType], accept: Option<&str>) -> Result<Selection> {
		let header = accept
			.map(str::trim)
			.filter(|header| !header.is_empty())
			.unwrap_or(DEFAULT_ACCEPT);

		for client_media_types in AcceptHeader::parse(header).iter() {
			for (index, server_media_type) in available.iter().enumerate() {
				for client_media_type in client_media_types {
					if !client_media_type.is_compatible_with(server_media_type) {
						continue;
					}
					let media_type =
						if server_media_type.precedence() > client_media_type.precedence() {
							server_media_type.clone()
						} else {
							client_media_type.clone()
						};
					tracing::debug!(
						renderer = %server_media_type,
						media_type = %media_type,
						"selected renderer"
					);
					return Ok(Selection::new(index, media_type));
				}
			}
		}

		tracing::debug!(accept = header, "no renderer satisfies the request Accept header");
		Err(Error::not_acceptable())
	}
}
