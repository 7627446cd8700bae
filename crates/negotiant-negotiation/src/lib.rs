//! # Negotiant Negotiation
//!
//! Media type parsing, Accept header grouping and content negotiation.
//!
//! - **MediaType**: parses and compares one media type expression
//! - **AcceptHeader**: splits an Accept header into precedence groups
//! - **DefaultNegotiation**: picks a parser from the Content-Type header and
//!   a renderer from the Accept header
//!
//! ## Example
//!
//! ```
//! use negotiant_negotiation::{ContentNegotiation, DefaultNegotiation, MediaType};
//!
//! let parsers = [
//!     MediaType::parse("application/json"),
//!     MediaType::parse("application/x-www-form-urlencoded"),
//! ];
//! let selection = DefaultNegotiation
//!     .select_parser(&parsers, "application/x-www-form-urlencoded")
//!     .unwrap();
//! assert_eq!(selection.index, 1);
//! ```

pub mod accept;
pub mod media_type;
pub mod negotiator;

pub use accept::{AcceptHeader, parse_accept_header};
pub use media_type::{MediaType, Precedence, QUALITY_PARAM};
pub use negotiator::{ContentNegotiation, DEFAULT_ACCEPT, DefaultNegotiation, Selection};
