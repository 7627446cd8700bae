//! Accept header parsing

use indexmap::IndexSet;

use super::media_type::{MediaType, Precedence};

/// A client's Accept header, grouped by precedence.
///
/// `q` values are disregarded: entries of equal precedence form one group
/// and ties are broken by server preference during negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptHeader {
	groups: Vec<IndexSet<MediaType>>,
}

impl AcceptHeader {
	/// Parses an Accept header string into precedence groups
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_negotiation::{AcceptHeader, MediaType};
	///
	/// let accept = AcceptHeader::parse("*/*, application/json");
	/// assert_eq!(accept.len(), 2);
	/// assert!(accept.groups()[0].contains(&MediaType::parse("application/json")));
	/// assert!(accept.groups()[1].contains(&MediaType::parse("*/*")));
	/// ```
	pub fn parse(header: &str) -> Self {
		let mut buckets: [IndexSet<MediaType>; 4] = Default::default();

		for token in header.split(',') {
			let token = token.trim();
			if token.is_empty() {
				continue;
			}
			let media_type = MediaType::parse(token);
			let slot = Precedence::Parameterized as usize - media_type.precedence() as usize;
			buckets[slot].insert(media_type);
		}

		Self {
			groups: buckets.into_iter().filter(|group| !group.is_empty()).collect(),
		}
	}

	/// Precedence groups, most specific first
	pub fn groups(&self) -> &[IndexSet<MediaType>] {
		&self.groups
	}

	/// Iterates over the precedence groups, most specific first
	pub fn iter(&self) -> impl Iterator<Item = &IndexSet<MediaType>> {
		self.groups.iter()
	}

	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}

	pub fn into_groups(self) -> Vec<IndexSet<MediaType>> {
		self.groups
	}
}

/// Parses the value of a client's Accept header into a list of sets of
/// media types, ordered by precedence.
///
/// For example, `application/json, application/xml, */*` returns
/// `[{application/json, application/xml}, {*/*}]`.
pub fn parse_accept_header(header: &str) -> Vec<IndexSet<MediaType>> {
	AcceptHeader::parse(header).into_groups()
}
