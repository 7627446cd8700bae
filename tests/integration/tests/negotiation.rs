//! Integration tests for media types, Accept header grouping and negotiation

use std::sync::Arc;

use negotiant::prelude::*;
use negotiant::{AcceptHeader, Precedence, parse_accept_header};
use rstest::{fixture, rstest};

fn media_types(items: &[&str]) -> Vec<MediaType> {
	items.iter().map(|item| MediaType::parse(item)).collect()
}

#[rstest]
#[case("application/json")]
#[case("application/json; indent=4")]
#[case("text/html; charset=utf-8, q=0.5")]
#[case(r#"application/xml; schema="foo", version=2"#)]
#[case("*/*")]
#[case("text/*; q=0.1")]
fn test_canonical_round_trip(#[case] raw: &str) {
	let parsed = MediaType::parse(raw);
	let reparsed = MediaType::parse(&parsed.to_string());
	assert_eq!(parsed, reparsed);
	assert_eq!(parsed.params, reparsed.params);
	assert_eq!(parsed.to_string(), reparsed.to_string());
}

#[rstest]
#[case("application/json")]
#[case("text/html; level=1")]
#[case("image/png")]
fn test_wildcard_satisfies_concrete(#[case] concrete: &str) {
	let any = MediaType::parse("*/*");
	assert!(any.satisfies(&MediaType::parse(concrete)));
}

#[rstest]
#[case("text/html; level=1")]
#[case("application/json; version=2")]
fn test_parameterized_does_not_satisfy_wildcard(#[case] concrete: &str) {
	assert!(!MediaType::parse(concrete).satisfies(&MediaType::parse("*/*")));
}

#[rstest]
#[case("*/*", Precedence::Any)]
#[case("text/*", Precedence::MainType)]
#[case("text/html", Precedence::FullType)]
#[case("text/html; q=0.3", Precedence::FullType)]
#[case("text/html; level=1", Precedence::Parameterized)]
fn test_precedence(#[case] raw: &str, #[case] expected: Precedence) {
	assert_eq!(MediaType::parse(raw).precedence(), expected);
	assert_eq!(u8::from(MediaType::parse(raw).precedence()), expected as u8);
}

#[rstest]
fn test_concrete_outranks_wildcard() {
	let groups = parse_accept_header("*/*, application/json");
	assert_eq!(groups.len(), 2);
	assert_eq!(groups[0].len(), 1);
	assert!(groups[0].contains(&MediaType::parse("application/json")));
	assert!(groups[1].contains(&MediaType::parse("*/*")));
}

#[rstest]
fn test_quality_ignored_for_grouping() {
	let accept =
		AcceptHeader::parse("application/xml;schema=foo, application/json;q=0.9, application/xml, */*");
	let groups = accept.groups();

	assert_eq!(groups.len(), 3);
	assert_eq!(
		groups[0].iter().cloned().collect::<Vec<_>>(),
		media_types(&["application/xml; schema=foo"])
	);
	assert_eq!(
		groups[1].iter().cloned().collect::<Vec<_>>(),
		media_types(&["application/json; q=0.9", "application/xml"])
	);
	assert_eq!(
		groups[2].iter().cloned().collect::<Vec<_>>(),
		media_types(&["*/*"])
	);
}

#[fixture]
fn negotiation() -> DefaultNegotiation {
	DefaultNegotiation
}

#[rstest]
fn test_renderer_selection_by_accept(negotiation: DefaultNegotiation) {
	let renderers = media_types(&["application/json", "application/html"]);

	let selection = negotiation
		.select_renderer(&renderers, Some("application/html"))
		.unwrap();
	assert_eq!(selection.index, 1);
	assert_eq!(selection.media_type, MediaType::parse("application/html"));
}

#[rstest]
#[case(None)]
#[case(Some("*/*"))]
#[case(Some("   "))]
fn test_server_preference_on_ties(negotiation: DefaultNegotiation, #[case] accept: Option<&str>) {
	let renderers = media_types(&["application/json", "application/html"]);

	let selection = negotiation.select_renderer(&renderers, accept).unwrap();
	assert_eq!(selection.index, 0);
	assert_eq!(selection.media_type.to_string(), "application/json");
}

#[rstest]
fn test_parser_selection_by_content_type(negotiation: DefaultNegotiation) {
	let parsers = media_types(&["application/json", "application/x-www-form-urlencoded"]);

	let selection = negotiation
		.select_parser(&parsers, "application/x-www-form-urlencoded")
		.unwrap();
	assert_eq!(selection.index, 1);
}

#[rstest]
fn test_versioned_renderers(negotiation: DefaultNegotiation) {
	let renderers = media_types(&[
		r#"application/json; api-version="2.0""#,
		r#"application/json; api-version="1.0""#,
	]);

	let selection = negotiation
		.select_renderer(&renderers, Some(r#"application/json; api-version="1.0""#))
		.unwrap();
	assert_eq!(selection.index, 1);
	assert_eq!(selection.media_type.param("api-version"), Some("1.0"));

	let selection = negotiation.select_renderer(&renderers, Some("*/*")).unwrap();
	assert_eq!(selection.index, 0);
	assert_eq!(selection.media_type, renderers[0]);
}

#[rstest]
fn test_no_match(negotiation: DefaultNegotiation) {
	let renderers = media_types(&["application/json"]);
	let error = negotiation
		.select_renderer(&renderers, Some("image/png"))
		.unwrap_err();
	assert_eq!(error.status_code(), StatusCode::NOT_ACCEPTABLE);

	let error = negotiation.select_parser(&renderers, "text/csv").unwrap_err();
	assert_eq!(error.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[rstest]
fn test_custom_negotiation_strategy() {
	/// Always picks the last renderer
	struct LastRenderer;

	impl ContentNegotiation for LastRenderer {
		fn select_parser(
			&self,
			available: &[MediaType],
			content_type: &str,
		) -> Result<negotiant::Selection> {
			DefaultNegotiation.select_parser(available, content_type)
		}

		fn select_renderer(
			&self,
			available: &[MediaType],
			_accept: Option<&str>,
		) -> Result<negotiant::Selection> {
			let index = available.len().checked_sub(1).ok_or_else(Error::not_acceptable)?;
			Ok(negotiant::Selection::new(index, available[index].clone()))
		}
	}

	let config = ApiConfig::new().with_negotiator(Arc::new(LastRenderer));
	let mut request = Request::builder()
		.header("accept", "application/json")
		.config(config)
		.build()
		.unwrap();
	assert_eq!(
		request.accepted_renderer().unwrap().format(),
		Some("api")
	);
}
