//! Integration tests for the browsable API page

use negotiant::http::header::{ACCEPT, CONTENT_TYPE};
use negotiant::prelude::*;
use negotiant_integration_tests::BROWSER_ACCEPT;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn love_view() -> ViewInfo {
	ViewInfo::new("love")
		.with_description(
			"Shows some love.\n\n        Returns a message and a link to the example site.",
		)
		.with_allowed_methods(vec![Method::GET, Method::HEAD, Method::OPTIONS])
}

async fn browse(view: ViewInfo, content: serde_json::Value) -> Response {
	let mut request = Request::builder()
		.uri("/_love")
		.header(ACCEPT, BROWSER_ACCEPT)
		.view(view)
		.build()
		.unwrap();
	Response::from_content(&mut request, &content).await.unwrap()
}

#[rstest]
#[tokio::test]
async fn test_browsable_page(love_view: ViewInfo) {
	let response = browse(
		love_view,
		json!({"message": "I <3 Rust", "url": "http://example.org"}),
	)
	.await;
	let html = std::str::from_utf8(&response.body).unwrap();

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.headers[CONTENT_TYPE], "text/html");
	assert!(html.contains("I &lt;3 Rust"));
	assert!(html.contains("<h1>Love</h1>"));
	assert!(html.contains("/_love"));
	assert!(html.contains(r#"<a href="http://example.org">http://example.org</a>"#));
	assert!(html.contains("GET, HEAD, OPTIONS"));
	assert!(html.contains("Returns a message and a link to the example site."));
}

#[rstest]
#[tokio::test]
async fn test_browsable_page_for_no_content(love_view: ViewInfo) {
	let mut request = Request::builder()
		.uri("/_love")
		.header(ACCEPT, "text/html")
		.view(love_view)
		.build()
		.unwrap();
	let response = Response::from_content_with(
		&mut request,
		"",
		StatusCode::NO_CONTENT,
		HeaderMap::new(),
	)
	.await
	.unwrap();

	// The page itself is a body, so the status is promoted
	assert_eq!(response.status, StatusCode::OK);
	let html = std::str::from_utf8(&response.body).unwrap();
	assert!(html.contains("HTTP 204 No Content"));
}

#[rstest]
#[tokio::test]
async fn test_error_page_in_browser(love_view: ViewInfo) {
	let mut request = Request::builder()
		.uri("/_love")
		.header(ACCEPT, BROWSER_ACCEPT)
		.view(love_view)
		.build()
		.unwrap();
	let response = Response::from_error(&mut request, &Error::not_found()).await;

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert_eq!(response.headers[CONTENT_TYPE], "text/html");
	let html = std::str::from_utf8(&response.body).unwrap();
	assert!(html.contains("HTTP 404 Not Found"));
	assert!(html.contains("This resource does not exist."));
}

#[rstest]
#[tokio::test]
async fn test_json_client_skips_browsable_page(love_view: ViewInfo) {
	let mut request = Request::builder()
		.uri("/_love")
		.header(ACCEPT, "application/json")
		.view(love_view)
		.build()
		.unwrap();
	let response = Response::from_content(&mut request, &json!({"ok": true}))
		.await
		.unwrap();
	assert_eq!(&response.body[..], br#"{"ok": true}"#);
}
