//! End-to-end tests for request parsing and response rendering

use std::sync::Arc;

use negotiant::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use negotiant::prelude::*;
use negotiant_integration_tests::{CountingParser, json_request, render_text};
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[tokio::test]
async fn test_echo_round_trip() {
	let mut request = json_request(r#"{"example": "example"}"#);
	let data = request.data().await.unwrap().clone();
	let response = Response::from_content(&mut request, &data).await.unwrap();

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(&response.body[..], br#"{"example": "example"}"#);
	assert_eq!(response.headers[CONTENT_TYPE], "application/json");
}

#[rstest]
#[tokio::test]
async fn test_echo_keeps_key_order() {
	let mut request = json_request(r#"{"zeta": 1, "alpha": 2, "mid": {"b": 1, "a": 2}}"#);
	let data = request.data().await.unwrap().clone();
	assert_eq!(
		render_text(&mut request, &data).await,
		r#"{"zeta": 1, "alpha": 2, "mid": {"b": 1, "a": 2}}"#
	);
}

#[rstest]
#[tokio::test]
async fn test_form_data_keeps_field_order() {
	let mut request = Request::builder()
		.method(Method::POST)
		.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
		.header(ACCEPT, "application/json")
		.body("zeta=1&alpha=2")
		.build()
		.unwrap();

	let data = request.data().await.unwrap().clone();
	let keys: Vec<&String> = data.as_object().unwrap().keys().collect();
	assert_eq!(keys, ["zeta", "alpha"]);
	assert_eq!(
		render_text(&mut request, &data).await,
		r#"{"zeta": "1", "alpha": "2"}"#
	);
}

#[rstest]
#[tokio::test]
async fn test_json_safe_values_round_trip() {
	let original = json!({
		"int": 1,
		"float": 2.5,
		"string": "caf\u{e9}",
		"bool": false,
		"null": null,
		"nested": [[1, 2], {"a": []}]
	});
	let mut request = json_request(original.to_string());
	assert_eq!(request.data().await.unwrap(), &original);
}

#[rstest]
#[tokio::test]
async fn test_empty_request_invokes_no_parser() {
	let parser = Arc::new(CountingParser::default());
	let parsers: Vec<Arc<dyn Parser>> = vec![parser.clone()];
	let mut request = Request::builder()
		.method(Method::GET)
		.config(ApiConfig::new().with_parsers(parsers))
		.build()
		.unwrap();

	assert_eq!(request.data().await.unwrap(), &json!({}));
	assert!(request.form().await.unwrap().is_empty());
	assert!(request.files().await.unwrap().is_empty());
	assert_eq!(parser.calls(), 0);
}

#[rstest]
#[tokio::test]
async fn test_body_is_parsed_once() {
	let parser = Arc::new(CountingParser::default());
	let parsers: Vec<Arc<dyn Parser>> = vec![parser.clone()];
	let mut request = Request::builder()
		.method(Method::POST)
		.header(CONTENT_TYPE, "text/plain")
		.config(ApiConfig::new().with_parsers(parsers))
		.body("anything")
		.build()
		.unwrap();

	assert_eq!(request.data().await.unwrap(), &json!({"parsed": true}));
	assert_eq!(request.data().await.unwrap(), &json!({"parsed": true}));
	assert!(request.form().await.unwrap().is_empty());
	assert_eq!(parser.calls(), 1);
}

#[rstest]
#[tokio::test]
async fn test_parse_failure_reads_empty_afterwards() {
	let mut request = json_request("{not json");

	let error = request.data().await.unwrap_err();
	assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
	assert!(error.detail().starts_with("JSON parse error - "));

	assert_eq!(request.data().await.unwrap(), &json!({}));
	assert!(request.files().await.unwrap().is_empty());

	// The host translates the error
	let response = Response::from_error(&mut request, &error).await;
	assert_eq!(response.status, StatusCode::BAD_REQUEST);
	let body: Value = serde_json::from_slice(&response.body).unwrap();
	assert!(body["message"].as_str().unwrap().starts_with("JSON parse error - "));
}

#[rstest]
#[tokio::test]
async fn test_multipart_upload() {
	let body = "--boundary\r\n\
Content-Disposition: form-data; name=\"title\"\r\n\
\r\n\
Holiday\r\n\
--boundary\r\n\
Content-Disposition: form-data; name=\"photo\"; filename=\"beach.txt\"\r\n\
Content-Type: text/plain\r\n\
\r\n\
sand and sea\r\n\
--boundary--\r\n";
	let mut request = Request::builder()
		.method(Method::POST)
		.uri("/photos/")
		.header(CONTENT_TYPE, "multipart/form-data; boundary=boundary")
		.body(body)
		.build()
		.unwrap();

	assert_eq!(request.data().await.unwrap(), &json!({"title": "Holiday"}));
	assert_eq!(request.form().await.unwrap()["title"], "Holiday");

	let files = request.files().await.unwrap();
	assert_eq!(files.len(), 1);
	assert_eq!(files["photo"].filename, "beach.txt");
	assert_eq!(&files["photo"].content[..], b"sand and sea");
}

#[rstest]
#[tokio::test]
async fn test_multipart_without_boundary() {
	let mut request = Request::builder()
		.method(Method::POST)
		.header(CONTENT_TYPE, "multipart/form-data")
		.body("--x\r\n")
		.build()
		.unwrap();

	let error = request.data().await.unwrap_err();
	assert_eq!(
		error,
		Error::ParseError("Multipart message missing boundary in Content-Type header".to_string())
	);
}

#[rstest]
#[tokio::test]
async fn test_missing_content_length_header_is_empty() {
	let mut headers = HeaderMap::new();
	headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());
	let mut request = Request::builder()
		.method(Method::POST)
		.headers(headers)
		.build()
		.unwrap();
	assert!(!request.headers().contains_key(CONTENT_LENGTH));
	assert_eq!(request.data().await.unwrap(), &json!({}));
}

#[rstest]
#[case("application/json", r#"{"example": "example"}"#)]
#[case("application/json; indent=4", "{\n    \"example\": \"example\"\n}")]
#[case("application/json; indent=0", "{\n\"example\": \"example\"\n}")]
#[case("application/json; indent=2; charset=utf-8", "{\n  \"example\": \"example\"\n}")]
#[case("text/html;q=0.5, application/json; indent=2", "{\n  \"example\": \"example\"\n}")]
#[tokio::test]
async fn test_json_rendering(#[case] accept: &str, #[case] expected: &str) {
	let mut request = Request::builder().header(ACCEPT, accept).build().unwrap();
	assert_eq!(
		render_text(&mut request, &json!({"example": "example"})).await,
		expected
	);
}

#[rstest]
#[tokio::test]
async fn test_serializable_content() {
	#[derive(Serialize)]
	struct Item {
		id: u32,
		tags: Vec<&'static str>,
	}

	let mut request = Request::builder()
		.header(ACCEPT, "application/json")
		.build()
		.unwrap();
	let response = Response::from_content(&mut request, &Item { id: 7, tags: vec!["a"] })
		.await
		.unwrap();
	assert_eq!(&response.body[..], br#"{"id": 7, "tags": ["a"]}"#);
}

#[rstest]
#[tokio::test]
async fn test_permission_denied_translation() {
	let mut request = Request::builder()
		.header(ACCEPT, "application/json")
		.build()
		.unwrap();
	let response = Response::from_error(&mut request, &Error::permission_denied()).await;

	assert_eq!(response.status, StatusCode::FORBIDDEN);
	assert_eq!(response.headers[CONTENT_TYPE], "application/json");
	assert_eq!(
		&response.body[..],
		br#"{"message": "You do not have permission to perform this action."}"#
	);
}

#[rstest]
#[tokio::test]
async fn test_custom_api_error() {
	let mut request = Request::builder().build().unwrap();
	let error = Error::api(StatusCode::CONFLICT, "Name already taken.");
	let response = Response::from_error(&mut request, &error).await;

	// No Accept header: the first renderer (JSON) wins
	assert_eq!(response.status, StatusCode::CONFLICT);
	assert_eq!(&response.body[..], br#"{"message": "Name already taken."}"#);
}

#[rstest]
#[tokio::test]
async fn test_method_and_content_overloading() {
	let mut request = Request::builder()
		.method(Method::POST)
		.uri("/items/1/")
		.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
		.body("_method=PUT&_content=%7B%22name%22%3A+%22renamed%22%7D&_content_type=application%2Fjson")
		.build()
		.unwrap();

	assert_eq!(request.method(), &Method::PUT);
	assert_eq!(request.content_type(), Some("application/json"));
	assert_eq!(request.data().await.unwrap(), &json!({"name": "renamed"}));
	assert!(request.form().await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_form_post_without_overloading_fields() {
	let mut request = Request::builder()
		.method(Method::POST)
		.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
		.body("name=widget&_content=orphan")
		.build()
		.unwrap();

	assert_eq!(request.method(), &Method::POST);
	let form = request.form().await.unwrap();
	assert_eq!(form["name"], "widget");
	assert_eq!(form["_content"], "orphan");
}

#[rstest]
fn test_full_path() {
	let request = Request::builder().uri("/_love?").build().unwrap();
	assert_eq!(request.full_path(), "/_love");

	let request = Request::builder().uri("/_love?a=1&b=2").build().unwrap();
	assert_eq!(request.full_path(), "/_love?a=1&b=2");
}
