//! Integration tests for settings driven configuration
#![cfg(feature = "conf")]

use negotiant::http::header::{ACCEPT, CONTENT_TYPE};
use negotiant::prelude::*;
use negotiant::{ParserKind, SettingsError};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn test_unknown_parser_fails_to_load() {
	let result = ApiSettings::from_toml_str(r#"default_parsers = ["json", "msgpack"]"#);
	assert!(matches!(result, Err(SettingsError::Toml(_))));
}

#[rstest]
fn test_defaults() {
	let settings = ApiSettings::default();
	assert_eq!(
		settings.default_parsers,
		vec![ParserKind::Json, ParserKind::Form, ParserKind::Multipart]
	);
	assert!(settings.method_overloading);
}

#[rstest]
#[tokio::test]
async fn test_settings_restrict_parsers() {
	let config = ApiSettings::from_toml_str(
		r#"
default_parsers = ["json"]
default_renderers = ["json"]
method_overloading = false
"#,
	)
	.unwrap()
	.build();

	let mut request = Request::builder()
		.method(Method::POST)
		.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
		.config(config.clone())
		.body("_method=DELETE")
		.build()
		.unwrap();
	assert_eq!(request.method(), &Method::POST);
	assert_eq!(
		request.data().await.unwrap_err().status_code(),
		StatusCode::UNSUPPORTED_MEDIA_TYPE
	);

	let mut request = Request::builder()
		.header(ACCEPT, "text/html")
		.config(config)
		.build()
		.unwrap();
	assert!(matches!(
		Response::from_content(&mut request, &json!({})).await,
		Err(Error::NotAcceptable(_))
	));
}
