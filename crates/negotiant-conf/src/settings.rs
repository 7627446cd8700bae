use std::fs;
use std::path::Path;
use std::sync::Arc;

use negotiant_http::ApiConfig;
use negotiant_parsers::{FormParser, JSONParser, MultiPartParser, Parser};
use negotiant_renderers::{BrowsableAPIRenderer, HTMLRenderer, JSONRenderer, Renderer};
use serde::{Deserialize, Serialize};

/// Error type for loading settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid settings: {0}")]
	Invalid(String),
}

/// Built-in parsers selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
	/// `application/json`
	Json,
	/// `application/x-www-form-urlencoded`
	#[serde(alias = "urlencoded")]
	Form,
	/// `multipart/form-data`
	#[serde(alias = "multi_part")]
	Multipart,
}

impl ParserKind {
	pub fn build(self) -> Arc<dyn Parser> {
		match self {
			Self::Json => Arc::new(JSONParser::new()),
			Self::Form => Arc::new(FormParser::new()),
			Self::Multipart => Arc::new(MultiPartParser::new()),
		}
	}
}

/// Built-in renderers selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
	/// `application/json`
	Json,
	/// `text/html`, pre-rendered markup
	Html,
	/// `text/html`, the browsable API page
	BrowsableApi,
}

impl RendererKind {
	pub fn build(self) -> Arc<dyn Renderer> {
		match self {
			Self::Json => Arc::new(JSONRenderer::new()),
			Self::Html => Arc::new(HTMLRenderer::new()),
			Self::BrowsableApi => Arc::new(BrowsableAPIRenderer::new()),
		}
	}
}

/// API settings
///
/// Every field is optional in the TOML source:
///
/// ```toml
/// default_parsers = ["json", "form", "multipart"]
/// default_renderers = ["json", "browsable_api"]
/// method_overloading = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSettings {
	/// Parsers tried in order against the request Content-Type
	pub default_parsers: Vec<ParserKind>,
	/// Renderers tried in order against the request Accept header
	pub default_renderers: Vec<RendererKind>,
	/// Honour `_method`, `_content` and `_content_type` in POSTed forms
	pub method_overloading: bool,
}

impl Default for ApiSettings {
	fn default() -> Self {
		Self {
			default_parsers: vec![ParserKind::Json, ParserKind::Form, ParserKind::Multipart],
			default_renderers: vec![RendererKind::Json, RendererKind::BrowsableApi],
			method_overloading: true,
		}
	}
}

impl ApiSettings {
	/// Parses settings from a TOML document.
	///
	/// Unknown parser or renderer names are rejected.
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_conf::{ApiSettings, RendererKind};
	///
	/// let settings = ApiSettings::from_toml_str(r#"default_renderers = ["json", "html"]"#).unwrap();
	/// assert_eq!(settings.default_renderers, vec![RendererKind::Json, RendererKind::Html]);
	/// assert!(settings.method_overloading);
	///
	/// assert!(ApiSettings::from_toml_str(r#"default_parsers = ["yaml"]"#).is_err());
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Loads settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = fs::read_to_string(path)?;
		let settings = Self::from_toml_str(&source)?;
		tracing::debug!(path = %path.display(), "loaded API settings");
		Ok(settings)
	}

	/// Rejects renderer lists that cannot render anything.
	///
	/// The browsable API renders through another renderer, so it cannot be
	/// the only one.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.default_renderers.is_empty() {
			return Err(SettingsError::Invalid(
				"default_renderers must not be empty".to_string(),
			));
		}
		if self
			.default_renderers
			.iter()
			.all(|kind| *kind == RendererKind::BrowsableApi)
		{
			return Err(SettingsError::Invalid(
				"browsable_api needs another renderer in default_renderers".to_string(),
			));
		}
		Ok(())
	}

	/// Constructs the configured parsers and renderers
	///
	/// # Examples
	///
	/// ```
	/// use negotiant_conf::ApiSettings;
	///
	/// let config = ApiSettings::default().build();
	/// assert_eq!(config.parsers.len(), 3);
	/// assert_eq!(config.renderers.len(), 2);
	/// ```
	pub fn build(&self) -> ApiConfig {
		ApiConfig::new()
			.with_parsers(
				self.default_parsers
					.iter()
					.map(|kind| kind.build())
					.collect(),
			)
			.with_renderers(
				self.default_renderers
					.iter()
					.map(|kind| kind.build())
					.collect(),
			)
			.with_method_overloading(self.method_overloading)
	}
}
