//! # Negotiant Conf
//!
//! Settings naming the parsers and renderers an API uses, loaded from TOML
//! and resolved into an [`negotiant_http::ApiConfig`].
//!
//! ## Example
//!
//! ```
//! use negotiant_conf::ApiSettings;
//!
//! let settings = ApiSettings::from_toml_str(
//!     r#"
//! default_parsers = ["json"]
//! default_renderers = ["json", "browsable_api"]
//! "#,
//! )
//! .unwrap();
//!
//! let config = settings.build();
//! assert_eq!(config.parsers.len(), 1);
//! ```

pub mod settings;

pub use settings::{ApiSettings, ParserKind, RendererKind, SettingsError};
