//! Text helpers for the browsable API page

use std::sync::LazyLock;

use regex::Regex;

static QUOTED_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#""(https?://[^"]*)""#).expect("QUOTED_LINK_REGEX: invalid regex pattern")
});

/// Escapes text for use as HTML element content.
///
/// Quotes are left alone so quoted links can still be detected afterwards.
///
/// # Examples
///
/// ```
/// use negotiant_renderers::utils::escape_html;
///
/// assert_eq!(escape_html("I <3 Rust & \"friends\""), "I &lt;3 Rust &amp; \"friends\"");
/// ```
pub fn escape_html(input: &str) -> String {
	input
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

/// Turns double-quoted `http(s)://` URLs into links, keeping the quotes.
///
/// # Examples
///
/// ```
/// use negotiant_renderers::utils::urlize_quoted_links;
///
/// assert_eq!(
///     urlize_quoted_links(r#"{"url": "http://example.org"}"#),
///     r#"{"url": "<a href="http://example.org">http://example.org</a>"}"#
/// );
/// ```
pub fn urlize_quoted_links(content: &str) -> String {
	QUOTED_LINK_REGEX
		.replace_all(content, r#""<a href="$1">$1</a>""#)
		.into_owned()
}

/// Removes the common leading indentation from a block of text.
///
/// The indentation is measured on the non-blank lines after the first, so
/// text starting right after the opening of a doc string is handled. The
/// result is trimmed.
///
/// # Examples
///
/// ```
/// use negotiant_renderers::utils::dedent;
///
/// let text = "Summary line.\n\n        Details here.\n          Nested.\n    ";
/// assert_eq!(dedent(text), "Summary line.\n\nDetails here.\n  Nested.");
/// ```
pub fn dedent(content: &str) -> String {
	let indent = content
		.lines()
		.skip(1)
		.filter(|line| !line.trim_start().is_empty())
		.map(|line| line.len() - line.trim_start_matches(' ').len())
		.min();

	let Some(indent) = indent.filter(|indent| *indent > 0) else {
		return content.trim().to_string();
	};

	let prefix = " ".repeat(indent);
	content
		.lines()
		.map(|line| line.strip_prefix(prefix.as_str()).unwrap_or(line))
		.collect::<Vec<_>>()
		.join("\n")
		.trim()
		.to_string()
}

/// Converts an endpoint identifier into a page title.
///
/// Dashes and underscores become spaces, the first character is upper-cased
/// and the rest lower-cased.
///
/// # Examples
///
/// ```
/// use negotiant_renderers::utils::convert_to_title;
///
/// assert_eq!(convert_to_title("user-list"), "User list");
/// assert_eq!(convert_to_title("API_root"), "Api root");
/// ```
pub fn convert_to_title(name: &str) -> String {
	let spaced = name.replace(['-', '_'], " ");
	let mut chars = spaced.chars();
	match chars.next() {
		Some(first) => first
			.to_uppercase()
			.chain(chars.flat_map(char::to_lowercase))
			.collect(),
		None => String::new(),
	}
}
