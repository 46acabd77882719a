use axum::http::{HeaderMap, HeaderValue, header};

/// Content-Security-Policy directive names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CspDirective {
    DefaultSrc,
    ScriptSrc,
    StyleSrc,
    ImgSrc,
    ConnectSrc,
    FontSrc,
    FrameSrc,
    FrameAncestors,
    BaseUri,
    FormAction,
    ObjectSrc,
    MediaSrc,
    WorkerSrc,
}

impl CspDirective {
    /// The directive name as it appears in the header value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DefaultSrc => "default-src",
            Self::ScriptSrc => "script-src",
            Self::StyleSrc => "style-src",
            Self::ImgSrc => "img-src",
            Self::ConnectSrc => "connect-src",
            Self::FontSrc => "font-src",
            Self::FrameSrc => "frame-src",
            Self::FrameAncestors => "frame-ancestors",
            Self::BaseUri => "base-uri",
            Self::FormAction => "form-action",
            Self::ObjectSrc => "object-src",
            Self::MediaSrc => "media-src",
            Self::WorkerSrc => "worker-src",
        }
    }
}

/// Source list for a CSP directive: a single origin or an ordered list
///
/// List sources render space-separated in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CspSources {
    Single(String),
    List(Vec<String>),
}

impl CspSources {
    /// Render the source list portion of the directive value
    pub fn render(&self) -> String {
        match self {
            Self::Single(source) => source.clone(),
            Self::List(sources) => sources.join(" "),
        }
    }
}

impl From<&str> for CspSources {
    fn from(source: &str) -> Self {
        Self::Single(source.to_string())
    }
}

impl From<String> for CspSources {
    fn from(source: String) -> Self {
        Self::Single(source)
    }
}

impl From<Vec<String>> for CspSources {
    fn from(sources: Vec<String>) -> Self {
        Self::List(sources)
    }
}

impl From<Vec<&str>> for CspSources {
    fn from(sources: Vec<&str>) -> Self {
        Self::List(sources.into_iter().map(str::to_string).collect())
    }
}

/// Set a Content-Security-Policy directive on a response header map
///
/// Renders `"<directive> <sources>"` and merges it into an existing
/// `Content-Security-Policy` header with `"; "`, or inserts a new header if
/// none is present. A value that is not a valid header value is dropped.
pub fn set_csp_directive(headers: &mut HeaderMap, directive: CspDirective, sources: &CspSources) {
    let fragment = format!("{} {}", directive.as_str(), sources.render());

    let value = match headers
        .get(header::CONTENT_SECURITY_POLICY)
        .and_then(|existing| existing.to_str().ok())
    {
        Some(existing) => format!("{}; {}", existing, fragment),
        None => fragment,
    };

    if let Ok(value) = HeaderValue::from_str(&value) {
        headers.insert(header::CONTENT_SECURITY_POLICY, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ CspSources rendering tests ============

    #[test]
    fn test_single_source_renders_as_is() {
        let sources = CspSources::from("https://a.example");
        assert_eq!(sources.render(), "https://a.example");
    }

    #[test]
    fn test_list_renders_space_separated_in_order() {
        let sources = CspSources::from(vec!["https://a.example", "https://b.example"]);
        assert_eq!(sources.render(), "https://a.example https://b.example");
    }

    #[test]
    fn test_from_string_owned() {
        let sources = CspSources::from("'self'".to_string());
        assert_eq!(sources, CspSources::Single("'self'".to_string()));
    }

    // ============ set_csp_directive tests ============

    #[test]
    fn test_sets_directive_on_empty_headers() {
        let mut headers = HeaderMap::new();
        set_csp_directive(
            &mut headers,
            CspDirective::FrameAncestors,
            &CspSources::from("https://a.example"),
        );

        assert_eq!(
            headers.get(header::CONTENT_SECURITY_POLICY).unwrap(),
            "frame-ancestors https://a.example"
        );
    }

    #[test]
    fn test_merges_into_existing_policy() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self'"),
        );

        set_csp_directive(
            &mut headers,
            CspDirective::FrameAncestors,
            &CspSources::from("https://a.example"),
        );

        assert_eq!(
            headers.get(header::CONTENT_SECURITY_POLICY).unwrap(),
            "default-src 'self'; frame-ancestors https://a.example"
        );
    }

    #[test]
    fn test_other_directives() {
        let mut headers = HeaderMap::new();
        set_csp_directive(
            &mut headers,
            CspDirective::ScriptSrc,
            &CspSources::from(vec!["'self'", "https://cdn.example"]),
        );

        assert_eq!(
            headers.get(header::CONTENT_SECURITY_POLICY).unwrap(),
            "script-src 'self' https://cdn.example"
        );
    }

    #[test]
    fn test_invalid_header_value_is_dropped() {
        let mut headers = HeaderMap::new();
        set_csp_directive(
            &mut headers,
            CspDirective::FrameAncestors,
            &CspSources::from("bad\nvalue"),
        );

        assert!(headers.get(header::CONTENT_SECURITY_POLICY).is_none());
    }

    #[test]
    fn test_directive_names() {
        assert_eq!(CspDirective::FrameAncestors.as_str(), "frame-ancestors");
        assert_eq!(CspDirective::DefaultSrc.as_str(), "default-src");
        assert_eq!(CspDirective::BaseUri.as_str(), "base-uri");
    }
}
