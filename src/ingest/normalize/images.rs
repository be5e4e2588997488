use url::Url;

fn is_web_url(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return false;
    }
    Url::parse(token)
        .map(|url| url.host_str().is_some_and(|host| !host.is_empty()))
        .unwrap_or(false)
}

/// Image links separated by `,`, `|` or `;`. Only syntactically valid
/// http(s) URLs are kept, in source order.
pub fn parse_image_urls(raw: &str) -> Vec<String> {
    raw.split([',', '|', ';'])
        .map(str::trim)
        .filter(|token| is_web_url(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_urls_are_dropped() {
        assert_eq!(
            parse_image_urls("foo.png, http://x.com/a.jpg"),
            vec!["http://x.com/a.jpg"]
        );
    }

    #[test]
    fn test_all_separators_and_order() {
        assert_eq!(
            parse_image_urls("https://b.io/2.png | http://a.io/1.png; ftp://c.io/3.png"),
            vec!["https://b.io/2.png", "http://a.io/1.png"]
        );
    }

    #[test]
    fn test_scheme_without_host_is_rejected() {
        assert!(parse_image_urls("http://, https://").is_empty());
        assert!(parse_image_urls("").is_empty());
    }
}
