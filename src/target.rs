use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// The target of a request, broken into its parts.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedTarget {
    /// The target exactly as it appeared in the request line.
    pub raw: String,

    /// The scheme, for a target given in absolute form
    /// (`http://host/path`).
    pub scheme: Option<String>,

    /// The host and port, for a target given in absolute form or starting
    /// with `//`.
    pub authority: Option<String>,

    /// The path, with percent-encoded sequences decoded.
    pub path: String,

    /// The query string, still encoded, if the target had one.
    pub raw_query: Option<String>,

    /// The decoded query parameters.  A parameter given more than once has
    /// every one of its values, in order.  Parameters with empty values are
    /// left out.
    pub query: HashMap<String, Vec<String>>,

    pub fragment: Option<String>,
}

impl ParsedTarget {
    /// Break apart the target of a request line.  This never fails; parts
    /// which are missing are left empty.
    ///
    /// The path is taken from the target as sent, only percent-decoded:
    /// dot segments (`/a/../b`) are kept, and the authority keeps its case.
    /// The scheme is lower-cased.  A target starting with `//` has an
    /// authority but no scheme.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (scheme, rest) = split_scheme(raw);
        let (authority, rest) = split_authority(rest);
        let (rest, fragment) = split_at(rest, '#');
        let (path, raw_query) = split_at(rest, '?');
        let raw_query = raw_query.map(String::from);
        Self{
            raw: raw.into(),
            scheme,
            authority: authority.map(String::from),
            path: percent_decode_str(path).decode_utf8_lossy().into_owned(),
            query: raw_query.as_deref()
                .map(parse_query)
                .unwrap_or_default(),
            raw_query,
            fragment: fragment.map(String::from),
        }
    }

    /// The values of the given query parameter, if it was present.
    #[must_use]
    pub fn query_values(&self, name: &str) -> Option<&[String]> {
        self.query.get(name).map(Vec::as_slice)
    }
}

/// Decode a query string (`a=1&b=two+words&a=3`) into a map from each
/// parameter name to all of its values.  `+` stands for a space, and
/// parameters whose value is empty are dropped.
#[must_use]
pub fn parse_query(query: &str) -> HashMap<String, Vec<String>> {
    let mut parameters: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        parameters.entry(name.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    parameters
}

// A scheme is only recognized when it is followed by `://`, so that a
// bare `host:port` is not mistaken for one.
fn split_scheme(raw: &str) -> (Option<String>, &str) {
    if let Some(delimiter) = raw.find("://") {
        let scheme = &raw[..delimiter];
        let mut characters = scheme.chars();
        let valid = characters.next().map_or(false, |c| c.is_ascii_alphabetic())
            && characters.all(|c| {
                c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.'
            });
        if valid {
            return (Some(scheme.to_ascii_lowercase()), &raw[delimiter+1..]);
        }
    }
    (None, raw)
}

fn split_authority(rest: &str) -> (Option<&str>, &str) {
    if !rest.starts_with("//") {
        return (None, rest);
    }
    let rest = &rest[2..];
    let end = rest.find(|c: char| c == '/' || c == '?' || c == '#')
        .unwrap_or_else(|| rest.len());
    (Some(&rest[..end]), &rest[end..])
}

fn split_at(
    composite: &str,
    delimiter: char
) -> (&str, Option<&str>) {
    match composite.find(delimiter) {
        Some(delimiter) => (
            &composite[..delimiter],
            Some(&composite[delimiter+1..])
        ),
        None => (composite, None),
    }
}

#[cfg(test)]
mod tests {

    #![allow(clippy::non_ascii_literal)]

    use super::*;

    #[test]
    fn origin_form_with_query() {
        let target = ParsedTarget::parse("/path?test=true&q=1");
        assert_eq!("/path?test=true&q=1", target.raw);
        assert_eq!("/path", target.path);
        assert_eq!(Some("test=true&q=1"), target.raw_query.as_deref());
        assert_eq!(
            Some(&[String::from("true")][..]),
            target.query_values("test")
        );
        assert_eq!(Some(&[String::from("1")][..]), target.query_values("q"));
        assert_eq!(None, target.scheme);
        assert_eq!(None, target.fragment);
    }

    #[test]
    fn path_is_percent_decoded() {
        let target = ParsedTarget::parse("/%F0%9F%92%A9.txt");
        assert_eq!("/💩.txt", target.path);
        assert!(target.query.is_empty());
    }

    #[test]
    fn plus_in_path_is_not_a_space() {
        assert_eq!("/a+b", ParsedTarget::parse("/a+b").path);
    }

    #[test]
    fn repeated_query_parameters() {
        let target = ParsedTarget::parse("/?a=1&b=two+words&a=%33");
        assert_eq!(
            Some(&[String::from("1"), String::from("3")][..]),
            target.query_values("a")
        );
        assert_eq!(
            Some(&[String::from("two words")][..]),
            target.query_values("b")
        );
    }

    #[test]
    fn blank_query_values_are_dropped() {
        let target = ParsedTarget::parse("/?empty=&flag&x=1");
        assert_eq!(None, target.query_values("empty"));
        assert_eq!(None, target.query_values("flag"));
        assert_eq!(1, target.query.len());
    }

    #[test]
    fn fragment_is_separated() {
        let target = ParsedTarget::parse("/page?x=1#section?y=2");
        assert_eq!("/page", target.path);
        assert_eq!(Some("x=1"), target.raw_query.as_deref());
        assert_eq!(Some("section?y=2"), target.fragment.as_deref());
    }

    #[test]
    fn absolute_form() {
        let target = ParsedTarget::parse("http://example.com:8080/a%20b?x=1");
        assert_eq!(Some("http"), target.scheme.as_deref());
        assert_eq!(Some("example.com:8080"), target.authority.as_deref());
        assert_eq!("/a b", target.path);
        assert_eq!(
            Some(&[String::from("1")][..]),
            target.query_values("x")
        );
    }

    #[test]
    fn absolute_form_keeps_path_as_sent() {
        let target = ParsedTarget::parse("HTTP://Example.com/a/../b?x=1#top");
        assert_eq!(Some("http"), target.scheme.as_deref());
        assert_eq!(Some("Example.com"), target.authority.as_deref());
        assert_eq!("/a/../b", target.path);
        assert_eq!(Some("x=1"), target.raw_query.as_deref());
        assert_eq!(Some("top"), target.fragment.as_deref());
    }

    #[test]
    fn scheme_relative_target_has_authority() {
        let target = ParsedTarget::parse("//host/path?q=1");
        assert_eq!(None, target.scheme);
        assert_eq!(Some("host"), target.authority.as_deref());
        assert_eq!("/path", target.path);
        assert_eq!(
            Some(&[String::from("1")][..]),
            target.query_values("q")
        );
    }

    #[test]
    fn authority_without_path() {
        let target = ParsedTarget::parse("http://example.com?x=1");
        assert_eq!(Some("example.com"), target.authority.as_deref());
        assert_eq!("", target.path);
        assert_eq!(Some("x=1"), target.raw_query.as_deref());
    }

    #[test]
    fn host_and_port_is_not_a_scheme() {
        let target = ParsedTarget::parse("example.com:443");
        assert_eq!(None, target.scheme);
        assert_eq!(None, target.authority);
        assert_eq!("example.com:443", target.path);
    }

    #[test]
    fn asterisk_form() {
        let target = ParsedTarget::parse("*");
        assert_eq!("*", target.path);
        assert_eq!(None, target.authority);
    }

}
