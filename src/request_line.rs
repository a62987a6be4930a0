use super::{
    error::Error,
    method::Method,
    target::ParsedTarget,
    version::Version,
};

/// The first line of a request, fully parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestLine {
    pub method: Method,
    pub target: ParsedTarget,
    pub version: Version,
}

impl RequestLine {
    /// Parse a request line which has already been decoded and had its line
    /// ending removed.  The line must hold exactly three whitespace-separated
    /// parts.  The protocol is checked before the method, so a request with
    /// both wrong is reported as having an unsupported version.
    pub fn parse(request_line: &str) -> Result<Self, Error> {
        let mut parts = request_line.split_whitespace();
        let (method, target, protocol) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some(method), Some(target), Some(protocol), None) => {
                (method, target, protocol)
            },
            _ => return Err(Error::RequestLineInvalid(request_line.into())),
        };
        let version = Version::from_token(protocol)
            .ok_or_else(|| Error::RequestLineProtocol(request_line.into()))?;
        let method = Method::from_token(method)
            .ok_or_else(|| Error::MethodNotImplemented(method.into()))?;
        Ok(Self{
            method,
            target: ParsedTarget::parse(target),
            version,
        })
    }
}
