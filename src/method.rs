use super::headers::Headers;
use std::fmt;

/// Work specific to one request method, done once the headers of a request
/// using that method have all been received.
pub trait MethodHook {
    fn headers_complete(&self, headers: &Headers) {
        let _ = headers;
    }
}

struct GetHook;

impl MethodHook for GetHook {}

struct PostHook;

impl MethodHook for PostHook {}

/// The request methods this parser accepts.  A request line naming any
/// other method is rejected as not implemented.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Recognize the method token of a request line.  Method names are
    /// case-sensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    #[must_use]
    pub fn hook(self) -> &'static dyn MethodHook {
        match self {
            Method::Get => &GetHook,
            Method::Post => &PostHook,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
