#![warn(clippy::pedantic)]
#![allow(clippy::non_ascii_literal)]
#![allow(clippy::missing_errors_doc)]

//! This crate parses the head of an HTTP/1.x request (the request line and
//! headers) incrementally, from chunks of bytes of any size as they arrive
//! from a connection.  See [`Parser`] for where to start.

pub mod coding;
mod eol;
mod error;
mod headers;
mod lines;
mod method;
mod parser;
mod request_line;
mod target;
mod version;

pub use crate::eol::Eol;
pub use crate::error::{
    Error,
    ErrorKind,
};
pub use crate::headers::{
    is_invalid_header_name,
    parse_header_line,
    HeaderAccumulator,
    HeaderValue,
    Headers,
};
pub use crate::lines::LineAccumulator;
pub use crate::method::{
    Method,
    MethodHook,
};
pub use crate::parser::{
    Parser,
    RequestHandler,
    DEFAULT_MAX_REQUEST_SIZE,
    DEFAULT_REQUEST_LINE_LIMIT,
};
pub use crate::request_line::RequestLine;
pub use crate::target::{
    parse_query,
    ParsedTarget,
};
pub use crate::version::Version;
