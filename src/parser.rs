use super::{
    coding::{
        decode_line,
        encoding_for_label,
    },
    eol::Eol,
    error::Error,
    headers::{
        HeaderAccumulator,
        Headers,
    },
    lines::LineAccumulator,
    method::Method,
    request_line::RequestLine,
    target::ParsedTarget,
    version::Version,
};
use encoding_rs::Encoding;

/// This is the default limit on the total number of bytes a request may
/// take, counting every byte passed to [`Parser::consume`].
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 1024 * 1024;

/// This is the default limit on the length of the request line, not
/// counting its line ending.
pub const DEFAULT_REQUEST_LINE_LIMIT: usize = 8 * 1024;

/// This is implemented by whatever drives the response to a request, so that
/// it is told as soon as each part of the request has been parsed.
#[allow(unused_variables)]
pub trait RequestHandler {
    /// Called once the request line has been parsed.
    fn request_line_ready(
        &mut self,
        method: Method,
        target: &ParsedTarget,
        version: Version,
    ) {
    }

    /// Called once the blank line ending the headers has been received.
    fn headers_ready(&mut self, headers: &Headers) {
    }
}

impl RequestHandler for () {}

#[derive(Debug, Eq, PartialEq)]
enum ParserState {
    Body,
    Headers,
    RequestLine,
}

/// This parses the head of one HTTP/1.x request as its bytes arrive, in
/// chunks of any size.  Use one parser per request on a connection.
#[derive(Debug)]
pub struct Parser {
    /// The charset used to decode the request line and header lines.
    pub encoding: &'static Encoding,

    /// The largest number of bytes the request may take in total, or
    /// `None` for no limit.
    pub max_request_size: Option<usize>,

    /// The longest the request line may be, or `None` for no limit beyond
    /// `max_request_size`.
    pub request_line_limit: Option<usize>,

    consumed_length: usize,
    headers: HeaderAccumulator,
    lines: LineAccumulator,
    request_line: Option<RequestLine>,
    state: ParserState,
}

impl Parser {
    fn count_bytes(&mut self, bytes: usize) -> Result<(), Error> {
        self.consumed_length += bytes;
        match self.max_request_size {
            Some(max_request_size) if self.consumed_length > max_request_size => {
                Err(Error::RequestTooLong)
            },
            _ => Ok(())
        }
    }

    /// Feed the parser the next chunk of bytes received for the request.
    ///
    /// Chunks must be given in the order they arrived, with nothing missing
    /// or repeated.  The handler is told about the request line and the
    /// headers as soon as each is complete.
    ///
    /// Returns `None` while the request line or headers are still being
    /// received.  The call which completes the headers returns whatever
    /// bytes followed the blank line (possibly none), and every call after
    /// that returns its chunk unchanged, as more of the body.
    ///
    /// Any error is fatal to the request; the parser should not be used
    /// again afterwards.
    pub fn consume<T, H>(
        &mut self,
        chunk: T,
        handler: &mut H,
    ) -> Result<Option<Vec<u8>>, Error>
    where
        T: AsRef<[u8]>,
        H: RequestHandler + ?Sized,
    {
        let chunk = chunk.as_ref();
        self.count_bytes(chunk.len())?;
        if self.state == ParserState::Body {
            return Ok(Some(chunk.to_vec()));
        }
        let mut lines = self.lines.push(chunk).into_iter();
        if self.state == ParserState::RequestLine {
            match lines.next() {
                Some(request_line) => {
                    self.parse_request_line(request_line, handler)?;
                },
                None => {
                    self.check_unterminated_request_line()?;
                    return Ok(None);
                },
            }
        }
        while let Some(line) = lines.next() {
            if line.is_empty() {
                return Ok(Some(self.finish_headers(lines, handler)));
            }
            match decode_line(self.encoding, &line) {
                Some(line) => self.headers.push_line(&line)?,
                None => return Err(Error::HeaderLineNotValidText(line)),
            }
        }
        Ok(None)
    }

    fn check_unterminated_request_line(&self) -> Result<(), Error> {
        let pending = self.lines.pending();
        tracing::trace!(buffered = pending.len(), "request line incomplete");
        match self.request_line_limit {
            // Allow one extra byte: a carriage return still waiting for
            // its line feed.
            Some(limit) if pending.len() > limit + 1 => {
                Err(Error::RequestLineTooLong(pending[..limit].to_vec()))
            },
            _ => Ok(()),
        }
    }

    fn parse_request_line<H>(
        &mut self,
        request_line: Vec<u8>,
        handler: &mut H,
    ) -> Result<(), Error>
    where
        H: RequestHandler + ?Sized,
    {
        if let Some(limit) = self.request_line_limit {
            if request_line.len() > limit {
                return Err(Error::RequestLineTooLong(request_line[..limit].to_vec()));
            }
        }
        let request_line = match decode_line(self.encoding, &request_line) {
            Some(request_line) => request_line,
            None => return Err(Error::RequestLineNotValidText(request_line)),
        };
        let request_line = RequestLine::parse(&request_line)?;
        tracing::debug!(
            method = %request_line.method,
            path = %request_line.target.path,
            version = %request_line.version,
            "request line parsed"
        );
        handler.request_line_ready(
            request_line.method,
            &request_line.target,
            request_line.version,
        );
        self.request_line = Some(request_line);
        self.state = ParserState::Headers;
        Ok(())
    }

    fn finish_headers<I, H>(
        &mut self,
        remaining_lines: I,
        handler: &mut H,
    ) -> Vec<u8>
    where
        I: Iterator<Item = Vec<u8>>,
        H: RequestHandler + ?Sized,
    {
        self.headers.finish();
        let eol = self.lines.eol().map_or(&b""[..], Eol::as_bytes);
        let mut body = Vec::new();
        for line in remaining_lines {
            body.extend(line);
            body.extend(eol);
        }
        body.extend(self.lines.take_pending());
        self.state = ParserState::Body;
        let headers = self.headers.headers();
        if let Some(request_line) = &self.request_line {
            request_line.method.hook().headers_complete(headers);
        }
        tracing::debug!(
            headers = headers.len(),
            body_prefix = body.len(),
            "request headers complete"
        );
        handler.headers_ready(headers);
        body
    }

    /// Select the charset used to decode the request line and header lines
    /// by one of its labels (`"utf-8"`, `"latin1"`, ...).  Returns `false`,
    /// leaving the charset unchanged, if the label is not recognized.
    pub fn set_encoding_label<T>(&mut self, label: T) -> bool
        where T: AsRef<[u8]>
    {
        match encoding_for_label(label) {
            Some(encoding) => {
                self.encoding = encoding;
                true
            },
            None => false,
        }
    }

    /// The request line, once it has been parsed.
    #[must_use]
    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    /// The headers received so far.  These are complete once
    /// [`needs_headers`](#method.needs_headers) returns `false`.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        self.headers.headers()
    }

    /// The line ending the client is using, once it is known.
    #[must_use]
    pub fn eol(&self) -> Option<Eol> {
        self.lines.eol()
    }

    #[must_use]
    pub fn consumed_length(&self) -> usize {
        self.consumed_length
    }

    #[must_use]
    pub fn needs_request_line(&self) -> bool {
        self.state == ParserState::RequestLine
    }

    #[must_use]
    pub fn needs_headers(&self) -> bool {
        self.state != ParserState::Body
    }

    #[must_use]
    pub fn new() -> Self {
        Self{
            encoding: encoding_rs::UTF_8,
            max_request_size: Some(DEFAULT_MAX_REQUEST_SIZE),
            request_line_limit: Some(DEFAULT_REQUEST_LINE_LIMIT),
            consumed_length: 0,
            headers: HeaderAccumulator::new(),
            lines: LineAccumulator::new(),
            request_line: None,
            state: ParserState::RequestLine,
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
