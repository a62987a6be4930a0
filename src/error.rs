/// This is the enumeration of all the different kinds of errors which this
/// crate generates.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A line following a header line began with whitespace, but there was
    /// no header in progress for it to continue.
    #[error("header continuation line without a preceding header")]
    HeaderContinuationWithoutHeader(String),

    /// The attached header line had no colon separating name and value.
    #[error("header line missing colon")]
    HeaderLineMissingColon(String),

    /// The attached bytes did not decode as text in the configured charset.
    #[error("header line is not valid text")]
    HeaderLineNotValidText(Vec<u8>),

    /// The name of the attached header line is empty or contains a
    /// character which is not allowed in header names.
    #[error("invalid header name")]
    HeaderNameInvalid(String),

    /// The method in the request line is not one this parser supports.
    #[error("method not implemented")]
    MethodNotImplemented(String),

    /// The attached request line did not split into exactly a method, a
    /// target, and a protocol.
    #[error("request line is malformed")]
    RequestLineInvalid(String),

    /// The attached bytes did not decode as text in the configured charset.
    #[error("request line is not valid text")]
    RequestLineNotValidText(Vec<u8>),

    /// The protocol named in the attached request line is not supported.
    #[error("unsupported protocol version in request line")]
    RequestLineProtocol(String),

    /// The attached bytes are the beginning of the request line, whose length
    /// exceeds the request line limit.
    #[error("request line too long")]
    RequestLineTooLong(Vec<u8>),

    /// The request is too large to fit within the configured size limit.
    #[error("request exceeds maximum size limit")]
    RequestTooLong,
}

/// Broad classification of an [`Error`], which decides the HTTP status
/// code of the response sent back to the client.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    BadRequest,
    InvalidHeader,
    NotImplemented,
    VersionNotSupported,
}

impl ErrorKind {
    #[must_use]
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest | ErrorKind::InvalidHeader => 400,
            ErrorKind::NotImplemented => 501,
            ErrorKind::VersionNotSupported => 505,
        }
    }
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::HeaderContinuationWithoutHeader(_)
            | Error::HeaderLineMissingColon(_)
            | Error::HeaderNameInvalid(_) => ErrorKind::InvalidHeader,
            Error::MethodNotImplemented(_) => ErrorKind::NotImplemented,
            Error::RequestLineProtocol(_) => ErrorKind::VersionNotSupported,
            Error::HeaderLineNotValidText(_)
            | Error::RequestLineInvalid(_)
            | Error::RequestLineNotValidText(_)
            | Error::RequestLineTooLong(_)
            | Error::RequestTooLong => ErrorKind::BadRequest,
        }
    }

    /// Shorthand for `self.kind().status_code()`.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}
