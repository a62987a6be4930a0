/// The line ending used by a client.  It is detected from the first line
/// feed seen on a connection and is then fixed for the rest of the request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Eol {
    /// A bare line feed (`\n`).
    Lf,

    /// A carriage return followed by a line feed (`\r\n`).
    CrLf,
}

impl Eol {
    /// Look for the first line feed in the given bytes and decide which line
    /// ending it belongs to by checking the byte in front of it.  Returns
    /// `None` if there is no line feed yet.
    #[must_use]
    pub fn detect<T>(data: T) -> Option<Self>
        where T: AsRef<[u8]>
    {
        let data = data.as_ref();
        let line_feed = data.iter().position(|&b| b == b'\n')?;
        if line_feed > 0 && data[line_feed - 1] == b'\r' {
            Some(Eol::CrLf)
        } else {
            Some(Eol::Lf)
        }
    }

    #[must_use]
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Eol::Lf => b"\n",
            Eol::CrLf => b"\r\n",
        }
    }

    /// Return the position of the first occurrence of this line ending in
    /// the given bytes.
    #[must_use]
    pub fn find<T>(self, data: T) -> Option<usize>
        where T: AsRef<[u8]>
    {
        let data = data.as_ref();
        let token = self.as_bytes();
        if data.len() < token.len() {
            return None;
        }
        data.windows(token.len())
            .position(|window| window == token)
    }

    /// Split the given bytes at every occurrence of this line ending.  The
    /// last element is whatever follows the final line ending, and is empty
    /// if the data ends exactly on one.
    #[must_use]
    pub fn split(self, data: &[u8]) -> Vec<&[u8]> {
        let token_len = self.as_bytes().len();
        let mut pieces = Vec::new();
        let mut rest = data;
        while let Some(end) = self.find(rest) {
            pieces.push(&rest[..end]);
            rest = &rest[end + token_len..];
        }
        pieces.push(rest);
        pieces
    }
}
