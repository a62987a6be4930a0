use super::eol::Eol;

/// Collects raw bytes across calls and hands back the complete lines they
/// contain.  The line ending is locked in from the first line feed seen.
#[derive(Debug, Default)]
pub struct LineAccumulator {
    eol: Option<Eol>,
    pending: Vec<u8>,
}

impl LineAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The line ending in use, once one has been detected.
    #[must_use]
    pub fn eol(&self) -> Option<Eol> {
        self.eol
    }

    /// Bytes received so far which do not yet form a complete line.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Take the bytes which do not yet form a complete line, leaving the
    /// accumulator empty.
    pub fn take_pending(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.pending)
    }

    /// Add the given chunk to whatever is already buffered and return every
    /// line which is now complete, in order and without its line ending.
    /// Any bytes after the last line ending are kept for the next call.
    /// An empty result means more data is needed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        // Bytes already buffered hold no line ending, so only the new bytes
        // need searching, plus one byte before them in case a carriage return
        // is waiting for its line feed.
        let search_from = self.pending.len().saturating_sub(1);
        self.pending.extend_from_slice(chunk);
        let eol = match self.eol {
            Some(eol) => eol,
            None => match Eol::detect(&self.pending[search_from..]) {
                Some(eol) => {
                    tracing::trace!(?eol, "line ending detected");
                    self.eol = Some(eol);
                    eol
                },
                None => return Vec::new(),
            },
        };
        if eol.find(&self.pending[search_from..]).is_none() {
            return Vec::new();
        }
        let buffered = std::mem::take(&mut self.pending);
        let mut pieces = eol.split(&buffered);
        let fragment = pieces.pop().unwrap_or_default();
        self.pending = fragment.to_vec();
        pieces.into_iter()
            .map(<[u8]>::to_vec)
            .collect()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn buffers_until_line_feed() {
        let mut lines = LineAccumulator::new();
        assert!(lines.push(b"GET").is_empty());
        assert_eq!(b"GET", lines.pending());
        assert!(lines.push(b" /path HTTP/1.1").is_empty());
        assert_eq!(None, lines.eol());
        assert_eq!(
            vec![b"GET /path HTTP/1.1".to_vec()],
            lines.push(b"\n")
        );
        assert_eq!(Some(Eol::Lf), lines.eol());
        assert!(lines.pending().is_empty());
    }

    #[test]
    fn carriage_return_split_from_line_feed() {
        let mut lines = LineAccumulator::new();
        assert!(lines.push(b"GET / HTTP/1.1\r").is_empty());
        assert_eq!(
            vec![b"GET / HTTP/1.1".to_vec()],
            lines.push(b"\nHost")
        );
        assert_eq!(Some(Eol::CrLf), lines.eol());
        assert_eq!(b"Host", lines.pending());
    }

    #[test]
    fn several_lines_in_one_chunk() {
        let mut lines = LineAccumulator::new();
        assert_eq!(
            vec![
                b"GET / HTTP/1.1".to_vec(),
                b"Host: h".to_vec(),
                b"".to_vec(),
            ],
            lines.push(b"GET / HTTP/1.1\r\nHost: h\r\n\r\nBODY")
        );
        assert_eq!(b"BODY", lines.pending());
    }

    #[test]
    fn crlf_token_split_across_later_chunks() {
        let mut lines = LineAccumulator::new();
        assert_eq!(
            vec![b"first".to_vec()],
            lines.push(b"first\r\nsecond\r")
        );
        assert_eq!(b"second\r", lines.pending());
        assert_eq!(vec![b"second".to_vec()], lines.push(b"\n"));
        assert!(lines.pending().is_empty());
    }

    #[test]
    fn locked_line_ending_is_not_redetected() {
        let mut lines = LineAccumulator::new();
        assert_eq!(vec![b"first".to_vec()], lines.push(b"first\n"));
        assert_eq!(vec![b"second\r".to_vec()], lines.push(b"second\r\n"));
        assert_eq!(Some(Eol::Lf), lines.eol());

        let mut lines = LineAccumulator::new();
        assert_eq!(vec![b"first".to_vec()], lines.push(b"first\r\n"));
        assert!(lines.push(b"second\n").is_empty());
        assert_eq!(b"second\n", lines.pending());
    }

    #[test]
    fn long_line_one_byte_at_a_time() {
        let mut lines = LineAccumulator::new();
        assert_eq!(
            vec![b"GET / HTTP/1.1".to_vec()],
            lines.push(b"GET / HTTP/1.1\r\nX-Long: ")
        );
        for _ in 0..200_000 {
            assert!(lines.push(b"a").is_empty());
        }
        assert!(lines.push(b"\r").is_empty());
        assert_eq!(200_000 + 9, lines.pending().len());
        let completed = lines.push(b"\n");
        assert_eq!(1, completed.len());
        assert_eq!(200_000 + 8, completed[0].len());
        assert!(completed[0].starts_with(b"X-Long: aaa"));
        assert!(lines.pending().is_empty());
    }

    #[test]
    fn carriage_return_alone_in_its_own_chunk() {
        let mut lines = LineAccumulator::new();
        assert!(lines.push(b"GET / HTTP/1.1").is_empty());
        assert!(lines.push(b"\r").is_empty());
        assert_eq!(vec![b"GET / HTTP/1.1".to_vec()], lines.push(b"\n"));
        assert_eq!(Some(Eol::CrLf), lines.eol());
    }

    #[test]
    fn take_pending_empties_buffer() {
        let mut lines = LineAccumulator::new();
        let _ = lines.push(b"a\nrest");
        assert_eq!(b"rest".to_vec(), lines.take_pending());
        assert!(lines.pending().is_empty());
    }

}
