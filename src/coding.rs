//! This module contains helper functions for interpreting the bytes of the
//! request line and header lines as text.  The charset used is configurable
//! on the parser; any encoding recognized by the
//! [`encoding_rs`](https://crates.io/crates/encoding_rs) crate may be used.
//! Decoding is strict: bytes which are not valid in the charset cause the
//! line to be rejected rather than replaced.

use encoding_rs::Encoding;

/// Look up an encoding by one of its WHATWG labels (`"utf-8"`,
/// `"iso-8859-1"`, `"latin1"`, and so on).
#[must_use]
pub fn encoding_for_label<T>(label: T) -> Option<&'static Encoding>
    where T: AsRef<[u8]>
{
    Encoding::for_label(label.as_ref())
}

/// Attempt to decode the given line using the given encoding.  `None` is
/// returned if the line contains any byte sequence which is malformed in
/// that encoding.
#[must_use]
pub fn decode_line<T>(
    encoding: &'static Encoding,
    line: T
) -> Option<String>
    where T: AsRef<[u8]>
{
    encoding.decode_without_bom_handling_and_without_replacement(line.as_ref())
        .map(String::from)
}
