//! Plain hex dump used for eyeballing produced files and chunk contents.

use std::fmt::Write;

/// Bytes shown per output line.
pub const BYTES_PER_LINE: usize = 16;

/// Renders `bytes` as lowercase hex pairs, each followed by a space, with a
/// newline after every [`BYTES_PER_LINE`] bytes.
pub fn format(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3 + bytes.len() / BYTES_PER_LINE);
    for (i, byte) in bytes.iter().enumerate() {
        let _ = write!(out, "{:02x} ", byte);
        if (i + 1) % BYTES_PER_LINE == 0 {
            out.push('\n');
        }
    }
    out
}
