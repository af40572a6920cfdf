//! Decoding of the line-oriented radical files.

use encoding_rs::{EUC_JP, UTF_8};
use std::{borrow::Cow, io::Read};

/// Reads the whole of `r` and decodes it as UTF-8, or as EUC-JP if the bytes are not valid UTF-8.
///
/// The EDRDG distributions of the radical files are EUC-JP encoded while most repackaged
/// versions are UTF-8, so both are accepted.
pub fn read_to_string<R: Read>(mut r: R) -> eyre::Result<String> {
    let mut buf = vec![];
    r.read_to_end(&mut buf)?;
    decode(&buf).map(Cow::into_owned)
}

pub fn decode(buf: &[u8]) -> eyre::Result<Cow<'_, str>> {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(strip_bom(buf)) {
        return Ok(text);
    }
    tracing::debug!("input is not valid UTF-8, decoding as EUC-JP");
    EUC_JP
        .decode_without_bom_handling_and_without_replacement(buf)
        .ok_or_else(|| eyre::eyre!("Input is neither valid UTF-8 nor valid EUC-JP"))
}

fn strip_bom(buf: &[u8]) -> &[u8] {
    buf.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(buf)
}
