use std::fs;
use std::io::{self, prelude::*};
use std::path;

use flate2::read::MultiGzDecoder;
use log::warn;

pub fn is_gzipped(header: &[u8]) -> bool {
    header.starts_with(b"\x1f\x8b")
}

pub fn is_gzipped_extension(path: &path::Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Read an entire file into a string, decompressing it first when it
/// starts with the gzip magic bytes.
pub(crate) fn read_text(path: &path::Path) -> io::Result<String> {
    let raw = fs::read(path)?;
    let gzipped = is_gzipped(&raw);
    if !gzipped && is_gzipped_extension(path) {
        warn!("{} has a .gz extension but is not gzip-compressed", path.display());
    }
    if gzipped {
        let mut text = String::new();
        MultiGzDecoder::new(raw.as_slice()).read_to_string(&mut text)?;
        Ok(text)
    } else {
        String::from_utf8(raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
