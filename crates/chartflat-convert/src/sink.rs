//! Writing manifest blocks to an output sink

use std::io::{self, Write};

/// YAML document separator
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Append one manifest block to `sink` as its own document.
///
/// The block is trimmed and skipped when empty. A `---` line is prepended
/// unless the block already starts with one, and a final newline appended.
pub fn write_document(sink: &mut dyn Write, data: &[u8]) -> io::Result<()> {
    let trimmed = data.trim_ascii();
    if trimmed.is_empty() {
        return Ok(());
    }

    if !trimmed.starts_with(DOCUMENT_SEPARATOR.as_bytes()) {
        sink.write_all(DOCUMENT_SEPARATOR.as_bytes())?;
        sink.write_all(b"\n")?;
    }
    sink.write_all(trimmed)?;
    sink.write_all(b"\n")
}

/// Append one manifest block to an in-memory stream.
///
/// Like [`write_document`], but a block following one that already ended
/// in a `---` line gets no second separator, so joining never produces an
/// empty document.
pub fn append_document(stream: &mut Vec<u8>, data: &[u8]) {
    let mut block = data.trim_ascii();

    if ends_with_separator(stream) {
        block = strip_leading_separator(block);
    } else if !block.is_empty() && !block.starts_with(DOCUMENT_SEPARATOR.as_bytes()) {
        stream.extend_from_slice(DOCUMENT_SEPARATOR.as_bytes());
        stream.push(b'\n');
    }

    if block.is_empty() {
        return;
    }
    stream.extend_from_slice(block);
    stream.push(b'\n');
}

fn ends_with_separator(stream: &[u8]) -> bool {
    let trimmed = stream.trim_ascii_end();
    let last_line = match trimmed.iter().rposition(|&b| b == b'\n') {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    };
    last_line.trim_ascii() == DOCUMENT_SEPARATOR.as_bytes()
}

fn strip_leading_separator(block: &[u8]) -> &[u8] {
    let end = block.iter().position(|&b| b == b'\n').unwrap_or(block.len());
    if block[..end].trim_ascii() == DOCUMENT_SEPARATOR.as_bytes() {
        block[end..].trim_ascii_start()
    } else {
        block
    }
}

/// Terminate the current document with a `---` line
pub(crate) fn write_separator(sink: &mut dyn Write, previous: &[u8]) -> io::Result<()> {
    if !previous.is_empty() && !previous.ends_with(b"\n") {
        sink.write_all(b"\n")?;
    }
    sink.write_all(DOCUMENT_SEPARATOR.as_bytes())?;
    sink.write_all(b"\n")
}
