const BOM: char = '\u{feff}';

/// Minimal HTML document that word processors open as rich text.
///
/// The byte-order mark and the charset declaration keep umlauts intact when
/// the file is opened with a `.doc` extension.
pub fn render(content: &str) -> Vec<u8> {
    format!(
        "{}<html><head><meta charset=\"UTF-8\"></head><body>{}</body></html>",
        BOM, content
    )
    .into_bytes()
}
