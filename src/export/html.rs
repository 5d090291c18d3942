/// Content as-is; it already is the HTML body the generator produced or the
/// editor saved.
pub fn render(content: &str) -> Vec<u8> {
    content.as_bytes().to_vec()
}
