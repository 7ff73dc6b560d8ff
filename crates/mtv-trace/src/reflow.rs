//! Fixed-width reflow of trace text for hover and label display.

/// Break marker placed between wrapped lines of one paragraph.
pub const BREAK: &str = "<br>";

/// Column width for state, action and status fields.
pub const LINE_WIDTH: usize = 100;

/// Column width for node summary labels.
pub const LABEL_WIDTH: usize = 20;

/// Wrap every paragraph of `text` to `width` characters.
///
/// Paragraphs (the `'\n'` separated segments) are wrapped independently and
/// re-joined with `'\n'`. Wrapped lines within a paragraph are joined with
/// [`BREAK`]. A window that ends inside a run of alphanumeric characters gets
/// a trailing `-` so the split word reads as continued.
pub fn reflow(text: &str, width: usize) -> String {
    let width = width.max(1);
    text.split('\n')
        .map(|paragraph| wrap_paragraph(paragraph, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_paragraph(paragraph: &str, width: usize) -> String {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut lines = Vec::with_capacity(chars.len() / width + 1);

    for (index, window) in chars.chunks(width).enumerate() {
        let mut line: String = window.iter().collect();
        let next = chars.get((index + 1) * width);
        let last = window.last();
        if let (Some(next), Some(last)) = (next, last) {
            if next.is_alphanumeric() && last.is_alphanumeric() {
                line.push('-');
            }
        }
        lines.push(line);
    }

    lines.join(BREAK)
}
