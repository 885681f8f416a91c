/// Line inserted between the head and tail of a minimized fragment.
pub const ELISION_MARKER: &str = "...";

/// Collapse `text` to its first line, [`ELISION_MARKER`], and its last line.
///
/// This is a lossy display aid, not a summary: everything between the
/// first and last line is dropped, including code that matters. Text of
/// two lines or fewer is returned unchanged.
pub fn minimize(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    match lines.as_slice() {
        [first, .., last] if lines.len() > 2 => {
            format!("{}\n{}\n{}", first, ELISION_MARKER, last)
        }
        _ => text.to_string(),
    }
}
