/// Calculates the 1-based line and column number for a given byte offset in
/// the source text. This is only called on the error path, as it iterates
/// through the source text to determine the position.
pub fn line_col_at(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// The inverse direction: byte offset of a 1-based line/column position.
/// Columns count bytes within the line, matching how `serde_json` reports
/// error positions. Out-of-range positions clamp to the end of the text.
pub fn offset_at(text: &str, line: usize, column: usize) -> usize {
    let mut remaining = line.saturating_sub(1);
    let mut line_start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        if remaining == 0 {
            break;
        }
        if b == b'\n' {
            remaining -= 1;
            line_start = i + 1;
        }
    }
    (line_start + column.saturating_sub(1)).min(text.len())
}
